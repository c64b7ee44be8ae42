//! Handler for `jarpub compare`.

use std::cmp::Ordering;

use miette::Result;

use jarpub_core::version::{compare, Version};

pub fn exec(a: &str, b: &str) -> Result<()> {
    let sign = match compare(&Version::parse(a)?, &Version::parse(b)?) {
        Ordering::Less => "<",
        Ordering::Equal => "=",
        Ordering::Greater => ">",
    };
    println!("{a} {sign} {b}");
    Ok(())
}

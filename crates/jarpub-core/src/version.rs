//! Version parsing and ordering for human-facing reports.
//!
//! A version is split at its first `-` into a release part and a suffix:
//! - Release tokens are split on `.`; numeric tokens compare as integers and
//!   a missing trailing token counts as `0`, so `1.0 == 1`
//! - Suffix tokens are split on `.` and `-`; a missing suffix token ranks
//!   below any present one, so `1.1-ABC > 1.1`
//! - Non-numeric tokens compare lexically and rank above numeric ones
//!
//! Parsing is lenient: any non-blank text is accepted.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use jarpub_util::errors::{PublishError, PublishResult};

/// Reserved suffix marking a pre-release build.
pub const SNAPSHOT_SUFFIX: &str = "-SNAPSHOT";

/// Whether a version string carries the snapshot suffix.
pub fn is_snapshot(version: &str) -> bool {
    version.ends_with(SNAPSHOT_SUFFIX)
}

/// A parsed version with comparable tokens.
#[derive(Debug, Clone)]
pub struct Version {
    original: String,
    release: Vec<Token>,
    suffix: Vec<Token>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum Token {
    Number(u64),
    Text(String),
}

impl Version {
    /// Parse a version string. Fails only on blank input.
    pub fn parse(text: &str) -> PublishResult<Self> {
        let text = text.trim();
        if text.is_empty() {
            return Err(PublishError::format("version is blank"));
        }
        let (release, suffix) = match text.split_once('-') {
            Some((r, s)) => (r, s),
            None => (text, ""),
        };
        Ok(Self {
            original: text.to_string(),
            release: release.split('.').map(classify).collect(),
            suffix: suffix
                .split(['.', '-'])
                .filter(|t| !t.is_empty())
                .map(classify)
                .collect(),
        })
    }

    pub fn as_str(&self) -> &str {
        &self.original
    }

    pub fn is_snapshot(&self) -> bool {
        is_snapshot(&self.original)
    }

    /// Release tokens with trailing zeros removed, so that equal versions
    /// hash the same.
    fn normalized_release(&self) -> &[Token] {
        let mut end = self.release.len();
        while end > 0 && self.release[end - 1] == Token::Number(0) {
            end -= 1;
        }
        &self.release[..end]
    }
}

fn classify(token: &str) -> Token {
    if token.is_empty() {
        return Token::Number(0);
    }
    match token.parse::<u64>() {
        Ok(n) => Token::Number(n),
        Err(_) => Token::Text(token.to_string()),
    }
}

fn compare_tokens(a: &Token, b: &Token) -> Ordering {
    match (a, b) {
        (Token::Number(a), Token::Number(b)) => a.cmp(b),
        (Token::Number(_), Token::Text(_)) => Ordering::Less,
        (Token::Text(_), Token::Number(_)) => Ordering::Greater,
        (Token::Text(a), Token::Text(b)) => a.cmp(b),
    }
}

const ZERO: Token = Token::Number(0);

/// Compare two parsed versions.
pub fn compare(a: &Version, b: &Version) -> Ordering {
    let len = a.release.len().max(b.release.len());
    for i in 0..len {
        let x = a.release.get(i).unwrap_or(&ZERO);
        let y = b.release.get(i).unwrap_or(&ZERO);
        let ord = compare_tokens(x, y);
        if ord != Ordering::Equal {
            return ord;
        }
    }

    let len = a.suffix.len().max(b.suffix.len());
    for i in 0..len {
        let ord = match (a.suffix.get(i), b.suffix.get(i)) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Less,
            (Some(_), None) => Ordering::Greater,
            (Some(x), Some(y)) => compare_tokens(x, y),
        };
        if ord != Ordering::Equal {
            return ord;
        }
    }
    Ordering::Equal
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        compare(self, other)
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Version {}

impl Hash for Version {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.normalized_release().hash(state);
        self.suffix.hash(state);
    }
}

impl FromStr for Version {
    type Err = PublishError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.original)
    }
}

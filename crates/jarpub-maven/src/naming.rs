/// Turn an arbitrary name into a camelCase identifier.
///
/// Characters that are neither letters nor digits separate words and are
/// dropped; the first word starts lowercase and every later word uppercase.
/// `he11o-world` becomes `he11oWorld`, `-HelloWorld` becomes `helloWorld`.
pub fn normalize_pub_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut new_word = true;
    for ch in name.chars() {
        if !ch.is_alphanumeric() {
            new_word = true;
            continue;
        }
        if new_word && out.is_empty() {
            out.extend(ch.to_lowercase());
        } else if new_word {
            out.extend(ch.to_uppercase());
        } else {
            out.push(ch);
        }
        new_word = false;
    }
    out
}

/// Uppercase the first character.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

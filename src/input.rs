//! Cleaning and validation of free-text movie titles.

/// Characters accepted in a movie title besides letters, digits and whitespace
const ALLOWED_PUNCTUATION: &[char] = &['-', '\'', '"', '!', '?', '.', ','];

fn is_allowed(c: char) -> bool {
    c.is_alphanumeric() || c.is_whitespace() || ALLOWED_PUNCTUATION.contains(&c)
}

/// Cleans raw user input into a normalized title
///
/// Trims surrounding whitespace, collapses internal whitespace runs to a
/// single space and strips characters outside the allowed set.
pub fn normalize(raw: &str) -> String {
    let stripped: String = raw.chars().filter(|&c| is_allowed(c)).collect();
    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// True iff every character of `cleaned` is in the allowed set
///
/// Does not check for emptiness; callers decide whether an empty title is
/// acceptable.
pub fn is_valid(cleaned: &str) -> bool {
    cleaned.chars().all(is_allowed)
}

//! Lenient string helpers shared by the value parsers and configuration objects.

use std::sync::LazyLock;

use regex::Regex;

/// Tokens accepted as `true` besides the canonical one.
pub const AFFIRMATIVE: &[&str] = &[
    "yes", "ok", "1", "oui", "ja", "da", "confirm", "yep", "y", "on",
];

/// Tokens accepted as `false` besides the canonical one.
pub const NEGATIVE: &[&str] = &["no", "non", "0", "nein", "niet", "never", "n", "off"];

static INVALID_RELATIVE_PATH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[:\x00\r\n\t\p{M}\p{Cc}\p{Co}\p{Cf}]").expect("valid relative path regex")
});

/// Parses many spellings of a boolean.
///
/// The token is trimmed and lowercased, then matched against `true`/`false`,
/// then [`AFFIRMATIVE`], then [`NEGATIVE`]. Returns `None` when nothing matches,
/// including for blank input.
///
/// ```
/// use jsonbind::view::lenient::parse_bool;
///
/// assert_eq!(parse_bool(" Oui "), Some(true));
/// assert_eq!(parse_bool("OFF"), Some(false));
/// assert_eq!(parse_bool("maybe"), None);
/// ```
pub fn parse_bool(value: &str) -> Option<bool> {
    let token = value.trim().to_lowercase();
    match token.as_str() {
        "" => None,
        "true" => Some(true),
        "false" => Some(false),
        t if AFFIRMATIVE.contains(&t) => Some(true),
        t if NEGATIVE.contains(&t) => Some(false),
        _ => None,
    }
}

/// Returns true for empty or whitespace-only strings
pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Returns true if `path` contains characters that are not allowed in a
/// relative file path: colons, NUL, line breaks, tabs, combining marks,
/// control, private-use and format characters.
pub fn is_invalid_relative_path(path: &str) -> bool {
    INVALID_RELATIVE_PATH.is_match(path)
}

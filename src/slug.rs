use deunicode::deunicode_with_tofu;
use once_cell::sync::Lazy;
use regex::Regex;

static SEPARATORS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-z0-9]+").expect("separator regex is valid"));

/// Used when nothing printable survives, so a path segment is never empty.
pub const EMPTY_SLUG: &str = "untitled";

/// Turn a display name into a lowercase, ASCII, hyphenated path segment.
///
/// Non-ASCII text is transliterated first, so "Björk" becomes "bjork" and
/// "坂本龍一" still yields a readable segment. Characters with no known
/// transliteration become separators.
///
/// `slug(slug(x)) == slug(x)` for every input.
pub fn slug(name: &str) -> String {
    let ascii = deunicode_with_tofu(name, " ").to_lowercase();
    let mut spelled = String::with_capacity(ascii.len());

    for c in ascii.chars() {
        match c {
            '\'' | '"' | '`' => {}
            '&' => spelled.push_str(" and "),
            '@' => spelled.push_str(" at "),
            c => spelled.push(c),
        }
    }

    let slug = SEPARATORS.replace_all(&spelled, "-");
    let slug = slug.trim_matches('-');

    if slug.is_empty() {
        EMPTY_SLUG.to_string()
    } else {
        slug.to_string()
    }
}

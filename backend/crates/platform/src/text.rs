//! Text helpers shared by the identifier value objects

use unicode_normalization::UnicodeNormalization;

/// Keep only ASCII decimal digits
///
/// Dots, dashes, spaces and any other character are dropped, so
/// `"529.982.247-25"` becomes `"52998224725"`.
pub fn digits_only(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_digit).collect()
}

/// NFKC-normalize, then trim surrounding whitespace
///
/// Full-width input typed on some mobile keyboards (`ｊｏａｏ`) collapses
/// to its ASCII form before any validation rule runs.
pub fn normalize(raw: &str) -> String {
    raw.nfkc().collect::<String>().trim().to_string()
}

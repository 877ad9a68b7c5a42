//! CPF Value Object
//!
//! CPF (Cadastro de Pessoas Físicas) is the 11-digit Brazilian taxpayer
//! number. The last two digits are check digits computed from the first
//! nine (and ten) with descending weights modulo 11.
//!
//! ## Validation order
//! 1. Strip every non-digit character (`529.982.247-25` → `52998224725`)
//! 2. Exactly 11 digits, otherwise invalid
//! 3. Caller-supplied [`KnownCpfs`] entries are accepted as-is
//! 4. Repeated-digit numbers (`111.111.111-11`) are invalid
//! 5. Both check digits must match
//!
//! Step 3 exists only for canned demo accounts. [`KnownCpfs`] is always
//! passed in from configuration; an empty set turns it off.

use std::collections::HashSet;
use std::fmt;

use kernel::error::app_error::{AppError, AppResult};
use platform::text::digits_only;
use serde::{Serialize, Serializer};

/// Number of digits in a CPF
pub const CPF_LENGTH: usize = 11;

/// CPFs of the demo accounts.
///
/// None of these carry valid check digits; they are fixtures, not data.
/// The demo front end also suggests `99999999999`, which is left out:
/// [`KnownCpfs`] never admits a repeated-digit number.
pub const DEMO_CPFS: &[&str] = &[
    "12345678900",
    "98765432100",
    "11122233344",
    "12312312312",
];

// ============================================================================
// KnownCpfs - demo allow-list
// ============================================================================

/// Identifiers accepted without a checksum check.
///
/// Entries that could never be real CPFs for structural reasons (wrong
/// length, all digits equal) are dropped on construction, so an allow-list
/// can widen the checksum rule but never the repeated-digit rule.
#[derive(Debug, Clone, Default)]
pub struct KnownCpfs {
    entries: HashSet<String>,
}

impl KnownCpfs {
    /// Empty allow-list: every CPF goes through the full algorithm
    pub fn none() -> Self {
        Self::default()
    }

    pub fn new<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = HashSet::new();
        for entry in entries {
            let digits = digits_only(entry.as_ref());
            if digits.len() != CPF_LENGTH {
                tracing::warn!(entry = entry.as_ref(), "Ignoring known CPF with wrong length");
                continue;
            }
            if has_repeated_digits(&digits) {
                tracing::warn!(entry = %digits, "Ignoring known CPF made of one repeated digit");
                continue;
            }
            set.insert(digits);
        }
        Self { entries: set }
    }

    /// The demo fixture set ([`DEMO_CPFS`])
    pub fn demo() -> Self {
        Self::new(DEMO_CPFS)
    }

    /// `digits` must already be stripped
    pub fn contains(&self, digits: &str) -> bool {
        self.entries.contains(digits)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ============================================================================
// Validation
// ============================================================================

/// Whether `raw` is a valid CPF.
///
/// Total over all inputs: malformed strings are simply `false`.
///
/// ```
/// use auth::models::{KnownCpfs, validate_cpf};
///
/// assert!(validate_cpf("529.982.247-25", &KnownCpfs::none()));
/// assert!(!validate_cpf("111.111.111-11", &KnownCpfs::none()));
/// assert!(!validate_cpf("", &KnownCpfs::none()));
/// ```
pub fn validate_cpf(raw: &str, known: &KnownCpfs) -> bool {
    let digits = digits_only(raw);

    if digits.len() != CPF_LENGTH {
        return false;
    }

    if known.contains(&digits) {
        return true;
    }

    if has_repeated_digits(&digits) {
        return false;
    }

    checksum_matches(&digits)
}

/// All characters equal (`"00000000000"`)
fn has_repeated_digits(digits: &str) -> bool {
    let mut chars = digits.chars();
    match chars.next() {
        Some(first) => chars.all(|c| c == first),
        None => true,
    }
}

/// Verify both check digits of an 11-digit string
fn checksum_matches(digits: &str) -> bool {
    let values: Vec<u32> = digits.bytes().map(|b| u32::from(b - b'0')).collect();
    if values.len() != CPF_LENGTH {
        return false;
    }

    check_digit(&values[..9]) == values[9] && check_digit(&values[..10]) == values[10]
}

/// Weighted sum with weights `len+1, len, ..., 2`, reduced modulo 11.
///
/// For the first digit the slice has 9 entries (weights 10..=2), for the
/// second 10 entries (weights 11..=2).
fn check_digit(values: &[u32]) -> u32 {
    let top = values.len() as u32 + 1;
    let sum: u32 = values
        .iter()
        .enumerate()
        .map(|(i, d)| d * (top - i as u32))
        .sum();

    let remainder = sum % 11;
    if remainder < 2 { 0 } else { 11 - remainder }
}

// ============================================================================
// Cpf value object
// ============================================================================

/// Validated CPF, stored as 11 bare digits
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Cpf(String);

impl Cpf {
    /// Strip punctuation and validate
    pub fn parse(raw: &str, known: &KnownCpfs) -> AppResult<Self> {
        if !validate_cpf(raw, known) {
            return Err(AppError::bad_request("Invalid CPF")
                .with_action("Check the 11 digits of your CPF"));
        }
        Ok(Self(digits_only(raw)))
    }

    /// Trusted seed data; only the digits are kept
    pub fn from_fixture(raw: &str) -> Self {
        Self(digits_only(raw))
    }

    /// Bare digits
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `000.000.000-00`
    pub fn formatted(&self) -> String {
        let d = &self.0;
        format!("{}.{}.{}-{}", &d[0..3], &d[3..6], &d[6..9], &d[9..11])
    }
}

impl fmt::Display for Cpf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.formatted())
    }
}

impl Serialize for Cpf {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn none() -> KnownCpfs {
        KnownCpfs::none()
    }

    #[test]
    fn test_valid_checksummed_cpfs() {
        assert!(validate_cpf("529.982.247-25", &none()));
        assert!(validate_cpf("52998224725", &none()));
        assert!(validate_cpf("111.444.777-35", &none()));
        assert!(validate_cpf(" 529 982 247 25 ", &none()));
    }

    #[test]
    fn test_check_digit_zero_branch() {
        // First check digit has remainder 1, so it must be 0
        assert!(validate_cpf("123.456.789-09", &none()));
        assert!(!validate_cpf("123.456.789-19", &none()));
    }

    #[test]
    fn test_wrong_check_digits() {
        assert!(!validate_cpf("529.982.247-24", &none()));
        assert!(!validate_cpf("529.982.247-35", &none()));
    }

    #[test]
    fn test_wrong_length() {
        assert!(!validate_cpf("", &none()));
        assert!(!validate_cpf("123456789", &none()));
        assert!(!validate_cpf("123456789000", &none()));
        assert!(!validate_cpf("abcdefghijk", &none()));
    }

    #[test]
    fn test_repeated_digits_always_rejected() {
        for d in 0..=9u8 {
            let cpf: String = std::iter::repeat_n(char::from(b'0' + d), CPF_LENGTH).collect();
            assert!(!validate_cpf(&cpf, &none()), "{cpf} should be invalid");
            assert!(!validate_cpf(&cpf, &KnownCpfs::demo()), "{cpf} should be invalid");
        }
        assert!(!validate_cpf("111.111.111-11", &none()));
    }

    #[test]
    fn test_demo_allow_list() {
        let demo = KnownCpfs::demo();
        assert!(validate_cpf("12345678900", &demo));
        assert!(validate_cpf("123.456.789-00", &demo));
        assert!(validate_cpf("123 456 789 00", &demo));
        assert!(validate_cpf("98765432100", &demo));
        assert!(validate_cpf("11122233344", &demo));

        // Same strings fail the real algorithm
        assert!(!validate_cpf("12345678900", &none()));
        assert!(!validate_cpf("98765432100", &none()));
    }

    #[test]
    fn test_known_cpfs_drops_structurally_invalid_entries() {
        let known = KnownCpfs::new(["99999999999", "1234", "123.456.789-00"]);
        assert_eq!(known.len(), 1);
        assert!(known.contains("12345678900"));
        assert_eq!(KnownCpfs::demo().len(), DEMO_CPFS.len());
        assert!(!KnownCpfs::demo().contains("99999999999"));
    }

    #[test]
    fn test_cpf_parse_and_format() {
        let cpf = Cpf::parse("529.982.247-25", &none()).unwrap();
        assert_eq!(cpf.as_str(), "52998224725");
        assert_eq!(cpf.formatted(), "529.982.247-25");
        assert_eq!(cpf.to_string(), "529.982.247-25");
    }

    #[test]
    fn test_cpf_parse_rejects_invalid() {
        let err = Cpf::parse("111.111.111-11", &none()).unwrap_err();
        assert_eq!(err.status_code(), 400);
    }
}

//! IBAN Value Object
//!
//! Check digits and validation follow ISO 13616: move the first four
//! characters to the end, replace letters with `A=10 .. Z=35` and take the
//! remainder modulo 97. A valid IBAN leaves a remainder of 1.

use serde::Serialize;
use std::fmt;

use super::country::{Country, registered_length};

pub const IBAN_MIN_LENGTH: usize = 15;
pub const IBAN_MAX_LENGTH: usize = 34;

/// Validation failures, each with a Polish user-facing reason
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IbanError {
    Empty,
    InvalidCharacters,
    InvalidLength { actual: usize },
    InvalidCountryCode,
    InvalidCheckDigits,
    CountryLengthMismatch { country: String, expected: usize, actual: usize },
    ChecksumMismatch,
}

impl IbanError {
    pub fn reason(&self) -> String {
        match self {
            IbanError::Empty => "IBAN nie może być pusty".to_string(),
            IbanError::InvalidCharacters => {
                "IBAN może zawierać tylko litery A-Z i cyfry".to_string()
            }
            IbanError::InvalidLength { actual } => format!(
                "IBAN musi mieć od {IBAN_MIN_LENGTH} do {IBAN_MAX_LENGTH} znaków (podano {actual})"
            ),
            IbanError::InvalidCountryCode => {
                "IBAN musi zaczynać się od dwuliterowego kodu kraju".to_string()
            }
            IbanError::InvalidCheckDigits => {
                "Znaki 3-4 IBAN muszą być cyframi kontrolnymi".to_string()
            }
            IbanError::CountryLengthMismatch {
                country,
                expected,
                actual,
            } => format!(
                "IBAN dla kraju {country} musi mieć {expected} znaków (podano {actual})"
            ),
            IbanError::ChecksumMismatch => "Nieprawidłowa suma kontrolna IBAN".to_string(),
        }
    }
}

impl fmt::Display for IbanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.reason())
    }
}

impl std::error::Error for IbanError {}

/// Incremental MOD-97 over an alphanumeric string (`A=10 .. Z=35`).
///
/// Input must already be restricted to `[A-Z0-9]`; other characters are
/// skipped.
pub fn mod97(input: &str) -> u32 {
    input.chars().fold(0u32, |acc, c| match c {
        '0'..='9' => (acc * 10 + (c as u32 - '0' as u32)) % 97,
        'A'..='Z' => (acc * 100 + (c as u32 - 'A' as u32 + 10)) % 97,
        _ => acc,
    })
}

/// Two check digits for a BBAN in the given country
pub fn check_digits(country_code: &str, bban: &str) -> String {
    let remainder = mod97(&format!("{bban}{country_code}00"));
    format!("{:02}", 98 - remainder)
}

/// Canonical IBAN: upper-case, no spaces, checksum verified
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Iban(String);

impl Iban {
    /// Assemble from country and BBAN, computing the check digits
    pub fn from_bban(country: Country, bban: &str) -> Self {
        let code = country.code();
        Self(format!("{code}{}{bban}", check_digits(code, bban)))
    }

    /// Parse and validate user input
    pub fn parse(input: &str) -> Result<Self, IbanError> {
        let normalized: String = input
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect::<String>()
            .to_ascii_uppercase();

        if normalized.is_empty() {
            return Err(IbanError::Empty);
        }

        if !normalized
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
        {
            return Err(IbanError::InvalidCharacters);
        }

        let len = normalized.len();
        if !(IBAN_MIN_LENGTH..=IBAN_MAX_LENGTH).contains(&len) {
            return Err(IbanError::InvalidLength { actual: len });
        }

        let bytes = normalized.as_bytes();
        if !bytes[..2].iter().all(u8::is_ascii_uppercase) {
            return Err(IbanError::InvalidCountryCode);
        }
        if !bytes[2..4].iter().all(u8::is_ascii_digit) {
            return Err(IbanError::InvalidCheckDigits);
        }

        let country = &normalized[..2];
        match registered_length(country) {
            Some(expected) if expected != len => {
                return Err(IbanError::CountryLengthMismatch {
                    country: country.to_string(),
                    expected,
                    actual: len,
                });
            }
            _ => {}
        }

        let rearranged = format!("{}{}", &normalized[4..], &normalized[..4]);
        if mod97(&rearranged) != 1 {
            return Err(IbanError::ChecksumMismatch);
        }

        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn country_code(&self) -> &str {
        &self.0[..2]
    }

    pub fn check_digits(&self) -> &str {
        &self.0[2..4]
    }

    pub fn bban(&self) -> &str {
        &self.0[4..]
    }

    /// Print format: groups of four separated by spaces
    pub fn formatted(&self) -> String {
        format_print(&self.0)
    }
}

impl fmt::Display for Iban {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Group a compact string into blocks of four
pub fn format_print(compact: &str) -> String {
    compact
        .as_bytes()
        .chunks(4)
        .map(|chunk| String::from_utf8_lossy(chunk))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    const KNOWN_VALID: &[&str] = &[
        "DE89370400440532013000",
        "GB82WEST12345698765432",
        "PL61109010140000071219812874",
        "AT611904300234573201",
    ];

    #[test]
    fn test_known_ibans_validate() {
        for iban in KNOWN_VALID {
            let parsed = Iban::parse(iban).unwrap();
            assert_eq!(parsed.as_str(), *iban);
        }
    }

    #[test]
    fn test_parse_normalizes_spaces_and_case() {
        let parsed = Iban::parse(" de89 3704 0044 0532 0130 00 ").unwrap();
        assert_eq!(parsed.as_str(), "DE89370400440532013000");
        assert_eq!(parsed.country_code(), "DE");
        assert_eq!(parsed.check_digits(), "89");
        assert_eq!(parsed.bban(), "370400440532013000");
    }

    #[test]
    fn test_check_digits_match_known_values() {
        assert_eq!(check_digits("DE", "370400440532013000"), "89");
        assert_eq!(check_digits("GB", "WEST12345698765432"), "82");
        assert_eq!(check_digits("AT", "1904300234573201"), "61");
    }

    #[test]
    fn test_mod97_incremental() {
        assert_eq!(mod97("0"), 0);
        assert_eq!(mod97("97"), 0);
        assert_eq!(mod97("98"), 1);
        assert_eq!(mod97("A"), 10);
        // 3704 0044 0532 0130 00 DE89 rearranged
        assert_eq!(mod97("370400440532013000DE89"), 1);
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(Iban::parse(""), Err(IbanError::Empty));
        assert_eq!(Iban::parse("   "), Err(IbanError::Empty));
        assert_eq!(
            Iban::parse("DE89-3704-0044-0532-0130-00"),
            Err(IbanError::InvalidCharacters)
        );
        assert_eq!(
            Iban::parse("DE8937040044"),
            Err(IbanError::InvalidLength { actual: 12 })
        );
        assert_eq!(
            Iban::parse("1289370400440532013000"),
            Err(IbanError::InvalidCountryCode)
        );
        assert_eq!(
            Iban::parse("DEX9370400440532013000"),
            Err(IbanError::InvalidCheckDigits)
        );
        assert_eq!(
            Iban::parse("DE893704004405320130001"),
            Err(IbanError::CountryLengthMismatch {
                country: "DE".to_string(),
                expected: 22,
                actual: 23,
            })
        );
        assert_eq!(
            Iban::parse("DE88370400440532013000"),
            Err(IbanError::ChecksumMismatch)
        );
    }

    #[test]
    fn test_single_digit_change_is_rejected() {
        let valid = "PL61109010140000071219812874";
        for (i, c) in valid.char_indices().skip(2) {
            let original = c.to_digit(10).unwrap();
            for replacement in 0..10 {
                if replacement == original {
                    continue;
                }
                let mut mutated = valid.to_string();
                mutated.replace_range(
                    i..i + 1,
                    &char::from_digit(replacement, 10).unwrap().to_string(),
                );
                assert!(Iban::parse(&mutated).is_err(), "{mutated} should fail");
            }
        }
    }

    #[test]
    fn test_format_print() {
        assert_eq!(
            format_print("DE89370400440532013000"),
            "DE89 3704 0044 0532 0130 00"
        );
        assert_eq!(format_print("ABCD"), "ABCD");
        assert_eq!(format_print(""), "");
    }

    #[test]
    fn test_reasons_are_polish() {
        assert_eq!(IbanError::Empty.reason(), "IBAN nie może być pusty");
        assert_eq!(
            IbanError::ChecksumMismatch.to_string(),
            "Nieprawidłowa suma kontrolna IBAN"
        );
    }
}

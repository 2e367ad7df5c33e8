//! Phone numbers
//!
//! Mobile numbers are validated against the calling code and national number
//! length of the selected country's ISO code.

use std::fmt::{Display, Formatter, Result as FmtResult};

use thiserror::Error;

/// Calling code and national significant number length for a country.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhoneRule {
    /// ISO 3166-1 alpha-2 code
    pub iso2: &'static str,

    /// Calling code, without the leading `+`
    pub calling_code: &'static str,

    /// Shortest national significant number
    pub min_len: usize,

    /// Longest national significant number
    pub max_len: usize,
}

const fn rule(iso2: &'static str, calling_code: &'static str, min_len: usize, max_len: usize) -> PhoneRule {
    PhoneRule {
        iso2,
        calling_code,
        min_len,
        max_len,
    }
}

static RULES: &[PhoneRule] = &[
    rule("NG", "234", 10, 10),
    rule("GH", "233", 9, 9),
    rule("KE", "254", 9, 9),
    rule("ZA", "27", 9, 9),
    rule("CM", "237", 9, 9),
    rule("BJ", "229", 8, 10),
    rule("TG", "228", 8, 8),
    rule("CI", "225", 10, 10),
    rule("SN", "221", 9, 9),
    rule("NE", "227", 8, 8),
    rule("ML", "223", 8, 8),
    rule("BF", "226", 8, 8),
    rule("LR", "231", 7, 9),
    rule("SL", "232", 8, 8),
    rule("GM", "220", 7, 7),
    rule("UG", "256", 9, 9),
    rule("TZ", "255", 9, 9),
    rule("RW", "250", 9, 9),
    rule("ET", "251", 9, 9),
    rule("EG", "20", 10, 10),
    rule("MA", "212", 9, 9),
    rule("DZ", "213", 9, 9),
    rule("TN", "216", 8, 8),
    rule("ZM", "260", 9, 9),
    rule("ZW", "263", 9, 9),
    rule("MW", "265", 9, 9),
    rule("BW", "267", 8, 8),
    rule("NA", "264", 9, 9),
    rule("AO", "244", 9, 9),
    rule("CD", "243", 9, 9),
    rule("US", "1", 10, 10),
    rule("CA", "1", 10, 10),
    rule("GB", "44", 10, 10),
    rule("IE", "353", 9, 9),
    rule("FR", "33", 9, 9),
    rule("DE", "49", 10, 11),
    rule("IT", "39", 9, 10),
    rule("ES", "34", 9, 9),
    rule("NL", "31", 9, 9),
    rule("AE", "971", 9, 9),
    rule("SA", "966", 9, 9),
    rule("IN", "91", 10, 10),
    rule("CN", "86", 11, 11),
    rule("JP", "81", 10, 10),
    rule("AU", "61", 9, 9),
    rule("BR", "55", 10, 11),
];

/// Longest and shortest E.164 digit counts accepted without a country rule.
const E164_MIN_DIGITS: usize = 8;
const E164_MAX_DIGITS: usize = 15;

/// Look up the phone rule for an ISO alpha-2 code.
pub fn rule_for(iso2: &str) -> Option<&'static PhoneRule> {
    RULES
        .iter()
        .find(|rule| rule.iso2.eq_ignore_ascii_case(iso2.trim()))
}

/// Calling code (without `+`) for an ISO alpha-2 code.
pub fn calling_code(iso2: &str) -> Option<&'static str> {
    rule_for(iso2).map(|rule| rule.calling_code)
}

/// Errors raised while parsing a mobile number.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PhoneError {
    /// Nothing was entered.
    #[error("mobile number is required")]
    Empty,

    /// Characters other than digits, separators and a leading `+`.
    #[error("mobile number may only contain digits")]
    InvalidCharacters,

    /// An international prefix for a different country.
    #[error("mobile number must start with +{expected}")]
    WrongCallingCode {
        /// The expected calling code
        expected: &'static str,
    },

    /// The national part has the wrong number of digits.
    #[error("mobile number must have {min}-{max} digits after the country code")]
    WrongLength {
        /// Minimum national digits
        min: usize,

        /// Maximum national digits
        max: usize,
    },

    /// No country rule is known and the number is not in international form.
    #[error("enter the number in international format, e.g. +15551234567")]
    NotInternational,
}

/// A parsed, normalised mobile number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhoneNumber {
    calling_code: String,
    national: String,
}

impl PhoneNumber {
    /// Calling code, without the leading `+`.
    pub fn calling_code(&self) -> &str {
        &self.calling_code
    }

    /// The number in E.164 form, e.g. `+2348031234567`.
    pub fn e164(&self) -> String {
        format!("+{}{}", self.calling_code, self.national)
    }
}

impl Display for PhoneNumber {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "+{}{}", self.calling_code, self.national)
    }
}

/// Parse `input` as a mobile number for the country identified by `iso2`.
///
/// Accepts `+<cc><national>`, `<cc><national>`, trunk-prefixed `0<national>`
/// and bare `<national>` forms, ignoring spaces, dashes, dots and brackets.
/// Without a known rule for `iso2` only international form is accepted.
///
/// # Errors
///
/// Returns a [`PhoneError`] describing the first problem found.
pub fn parse_mobile(input: &str, iso2: Option<&str>) -> Result<PhoneNumber, PhoneError> {
    let compact: String = input
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '.' | '(' | ')'))
        .collect();

    if compact.is_empty() {
        return Err(PhoneError::Empty);
    }

    let (international, digits) = match compact.strip_prefix('+') {
        Some(rest) => (true, rest),
        None => (false, compact.as_str()),
    };

    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(PhoneError::InvalidCharacters);
    }

    let Some(rule) = iso2.and_then(rule_for) else {
        return parse_generic(international, digits);
    };

    let national = if international {
        digits
            .strip_prefix(rule.calling_code)
            .ok_or(PhoneError::WrongCallingCode {
                expected: rule.calling_code,
            })?
    } else {
        match digits.strip_prefix(rule.calling_code) {
            Some(rest) if (rule.min_len..=rule.max_len).contains(&rest.len()) => rest,
            _ => digits.strip_prefix('0').unwrap_or(digits),
        }
    };

    if !(rule.min_len..=rule.max_len).contains(&national.len()) || national.starts_with('0') {
        return Err(PhoneError::WrongLength {
            min: rule.min_len,
            max: rule.max_len,
        });
    }

    Ok(PhoneNumber {
        calling_code: rule.calling_code.to_string(),
        national: national.to_string(),
    })
}

fn parse_generic(international: bool, digits: &str) -> Result<PhoneNumber, PhoneError> {
    if !international {
        return Err(PhoneError::NotInternational);
    }

    if !(E164_MIN_DIGITS..=E164_MAX_DIGITS).contains(&digits.len()) {
        return Err(PhoneError::WrongLength {
            min: E164_MIN_DIGITS,
            max: E164_MAX_DIGITS,
        });
    }

    // Without a rule the calling code boundary is unknown; keep the digits whole.
    Ok(PhoneNumber {
        calling_code: String::new(),
        national: digits.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn nigerian_forms_normalise_to_e164() -> TestResult {
        for input in ["08031234567", "+234 803 123 4567", "2348031234567", "8031234567"] {
            assert_eq!(
                parse_mobile(input, Some("NG"))?.e164(),
                "+2348031234567",
                "input {input}"
            );
        }

        Ok(())
    }

    #[test]
    fn ghana_number_is_shorter() -> TestResult {
        assert_eq!(parse_mobile("024-123-4567", Some("gh"))?.e164(), "+233241234567");

        assert_eq!(
            parse_mobile("08031234567", Some("GH")),
            Err(PhoneError::WrongLength { min: 9, max: 9 })
        );

        Ok(())
    }

    #[test]
    fn foreign_prefix_is_rejected() {
        assert_eq!(
            parse_mobile("+233241234567", Some("NG")),
            Err(PhoneError::WrongCallingCode { expected: "234" })
        );
    }

    #[test]
    fn letters_are_rejected() {
        assert_eq!(
            parse_mobile("0803-CALL-ME", Some("NG")),
            Err(PhoneError::InvalidCharacters)
        );
    }

    #[test]
    fn unknown_country_requires_international_form() -> TestResult {
        assert_eq!(
            parse_mobile("0123456789", Some("XX")),
            Err(PhoneError::NotInternational)
        );

        assert_eq!(parse_mobile("+3705551234", None)?.to_string(), "+3705551234");

        Ok(())
    }

    #[test]
    fn calling_code_lookup() {
        assert_eq!(calling_code("NG"), Some("234"));
        assert_eq!(calling_code("ng"), Some("234"));
        assert_eq!(calling_code("XX"), None);
    }
}

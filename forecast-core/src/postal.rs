use std::{fmt, str::FromStr};

use serde::{Serialize, Serializer};

use crate::error::ForecastError;

const POSTAL_CODE_LEN: usize = 5;

/// Returns true iff `input` is exactly five ASCII decimal digits.
pub fn is_valid_postal_code(input: &str) -> bool {
    input.len() == POSTAL_CODE_LEN && input.bytes().all(|b| b.is_ascii_digit())
}

/// A validated US ZIP code. The only way to get one is through [`PostalCode::parse`]
/// (or the `FromStr`/`TryFrom` impls that call it).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PostalCode(String);

impl PostalCode {
    pub fn parse(input: &str) -> Result<Self, ForecastError> {
        if is_valid_postal_code(input) {
            Ok(Self(input.to_owned()))
        } else {
            Err(ForecastError::InvalidPostalCode(input.to_owned()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PostalCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for PostalCode {
    type Err = ForecastError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<&str> for PostalCode {
    type Error = ForecastError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl Serialize for PostalCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_five_digits() {
        for ok in ["94102", "00000", "99999", "10001"] {
            assert!(is_valid_postal_code(ok), "{ok} should be valid");
        }
    }

    #[test]
    fn rejects_everything_else() {
        let bad = [
            "", "123", "1234", "123456", " 94102", "94102 ", "+9410", "-9410", "9410a",
            "94 02", "94102-1234", "١٢٣٤٥", "９４１０２",
        ];
        for input in bad {
            assert!(!is_valid_postal_code(input), "{input:?} should be invalid");
        }
    }

    #[test]
    fn parse_keeps_input_verbatim() {
        let code: PostalCode = "02134".parse().expect("valid code");
        assert_eq!(code.as_str(), "02134");
        assert_eq!(code.to_string(), "02134");
    }

    #[test]
    fn parse_error_carries_input() {
        let err = PostalCode::try_from("123").unwrap_err();
        assert!(matches!(err, ForecastError::InvalidPostalCode(ref s) if s == "123"));
    }

    #[test]
    fn serializes_as_plain_string() {
        let code = PostalCode::parse("90210").unwrap();
        assert_eq!(serde_json::to_string(&code).unwrap(), "\"90210\"");
    }
}

//! Validated ISO-style country codes.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use crate::error::PriorityError;

#[allow(clippy::expect_used, reason = "Pattern is a compile-time literal")]
static COUNTRY_CODE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("^[A-Z]{2}$").expect("valid country code pattern"));

/// Two upper-case ASCII letters, e.g. `US` or `CN`.
///
/// The only way to obtain one is [`CountryCode::parse`] (or deserialization,
/// which goes through it), so holding a `CountryCode` proves the input was
/// validated.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CountryCode(String);

impl CountryCode {
    /// Validate `raw` against `^[A-Z]{2}$`. No case folding or trimming.
    pub fn parse(raw: &str) -> Result<Self, PriorityError> {
        if COUNTRY_CODE_RE.is_match(raw) {
            Ok(Self(raw.to_string()))
        } else {
            Err(PriorityError::InvalidCountryCode { code: raw.to_string() })
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for CountryCode {
    type Err = PriorityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for CountryCode {
    type Error = PriorityError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<CountryCode> for String {
    fn from(code: CountryCode) -> Self {
        code.0
    }
}

impl AsRef<str> for CountryCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<&str> for CountryCode {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl fmt::Display for CountryCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

//! Country codes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::process::ProcessId;

/// An ISO 3166-1 alpha-2 country code, stored uppercase.
///
/// # Examples
///
/// ```
/// use textile_footprint::Country;
///
/// let fr: Country = "fr".parse().unwrap();
/// assert_eq!(fr.as_str(), "FR");
/// assert!("FRA".parse::<Country>().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Country(String);

impl Country {
    /// Creates a country code, normalizing to uppercase.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::InvalidCountryCode` unless the code is
    /// exactly two ASCII letters.
    pub fn new(code: &str) -> Result<Self, ValidationError> {
        let trimmed = code.trim();
        if trimmed.len() != 2 || !trimmed.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(ValidationError::InvalidCountryCode {
                code: code.to_string(),
            });
        }
        Ok(Self(trimmed.to_ascii_uppercase()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// China, the default spinning country.
    #[must_use]
    pub fn china() -> Self {
        Self("CN".to_string())
    }

    /// France, the default country for every later stage.
    #[must_use]
    pub fn france() -> Self {
        Self("FR".to_string())
    }
}

impl FromStr for Country {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for Country {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl From<Country> for String {
    fn from(country: Country) -> Self {
        country.0
    }
}

impl fmt::Display for Country {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Country-specific processes used by the energy-intensive stages.
///
/// Every process is optional: a country that has no modeled heat mix,
/// for instance, contributes no heat emissions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountryProfile {
    pub code: Country,
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub electricity: Option<ProcessId>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heat: Option<ProcessId>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dyeing: Option<ProcessId>,
}

impl CountryProfile {
    /// Iterates the processes this profile references.
    pub fn processes(&self) -> impl Iterator<Item = ProcessId> {
        [self.electricity, self.heat, self.dyeing].into_iter().flatten()
    }
}

//! User-editable inputs.
//!
//! `Inputs` is the minimal record a simulator is rebuilt from: a mass,
//! a material and product id, and the stage countries in life-cycle
//! order. Countries are always stored for every stage, so inputs rebuilt
//! from a simulator compare equal to the inputs it was computed from.

use serde::{Deserialize, Deserializer, Serialize};

use crate::country::Country;
use crate::error::{CodecError, ValidationError};
use crate::life_cycle::LifeCycle;
use crate::material::MaterialId;
use crate::product::ProductId;
use crate::step::Label;
use crate::units::Mass;

/// Inputs of one footprint computation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Inputs {
    pub mass: Mass,
    pub material: MaterialId,
    pub product: ProductId,

    /// Stage countries in life-cycle order.
    ///
    /// A shorter list is completed with the default countries on decode;
    /// a longer one is left as is and fails validation.
    #[serde(default = "default_countries", deserialize_with = "complete_countries")]
    pub countries: Vec<Country>,
}

fn default_countries() -> Vec<Country> {
    LifeCycle::new().countries()
}

/// Appends the default countries of the stages `countries` leaves out.
fn complete(mut countries: Vec<Country>) -> Vec<Country> {
    let defaults = default_countries();
    let start = countries.len();
    if start < defaults.len() {
        countries.extend_from_slice(&defaults[start..]);
    }
    countries
}

fn complete_countries<'de, D>(deserializer: D) -> Result<Vec<Country>, D::Error>
where
    D: Deserializer<'de>,
{
    Vec::<Country>::deserialize(deserializer).map(complete)
}

impl Inputs {
    /// Maximum number of stage countries.
    pub const MAX_COUNTRIES: usize = 5;

    /// Creates inputs on the default countries.
    ///
    /// # Errors
    /// Returns `InvalidMass` unless `mass_kg` is finite and positive.
    pub fn new(
        mass_kg: f64,
        material: impl Into<String>,
        product: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let inputs = Self {
            mass: Mass::from_kilograms(mass_kg),
            material: MaterialId::new(material),
            product: ProductId::new(product),
            countries: default_countries(),
        };
        inputs.validate()?;
        Ok(inputs)
    }

    /// Replaces the stage countries, completing a short list with defaults.
    #[must_use]
    pub fn with_countries(self, countries: Vec<Country>) -> Self {
        Self {
            countries: complete(countries),
            ..self
        }
    }

    /// Sets the country of one stage. `Label::Default` is ignored.
    #[must_use]
    pub fn with_stage_country(mut self, label: Label, country: Country) -> Self {
        self.countries = complete(self.countries);
        if let Some(slot) = label.index().and_then(|i| self.countries.get_mut(i)) {
            *slot = country;
        }
        self
    }

    /// Checks the inputs before any lookup.
    ///
    /// # Errors
    /// - `InvalidMass`: mass not finite or not positive
    /// - `TooManyCountries`: more countries than stages
    pub fn validate(&self) -> Result<(), ValidationError> {
        let kg = self.mass.kilograms();
        if !(kg.is_finite() && kg > 0.0) {
            return Err(ValidationError::InvalidMass { value: kg });
        }
        if self.countries.len() > Self::MAX_COUNTRIES {
            return Err(ValidationError::TooManyCountries {
                actual: self.countries.len(),
                max: Self::MAX_COUNTRIES,
            });
        }
        Ok(())
    }

    /// Stable hex digest of the inputs, shared by equal inputs.
    ///
    /// # Errors
    /// Returns `SerializationFailed` if the inputs cannot be encoded.
    pub fn fingerprint(&self) -> Result<String, CodecError> {
        let bytes = serde_json::to_vec(self).map_err(|e| CodecError::SerializationFailed {
            what: "inputs",
            message: e.to_string(),
        })?;
        Ok(blake3::hash(&bytes).to_hex().to_string())
    }
}

//! Product descriptors.
//!
//! A product carries every parameter of the weaving/knitting and making
//! stages that does not depend on where those stages happen.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::process::ProcessId;
use crate::units::{Kwh, Mass};

/// Catalog identifier of a product.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A finished textile product definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,

    /// Default finished mass.
    pub mass: Mass,

    /// Post-consumer-recycling waste rate applied at making.
    pub pcr_waste: f64,

    /// Knitted products use a per-kg electricity model, woven ones a per-pick model.
    pub knitted: bool,

    /// Picks per metre.
    pub ppm: f64,

    /// Fabric grammage in g/m2.
    pub grammage: f64,

    pub knitting_kwh_per_kg: f64,

    pub weaving_kwh_per_pick: f64,

    /// Weaving or knitting process.
    pub fabric_process: ProcessId,

    /// Making (confection) process.
    pub making_process: ProcessId,
}

impl Product {
    /// Validates the parameters that the pipeline divides by.
    ///
    /// A PCR waste rate of 1.0 would make the making stage divide by zero,
    /// so it is rejected here rather than surfacing as an infinite score.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !(0.0..1.0).contains(&self.pcr_waste) {
            return Err(ValidationError::PcrWasteOutOfRange {
                product: self.id.to_string(),
                value: self.pcr_waste,
            });
        }
        if !self.knitted && !(self.grammage.is_finite() && self.grammage > 0.0) {
            return Err(ValidationError::InvalidGrammage {
                product: self.id.to_string(),
                value: self.grammage,
            });
        }
        Ok(())
    }

    /// Weaving/knitting electricity.
    ///
    /// Knitting is measured on `knit_mass`, weaving on `woven_mass`: the two
    /// models are calibrated on different intermediates.
    #[must_use]
    pub fn fabric_electricity(&self, knit_mass: Mass, woven_mass: Mass) -> Kwh {
        if self.knitted {
            Kwh::new(knit_mass.kilograms() * self.knitting_kwh_per_kg)
        } else {
            let picks = woven_mass.grams() * self.ppm / self.grammage;
            Kwh::new(picks * self.weaving_kwh_per_pick)
        }
    }
}

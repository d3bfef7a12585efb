//! The footprint simulator.
//!
//! A `Simulator` is the aggregate root of one computation: the product,
//! its material, the five-stage life cycle and the resulting scores. It
//! is never patched field by field from outside; any change of inputs
//! goes through [`Simulator::from_inputs`], which recomputes everything.
//!
//! # Examples
//!
//! ```
//! use textile_footprint::{Db, Inputs, Simulator};
//!
//! let db = Db::builtin().unwrap();
//! let inputs = Inputs::new(0.17, "coton", "tshirt").unwrap();
//! let sim = Simulator::from_inputs(&inputs, &db).unwrap();
//! assert!(sim.co2.kilograms() > 0.0);
//! assert_eq!(sim.to_inputs(), inputs);
//! ```

mod passes;

use serde::{Deserialize, Serialize};

use crate::db::Db;
use crate::error::{FootprintResult, ValidationError};
use crate::inputs::Inputs;
use crate::life_cycle::LifeCycle;
use crate::material::Material;
use crate::product::Product;
use crate::step::{Label, Step};
use crate::transport::Summary;
use crate::units::{Co2e, Mass};

use passes::PIPELINE;

/// One computed footprint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Simulator {
    /// Finished product mass.
    pub mass: Mass,
    pub material: Material,
    pub product: Product,
    pub life_cycle: LifeCycle,

    /// Total footprint: every stage plus all transport.
    pub co2: Co2e,

    /// All transport legs combined.
    pub transport: Summary,
}

impl Simulator {
    /// Creates an uncomputed simulator on the default life cycle.
    #[must_use]
    pub fn new(mass: Mass, material: Material, product: Product) -> Self {
        Self {
            mass,
            material,
            product,
            life_cycle: LifeCycle::new(),
            co2: Co2e::ZERO,
            transport: Summary::empty(),
        }
    }

    /// Builds and computes a simulator from user inputs.
    ///
    /// Countries are applied to stages in order; stages beyond the end
    /// of `inputs.countries` keep their default country.
    ///
    /// # Errors
    /// - `Validation`: malformed inputs
    /// - `Execution`: unknown material or product id, or a catalog miss
    pub fn from_inputs(inputs: &Inputs, db: &Db) -> FootprintResult<Self> {
        inputs.validate()?;
        let material = db.material(&inputs.material)?.clone();
        let product = db.product(&inputs.product)?.clone();

        let life_cycle = LifeCycle::new().try_update_steps(&Label::ORDER, |step| {
            match step.label.index().and_then(|i| inputs.countries.get(i)) {
                Some(country) => step.update_country(country.clone(), db),
                None => Ok(step),
            }
        })?;

        Self {
            life_cycle,
            ..Self::new(inputs.mass, material, product)
        }
        .compute(db)
    }

    /// Extracts the inputs this simulator was computed from.
    #[must_use]
    pub fn to_inputs(&self) -> Inputs {
        Inputs {
            mass: self.mass,
            material: self.material.id.clone(),
            product: self.product.id.clone(),
            countries: self.life_cycle.countries(),
        }
    }

    /// Runs the full pipeline.
    ///
    /// Every derived value is rewritten, so computing an already computed
    /// simulator returns it unchanged.
    ///
    /// # Errors
    /// - `Validation`: non-positive mass, or a product whose PCR waste
    ///   rate or grammage would make the pipeline divide by zero
    /// - `Execution(UnknownProcess)`: the catalog lacks a referenced process
    pub fn compute(self, db: &Db) -> FootprintResult<Self> {
        let kg = self.mass.kilograms();
        if !(kg.is_finite() && kg > 0.0) {
            return Err(ValidationError::InvalidMass { value: kg }.into());
        }
        self.product.validate()?;

        let mut sim = self;
        for (name, pass) in PIPELINE {
            sim = pass(sim, db)?;
            tracing::trace!(target: "textile_footprint::simulator", pass = name, "simulator.pass.done");
        }

        tracing::debug!(
            target: "textile_footprint::simulator",
            product = %sim.product.id,
            material = %sim.material.id,
            co2 = sim.co2.kilograms(),
            transport_co2 = sim.transport.co2.kilograms(),
            "simulator.computed"
        );
        Ok(sim)
    }

    /// Get the step for a stage.
    #[must_use]
    pub fn step(&self, label: Label) -> Option<&Step> {
        self.life_cycle.get_step(label)
    }
}

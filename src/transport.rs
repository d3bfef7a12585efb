//! Transport between production stages.
//!
//! A leg moves the mass entering a stage from the previous stage's
//! country. Its emissions are the shipped tonnage times the distance
//! travelled on each mode, weighted by that mode's t.km factor.

use std::ops::Add;

use serde::{Deserialize, Serialize};

use crate::country::Country;
use crate::db::{Db, ProcessCatalog};
use crate::error::ExecutionError;
use crate::process::ProcessId;
use crate::units::{Co2e, Mass};

/// Per-mode distances in kilometres.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Distance {
    #[serde(default)]
    pub road: f64,
    #[serde(default)]
    pub sea: f64,
    #[serde(default)]
    pub air: f64,
}

impl Distance {
    /// Collection of raw material to the spinning mill, within its country.
    pub const INITIAL: Self = Self {
        road: 500.0,
        sea: 0.0,
        air: 0.0,
    };

    #[must_use]
    pub const fn road(km: f64) -> Self {
        Self {
            road: km,
            sea: 0.0,
            air: 0.0,
        }
    }
}

/// Transport processes used for each mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransportModes {
    pub road: ProcessId,
    pub sea: ProcessId,
    pub air: ProcessId,
}

/// Distances and emissions of one or more legs.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Summary {
    pub road: f64,
    pub sea: f64,
    pub air: f64,
    pub co2: Co2e,
}

impl Summary {
    /// No transport.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Summary a life cycle starts from: the initial collection leg, not yet weighted by mass.
    #[must_use]
    pub fn initial() -> Self {
        Self {
            road: Distance::INITIAL.road,
            sea: Distance::INITIAL.sea,
            air: Distance::INITIAL.air,
            co2: Co2e::ZERO,
        }
    }

    #[must_use]
    pub const fn distance(&self) -> Distance {
        Distance {
            road: self.road,
            sea: self.sea,
            air: self.air,
        }
    }
}

impl Add for Summary {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            road: self.road + rhs.road,
            sea: self.sea + rhs.sea,
            air: self.air + rhs.air,
            co2: self.co2 + rhs.co2,
        }
    }
}

/// Sums per-step summaries into the life-cycle total.
pub fn aggregate<'a>(summaries: impl IntoIterator<Item = &'a Summary>) -> Summary {
    summaries.into_iter().fold(Summary::empty(), |acc, s| acc + *s)
}

/// Weighs `distance` by `mass` and the mode processes.
pub fn leg(
    distance: Distance,
    mass: Mass,
    modes: &TransportModes,
    processes: &dyn ProcessCatalog,
) -> Result<Summary, ExecutionError> {
    let tonnes = mass.tonnes();
    let co2 = processes.require(modes.road)?.co2_for_tonne_km(tonnes * distance.road)
        + processes.require(modes.sea)?.co2_for_tonne_km(tonnes * distance.sea)
        + processes.require(modes.air)?.co2_for_tonne_km(tonnes * distance.air);
    Ok(Summary {
        road: distance.road,
        sea: distance.sea,
        air: distance.air,
        co2,
    })
}

/// Distance between two stage countries.
///
/// Same-country legs use the table's domestic distance. A pair the table
/// does not know contributes no transport.
#[must_use]
pub fn route(db: &Db, from: &Country, to: &Country) -> Distance {
    if from == to {
        return db.transports.domestic();
    }
    match db.transports.route(from, to) {
        Some(distance) => distance,
        None => {
            tracing::warn!(
                target: "textile_footprint::transport",
                from = %from,
                to = %to,
                "transport.route.missing"
            );
            Distance::default()
        }
    }
}

/// Resolves the leg shipping `mass` from `from` to `to`.
pub fn resolve(db: &Db, from: &Country, to: &Country, mass: Mass) -> Result<Summary, ExecutionError> {
    leg(route(db, from, to), mass, db.transports.modes(), db.processes.as_ref())
}

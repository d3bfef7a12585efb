//! Process records from the reference catalog.
//!
//! A process is one entry of the emission-factor table: a material
//! production route, a country's electricity grid, a dyeing mix, a
//! transport mode. Records are immutable and looked up by UUID.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ValidationError;
use crate::units::{Co2e, Kwh, Mass, Megajoules};

/// Stable process identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProcessId(Uuid);

impl ProcessId {
    /// Creates a process ID from an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Creates a nil process ID (for testing or sentinel values).
    #[must_use]
    pub const fn nil() -> Self {
        Self(Uuid::nil())
    }
}

impl fmt::Display for ProcessId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ProcessId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

impl From<Uuid> for ProcessId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

/// Functional unit the climate-change intensity of a process refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProcessUnit {
    Kilogram,
    Kwh,
    Megajoule,
    TonneKilometer,
}

impl fmt::Display for ProcessUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Kilogram => write!(f, "kg"),
            Self::Kwh => write!(f, "kWh"),
            Self::Megajoule => write!(f, "MJ"),
            Self::TonneKilometer => write!(f, "t.km"),
        }
    }
}

/// One emission-factor record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Process {
    pub id: ProcessId,
    pub name: String,
    pub unit: ProcessUnit,

    /// kg CO2e per functional unit.
    pub climate_change: f64,

    /// Fraction of processed mass lost as scrap.
    #[serde(default)]
    pub waste: f64,

    /// Electricity demand per kg processed.
    #[serde(default)]
    pub elec_kwh_per_kg: f64,

    /// Heat demand per kg processed.
    #[serde(default)]
    pub heat_mj_per_kg: f64,
}

impl Process {
    /// Validates the rates carried by this record.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !(0.0..=1.0).contains(&self.waste) {
            return Err(ValidationError::WasteRateOutOfRange {
                process: self.id,
                value: self.waste,
            });
        }
        Ok(())
    }

    /// Emissions for processing `mass` through a per-kg process.
    #[must_use]
    pub fn co2_for_mass(&self, mass: Mass) -> Co2e {
        Co2e::from_kilograms(self.climate_change * mass.kilograms())
    }

    /// Emissions for drawing `energy` from a per-kWh process.
    #[must_use]
    pub fn co2_for_kwh(&self, energy: Kwh) -> Co2e {
        Co2e::from_kilograms(self.climate_change * energy.value())
    }

    /// Emissions for drawing `heat` from a per-MJ process.
    #[must_use]
    pub fn co2_for_heat(&self, heat: Megajoules) -> Co2e {
        Co2e::from_kilograms(self.climate_change * heat.value())
    }

    /// Emissions for a transport of `tonne_km` through a per-t.km process.
    #[must_use]
    pub fn co2_for_tonne_km(&self, tonne_km: f64) -> Co2e {
        Co2e::from_kilograms(self.climate_change * tonne_km)
    }

    /// Electricity consumed processing `mass`.
    #[must_use]
    pub fn electricity_for(&self, mass: Mass) -> Kwh {
        Kwh::new(self.elec_kwh_per_kg * mass.kilograms())
    }

    /// Heat consumed processing `mass`.
    #[must_use]
    pub fn heat_for(&self, mass: Mass) -> Megajoules {
        Megajoules::new(self.heat_mj_per_kg * mass.kilograms())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dyeing() -> Process {
        Process {
            id: ProcessId::nil(),
            name: "Teinture sur étoffe".to_string(),
            unit: ProcessUnit::Kilogram,
            climate_change: 0.5,
            waste: 0.0,
            elec_kwh_per_kg: 2.0,
            heat_mj_per_kg: 30.0,
        }
    }

    #[test]
    fn test_process_id_parses_uuid() {
        let id: ProcessId = "6a0bc4a6-3fa0-4c1a-9c3d-5a6e0f3cbd11".parse().unwrap();
        assert_eq!(id.to_string(), "6a0bc4a6-3fa0-4c1a-9c3d-5a6e0f3cbd11");
        assert!("not-a-uuid".parse::<ProcessId>().is_err());
    }

    #[test]
    fn test_demands_scale_with_mass() {
        let p = dyeing();
        let mass = Mass::from_kilograms(0.2);
        assert!((p.electricity_for(mass).value() - 0.4).abs() < 1e-12);
        assert!((p.heat_for(mass).value() - 6.0).abs() < 1e-12);
        assert!((p.co2_for_mass(mass).kilograms() - 0.1).abs() < 1e-12);
    }

    #[test]
    fn test_validate_rejects_waste_out_of_range() {
        let mut p = dyeing();
        p.waste = 1.2;
        assert!(p.validate().is_err());
        p.waste = 1.0;
        assert!(p.validate().is_ok());
    }

    #[test]
    fn test_process_decodes_with_defaults() {
        let json = r#"{
            "id": "00000000-0000-0000-0000-000000000000",
            "name": "Electricity, FR",
            "unit": "kwh",
            "climateChange": 0.08
        }"#;
        let p: Process = serde_json::from_str(json).unwrap();
        assert_eq!(p.unit, ProcessUnit::Kwh);
        assert!((p.waste - 0.0).abs() < f64::EPSILON);
        assert!((p.co2_for_kwh(Kwh::new(10.0)).kilograms() - 0.8).abs() < 1e-12);
    }
}

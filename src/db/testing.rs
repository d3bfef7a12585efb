//! Synthetic reference data for unit tests.
//!
//! Round numbers keep expected values easy to derive by hand:
//! - material: 5.0 kgCO2e/kg, 2% waste
//! - weaving: 10% waste, knitting: 5% waste
//! - making: 0.1 kgCO2e/kg, 5% waste, 0.5 kWh/kg
//! - dyeing: 1.0 kgCO2e/kg, 2 kWh/kg, 20 MJ/kg
//! - electricity FR 0.1, CN 0.9, IN 1.5, PT 0.4 per kWh; heat FR 0.08, CN 0.1 per MJ
//! - transport road 0.2, sea 0.01, air 1.0 per t.km
//!
//! FR and CN are fully modeled, PT lacks heat, IN only has electricity,
//! anything else has no profile at all.

use std::sync::Arc;

use uuid::Uuid;

use crate::country::{Country, CountryProfile};
use crate::db::memory::{InMemoryCountryProfiles, InMemoryProcessCatalog, InMemoryTransportTable, Route};
use crate::db::Db;
use crate::material::{Material, MaterialCategory, MaterialId};
use crate::process::{Process, ProcessId, ProcessUnit};
use crate::product::{Product, ProductId};
use crate::transport::{Distance, TransportModes};
use crate::units::Mass;

pub const MATERIAL: ProcessId = id(1);
pub const WEAVING: ProcessId = id(2);
pub const KNITTING: ProcessId = id(3);
pub const MAKING: ProcessId = id(4);
pub const DYEING: ProcessId = id(5);
pub const ELEC_FR: ProcessId = id(10);
pub const ELEC_CN: ProcessId = id(11);
pub const ELEC_IN: ProcessId = id(12);
pub const ELEC_PT: ProcessId = id(13);
pub const HEAT_FR: ProcessId = id(20);
pub const HEAT_CN: ProcessId = id(21);
pub const ROAD: ProcessId = id(30);
pub const SEA: ProcessId = id(31);
pub const AIR: ProcessId = id(32);

const fn id(n: u128) -> ProcessId {
    ProcessId::from_uuid(Uuid::from_u128(n))
}

fn process(id: ProcessId, unit: ProcessUnit, cc: f64, waste: f64, elec: f64, heat: f64) -> Process {
    Process {
        id,
        name: format!("synthetic {id}"),
        unit,
        climate_change: cc,
        waste,
        elec_kwh_per_kg: elec,
        heat_mj_per_kg: heat,
    }
}

pub fn processes() -> Vec<Process> {
    use ProcessUnit::{Kilogram, Kwh, Megajoule, TonneKilometer};
    vec![
        process(MATERIAL, Kilogram, 5.0, 0.02, 0.0, 0.0),
        process(WEAVING, Kilogram, 0.0, 0.1, 0.0, 0.0),
        process(KNITTING, Kilogram, 0.0, 0.05, 0.0, 0.0),
        process(MAKING, Kilogram, 0.1, 0.05, 0.5, 0.0),
        process(DYEING, Kilogram, 1.0, 0.0, 2.0, 20.0),
        process(ELEC_FR, Kwh, 0.1, 0.0, 0.0, 0.0),
        process(ELEC_CN, Kwh, 0.9, 0.0, 0.0, 0.0),
        process(ELEC_IN, Kwh, 1.5, 0.0, 0.0, 0.0),
        process(ELEC_PT, Kwh, 0.4, 0.0, 0.0, 0.0),
        process(HEAT_FR, Megajoule, 0.08, 0.0, 0.0, 0.0),
        process(HEAT_CN, Megajoule, 0.1, 0.0, 0.0, 0.0),
        process(ROAD, TonneKilometer, 0.2, 0.0, 0.0, 0.0),
        process(SEA, TonneKilometer, 0.01, 0.0, 0.0, 0.0),
        process(AIR, TonneKilometer, 1.0, 0.0, 0.0, 0.0),
    ]
}

pub fn india() -> Country {
    Country::new("IN").unwrap()
}

pub fn portugal() -> Country {
    Country::new("PT").unwrap()
}

pub fn profiles() -> Vec<CountryProfile> {
    vec![
        CountryProfile {
            code: Country::france(),
            name: "France".to_string(),
            electricity: Some(ELEC_FR),
            heat: Some(HEAT_FR),
            dyeing: Some(DYEING),
        },
        CountryProfile {
            code: Country::china(),
            name: "Chine".to_string(),
            electricity: Some(ELEC_CN),
            heat: Some(HEAT_CN),
            dyeing: Some(DYEING),
        },
        CountryProfile {
            code: india(),
            name: "Inde".to_string(),
            electricity: Some(ELEC_IN),
            heat: None,
            dyeing: None,
        },
        CountryProfile {
            code: portugal(),
            name: "Portugal".to_string(),
            electricity: Some(ELEC_PT),
            heat: None,
            dyeing: Some(DYEING),
        },
    ]
}

pub fn cotton() -> Material {
    Material {
        id: MaterialId::new("coton"),
        name: "Coton".to_string(),
        process: MATERIAL,
        category: MaterialCategory::Natural,
    }
}

/// Woven, no PCR waste, 170 g.
pub fn shirt() -> Product {
    Product {
        id: ProductId::new("chemise"),
        name: "Chemise".to_string(),
        mass: Mass::from_kilograms(0.17),
        pcr_waste: 0.0,
        knitted: false,
        ppm: 3000.0,
        grammage: 150.0,
        knitting_kwh_per_kg: 0.0,
        weaving_kwh_per_pick: 0.001,
        fabric_process: WEAVING,
        making_process: MAKING,
    }
}

/// Knitted, 10% PCR waste, 200 g.
pub fn tshirt() -> Product {
    Product {
        id: ProductId::new("tshirt"),
        name: "T-shirt".to_string(),
        mass: Mass::from_kilograms(0.2),
        pcr_waste: 0.1,
        knitted: true,
        ppm: 0.0,
        grammage: 160.0,
        knitting_kwh_per_kg: 2.0,
        weaving_kwh_per_pick: 0.0,
        fabric_process: KNITTING,
        making_process: MAKING,
    }
}

pub fn routes() -> Vec<Route> {
    vec![
        Route {
            from: Country::china(),
            to: Country::france(),
            distance: Distance {
                road: 1000.0,
                sea: 10_000.0,
                air: 0.0,
            },
        },
        Route {
            from: Country::france(),
            to: india(),
            distance: Distance {
                road: 800.0,
                sea: 12_000.0,
                air: 0.0,
            },
        },
        Route {
            from: Country::china(),
            to: india(),
            distance: Distance {
                road: 2000.0,
                sea: 5000.0,
                air: 0.0,
            },
        },
    ]
}

pub fn modes() -> TransportModes {
    TransportModes {
        road: ROAD,
        sea: SEA,
        air: AIR,
    }
}

pub fn synthetic_db() -> Db {
    Db::new(
        Arc::new(InMemoryProcessCatalog::new(processes()).unwrap()),
        Arc::new(InMemoryCountryProfiles::new(profiles()).unwrap()),
        Arc::new(InMemoryTransportTable::new(modes(), Distance::road(500.0), routes()).unwrap()),
        vec![cotton()],
        vec![shirt(), tshirt()],
    )
    .unwrap()
}

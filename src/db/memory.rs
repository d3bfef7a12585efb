//! In-memory reference data.
//!
//! Maps are built once from decoded records and never written again, so
//! concurrent readers need no locking.

use std::collections::HashMap;

use crate::country::{Country, CountryProfile};
use crate::db::traits::{CountryProfiles, ProcessCatalog, TransportTable};
use crate::error::DataError;
use crate::process::{Process, ProcessId};
use crate::transport::{Distance, TransportModes};

fn pair_key(a: &Country, b: &Country) -> (Country, Country) {
    if a <= b {
        (a.clone(), b.clone())
    } else {
        (b.clone(), a.clone())
    }
}

/// Process catalog backed by a hash map.
#[derive(Debug, Default)]
pub struct InMemoryProcessCatalog {
    by_id: HashMap<ProcessId, Process>,
}

impl InMemoryProcessCatalog {
    /// Builds the catalog, rejecting duplicates and out-of-range rates.
    pub fn new(processes: Vec<Process>) -> Result<Self, DataError> {
        let mut by_id = HashMap::with_capacity(processes.len());
        for process in processes {
            process.validate().map_err(|source| DataError::InvalidRecord {
                dataset: "processes",
                key: process.id.to_string(),
                source,
            })?;
            let id = process.id;
            if by_id.insert(id, process).is_some() {
                return Err(DataError::DuplicateKey {
                    dataset: "processes",
                    key: id.to_string(),
                });
            }
        }
        Ok(Self { by_id })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    #[must_use]
    pub fn contains(&self, id: ProcessId) -> bool {
        self.by_id.contains_key(&id)
    }
}

impl ProcessCatalog for InMemoryProcessCatalog {
    fn get(&self, id: ProcessId) -> Option<&Process> {
        self.by_id.get(&id)
    }
}

/// Country profiles backed by a hash map.
#[derive(Debug, Default)]
pub struct InMemoryCountryProfiles {
    by_code: HashMap<Country, CountryProfile>,
}

impl InMemoryCountryProfiles {
    pub fn new(profiles: Vec<CountryProfile>) -> Result<Self, DataError> {
        let mut by_code = HashMap::with_capacity(profiles.len());
        for profile in profiles {
            let code = profile.code.clone();
            if by_code.insert(code.clone(), profile).is_some() {
                return Err(DataError::DuplicateKey {
                    dataset: "countries",
                    key: code.to_string(),
                });
            }
        }
        Ok(Self { by_code })
    }

    pub fn iter(&self) -> impl Iterator<Item = &CountryProfile> {
        self.by_code.values()
    }
}

impl CountryProfiles for InMemoryCountryProfiles {
    fn profile(&self, country: &Country) -> Option<&CountryProfile> {
        self.by_code.get(country)
    }
}

/// One route record.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Route {
    pub from: Country,
    pub to: Country,
    #[serde(flatten)]
    pub distance: Distance,
}

/// Transport table backed by a hash map keyed by unordered country pair.
#[derive(Debug)]
pub struct InMemoryTransportTable {
    routes: HashMap<(Country, Country), Distance>,
    domestic: Distance,
    modes: TransportModes,
}

impl InMemoryTransportTable {
    pub fn new(modes: TransportModes, domestic: Distance, routes: Vec<Route>) -> Result<Self, DataError> {
        let mut by_pair = HashMap::with_capacity(routes.len());
        for route in routes {
            let key = pair_key(&route.from, &route.to);
            if by_pair.insert(key, route.distance).is_some() {
                return Err(DataError::DuplicateKey {
                    dataset: "transports",
                    key: format!("{}-{}", route.from, route.to),
                });
            }
        }
        Ok(Self {
            routes: by_pair,
            domestic,
            modes,
        })
    }
}

impl TransportTable for InMemoryTransportTable {
    fn route(&self, from: &Country, to: &Country) -> Option<Distance> {
        self.routes.get(&pair_key(from, to)).copied()
    }

    fn domestic(&self) -> Distance {
        self.domestic
    }

    fn modes(&self) -> &TransportModes {
        &self.modes
    }
}

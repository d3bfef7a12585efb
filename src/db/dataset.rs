//! Reference dataset files.
//!
//! A dataset is five JSON documents. The crate embeds a copy of the
//! `data/` directory; the same files can be read from any directory.
//! Every process reference is checked on load so that a lookup miss
//! during computation can only come from a hand-built `Db`.

use std::path::Path;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::country::CountryProfile;
use crate::db::memory::{InMemoryCountryProfiles, InMemoryProcessCatalog, InMemoryTransportTable, Route};
use crate::db::Db;
use crate::error::DataError;
use crate::material::Material;
use crate::process::{Process, ProcessId};
use crate::product::Product;
use crate::transport::{Distance, TransportModes};

const PROCESSES: &str = "processes";
const COUNTRIES: &str = "countries";
const MATERIALS: &str = "materials";
const PRODUCTS: &str = "products";
const TRANSPORTS: &str = "transports";

/// Contents of `transports.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransportDataset {
    pub modes: TransportModes,
    pub domestic: Distance,
    #[serde(default)]
    pub routes: Vec<Route>,
}

/// All decoded dataset documents, before indexing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    pub processes: Vec<Process>,
    pub countries: Vec<CountryProfile>,
    pub materials: Vec<Material>,
    pub products: Vec<Product>,
    pub transports: TransportDataset,
}

fn parse<T: DeserializeOwned>(dataset: &'static str, text: &str) -> Result<T, DataError> {
    serde_json::from_str(text).map_err(|e| DataError::Parse {
        dataset,
        message: e.to_string(),
    })
}

fn read(dir: &Path, dataset: &'static str) -> Result<String, DataError> {
    let path = dir.join(format!("{dataset}.json"));
    std::fs::read_to_string(&path).map_err(|e| DataError::Io {
        dataset,
        path: path.display().to_string(),
        message: e.to_string(),
    })
}

impl Dataset {
    /// Decodes the dataset embedded at build time.
    pub fn builtin() -> Result<Self, DataError> {
        Ok(Self {
            processes: parse(PROCESSES, include_str!("../../data/processes.json"))?,
            countries: parse(COUNTRIES, include_str!("../../data/countries.json"))?,
            materials: parse(MATERIALS, include_str!("../../data/materials.json"))?,
            products: parse(PRODUCTS, include_str!("../../data/products.json"))?,
            transports: parse(TRANSPORTS, include_str!("../../data/transports.json"))?,
        })
    }

    /// Reads `processes.json`, `countries.json`, `materials.json`,
    /// `products.json` and `transports.json` from `dir`.
    pub fn from_dir(dir: impl AsRef<Path>) -> Result<Self, DataError> {
        let dir = dir.as_ref();
        Ok(Self {
            processes: parse(PROCESSES, &read(dir, PROCESSES)?)?,
            countries: parse(COUNTRIES, &read(dir, COUNTRIES)?)?,
            materials: parse(MATERIALS, &read(dir, MATERIALS)?)?,
            products: parse(PRODUCTS, &read(dir, PRODUCTS)?)?,
            transports: parse(TRANSPORTS, &read(dir, TRANSPORTS)?)?,
        })
    }

    /// Indexes the documents into a `Db`.
    ///
    /// # Errors
    /// - `DuplicateKey` / `InvalidRecord`: from the individual catalogs
    /// - `DanglingReference`: a record names a process the catalog lacks
    pub fn into_db(self) -> Result<Db, DataError> {
        let catalog = InMemoryProcessCatalog::new(self.processes)?;

        let check = |dataset: &'static str, key: &str, process: ProcessId| {
            if catalog.contains(process) {
                Ok(())
            } else {
                Err(DataError::DanglingReference {
                    dataset,
                    key: key.to_string(),
                    process,
                })
            }
        };

        for material in &self.materials {
            check(MATERIALS, material.id.as_str(), material.process)?;
        }
        for product in &self.products {
            check(PRODUCTS, product.id.as_str(), product.fabric_process)?;
            check(PRODUCTS, product.id.as_str(), product.making_process)?;
        }
        for profile in &self.countries {
            for process in profile.processes() {
                check(COUNTRIES, profile.code.as_str(), process)?;
            }
        }
        let modes = self.transports.modes;
        for process in [modes.road, modes.sea, modes.air] {
            check(TRANSPORTS, "modes", process)?;
        }

        let countries = InMemoryCountryProfiles::new(self.countries)?;
        let transports = InMemoryTransportTable::new(modes, self.transports.domestic, self.transports.routes)?;

        tracing::info!(
            target: "textile_footprint::db",
            processes = catalog.len(),
            materials = self.materials.len(),
            products = self.products.len(),
            "dataset.loaded"
        );

        Db::new(
            Arc::new(catalog),
            Arc::new(countries),
            Arc::new(transports),
            self.materials,
            self.products,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_dataset_loads() {
        let db = Db::builtin().unwrap();
        assert!(db.materials().count() > 0);
        assert!(db.products().count() > 0);
    }

    #[test]
    fn dangling_material_process_is_rejected() {
        let mut dataset = Dataset::builtin().unwrap();
        dataset.materials[0].process = ProcessId::nil();
        let err = dataset.into_db().unwrap_err();
        assert!(matches!(err, DataError::DanglingReference { dataset: "materials", .. }));
    }

    #[test]
    fn dangling_country_process_is_rejected() {
        let mut dataset = Dataset::builtin().unwrap();
        dataset.countries[0].heat = Some(ProcessId::nil());
        let err = dataset.into_db().unwrap_err();
        assert!(matches!(err, DataError::DanglingReference { dataset: "countries", .. }));
    }

    #[test]
    fn malformed_document_is_a_parse_error() {
        let err = parse::<Vec<Process>>(PROCESSES, "{not json").unwrap_err();
        assert!(matches!(err, DataError::Parse { dataset: "processes", .. }));
    }

    #[test]
    fn missing_directory_is_an_io_error() {
        let err = Dataset::from_dir("/definitely/not/here").unwrap_err();
        assert!(matches!(err, DataError::Io { .. }));
    }
}

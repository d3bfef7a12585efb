//! Reference data the engine queries.
//!
//! The process catalog, country profiles and transport table sit behind
//! traits; `Db` bundles shared handles to them together with the material
//! and product catalogs. A `Db` is built once at startup and cloned
//! cheaply into every computation.

mod dataset;
mod memory;
mod traits;

#[cfg(test)]
pub(crate) mod testing;

use std::collections::BTreeMap;
use std::sync::Arc;

pub use dataset::Dataset;
pub use memory::{InMemoryCountryProfiles, InMemoryProcessCatalog, InMemoryTransportTable, Route};
pub use traits::{CountryProfiles, ProcessCatalog, TransportTable};

use crate::error::{DataError, ExecutionError};
use crate::material::{Material, MaterialId};
use crate::product::{Product, ProductId};

/// Shared, read-only reference data.
#[derive(Clone)]
pub struct Db {
    /// Emission-factor records.
    pub processes: Arc<dyn ProcessCatalog>,
    /// Country profiles.
    pub countries: Arc<dyn CountryProfiles>,
    /// Distances and transport modes.
    pub transports: Arc<dyn TransportTable>,
    materials: Arc<BTreeMap<MaterialId, Material>>,
    products: Arc<BTreeMap<ProductId, Product>>,
}

impl Db {
    /// Assembles a database from lookup services and catalogs.
    ///
    /// # Errors
    /// - `DuplicateKey`: two materials or two products share an id
    /// - `InvalidRecord`: a product fails validation
    pub fn new(
        processes: Arc<dyn ProcessCatalog>,
        countries: Arc<dyn CountryProfiles>,
        transports: Arc<dyn TransportTable>,
        materials: Vec<Material>,
        products: Vec<Product>,
    ) -> Result<Self, DataError> {
        let mut material_map = BTreeMap::new();
        for material in materials {
            let id = material.id.clone();
            if material_map.insert(id.clone(), material).is_some() {
                return Err(DataError::DuplicateKey {
                    dataset: "materials",
                    key: id.to_string(),
                });
            }
        }

        let mut product_map = BTreeMap::new();
        for product in products {
            product.validate().map_err(|source| DataError::InvalidRecord {
                dataset: "products",
                key: product.id.to_string(),
                source,
            })?;
            let id = product.id.clone();
            if product_map.insert(id.clone(), product).is_some() {
                return Err(DataError::DuplicateKey {
                    dataset: "products",
                    key: id.to_string(),
                });
            }
        }

        Ok(Self {
            processes,
            countries,
            transports,
            materials: Arc::new(material_map),
            products: Arc::new(product_map),
        })
    }

    /// Loads the dataset compiled into the crate.
    pub fn builtin() -> Result<Self, DataError> {
        Dataset::builtin()?.into_db()
    }

    /// Loads a dataset directory from disk.
    pub fn from_dir(dir: impl AsRef<std::path::Path>) -> Result<Self, DataError> {
        Dataset::from_dir(dir)?.into_db()
    }

    /// Get a material by id.
    pub fn material(&self, id: &MaterialId) -> Result<&Material, ExecutionError> {
        self.materials.get(id).ok_or_else(|| ExecutionError::UnknownMaterial {
            id: id.to_string(),
        })
    }

    /// Get a product by id.
    pub fn product(&self, id: &ProductId) -> Result<&Product, ExecutionError> {
        self.products.get(id).ok_or_else(|| ExecutionError::UnknownProduct {
            id: id.to_string(),
        })
    }

    pub fn materials(&self) -> impl Iterator<Item = &Material> {
        self.materials.values()
    }

    pub fn products(&self) -> impl Iterator<Item = &Product> {
        self.products.values()
    }
}

impl std::fmt::Debug for Db {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Db")
            .field("materials", &self.materials.len())
            .field("products", &self.products.len())
            .finish_non_exhaustive()
    }
}

//! Lookup contracts for reference data.
//!
//! These traits define what the engine asks of its reference datasets.
//! By using traits, we enable:
//! - The in-memory maps built once at startup
//! - Test doubles with synthetic records

use crate::country::{Country, CountryProfile};
use crate::error::ExecutionError;
use crate::process::{Process, ProcessId};
use crate::transport::{Distance, TransportModes};

/// Emission-factor records keyed by UUID.
pub trait ProcessCatalog: Send + Sync {
    /// Get a process by ID.
    fn get(&self, id: ProcessId) -> Option<&Process>;

    /// Get a process that the caller's data references.
    ///
    /// # Errors
    /// - `UnknownProcess`: the catalog is inconsistent with the record that
    ///   referenced `id`. This is fatal, never defaulted to zero.
    fn require(&self, id: ProcessId) -> Result<&Process, ExecutionError> {
        self.get(id).ok_or(ExecutionError::UnknownProcess { id })
    }
}

/// Country profiles keyed by country code.
///
/// A miss is expected: not every country is modeled.
pub trait CountryProfiles: Send + Sync {
    /// Get the profile of a country, if modeled.
    fn profile(&self, country: &Country) -> Option<&CountryProfile>;
}

/// Distances between countries and the processes for each mode.
pub trait TransportTable: Send + Sync {
    /// Distance between two distinct countries, in either direction.
    fn route(&self, from: &Country, to: &Country) -> Option<Distance>;

    /// Distance of a leg that stays within one country.
    fn domestic(&self) -> Distance;

    /// Mode emission processes.
    fn modes(&self) -> &TransportModes;
}

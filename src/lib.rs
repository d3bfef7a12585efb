//! # textile-footprint - life-cycle CO2 footprint of textile products
//!
//! Computes the greenhouse-gas footprint of a garment across five
//! production stages, each performed in a chosen country, plus the
//! transport between them.
//!
//! ## Core Concepts
//!
//! - **Process**: an emission-factor record identified by a stable UUID
//! - **CountryProfile**: the electricity, heat and dyeing processes of a country
//! - **Step**: one production stage with its mass, waste, energy and emissions
//! - **LifeCycle**: the five steps in production order
//! - **Simulator**: the aggregate root; `compute` runs a fixed pipeline of passes
//!
//! ## Usage
//!
//! ```rust
//! use textile_footprint::{Country, Db, Inputs, Label, Simulator};
//!
//! let db = Db::builtin()?;
//! let inputs = Inputs::new(0.17, "coton", "chemise")?
//!     .with_stage_country(Label::Making, Country::new("IN")?);
//! let sim = Simulator::from_inputs(&inputs, &db)?;
//! println!("{}", sim.co2);
//! # Ok::<(), textile_footprint::FootprintError>(())
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

// Units and reference data
pub mod country;
pub mod db;
pub mod error;
pub mod material;
pub mod process;
pub mod product;
pub mod units;

// Computation
pub mod life_cycle;
pub mod simulator;
pub mod step;
pub mod transport;

// Boundaries
pub mod codec;
pub mod compare;
pub mod inputs;

// Re-export primary types at crate root for convenience
pub use compare::{country_scenarios, CompareConfig, Comparator, Outcome, Scenario};
pub use country::{Country, CountryProfile};
pub use db::{CountryProfiles, Dataset, Db, ProcessCatalog, TransportTable};
pub use error::{
    CodecError, DataError, ExecutionError, FootprintError, FootprintResult, ValidationError,
};
pub use inputs::Inputs;
pub use life_cycle::LifeCycle;
pub use material::{Material, MaterialCategory, MaterialId};
pub use process::{Process, ProcessId, ProcessUnit};
pub use product::{Product, ProductId};
pub use simulator::Simulator;
pub use step::{Label, ProcessInfo, Step};
pub use transport::{Distance, Summary, TransportModes};
pub use units::{Co2e, Kwh, Mass, Megajoules};

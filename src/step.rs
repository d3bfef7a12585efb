//! Production stages.
//!
//! A `Step` is one stage of the life cycle: where it happens, how much
//! mass goes through it, and what it emits. Derived values are written
//! by the simulator pipeline; a step on its own only knows its country.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::country::Country;
use crate::db::Db;
use crate::error::ExecutionError;
use crate::process::ProcessId;
use crate::transport::Summary;
use crate::units::{Co2e, Kwh, Mass, Megajoules};

/// Stage of the life cycle.
///
/// Unknown tokens decode to `Default` instead of failing, so a payload
/// from a newer stage vocabulary still parses; a life cycle holding such
/// a step is then rejected as a whole.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Label {
    MaterialAndSpinning,
    WeavingKnitting,
    Ennoblement,
    Making,
    Distribution,
    Default,
}

impl Label {
    /// The five stages in production order.
    pub const ORDER: [Self; 5] = [
        Self::MaterialAndSpinning,
        Self::WeavingKnitting,
        Self::Ennoblement,
        Self::Making,
        Self::Distribution,
    ];

    /// Position in the life cycle; `None` for the placeholder.
    #[must_use]
    pub const fn index(self) -> Option<usize> {
        match self {
            Self::MaterialAndSpinning => Some(0),
            Self::WeavingKnitting => Some(1),
            Self::Ennoblement => Some(2),
            Self::Making => Some(3),
            Self::Distribution => Some(4),
            Self::Default => None,
        }
    }

    #[must_use]
    pub const fn token(self) -> &'static str {
        match self {
            Self::MaterialAndSpinning => "material_and_spinning",
            Self::WeavingKnitting => "weaving_knitting",
            Self::Ennoblement => "ennoblement",
            Self::Making => "making",
            Self::Distribution => "distribution",
            Self::Default => "default",
        }
    }

    #[must_use]
    pub fn from_token(token: &str) -> Self {
        Self::ORDER
            .into_iter()
            .find(|label| label.token() == token)
            .unwrap_or(Self::Default)
    }
}

impl From<String> for Label {
    fn from(token: String) -> Self {
        Self::from_token(&token)
    }
}

impl From<Label> for String {
    fn from(label: Label) -> Self {
        label.token().to_string()
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// Names of the country processes a stage used, for display.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ProcessInfo {
    pub electricity: Option<String>,
    pub heat: Option<String>,
    pub dyeing: Option<String>,
}

impl ProcessInfo {
    /// Resolves the names shown for `label` performed in `country`.
    ///
    /// Only energy-consuming stages show country processes; a country
    /// without a profile, or without one of its processes, shows nothing
    /// for that slot.
    pub fn for_stage(label: Label, country: &Country, db: &Db) -> Result<Self, ExecutionError> {
        let Some(profile) = db.countries.profile(country) else {
            tracing::debug!(
                target: "textile_footprint::step",
                country = %country,
                stage = %label,
                "country.profile.missing"
            );
            return Ok(Self::default());
        };

        let name = |id: Option<ProcessId>| -> Result<Option<String>, ExecutionError> {
            id.map(|id| db.processes.require(id).map(|p| p.name.clone()))
                .transpose()
        };

        match label {
            Label::WeavingKnitting | Label::Making => Ok(Self {
                electricity: name(profile.electricity)?,
                ..Self::default()
            }),
            Label::Ennoblement => Ok(Self {
                electricity: name(profile.electricity)?,
                heat: name(profile.heat)?,
                dyeing: name(profile.dyeing)?,
            }),
            Label::MaterialAndSpinning | Label::Distribution | Label::Default => Ok(Self::default()),
        }
    }
}

/// One stage of the life cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Step {
    pub label: Label,
    pub country: Country,

    /// Whether the country may be chosen by the user.
    pub editable: bool,

    /// Mass processed by this stage, waste included.
    pub mass: Mass,

    /// Mass lost to scrap at this stage.
    pub waste: Mass,

    /// Transport arriving at this stage.
    pub transport: Summary,

    pub co2: Co2e,
    pub heat: Megajoules,
    pub kwh: Kwh,
    pub process_info: ProcessInfo,
}

impl Step {
    /// Creates a step with no mass and no emissions.
    #[must_use]
    pub fn create(label: Label, editable: bool, country: Country) -> Self {
        let transport = if label == Label::MaterialAndSpinning {
            Summary::initial()
        } else {
            Summary::empty()
        };
        Self {
            label,
            country,
            editable,
            mass: Mass::ZERO,
            waste: Mass::ZERO,
            transport,
            co2: Co2e::ZERO,
            heat: Megajoules::ZERO,
            kwh: Kwh::ZERO,
            process_info: ProcessInfo::default(),
        }
    }

    /// Moves the step to `country`, refreshing its process names only.
    pub fn update_country(self, country: Country, db: &Db) -> Result<Self, ExecutionError> {
        let process_info = ProcessInfo::for_stage(self.label, &country, db)?;
        Ok(Self {
            country,
            process_info,
            ..self
        })
    }

    /// Clears every value the pipeline derives.
    #[must_use]
    pub fn reset(self) -> Self {
        let fresh = Self::create(self.label, self.editable, self.country.clone());
        Self {
            process_info: self.process_info,
            ..fresh
        }
    }
}

//! The ordered sequence of production stages.

use serde::{Deserialize, Serialize};

use crate::country::Country;
use crate::error::CodecError;
use crate::step::{Label, Step};
use crate::units::Mass;

/// Exactly one step per stage, in production order.
///
/// The order is fixed at construction; updates replace steps in place
/// and never reorder them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Step>", into = "Vec<Step>")]
pub struct LifeCycle([Step; 5]);

impl LifeCycle {
    /// Builds the default life cycle.
    ///
    /// Spinning defaults to China and distribution to France, both fixed;
    /// the three manufacturing stages default to France and are editable.
    #[must_use]
    pub fn new() -> Self {
        Self([
            Step::create(Label::MaterialAndSpinning, false, Country::china()),
            Step::create(Label::WeavingKnitting, true, Country::france()),
            Step::create(Label::Ennoblement, true, Country::france()),
            Step::create(Label::Making, true, Country::france()),
            Step::create(Label::Distribution, false, Country::france()),
        ])
    }

    /// Get the step for a stage.
    ///
    /// Only `Label::Default` is ever absent.
    #[must_use]
    pub fn get_step(&self, label: Label) -> Option<&Step> {
        label.index().map(|i| &self.0[i])
    }

    /// Mass of a stage, zero if absent.
    #[must_use]
    pub fn mass_at(&self, label: Label) -> Mass {
        self.get_step(label).map_or(Mass::ZERO, |s| s.mass)
    }

    /// Applies `f` to the step of `label`.
    #[must_use]
    pub fn update_step(self, label: Label, f: impl FnOnce(Step) -> Step) -> Self {
        let mut f = Some(f);
        self.update_steps(&[label], |step| match f.take() {
            Some(f) => f(step),
            None => step,
        })
    }

    /// Applies `f` to the steps of every label in `labels`.
    #[must_use]
    pub fn update_steps(self, labels: &[Label], mut f: impl FnMut(Step) -> Step) -> Self {
        Self(self.0.map(|step| {
            if labels.contains(&step.label) {
                f(step)
            } else {
                step
            }
        }))
    }

    /// Fallible variant of `update_steps` used by passes that look up data.
    pub fn try_update_steps<E>(
        self,
        labels: &[Label],
        mut f: impl FnMut(Step) -> Result<Step, E>,
    ) -> Result<Self, E> {
        let mut failure = None;
        let steps = self.0.map(|step| {
            if failure.is_some() || !labels.contains(&step.label) {
                return step;
            }
            match f(step) {
                Ok(step) => step,
                Err(e) => {
                    failure = Some(e);
                    // discarded below
                    Step::create(Label::Default, false, Country::france())
                }
            }
        });
        match failure {
            Some(e) => Err(e),
            None => Ok(Self(steps)),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Step> {
        self.0.iter()
    }

    /// Consecutive (upstream, downstream) pairs.
    pub fn pairs(&self) -> impl Iterator<Item = (&Step, &Step)> {
        self.0.windows(2).map(|w| (&w[0], &w[1]))
    }

    /// Countries in stage order.
    #[must_use]
    pub fn countries(&self) -> Vec<Country> {
        self.0.iter().map(|s| s.country.clone()).collect()
    }
}

impl Default for LifeCycle {
    fn default() -> Self {
        Self::new()
    }
}

impl TryFrom<Vec<Step>> for LifeCycle {
    type Error = CodecError;

    fn try_from(steps: Vec<Step>) -> Result<Self, Self::Error> {
        let labels: Vec<Label> = steps.iter().map(|s| s.label).collect();
        if labels != Label::ORDER {
            return Err(CodecError::DeserializationFailed {
                what: "life cycle",
                message: format!("expected stages {:?}, got {labels:?}", Label::ORDER),
            });
        }
        steps.try_into().map(Self).map_err(|steps: Vec<Step>| CodecError::DeserializationFailed {
            what: "life cycle",
            message: format!("expected 5 steps, got {}", steps.len()),
        })
    }
}

impl From<LifeCycle> for Vec<Step> {
    fn from(life_cycle: LifeCycle) -> Self {
        life_cycle.0.into()
    }
}

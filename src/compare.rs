//! Scenario comparison on a bounded worker pool.
//!
//! Comparing production countries means computing one simulator per
//! candidate. Simulators share nothing but the read-only reference data,
//! so scenarios run on a small pool of named worker threads fed by a
//! bounded queue. Results come back in submission order.

use std::thread::{self, JoinHandle};
#[cfg(test)]
use std::time::Duration;

use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};
use serde::Serialize;

use crate::country::Country;
use crate::db::Db;
use crate::error::{ExecutionError, FootprintError, FootprintResult};
use crate::inputs::Inputs;
use crate::life_cycle::LifeCycle;
use crate::simulator::Simulator;
use crate::units::Co2e;

/// Pool configuration.
#[derive(Debug, Clone)]
pub struct CompareConfig {
    /// Number of worker threads.
    pub workers: usize,
    /// Maximum queued scenarios.
    pub queue_capacity: usize,
}

impl Default for CompareConfig {
    fn default() -> Self {
        Self {
            workers: 4,
            queue_capacity: 64,
        }
    }
}

/// A named set of inputs to compute.
#[derive(Debug, Clone, PartialEq)]
pub struct Scenario {
    pub label: String,
    pub inputs: Inputs,
}

/// Builds one scenario per candidate country, with every editable stage
/// moved to that country. Fixed stages keep their inputs country.
#[must_use]
pub fn country_scenarios(inputs: &Inputs, countries: &[Country]) -> Vec<Scenario> {
    let defaults = LifeCycle::new();
    countries
        .iter()
        .map(|country| {
            let inputs = defaults
                .iter()
                .filter(|step| step.editable)
                .fold(inputs.clone(), |acc, step| {
                    acc.with_stage_country(step.label, country.clone())
                });
            Scenario {
                label: country.to_string(),
                inputs,
            }
        })
        .collect()
}

/// Result of one scenario.
#[derive(Debug)]
pub struct Outcome {
    pub label: String,
    pub result: FootprintResult<Simulator>,
}

impl Outcome {
    /// Total footprint, if the scenario succeeded.
    #[must_use]
    pub fn co2(&self) -> Option<Co2e> {
        self.result.as_ref().ok().map(|sim| sim.co2)
    }

    /// Serializable view of the outcome.
    #[must_use]
    pub fn report(&self) -> Report<'_> {
        match &self.result {
            Ok(sim) => Report {
                country: &self.label,
                co2: Some(sim.co2),
                simulator: Some(sim),
                error: None,
            },
            Err(e) => Report {
                country: &self.label,
                co2: None,
                simulator: None,
                error: Some(e.to_string()),
            },
        }
    }
}

/// One row of a comparison table.
#[derive(Debug, Serialize)]
pub struct Report<'a> {
    pub country: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub co2: Option<Co2e>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub simulator: Option<&'a Simulator>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

enum Job {
    Compute {
        inputs: Inputs,
        reply: Sender<FootprintResult<Simulator>>,
    },

    #[cfg(test)]
    Sleep {
        duration: Duration,
        started: Sender<()>,
    },
}

/// Handle returned by `Comparator::submit`.
pub struct Pending {
    rx: Receiver<FootprintResult<Simulator>>,
}

impl Pending {
    /// Waits for the scenario to complete.
    pub fn join(self) -> FootprintResult<Simulator> {
        self.rx.recv().map_err(|_| ExecutionError::Disconnected)?
    }
}

/// Bounded pool computing simulators against one dataset.
pub struct Comparator {
    tx: Option<Sender<Job>>,
    workers: Vec<JoinHandle<()>>,
    queue_capacity: usize,
}

impl Comparator {
    /// Starts the worker threads.
    ///
    /// # Errors
    /// Returns `Internal` if a worker thread cannot be spawned.
    pub fn start(db: Db, config: CompareConfig) -> FootprintResult<Self> {
        let workers = config.workers.max(1);
        let queue_capacity = config.queue_capacity.max(1);
        let (tx, rx) = bounded::<Job>(queue_capacity);

        let mut handles = Vec::with_capacity(workers);
        for idx in 0..workers {
            let rx: Receiver<Job> = rx.clone();
            let db = db.clone();
            let handle = thread::Builder::new()
                .name(format!("footprint-compare-{idx}"))
                .spawn(move || run_worker(&rx, &db))
                .map_err(|e| FootprintError::internal(format!("spawn comparison worker: {e}")))?;
            handles.push(handle);
        }

        tracing::debug!(
            target: "textile_footprint::compare",
            workers,
            queue_capacity,
            "compare.pool.started"
        );
        Ok(Self {
            tx: Some(tx),
            workers: handles,
            queue_capacity,
        })
    }

    /// Queues one computation without blocking.
    ///
    /// # Errors
    /// - `QueueFull`: the queue holds `queue_capacity` scenarios already
    /// - `Disconnected`: the pool has shut down
    pub fn submit(&self, inputs: Inputs) -> Result<Pending, ExecutionError> {
        let (reply, rx) = bounded(1);
        self.try_send(Job::Compute { inputs, reply })?;
        Ok(Pending { rx })
    }

    /// Computes every scenario, waiting for queue space as needed.
    ///
    /// A failing scenario does not stop the others; its error is kept in
    /// its outcome.
    pub fn compare(&self, scenarios: Vec<Scenario>) -> Vec<Outcome> {
        let pending: Vec<(String, Result<Pending, ExecutionError>)> = scenarios
            .into_iter()
            .map(|Scenario { label, inputs }| {
                let (reply, rx) = bounded(1);
                let sent = self
                    .send(Job::Compute { inputs, reply })
                    .map(|()| Pending { rx });
                (label, sent)
            })
            .collect();

        let outcomes: Vec<Outcome> = pending
            .into_iter()
            .map(|(label, pending)| Outcome {
                label,
                result: pending.map_err(FootprintError::from).and_then(Pending::join),
            })
            .collect();

        tracing::info!(
            target: "textile_footprint::compare",
            scenarios = outcomes.len(),
            failed = outcomes.iter().filter(|o| o.result.is_err()).count(),
            "compare.finished"
        );
        outcomes
    }

    fn sender(&self) -> Result<&Sender<Job>, ExecutionError> {
        self.tx.as_ref().ok_or(ExecutionError::Disconnected)
    }

    fn send(&self, job: Job) -> Result<(), ExecutionError> {
        self.sender()?
            .send(job)
            .map_err(|_| ExecutionError::Disconnected)
    }

    fn try_send(&self, job: Job) -> Result<(), ExecutionError> {
        match self.sender()?.try_send(job) {
            Ok(()) => Ok(()),
            Err(TrySendError::Full(_)) => Err(ExecutionError::QueueFull {
                capacity: self.queue_capacity,
            }),
            Err(TrySendError::Disconnected(_)) => Err(ExecutionError::Disconnected),
        }
    }

    /// Occupies one worker; returns once the worker has picked the job up.
    #[cfg(test)]
    fn submit_sleep(&self, duration: Duration) -> Result<(), ExecutionError> {
        let (started, rx) = bounded(1);
        self.try_send(Job::Sleep { duration, started })?;
        rx.recv().map_err(|_| ExecutionError::Disconnected)
    }
}

fn run_worker(rx: &Receiver<Job>, db: &Db) {
    while let Ok(job) = rx.recv() {
        match job {
            Job::Compute { inputs, reply } => {
                let result = Simulator::from_inputs(&inputs, db);
                if let Err(e) = &result {
                    tracing::debug!(
                        target: "textile_footprint::compare",
                        product = %inputs.product,
                        error = %e,
                        "compare.scenario.failed"
                    );
                }
                let _ = reply.send(result);
            }

            #[cfg(test)]
            Job::Sleep { duration, started } => {
                let _ = started.send(());
                thread::sleep(duration);
            }
        }
    }
}

impl Drop for Comparator {
    fn drop(&mut self) {
        // Closing the channel lets workers drain queued jobs and exit.
        drop(self.tx.take());
        for handle in self.workers.drain(..) {
            let _ = handle.join();
        }
    }
}

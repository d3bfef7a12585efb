//! Error types for the footprint engine.
//!
//! All errors are strongly typed using thiserror so callers can tell a
//! rejected input apart from a broken reference dataset. Only the latter
//! is fatal: a dataset that references processes it does not contain
//! would otherwise produce a plausible-looking but wrong CO2 score.

use thiserror::Error;

use crate::process::ProcessId;

/// Validation errors raised at the input boundary.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Mass {value} kg must be finite and greater than zero")]
    InvalidMass {
        value: f64,
    },

    #[error("PCR waste rate {value} for product '{product}' is out of range [0.0, 1.0)")]
    PcrWasteOutOfRange {
        product: String,
        value: f64,
    },

    #[error("Waste rate {value} for process {process} is out of range [0.0, 1.0]")]
    WasteRateOutOfRange {
        process: ProcessId,
        value: f64,
    },

    #[error("Grammage {value} g/m2 for woven product '{product}' must be greater than zero")]
    InvalidGrammage {
        product: String,
        value: f64,
    },

    #[error("Invalid country code '{code}': expected two ASCII letters")]
    InvalidCountryCode {
        code: String,
    },

    #[error("Got {actual} countries, a life cycle has at most {max} stages")]
    TooManyCountries {
        actual: usize,
        max: usize,
    },
}

/// Execution errors raised while computing a footprint.
#[derive(Debug, Error)]
pub enum ExecutionError {
    #[error("Process not found in catalog: {id}")]
    UnknownProcess {
        id: ProcessId,
    },

    #[error("Material not found: {id}")]
    UnknownMaterial {
        id: String,
    },

    #[error("Product not found: {id}")]
    UnknownProduct {
        id: String,
    },

    #[error("Comparison queue is full (capacity: {capacity})")]
    QueueFull {
        capacity: usize,
    },

    #[error("Comparison worker pool disconnected")]
    Disconnected,
}

/// Errors raised while loading reference datasets.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("Failed to read dataset '{dataset}' from {path}: {message}")]
    Io {
        dataset: &'static str,
        path: String,
        message: String,
    },

    #[error("Failed to parse dataset '{dataset}': {message}")]
    Parse {
        dataset: &'static str,
        message: String,
    },

    #[error("Duplicate key '{key}' in dataset '{dataset}'")]
    DuplicateKey {
        dataset: &'static str,
        key: String,
    },

    #[error("Invalid record '{key}' in dataset '{dataset}': {source}")]
    InvalidRecord {
        dataset: &'static str,
        key: String,
        #[source]
        source: ValidationError,
    },

    #[error("Dataset '{dataset}' entry '{key}' references unknown process {process}")]
    DanglingReference {
        dataset: &'static str,
        key: String,
        process: ProcessId,
    },
}

/// Errors for JSON encoding and decoding of wire shapes.
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("Failed to serialize {what}: {message}")]
    SerializationFailed {
        what: &'static str,
        message: String,
    },

    #[error("Failed to deserialize {what}: {message}")]
    DeserializationFailed {
        what: &'static str,
        message: String,
    },
}

/// Top-level error type for the footprint engine.
#[derive(Debug, Error)]
pub enum FootprintError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Execution error: {0}")]
    Execution(#[from] ExecutionError),

    #[error("Data error: {0}")]
    Data(#[from] DataError),

    #[error("Codec error: {0}")]
    Codec(#[from] CodecError),

    #[error("Internal error: {message}")]
    Internal {
        message: String,
    },
}

impl FootprintError {
    /// Creates an internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Returns true if this is a validation error.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Returns true if this is an execution error.
    #[must_use]
    pub const fn is_execution(&self) -> bool {
        matches!(self, Self::Execution(_))
    }

    /// Returns true if this is a codec error.
    #[must_use]
    pub const fn is_codec(&self) -> bool {
        matches!(self, Self::Codec(_))
    }

    /// Returns true if the reference data is inconsistent.
    ///
    /// Fatal errors mean the loaded catalog cannot be trusted; callers
    /// should stop instead of showing a partial score.
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        match self {
            Self::Execution(e) => matches!(e, ExecutionError::UnknownProcess { .. }),
            Self::Data(_) | Self::Internal { .. } => true,
            Self::Validation(_) | Self::Codec(_) => false,
        }
    }
}

/// Result type alias for footprint operations.
pub type FootprintResult<T> = Result<T, FootprintError>;

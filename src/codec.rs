//! JSON encoding of simulators and inputs.
//!
//! Serde already derives the wire shapes. These helpers keep the error
//! mapping in one place so callers only see `CodecError`.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::CodecError;
use crate::inputs::Inputs;
use crate::simulator::Simulator;

fn encode<T: Serialize>(value: &T, what: &'static str, pretty: bool) -> Result<String, CodecError> {
    let encoded = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };
    encoded.map_err(|e| CodecError::SerializationFailed {
        what,
        message: e.to_string(),
    })
}

fn decode<T: DeserializeOwned>(s: &str, what: &'static str) -> Result<T, CodecError> {
    serde_json::from_str(s).map_err(|e| CodecError::DeserializationFailed {
        what,
        message: e.to_string(),
    })
}

/// Serialize a simulator to compact JSON.
pub fn to_json(sim: &Simulator) -> Result<String, CodecError> {
    encode(sim, "simulator", false)
}

/// Serialize a simulator to pretty JSON.
pub fn to_json_pretty(sim: &Simulator) -> Result<String, CodecError> {
    encode(sim, "simulator", true)
}

/// Deserialize a simulator from JSON.
///
/// The result is taken as is; call `compute` to refresh derived values
/// against another dataset.
pub fn from_json(s: &str) -> Result<Simulator, CodecError> {
    decode(s, "simulator")
}

pub fn inputs_to_json(inputs: &Inputs) -> Result<String, CodecError> {
    encode(inputs, "inputs", false)
}

/// Deserialize and validate inputs.
pub fn inputs_from_json(s: &str) -> Result<Inputs, CodecError> {
    let inputs: Inputs = decode(s, "inputs")?;
    inputs
        .validate()
        .map_err(|e| CodecError::DeserializationFailed {
            what: "inputs",
            message: e.to_string(),
        })?;
    Ok(inputs)
}

/*!
 * Error Types
 * Centralized error handling with thiserror, miette, and serde support
 */

use crate::core::data_structures::InlineString;
use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Simulator errors with serialization support
///
/// Every operation is a pure local computation, so none of these are
/// transient: each one is returned to the immediate caller unchanged.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum SimError {
    #[error("Invalid process registry: {0}")]
    #[diagnostic(
        code(sim::invalid_registry),
        help(
            "Bursts must be at least 1, arrivals and priorities non-negative, \
             queue classes 0-2, and ids unique."
        )
    )]
    InvalidRegistry(InlineString),

    #[error("Invalid scheduling parameter: {0}")]
    #[diagnostic(
        code(sim::invalid_parameter),
        help("Time quanta must be at least 1 tick. The engine refuses to tick rather than clamp.")
    )]
    InvalidParameter(InlineString),

    #[error("Configuration error: {0}")]
    #[diagnostic(
        code(sim::configuration_error),
        help("Check the SIM_* environment variables for typos and out-of-range values.")
    )]
    Configuration(InlineString),

    #[error("I/O error: {0}")]
    #[diagnostic(
        code(sim::io_error),
        help("Registry file could not be read. Check the path and file permissions.")
    )]
    Io(InlineString),

    #[error("Serialization error: {0}")]
    #[diagnostic(
        code(sim::serialization_error),
        help("Registry files are JSON arrays of process objects.")
    )]
    Serialization(InlineString),
}

impl SimError {
    pub fn invalid_registry(msg: impl Into<InlineString>) -> Self {
        SimError::InvalidRegistry(msg.into())
    }

    pub fn invalid_parameter(msg: impl Into<InlineString>) -> Self {
        SimError::InvalidParameter(msg.into())
    }
}

impl From<std::io::Error> for SimError {
    fn from(err: std::io::Error) -> Self {
        SimError::Io(err.to_string().into())
    }
}

impl From<serde_json::Error> for SimError {
    fn from(err: serde_json::Error) -> Self {
        SimError::Serialization(err.to_string().into())
    }
}

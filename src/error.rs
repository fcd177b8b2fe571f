//! Error type shared by the scaler, the kernels and the registry.
//!
//! Only two failure classes exist. An unrecognized work type is deliberately
//! not one of them: the registry answers it with a placeholder payload.

use serde::Serialize;

/// Failure raised before or during a computation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComputeError {
    /// The request lies outside the domain of the computation
    /// (difficulty < 1, Collatz start <= 0, malformed parameter override).
    InvalidInput { message: String },
    /// The computation would exceed a configured resource bound or the
    /// range of its integer type. Distinct from "nothing found".
    ComputationOverflow {
        what: &'static str,
        requested: String,
        limit: String,
    },
}

impl ComputeError {
    pub fn invalid(message: impl Into<String>) -> Self {
        ComputeError::InvalidInput {
            message: message.into(),
        }
    }

    pub fn overflow(what: &'static str, requested: impl ToString, limit: impl ToString) -> Self {
        ComputeError::ComputationOverflow {
            what,
            requested: requested.to_string(),
            limit: limit.to_string(),
        }
    }

    /// Stable machine-readable kind, used in result envelopes and metric labels.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ComputeError::InvalidInput { .. } => ErrorKind::InvalidInput,
            ComputeError::ComputationOverflow { .. } => ErrorKind::ComputationOverflow,
        }
    }
}

impl std::fmt::Display for ComputeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ComputeError::InvalidInput { message } => write!(f, "invalid input: {}", message),
            ComputeError::ComputationOverflow {
                what,
                requested,
                limit,
            } => write!(
                f,
                "computation aborted: {} of {} exceeds limit {}",
                what, requested, limit
            ),
        }
    }
}

impl std::error::Error for ComputeError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    InvalidInput,
    ComputationOverflow,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::InvalidInput => "invalid_input",
            ErrorKind::ComputationOverflow => "computation_overflow",
        }
    }
}

//! Unified error handling for the mining pipeline.
//!
//! All fallible public operations return [`Result`]. Validation failures
//! surface before any mining work starts; per-task failures inside a mining
//! iteration are logged and dropped instead (see `mine::frontier`).

use thiserror::Error;

/// Errors produced by the hotspot mining pipeline.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MineError {
    /// The input batch contained no trajectories at all.
    #[error("trajectory batch is empty")]
    EmptyBatch,

    /// Every trajectory was discarded during normalization.
    #[error("no trajectory survived normalization ({discarded} discarded)")]
    AllTrajectoriesDiscarded { discarded: usize },

    /// Mining thresholds below their minimum of 1.
    #[error("invalid thresholds: min_path_len={min_path_len}, min_support={min_support} (both must be >= 1)")]
    InvalidThresholds { min_path_len: u32, min_support: u32 },

    /// No trajectories stored for the requested owner.
    #[error("no trajectories found for owner '{owner_id}'")]
    UnknownOwner { owner_id: String },

    /// A trajectory source or hotspot sink reported a failure.
    #[error("sink/source failure: {message}")]
    Sink { message: String },
}

impl MineError {
    /// Wrap a boundary (source/sink) failure message.
    pub fn sink(message: impl Into<String>) -> Self {
        MineError::Sink {
            message: message.into(),
        }
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, MineError>;

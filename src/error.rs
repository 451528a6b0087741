// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, TrackerError>;

#[derive(Debug, Error)]
pub enum TrackerError {
    // -- Input
    #[error("{0}")]
    InvalidInput(String),

    // -- Data file
    #[error("Data file is corrupted. Please check {}", path.display())]
    CorruptData {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Could not access data file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not serialise expenses: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl TrackerError {
    pub fn invalid(msg: impl Into<String>) -> Self {
        TrackerError::InvalidInput(msg.into())
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        TrackerError::Io {
            path: path.into(),
            source,
        }
    }

    pub fn is_invalid_input(&self) -> bool {
        matches!(self, TrackerError::InvalidInput(_))
    }

    pub fn is_corrupt_data(&self) -> bool {
        matches!(self, TrackerError::CorruptData { .. })
    }
}

// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::path::PathBuf;

use crate::storage::DEFAULT_DATA_FILE;

pub const DEFAULT_LOG_FILE: &str = "logs/tracker.log";
pub const DEFAULT_LOG_LEVEL: &str = "info";

pub const ENV_DATA_FILE: &str = "TRACKER_DATA_FILE";
pub const ENV_LOG_FILE: &str = "TRACKER_LOG_FILE";
pub const ENV_LOG_LEVEL: &str = "TRACKER_LOG";

/// Runtime settings resolved from flags, then environment, then defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub data_file: PathBuf,
    pub log_file: PathBuf,
    pub log_level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl Settings {
    pub fn from_matches(m: &clap::ArgMatches) -> Self {
        let defaults = Settings::default();
        Self {
            data_file: m
                .get_one::<PathBuf>("data_file")
                .cloned()
                .unwrap_or(defaults.data_file),
            log_file: m
                .get_one::<PathBuf>("log_file")
                .cloned()
                .unwrap_or(defaults.log_file),
            log_level: m
                .get_one::<String>("log_level")
                .cloned()
                .unwrap_or(defaults.log_level),
        }
    }
}

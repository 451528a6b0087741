// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod models;
pub mod service;
pub mod storage;
pub mod telemetry;
pub mod utils;
pub mod validation;

pub use error::{Result, TrackerError};

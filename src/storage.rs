// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Persistence of the full expense collection.
//!
//! Every mutation is a whole-collection read-modify-write. There is no
//! locking: two processes writing the same file can lose updates.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

use crate::error::{Result, TrackerError};
use crate::models::{DOCUMENT_VERSION, Expense, ExpenseDocument, ExpensePatch};

pub const DEFAULT_DATA_FILE: &str = "data/expenses.json";

/// Backend holding the expense collection.
///
/// Implementors only supply `load_all`/`save_all`; the mutations are built
/// on top of them.
pub trait ExpenseStore {
    fn load_all(&self) -> Result<Vec<Expense>>;

    fn save_all(&self, expenses: &[Expense]) -> Result<()>;

    fn add(&self, expense: Expense) -> Result<()> {
        let mut expenses = self.load_all()?;
        let id = expense.id.clone();
        expenses.push(expense);
        self.save_all(&expenses)?;
        info!(%id, "added expense");
        Ok(())
    }

    /// Returns whether a record was removed. The collection is only
    /// rewritten when something matched.
    fn delete(&self, id: &str) -> Result<bool> {
        let mut expenses = self.load_all()?;
        let before = expenses.len();
        expenses.retain(|e| e.id != id);
        if expenses.len() < before {
            self.save_all(&expenses)?;
            info!(%id, "deleted expense");
            return Ok(true);
        }
        Ok(false)
    }

    /// Applies `patch` to the first record with a matching id.
    fn update(&self, id: &str, patch: &ExpensePatch) -> Result<Option<Expense>> {
        let mut expenses = self.load_all()?;
        let Some(pos) = expenses.iter().position(|e| e.id == id) else {
            return Ok(None);
        };
        patch.apply(&mut expenses[pos]);
        self.save_all(&expenses)?;
        info!(%id, "updated expense");
        Ok(Some(expenses[pos].clone()))
    }
}

/// Expense collection stored as one pretty-printed JSON document.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Opens the store, creating the parent directory and an empty
    /// document if needed.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let store = Self { path: path.into() };
        store.ensure_initialized()?;
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Idempotent: an existing file is never touched.
    pub fn ensure_initialized(&self) -> Result<()> {
        if let Some(parent) = self.parent_dir() {
            fs::create_dir_all(parent).map_err(|e| TrackerError::io(parent, e))?;
        }
        if !self.path.exists() {
            self.write_document(&ExpenseDocument::default())?;
            info!(path = %self.path.display(), "created new data file");
        }
        Ok(())
    }

    fn parent_dir(&self) -> Option<&Path> {
        self.path.parent().filter(|p| !p.as_os_str().is_empty())
    }

    fn write_document(&self, doc: &ExpenseDocument) -> Result<()> {
        let json = serde_json::to_string_pretty(doc)?;
        let dir = self.parent_dir().unwrap_or_else(|| Path::new("."));
        let mut tmp = NamedTempFile::new_in(dir).map_err(|e| TrackerError::io(dir, e))?;
        let write = |tmp: &mut NamedTempFile| -> io::Result<()> {
            tmp.write_all(json.as_bytes())?;
            tmp.write_all(b"\n")?;
            tmp.as_file().sync_all()
        };
        write(&mut tmp).map_err(|e| TrackerError::io(tmp.path(), e))?;
        // Temp files start out 0600; keep the target's mode across saves.
        if let Ok(meta) = fs::metadata(&self.path) {
            tmp.as_file()
                .set_permissions(meta.permissions())
                .map_err(|e| TrackerError::io(tmp.path(), e))?;
        }
        tmp.persist(&self.path)
            .map_err(|e| TrackerError::io(&self.path, e.error))?;
        Ok(())
    }
}

impl ExpenseStore for JsonFileStore {
    fn load_all(&self) -> Result<Vec<Expense>> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                warn!(path = %self.path.display(), "data file not found, re-initialising");
                self.ensure_initialized()?;
                return Ok(Vec::new());
            }
            Err(e) => return Err(TrackerError::io(&self.path, e)),
        };
        let doc: ExpenseDocument =
            serde_json::from_str(&raw).map_err(|source| TrackerError::CorruptData {
                path: self.path.clone(),
                source,
            })?;
        if doc.version != DOCUMENT_VERSION {
            warn!(version = doc.version, "unexpected data file version");
        }
        debug!(count = doc.expenses.len(), "loaded expenses");
        Ok(doc.expenses)
    }

    fn save_all(&self, expenses: &[Expense]) -> Result<()> {
        self.write_document(&ExpenseDocument::new(expenses.to_vec()))?;
        debug!(count = expenses.len(), "saved expenses");
        Ok(())
    }
}

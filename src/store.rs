//! Observation store: durable append-only log of prediction requests.
//!
//! One UTF-8 comma-delimited file per domain, header row naming the
//! columns (every field plus `Outcome`). Created header-only on first
//! use if absent; appended to indefinitely; never truncated.
//!
//! Appends are true file appends (`OpenOptions::append`) serialized by
//! a per-store writer mutex, so two concurrent submissions both land
//! in the file instead of racing a whole-file rewrite.

use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use thiserror::Error;

use crate::models::{Domain, Label, ObservationRecord};

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Observation store unwritable: {0}")]
    Io(#[from] std::io::Error),

    #[error("Observation store corrupt: {0}")]
    Csv(#[from] csv::Error),

    #[error("Observation store header mismatch: expected {expected:?}, found {found:?}")]
    HeaderMismatch {
        expected: Vec<String>,
        found: Vec<String>,
    },

    #[error("Invalid value in column {column}: {value}")]
    InvalidValue { column: String, value: String },

    #[error("Record has {got} values, store schema expects {expected}")]
    ArityMismatch { expected: usize, got: usize },

    #[error("Internal lock error")]
    LockPoisoned,
}

/// Per-domain append-only observation log.
pub struct ObservationStore {
    domain: Domain,
    path: PathBuf,
    writer: Mutex<()>,
}

impl ObservationStore {
    /// Open the store at `path`, creating a header-only file (and any
    /// missing parent directories) if absent.
    pub fn open(domain: Domain, path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        if !path.exists() {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            let mut writer = csv::Writer::from_path(&path)?;
            writer.write_record(domain.store_columns())?;
            writer.flush()?;
            tracing::info!(domain = %domain, path = %path.display(), "Created observation store");
        }
        Ok(Self {
            domain,
            path,
            writer: Mutex::new(()),
        })
    }

    pub fn domain(&self) -> Domain {
        self.domain
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one record. The write is the terminal, durable side
    /// effect of a prediction run; it either fully lands or errors.
    pub fn append(&self, record: &ObservationRecord) -> Result<(), StoreError> {
        let expected = self.domain.field_specs().len();
        if record.values.len() != expected {
            return Err(StoreError::ArityMismatch {
                expected,
                got: record.values.len(),
            });
        }

        let _guard = self.writer.lock().map_err(|_| StoreError::LockPoisoned)?;
        let file = OpenOptions::new().append(true).open(&self.path)?;
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);
        writer.write_record(record.to_cells())?;
        writer.flush()?;
        tracing::debug!(
            domain = %self.domain,
            outcome = %record.outcome,
            "Appended observation"
        );
        Ok(())
    }

    /// Read every record in append order, verifying the header.
    pub fn read_all(&self) -> Result<Vec<ObservationRecord>, StoreError> {
        let mut reader = csv::Reader::from_path(&self.path)?;
        let expected: Vec<String> = self
            .domain
            .store_columns()
            .iter()
            .map(|c| c.to_string())
            .collect();
        let found: Vec<String> =
            reader.headers()?.iter().map(|h| h.to_string()).collect();
        if found != expected {
            return Err(StoreError::HeaderMismatch { expected, found });
        }

        let mut records = Vec::new();
        for row in reader.records() {
            let row = row?;
            records.push(self.parse_row(&row, &expected)?);
        }
        Ok(records)
    }

    /// Number of logged observations (excludes the header).
    pub fn count(&self) -> Result<usize, StoreError> {
        Ok(self.read_all()?.len())
    }

    fn parse_row(
        &self,
        row: &csv::StringRecord,
        columns: &[String],
    ) -> Result<ObservationRecord, StoreError> {
        if row.len() != columns.len() {
            return Err(StoreError::ArityMismatch {
                expected: columns.len() - 1,
                got: row.len().saturating_sub(1),
            });
        }
        let mut values = Vec::with_capacity(columns.len() - 1);
        for (cell, column) in row.iter().zip(columns).take(columns.len() - 1) {
            let value: f64 = cell.parse().map_err(|_| StoreError::InvalidValue {
                column: column.clone(),
                value: cell.to_string(),
            })?;
            values.push(value);
        }
        let outcome_cell = &row[columns.len() - 1];
        let outcome = outcome_cell
            .parse::<u8>()
            .ok()
            .and_then(Label::from_u8)
            .ok_or_else(|| StoreError::InvalidValue {
                column: "Outcome".into(),
                value: outcome_cell.to_string(),
            })?;
        Ok(ObservationRecord::new(values, outcome))
    }
}

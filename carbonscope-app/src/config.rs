use anyhow::{Context, Result};
use carbonscope_core::analysis::DEFAULT_REQUEST_COUNT;
use carbonscope_core::error::{BatchError, CarbonscopeError};
use carbonscope_core::loader::{self, BatchOutcome};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Describes a comparison run: which record files to admit and the
/// per-service request counts for the per-unit metrics.
#[derive(Debug, Deserialize)]
pub struct CompareRequest {
    pub services: Vec<ServiceEntry>,
}

#[derive(Debug, Deserialize)]
pub struct ServiceEntry {
    pub path: PathBuf,
    pub request_count: Option<i64>,
}

impl CompareRequest {
    /// Loads a comparison request from a YAML file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read compare request {:?}", path))?;
        serde_yaml::from_str(&text)
            .with_context(|| format!("Failed to parse compare request {:?}", path))
    }

    /// Builds a request from plain file arguments, one shared request
    /// count for every service.
    pub fn from_files(paths: &[PathBuf], request_count: Option<i64>) -> Self {
        Self {
            services: paths
                .iter()
                .map(|path| ServiceEntry {
                    path: path.clone(),
                    request_count,
                })
                .collect(),
        }
    }
}

impl ServiceEntry {
    pub fn effective_request_count(&self) -> i64 {
        self.request_count.unwrap_or(DEFAULT_REQUEST_COUNT as i64)
    }
}

/// Reads record files and admits them as a batch.
///
/// Unreadable files join the batch summary alongside structurally invalid
/// ones; one bad file never aborts the rest.
pub fn load_record_files(paths: &[PathBuf]) -> BatchOutcome {
    let mut sources = Vec::new();
    let mut unreadable: Vec<(String, CarbonscopeError)> = Vec::new();

    for path in paths {
        let name = path.display().to_string();
        match fs::read_to_string(path) {
            Ok(text) => sources.push((name, text)),
            Err(e) => unreadable.push((name.clone(), CarbonscopeError::FileIO(name, e))),
        }
    }

    let mut outcome = loader::load_batch(sources);
    if !unreadable.is_empty() {
        match outcome.error.as_mut() {
            Some(batch) => batch.rejected.extend(unreadable),
            None => outcome.error = Some(BatchError { rejected: unreadable }),
        }
    }
    outcome
}

use std::fmt;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CarbonscopeError {
    #[error("Failed to parse record from '{0}': {1}")]
    RecordParse(String, #[source] serde_json::Error),

    #[error("Record from '{0}' has an empty serviceId")]
    EmptyServiceId(String),

    #[error("Duplicate serviceId '{0}' in batch")]
    DuplicateServiceId(String),

    #[error("A record draft requires a non-empty serviceId")]
    MissingServiceId,

    #[error("I/O error for file '{0}': {1}")]
    FileIO(String, #[source] std::io::Error),

    #[error("Failed to write CSV export '{0}': {1}")]
    CsvError(String, #[source] csv::Error),
}

/// Summary of the invalid inputs of a multi-file upload.
///
/// One bad file never aborts the batch: valid records are admitted and the
/// rejections are reported together through this error.
#[derive(Debug, Error)]
pub struct BatchError {
    pub rejected: Vec<(String, CarbonscopeError)>,
}

impl fmt::Display for BatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} input(s) rejected: ", self.rejected.len())?;
        let details: Vec<String> = self
            .rejected
            .iter()
            .map(|(source, error)| format!("{}: {}", source, error))
            .collect();
        f.write_str(&details.join("; "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn batch_error_names_every_rejected_source() {
        let error = BatchError {
            rejected: vec![
                (
                    "b.json".to_string(),
                    CarbonscopeError::EmptyServiceId("b.json".to_string()),
                ),
                (
                    "c.json".to_string(),
                    CarbonscopeError::DuplicateServiceId("svc-1".to_string()),
                ),
            ],
        };
        let message = error.to_string();
        assert!(message.starts_with("2 input(s) rejected"));
        assert!(message.contains("b.json"));
        assert!(message.contains("c.json"));
    }
}

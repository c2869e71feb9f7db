use crate::error::{BatchError, CarbonscopeError};
use carbonscope_schemas::service::AIServiceLifecycleImpact;
use std::collections::HashSet;
use tracing::warn;

/// Parses and validates one persisted record.
///
/// Structural validation is strict: malformed JSON, missing or unknown
/// keys and wrong types are rejected with a message naming the source.
pub fn parse_record(
    source_name: &str,
    json: &str,
) -> Result<AIServiceLifecycleImpact, CarbonscopeError> {
    let record: AIServiceLifecycleImpact = serde_json::from_str(json)
        .map_err(|e| CarbonscopeError::RecordParse(source_name.to_string(), e))?;
    if record.service_id.trim().is_empty() {
        return Err(CarbonscopeError::EmptyServiceId(source_name.to_string()));
    }
    Ok(record)
}

/// Result of admitting a batch of uploaded record sources.
#[derive(Debug, Default)]
pub struct BatchOutcome {
    /// Valid records, in input order.
    pub admitted: Vec<AIServiceLifecycleImpact>,
    /// Aggregated rejections, if any source was invalid.
    pub error: Option<BatchError>,
}

/// Admits a batch of `(source name, JSON text)` pairs,
/// accumulate-and-continue style: every valid source is admitted and the
/// invalid ones are collected into one summary. A duplicate `serviceId`
/// within the batch rejects the later source.
pub fn load_batch<I>(sources: I) -> BatchOutcome
where
    I: IntoIterator<Item = (String, String)>,
{
    let mut admitted = Vec::new();
    let mut rejected = Vec::new();
    let mut seen_ids: HashSet<String> = HashSet::new();

    for (source_name, json) in sources {
        match parse_record(&source_name, &json) {
            Ok(record) => {
                if !seen_ids.insert(record.service_id.clone()) {
                    rejected.push((
                        source_name,
                        CarbonscopeError::DuplicateServiceId(record.service_id),
                    ));
                    continue;
                }
                admitted.push(record);
            }
            Err(error) => {
                warn!(source = %source_name, %error, "rejecting record");
                rejected.push((source_name, error));
            }
        }
    }

    let error = if rejected.is_empty() {
        None
    } else {
        Some(BatchError { rejected })
    };
    BatchOutcome { admitted, error }
}

#[cfg(test)]
mod tests {
    use super::*;
    use carbonscope_schemas::stage::LifecycleStageKey;

    fn record_json(service_id: &str) -> String {
        let stages: Vec<String> = LifecycleStageKey::ALL
            .iter()
            .map(|key| format!("\"{}\":{{\"impactCalculationMode\":\"none\"}}", key.wire_name()))
            .collect();
        format!(
            "{{\"serviceId\":\"{}\",\"name\":\"{}\",\"description\":\"\",\"cycleStages\":{{{}}}}}",
            service_id,
            service_id,
            stages.join(",")
        )
    }

    #[test]
    fn parse_record_accepts_a_complete_record() {
        let record = parse_record("a.json", &record_json("svc-1")).unwrap();
        assert_eq!(record.service_id, "svc-1");
    }

    #[test]
    fn parse_record_names_the_source_on_malformed_json() {
        let err = parse_record("broken.json", "{not json").unwrap_err();
        assert!(err.to_string().contains("broken.json"));
    }

    #[test]
    fn parse_record_rejects_blank_service_id() {
        let err = parse_record("a.json", &record_json("  ")).unwrap_err();
        assert!(matches!(err, CarbonscopeError::EmptyServiceId(_)));
    }

    #[test]
    fn one_invalid_file_does_not_abort_the_batch() {
        // scenario: three uploads, the second is invalid JSON
        let outcome = load_batch([
            ("one.json".to_string(), record_json("svc-1")),
            ("two.json".to_string(), "{broken".to_string()),
            ("three.json".to_string(), record_json("svc-3")),
        ]);

        let ids: Vec<_> = outcome.admitted.iter().map(|r| r.service_id.as_str()).collect();
        assert_eq!(ids, ["svc-1", "svc-3"]);

        let error = outcome.error.unwrap();
        assert_eq!(error.rejected.len(), 1);
        assert_eq!(error.rejected[0].0, "two.json");
        assert!(error.to_string().contains("two.json"));
    }

    #[test]
    fn duplicate_service_ids_reject_the_later_source() {
        let outcome = load_batch([
            ("one.json".to_string(), record_json("svc-1")),
            ("again.json".to_string(), record_json("svc-1")),
        ]);
        assert_eq!(outcome.admitted.len(), 1);
        let error = outcome.error.unwrap();
        assert!(matches!(
            error.rejected[0].1,
            CarbonscopeError::DuplicateServiceId(_)
        ));
    }

    #[test]
    fn clean_batch_has_no_error() {
        let outcome = load_batch([
            ("one.json".to_string(), record_json("svc-1")),
            ("two.json".to_string(), record_json("svc-2")),
        ]);
        assert_eq!(outcome.admitted.len(), 2);
        assert!(outcome.error.is_none());
    }
}

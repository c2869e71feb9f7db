use crate::error::CarbonscopeError;
use carbonscope_schemas::{impact::ImpactConfig, service::AIServiceLifecycleImpact};
use csv::Writer;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;

/// Marker emitted in the value column for `dynamic` stages, whose number
/// is not part of the persisted record.
pub const DYNAMIC_VALUE_PLACEHOLDER: &str = "[dynamic]";

/// One exported table row: a single lifecycle stage of a single service.
#[derive(Debug, Serialize, Deserialize)]
pub struct ExportRow {
    pub service_id: String,
    pub name: String,
    pub description: String,
    pub stage_key: String,
    pub stage_label: String,
    pub calculation_mode: String,
    pub co2_value: String,
    pub api_url: String,
}

/// Flattens a record into one row per lifecycle stage, in canonical stage
/// order. Always ten rows, `none` stages included, so exported tables stay
/// rectangular across services.
///
/// The `token` of a `dynamic` stage is never written to a row.
pub fn to_rows(record: &AIServiceLifecycleImpact) -> Vec<ExportRow> {
    record
        .cycle_stages
        .iter()
        .map(|(key, config)| {
            let (co2_value, api_url) = match config {
                ImpactConfig::None => ("0".to_string(), String::new()),
                ImpactConfig::Approximation { co2_eq_in_kg } => {
                    (format!("{}", co2_eq_in_kg), String::new())
                }
                ImpactConfig::Dynamic { http_api_url, .. } => {
                    (DYNAMIC_VALUE_PLACEHOLDER.to_string(), http_api_url.clone())
                }
            };
            ExportRow {
                service_id: record.service_id.clone(),
                name: record.name.clone(),
                description: record.description.clone(),
                stage_key: key.wire_name().to_string(),
                stage_label: key.label().to_string(),
                calculation_mode: config.mode().as_str().to_string(),
                co2_value,
                api_url,
            }
        })
        .collect()
}

/// Serializes the rows of every record, in input order, under one header.
/// Quoting and escaping of free-text fields follow RFC 4180 via the `csv`
/// crate.
pub fn write_rows<W: io::Write>(
    writer: &mut Writer<W>,
    records: &[AIServiceLifecycleImpact],
) -> Result<(), csv::Error> {
    for record in records {
        for row in to_rows(record) {
            writer.serialize(row)?;
        }
    }
    writer.flush()?;
    Ok(())
}

/// CSV exporter bound to an output file.
pub struct CsvExporter {
    path: String,
    writer: Writer<fs::File>,
}

impl CsvExporter {
    pub fn new(path: &str) -> Result<Self, CarbonscopeError> {
        let writer = Writer::from_path(path)
            .map_err(|e| CarbonscopeError::CsvError(path.to_string(), e))?;
        Ok(Self {
            path: path.to_string(),
            writer,
        })
    }

    pub fn write_records(
        &mut self,
        records: &[AIServiceLifecycleImpact],
    ) -> Result<(), CarbonscopeError> {
        write_rows(&mut self.writer, records)
            .map_err(|e| CarbonscopeError::CsvError(self.path.clone(), e))
    }
}

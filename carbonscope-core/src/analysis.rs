use crate::simulation::state::DynamicValueState;
use carbonscope_schemas::{
    impact::ImpactConfig,
    service::AIServiceLifecycleImpact,
    stage::LifecycleStageKey,
};
use tracing::warn;

/// Request count assumed for a service when the caller configures none.
pub const DEFAULT_REQUEST_COUNT: u64 = 1000;

#[derive(Debug, Default, Clone, PartialEq)]
pub struct ImpactTotals {
    pub operational_total: f64,
    pub embodied_total: f64,
    pub grand_total: f64,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct PerUnitMetrics {
    pub avg_embodied_per_unit: f64,
    pub avg_operational_per_unit: f64,
    pub avg_total_per_unit: f64,
}

/// The full derived-metrics bundle for one service, as consumed by the
/// cross-service normalizer and the reporting layer.
#[derive(Debug, Clone)]
pub struct ServiceMetrics {
    pub service_id: String,
    pub name: String,
    pub request_count: u64,
    pub totals: ImpactTotals,
    pub per_unit: PerUnitMetrics,
}

/// Resolves one stage's configuration to a CO2 value in kg.
///
/// Pure function of its inputs; never fails, never returns a negative
/// value. A malformed approximation value falls back to 0 so one bad
/// field cannot block visualization of the rest of the record; the
/// fallback is logged so aggregate reports are not silently misleading.
pub fn resolve_stage_value(
    key: LifecycleStageKey,
    config: &ImpactConfig,
    dynamic_state: &DynamicValueState,
) -> f64 {
    match config {
        ImpactConfig::None => 0.0,
        ImpactConfig::Approximation { co2_eq_in_kg } => {
            if co2_eq_in_kg.is_finite() && *co2_eq_in_kg >= 0.0 {
                *co2_eq_in_kg
            } else {
                warn!(
                    stage = key.wire_name(),
                    value = *co2_eq_in_kg,
                    "invalid approximation co2EqInKg, falling back to 0"
                );
                0.0
            }
        }
        // 0 until the first simulation tick populates an entry
        ImpactConfig::Dynamic { .. } => dynamic_state.value_for(key).unwrap_or(0.0),
    }
}

/// Sums resolved stage values into category totals and the grand total.
///
/// Deterministic for a fixed `dynamic_state` snapshot; recompute whenever
/// the snapshot or the record's stage configs change.
pub fn aggregate(
    record: &AIServiceLifecycleImpact,
    dynamic_state: &DynamicValueState,
) -> ImpactTotals {
    let sum_over = |keys: &[LifecycleStageKey]| {
        keys.iter()
            .map(|&key| resolve_stage_value(key, record.cycle_stages.get(key), dynamic_state))
            .sum::<f64>()
    };

    let operational_total = sum_over(&LifecycleStageKey::SOFTWARE);
    let embodied_total = sum_over(&LifecycleStageKey::HARDWARE);
    ImpactTotals {
        operational_total,
        embodied_total,
        grand_total: operational_total + embodied_total,
    }
}

/// Clamps a caller-supplied request count to a usable divisor. Anything
/// below 1 becomes 1, so per-unit metrics never divide by zero or a
/// negative count.
pub fn clamp_request_count(requested: i64) -> u64 {
    if requested < 1 {
        warn!(requested, "request count below 1, clamping to 1");
        1
    } else {
        requested as u64
    }
}

/// Derives "per inference request" averages from category totals.
pub fn per_unit_metrics(totals: &ImpactTotals, request_count: u64) -> PerUnitMetrics {
    let divisor = request_count.max(1) as f64;
    PerUnitMetrics {
        avg_embodied_per_unit: totals.embodied_total / divisor,
        avg_operational_per_unit: totals.operational_total / divisor,
        avg_total_per_unit: totals.grand_total / divisor,
    }
}

/// Computes the complete metrics bundle for one service.
pub fn service_metrics(
    record: &AIServiceLifecycleImpact,
    dynamic_state: &DynamicValueState,
    requested_count: i64,
) -> ServiceMetrics {
    let request_count = clamp_request_count(requested_count);
    let totals = aggregate(record, dynamic_state);
    let per_unit = per_unit_metrics(&totals, request_count);
    ServiceMetrics {
        service_id: record.service_id.clone(),
        name: record.name.clone(),
        request_count,
        totals,
        per_unit,
    }
}

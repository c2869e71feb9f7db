use crate::analysis::ServiceMetrics;

/// Display palette for comparison charts. Colors are assigned by input
/// order, cycling through the palette, and re-assigned on every
/// recomputation.
pub const PALETTE: [&str; 5] = ["#36a2eb", "#ff6384", "#4bc0c0", "#ff9f40", "#9966ff"];

/// The comparison dimensions, in the fixed order they appear in the radar
/// table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dimension {
    RequestCount,
    AvgEmbodiedPerUnit,
    AvgOperationalPerUnit,
    AvgTotalPerUnit,
    TotalEmbodied,
    TotalOperational,
    TotalImpact,
}

impl Dimension {
    pub const ALL: [Dimension; 7] = [
        Dimension::RequestCount,
        Dimension::AvgEmbodiedPerUnit,
        Dimension::AvgOperationalPerUnit,
        Dimension::AvgTotalPerUnit,
        Dimension::TotalEmbodied,
        Dimension::TotalOperational,
        Dimension::TotalImpact,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Dimension::RequestCount => "Request Count",
            Dimension::AvgEmbodiedPerUnit => "Avg Embodied CO2 per Request (kg)",
            Dimension::AvgOperationalPerUnit => "Avg Operational CO2 per Request (kg)",
            Dimension::AvgTotalPerUnit => "Avg Total CO2 per Request (kg)",
            Dimension::TotalEmbodied => "Total Embodied CO2 (kg)",
            Dimension::TotalOperational => "Total Operational CO2 (kg)",
            Dimension::TotalImpact => "Total CO2 Impact (kg)",
        }
    }

    /// The raw, un-normalized value of this dimension for one service.
    pub fn raw_value(&self, metrics: &ServiceMetrics) -> f64 {
        match self {
            Dimension::RequestCount => metrics.request_count as f64,
            Dimension::AvgEmbodiedPerUnit => metrics.per_unit.avg_embodied_per_unit,
            Dimension::AvgOperationalPerUnit => metrics.per_unit.avg_operational_per_unit,
            Dimension::AvgTotalPerUnit => metrics.per_unit.avg_total_per_unit,
            Dimension::TotalEmbodied => metrics.totals.embodied_total,
            Dimension::TotalOperational => metrics.totals.operational_total,
            Dimension::TotalImpact => metrics.totals.grand_total,
        }
    }
}

/// One column of the radar table: a service and its display color.
#[derive(Debug, Clone)]
pub struct RadarSeries {
    pub service_id: String,
    pub name: String,
    pub color: &'static str,
}

/// One row of the radar table: a dimension with one normalized cell per
/// service, each in `[0, 100]`.
#[derive(Debug, Clone)]
pub struct RadarRow {
    pub dimension: Dimension,
    pub max_value: f64,
    pub cells: Vec<f64>,
}

#[derive(Debug, Clone, Default)]
pub struct RadarTable {
    pub series: Vec<RadarSeries>,
    pub rows: Vec<RadarRow>,
}

/// Rescales every service's raw metrics onto a common 0-100 scale,
/// per dimension.
///
/// Each dimension's maximum is derived from scratch over all input
/// services; adding or removing a service invalidates every previously
/// computed cell, so callers always normalize the full list again.
/// A dimension whose maximum is 0 divides by 1 instead, leaving all of
/// its cells at 0.
pub fn normalize(services: &[ServiceMetrics]) -> RadarTable {
    let series = services
        .iter()
        .enumerate()
        .map(|(index, metrics)| RadarSeries {
            service_id: metrics.service_id.clone(),
            name: metrics.name.clone(),
            color: PALETTE[index % PALETTE.len()],
        })
        .collect();

    let rows = Dimension::ALL
        .iter()
        .map(|&dimension| {
            let raw: Vec<f64> = services
                .iter()
                .map(|metrics| dimension.raw_value(metrics))
                .collect();
            let max_value = raw.iter().copied().fold(0.0_f64, f64::max);
            let denominator = if max_value > 0.0 { max_value } else { 1.0 };
            let cells = raw.iter().map(|value| value / denominator * 100.0).collect();
            RadarRow {
                dimension,
                max_value,
                cells,
            }
        })
        .collect();

    RadarTable { series, rows }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::ImpactTotals;

    fn metrics(service_id: &str, grand_total: f64, request_count: u64) -> ServiceMetrics {
        let totals = ImpactTotals {
            operational_total: grand_total,
            embodied_total: 0.0,
            grand_total,
        };
        let per_unit = crate::analysis::per_unit_metrics(&totals, request_count);
        ServiceMetrics {
            service_id: service_id.to_string(),
            name: service_id.to_string(),
            request_count,
            totals,
            per_unit,
        }
    }

    fn row(table: &RadarTable, dimension: Dimension) -> &RadarRow {
        table.rows.iter().find(|r| r.dimension == dimension).unwrap()
    }

    #[test]
    fn two_service_example_normalizes_against_the_maximum() {
        // A total 10, B total 40 -> A 25, B 100
        let table = normalize(&[metrics("a", 10.0, 1000), metrics("b", 40.0, 1000)]);
        let cells = &row(&table, Dimension::TotalImpact).cells;
        assert_eq!(cells, &vec![25.0, 100.0]);
    }

    #[test]
    fn rows_follow_declared_dimension_order() {
        let table = normalize(&[metrics("a", 10.0, 1000)]);
        let dimensions: Vec<_> = table.rows.iter().map(|r| r.dimension).collect();
        assert_eq!(dimensions, Dimension::ALL);
    }

    #[test]
    fn cells_stay_within_bounds_and_max_hits_100() {
        let table = normalize(&[
            metrics("a", 3.0, 10),
            metrics("b", 17.5, 2000),
            metrics("c", 0.4, 500),
        ]);
        for row in &table.rows {
            for &cell in &row.cells {
                assert!((0.0..=100.0).contains(&cell));
            }
            if row.max_value > 0.0 {
                assert!(row.cells.iter().any(|&cell| cell == 100.0));
            }
        }
    }

    #[test]
    fn all_zero_dimension_yields_all_zero_cells() {
        let table = normalize(&[metrics("a", 0.0, 1000), metrics("b", 0.0, 1000)]);
        let cells = &row(&table, Dimension::TotalImpact).cells;
        assert_eq!(cells, &vec![0.0, 0.0]);
        for cell in table.rows.iter().flat_map(|r| r.cells.iter()) {
            assert!(cell.is_finite());
        }
    }

    #[test]
    fn colors_cycle_through_the_palette_by_input_order() {
        let services: Vec<_> = (0..7).map(|i| metrics(&format!("svc-{}", i), 1.0, 1)).collect();
        let table = normalize(&services);
        for (index, series) in table.series.iter().enumerate() {
            assert_eq!(series.color, PALETTE[index % PALETTE.len()]);
        }
    }

    #[test]
    fn services_keep_input_order() {
        let table = normalize(&[metrics("b", 1.0, 1), metrics("a", 2.0, 1)]);
        let ids: Vec<_> = table.series.iter().map(|s| s.service_id.as_str()).collect();
        assert_eq!(ids, ["b", "a"]);
    }

    #[test]
    fn recompute_re_derives_maxima_for_the_new_service_set() {
        let a = metrics("a", 10.0, 1000);
        let b = metrics("b", 40.0, 1000);
        let before = normalize(&[a.clone(), b.clone()]);
        assert_eq!(row(&before, Dimension::TotalImpact).cells[0], 25.0);

        // dropping the maximum service rescales the survivor to 100
        let after = normalize(&[a]);
        assert_eq!(row(&after, Dimension::TotalImpact).cells[0], 100.0);
    }
}

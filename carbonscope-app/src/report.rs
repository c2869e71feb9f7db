use carbonscope_core::analysis::ServiceMetrics;
use carbonscope_core::compare::RadarTable;
use carbonscope_core::error::BatchError;

/// Prints the totals and per-unit metrics of one service.
pub fn print_service_report(metrics: &ServiceMetrics) {
    println!("\n--- {} ({}) ---", metrics.name, metrics.service_id);
    println!("Request count:        {}", metrics.request_count);
    println!("Operational total:    {:.4} kg CO2e", metrics.totals.operational_total);
    println!("Embodied total:       {:.4} kg CO2e", metrics.totals.embodied_total);
    println!("Grand total:          {:.4} kg CO2e", metrics.totals.grand_total);
    println!(
        "Per request: operational {:.6}, embodied {:.6}, total {:.6} kg CO2e",
        metrics.per_unit.avg_operational_per_unit,
        metrics.per_unit.avg_embodied_per_unit,
        metrics.per_unit.avg_total_per_unit
    );
}

/// Prints the normalized comparison table, one row per dimension.
pub fn print_radar_table(table: &RadarTable) {
    println!("\n--- Normalized comparison (0-100 per dimension) ---");

    let names: Vec<String> = table
        .series
        .iter()
        .map(|series| format!("{} [{}]", series.name, series.color))
        .collect();
    println!("{:<40} {}", "Dimension", names.join("  "));

    for row in &table.rows {
        let cells: Vec<String> = row.cells.iter().map(|cell| format!("{:>7.1}", cell)).collect();
        println!("{:<40} {}", row.dimension.label(), cells.join("  "));
    }
}

/// Prints the batch summary for a partially failed upload.
pub fn print_batch_error(error: &BatchError) {
    println!("\nWarning: {}", error);
}

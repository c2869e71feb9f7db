//! This module renders comparison charts from the engine's output tables.

use anyhow::Result;
use carbonscope_core::analysis::ServiceMetrics;
use carbonscope_core::compare::RadarTable;
use plotters::prelude::*;
use std::f64::consts::PI;

/// Generates and saves all comparison charts.
pub fn generate_all_plots(
    output_dir: &str,
    metrics: &[ServiceMetrics],
    table: &RadarTable,
) -> Result<()> {
    println!("[Plotting] Generating comparison charts...");

    if metrics.is_empty() {
        println!("[Plotting] Warning: No services to plot.");
        return Ok(());
    }

    plot_category_totals(output_dir, metrics)?;
    plot_radar(output_dir, table)?;

    println!("[Plotting] Charts have been saved to '{}'.", output_dir);
    Ok(())
}

fn palette_color(hex: &str) -> RGBColor {
    let value = u32::from_str_radix(hex.trim_start_matches('#'), 16).unwrap_or(0);
    RGBColor(
        ((value >> 16) & 0xff) as u8,
        ((value >> 8) & 0xff) as u8,
        (value & 0xff) as u8,
    )
}

/// Generates a bar chart of operational vs embodied totals per service.
fn plot_category_totals(output_dir: &str, metrics: &[ServiceMetrics]) -> Result<()> {
    let path = format!("{}/1_category_totals.png", output_dir);
    let root = BitMapBackend::new(&path, (1024, 768)).into_drawing_area();
    root.fill(&WHITE)?;

    let max_total: f64 = metrics
        .iter()
        .map(|m| m.totals.grand_total)
        .fold(0.0, f64::max)
        .max(1.0);

    let mut chart = ChartBuilder::on(&root)
        .caption("Lifecycle CO2 Totals by Service", ("sans-serif", 50).into_font())
        .margin(10)
        .x_label_area_size(30)
        .y_label_area_size(60)
        .build_cartesian_2d(0f64..metrics.len() as f64, 0f64..max_total * 1.1)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(metrics.len())
        .x_label_formatter(&|x| {
            metrics
                .get(*x as usize)
                .map(|m| m.name.clone())
                .unwrap_or_default()
        })
        .y_desc("kg CO2e")
        .draw()?;

    let operational = BLUE.mix(0.6);
    let embodied = RED.mix(0.6);

    chart
        .draw_series(metrics.iter().enumerate().map(|(i, m)| {
            let x = i as f64;
            Rectangle::new(
                [(x + 0.15, 0.0), (x + 0.45, m.totals.operational_total)],
                operational.filled(),
            )
        }))?
        .label("Operational")
        .legend(|(x, y)| Rectangle::new([(x, y - 5), (x + 10, y + 5)], BLUE.mix(0.6).filled()));

    chart
        .draw_series(metrics.iter().enumerate().map(|(i, m)| {
            let x = i as f64;
            Rectangle::new(
                [(x + 0.55, 0.0), (x + 0.85, m.totals.embodied_total)],
                embodied.filled(),
            )
        }))?
        .label("Embodied")
        .legend(|(x, y)| Rectangle::new([(x, y - 5), (x + 10, y + 5)], RED.mix(0.6).filled()));

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()?;
    root.present()?;
    Ok(())
}

/// Generates a radar chart of the normalized comparison table, one
/// polygon per service in its assigned palette color.
fn plot_radar(output_dir: &str, table: &RadarTable) -> Result<()> {
    let path = format!("{}/2_radar.png", output_dir);
    let root = BitMapBackend::new(&path, (900, 900)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Normalized Comparison", ("sans-serif", 40).into_font())
        .margin(40)
        .build_cartesian_2d(-130f64..130f64, -130f64..130f64)?;

    let dimension_count = table.rows.len().max(1);
    let angle_of = |index: usize| index as f64 * 2.0 * PI / dimension_count as f64 - PI / 2.0;

    // spokes and labels
    for (i, row) in table.rows.iter().enumerate() {
        let angle = angle_of(i);
        let (x, y) = (100.0 * angle.cos(), 100.0 * angle.sin());
        chart.draw_series(std::iter::once(PathElement::new(
            vec![(0.0, 0.0), (x, y)],
            BLACK.mix(0.3),
        )))?;
        chart.draw_series(std::iter::once(Text::new(
            row.dimension.label().to_string(),
            (x * 1.12, y * 1.12),
            ("sans-serif", 14).into_font(),
        )))?;
    }

    for (column, series) in table.series.iter().enumerate() {
        let color = palette_color(series.color);
        let mut points: Vec<(f64, f64)> = table
            .rows
            .iter()
            .enumerate()
            .map(|(i, row)| {
                let angle = angle_of(i);
                let radius = row.cells[column];
                (radius * angle.cos(), radius * angle.sin())
            })
            .collect();
        if let Some(first) = points.first().copied() {
            points.push(first);
        }

        chart
            .draw_series(std::iter::once(PathElement::new(
                points,
                color.stroke_width(2),
            )))?
            .label(series.name.clone())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.filled()));
    }

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()?;
    root.present()?;
    Ok(())
}

//! Chart collaborator
//!
//! Renders the per-player fine counts as a bar chart and a pie chart, side
//! by side in a single SVG file. Purely presentational: it consumes the
//! aggregated `(label, count)` pairs and no other state. The SVG backend is
//! used so rendering works in a terminal session with no display attached.

use crate::types::FineError;
use plotters::coord::Shift;
use plotters::prelude::*;
use std::path::Path;

/// Fill color of the bars
const BAR_FILL: RGBColor = RGBColor(66, 133, 244);

/// Slice colors for the pie, cycled when there are more players than colors
const PIE_PALETTE: [RGBColor; 6] = [
    RGBColor(66, 133, 244),
    RGBColor(219, 68, 55),
    RGBColor(244, 180, 0),
    RGBColor(15, 157, 88),
    RGBColor(171, 71, 188),
    RGBColor(0, 172, 193),
];

fn chart_error<E: std::fmt::Display>(error: E) -> FineError {
    FineError::Chart {
        message: error.to_string(),
    }
}

/// Render both charts to `path`
///
/// `per_player` must be non-empty; the caller skips rendering (with a
/// message) when there is nothing to chart.
pub fn render(per_player: &[(String, usize)], path: &Path) -> Result<(), FineError> {
    let root = SVGBackend::new(path, (1200, 500)).into_drawing_area();
    root.fill(&WHITE).map_err(chart_error)?;

    let (bar_area, pie_area) = root.split_horizontally(600);
    draw_bar_chart(&bar_area, per_player)?;
    draw_pie_chart(&pie_area, per_player)?;

    root.present().map_err(chart_error)?;
    Ok(())
}

/// Bar chart: one bar per first name, count on the y axis
fn draw_bar_chart(
    area: &DrawingArea<SVGBackend<'_>, Shift>,
    per_player: &[(String, usize)],
) -> Result<(), FineError> {
    let max_count = per_player.iter().map(|(_, count)| *count).max().unwrap_or(0);

    let mut chart = ChartBuilder::on(area)
        .caption("Fines per player", ("sans-serif", 24).into_font())
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(40)
        .build_cartesian_2d(
            0f64..per_player.len() as f64,
            0f64..(max_count as f64 * 1.1).max(1.0),
        )
        .map_err(chart_error)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(per_player.len())
        .x_label_formatter(&|x| {
            per_player
                .get(x.floor() as usize)
                .map(|(name, _)| name.clone())
                .unwrap_or_default()
        })
        .y_desc("Fines")
        .draw()
        .map_err(chart_error)?;

    chart
        .draw_series(per_player.iter().enumerate().map(|(index, (_, count))| {
            Rectangle::new(
                [
                    (index as f64 + 0.15, 0.0),
                    (index as f64 + 0.85, *count as f64),
                ],
                BAR_FILL.filled(),
            )
        }))
        .map_err(chart_error)?;

    Ok(())
}

/// Pie chart: share of the total fines per first name
fn draw_pie_chart(
    area: &DrawingArea<SVGBackend<'_>, Shift>,
    per_player: &[(String, usize)],
) -> Result<(), FineError> {
    let sizes: Vec<f64> = per_player.iter().map(|(_, count)| *count as f64).collect();
    let labels: Vec<String> = per_player.iter().map(|(name, _)| name.clone()).collect();
    let colors: Vec<RGBColor> = (0..per_player.len())
        .map(|index| PIE_PALETTE[index % PIE_PALETTE.len()])
        .collect();

    let (width, height) = area.dim_in_pixel();
    let center = (width as i32 / 2, height as i32 / 2);
    let radius = f64::from(width.min(height)) / 2.0 * 0.7;

    let mut pie = Pie::new(&center, &radius, &sizes, &colors, &labels);
    pie.label_style(("sans-serif", 18).into_font().color(&BLACK));
    area.draw(&pie).map_err(chart_error)?;

    Ok(())
}

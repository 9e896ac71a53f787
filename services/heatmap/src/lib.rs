//! Temperature heat map service.
//!
//! Loads the monthly variance dataset, lays out the chart and either writes
//! it as SVG/HTML/PNG or serves it over HTTP.

pub mod config;
pub mod loader;
pub mod server;

use heatmap_common::{month_name, HeatmapError, HeatmapResult};
use renderer::{rasterize, render_page, render_svg, HeatMap, HoverDispatcher, Pointer, Tooltip};

use crate::config::OutputFormat;

/// Serialize the chart in the requested format.
pub fn render_artifact(chart: &HeatMap, format: OutputFormat, scale: f32) -> HeatmapResult<Vec<u8>> {
    match format {
        OutputFormat::Svg => Ok(render_svg(chart).into_bytes()),
        OutputFormat::Html => Ok(render_page(chart).into_bytes()),
        OutputFormat::Png => rasterize(&render_svg(chart), scale),
    }
}

/// Tooltip text shown when the pointer rests on the center of a cell.
pub fn hover_text(chart: &HeatMap, year: i32, month: usize) -> HeatmapResult<String> {
    let index = chart.find_cell(year, month).ok_or_else(|| {
        HeatmapError::ConfigError(format!(
            "no record for {} {}",
            month_name(month).unwrap_or_default(),
            year
        ))
    })?;
    let cell = &chart.cells[index];

    let tooltip = Tooltip::shared(chart.config.tooltip.clone());
    let mut dispatcher = HoverDispatcher::new(&chart.cells);
    dispatcher.register(tooltip.clone());

    let page_x = chart.config.margin.left + cell.x + cell.width / 2.0;
    let page_y = chart.config.margin.top + cell.y + cell.height / 2.0;
    dispatcher.pointer_move(chart.pointer_to_cell(page_x, page_y), Pointer::new(page_x, page_y));

    let text = tooltip.borrow().text();
    Ok(text)
}

//! Heat map rendering for monthly temperature variance.
//!
//! Builds the chart scene and writes it out:
//! - Band, linear and sequential color scales
//! - Year/month axes and the color legend
//! - Hover dispatch and the tooltip overlay
//! - SVG, HTML page and PNG output

pub mod axis;
pub mod chart;
pub mod color;
pub mod legend;
pub mod page;
pub mod raster;
pub mod scale;
pub mod svg;
pub mod tooltip;

pub use chart::{Cell, ChartConfig, HeatMap, Margins};
pub use color::Color;
pub use page::render_page;
pub use raster::rasterize;
pub use svg::render_svg;
pub use tooltip::{HoverDispatcher, HoverObserver, Pointer, Tooltip, TooltipConfig};

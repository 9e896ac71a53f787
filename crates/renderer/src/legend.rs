//! Horizontal color legend: contiguous swatches over the color domain plus
//! a numeric axis beneath them.

use serde::{Deserialize, Serialize};

use crate::axis::{format_fixed, Axis, Orientation};
use crate::color::Color;
use crate::scale::{LinearScale, SequentialScale};

/// Legend layout configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LegendConfig {
    pub width: f64,
    pub height: f64,
    /// Number of color swatches
    pub swatches: usize,
    /// Requested number of axis ticks
    pub ticks: usize,
    /// Decimal places on axis labels
    pub precision: usize,
    /// Gap between the bottom of the plot area and the legend
    pub offset_y: f64,
}

impl Default for LegendConfig {
    fn default() -> Self {
        Self {
            width: 400.0,
            height: 20.0,
            swatches: 10,
            ticks: 10,
            precision: 1,
            offset_y: 40.0,
        }
    }
}

/// One colored slice of the legend.
#[derive(Debug, Clone, PartialEq)]
pub struct Swatch {
    /// Domain value at the swatch's left edge
    pub start: f64,
    /// Domain value at the swatch's right edge
    pub end: f64,
    pub x: f64,
    pub width: f64,
    pub fill: Color,
}

impl Swatch {
    /// Numerically lower bound of the slice.
    pub fn lower_bound(&self) -> f64 {
        self.start.min(self.end)
    }
}

#[derive(Debug, Clone)]
pub struct Legend {
    pub scale: LinearScale,
    pub swatches: Vec<Swatch>,
    pub axis: Axis,
    /// Top-left corner relative to the plot area
    pub origin: (f64, f64),
    pub height: f64,
}

impl Legend {
    /// Lay out the legend for a color scale below a plot of the given size.
    pub fn build<I>(
        color: &SequentialScale<I>,
        plot_width: f64,
        plot_height: f64,
        config: &LegendConfig,
    ) -> Self
    where
        I: Fn(f64) -> Color,
    {
        let (d0, d1) = color.domain();
        let scale = LinearScale::new((d0, d1), (0.0, config.width));
        let count = config.swatches.max(1);
        let step = (d1 - d0) / count as f64;
        let degenerate = d0 == d1;

        let swatches = (0..count)
            .map(|i| {
                let start = d0 + step * i as f64;
                let end = if i + 1 == count {
                    d1
                } else {
                    d0 + step * (i + 1) as f64
                };
                let (x, width) = if degenerate {
                    let width = config.width / count as f64;
                    (width * i as f64, width)
                } else {
                    let x = scale.map(start);
                    (x, scale.map(end) - x)
                };
                let mut swatch = Swatch {
                    start,
                    end,
                    x,
                    width,
                    fill: Color::transparent(),
                };
                swatch.fill = color.apply(swatch.lower_bound());
                swatch
            })
            .collect();

        let precision = config.precision;
        let axis = Axis::for_linear(
            Orientation::Bottom,
            &scale,
            scale.ticks(config.ticks),
            |v| format_fixed(v, precision),
        );

        Self {
            scale,
            swatches,
            axis,
            origin: (
                (plot_width - config.width) / 2.0,
                plot_height + config.offset_y,
            ),
            height: config.height,
        }
    }

    /// Sum of all swatch widths.
    pub fn total_width(&self) -> f64 {
        self.swatches.iter().map(|s| s.width).sum()
    }
}

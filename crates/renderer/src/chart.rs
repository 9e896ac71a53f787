//! Heat map scene construction.
//!
//! [`HeatMap::build`] turns a [`Dataset`] into everything needed to draw the
//! chart: year and month band scales, the temperature color scale, both
//! axes, one [`Cell`] per record and the legend. The scene is immutable once
//! built; output formats (SVG, HTML, PNG) only read it.

use std::collections::HashMap;
use std::path::Path;

use heatmap_common::{month_name, Dataset, HeatmapError, HeatmapResult, MONTHS_PER_YEAR};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::axis::{decade_years, Axis, Orientation};
use crate::color::{interpolate_rd_yl_bu, Color};
use crate::legend::{Legend, LegendConfig};
use crate::scale::{BandScale, Scale, SequentialScale};
use crate::tooltip::TooltipConfig;

/// Most year columns a chart may have; one band is laid out per year.
pub const MAX_YEAR_SPAN: i64 = 10_000;

/// Space reserved around the plot area.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Margins {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Default for Margins {
    fn default() -> Self {
        Self {
            top: 50.0,
            right: 20.0,
            bottom: 100.0,
            left: 80.0,
        }
    }
}

/// Chart layout configuration, loadable from YAML.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    /// Overall scene width including margins
    pub width: f64,
    /// Overall scene height including margins
    pub height: f64,
    pub margin: Margins,
    /// Label every n-th year on the x axis
    pub year_tick_interval: i32,
    pub legend: LegendConfig,
    pub tooltip: TooltipConfig,
    /// Id of the element hosting the chart in the HTML page
    pub container_id: String,
    /// Id of the tooltip element in the HTML page
    pub tooltip_id: String,
    pub title: Option<String>,
    pub description: Option<String>,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: 1200.0,
            height: 600.0,
            margin: Margins::default(),
            year_tick_interval: 10,
            legend: LegendConfig::default(),
            tooltip: TooltipConfig::default(),
            container_id: "chart".to_string(),
            tooltip_id: "tooltip".to_string(),
            title: Some("Monthly Global Land-Surface Temperature".to_string()),
            description: None,
        }
    }
}

impl ChartConfig {
    /// Parse configuration from YAML; missing keys take their defaults.
    pub fn from_yaml(yaml: &str) -> HeatmapResult<Self> {
        let config: Self =
            serde_yaml::from_str(yaml).map_err(|e| HeatmapError::ConfigError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a YAML file.
    pub fn from_file(path: impl AsRef<Path>) -> HeatmapResult<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            HeatmapError::ConfigError(format!("{}: {}", path.display(), e))
        })?;
        Self::from_yaml(&contents)
    }

    /// Width of the plot area inside the margins.
    pub fn inner_width(&self) -> f64 {
        self.width - self.margin.left - self.margin.right
    }

    /// Height of the plot area inside the margins.
    pub fn inner_height(&self) -> f64 {
        self.height - self.margin.top - self.margin.bottom
    }

    pub fn validate(&self) -> HeatmapResult<()> {
        if !(self.inner_width() > 0.0) || !(self.inner_height() > 0.0) {
            return Err(HeatmapError::ConfigError(format!(
                "margins leave no plot area ({}x{})",
                self.inner_width(),
                self.inner_height()
            )));
        }
        if self.legend.swatches == 0 {
            return Err(HeatmapError::ConfigError(
                "legend needs at least one swatch".to_string(),
            ));
        }
        if self.year_tick_interval <= 0 {
            return Err(HeatmapError::ConfigError(
                "year_tick_interval must be positive".to_string(),
            ));
        }
        if self.container_id.is_empty() || self.tooltip_id.is_empty() {
            return Err(HeatmapError::ConfigError(
                "element ids must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Temperature color scale over the red-yellow-blue ramp.
pub type TemperatureScale = SequentialScale<fn(f64) -> Color>;

/// One rectangle of the grid.
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    pub year: i32,
    /// 0-indexed month
    pub month: usize,
    pub variance: f64,
    /// Base temperature plus variance
    pub temperature: f64,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub fill: Color,
}

impl Cell {
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.x && x < self.x + self.width && y >= self.y && y < self.y + self.height
    }
}

/// The fully laid out chart.
#[derive(Debug, Clone)]
pub struct HeatMap {
    pub config: ChartConfig,
    pub base_temperature: f64,
    pub x_scale: BandScale<i32>,
    pub y_scale: BandScale<usize>,
    pub color_scale: TemperatureScale,
    pub x_axis: Axis,
    pub y_axis: Axis,
    pub cells: Vec<Cell>,
    pub legend: Legend,
    /// (year, month) -> index of the topmost cell at that slot
    slots: HashMap<(i32, usize), usize>,
}

impl HeatMap {
    /// Lay out the chart for a dataset.
    ///
    /// Fails with [`HeatmapError::EmptyDataset`] when there are no records and
    /// with [`HeatmapError::OutOfDomain`] for a record whose month is not 1..=12.
    pub fn build(dataset: &Dataset, config: &ChartConfig) -> HeatmapResult<Self> {
        config.validate()?;
        dataset.validate()?;

        let (min_year, max_year) = dataset.year_range().ok_or(HeatmapError::EmptyDataset)?;
        let (min_temp, max_temp) = dataset
            .temperature_range()
            .ok_or(HeatmapError::EmptyDataset)?;

        let span = i64::from(max_year) - i64::from(min_year) + 1;
        if span > MAX_YEAR_SPAN {
            let index = dataset
                .monthly_variance
                .iter()
                .position(|r| r.year == max_year)
                .unwrap_or_default();
            return Err(HeatmapError::OutOfDomain {
                index,
                message: format!(
                    "year {} is {} years after {}, more than the {} column limit",
                    max_year,
                    span - 1,
                    min_year,
                    MAX_YEAR_SPAN
                ),
            });
        }

        let width = config.inner_width();
        let height = config.inner_height();

        let x_scale = BandScale::new((min_year..=max_year).collect(), (0.0, width));
        let y_scale = BandScale::new((0..MONTHS_PER_YEAR).collect(), (0.0, height));

        // Warmest temperature sits at the red end of the ramp
        let color_scale: TemperatureScale =
            SequentialScale::new((max_temp, min_temp), interpolate_rd_yl_bu as fn(f64) -> Color);

        let x_axis = Axis::for_band(
            Orientation::Bottom,
            &x_scale,
            decade_years(x_scale.domain(), config.year_tick_interval),
            |year| year.to_string(),
        );
        let y_axis = Axis::for_band(Orientation::Left, &y_scale, 0..MONTHS_PER_YEAR, |month| {
            month_name(*month).unwrap_or_default().to_string()
        });

        let base = dataset.base_temperature;
        let mut cells = Vec::with_capacity(dataset.len());
        let mut slots = HashMap::with_capacity(dataset.len());
        for (index, record) in dataset.monthly_variance.iter().enumerate() {
            let month = record.month_index().ok_or_else(|| HeatmapError::OutOfDomain {
                index,
                message: format!("month {} is not in 1..=12", record.month),
            })?;
            let x = x_scale
                .apply(&record.year)
                .ok_or_else(|| HeatmapError::OutOfDomain {
                    index,
                    message: format!("year {} is outside {}..={}", record.year, min_year, max_year),
                })?;
            let y = y_scale.apply(&month).ok_or_else(|| HeatmapError::OutOfDomain {
                index,
                message: format!("month index {}", month),
            })?;

            let temperature = record.temperature(base);
            cells.push(Cell {
                year: record.year,
                month,
                variance: record.variance,
                temperature,
                x,
                y,
                width: x_scale.bandwidth(),
                height: y_scale.bandwidth(),
                fill: color_scale.apply(temperature),
            });
            slots.insert((record.year, month), index);
        }

        let legend = Legend::build(&color_scale, width, height, &config.legend);

        debug!(
            cells = cells.len(),
            min_year,
            max_year,
            min_temp,
            max_temp,
            "Heat map laid out"
        );

        Ok(Self {
            config: config.clone(),
            base_temperature: base,
            x_scale,
            y_scale,
            color_scale,
            x_axis,
            y_axis,
            cells,
            legend,
            slots,
        })
    }

    /// Index of the cell under a point in plot-area coordinates.
    pub fn cell_at(&self, x: f64, y: f64) -> Option<usize> {
        let year = *self.x_scale.invert(x)?;
        let month = *self.y_scale.invert(y)?;
        self.slots.get(&(year, month)).copied()
    }

    /// Index of the cell under a point in scene coordinates (margins included).
    pub fn pointer_to_cell(&self, x: f64, y: f64) -> Option<usize> {
        self.cell_at(x - self.config.margin.left, y - self.config.margin.top)
    }

    /// Index of the cell for a given year and 0-indexed month.
    pub fn find_cell(&self, year: i32, month: usize) -> Option<usize> {
        self.slots.get(&(year, month)).copied()
    }
}

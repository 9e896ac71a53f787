//! Global monthly temperature variance dataset.
//!
//! Mirrors the JSON document published with the base temperature and a
//! sequence of per-month deviations from it:
//!
//! ```json
//! {
//!   "baseTemperature": 8.66,
//!   "monthlyVariance": [{ "year": 1753, "month": 1, "variance": -1.366 }]
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{HeatmapError, HeatmapResult};
use crate::month::MONTHS_PER_YEAR;

/// The complete dataset as published.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    /// Reference temperature in degrees Celsius
    pub base_temperature: f64,

    /// Records in publication order
    pub monthly_variance: Vec<MonthlyVariance>,
}

/// One month of one year.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MonthlyVariance {
    pub year: i32,
    /// 1-indexed month as published (1 = January)
    pub month: u32,
    /// Deviation from the base temperature
    pub variance: f64,
}

impl MonthlyVariance {
    pub fn new(year: i32, month: u32, variance: f64) -> Self {
        Self {
            year,
            month,
            variance,
        }
    }

    /// 0-indexed month, or `None` when the record's month is not 1..=12.
    pub fn month_index(&self) -> Option<usize> {
        let month = self.month as usize;
        if (1..=MONTHS_PER_YEAR).contains(&month) {
            Some(month - 1)
        } else {
            None
        }
    }

    /// Absolute temperature for this record.
    pub fn temperature(&self, base_temperature: f64) -> f64 {
        base_temperature + self.variance
    }
}

/// Aggregate facts about a dataset, used for logging and status output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetSummary {
    pub base_temperature: f64,
    pub records: usize,
    pub min_year: Option<i32>,
    pub max_year: Option<i32>,
    pub min_temperature: Option<f64>,
    pub max_temperature: Option<f64>,
}

impl Dataset {
    pub fn new(base_temperature: f64, monthly_variance: Vec<MonthlyVariance>) -> Self {
        Self {
            base_temperature,
            monthly_variance,
        }
    }

    /// Parse a dataset from a JSON string.
    ///
    /// Only the document structure is checked here; values are taken as-is.
    pub fn from_json(json: &str) -> HeatmapResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parse a dataset from raw JSON bytes.
    pub fn from_slice(bytes: &[u8]) -> HeatmapResult<Self> {
        Ok(serde_json::from_slice(bytes)?)
    }

    /// Reject datasets that cannot produce a chart.
    ///
    /// An empty record sequence leaves the year domain undefined.
    pub fn validate(&self) -> HeatmapResult<()> {
        if self.monthly_variance.is_empty() {
            return Err(HeatmapError::EmptyDataset);
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.monthly_variance.len()
    }

    pub fn is_empty(&self) -> bool {
        self.monthly_variance.is_empty()
    }

    /// Smallest and largest year over all records.
    pub fn year_range(&self) -> Option<(i32, i32)> {
        let mut years = self.monthly_variance.iter().map(|r| r.year);
        let first = years.next()?;
        Some(years.fold((first, first), |(min, max), y| (min.min(y), max.max(y))))
    }

    /// Smallest and largest absolute temperature over all records.
    pub fn temperature_range(&self) -> Option<(f64, f64)> {
        let base = self.base_temperature;
        let mut temps = self.monthly_variance.iter().map(|r| r.temperature(base));
        let first = temps.next()?;
        Some(temps.fold((first, first), |(min, max), t| (min.min(t), max.max(t))))
    }

    pub fn summary(&self) -> DatasetSummary {
        let years = self.year_range();
        let temps = self.temperature_range();
        DatasetSummary {
            base_temperature: self.base_temperature,
            records: self.len(),
            min_year: years.map(|(min, _)| min),
            max_year: years.map(|(_, max)| max),
            min_temperature: temps.map(|(min, _)| min),
            max_temperature: temps.map(|(_, max)| max),
        }
    }
}

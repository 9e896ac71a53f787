//! Test data generators for synthetic monthly variance series.
//!
//! The generated values follow a fixed formula so tests can predict ranges
//! without storing large fixtures.

use heatmap_common::{Dataset, MonthlyVariance};

/// Variance for a given year and 1-indexed month.
///
/// A slow warming trend plus a seasonal swing, bounded to about +/-3 degrees.
pub fn synthetic_variance(year: i32, month: u32, first_year: i32) -> f64 {
    let trend = (year - first_year) as f64 * 0.005;
    let season = ((month as f64 - 1.0) / 12.0 * std::f64::consts::TAU).sin() * 1.5;
    ((trend + season) * 1000.0).round() / 1000.0 - 0.5
}

/// Creates a complete series covering every month of `first_year..=last_year`.
///
/// # Example
///
/// ```
/// use test_utils::create_monthly_dataset;
///
/// let dataset = create_monthly_dataset(1900, 1909, 8.66);
/// assert_eq!(dataset.len(), 120);
/// assert_eq!(dataset.year_range(), Some((1900, 1909)));
/// ```
pub fn create_monthly_dataset(first_year: i32, last_year: i32, base_temperature: f64) -> Dataset {
    let mut records = Vec::new();
    for year in first_year..=last_year {
        for month in 1..=12 {
            records.push(MonthlyVariance::new(
                year,
                month,
                synthetic_variance(year, month, first_year),
            ));
        }
    }
    Dataset::new(base_temperature, records)
}

/// Same shape as the published series: 1753-01 through 2015-09.
pub fn create_published_shape_dataset() -> Dataset {
    let mut dataset = create_monthly_dataset(1753, 2015, 8.66);
    // The published series stops in September 2015
    dataset
        .monthly_variance
        .retain(|r| !(r.year == 2015 && r.month > 9));
    dataset
}

/// Serialize a dataset back to the published JSON shape.
pub fn dataset_to_json(dataset: &Dataset) -> String {
    serde_json::to_string(dataset).expect("Dataset serializes to JSON")
}

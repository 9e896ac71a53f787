//! Common test fixtures for heat map tests.
//!
//! Small hand-written datasets whose rendered output is easy to predict.

use heatmap_common::{Dataset, MonthlyVariance};

/// Two records far apart in time: 1900-01 at 6.0 and 2000-06 at 9.5.
pub const TWO_RECORD_JSON: &str = r#"{
  "baseTemperature": 8.0,
  "monthlyVariance": [
    { "year": 1900, "month": 1, "variance": -2.0 },
    { "year": 2000, "month": 6, "variance": 1.5 }
  ]
}"#;

/// A well-formed document with no records.
pub const EMPTY_JSON: &str = r#"{ "baseTemperature": 8.66, "monthlyVariance": [] }"#;

/// The opening months of the published series.
pub const PUBLISHED_HEAD_JSON: &str = r#"{
  "baseTemperature": 8.66,
  "monthlyVariance": [
    { "year": 1753, "month": 1, "variance": -1.366 },
    { "year": 1753, "month": 2, "variance": -2.223 },
    { "year": 1753, "month": 3, "variance": 0.211 },
    { "year": 1753, "month": 4, "variance": -0.843 },
    { "year": 1753, "month": 5, "variance": -0.771 },
    { "year": 1753, "month": 6, "variance": -0.546 }
  ]
}"#;

/// Dataset form of [`TWO_RECORD_JSON`].
pub fn two_record_dataset() -> Dataset {
    Dataset::new(
        8.0,
        vec![
            MonthlyVariance::new(1900, 1, -2.0),
            MonthlyVariance::new(2000, 6, 1.5),
        ],
    )
}

/// A single record; the color domain collapses to one value.
pub fn single_record_dataset() -> Dataset {
    Dataset::new(8.66, vec![MonthlyVariance::new(1753, 1, -1.366)])
}

/// Dataset with a record whose month is outside 1..=12.
pub fn bad_month_dataset() -> Dataset {
    Dataset::new(
        8.0,
        vec![
            MonthlyVariance::new(1900, 1, 0.0),
            MonthlyVariance::new(1900, 13, 0.0),
        ],
    )
}

//! Tests for dataset parsing and derived ranges.

use heatmap_common::{Dataset, HeatmapError, MonthlyVariance};

const SCENARIO_JSON: &str = r#"{
    "baseTemperature": 8.0,
    "monthlyVariance": [
        {"year": 1900, "month": 1, "variance": -2.0},
        {"year": 2000, "month": 6, "variance": 1.5}
    ]
}"#;

// ============================================================================
// Parsing tests
// ============================================================================

#[test]
fn test_parse_camel_case_document() {
    let dataset = Dataset::from_json(SCENARIO_JSON).unwrap();
    assert_eq!(dataset.base_temperature, 8.0);
    assert_eq!(dataset.len(), 2);
    assert_eq!(dataset.monthly_variance[0], MonthlyVariance::new(1900, 1, -2.0));
    assert_eq!(dataset.monthly_variance[1], MonthlyVariance::new(2000, 6, 1.5));
}

#[test]
fn test_parse_from_bytes() {
    let dataset = Dataset::from_slice(SCENARIO_JSON.as_bytes()).unwrap();
    assert_eq!(dataset.len(), 2);
}

#[test]
fn test_parse_preserves_record_order() {
    let json = r#"{"baseTemperature": 0.0, "monthlyVariance": [
        {"year": 2001, "month": 3, "variance": 0.1},
        {"year": 1999, "month": 2, "variance": 0.2},
        {"year": 2000, "month": 1, "variance": 0.3}
    ]}"#;
    let dataset = Dataset::from_json(json).unwrap();
    let years: Vec<i32> = dataset.monthly_variance.iter().map(|r| r.year).collect();
    assert_eq!(years, vec![2001, 1999, 2000]);
}

#[test]
fn test_parse_missing_field_is_parse_error() {
    let json = r#"{"baseTemperature": 8.0, "monthlyVariance": [{"year": 1900, "month": 1}]}"#;
    let err = Dataset::from_json(json).unwrap_err();
    assert!(matches!(err, HeatmapError::ParseError(_)));
}

#[test]
fn test_parse_non_json_body() {
    let err = Dataset::from_json("<html>not found</html>").unwrap_err();
    assert!(err.is_load_failure());
}

#[test]
fn test_parse_ignores_unknown_fields() {
    let json = r#"{"baseTemperature": 8.66, "source": "x", "monthlyVariance": []}"#;
    let dataset = Dataset::from_json(json).unwrap();
    assert!(dataset.is_empty());
}

// ============================================================================
// Validation tests
// ============================================================================

#[test]
fn test_validate_rejects_empty() {
    let dataset = Dataset::new(8.0, vec![]);
    assert!(matches!(dataset.validate(), Err(HeatmapError::EmptyDataset)));
}

#[test]
fn test_validate_accepts_single_record() {
    let dataset = Dataset::new(8.0, vec![MonthlyVariance::new(1753, 1, -1.366)]);
    assert!(dataset.validate().is_ok());
}

// ============================================================================
// Range tests
// ============================================================================

#[test]
fn test_year_range() {
    let dataset = Dataset::from_json(SCENARIO_JSON).unwrap();
    assert_eq!(dataset.year_range(), Some((1900, 2000)));
}

#[test]
fn test_temperature_range_uses_base_plus_variance() {
    let dataset = Dataset::from_json(SCENARIO_JSON).unwrap();
    assert_eq!(dataset.temperature_range(), Some((6.0, 9.5)));
}

#[test]
fn test_record_temperature() {
    let record = MonthlyVariance::new(1900, 1, -2.0);
    assert_eq!(record.temperature(8.0), 6.0);
}

#[test]
fn test_summary() {
    let dataset = Dataset::from_json(SCENARIO_JSON).unwrap();
    let summary = dataset.summary();
    assert_eq!(summary.records, 2);
    assert_eq!(summary.min_year, Some(1900));
    assert_eq!(summary.max_year, Some(2000));
    assert_eq!(summary.min_temperature, Some(6.0));
    assert_eq!(summary.max_temperature, Some(9.5));
}

#[test]
fn test_summary_of_empty_dataset() {
    let summary = Dataset::new(8.0, vec![]).summary();
    assert_eq!(summary.records, 0);
    assert_eq!(summary.min_year, None);
    assert_eq!(summary.max_temperature, None);
}

//! Fixtures and helpers for heat map tests.
//!
//! - [`fixtures`]: small datasets with hand-checked rendering (the 1900/2000
//!   two-record chart, an empty document, the first months of 1753)
//! - [`generators`]: full monthly grids shaped like the published series
//! - [`paths`]: locating an optional local copy of `global-temperature.json`
//!   and scratch directories for loader tests
//!
//! Pulled in as a dev-dependency by `renderer` and the `heatmap` service.

pub mod fixtures;
pub mod generators;
pub mod paths;

pub use fixtures::*;
pub use generators::*;
pub use paths::*;

/// Resolve a dataset file via [`find_test_file`], or end the test early.
///
/// The published JSON is not checked in; tests that read it pass silently
/// unless a copy is placed under `testdata/` or `TEST_DATA_DIR`.
#[macro_export]
macro_rules! require_test_file {
    ($name:expr) => {{
        match $crate::find_test_file($name) {
            Some(path) => path,
            None => {
                eprintln!(
                    "skipping: {} not found (save the published dataset under testdata/ or point TEST_DATA_DIR at it)",
                    $name
                );
                return;
            }
        }
    }};
}

/// Assert that two numbers differ by at most `epsilon`.
#[macro_export]
macro_rules! assert_approx_eq {
    ($left:expr, $right:expr, $epsilon:expr) => {{
        let (left, right, epsilon) = ($left as f64, $right as f64, $epsilon as f64);
        let diff = (left - right).abs();
        assert!(
            diff <= epsilon,
            "expected {} within {} of {} (off by {})",
            left,
            epsilon,
            right,
            diff
        );
    }};
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_approx_eq_within_epsilon() {
        assert_approx_eq!(8.66, 8.6600001, 1e-6);
        assert_approx_eq!(-2.0, -2.0, 0.0);
    }

    #[test]
    #[should_panic(expected = "off by")]
    fn test_approx_eq_outside_epsilon() {
        assert_approx_eq!(9.5, 9.4, 0.01);
    }

    #[test]
    fn test_missing_file_skips() {
        fn lookup(found: &mut bool) {
            let _path = require_test_file!("no-such-dataset-5f2a.json");
            *found = true;
        }
        let mut found = false;
        lookup(&mut found);
        assert!(!found);
    }
}

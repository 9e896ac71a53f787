//! Axis generation: tick placement and labels for band and linear scales.

use std::hash::Hash;

use crate::scale::{BandScale, LinearScale, Scale};

/// Side of the plot the axis is drawn on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Bottom,
    Left,
}

/// A single labelled tick.
#[derive(Debug, Clone, PartialEq)]
pub struct Tick {
    pub label: String,
    /// Offset along the axis in chart units
    pub position: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Axis {
    pub orientation: Orientation,
    pub ticks: Vec<Tick>,
    /// Extent of the domain line
    pub range: (f64, f64),
    /// Length of the tick marks
    pub tick_size: f64,
    /// Gap between tick mark and label
    pub tick_padding: f64,
}

impl Axis {
    fn with_ticks(orientation: Orientation, range: (f64, f64), ticks: Vec<Tick>) -> Self {
        Self {
            orientation,
            ticks,
            range,
            tick_size: 6.0,
            tick_padding: 3.0,
        }
    }

    /// Axis for a band scale; each tick sits at the center of its band.
    ///
    /// Values outside the scale's domain are skipped.
    pub fn for_band<T, F>(
        orientation: Orientation,
        scale: &BandScale<T>,
        values: impl IntoIterator<Item = T>,
        format: F,
    ) -> Self
    where
        T: Clone + Eq + Hash,
        F: Fn(&T) -> String,
    {
        let offset = scale.bandwidth() / 2.0;
        let ticks = values
            .into_iter()
            .filter_map(|value| {
                scale.apply(&value).map(|start| Tick {
                    label: format(&value),
                    position: start + offset,
                })
            })
            .collect();
        Self::with_ticks(orientation, scale.range(), ticks)
    }

    /// Axis for a linear scale with explicit tick values.
    pub fn for_linear<F>(
        orientation: Orientation,
        scale: &LinearScale,
        values: impl IntoIterator<Item = f64>,
        format: F,
    ) -> Self
    where
        F: Fn(f64) -> String,
    {
        let ticks = values
            .into_iter()
            .filter_map(|value| {
                scale.apply(&value).map(|position| Tick {
                    label: format(value),
                    position,
                })
            })
            .collect();
        Self::with_ticks(orientation, scale.range(), ticks)
    }

    pub fn labels(&self) -> Vec<&str> {
        self.ticks.iter().map(|t| t.label.as_str()).collect()
    }
}

/// Years of `domain` that fall on a multiple of `interval`.
pub fn decade_years(domain: &[i32], interval: i32) -> Vec<i32> {
    if interval <= 0 {
        return Vec::new();
    }
    domain
        .iter()
        .copied()
        .filter(|year| year.rem_euclid(interval) == 0)
        .collect()
}

/// Fixed-precision label with halves rounded away from zero, so
/// `format_fixed(2.25, 1) == "2.3"` and `format_fixed(8.125, 2) == "8.13"`.
///
/// Rounding is done on the exact decimal expansion of the `f64`, which is
/// what browsers do for `toFixed`. Never yields a negative zero.
pub fn format_fixed(value: f64, precision: usize) -> String {
    if !value.is_finite() {
        return format!("{:.*}", precision, value);
    }

    // 1074 fractional digits spell out any f64 exactly
    let exact = format!("{:.1074}", value.abs());
    let (int_part, frac_part) = exact.split_at(exact.find('.').unwrap_or(exact.len()));
    let frac_part = frac_part.trim_start_matches('.').as_bytes();

    let mut digits: Vec<u8> = int_part.bytes().collect();
    digits.extend(frac_part.iter().take(precision));

    if frac_part.get(precision).map_or(false, |&d| d >= b'5') {
        let mut carry = true;
        for digit in digits.iter_mut().rev() {
            if *digit == b'9' {
                *digit = b'0';
            } else {
                *digit += 1;
                carry = false;
                break;
            }
        }
        if carry {
            digits.insert(0, b'1');
        }
    }

    let int_len = digits.len() - precision;
    let mut out = String::with_capacity(digits.len() + 2);
    if value < 0.0 && digits.iter().any(|&d| d != b'0') {
        out.push('-');
    }
    out.extend(digits[..int_len].iter().map(|&d| d as char));
    if precision > 0 {
        out.push('.');
        out.extend(digits[int_len..].iter().map(|&d| d as char));
    }
    out
}

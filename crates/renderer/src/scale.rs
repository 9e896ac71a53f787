//! Scales mapping data values onto chart coordinates and colors.
//!
//! - [`BandScale`]: ordinal values (years, months) onto equal-width bands
//! - [`LinearScale`]: continuous values onto a pixel range, with "nice" ticks
//! - [`SequentialScale`]: continuous values onto a color ramp

use std::collections::HashMap;
use std::hash::Hash;

use crate::color::Color;

/// A mapping from a data domain onto a pixel range.
pub trait Scale {
    type Domain: ?Sized;

    /// Output extent as `(start, end)`.
    fn range(&self) -> (f64, f64);

    /// Map a domain value to a pixel position; `None` when the value is not
    /// part of the domain.
    fn apply(&self, value: &Self::Domain) -> Option<f64>;
}

/// Discrete scale with zero padding: adjacent bands touch edge to edge.
#[derive(Debug, Clone)]
pub struct BandScale<T> {
    domain: Vec<T>,
    index: HashMap<T, usize>,
    range: (f64, f64),
    step: f64,
}

impl<T> BandScale<T>
where
    T: Clone + Eq + Hash,
{
    pub fn new(domain: Vec<T>, range: (f64, f64)) -> Self {
        let mut index = HashMap::with_capacity(domain.len());
        for (i, value) in domain.iter().enumerate() {
            // First occurrence wins, duplicate values share a band
            index.entry(value.clone()).or_insert(i);
        }

        let (start, stop) = ordered(range);
        let step = (stop - start) / domain.len().max(1) as f64;

        Self {
            domain,
            index,
            range,
            step,
        }
    }

    pub fn domain(&self) -> &[T] {
        &self.domain
    }

    /// Width of a single band.
    pub fn bandwidth(&self) -> f64 {
        self.step
    }

    /// Domain value whose band contains `position`.
    pub fn invert(&self, position: f64) -> Option<&T> {
        let (start, stop) = ordered(self.range);
        if self.domain.is_empty() || position < start || position >= stop {
            return None;
        }
        let slot = ((position - start) / self.step).floor() as usize;
        let slot = slot.min(self.domain.len() - 1);
        let i = if self.range.1 < self.range.0 {
            self.domain.len() - 1 - slot
        } else {
            slot
        };
        self.domain.get(i)
    }
}

impl<T> Scale for BandScale<T>
where
    T: Clone + Eq + Hash,
{
    type Domain = T;

    fn range(&self) -> (f64, f64) {
        self.range
    }

    fn apply(&self, value: &T) -> Option<f64> {
        let i = *self.index.get(value)?;
        let (start, _) = ordered(self.range);
        // A reversed range lays the bands out from the far end
        let slot = if self.range.1 < self.range.0 {
            self.domain.len() - 1 - i
        } else {
            i
        };
        Some(start + self.step * slot as f64)
    }
}

fn ordered((a, b): (f64, f64)) -> (f64, f64) {
    if b < a {
        (b, a)
    } else {
        (a, b)
    }
}

/// Continuous linear scale. The domain may be inverted (`d0 > d1`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain: (f64, f64),
    range: (f64, f64),
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    /// Map a value; a degenerate domain maps everything to the range midpoint.
    pub fn map(&self, value: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let span = d1 - d0;
        let t = if span == 0.0 || span.is_nan() {
            0.5
        } else {
            (value - d0) / span
        };
        r0 + t * (r1 - r0)
    }

    /// Roughly `count` evenly spaced round values inside the domain, in
    /// domain order.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        ticks(self.domain.0, self.domain.1, count as f64)
    }
}

impl Scale for LinearScale {
    type Domain = f64;

    fn range(&self) -> (f64, f64) {
        self.range
    }

    fn apply(&self, value: &f64) -> Option<f64> {
        let mapped = self.map(*value);
        (!mapped.is_nan()).then_some(mapped)
    }
}

const E10: f64 = 7.0710678118654755; // sqrt(50)
const E5: f64 = 3.1622776601683795; // sqrt(10)
const E2: f64 = 1.4142135623730951; // sqrt(2)

/// Tick values between `start` and `stop` at a step of 1, 2 or 5 times a
/// power of ten. Descending when `stop < start`.
pub fn ticks(start: f64, stop: f64, count: f64) -> Vec<f64> {
    if !(count > 0.0) || start.is_nan() || stop.is_nan() {
        return Vec::new();
    }
    if start == stop {
        return vec![start];
    }

    let reverse = stop < start;
    let (i1, i2, inc) = if reverse {
        tick_spec(stop, start, count)
    } else {
        tick_spec(start, stop, count)
    };
    if !(i2 >= i1) {
        return Vec::new();
    }

    let n = (i2 - i1) as usize + 1;
    let value = |k: f64| if inc < 0.0 { k / -inc } else { k * inc };
    (0..n)
        .map(|i| {
            if reverse {
                value(i2 - i as f64)
            } else {
                value(i1 + i as f64)
            }
        })
        .collect()
}

fn tick_spec(start: f64, stop: f64, count: f64) -> (f64, f64, f64) {
    let step = (stop - start) / count.max(0.0);
    let power = step.log10().floor();
    let error = step / 10f64.powf(power);
    let factor = if error >= E10 {
        10.0
    } else if error >= E5 {
        5.0
    } else if error >= E2 {
        2.0
    } else {
        1.0
    };

    let (mut i1, mut i2, inc);
    if power < 0.0 {
        let scaled = 10f64.powf(-power) / factor;
        i1 = round_half_up(start * scaled);
        i2 = round_half_up(stop * scaled);
        if i1 / scaled < start {
            i1 += 1.0;
        }
        if i2 / scaled > stop {
            i2 -= 1.0;
        }
        inc = -scaled;
    } else {
        let scaled = 10f64.powf(power) * factor;
        i1 = round_half_up(start / scaled);
        i2 = round_half_up(stop / scaled);
        if i1 * scaled < start {
            i1 += 1.0;
        }
        if i2 * scaled > stop {
            i2 -= 1.0;
        }
        inc = scaled;
    }

    if i2 < i1 && (0.5..2.0).contains(&count) {
        return tick_spec(start, stop, count * 2.0);
    }
    (i1, i2, inc)
}

fn round_half_up(x: f64) -> f64 {
    (x + 0.5).floor()
}

/// Continuous scale onto a color ramp.
///
/// The domain is taken literally, so `(max, min)` maps the maximum onto the
/// start of the ramp.
#[derive(Clone)]
pub struct SequentialScale<I> {
    domain: (f64, f64),
    interpolator: I,
}

impl<I> SequentialScale<I>
where
    I: Fn(f64) -> Color,
{
    pub fn new(domain: (f64, f64), interpolator: I) -> Self {
        Self {
            domain,
            interpolator,
        }
    }

    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    /// Position of `value` along the ramp, 0.5 for a degenerate domain.
    pub fn normalize(&self, value: f64) -> f64 {
        let (d0, d1) = self.domain;
        if d0 == d1 {
            0.5
        } else {
            (value - d0) / (d1 - d0)
        }
    }

    pub fn apply(&self, value: f64) -> Color {
        (self.interpolator)(self.normalize(value))
    }
}

impl<I> std::fmt::Debug for SequentialScale<I> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SequentialScale")
            .field("domain", &self.domain)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_scale_edges_touch() {
        let scale = BandScale::new(vec![0usize, 1, 2, 3], (0.0, 100.0));
        assert_eq!(scale.bandwidth(), 25.0);
        assert_eq!(scale.apply(&0), Some(0.0));
        assert_eq!(scale.apply(&3), Some(75.0));
        assert_eq!(scale.apply(&4), None);
    }

    #[test]
    fn test_band_scale_reversed_range() {
        let scale = BandScale::new(vec!['a', 'b'], (100.0, 0.0));
        assert_eq!(scale.apply(&'a'), Some(50.0));
        assert_eq!(scale.apply(&'b'), Some(0.0));
        assert_eq!(scale.invert(10.0), Some(&'b'));
    }

    #[test]
    fn test_ticks_basic() {
        assert_eq!(ticks(0.0, 10.0, 5.0), vec![0.0, 2.0, 4.0, 6.0, 8.0, 10.0]);
        assert_eq!(ticks(10.0, 0.0, 5.0), vec![10.0, 8.0, 6.0, 4.0, 2.0, 0.0]);
    }

    #[test]
    fn test_ticks_fractional() {
        assert_eq!(ticks(0.0, 1.0, 10.0), vec![0.0, 0.1, 0.2, 0.3, 0.4, 0.5, 0.6, 0.7, 0.8, 0.9, 1.0]);
    }

    #[test]
    fn test_ticks_degenerate() {
        assert_eq!(ticks(3.0, 3.0, 10.0), vec![3.0]);
        assert!(ticks(0.0, 1.0, 0.0).is_empty());
    }
}

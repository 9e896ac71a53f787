//! Month naming for axis labels and tooltips.

use chrono::Month;

pub const MONTHS_PER_YEAR: usize = 12;

/// Full English name for a 0-indexed month (0 = January).
pub fn month_name(index: usize) -> Option<&'static str> {
    let number = u8::try_from(index.checked_add(1)?).ok()?;
    Month::try_from(number).ok().map(|m| m.name())
}

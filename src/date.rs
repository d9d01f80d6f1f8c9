//! Plain calendar date values and their structural bounds.
//!
//! These are value triples, compared and passed by value. Structural validity
//! (field bounds) lives here; whether a date is actually covered by the
//! reference table is the engine's concern.

use core::fmt;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

#[cfg(feature = "wasm")]
use wasm_bindgen::prelude::*;

use crate::{Dom, Month, Year};

/// First Hijri year accepted as structurally valid input.
pub const HIJRI_YEAR_MIN: Year = 1300;

/// Last Hijri year accepted as structurally valid input.
pub const HIJRI_YEAR_MAX: Year = 1500;

/// First Gregorian year accepted as structurally valid input.
pub const GREGORIAN_YEAR_MIN: Year = 1900;

/// Last Gregorian year accepted as structurally valid input.
pub const GREGORIAN_YEAR_MAX: Year = 2100;

/// Which calendar a `{year, month, day}` triple belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Calendar {
    Gregorian,
    Hijri,
}

impl fmt::Display for Calendar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Gregorian => "Gregorian",
            Self::Hijri => "Hijri",
        })
    }
}

/// A day on the Hijri (Islamic lunar) calendar.
///
/// Ordering is lexicographic by `(year, month, day)`.
#[cfg_attr(feature = "wasm", wasm_bindgen)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct HijriDate {
    pub year: Year,
    pub month: Month,
    pub day: Dom,
}

impl HijriDate {
    /// Bundle a year, month and day without any validation.
    pub const fn new(year: Year, month: Month, day: Dom) -> Self {
        Self { year, month, day }
    }

    /// Field bounds only: year in the supported band, month 1..=12, day 1..=30.
    ///
    /// Day 30 of a 29-day month passes this check; only a table lookup can
    /// tell those apart.
    pub const fn in_structural_bounds(&self) -> bool {
        self.year >= HIJRI_YEAR_MIN
            && self.year <= HIJRI_YEAR_MAX
            && self.month >= 1
            && self.month <= 12
            && self.day >= 1
            && self.day <= 30
    }
}

impl fmt::Display for HijriDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.year, self.month, self.day)
    }
}

/// A day on the Gregorian calendar.
///
/// Ordering is lexicographic by `(year, month, day)`.
#[cfg_attr(feature = "wasm", wasm_bindgen)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct GregorianDate {
    pub year: Year,
    pub month: Month,
    pub day: Dom,
}

impl GregorianDate {
    /// Bundle a year, month and day without any validation.
    pub const fn new(year: Year, month: Month, day: Dom) -> Self {
        Self { year, month, day }
    }

    /// Field bounds only: year in the supported band, month 1..=12, day 1..=31.
    pub const fn in_structural_bounds(&self) -> bool {
        self.year >= GREGORIAN_YEAR_MIN
            && self.year <= GREGORIAN_YEAR_MAX
            && self.month >= 1
            && self.month <= 12
            && self.day >= 1
            && self.day <= 31
    }

    /// The same day as a [`NaiveDate`], or `None` for days that do not exist
    /// on the real calendar (February 30th and the like).
    pub fn to_naive(self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month as u32, self.day as u32)
    }
}

impl From<NaiveDate> for GregorianDate {
    fn from(value: NaiveDate) -> Self {
        Self {
            year: value.year(),
            month: value.month() as Month,
            day: value.day() as Dom,
        }
    }
}

impl fmt::Display for GregorianDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

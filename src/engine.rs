//! Stateless Gregorian/Hijri conversion over the shared reference table.
//!
//! Both directions are pure functions of their inputs and the immutable
//! table: a table lookup, a day-offset inside the matched month, and the
//! profile's signed adjustment with month/year rollover. Offsets never exceed
//! two days, so at most one month boundary is crossed in either direction;
//! month 12->1 and 1->12 are the only wrap points.

use chrono::{Days, Local};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::date::{Calendar, GregorianDate, HijriDate};
use crate::profile::{CountryProfile, MAX_OFFSET_DAYS};
use crate::table::{ReferenceTable, TableError, month_key};
use crate::{Dom, Month, Year};

/// Day count assumed for the month just below the table's first record.
///
/// Rolling backwards off the very start of the table has no record to
/// consult; 29 is the documented assumption. A missing month anywhere
/// *inside* the covered range is never papered over this way, it is a
/// [`ConversionError::DataIntegrity`].
const LOWER_BOUNDARY_FALLBACK_DAYS: Dom = 29;

/// How a conversion failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConversionError {
    /// The input triple fails structural bounds before any lookup.
    #[error("{year}/{month}/{day} is not a valid {calendar} date")]
    InvalidInput {
        calendar: Calendar,
        year: Year,
        month: Month,
        day: Dom,
    },
    /// The profile's day offset lies outside the supported window.
    #[error("profile offset {0} is outside the supported -{MAX_OFFSET_DAYS}..={MAX_OFFSET_DAYS} window")]
    OffsetOutOfRange(i32),
    /// A structurally valid date outside the years the table covers.
    #[error("date falls outside the supported range, {min}-{max} AH")]
    OutOfSupportedRange { min: Year, max: Year },
    /// The table is unusable or a lookup the invariants guarantee missed.
    #[error("reference table integrity failure: {0}")]
    DataIntegrity(String),
    /// Reverse-offset overflow needed the month after the table's last record.
    #[error("the table ends before the month after {year}/{month} needed to resolve the offset")]
    NextMonthUnavailable { year: Year, month: Month },
}

impl From<TableError> for ConversionError {
    fn from(err: TableError) -> Self {
        Self::DataIntegrity(err.to_string())
    }
}

impl ConversionError {
    fn invalid_gregorian(date: GregorianDate) -> Self {
        Self::InvalidInput {
            calendar: Calendar::Gregorian,
            year: date.year,
            month: date.month,
            day: date.day,
        }
    }

    fn invalid_hijri(date: HijriDate) -> Self {
        Self::InvalidInput {
            calendar: Calendar::Hijri,
            year: date.year,
            month: date.month,
            day: date.day,
        }
    }

    fn out_of_range(table: &ReferenceTable) -> Self {
        let (min, max) = table.hijri_year_range();
        Self::OutOfSupportedRange { min, max }
    }
}

/// Inclusive Hijri year bounds of the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearRange {
    pub min: Year,
    pub max: Year,
}

/// Inclusive Gregorian day bounds of the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayRange {
    pub min: GregorianDate,
    pub max: GregorianDate,
}

/// Coverage limits of the bundled table on both calendars.
///
/// Callers use this to pre-reject out-of-range input without paying for a
/// full conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupportedRange {
    pub hijri: YearRange,
    pub gregorian: DayRange,
}

const fn next_month(year: Year, month: Month) -> (Year, Month) {
    if month == 12 { (year + 1, 1) } else { (year, month + 1) }
}

const fn previous_month(year: Year, month: Month) -> (Year, Month) {
    if month == 1 { (year - 1, 12) } else { (year, month - 1) }
}

fn check_offset(profile: &CountryProfile) -> Result<(), ConversionError> {
    if profile.offset_in_range() {
        Ok(())
    } else {
        Err(ConversionError::OffsetOutOfRange(profile.offset))
    }
}

/// Day count of `(year, month)` when rolling backwards over a month boundary.
fn rollback_day_count(
    table: &ReferenceTable,
    year: Year,
    month: Month,
) -> Result<Dom, ConversionError> {
    if let Some(rec) = table.find_by_hijri(year, month) {
        return Ok(rec.day_count);
    }
    if month_key(year, month) < table.first().key() {
        return Ok(LOWER_BOUNDARY_FALLBACK_DAYS);
    }
    Err(ConversionError::DataIntegrity(format!(
        "no record for {year}/{month} inside the covered range"
    )))
}

/// Convert a Gregorian date to the Hijri date observed under `profile`.
pub fn gregorian_to_hijri(
    date: GregorianDate,
    profile: &CountryProfile,
) -> Result<HijriDate, ConversionError> {
    check_offset(profile)?;
    if !date.in_structural_bounds() {
        return Err(ConversionError::invalid_gregorian(date));
    }
    let naive = date
        .to_naive()
        .ok_or_else(|| ConversionError::invalid_gregorian(date))?;

    let table = ReferenceTable::shared()?;
    let record = table
        .find_by_gregorian(naive)
        .ok_or_else(|| ConversionError::out_of_range(table))?;

    // Guaranteed by the span match; a violation means the table is corrupt.
    let day_offset = (naive - record.gregorian_start).num_days();
    if day_offset < 0 || day_offset >= record.day_count as i64 {
        return Err(ConversionError::DataIntegrity(format!(
            "{naive} resolved to a record whose span does not contain it"
        )));
    }

    let mut year = record.hijri_year;
    let mut month = record.hijri_month;
    let mut day = day_offset as i32 + 1 + profile.offset;

    if day > record.day_count as i32 {
        day -= record.day_count as i32;
        (year, month) = next_month(year, month);
    } else if day < 1 {
        let (prev_year, prev_month) = previous_month(year, month);
        day += rollback_day_count(table, prev_year, prev_month)? as i32;
        (year, month) = (prev_year, prev_month);
    }

    Ok(HijriDate::new(year, month, day as Dom))
}

/// Convert a Hijri date observed under `profile` back to Gregorian.
///
/// The profile offset is undone *before* the table lookup, so the adjusted
/// day may fall off either end of the looked-up month; both spills are
/// resolved against the neighbouring records.
pub fn hijri_to_gregorian(
    date: HijriDate,
    profile: &CountryProfile,
) -> Result<GregorianDate, ConversionError> {
    check_offset(profile)?;
    if !date.in_structural_bounds() {
        return Err(ConversionError::invalid_hijri(date));
    }

    let table = ReferenceTable::shared()?;
    let mut year = date.year;
    let mut month = date.month;
    let mut lookup_day = date.day as i32 - profile.offset;

    if lookup_day < 1 {
        let (prev_year, prev_month) = previous_month(year, month);
        lookup_day += rollback_day_count(table, prev_year, prev_month)? as i32;
        (year, month) = (prev_year, prev_month);
    }

    let record = table
        .find_by_hijri(year, month)
        .ok_or_else(|| ConversionError::out_of_range(table))?;

    let start = if lookup_day > record.day_count as i32 {
        // Spilled past the month's end; the successor record carries the day.
        let (next_year, next_month) = next_month(year, month);
        let next = table.find_by_hijri(next_year, next_month).ok_or_else(|| {
            if month_key(next_year, next_month) > table.last().key() {
                ConversionError::NextMonthUnavailable { year, month }
            } else {
                ConversionError::DataIntegrity(format!(
                    "no record for {next_year}/{next_month} inside the covered range"
                ))
            }
        })?;
        lookup_day -= record.day_count as i32;
        next.gregorian_start
    } else {
        record.gregorian_start
    };

    Ok(GregorianDate::from(start + Days::new(lookup_day as u64 - 1)))
}

/// Today's Hijri date under `profile`, from the system clock.
pub fn today_hijri(profile: &CountryProfile) -> Result<HijriDate, ConversionError> {
    gregorian_to_hijri(GregorianDate::from(Local::now().date_naive()), profile)
}

/// Whether `date` is structurally sound and covered by the table.
///
/// Day 30 of a 29-day month is rejected here; this is the one check
/// structural bounds alone cannot make.
pub fn is_valid_hijri_date(date: HijriDate) -> bool {
    if !date.in_structural_bounds() {
        return false;
    }
    let Ok(table) = ReferenceTable::shared() else {
        return false;
    };
    table
        .find_by_hijri(date.year, date.month)
        .is_some_and(|rec| date.day <= rec.day_count)
}

/// Whether `date` is a real calendar day covered by the table.
pub fn is_valid_gregorian_date(date: GregorianDate) -> bool {
    if !date.in_structural_bounds() {
        return false;
    }
    let Some(naive) = date.to_naive() else {
        return false;
    };
    let Ok(table) = ReferenceTable::shared() else {
        return false;
    };
    table.find_by_gregorian(naive).is_some()
}

/// Coverage limits of the bundled table, on both calendars.
pub fn supported_range() -> Result<SupportedRange, ConversionError> {
    let table = ReferenceTable::shared()?;
    let (min, max) = table.hijri_year_range();
    let (first, last) = table.gregorian_day_range();
    Ok(SupportedRange {
        hijri: YearRange { min, max },
        gregorian: DayRange {
            min: first.into(),
            max: last.into(),
        },
    })
}

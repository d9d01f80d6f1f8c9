#![doc = include_str!("../README.md")]

mod date;
mod engine;
mod lookup;
mod profile;
mod table;

#[cfg(feature = "wasm")]
pub mod ffi;

pub use date::{
    Calendar, GREGORIAN_YEAR_MAX, GREGORIAN_YEAR_MIN, GregorianDate, HIJRI_YEAR_MAX,
    HIJRI_YEAR_MIN, HijriDate,
};
pub use engine::{
    ConversionError, DayRange, SupportedRange, YearRange, gregorian_to_hijri, hijri_to_gregorian,
    is_valid_gregorian_date, is_valid_hijri_date, supported_range, today_hijri,
};
pub use profile::{
    CountryProfile, DisplayName, MAX_OFFSET_DAYS, Method, ProfileError, all_profiles,
    default_profile, is_country_supported, load_profiles, profile_for, profiles_by_method,
    supported_countries,
};
pub use table::{Metadata, MonthRecord, ReferenceTable, TableError};

/// Counter for years, Hijri (AH) and Gregorian (CE) alike.
pub type Year = i32;

/// Counter for months of a year (1..=12 on both calendars).
pub type Month = u8;

/// Counter for days of a month.
pub type Dom = u8;

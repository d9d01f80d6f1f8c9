//! wasm-bindgen exports for the embeddable widget build.
//!
//! Newtype-free, primitive-first signatures: the widget passes a country code
//! and a `{year, month, day}` triple, nothing else. Profiles resolve through
//! the built-in registry, falling back to the default (Umm al-Qura, zero
//! offset) for unknown codes.

use wasm_bindgen::prelude::*;

use crate::date::{GregorianDate, HijriDate};
use crate::profile::{CountryProfile, default_profile, profile_for};
use crate::{Dom, Month, Year, engine};

fn resolve(country: &str) -> &'static CountryProfile {
    profile_for(country).unwrap_or_else(default_profile)
}

/// Gregorian to Hijri under the named country's profile.
#[wasm_bindgen]
pub fn gregorian_to_hijri(
    year: Year,
    month: Month,
    day: Dom,
    country: &str,
) -> Result<HijriDate, JsError> {
    engine::gregorian_to_hijri(GregorianDate::new(year, month, day), resolve(country))
        .map_err(JsError::from)
}

/// Hijri to Gregorian under the named country's profile.
#[wasm_bindgen]
pub fn hijri_to_gregorian(
    year: Year,
    month: Month,
    day: Dom,
    country: &str,
) -> Result<GregorianDate, JsError> {
    engine::hijri_to_gregorian(HijriDate::new(year, month, day), resolve(country))
        .map_err(JsError::from)
}

/// Whether the Hijri triple is valid and covered by the table.
#[wasm_bindgen]
pub fn is_valid_hijri_date(year: Year, month: Month, day: Dom) -> bool {
    engine::is_valid_hijri_date(HijriDate::new(year, month, day))
}

/// Whether the Gregorian triple is valid and covered by the table.
#[wasm_bindgen]
pub fn is_valid_gregorian_date(year: Year, month: Month, day: Dom) -> bool {
    engine::is_valid_gregorian_date(GregorianDate::new(year, month, day))
}

/// Whether a country code has a registered profile.
#[wasm_bindgen]
pub fn is_country_supported(country: &str) -> bool {
    crate::profile::is_country_supported(country)
}

//! Country calculation profiles and the built-in registry.
//!
//! A profile names a regional calculation convention and a fixed day offset
//! from the Umm al-Qura table. Only `offset` has computational effect; the
//! rest is descriptive pass-through for callers. The registry ships as an
//! embedded JSON asset keyed by ISO 3166-1 alpha-2 code.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The built-in registry asset.
const PROFILES_JSON: &str = include_str!("../data/profiles.json");

/// Country code of the profile used when a caller has no preference.
const DEFAULT_COUNTRY: &str = "SA";

/// Largest day offset (either direction) a profile may carry.
///
/// Keeping offsets within two days guarantees a conversion crosses at most
/// one Hijri month boundary.
pub const MAX_OFFSET_DAYS: i32 = 2;

/// Why the registry asset was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProfileError {
    #[error("profile asset is not valid JSON: {0}")]
    Parse(String),
    #[error("profile {key:?}: {reason}")]
    Invalid { key: String, reason: &'static str },
}

/// Regional Hijri calculation convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Method {
    Ummalqura,
    MoonsightingNational,
    Diyanet,
}

/// Profile name in both site languages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayName {
    pub ar: String,
    pub en: String,
}

/// A named calculation convention plus a fixed day offset from Umm al-Qura.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountryProfile {
    /// ISO 3166-1 alpha-2 code, uppercase.
    pub country: String,
    pub method: Method,
    /// Signed day adjustment in `-MAX_OFFSET_DAYS..=MAX_OFFSET_DAYS`.
    pub offset: i32,
    pub display_name: DisplayName,
    pub timezone: String,
}

impl CountryProfile {
    pub fn new(
        country: &str,
        method: Method,
        offset: i32,
        display_name: DisplayName,
        timezone: &str,
    ) -> Self {
        Self {
            country: country.to_string(),
            method,
            offset,
            display_name,
            timezone: timezone.to_string(),
        }
    }

    /// Whether the offset sits inside the supported window.
    pub const fn offset_in_range(&self) -> bool {
        self.offset >= -MAX_OFFSET_DAYS && self.offset <= MAX_OFFSET_DAYS
    }

    /// Structural validity of the whole profile.
    pub fn is_valid(&self) -> bool {
        self.check().is_ok()
    }

    fn check(&self) -> Result<(), &'static str> {
        if self.country.len() != 2 || !self.country.bytes().all(|b| b.is_ascii_uppercase()) {
            return Err("country must be a 2-letter uppercase code");
        }
        if !self.offset_in_range() {
            return Err("offset is outside the supported day window");
        }
        if self.display_name.ar.is_empty() || self.display_name.en.is_empty() {
            return Err("both display names are required");
        }
        if self.timezone.is_empty() {
            return Err("timezone is required");
        }
        Ok(())
    }
}

/// Parse and validate a profile registry keyed by country code.
///
/// Every profile must pass its structural checks and sit under its own
/// country code; the first offending entry fails the whole load.
pub fn load_profiles(raw: &str) -> Result<BTreeMap<String, CountryProfile>, ProfileError> {
    let profiles: BTreeMap<String, CountryProfile> =
        serde_json::from_str(raw).map_err(|e| ProfileError::Parse(e.to_string()))?;
    for (key, profile) in &profiles {
        if *key != profile.country {
            return Err(ProfileError::Invalid {
                key: key.clone(),
                reason: "registry key does not match the profile's country code",
            });
        }
        profile.check().map_err(|reason| ProfileError::Invalid {
            key: key.clone(),
            reason,
        })?;
    }
    Ok(profiles)
}

fn registry() -> &'static BTreeMap<String, CountryProfile> {
    static REGISTRY: OnceLock<BTreeMap<String, CountryProfile>> = OnceLock::new();
    REGISTRY.get_or_init(|| match load_profiles(PROFILES_JSON) {
        Ok(map) => map,
        // A rejected bundled asset is a packaging defect; it must never read
        // as a registry with no entries.
        Err(err) => panic!("bundled profile registry is invalid: {err}"),
    })
}

/// The profile registered for a country code, case-insensitively.
pub fn profile_for(country: &str) -> Option<&'static CountryProfile> {
    registry().get(&country.to_ascii_uppercase())
}

/// The Saudi Arabia (Umm al-Qura, zero offset) profile.
pub fn default_profile() -> &'static CountryProfile {
    static FALLBACK: OnceLock<CountryProfile> = OnceLock::new();
    profile_for(DEFAULT_COUNTRY).unwrap_or_else(|| {
        // Unreachable with the shipped asset; keeps the accessor total.
        FALLBACK.get_or_init(|| {
            CountryProfile::new(
                DEFAULT_COUNTRY,
                Method::Ummalqura,
                0,
                DisplayName {
                    ar: "السعودية".to_string(),
                    en: "Saudi Arabia".to_string(),
                },
                "Asia/Riyadh",
            )
        })
    })
}

/// Every registered profile, ascending by country code.
pub fn all_profiles() -> impl Iterator<Item = &'static CountryProfile> {
    registry().values()
}

/// Registered profiles using the given calculation method.
pub fn profiles_by_method(method: Method) -> Vec<&'static CountryProfile> {
    all_profiles().filter(|p| p.method == method).collect()
}

/// Whether a country code has a registered profile.
pub fn is_country_supported(country: &str) -> bool {
    profile_for(country).is_some()
}

/// Country codes with a registered profile, ascending.
pub fn supported_countries() -> Vec<&'static str> {
    all_profiles().map(|p| p.country.as_str()).collect()
}

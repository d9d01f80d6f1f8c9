//! The Umm al-Qura reference table: loading, validation and the shared copy.
//!
//! The raw dataset is a JSON asset bundled into the binary. It is parsed and
//! validated at most once per process; every caller afterwards shares the
//! same immutable [`ReferenceTable`]. A dataset that fails any structural
//! check fails the whole load, there are no partial tables.

use std::sync::OnceLock;

use chrono::NaiveDate;
use serde::Deserialize;
use thiserror::Error;

use crate::date::{HIJRI_YEAR_MAX, HIJRI_YEAR_MIN};
use crate::{Dom, Month, Year};

/// The bundled Umm al-Qura dataset, 1356-1500 AH.
const UMM_AL_QURA_JSON: &str = include_str!("../data/umm_al_qura.json");

/// Composite sort key over a Hijri `(year, month)` pair.
pub(crate) const fn month_key(year: Year, month: Month) -> i64 {
    year as i64 * 12 + month as i64
}

/// Why a raw dataset was rejected by [`ReferenceTable::load`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
    #[error("table asset is not valid JSON: {0}")]
    Parse(String),
    #[error("table has no month records")]
    Empty,
    #[error("record {index}: Hijri year {year} is outside {HIJRI_YEAR_MIN}..={HIJRI_YEAR_MAX}")]
    YearOutOfBand { index: usize, year: Year },
    #[error("record {index}: Hijri month {month} is outside 1..=12")]
    MonthOutOfBand { index: usize, month: Month },
    #[error("record {index}: day count {days} is neither 29 nor 30")]
    BadDayCount { index: usize, days: u8 },
    #[error("record {index}: start date {value:?} is not an ISO calendar date")]
    BadStartDate { index: usize, value: String },
    #[error("record {index} is not after its predecessor in Hijri order")]
    OutOfOrder { index: usize },
    #[error("record {index} starts on {found}, expected {expected} right after its predecessor")]
    Discontinuous {
        index: usize,
        expected: NaiveDate,
        found: NaiveDate,
    },
}

/// Provenance block carried alongside the month records.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Metadata {
    pub source: String,
    pub range: String,
    #[serde(rename = "lastUpdated")]
    pub last_updated: String,
    pub description: String,
}

/// One Hijri month and where it sits on the Gregorian calendar.
///
/// The month spans `[gregorian_start, gregorian_start + day_count - 1]`,
/// contiguous with the next record's start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthRecord {
    pub hijri_year: Year,
    pub hijri_month: Month,
    pub gregorian_start: NaiveDate,
    pub day_count: Dom,
}

impl MonthRecord {
    /// This record's composite sort key.
    pub(crate) const fn key(&self) -> i64 {
        month_key(self.hijri_year, self.hijri_month)
    }

    /// Last Gregorian day covered by this Hijri month.
    pub fn last_gregorian_day(&self) -> NaiveDate {
        self.gregorian_start + chrono::Days::new(self.day_count as u64 - 1)
    }
}

/// Wire shape of one month in the JSON asset.
#[derive(Debug, Deserialize)]
struct RawMonth {
    h_year: Year,
    h_month: Month,
    g_start: String,
    days: u8,
}

/// Wire shape of the whole JSON asset.
#[derive(Debug, Deserialize)]
struct RawTable {
    metadata: Metadata,
    months: Vec<RawMonth>,
}

/// Immutable, validated Umm al-Qura table.
///
/// Records are strictly ascending in the Hijri composite key and contiguous
/// on the Gregorian axis; both invariants are established by [`Self::load`]
/// and relied upon by every lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceTable {
    metadata: Metadata,
    months: Vec<MonthRecord>,
}

impl ReferenceTable {
    /// Parse and validate a raw JSON dataset.
    ///
    /// Any invalid record fails the entire load; the returned error names the
    /// first offending record.
    pub fn load(raw: &str) -> Result<Self, TableError> {
        let raw: RawTable = serde_json::from_str(raw).map_err(|e| TableError::Parse(e.to_string()))?;
        if raw.months.is_empty() {
            return Err(TableError::Empty);
        }

        let mut months = Vec::with_capacity(raw.months.len());
        for (index, m) in raw.months.iter().enumerate() {
            if m.h_year < HIJRI_YEAR_MIN || m.h_year > HIJRI_YEAR_MAX {
                return Err(TableError::YearOutOfBand {
                    index,
                    year: m.h_year,
                });
            }
            if m.h_month < 1 || m.h_month > 12 {
                return Err(TableError::MonthOutOfBand {
                    index,
                    month: m.h_month,
                });
            }
            if m.days != 29 && m.days != 30 {
                return Err(TableError::BadDayCount {
                    index,
                    days: m.days,
                });
            }
            let gregorian_start = NaiveDate::parse_from_str(&m.g_start, "%Y-%m-%d").map_err(|_| {
                TableError::BadStartDate {
                    index,
                    value: m.g_start.clone(),
                }
            })?;
            months.push(MonthRecord {
                hijri_year: m.h_year,
                hijri_month: m.h_month,
                gregorian_start,
                day_count: m.days,
            });
        }

        for index in 1..months.len() {
            let (prev, cur) = (&months[index - 1], &months[index]);
            if cur.key() <= prev.key() {
                return Err(TableError::OutOfOrder { index });
            }
            let expected = prev.gregorian_start + chrono::Days::new(prev.day_count as u64);
            if cur.gregorian_start != expected {
                return Err(TableError::Discontinuous {
                    index,
                    expected,
                    found: cur.gregorian_start,
                });
            }
        }

        Ok(Self {
            metadata: raw.metadata,
            months,
        })
    }

    /// The process-wide table built from the bundled dataset.
    ///
    /// The first call parses and validates the asset; every later call, from
    /// any thread, returns the same cached table (or the same cached error)
    /// without re-parsing.
    pub fn shared() -> Result<&'static Self, TableError> {
        static SHARED: OnceLock<Result<ReferenceTable, TableError>> = OnceLock::new();
        SHARED
            .get_or_init(|| Self::load(UMM_AL_QURA_JSON))
            .as_ref()
            .map_err(Clone::clone)
    }

    /// Provenance of the dataset.
    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    /// Every month record, ascending in both orderings.
    pub fn months(&self) -> &[MonthRecord] {
        &self.months
    }

    /// The chronologically first record (the table is never empty).
    pub fn first(&self) -> &MonthRecord {
        &self.months[0]
    }

    /// The chronologically last record (the table is never empty).
    pub fn last(&self) -> &MonthRecord {
        &self.months[self.months.len() - 1]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table_json(months: &str) -> String {
        format!(
            r#"{{
                "metadata": {{
                    "source": "test",
                    "range": "test",
                    "lastUpdated": "2025-07-01",
                    "description": "test fixture"
                }},
                "months": [{months}]
            }}"#
        )
    }

    #[test]
    fn test_shared_loads_bundled_asset() {
        let table = ReferenceTable::shared().unwrap();
        assert!(!table.months().is_empty());
        assert_eq!(table.first().hijri_year, 1356);
        assert_eq!(table.last().hijri_year, 1500);
        assert_eq!(table.last().hijri_month, 12);
        assert!(table.metadata().source.contains("Umm al-Qura"));
    }

    #[test]
    fn test_shared_is_one_instance() {
        let a = ReferenceTable::shared().unwrap() as *const ReferenceTable;
        let b = ReferenceTable::shared().unwrap() as *const ReferenceTable;
        assert_eq!(a, b);
    }

    #[test]
    fn test_load_minimal() {
        let json = table_json(
            r#"{"h_year": 1447, "h_month": 1, "g_start": "2025-06-26", "days": 30},
               {"h_year": 1447, "h_month": 2, "g_start": "2025-07-26", "days": 29}"#,
        );
        let table = ReferenceTable::load(&json).unwrap();
        assert_eq!(table.months().len(), 2);
        assert_eq!(
            table.first().gregorian_start,
            NaiveDate::from_ymd_opt(2025, 6, 26).unwrap()
        );
        assert_eq!(
            table.first().last_gregorian_day(),
            NaiveDate::from_ymd_opt(2025, 7, 25).unwrap()
        );
    }

    #[test]
    fn test_load_rejects_garbage() {
        assert!(matches!(
            ReferenceTable::load("not json"),
            Err(TableError::Parse(_))
        ));
    }

    #[test]
    fn test_load_rejects_empty() {
        assert_eq!(ReferenceTable::load(&table_json("")), Err(TableError::Empty));
    }

    #[test]
    fn test_load_rejects_year_out_of_band() {
        let json =
            table_json(r#"{"h_year": 1299, "h_month": 1, "g_start": "1881-12-02", "days": 30}"#);
        assert_eq!(
            ReferenceTable::load(&json),
            Err(TableError::YearOutOfBand {
                index: 0,
                year: 1299
            })
        );
    }

    #[test]
    fn test_load_rejects_month_out_of_band() {
        let json =
            table_json(r#"{"h_year": 1447, "h_month": 13, "g_start": "2025-06-26", "days": 30}"#);
        assert_eq!(
            ReferenceTable::load(&json),
            Err(TableError::MonthOutOfBand {
                index: 0,
                month: 13
            })
        );
    }

    #[test]
    fn test_load_rejects_bad_day_count() {
        let json =
            table_json(r#"{"h_year": 1447, "h_month": 1, "g_start": "2025-06-26", "days": 28}"#);
        assert_eq!(
            ReferenceTable::load(&json),
            Err(TableError::BadDayCount { index: 0, days: 28 })
        );
    }

    #[test]
    fn test_load_rejects_bad_start_date() {
        let json =
            table_json(r#"{"h_year": 1447, "h_month": 1, "g_start": "2025-13-45", "days": 30}"#);
        assert!(matches!(
            ReferenceTable::load(&json),
            Err(TableError::BadStartDate { index: 0, .. })
        ));
    }

    #[test]
    fn test_load_rejects_out_of_order() {
        let json = table_json(
            r#"{"h_year": 1447, "h_month": 2, "g_start": "2025-06-26", "days": 30},
               {"h_year": 1447, "h_month": 1, "g_start": "2025-07-26", "days": 29}"#,
        );
        assert_eq!(
            ReferenceTable::load(&json),
            Err(TableError::OutOfOrder { index: 1 })
        );
    }

    #[test]
    fn test_load_rejects_gregorian_gap() {
        // Second record starts one day late.
        let json = table_json(
            r#"{"h_year": 1447, "h_month": 1, "g_start": "2025-06-26", "days": 30},
               {"h_year": 1447, "h_month": 2, "g_start": "2025-07-27", "days": 29}"#,
        );
        assert!(matches!(
            ReferenceTable::load(&json),
            Err(TableError::Discontinuous { index: 1, .. })
        ));
    }

    #[test]
    fn test_bundled_asset_invariants() {
        // Consecutive shipped records step the Hijri key by exactly one and
        // stay contiguous on the Gregorian axis.
        let table = ReferenceTable::shared().unwrap();
        for pair in table.months().windows(2) {
            assert_eq!(pair[1].key(), pair[0].key() + 1);
            assert_eq!(
                pair[1].gregorian_start,
                pair[0].gregorian_start + chrono::Days::new(pair[0].day_count as u64)
            );
        }
    }
}

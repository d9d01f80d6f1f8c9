//! Binary-search accessors over the reference table.
//!
//! One physical sequence, two comparators: the Hijri `(year, month)` pair
//! and the Gregorian span. Both searches rely on the ordering invariants
//! established at load time.

use core::cmp::Ordering;

use chrono::NaiveDate;

use crate::table::{MonthRecord, ReferenceTable};
use crate::{Month, Year};

impl ReferenceTable {
    /// Exact-match lookup by Hijri `(year, month)`.
    ///
    /// Compares the full tuple, not `year * 12 + month`: the flattened key
    /// aliases across year boundaries (`(1447, 0)` and `(1446, 12)` flatten
    /// to the same value) and must never resolve a month outside 1..=12.
    pub fn find_by_hijri(&self, year: Year, month: Month) -> Option<&MonthRecord> {
        self.months()
            .binary_search_by(|rec| (rec.hijri_year, rec.hijri_month).cmp(&(year, month)))
            .ok()
            .map(|i| &self.months()[i])
    }

    /// The record whose Gregorian span contains `date`.
    ///
    /// `None` only for dates before the first or after the last record's
    /// span; the contiguity invariant guarantees a hit for everything in
    /// between.
    pub fn find_by_gregorian(&self, date: NaiveDate) -> Option<&MonthRecord> {
        self.months()
            .binary_search_by(|rec| {
                if date < rec.gregorian_start {
                    Ordering::Greater
                } else if date > rec.last_gregorian_day() {
                    Ordering::Less
                } else {
                    Ordering::Equal
                }
            })
            .ok()
            .map(|i| &self.months()[i])
    }

    /// First and last Hijri years covered by the table.
    pub fn hijri_year_range(&self) -> (Year, Year) {
        (self.first().hijri_year, self.last().hijri_year)
    }

    /// First and last Gregorian days covered by the table.
    pub fn gregorian_day_range(&self) -> (NaiveDate, NaiveDate) {
        (self.first().gregorian_start, self.last().last_gregorian_day())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn test_find_by_hijri_hit() {
        let table = ReferenceTable::shared().unwrap();
        let rec = table.find_by_hijri(1447, 1).unwrap();
        assert_eq!(rec.gregorian_start, ymd(2025, 6, 26));
        assert_eq!(rec.day_count, 30);
    }

    #[test]
    fn test_find_by_hijri_extremes() {
        let table = ReferenceTable::shared().unwrap();
        assert!(table.find_by_hijri(1356, 1).is_some());
        assert!(table.find_by_hijri(1500, 12).is_some());
    }

    #[test]
    fn test_find_by_hijri_miss() {
        let table = ReferenceTable::shared().unwrap();
        assert!(table.find_by_hijri(1355, 12).is_none());
        assert!(table.find_by_hijri(1501, 1).is_none());
        assert!(table.find_by_hijri(1447, 0).is_none());
    }

    #[test]
    fn test_find_by_hijri_no_key_aliasing() {
        // (1447, 0) and (1446, 13) flatten to the same year*12+month value as
        // real records; neither may resolve to its neighbour across the year
        // boundary.
        let table = ReferenceTable::shared().unwrap();
        assert!(table.find_by_hijri(1447, 0).is_none());
        assert!(table.find_by_hijri(1446, 13).is_none());
        let rec = table.find_by_hijri(1446, 12).unwrap();
        assert_eq!((rec.hijri_year, rec.hijri_month), (1446, 12));
        let rec = table.find_by_hijri(1447, 1).unwrap();
        assert_eq!((rec.hijri_year, rec.hijri_month), (1447, 1));
    }

    #[test]
    fn test_find_by_gregorian_span() {
        let table = ReferenceTable::shared().unwrap();

        // First, middle and last day of 1447/1 all resolve to the same record.
        for day in [ymd(2025, 6, 26), ymd(2025, 7, 10), ymd(2025, 7, 25)] {
            let rec = table.find_by_gregorian(day).unwrap();
            assert_eq!((rec.hijri_year, rec.hijri_month), (1447, 1));
        }

        // One day either side belongs to the neighbours.
        let before = table.find_by_gregorian(ymd(2025, 6, 25)).unwrap();
        assert_eq!((before.hijri_year, before.hijri_month), (1446, 12));
        let after = table.find_by_gregorian(ymd(2025, 7, 26)).unwrap();
        assert_eq!((after.hijri_year, after.hijri_month), (1447, 2));
    }

    #[test]
    fn test_find_by_gregorian_outside_table() {
        let table = ReferenceTable::shared().unwrap();
        let (min, max) = table.gregorian_day_range();
        assert!(table.find_by_gregorian(min).is_some());
        assert!(table.find_by_gregorian(max).is_some());
        assert!(table.find_by_gregorian(min.pred_opt().unwrap()).is_none());
        assert!(table.find_by_gregorian(max.succ_opt().unwrap()).is_none());
    }

    #[test]
    fn test_every_covered_day_resolves() {
        // No gaps: every day of a sample Hijri year hits exactly its month.
        let table = ReferenceTable::shared().unwrap();
        for month in 1..=12 {
            let rec = *table.find_by_hijri(1447, month).unwrap();
            for offset in 0..rec.day_count as u64 {
                let day = rec.gregorian_start + chrono::Days::new(offset);
                let hit = table.find_by_gregorian(day).unwrap();
                assert_eq!((hit.hijri_year, hit.hijri_month), (1447, month));
            }
        }
    }

    #[test]
    fn test_ranges() {
        let table = ReferenceTable::shared().unwrap();
        assert_eq!(table.hijri_year_range(), (1356, 1500));
        let (min, max) = table.gregorian_day_range();
        assert_eq!(min, ymd(1937, 3, 13));
        assert_eq!(max, ymd(2077, 11, 15));
    }
}

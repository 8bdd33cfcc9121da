// 📅 Comparison Request - Which date, across which years
// The clock is an explicit input; only for_today() touches system time.

use chrono::{Datelike, Local, NaiveDate};
use serde::{Deserialize, Serialize};

/// Default size of the year window (anchor year plus two earlier ones)
pub const DEFAULT_YEAR_COUNT: u32 = 3;

/// ComparisonRequest - One panel render's worth of input
///
/// Month and day are kept as 2-digit zero-padded strings because they
/// are only ever spliced into candidate paths and section labels. The
/// years list is caller-supplied and rendered in exactly this order;
/// nothing downstream sorts it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonRequest {
    pub month: String,
    pub day: String,
    pub years: Vec<i32>,
}

impl ComparisonRequest {
    /// Build a request for an explicit date: the anchor year first, then
    /// `year_count - 1` earlier years in descending order.
    pub fn for_date(date: NaiveDate, year_count: u32) -> Self {
        let year_count = year_count.max(1);
        let anchor = date.year();
        let years = (0..year_count as i32).map(|i| anchor - i).collect();

        ComparisonRequest {
            month: format!("{:02}", date.month()),
            day: format!("{:02}", date.day()),
            years,
        }
    }

    /// Build a request for today's wall-clock date
    pub fn for_today(year_count: u32) -> Self {
        Self::for_date(Local::now().date_naive(), year_count)
    }

    /// Section label for one year, e.g. "2024-06-15"
    pub fn date_label(&self, year: i32) -> String {
        format!("{}-{}-{}", year, self.month, self.day)
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_date_zero_pads() {
        let date = NaiveDate::from_ymd_opt(2025, 6, 5).unwrap();
        let req = ComparisonRequest::for_date(date, 3);
        assert_eq!(req.month, "06");
        assert_eq!(req.day, "05");
    }

    #[test]
    fn test_year_window_descends_from_anchor() {
        let date = NaiveDate::from_ymd_opt(2025, 6, 15).unwrap();
        let req = ComparisonRequest::for_date(date, 3);
        assert_eq!(req.years, vec![2025, 2024, 2023]);
    }

    #[test]
    fn test_year_count_configurable() {
        let date = NaiveDate::from_ymd_opt(2030, 12, 31).unwrap();
        let req = ComparisonRequest::for_date(date, 5);
        assert_eq!(req.years, vec![2030, 2029, 2028, 2027, 2026]);
    }

    #[test]
    fn test_year_count_zero_clamped_to_one() {
        let date = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        let req = ComparisonRequest::for_date(date, 0);
        assert_eq!(req.years, vec![2025]);
    }

    #[test]
    fn test_date_label() {
        let date = NaiveDate::from_ymd_opt(2025, 2, 3).unwrap();
        let req = ComparisonRequest::for_date(date, 2);
        assert_eq!(req.date_label(2024), "2024-02-03");
    }
}

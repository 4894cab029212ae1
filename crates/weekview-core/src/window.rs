//! Week window and tracker search query
//!
//! The window is the Monday-anchored 7-day UTC date range identifying the
//! requested week. ISO week numbering applies: week 1 is the week holding
//! the year's first Thursday, so 2024-W10 anchors at Monday 2024-03-04.

use crate::error::WeekError;
use chrono::{DateTime, Datelike, NaiveDate, NaiveTime, Utc, Weekday};

/// The Monday..Sunday UTC date range for a requested (year, week) pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeekWindow {
    days: [DateTime<Utc>; 7],
    today: DateTime<Utc>,
    is_current_week: bool,
}

impl WeekWindow {
    /// Build the window for an ISO (year, week) pair, anchored to now
    ///
    /// # Errors
    /// `WeekError::InvalidWeek` when the pair names no valid ISO week.
    pub fn from_iso_week(year: i32, week: u32) -> Result<Self, WeekError> {
        Self::from_iso_week_at(year, week, Utc::now())
    }

    /// Build the window with an explicit "now" (deterministic for tests)
    ///
    /// # Errors
    /// `WeekError::InvalidWeek` when the pair names no valid ISO week.
    pub fn from_iso_week_at(
        year: i32,
        week: u32,
        now: DateTime<Utc>,
    ) -> Result<Self, WeekError> {
        let monday = NaiveDate::from_isoywd_opt(year, week, Weekday::Mon)
            .ok_or(WeekError::InvalidWeek { year, week })?;

        let days = std::array::from_fn(|i| {
            let date = monday + chrono::Days::new(i as u64);
            date.and_time(NaiveTime::MIN).and_utc()
        });

        let today_date = now.date_naive();
        let iso = today_date.iso_week();
        Ok(Self {
            days,
            today: today_date.and_time(NaiveTime::MIN).and_utc(),
            is_current_week: iso.year() == year && iso.week() == week,
        })
    }

    /// The seven UTC midnights of the window, index 0 = Monday
    #[inline]
    #[must_use]
    pub fn days(&self) -> &[DateTime<Utc>; 7] {
        &self.days
    }

    /// The window's Monday midnight
    #[inline]
    #[must_use]
    pub fn monday(&self) -> DateTime<Utc> {
        self.days[0]
    }

    /// Today's UTC midnight, fixed when the window was built
    #[inline]
    #[must_use]
    pub fn today(&self) -> DateTime<Utc> {
        self.today
    }

    /// Whether the window contains today
    #[inline]
    #[must_use]
    pub fn is_current_week(&self) -> bool {
        self.is_current_week
    }

    /// Display label per day, e.g. `Monday 04`
    #[must_use]
    pub fn day_labels(&self) -> [String; 7] {
        self.days.map(|day| day.format("%A %d").to_string())
    }

    /// The tracker search query for this window
    ///
    /// Requests stories accepted or started Monday through Friday (work is
    /// not expected to start or accept on weekends). For the live week the
    /// query additionally pulls every story still in the started state so
    /// in-flight work from prior weeks surfaces too.
    #[must_use]
    pub fn build_query(&self) -> String {
        let monday = self.days[0].format("%m/%d/%Y");
        let friday = self.days[4].format("%m/%d/%Y");
        let mut query =
            format!("accepted:{monday}..{friday} OR started:{monday}..{friday}");
        if self.is_current_week {
            query.push_str(" OR state:started");
        }
        query
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    fn utc(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
    }

    fn window_2024_w10() -> WeekWindow {
        // Anchored from a "now" well outside the window
        WeekWindow::from_iso_week_at(2024, 10, utc(2024, 6, 1, 12)).unwrap()
    }

    #[test]
    fn iso_week_10_of_2024_anchors_at_march_4() {
        let window = window_2024_w10();
        assert_eq!(window.monday(), utc(2024, 3, 4, 0));
        assert_eq!(window.days()[6], utc(2024, 3, 10, 0));
    }

    #[test]
    fn days_are_seven_strictly_ascending_midnights() {
        let window = window_2024_w10();
        assert_eq!(window.days().len(), 7);
        for pair in window.days().windows(2) {
            assert_eq!(pair[1] - pair[0], chrono::Duration::days(1));
        }
        for day in window.days() {
            assert_eq!(day.time(), NaiveTime::MIN);
        }
    }

    #[test]
    fn first_day_is_monday() {
        let window = window_2024_w10();
        assert_eq!(window.monday().weekday(), Weekday::Mon);
    }

    #[test]
    fn week_53_exists_only_in_long_years() {
        // 2020 has 53 ISO weeks, 2024 does not
        assert!(WeekWindow::from_iso_week_at(2020, 53, utc(2021, 1, 1, 0)).is_ok());
        let err = WeekWindow::from_iso_week_at(2024, 53, utc(2024, 6, 1, 0)).unwrap_err();
        assert!(matches!(err, WeekError::InvalidWeek { year: 2024, week: 53 }));
    }

    #[test]
    fn zero_week_is_invalid() {
        let err = WeekWindow::from_iso_week_at(2024, 0, utc(2024, 6, 1, 0)).unwrap_err();
        assert!(matches!(err, WeekError::InvalidWeek { week: 0, .. }));
    }

    #[test]
    fn current_week_detection_uses_iso_numbering() {
        let inside = WeekWindow::from_iso_week_at(2024, 10, utc(2024, 3, 6, 15)).unwrap();
        assert!(inside.is_current_week());

        let outside = WeekWindow::from_iso_week_at(2024, 10, utc(2024, 3, 11, 0)).unwrap();
        assert!(!outside.is_current_week());
    }

    #[test]
    fn query_covers_monday_through_friday() {
        let window = window_2024_w10();
        assert_eq!(
            window.build_query(),
            "accepted:03/04/2024..03/08/2024 OR started:03/04/2024..03/08/2024"
        );
    }

    #[test]
    fn query_adds_started_clause_for_the_live_week() {
        let window = WeekWindow::from_iso_week_at(2024, 10, utc(2024, 3, 6, 9)).unwrap();
        assert_eq!(
            window.build_query(),
            "accepted:03/04/2024..03/08/2024 OR started:03/04/2024..03/08/2024 OR state:started"
        );
    }

    #[test]
    fn day_labels_carry_weekday_and_date() {
        let labels = window_2024_w10().day_labels();
        assert_eq!(labels[0], "Monday 04");
        assert_eq!(labels[6], "Sunday 10");
    }

    #[test]
    fn today_is_midnight_aligned() {
        let window = WeekWindow::from_iso_week_at(2024, 10, utc(2024, 3, 6, 17)).unwrap();
        assert_eq!(window.today(), utc(2024, 3, 6, 0));
    }
}

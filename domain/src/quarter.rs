use chrono::{Datelike, NaiveDate, NaiveDateTime};
use tracing::instrument;

/// A named academic-calendar interval `[start, end)`. The exclusive end is
/// canonical; there is no wraparound.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quarter {
    pub name: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl Quarter {
    pub fn new(name: impl Into<String>, start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            name: name.into(),
            start,
            end,
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date < self.end
    }

    pub fn contains_datetime(&self, ts: NaiveDateTime) -> bool {
        self.contains(ts.date())
    }
}

/// Ordered quarter table. Intervals must not overlap; that is a configuration
/// invariant, not checked at runtime.
#[derive(Debug, Clone)]
pub struct QuarterCalendar {
    quarters: Vec<Quarter>,
}

impl QuarterCalendar {
    pub fn new(quarters: Vec<Quarter>) -> Self {
        Self { quarters }
    }

    /// The quarter containing `today`, or `None` outside every interval.
    /// There is no clamping toward the nearest quarter.
    #[instrument(level = "trace", skip(self))]
    pub fn active_quarter(&self, today: NaiveDate) -> Option<&Quarter> {
        self.quarters.iter().find(|q| q.contains(today))
    }

    pub fn quarters(&self) -> &[Quarter] {
        &self.quarters
    }

    /// The stock table for the school year starting in `year`: Q1 from
    /// July 1, Q2 from November 1, Q3 from January 16, Q4 from April 1
    /// through July 1 of the following year.
    pub fn for_school_year(year: i32) -> Self {
        let date = |y: i32, m: u32, d: u32| {
            NaiveDate::from_ymd_opt(y, m, d).expect("static quarter boundary")
        };
        Self::new(vec![
            Quarter::new("Q1", date(year, 7, 1), date(year, 11, 1)),
            Quarter::new("Q2", date(year, 11, 1), date(year + 1, 1, 16)),
            Quarter::new("Q3", date(year + 1, 1, 16), date(year + 1, 4, 1)),
            Quarter::new("Q4", date(year + 1, 4, 1), date(year + 1, 7, 1)),
        ])
    }

    /// Stock table for whichever school year `today` falls in (school years
    /// turn over on July 1).
    pub fn for_school_year_containing(today: NaiveDate) -> Self {
        let year = if today.month() >= 7 {
            today.year()
        } else {
            today.year() - 1
        };
        Self::for_school_year(year)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn end_is_exclusive() {
        let q = Quarter::new("Q1", date(2025, 8, 6), date(2025, 10, 10));
        assert!(q.contains(date(2025, 8, 6)));
        assert!(q.contains(date(2025, 10, 9)));
        assert!(!q.contains(date(2025, 10, 10)));
    }

    #[test]
    fn at_most_one_quarter_matches_any_date() {
        let calendar = QuarterCalendar::for_school_year(2025);
        let mut day = date(2025, 6, 1);
        while day < date(2026, 9, 1) {
            let matches = calendar.quarters().iter().filter(|q| q.contains(day)).count();
            assert!(matches <= 1, "{day} matched {matches} quarters");
            day = day.succ_opt().unwrap();
        }
    }

    #[test]
    fn school_year_table_covers_winter_break_crossover() {
        let calendar = QuarterCalendar::for_school_year(2025);
        assert_eq!(calendar.active_quarter(date(2025, 12, 25)).unwrap().name, "Q2");
        assert_eq!(calendar.active_quarter(date(2026, 1, 15)).unwrap().name, "Q2");
        assert_eq!(calendar.active_quarter(date(2026, 1, 16)).unwrap().name, "Q3");
    }

    #[test]
    fn no_quarter_outside_the_table() {
        let calendar = QuarterCalendar::new(vec![Quarter::new(
            "Q1",
            date(2025, 8, 6),
            date(2025, 10, 10),
        )]);
        assert!(calendar.active_quarter(date(2025, 8, 5)).is_none());
        assert!(calendar.active_quarter(date(2025, 10, 10)).is_none());
    }

    #[test]
    fn school_year_turns_over_on_july_first() {
        let summer = QuarterCalendar::for_school_year_containing(date(2026, 7, 1));
        assert_eq!(summer.active_quarter(date(2026, 7, 1)).unwrap().name, "Q1");
        let spring = QuarterCalendar::for_school_year_containing(date(2026, 5, 1));
        assert_eq!(spring.active_quarter(date(2026, 5, 1)).unwrap().name, "Q4");
    }
}

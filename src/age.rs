//! age.rs
//!
//! Elapsed age as whole years, months and days, read off the two calendar
//! dates field by field. Negative fields are settled by borrowing:
//!   • days below zero take one month and gain the length of the month
//!     before `reference`
//!   • months below zero take one year and gain twelve months
//!
//! A single day borrow is applied, so a birth day later than the length of
//! the borrowed month (Jan 31 → Mar 1) leaves a negative `days` count.
//!
//! `hours` is a separate flat division of the instant difference and is not
//! derived from the year/month/day breakdown.

use chrono::{DateTime, Datelike, NaiveDate, NaiveTime, TimeZone, Utc};
use serde::Serialize;

use crate::error::{AgeError, AgeResult};

const MILLIS_PER_HOUR: i64 = 3_600_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ElapsedAge {
    pub years: i32,
    pub months: i32,
    pub days: i32,
    pub hours: i64,
}

impl ElapsedAge {
    /// Elapsed age with both dates anchored at midnight UTC.
    pub fn between(birth: NaiveDate, reference: NaiveDate) -> AgeResult<Self> {
        Self::between_in(birth, reference, &Utc)
    }

    /// Elapsed age with both dates anchored at local midnight in `tz`.
    pub fn between_in<Tz: TimeZone>(
        birth: NaiveDate,
        reference: NaiveDate,
        tz: &Tz,
    ) -> AgeResult<Self> {
        if reference < birth {
            return Err(AgeError::ReferenceBeforeBirth { birth, reference });
        }

        let (years, months, days) = calendar_diff(birth, reference);
        let millis = elapsed_millis(birth, reference, tz);

        Ok(Self {
            years,
            months,
            days,
            hours: millis.div_euclid(MILLIS_PER_HOUR),
        })
    }

    /// Returns the age as "X years, Y months, Z days".
    pub fn sentence(&self) -> String {
        format!(
            "{} year{}, {} month{}, {} day{}",
            self.years,
            plural(self.years as i64),
            self.months,
            plural(self.months as i64),
            self.days,
            plural(self.days as i64)
        )
    }
}

fn calendar_diff(birth: NaiveDate, reference: NaiveDate) -> (i32, i32, i32) {
    let mut years = reference.year() - birth.year();
    let mut months = reference.month() as i32 - birth.month() as i32;
    let mut days = reference.day() as i32 - birth.day() as i32;

    if days < 0 {
        months -= 1;
        let (year, month) = match reference.month() {
            1 => (reference.year() - 1, 12),
            m => (reference.year(), m - 1),
        };
        days += days_in_month(year, month) as i32;
    }

    if months < 0 {
        years -= 1;
        months += 12;
    }

    (years, months, days)
}

/// Milliseconds between the local midnights of the two dates.
pub fn elapsed_millis<Tz: TimeZone>(birth: NaiveDate, reference: NaiveDate, tz: &Tz) -> i64 {
    midnight(reference, tz)
        .signed_duration_since(midnight(birth, tz))
        .num_milliseconds()
}

fn midnight<Tz: TimeZone>(date: NaiveDate, tz: &Tz) -> DateTime<Utc> {
    let naive = date.and_time(NaiveTime::MIN);
    match tz.from_local_datetime(&naive).earliest() {
        Some(local) => local.with_timezone(&Utc),
        // midnight skipped by a DST jump
        None => naive.and_utc(),
    }
}

/// Parses a date-input value (`YYYY-MM-DD`).
pub fn parse_date(input: &str) -> AgeResult<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d").map_err(|_| AgeError::InvalidDate {
        input: input.to_string(),
    })
}

/// One date-input value. Absent, blank and unparseable input all read as
/// "not entered yet".
pub fn read_input(input: Option<&str>) -> Option<NaiveDate> {
    let input = input.filter(|s| !s.trim().is_empty())?;
    match parse_date(input) {
        Ok(date) => Some(date),
        Err(e) => {
            tracing::warn!("{e}; skipping calculation");
            None
        }
    }
}

/// Both dates, or `None` when either one is not usable.
pub fn read_inputs(birth: Option<&str>, reference: Option<&str>) -> Option<(NaiveDate, NaiveDate)> {
    read_input(birth).zip(read_input(reference))
}

/// Number of birthdays reached on `reference`.
pub fn completed_years(birth: NaiveDate, reference: NaiveDate) -> i32 {
    let mut years = reference.year() - birth.year();
    if (reference.month(), reference.day()) < (birth.month(), birth.day()) {
        years -= 1;
    }
    years
}

/// The `n`-th birthday. Feb 29 rolls over to Mar 1 in non-leap years.
pub fn anniversary(birth: NaiveDate, n: u32) -> Option<NaiveDate> {
    let year = birth.year().checked_add(i32::try_from(n).ok()?)?;
    NaiveDate::from_ymd_opt(year, birth.month(), birth.day())
        .or_else(|| NaiveDate::from_ymd_opt(year, 3, 1))
}

pub fn plural(n: i64) -> &'static str {
    if n == 1 { "" } else { "s" }
}

pub fn days_in_month(year: i32, month: u32) -> u32 {
    const LENGTHS: [u32; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];
    match month {
        2 if is_leap_year(year) => 29,
        1..=12 => LENGTHS[month as usize - 1],
        _ => 0,
    }
}

pub fn is_leap_year(year: i32) -> bool {
    year % 400 == 0 || (year % 100 != 0 && year % 4 == 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Days, FixedOffset, Months, TimeDelta};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn add_elapsed(birth: NaiveDate, age: &ElapsedAge) -> NaiveDate {
        let months = (age.years * 12 + age.months) as u32;
        birth
            .checked_add_months(Months::new(months))
            .and_then(|d| d.checked_add_signed(TimeDelta::days(age.days as i64)))
            .unwrap()
    }

    #[test]
    fn identical_dates_are_zero() {
        let d = date(2010, 5, 17);
        let age = ElapsedAge::between(d, d).unwrap();
        assert_eq!(
            age,
            ElapsedAge {
                years: 0,
                months: 0,
                days: 0,
                hours: 0
            }
        );
    }

    #[test]
    fn leap_day_to_leap_day() {
        let age = ElapsedAge::between(date(2000, 2, 29), date(2024, 2, 29)).unwrap();
        assert_eq!((age.years, age.months, age.days), (24, 0, 0));
    }

    #[test]
    fn leap_day_in_non_leap_year_borrows_january() {
        let age = ElapsedAge::between(date(2000, 2, 29), date(2023, 2, 28)).unwrap();
        assert_eq!((age.years, age.months, age.days), (22, 11, 30));
    }

    #[test]
    fn end_of_month_borrow_from_short_february() {
        // Feb 2023 has 28 days: 1 - 31 + 28 = -2 after the single borrow.
        let age = ElapsedAge::between(date(2023, 1, 31), date(2023, 3, 1)).unwrap();
        assert_eq!((age.years, age.months, age.days), (0, 1, -2));
        assert_eq!(age.hours, 29 * 24);
    }

    #[test]
    fn borrow_across_year_boundary() {
        let age = ElapsedAge::between(date(2020, 12, 15), date(2021, 1, 10)).unwrap();
        assert_eq!((age.years, age.months, age.days), (0, 0, 26));
    }

    #[test]
    fn month_and_day_underflow_together() {
        let age = ElapsedAge::between(date(1992, 6, 14), date(2025, 3, 1)).unwrap();
        assert_eq!((age.years, age.months, age.days), (32, 8, 15));
        assert_eq!(add_elapsed(date(1992, 6, 14), &age), date(2025, 3, 1));
    }

    #[test]
    fn reference_before_birth_is_rejected() {
        let err = ElapsedAge::between(date(2000, 1, 2), date(2000, 1, 1)).unwrap_err();
        assert!(matches!(err, AgeError::ReferenceBeforeBirth { .. }));
    }

    #[test]
    fn hours_are_flat_division_of_elapsed_time() {
        let birth = date(1999, 12, 31);
        let reference = date(2024, 7, 4);
        let age = ElapsedAge::between(birth, reference).unwrap();
        let millis = elapsed_millis(birth, reference, &Utc);
        assert_eq!(age.hours, millis / 3_600_000);
        assert_eq!(age.hours, (reference - birth).num_days() * 24);
    }

    #[test]
    fn fixed_offset_zone_keeps_whole_days() {
        let tz = FixedOffset::east_opt(5 * 3600 + 1800).unwrap();
        let age = ElapsedAge::between_in(date(2024, 3, 9), date(2024, 3, 11), &tz).unwrap();
        assert_eq!(age.hours, 48);
    }

    #[test]
    fn breakdown_stays_in_range_and_round_trips() {
        for birth in [date(1988, 1, 28), date(2000, 2, 1), date(2011, 11, 15)] {
            for offset in (0..900u64).step_by(13) {
                let reference = birth.checked_add_days(Days::new(offset)).unwrap();
                let age = ElapsedAge::between(birth, reference).unwrap();
                assert!(age.years >= 0);
                assert!((0..=11).contains(&age.months), "{birth} -> {reference}");
                assert!((0..=30).contains(&age.days), "{birth} -> {reference}");
                assert_eq!(add_elapsed(birth, &age), reference);
            }
        }
    }

    #[test]
    fn sentence_uses_singular_units() {
        let age = ElapsedAge {
            years: 1,
            months: 2,
            days: 1,
            hours: 0,
        };
        assert_eq!(age.sentence(), "1 year, 2 months, 1 day");
    }

    #[test]
    fn completed_years_waits_for_birthday() {
        assert_eq!(completed_years(date(2000, 6, 15), date(2010, 6, 14)), 9);
        assert_eq!(completed_years(date(2000, 6, 15), date(2010, 6, 15)), 10);
    }

    #[test]
    fn anniversary_of_leap_day() {
        assert_eq!(anniversary(date(2000, 2, 29), 14), Some(date(2014, 3, 1)));
        assert_eq!(anniversary(date(2000, 2, 29), 16), Some(date(2016, 2, 29)));
    }

    #[test]
    fn parses_iso_dates_only() {
        assert_eq!(parse_date(" 2023-01-31 ").unwrap(), date(2023, 1, 31));
        assert!(matches!(
            parse_date("2023-02-30"),
            Err(AgeError::InvalidDate { .. })
        ));
        assert!(parse_date("31/01/2023").is_err());
    }

    #[test]
    fn blank_or_missing_input_withholds_calculation() {
        assert_eq!(read_inputs(Some(""), Some("2020-01-01")), None);
        assert_eq!(read_inputs(Some("2000-01-01"), Some("   ")), None);
        assert_eq!(read_inputs(Some("2000-01-01"), None), None);
        assert_eq!(read_inputs(None, None), None);
    }

    #[test]
    fn unparseable_input_withholds_calculation() {
        assert_eq!(read_inputs(Some("2000-13-45"), Some("2020-01-01")), None);
        assert_eq!(read_input(Some("yesterday")), None);
    }

    #[test]
    fn two_valid_inputs_are_read() {
        assert_eq!(
            read_inputs(Some("2000-02-29"), Some(" 2024-02-29")),
            Some((date(2000, 2, 29), date(2024, 2, 29)))
        );
    }

    #[test]
    fn month_lengths() {
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(1900, 2), 28);
        assert_eq!(days_in_month(2000, 2), 29);
        assert_eq!(days_in_month(2023, 4), 30);
        assert_eq!(days_in_month(2023, 12), 31);
        assert_eq!(days_in_month(2023, 13), 0);
    }
}

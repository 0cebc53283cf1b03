use chrono::{NaiveDate, TimeZone};
use clap::ValueEnum;
use serde::Serialize;

use crate::age::{self, ElapsedAge, plural};
use crate::error::AgeResult;

/// Fixed-length units behind the "show" summaries. These are not calendar
/// exact and can disagree with the year/month/day breakdown.
const APPROX_DAYS_PER_MONTH: i64 = 30;
const APPROX_DAYS_PER_YEAR: i64 = 365;

/// One on-demand summary line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Summary {
    Months,
    Days,
    Hours,
}

/// Everything computed for one calculation request.
#[derive(Debug, Clone, Serialize)]
pub struct AgeReport {
    pub birth: NaiveDate,
    pub reference: NaiveDate,
    pub elapsed: ElapsedAge,
    pub total_months: i64,
    pub total_days_approx: i64,
    pub exact_days: i64,
    pub whole_years: i32,
    pub milestone_years: u32,
    pub days_since_milestone: Option<i64>,
}

impl AgeReport {
    pub fn build<Tz: TimeZone>(
        birth: NaiveDate,
        reference: NaiveDate,
        milestone_years: u32,
        tz: &Tz,
    ) -> AgeResult<Self> {
        let elapsed = ElapsedAge::between_in(birth, reference, tz)?;
        // Whole days come from the calendar; only `hours` depends on `tz`.
        let exact_days = (reference - birth).num_days();

        let days_since_milestone = age::anniversary(birth, milestone_years)
            .filter(|&milestone| milestone < reference)
            .map(|milestone| (reference - milestone).num_days());

        tracing::debug!(
            %birth,
            %reference,
            years = elapsed.years,
            months = elapsed.months,
            days = elapsed.days,
            hours = elapsed.hours,
            "computed elapsed age"
        );

        Ok(Self {
            birth,
            reference,
            elapsed,
            total_months: total_months(&elapsed),
            total_days_approx: total_days_approx(&elapsed),
            exact_days,
            whole_years: age::completed_years(birth, reference),
            milestone_years,
            days_since_milestone,
        })
    }

    /// The sentence shown and spoken for a calculation.
    pub fn sentence(&self) -> String {
        format!("You are {} old", self.elapsed.sentence())
    }

    pub fn summary(&self, which: Summary) -> String {
        match which {
            Summary::Months => format!("You are {} months old", self.total_months),
            Summary::Days => format!("You are {} days old", self.total_days_approx),
            Summary::Hours => format!("You are {} hours old", self.elapsed.hours),
        }
    }

    pub fn milestone_line(&self) -> Option<String> {
        self.days_since_milestone.map(|days| {
            format!(
                "You have been over {} years old for {} day{}",
                self.milestone_years,
                days,
                plural(days)
            )
        })
    }
}

pub fn total_months(elapsed: &ElapsedAge) -> i64 {
    elapsed.years as i64 * 12 + elapsed.months as i64
}

pub fn total_days_approx(elapsed: &ElapsedAge) -> i64 {
    elapsed.days as i64
        + elapsed.months as i64 * APPROX_DAYS_PER_MONTH
        + elapsed.years as i64 * APPROX_DAYS_PER_YEAR
}

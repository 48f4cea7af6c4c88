//! Recurring schedules.
//!
//! A schedule is written `[dd/mm/yyyy][Ddd][frequency]`: the last date the task
//! recurs on, the weekday it recurs on and how often (`weekly` or `biweekly`).
//! For example `[31/12/2021][Mon][weekly]`. An empty string means the task does
//! not recur.

use std::fmt;
use std::sync::LazyLock;

use chrono::{Datelike, Days, Duration, NaiveDate, Weekday};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::clock::{Clock, SystemClock};
use crate::deadline::{parse_date, DATE_FORMAT};
use crate::error::{ModelError, Result};

static SCHEDULE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\[([0-9/]+)\]\[([A-Za-z]{3})\]\[([A-Za-z]+)\]$").expect("schedule pattern")
});

/// How often a recurring task repeats on its weekday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Frequency {
    Weekly,
    Biweekly,
}

impl Frequency {
    fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "weekly" => Some(Frequency::Weekly),
            "biweekly" => Some(Frequency::Biweekly),
            _ => None,
        }
    }

    /// Days between two occurrences.
    pub fn interval_days(self) -> i64 {
        match self {
            Frequency::Weekly => 7,
            Frequency::Biweekly => 14,
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Frequency::Weekly => "weekly",
            Frequency::Biweekly => "biweekly",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct Rule {
    end: NaiveDate,
    weekday: Weekday,
    frequency: Frequency,
}

impl Rule {
    fn parse(raw: &str) -> Option<Self> {
        let caps = SCHEDULE_REGEX.captures(raw)?;
        let end = parse_date(&caps[1])?;
        let weekday = parse_weekday(&caps[2])?;
        let frequency = Frequency::parse(&caps[3])?;
        Some(Rule { end, weekday, frequency })
    }

    /// Latest date on or before the end date that falls on the weekday.
    fn last_occurrence(&self) -> NaiveDate {
        let back = (7 + self.end.weekday().num_days_from_monday()
            - self.weekday.num_days_from_monday())
            % 7;
        self.end - Duration::days(back as i64)
    }
}

fn parse_weekday(s: &str) -> Option<Weekday> {
    match s.to_lowercase().as_str() {
        "mon" => Some(Weekday::Mon),
        "tue" => Some(Weekday::Tue),
        "wed" => Some(Weekday::Wed),
        "thu" => Some(Weekday::Thu),
        "fri" => Some(Weekday::Fri),
        "sat" => Some(Weekday::Sat),
        "sun" => Some(Weekday::Sun),
        _ => None,
    }
}

/// Optional recurrence of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RecurringSchedule {
    value: Option<Rule>,
}

impl RecurringSchedule {
    pub const FIELD_NAME: &'static str = "RecurringSchedule";
    pub const MESSAGE_CONSTRAINTS: &'static str =
        "Recurring schedule should be in the format [dd/mm/yyyy][Ddd][weekly|biweekly] eg. [23/10/2021][Mon][weekly]";
    pub const MESSAGE_CONSTRAINTS_INVALID_DATE: &'static str =
        "Recurring schedule end date should be after today";

    pub fn new(raw: &str) -> Result<Self> {
        Self::with_clock(raw, &SystemClock)
    }

    /// Build a schedule whose end date must fall strictly after `clock`'s today.
    pub fn with_clock(raw: &str, clock: &impl Clock) -> Result<Self> {
        let schedule = Self::restore(raw)?;
        if let Some(rule) = schedule.value {
            if rule.end <= clock.today() {
                return Err(ModelError::constraint(
                    Self::FIELD_NAME,
                    Self::MESSAGE_CONSTRAINTS_INVALID_DATE,
                ));
            }
        }
        Ok(schedule)
    }

    /// Rebuild a schedule without checking its end date against today.
    pub fn restore(raw: &str) -> Result<Self> {
        if raw.is_empty() {
            return Ok(RecurringSchedule::empty());
        }
        let rule = Rule::parse(raw)
            .ok_or_else(|| ModelError::constraint(Self::FIELD_NAME, Self::MESSAGE_CONSTRAINTS))?;
        tracing::trace!(end = %rule.end, weekday = %rule.weekday, frequency = %rule.frequency, "parsed recurring schedule");
        Ok(RecurringSchedule { value: Some(rule) })
    }

    pub fn empty() -> Self {
        RecurringSchedule { value: None }
    }

    /// Returns true if `test` is empty or a well-formed schedule ending after `today`.
    pub fn is_valid_recurring_schedule_on(test: &str, today: NaiveDate) -> bool {
        test.is_empty() || Rule::parse(test).is_some_and(|rule| rule.end > today)
    }

    pub fn is_empty_value(&self) -> bool {
        self.value.is_none()
    }

    pub fn end_date(&self) -> Option<NaiveDate> {
        self.value.map(|rule| rule.end)
    }

    pub fn weekday(&self) -> Option<Weekday> {
        self.value.map(|rule| rule.weekday)
    }

    pub fn frequency(&self) -> Option<Frequency> {
        self.value.map(|rule| rule.frequency)
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_on(SystemClock.today())
    }

    /// True once `today` is past the end date. A task that does not recur never expires.
    pub fn is_expired_on(&self, today: NaiveDate) -> bool {
        self.value.is_some_and(|rule| today > rule.end)
    }

    /// First date strictly after `after` on which the task recurs.
    ///
    /// Biweekly schedules are aligned so that the last occurrence lands on the
    /// final matching weekday before the end date.
    pub fn next_occurrence(&self, after: NaiveDate) -> Option<NaiveDate> {
        let rule = self.value?;
        let ahead = (7 + rule.weekday.num_days_from_monday()
            - after.weekday().num_days_from_monday())
            % 7;
        let ahead = if ahead == 0 { 7 } else { ahead };
        let mut candidate = after.checked_add_days(Days::new(u64::from(ahead)))?;

        if rule.frequency == Frequency::Biweekly {
            let gap = (rule.last_occurrence() - candidate).num_days();
            if gap.rem_euclid(rule.frequency.interval_days()) != 0 {
                candidate = candidate.checked_add_days(Days::new(7))?;
            }
        }
        (candidate <= rule.end).then_some(candidate)
    }
}

impl fmt::Display for RecurringSchedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.value {
            Some(rule) => write!(
                f,
                "[{}][{}][{}]",
                rule.end.format(DATE_FORMAT),
                rule.weekday,
                rule.frequency
            ),
            None => Ok(()),
        }
    }
}

impl TryFrom<String> for RecurringSchedule {
    type Error = ModelError;

    fn try_from(s: String) -> Result<Self> {
        RecurringSchedule::restore(&s)
    }
}

impl From<RecurringSchedule> for String {
    fn from(schedule: RecurringSchedule) -> String {
        schedule.to_string()
    }
}

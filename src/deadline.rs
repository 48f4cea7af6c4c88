//! Task deadlines.
//!
//! A deadline is either empty or a calendar date written `dd/mm/yyyy`. A new
//! deadline must lie strictly after the day it is created, which makes the
//! validity of a raw string depend on the date it is checked on.

use std::fmt;
use std::sync::LazyLock;

use chrono::{Days, NaiveDate};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::clock::{Clock, SystemClock};
use crate::error::{ModelError, Result};

/// Format used to parse and render deadlines.
pub const DATE_FORMAT: &str = "%d/%m/%Y";

static DEADLINE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(0[1-9]|[12][0-9]|3[01])/(0[1-9]|1[012])/(19|20)\d\d$").expect("deadline pattern")
});

/// Parse a `dd/mm/yyyy` string into a date, checking the pattern and the calendar.
pub(crate) fn parse_date(raw: &str) -> Option<NaiveDate> {
    if !DEADLINE_REGEX.is_match(raw) {
        return None;
    }
    NaiveDate::parse_from_str(raw, DATE_FORMAT).ok()
}

/// Due date of a task, possibly unset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Deadline {
    value: Option<NaiveDate>,
}

impl Deadline {
    pub const FIELD_NAME: &'static str = "Deadline";
    pub const MESSAGE_CONSTRAINTS: &'static str =
        "Deadline should be in the format dd/mm/yyyy and should be a valid date after today eg. 12/08/2021";
    pub const MESSAGE_CONSTRAINTS_INVALID_DATE: &'static str = "Deadline should not be before today";

    /// Number of days covered by [`Deadline::is_within_seven_days`].
    pub const WEEK_DAYS: u64 = 7;

    /// Build a deadline, judging "today" by the local wall clock.
    pub fn new(raw: &str) -> Result<Self> {
        Self::with_clock(raw, &SystemClock)
    }

    /// Build a deadline, judging "today" by `clock`.
    ///
    /// An empty string gives an empty deadline. Anything else must be a
    /// `dd/mm/yyyy` date strictly after today.
    pub fn with_clock(raw: &str, clock: &impl Clock) -> Result<Self> {
        if raw.is_empty() {
            return Ok(Deadline::empty());
        }
        let date = parse_date(raw)
            .ok_or_else(|| ModelError::constraint(Self::FIELD_NAME, Self::MESSAGE_CONSTRAINTS))?;
        let today = clock.today();
        if date <= today {
            return Err(ModelError::constraint(
                Self::FIELD_NAME,
                Self::MESSAGE_CONSTRAINTS_INVALID_DATE,
            ));
        }
        tracing::trace!(%date, %today, "parsed deadline");
        Ok(Deadline { value: Some(date) })
    }

    /// Rebuild a deadline that was valid when first created.
    ///
    /// Only the format is checked, so the date may already be in the past.
    pub fn restore(raw: &str) -> Result<Self> {
        if raw.is_empty() {
            return Ok(Deadline::empty());
        }
        parse_date(raw)
            .map(|date| Deadline { value: Some(date) })
            .ok_or_else(|| ModelError::constraint(Self::FIELD_NAME, Self::MESSAGE_CONSTRAINTS))
    }

    pub fn empty() -> Self {
        Deadline { value: None }
    }

    /// Returns true if `test` would be accepted by [`Deadline::new`] right now.
    pub fn is_valid_deadline(test: &str) -> bool {
        Self::is_valid_deadline_on(test, SystemClock.today())
    }

    /// Returns true if `test` is empty or a well-formed date strictly after `today`.
    pub fn is_valid_deadline_on(test: &str, today: NaiveDate) -> bool {
        tracing::trace!(%today, "checking deadline validity");
        test.is_empty() || parse_date(test).is_some_and(|date| date > today)
    }

    pub fn date(&self) -> Option<NaiveDate> {
        self.value
    }

    pub fn is_empty_value(&self) -> bool {
        self.value.is_none()
    }

    /// Whether the deadline has passed according to the local wall clock.
    pub fn over(&self) -> Result<bool> {
        self.over_on(SystemClock.today())
    }

    /// Whether `today` is strictly after the deadline.
    ///
    /// Fails with [`ModelError::EmptyValue`] on an empty deadline.
    pub fn over_on(&self, today: NaiveDate) -> Result<bool> {
        let date = self.require_date()?;
        Ok(today > date)
    }

    /// Whether the deadline falls before `reference` plus seven days.
    ///
    /// Only the upper bound is checked: a deadline already in the past is still
    /// "within seven days". Combine with [`Deadline::over_on`] to exclude it.
    /// A bound beyond the last representable date counts as unbounded.
    pub fn is_within_seven_days(&self, reference: NaiveDate) -> Result<bool> {
        let date = self.require_date()?;
        Ok(reference
            .checked_add_days(Days::new(Self::WEEK_DAYS))
            .map_or(true, |bound| date < bound))
    }

    fn require_date(&self) -> Result<NaiveDate> {
        self.value.ok_or(ModelError::EmptyValue { field: Self::FIELD_NAME })
    }
}

impl fmt::Display for Deadline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.value {
            Some(date) => write!(f, "{}", date.format(DATE_FORMAT)),
            None => Ok(()),
        }
    }
}

impl TryFrom<String> for Deadline {
    type Error = ModelError;

    fn try_from(s: String) -> Result<Self> {
        Deadline::restore(&s)
    }
}

impl From<Deadline> for String {
    fn from(deadline: Deadline) -> String {
        deadline.to_string()
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use rstest::rstest;

    use chrono::Duration;

    use super::*;
    use crate::clock::FixedClock;

    fn date(d: u32, m: u32, y: i32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[rstest]
    #[case("", true)]
    #[case("27/05/2021", true)]
    #[case("01/01/2099", true)]
    #[case("26/05/2021", false)]
    #[case("25/05/2021", false)]
    #[case("1/06/2021", false)]
    #[case("01/6/2021", false)]
    #[case("32/01/2022", false)]
    #[case("01/13/2022", false)]
    #[case("31/02/2022", false)]
    #[case("01/01/2100", false)]
    #[case("2022-01-01", false)]
    #[case("tomorrow", false)]
    fn test_is_valid_deadline_on(#[case] raw: &str, #[case] valid: bool) {
        let today = date(26, 5, 2021);
        assert_eq!(Deadline::is_valid_deadline_on(raw, today), valid, "{raw}");
        assert_eq!(Deadline::with_clock(raw, &FixedClock(today)).is_ok(), valid, "{raw}");
    }

    #[test]
    fn test_validity_changes_as_time_passes() {
        let raw = "27/05/2021";
        assert!(Deadline::is_valid_deadline_on(raw, date(25, 5, 2021)));
        assert!(Deadline::is_valid_deadline_on(raw, date(26, 5, 2021)));
        assert!(!Deadline::is_valid_deadline_on(raw, date(27, 5, 2021)));
        assert!(!Deadline::is_valid_deadline_on(raw, date(28, 5, 2021)));
    }

    #[test]
    fn test_empty_is_always_valid() {
        assert!(Deadline::is_valid_deadline(""));
        let deadline = Deadline::new("").unwrap();
        assert!(deadline.is_empty_value());
        assert_eq!(deadline.to_string(), "");
        assert_eq!(deadline, Deadline::empty());
    }

    #[test]
    fn test_past_date_reports_temporal_constraint() {
        let err = Deadline::with_clock("01/01/2020", &FixedClock(date(26, 5, 2021))).unwrap_err();
        assert_eq!(
            err,
            ModelError::Constraint {
                field: Deadline::FIELD_NAME,
                message: Deadline::MESSAGE_CONSTRAINTS_INVALID_DATE,
            }
        );

        let err = Deadline::with_clock("1/1/2020", &FixedClock(date(26, 5, 2021))).unwrap_err();
        assert_eq!(
            err,
            ModelError::Constraint {
                field: Deadline::FIELD_NAME,
                message: Deadline::MESSAGE_CONSTRAINTS,
            }
        );
    }

    #[test]
    fn test_over_scenario() {
        let deadline = Deadline::with_clock("27/05/2021", &FixedClock(date(26, 5, 2021))).unwrap();
        assert_eq!(deadline.date(), Some(date(27, 5, 2021)));
        assert_eq!(deadline.over_on(date(28, 5, 2021)), Ok(true));
        assert_eq!(deadline.over_on(date(27, 5, 2021)), Ok(false));
        assert_eq!(deadline.over_on(date(26, 5, 2021)), Ok(false));
    }

    #[test]
    fn test_time_queries_on_empty_deadline_fail() {
        let empty = Deadline::empty();
        let expected = Err(ModelError::EmptyValue { field: Deadline::FIELD_NAME });
        assert_eq!(empty.over_on(date(1, 1, 2021)), expected);
        assert_eq!(empty.is_within_seven_days(date(1, 1, 2021)), expected);
        assert_eq!(empty.over(), expected);
    }

    #[rstest]
    #[case(date(26, 5, 2021), true)]
    #[case(date(21, 5, 2021), true)]
    #[case(date(20, 5, 2021), false)]
    #[case(date(1, 6, 2021), true)]
    #[case(date(1, 1, 2000), false)]
    fn test_is_within_seven_days(#[case] reference: NaiveDate, #[case] expected: bool) {
        let deadline = Deadline::restore("27/05/2021").unwrap();
        assert_eq!(deadline.is_within_seven_days(reference), Ok(expected));
    }

    #[test]
    fn test_within_seven_days_ignores_past_deadlines() {
        let deadline = Deadline::restore("01/01/2021").unwrap();
        assert_eq!(deadline.is_within_seven_days(date(26, 5, 2021)), Ok(true));
        assert_eq!(deadline.over_on(date(26, 5, 2021)), Ok(true));
    }

    #[test]
    fn test_within_seven_days_near_last_representable_date() {
        let deadline = Deadline::restore("27/05/2021").unwrap();
        assert_eq!(deadline.is_within_seven_days(NaiveDate::MAX), Ok(true));
        assert_eq!(
            deadline.is_within_seven_days(NaiveDate::MAX - Duration::days(3)),
            Ok(true)
        );
    }

    #[test]
    fn test_restore_skips_temporal_check() {
        let restored = Deadline::restore("01/01/1999").unwrap();
        assert_eq!(restored.to_string(), "01/01/1999");
        assert!(Deadline::restore("31/02/1999").is_err());
        assert!(Deadline::restore("").unwrap().is_empty_value());
    }

    #[test]
    fn test_serde_uses_restore() {
        let deadline: Deadline = serde_json::from_str("\"15/03/2001\"").unwrap();
        assert_eq!(deadline.date(), Some(date(15, 3, 2001)));
        assert_eq!(serde_json::to_string(&deadline).unwrap(), "\"15/03/2001\"");
        assert_eq!(serde_json::to_string(&Deadline::empty()).unwrap(), "\"\"");
    }

    fn any_supported_date() -> impl Strategy<Value = NaiveDate> {
        (1900i32..=2099, 1u32..=365).prop_map(|(year, ordinal)| {
            NaiveDate::from_yo_opt(year, ordinal).unwrap()
        })
    }

    proptest! {
        #[test]
        fn prop_future_dates_round_trip(deadline in any_supported_date(), back in 1i64..3650) {
            let today = deadline - Duration::days(back);
            let raw = deadline.format(DATE_FORMAT).to_string();
            let parsed = Deadline::with_clock(&raw, &FixedClock(today)).unwrap();
            prop_assert_eq!(parsed.to_string(), raw);
            prop_assert_eq!(parsed.date(), Some(deadline));
        }

        #[test]
        fn prop_dates_on_or_before_today_are_rejected(deadline in any_supported_date(), ahead in 0i64..3650) {
            let today = deadline + Duration::days(ahead);
            let raw = deadline.format(DATE_FORMAT).to_string();
            prop_assert!(!Deadline::is_valid_deadline_on(&raw, today));
            prop_assert!(Deadline::with_clock(&raw, &FixedClock(today)).is_err());
        }

        #[test]
        fn prop_within_seven_days_is_a_plain_upper_bound(deadline in any_supported_date(), offset in -400i64..400) {
            let reference = deadline + Duration::days(offset);
            let parsed = Deadline::restore(&deadline.format(DATE_FORMAT).to_string()).unwrap();
            prop_assert_eq!(
                parsed.is_within_seven_days(reference),
                Ok(deadline < reference + Duration::days(7))
            );
        }
    }
}

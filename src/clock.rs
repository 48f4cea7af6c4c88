//! Source of "today" for every time-dependent rule in the model.
//!
//! Deadline and recurrence validity depend on the current date, so the date is
//! read through [`Clock`] instead of being fetched globally. Production code uses
//! [`SystemClock`]; tests pin the date with [`FixedClock`].

use chrono::{Local, NaiveDate};

pub trait Clock {
    /// The current calendar date.
    fn today(&self) -> NaiveDate;
}

/// Reads the local wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Always reports the same date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn today(&self) -> NaiveDate {
        (**self).today()
    }
}

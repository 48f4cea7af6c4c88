//! Fixtures shared by the unit tests.
//!
//! Typical tasks are pinned to late May 2021. Their deadlines are rebuilt with
//! `restore`, so they stay usable after those dates have passed.

use chrono::NaiveDate;

use crate::deadline::Deadline;
use crate::fields::{Description, Duration, Status, Tag, Title};
use crate::recurrence::RecurringSchedule;
use crate::task::{Task, TaskBuilder};

pub fn day(d: u32, m: u32, y: i32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// The "today" the typical tasks were written against.
pub fn today() -> NaiveDate {
    day(26, 5, 2021)
}

pub fn title(raw: &str) -> Title {
    Title::new(raw).unwrap()
}

pub fn deadline(raw: &str) -> Deadline {
    Deadline::restore(raw).unwrap()
}

pub fn duration(raw: &str) -> Duration {
    Duration::new(raw).unwrap()
}

pub fn schedule(raw: &str) -> RecurringSchedule {
    RecurringSchedule::restore(raw).unwrap()
}

pub fn description(raw: &str) -> Description {
    Description::new(raw).unwrap()
}

pub fn tag(raw: &str) -> Tag {
    Tag::new(raw).unwrap()
}

pub fn alice() -> Task {
    TaskBuilder::new(title("Alice Pauline"))
        .with_deadline(deadline("28/05/2021"))
        .with_duration(duration("10:00-12:00"))
        .with_recurring_schedule(schedule("[30/06/2021][Mon][weekly]"))
        .with_description(description("Buy groceries"))
        .with_status(Status::not_done())
        .with_tags([tag("friends")])
        .build()
}

pub fn benson() -> Task {
    TaskBuilder::new(title("Benson Meier"))
        .with_deadline(deadline("01/06/2021"))
        .with_description(description("Submit report"))
        .with_status(Status::not_done())
        .with_tags([tag("owesMoney"), tag("friends")])
        .build()
}

pub fn carl() -> Task {
    TaskBuilder::new(title("Carl Kurz"))
        .with_description(description("Call the bank"))
        .build()
}

pub fn daniel() -> Task {
    TaskBuilder::new(title("Daniel Meier"))
        .with_deadline(deadline("27/05/2021"))
        .with_duration(duration("14:00-15:30"))
        .with_status(Status::done())
        .with_tags([tag("friends")])
        .build()
}

pub fn elle() -> Task {
    TaskBuilder::new(title("Elle Meyer"))
        .with_deadline(deadline("15/06/2021"))
        .build()
}

pub fn fiona() -> Task {
    TaskBuilder::new(title("Fiona Kunz"))
        .with_deadline(deadline("01/01/2021"))
        .with_status(Status::not_done())
        .build()
}

pub fn george() -> Task {
    TaskBuilder::new(title("George Best"))
        .with_deadline(deadline("27/05/2021"))
        .with_recurring_schedule(schedule("[01/07/2021][Thu][biweekly]"))
        .build()
}

pub fn typical_tasks() -> Vec<Task> {
    vec![alice(), benson(), carl(), daniel(), elle(), fiona(), george()]
}

//! # task_planner
//!
//! The task model of a personal planner: validated field values, deadlines,
//! recurring schedules and the immutable `Task` record that ties them together.
//!
//! ## Key Features
//!
//! - **Validated Fields**: every field value is checked once, when it is built
//!   from its raw string, and never changes afterwards
//! - **Deadlines**: `dd/mm/yyyy` dates that must lie in the future when entered,
//!   with "over" and "within seven days" queries
//! - **Recurring Schedules**: weekly or biweekly repeats with an end date
//! - **Immutable Tasks**: edits build a new `Task` through `TaskBuilder`
//! - **Day and Week Views**: date filters over any list of tasks
//!
//! ## Quick Start
//!
//! ```
//! use task_planner::{Deadline, FixedClock, Task, TaskBuilder, Title};
//! use chrono::NaiveDate;
//!
//! let today = NaiveDate::from_ymd_opt(2021, 5, 26).unwrap();
//! let deadline = Deadline::with_clock("27/05/2021", &FixedClock(today)).unwrap();
//!
//! let task: Task = TaskBuilder::new(Title::new("Write report").unwrap())
//!     .with_deadline(deadline)
//!     .build();
//!
//! assert_eq!(task.date_over_on(today), Ok(false));
//! assert_eq!(task.fields()[0], ("Title", "Write report".to_string()));
//! ```
//!
//! "Today" is read through the [`Clock`] trait. Functions without a clock
//! argument use [`SystemClock`]; the `*_on` and `with_clock` variants take the
//! date explicitly.
//!
//! The crate emits `tracing` events while validating and filtering and leaves
//! subscriber setup to the host application.

pub mod clock;
pub mod deadline;
pub mod error;
pub mod fields;
pub mod filter;
pub mod recurrence;
pub mod task;

#[cfg(test)]
mod testutil;

pub use clock::{Clock, FixedClock, SystemClock};
pub use deadline::Deadline;
pub use error::{ModelError, Result};
pub use fields::{parse_tags, Description, Duration, Email, Status, Tag, Title};
pub use filter::{filter_tasks, DateFilter, DateView};
pub use recurrence::{Frequency, RecurringSchedule};
pub use task::{Task, TaskBuilder};

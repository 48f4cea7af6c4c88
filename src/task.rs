//! Task data structure and related functionality.
//!
//! A `Task` bundles the validated field values of one planner entry. Tasks are
//! immutable: every edit, including replacing the tags, builds a new task from
//! the old one's fields.

use std::collections::BTreeSet;
use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::deadline::Deadline;
use crate::error::Result;
use crate::fields::*;
use crate::recurrence::RecurringSchedule;

/// Label used for the tag list in [`Task`]'s `Display` output.
const TAGS_LABEL: &str = "Tags";

/// A planner entry.
///
/// All seven fields are always present; a missing deadline, duration, schedule,
/// description or status is stored as that field's empty value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Task {
    title: Title,
    deadline: Deadline,
    duration: Duration,
    recurring_schedule: RecurringSchedule,
    description: Description,
    status: Status,
    tags: BTreeSet<Tag>,
}

impl Task {
    pub fn new(
        title: Title,
        deadline: Deadline,
        duration: Duration,
        recurring_schedule: RecurringSchedule,
        description: Description,
        status: Status,
        tags: impl IntoIterator<Item = Tag>,
    ) -> Self {
        Task {
            title,
            deadline,
            duration,
            recurring_schedule,
            description,
            status,
            tags: tags.into_iter().collect(),
        }
    }

    pub fn title(&self) -> &Title {
        &self.title
    }

    pub fn deadline(&self) -> &Deadline {
        &self.deadline
    }

    pub fn duration(&self) -> &Duration {
        &self.duration
    }

    pub fn recurring_schedule(&self) -> &RecurringSchedule {
        &self.recurring_schedule
    }

    pub fn description(&self) -> &Description {
        &self.description
    }

    pub fn status(&self) -> &Status {
        &self.status
    }

    pub fn tags(&self) -> &BTreeSet<Tag> {
        &self.tags
    }

    /// Returns a new task with `tags` in place of this task's tags.
    pub fn set_tags(&self, tags: impl IntoIterator<Item = Tag>) -> Task {
        TaskBuilder::from(self).with_tags(tags).build()
    }

    /// Field names paired with their display strings.
    ///
    /// The order is fixed (title, duration, status, deadline, description,
    /// recurring schedule) since renderers lay fields out by position.
    pub fn fields(&self) -> Vec<(&'static str, String)> {
        vec![
            (Title::FIELD_NAME, self.title.to_string()),
            (Duration::FIELD_NAME, self.duration.to_string()),
            (Status::FIELD_NAME, self.status.to_string()),
            (Deadline::FIELD_NAME, self.deadline.to_string()),
            (Description::FIELD_NAME, self.description.to_string()),
            (RecurringSchedule::FIELD_NAME, self.recurring_schedule.to_string()),
        ]
    }

    /// Returns true if both tasks have the same title.
    ///
    /// This is a weaker notion of equality than `==`, used to detect duplicates.
    pub fn is_same_task(&self, other: &Task) -> bool {
        std::ptr::eq(self, other) || self.title == other.title
    }

    /// Whether the deadline has passed. Fails if the task has no deadline.
    pub fn date_over(&self) -> Result<bool> {
        self.deadline.over()
    }

    pub fn date_over_on(&self, today: NaiveDate) -> Result<bool> {
        self.deadline.over_on(today)
    }

    pub fn has_expired(&self) -> bool {
        self.recurring_schedule.is_expired()
    }

    pub fn has_expired_on(&self, today: NaiveDate) -> bool {
        self.recurring_schedule.is_expired_on(today)
    }

    pub fn is_deadline_empty(&self) -> bool {
        self.deadline.is_empty_value()
    }

    pub fn is_duration_empty(&self) -> bool {
        self.duration.is_empty_value()
    }

    pub fn is_recurring_schedule_empty(&self) -> bool {
        self.recurring_schedule.is_empty_value()
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.title)?;
        write!(f, "; \n{}: {}", Deadline::FIELD_NAME, self.deadline)?;
        write!(f, "; \n{}: {}", Duration::FIELD_NAME, self.duration)?;
        write!(f, "; \n{}: {}", RecurringSchedule::FIELD_NAME, self.recurring_schedule)?;
        write!(f, "; \n{}: {}", Description::FIELD_NAME, self.description)?;
        write!(f, "; \n{}: {}", Status::FIELD_NAME, self.status)?;
        if !self.tags.is_empty() {
            write!(f, "; \n{}: ", TAGS_LABEL)?;
            for tag in &self.tags {
                write!(f, "[{}]", tag)?;
            }
        }
        Ok(())
    }
}

/// Record-copy builder for [`Task`].
///
/// Start from an existing task with `TaskBuilder::from(&task)`, replace the
/// fields being edited and call [`TaskBuilder::build`]. The source task is left
/// untouched.
#[derive(Debug, Clone)]
pub struct TaskBuilder {
    title: Title,
    deadline: Deadline,
    duration: Duration,
    recurring_schedule: RecurringSchedule,
    description: Description,
    status: Status,
    tags: BTreeSet<Tag>,
}

impl TaskBuilder {
    /// A builder with the given title and every other field empty.
    pub fn new(title: Title) -> Self {
        TaskBuilder {
            title,
            deadline: Deadline::empty(),
            duration: Duration::default(),
            recurring_schedule: RecurringSchedule::empty(),
            description: Description::default(),
            status: Status::default(),
            tags: BTreeSet::new(),
        }
    }

    pub fn with_title(mut self, title: Title) -> Self {
        self.title = title;
        self
    }

    pub fn with_deadline(mut self, deadline: Deadline) -> Self {
        self.deadline = deadline;
        self
    }

    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    pub fn with_recurring_schedule(mut self, recurring_schedule: RecurringSchedule) -> Self {
        self.recurring_schedule = recurring_schedule;
        self
    }

    pub fn with_description(mut self, description: Description) -> Self {
        self.description = description;
        self
    }

    pub fn with_status(mut self, status: Status) -> Self {
        self.status = status;
        self
    }

    pub fn with_tags(mut self, tags: impl IntoIterator<Item = Tag>) -> Self {
        self.tags = tags.into_iter().collect();
        self
    }

    pub fn build(self) -> Task {
        Task::new(
            self.title,
            self.deadline,
            self.duration,
            self.recurring_schedule,
            self.description,
            self.status,
            self.tags,
        )
    }
}

impl From<&Task> for TaskBuilder {
    fn from(task: &Task) -> Self {
        TaskBuilder {
            title: task.title.clone(),
            deadline: task.deadline,
            duration: task.duration.clone(),
            recurring_schedule: task.recurring_schedule,
            description: task.description.clone(),
            status: task.status.clone(),
            tags: task.tags.clone(),
        }
    }
}

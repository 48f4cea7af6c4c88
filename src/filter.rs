//! Date-based task filtering for day and week views.

use chrono::NaiveDate;
use clap::ValueEnum;

use crate::task::Task;

/// Selects tasks by their deadline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateFilter {
    /// Tasks due on exactly this date.
    OnDate(NaiveDate),
    /// Tasks not yet over on this date and due within the following seven days.
    WithinWeek(NaiveDate),
}

impl DateFilter {
    /// Tasks without a deadline never match.
    pub fn matches(&self, task: &Task) -> bool {
        let deadline = task.deadline();
        match *self {
            DateFilter::OnDate(date) => deadline.date() == Some(date),
            DateFilter::WithinWeek(today) => {
                deadline.over_on(today) == Ok(false)
                    && deadline.is_within_seven_days(today) == Ok(true)
            }
        }
    }
}

/// Calendar views a caller can ask for.
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum DateView {
    Day,
    Week,
}

impl DateView {
    pub fn filter_for(self, date: NaiveDate) -> DateFilter {
        match self {
            DateView::Day => DateFilter::OnDate(date),
            DateView::Week => DateFilter::WithinWeek(date),
        }
    }
}

/// Tasks matching `filter`, in their original order.
pub fn filter_tasks<'a, I>(tasks: I, filter: DateFilter) -> Vec<&'a Task>
where
    I: IntoIterator<Item = &'a Task>,
{
    let matched: Vec<&Task> = tasks.into_iter().filter(|t| filter.matches(t)).collect();
    tracing::debug!(?filter, matched = matched.len(), "filtered tasks by date");
    matched
}

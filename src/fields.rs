//! Field value objects for tasks.
//!
//! Each type wraps one raw string, validated once at construction. Values are
//! immutable and compare by content. `Deadline` and `RecurringSchedule` live in
//! their own modules because their rules depend on the current date.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use chrono::NaiveTime;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};

/// Display, string conversion and serde plumbing shared by the string-backed fields.
macro_rules! string_field {
    ($ty:ident) => {
        impl $ty {
            pub fn as_str(&self) -> &str {
                &self.value
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.value)
            }
        }

        impl AsRef<str> for $ty {
            fn as_ref(&self) -> &str {
                &self.value
            }
        }

        impl FromStr for $ty {
            type Err = ModelError;

            fn from_str(s: &str) -> Result<Self> {
                $ty::new(s)
            }
        }

        impl TryFrom<String> for $ty {
            type Error = ModelError;

            fn try_from(s: String) -> Result<Self> {
                $ty::new(&s)
            }
        }

        impl From<$ty> for String {
            fn from(field: $ty) -> String {
                field.value
            }
        }
    };
}

static TITLE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9][A-Za-z0-9 ]*$").expect("title pattern"));

static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[A-Za-z0-9]+([+_.\-][A-Za-z0-9]+)*@([A-Za-z0-9]([A-Za-z0-9\-]*[A-Za-z0-9])?\.)*[A-Za-z0-9][A-Za-z0-9\-]*[A-Za-z0-9]$",
    )
    .expect("email pattern")
});

static DURATION_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:[01]\d|2[0-3]):[0-5]\d-(?:[01]\d|2[0-3]):[0-5]\d$").expect("duration pattern")
});

static TAG_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9]+$").expect("tag pattern"));

/// Name of a task. Two tasks with the same title are the same task.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Title {
    value: String,
}

impl Title {
    pub const FIELD_NAME: &'static str = "Title";
    pub const MESSAGE_CONSTRAINTS: &'static str =
        "Titles should only contain alphanumeric characters and spaces, and it should not be blank";

    pub fn new(raw: &str) -> Result<Self> {
        if !Self::is_valid_title(raw) {
            return Err(ModelError::constraint(Self::FIELD_NAME, Self::MESSAGE_CONSTRAINTS));
        }
        Ok(Title { value: raw.to_string() })
    }

    pub fn is_valid_title(test: &str) -> bool {
        TITLE_REGEX.is_match(test)
    }
}

string_field!(Title);

/// Free-form notes on a task. Empty means no description.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Description {
    value: String,
}

impl Description {
    pub const FIELD_NAME: &'static str = "Description";
    pub const MESSAGE_CONSTRAINTS: &'static str =
        "Descriptions can take any values, but should not start with a whitespace";

    pub fn new(raw: &str) -> Result<Self> {
        if !Self::is_valid_description(raw) {
            return Err(ModelError::constraint(Self::FIELD_NAME, Self::MESSAGE_CONSTRAINTS));
        }
        Ok(Description { value: raw.to_string() })
    }

    pub fn is_valid_description(test: &str) -> bool {
        !test.starts_with(char::is_whitespace)
    }

    pub fn is_empty_value(&self) -> bool {
        self.value.is_empty()
    }
}

string_field!(Description);

/// Completion state of a task: unset, `done` or `not done`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Status {
    value: String,
}

impl Status {
    pub const FIELD_NAME: &'static str = "Status";
    pub const MESSAGE_CONSTRAINTS: &'static str = "Status should be either 'done' or 'not done'";
    pub const DONE: &'static str = "done";
    pub const NOT_DONE: &'static str = "not done";

    pub fn new(raw: &str) -> Result<Self> {
        if !Self::is_valid_status(raw) {
            return Err(ModelError::constraint(Self::FIELD_NAME, Self::MESSAGE_CONSTRAINTS));
        }
        Ok(Status { value: raw.to_lowercase() })
    }

    pub fn is_valid_status(test: &str) -> bool {
        matches!(test.to_lowercase().as_str(), "" | Self::DONE | Self::NOT_DONE)
    }

    pub fn done() -> Self {
        Status { value: Self::DONE.to_string() }
    }

    pub fn not_done() -> Self {
        Status { value: Self::NOT_DONE.to_string() }
    }

    pub fn is_done(&self) -> bool {
        self.value == Self::DONE
    }

    pub fn is_empty_value(&self) -> bool {
        self.value.is_empty()
    }
}

string_field!(Status);

/// Contact address attached to planner entries.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Email {
    value: String,
}

impl Email {
    pub const FIELD_NAME: &'static str = "Email";
    pub const MESSAGE_CONSTRAINTS: &'static str = "Emails should be of the format local-part@domain. \
        The local-part contains alphanumerics and the characters +_.- but may not start or end \
        with them; the domain is made of labels separated by periods, the last label at least \
        two characters long";

    pub fn new(raw: &str) -> Result<Self> {
        if !Self::is_valid_email(raw) {
            return Err(ModelError::constraint(Self::FIELD_NAME, Self::MESSAGE_CONSTRAINTS));
        }
        Ok(Email { value: raw.to_string() })
    }

    pub fn is_valid_email(test: &str) -> bool {
        EMAIL_REGEX.is_match(test)
    }
}

string_field!(Email);

/// Time slot a task occupies within a day, written `HH:MM-HH:MM`.
///
/// Empty means the task has no time slot.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Duration {
    value: String,
    range: Option<(NaiveTime, NaiveTime)>,
}

impl Duration {
    pub const FIELD_NAME: &'static str = "Duration";
    pub const MESSAGE_CONSTRAINTS: &'static str =
        "Duration should be in the format HH:MM-HH:MM and the start time should be before the end time eg. 10:00-12:30";

    pub fn new(raw: &str) -> Result<Self> {
        if raw.is_empty() {
            return Ok(Duration { value: String::new(), range: None });
        }
        let range = Self::parse_range(raw)
            .ok_or_else(|| ModelError::constraint(Self::FIELD_NAME, Self::MESSAGE_CONSTRAINTS))?;
        Ok(Duration { value: raw.to_string(), range: Some(range) })
    }

    pub fn is_valid_duration(test: &str) -> bool {
        test.is_empty() || Self::parse_range(test).is_some()
    }

    fn parse_range(raw: &str) -> Option<(NaiveTime, NaiveTime)> {
        if !DURATION_REGEX.is_match(raw) {
            return None;
        }
        let (start, end) = raw.split_once('-')?;
        let start = NaiveTime::parse_from_str(start, "%H:%M").ok()?;
        let end = NaiveTime::parse_from_str(end, "%H:%M").ok()?;
        (start < end).then_some((start, end))
    }

    pub fn start(&self) -> Option<NaiveTime> {
        self.range.map(|(start, _)| start)
    }

    pub fn end(&self) -> Option<NaiveTime> {
        self.range.map(|(_, end)| end)
    }

    pub fn is_empty_value(&self) -> bool {
        self.range.is_none()
    }
}

string_field!(Duration);

/// Single-word label used to group tasks.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Tag {
    value: String,
}

impl Tag {
    pub const FIELD_NAME: &'static str = "Tag";
    pub const MESSAGE_CONSTRAINTS: &'static str = "Tags names should be alphanumeric";

    pub fn new(raw: &str) -> Result<Self> {
        if !Self::is_valid_tag(raw) {
            return Err(ModelError::constraint(Self::FIELD_NAME, Self::MESSAGE_CONSTRAINTS));
        }
        Ok(Tag { value: raw.to_string() })
    }

    pub fn is_valid_tag(test: &str) -> bool {
        TAG_REGEX.is_match(test)
    }
}

string_field!(Tag);

/// Normalise a tag string by trimming surrounding whitespace.
///
/// Case is kept, as in [`Tag::new`], so `Work` and `work` are different tags.
pub fn normalise_tag(s: &str) -> String {
    s.trim().to_string()
}

/// Split comma-separated tag inputs, normalise each one and validate the result.
///
/// Blank entries are skipped and duplicates collapse into one tag.
pub fn parse_tags<S: AsRef<str>>(inputs: &[S]) -> Result<BTreeSet<Tag>> {
    let mut tags = BTreeSet::new();
    for raw in inputs {
        for part in raw.as_ref().split(',') {
            let tag = normalise_tag(part);
            if !tag.is_empty() {
                tags.insert(Tag::new(&tag)?);
            }
        }
    }
    Ok(tags)
}

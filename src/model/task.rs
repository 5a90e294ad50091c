use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Error type for building task values
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TaskError {
    #[error("title cannot be empty")]
    BlankTitle,
    #[error("tag names should be alphanumeric: {0:?}")]
    InvalidTag(String),
    #[error("invalid timestamp {0:?} (expected YYYY-MM-DD or YYYY-MM-DD HH:MM)")]
    InvalidTimestamp(String),
}

/// A tag label (without the `#` prefix)
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Tag(String);

impl Tag {
    pub fn new(name: &str) -> Result<Self, TaskError> {
        let name = name.trim().trim_start_matches('#');
        if name.is_empty() || !name.chars().all(char::is_alphanumeric) {
            return Err(TaskError::InvalidTag(name.to_string()));
        }
        Ok(Tag(name.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Tag {
    type Error = TaskError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Tag::new(&value)
    }
}

impl From<Tag> for String {
    fn from(tag: Tag) -> Self {
        tag.0
    }
}

const DATE_FORMAT: &str = "%Y-%m-%d";
const DATE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

/// A point in time attached to a task, parsed from `YYYY-MM-DD` or
/// `YYYY-MM-DD HH:MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Timestamp {
    at: NaiveDateTime,
    /// False when parsed from a bare date; controls display only
    has_time: bool,
}

impl Timestamp {
    pub fn at(&self) -> NaiveDateTime {
        self.at
    }
}

impl FromStr for Timestamp {
    type Err = TaskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(at) = NaiveDateTime::parse_from_str(s, DATE_TIME_FORMAT) {
            return Ok(Timestamp { at, has_time: true });
        }
        NaiveDate::parse_from_str(s, DATE_FORMAT)
            .ok()
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .map(|at| Timestamp {
                at,
                has_time: false,
            })
            .ok_or_else(|| TaskError::InvalidTimestamp(s.to_string()))
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let format = if self.has_time {
            DATE_TIME_FORMAT
        } else {
            DATE_FORMAT
        };
        write!(f, "{}", self.at.format(format))
    }
}

impl TryFrom<String> for Timestamp {
    type Error = TaskError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Timestamp> for String {
    fn from(ts: Timestamp) -> Self {
        ts.to_string()
    }
}

/// A task. Treated as immutable once stored: commands replace whole tasks
/// rather than editing them in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "TaskRecord")]
pub struct Task {
    title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    timestamp: Option<Timestamp>,
    tags: BTreeSet<Tag>,
    done: bool,
}

impl Task {
    /// Create a not-done task with no description, timestamp or tags.
    pub fn new(title: &str) -> Result<Self, TaskError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(TaskError::BlankTitle);
        }
        Ok(Task {
            title: title.to_string(),
            description: None,
            timestamp: None,
            tags: BTreeSet::new(),
            done: false,
        })
    }

    /// Set the description; blank text clears it.
    pub fn with_description(mut self, description: Option<&str>) -> Self {
        self.description = description
            .map(str::trim)
            .filter(|text| !text.is_empty())
            .map(str::to_string);
        self
    }

    pub fn with_timestamp(mut self, timestamp: Option<Timestamp>) -> Self {
        self.timestamp = timestamp;
        self
    }

    pub fn with_tags(mut self, tags: impl IntoIterator<Item = Tag>) -> Self {
        self.tags = tags.into_iter().collect();
        self
    }

    pub fn with_done(mut self, done: bool) -> Self {
        self.done = done;
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn timestamp(&self) -> Option<Timestamp> {
        self.timestamp
    }

    pub fn tags(&self) -> &BTreeSet<Tag> {
        &self.tags
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    pub fn has_tag(&self, tag: &Tag) -> bool {
        self.tags.contains(tag)
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let check = if self.done { 'x' } else { ' ' };
        write!(f, "[{}] {}", check, self.title)?;
        if let Some(ts) = &self.timestamp {
            write!(f, " @ {}", ts)?;
        }
        for tag in &self.tags {
            write!(f, " #{}", tag)?;
        }
        if let Some(desc) = &self.description {
            write!(f, "\n      {}", desc)?;
        }
        Ok(())
    }
}

/// On-disk shape of a task; validated into a [`Task`] on load
#[derive(Deserialize)]
struct TaskRecord {
    title: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    timestamp: Option<Timestamp>,
    #[serde(default)]
    tags: BTreeSet<Tag>,
    #[serde(default)]
    done: bool,
}

impl TryFrom<TaskRecord> for Task {
    type Error = TaskError;

    fn try_from(record: TaskRecord) -> Result<Self, Self::Error> {
        Ok(Task::new(&record.title)?
            .with_description(record.description.as_deref())
            .with_timestamp(record.timestamp)
            .with_tags(record.tags)
            .with_done(record.done))
    }
}

use std::fmt;
use std::rc::Rc;
use std::str::FromStr;

use regex::{Regex, RegexBuilder};

use crate::model::store::TaskStore;
use crate::model::task::{Tag, Task, TaskError, Timestamp};

/// Error type for building filters
#[derive(Debug, thiserror::Error)]
pub enum FilterError {
    #[error("unknown filter {0:?} (try done, not-done, tag:NAME, keyword:TEXT, before:DATE, after:DATE)")]
    UnknownFilter(String),
    #[error("{0}")]
    Task(#[from] TaskError),
}

/// Case-insensitive substring match over title and description
#[derive(Debug, Clone)]
pub struct KeywordFilter {
    keyword: String,
    re: Regex,
}

impl KeywordFilter {
    pub fn new(keyword: &str) -> Result<Self, FilterError> {
        let keyword = keyword.trim();
        if keyword.is_empty() {
            return Err(FilterError::UnknownFilter("keyword:".into()));
        }
        let re = RegexBuilder::new(&regex::escape(keyword))
            .case_insensitive(true)
            .build()
            .map_err(|_| FilterError::UnknownFilter(format!("keyword:{}", keyword)))?;
        Ok(KeywordFilter {
            keyword: keyword.to_string(),
            re,
        })
    }

    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    fn matches(&self, task: &Task) -> bool {
        self.re.is_match(task.title())
            || task.description().is_some_and(|d| self.re.is_match(d))
    }
}

impl PartialEq for KeywordFilter {
    fn eq(&self, other: &Self) -> bool {
        self.keyword == other.keyword
    }
}

impl Eq for KeywordFilter {}

/// A named predicate over tasks
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskFilter {
    Done,
    NotDone,
    Tag(Tag),
    Keyword(KeywordFilter),
    /// Timestamp strictly before; tasks without a timestamp never match
    Before(Timestamp),
    /// Timestamp strictly after; tasks without a timestamp never match
    After(Timestamp),
}

impl TaskFilter {
    pub fn matches(&self, task: &Task) -> bool {
        match self {
            TaskFilter::Done => task.is_done(),
            TaskFilter::NotDone => !task.is_done(),
            TaskFilter::Tag(tag) => task.has_tag(tag),
            TaskFilter::Keyword(kw) => kw.matches(task),
            TaskFilter::Before(ts) => task.timestamp().is_some_and(|t| t.at() < ts.at()),
            TaskFilter::After(ts) => task.timestamp().is_some_and(|t| t.at() > ts.at()),
        }
    }
}

impl fmt::Display for TaskFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskFilter::Done => f.write_str("done"),
            TaskFilter::NotDone => f.write_str("not-done"),
            TaskFilter::Tag(tag) => write!(f, "tag:{}", tag),
            TaskFilter::Keyword(kw) => write!(f, "keyword:{}", kw.keyword()),
            TaskFilter::Before(ts) => write!(f, "before:{}", ts),
            TaskFilter::After(ts) => write!(f, "after:{}", ts),
        }
    }
}

impl FromStr for TaskFilter {
    type Err = FilterError;

    /// Parse the display form back into a filter (`tag:work`, `not-done`, ...)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        match s {
            "done" => return Ok(TaskFilter::Done),
            "not-done" | "undone" => return Ok(TaskFilter::NotDone),
            _ => {}
        }
        if let Some(rest) = s.strip_prefix('#') {
            return Ok(TaskFilter::Tag(Tag::new(rest)?));
        }
        let (kind, arg) = s
            .split_once(':')
            .ok_or_else(|| FilterError::UnknownFilter(s.to_string()))?;
        match kind {
            "tag" => Ok(TaskFilter::Tag(Tag::new(arg)?)),
            "keyword" => Ok(TaskFilter::Keyword(KeywordFilter::new(arg)?)),
            "before" => Ok(TaskFilter::Before(arg.parse()?)),
            "after" => Ok(TaskFilter::After(arg.parse()?)),
            _ => Err(FilterError::UnknownFilter(s.to_string())),
        }
    }
}

/// The ordered set of active filters. A task is visible when every active
/// filter matches it; no filters means everything is visible.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSet {
    filters: Vec<TaskFilter>,
}

impl FilterSet {
    pub fn new() -> Self {
        FilterSet::default()
    }

    pub fn active_filters(&self) -> &[TaskFilter] {
        &self.filters
    }

    pub fn set_filters(&mut self, filters: Vec<TaskFilter>) {
        self.filters = filters;
    }

    pub fn matches(&self, task: &Task) -> bool {
        self.filters.iter().all(|f| f.matches(task))
    }

    /// Visible tasks in store order, each paired with its store index.
    pub fn filtered_view<'a>(
        &'a self,
        store: &'a TaskStore,
    ) -> impl Iterator<Item = (usize, &'a Rc<Task>)> + 'a {
        store
            .iter()
            .enumerate()
            .filter(move |(_, task)| self.matches(task))
    }
}

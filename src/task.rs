use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A task record as seen by the query engine.
///
/// The engine consumes tasks read-only: queries never mutate a record,
/// and results borrow from the snapshot the caller passed in. Identity,
/// timestamps and persistence belong to whatever store supplies the
/// snapshot, not to this type.
///
/// Tags are kept in a [`BTreeSet`] so iteration order and serialized
/// output stay deterministic.
///
/// # Examples
///
/// ```
/// use tasq_lang::Task;
///
/// let task = Task::new("Ship the quarterly report")
///     .with_tag("work")
///     .with_tag("urgent");
///
/// assert!(task.has_tag("work"));
/// assert!(!task.completed);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Short task description
    pub text: String,

    /// Completion flag
    #[serde(default)]
    pub completed: bool,

    /// Free-form tag names, compared case-sensitively by tag predicates
    #[serde(default)]
    pub tags: BTreeSet<String>,
}

impl Task {
    /// Creates an open task with no tags.
    pub fn new(text: impl Into<String>) -> Self {
        Task {
            text: text.into(),
            completed: false,
            tags: BTreeSet::new(),
        }
    }

    /// Adds a tag, consuming and returning the task for chaining.
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.insert(tag.into());
        self
    }

    /// Sets the completion flag, consuming and returning the task.
    pub fn with_completed(mut self, completed: bool) -> Self {
        self.completed = completed;
        self
    }

    /// Exact, case-sensitive tag membership.
    pub fn has_tag(&self, name: &str) -> bool {
        self.tags.contains(name)
    }
}

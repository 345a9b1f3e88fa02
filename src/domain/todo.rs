//! Todo Entity
//!
//! A single to-do item as the rest of the application sees it.

use serde::{Deserialize, Serialize};

/// Store-assigned row id
pub type TodoId = i64;

/// A to-do item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoItem {
    /// Assigned by the store on insert, never changes afterwards
    pub id: TodoId,
    pub title: String,
    pub description: Option<String>,
    pub is_completed: bool,
    /// Epoch seconds
    pub due_date: Option<i64>,
}

impl TodoItem {
    /// Copy of this item with the completion flag flipped
    pub fn toggled(&self) -> Self {
        Self {
            is_completed: !self.is_completed,
            ..self.clone()
        }
    }

    /// Incomplete and due at or before `now` (epoch seconds)
    pub fn is_due_by(&self, now: i64) -> bool {
        !self.is_completed && self.due_date.is_some_and(|due| due <= now)
    }
}

/// Input for creating a to-do; the store assigns the id and the
/// completion flag starts out false.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTodo {
    pub title: String,
    pub description: Option<String>,
    pub due_date: Option<i64>,
}

impl NewTodo {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            due_date: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_due_date(mut self, due_date: i64) -> Self {
        self.due_date = Some(due_date);
        self
    }
}

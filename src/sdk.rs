//! Todo List SDK
//!
//! The single entry point presentation code talks to. It speaks in domain
//! records only and hides which store sits underneath.

use std::path::Path;
use std::sync::Arc;

use crate::domain::{now_epoch_seconds, DomainError, DomainResult, NewTodo, TodoId, TodoItem};
use crate::repository::{init_db, TodoRepository, TodoStore};

pub struct TodoListSdk {
    store: Arc<dyn TodoStore>,
}

impl TodoListSdk {
    pub fn new(store: Arc<dyn TodoStore>) -> Self {
        Self { store }
    }

    /// Open (or create) the SQLite database at `db_path`
    pub async fn open(db_path: &Path) -> DomainResult<Self> {
        let state = init_db(db_path).await?;
        Ok(Self::new(Arc::new(TodoRepository::from_state(&state))))
    }

    pub async fn list_all(&self) -> DomainResult<Vec<TodoItem>> {
        self.store.get_all().await
    }

    pub async fn list_incomplete(&self) -> DomainResult<Vec<TodoItem>> {
        self.store.get_incomplete().await
    }

    /// Incomplete items due at or before `timestamp` (epoch seconds)
    pub async fn list_incomplete_due_by(&self, timestamp: i64) -> DomainResult<Vec<TodoItem>> {
        self.store.get_incomplete_due_by(timestamp).await
    }

    /// Incomplete items whose due date has already passed
    pub async fn list_due_now(&self) -> DomainResult<Vec<TodoItem>> {
        self.list_incomplete_due_by(now_epoch_seconds()).await
    }

    pub async fn get_by_id(&self, id: TodoId) -> DomainResult<Option<TodoItem>> {
        self.store.get_by_id(id).await
    }

    /// Create a new incomplete item. The generated id is not returned;
    /// list again to find the new row.
    pub async fn add(
        &self,
        title: &str,
        description: Option<&str>,
        due_date: Option<i64>,
    ) -> DomainResult<()> {
        require_title(title)?;
        let todo = NewTodo {
            title: title.to_string(),
            description: description.map(str::to_string),
            due_date,
        };
        self.store.insert(&todo).await
    }

    /// Replace title, description, completion and due date of `item.id`
    pub async fn update(&self, item: &TodoItem) -> DomainResult<()> {
        require_title(&item.title)?;
        self.store.update(item).await
    }

    pub async fn mark_completed(&self, id: TodoId) -> DomainResult<()> {
        self.store.mark_completed(id).await
    }

    pub async fn mark_incomplete(&self, id: TodoId) -> DomainResult<()> {
        self.store.mark_incomplete(id).await
    }

    pub async fn delete_by_id(&self, id: TodoId) -> DomainResult<()> {
        self.store.delete_by_id(id).await
    }

    pub async fn delete_completed(&self) -> DomainResult<usize> {
        self.store.delete_completed().await
    }
}

fn require_title(title: &str) -> DomainResult<()> {
    if title.trim().is_empty() {
        return Err(DomainError::InvalidInput("title must not be blank".to_string()));
    }
    Ok(())
}

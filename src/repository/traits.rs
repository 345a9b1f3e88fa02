//! Repository Layer - Core Traits
//!
//! The data access contract the SDK depends on.
//! The SQLite repository implements it; tests substitute their own stores.

use async_trait::async_trait;

use crate::domain::{DomainResult, NewTodo, TodoId, TodoItem};

/// Named to-do queries
///
/// All operations are async; errors from the store come back unchanged.
#[async_trait]
pub trait TodoStore: Send + Sync {
    /// Every row, oldest id first
    async fn get_all(&self) -> DomainResult<Vec<TodoItem>>;

    /// Single row lookup
    async fn get_by_id(&self, id: TodoId) -> DomainResult<Option<TodoItem>>;

    /// Rows not yet completed, regardless of due date
    async fn get_incomplete(&self) -> DomainResult<Vec<TodoItem>>;

    /// Incomplete rows with a due date at or before `timestamp` (epoch seconds)
    async fn get_incomplete_due_by(&self, timestamp: i64) -> DomainResult<Vec<TodoItem>>;

    /// Insert a row with the completion flag cleared.
    /// The generated id is not returned; see `TodoRepository::run_in_transaction_with_result`.
    async fn insert(&self, todo: &NewTodo) -> DomainResult<()>;

    /// Replace every mutable field of the row with `todo.id`
    async fn update(&self, todo: &TodoItem) -> DomainResult<()>;

    async fn mark_completed(&self, id: TodoId) -> DomainResult<()>;

    async fn mark_incomplete(&self, id: TodoId) -> DomainResult<()>;

    async fn delete_by_id(&self, id: TodoId) -> DomainResult<()>;

    /// Remove every completed row, returning how many were removed
    async fn delete_completed(&self) -> DomainResult<usize>;
}

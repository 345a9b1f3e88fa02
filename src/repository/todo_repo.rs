//! Todo Repository
//!
//! SQLite-backed implementation of `TodoStore`, plus scoped transactions.

use std::sync::Arc;

use async_trait::async_trait;
use rusqlite::Connection;
use tokio::sync::Mutex;

use super::db::DbState;
use super::queries::TodoQueries;
use super::traits::TodoStore;
use crate::domain::{DomainResult, NewTodo, TodoId, TodoItem};

/// SQLite implementation of the todo store
#[derive(Clone)]
pub struct TodoRepository {
    conn: Arc<Mutex<Connection>>,
}

impl TodoRepository {
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    pub fn from_state(state: &DbState) -> Self {
        Self::new(state.connection())
    }

    /// Run `work` inside a transaction. Everything it does commits together
    /// when it returns `Ok`, and rolls back when it returns `Err`.
    pub async fn run_in_transaction<F>(&self, work: F) -> DomainResult<()>
    where
        F: FnOnce(&TodoQueries<'_>) -> DomainResult<()> + Send,
    {
        self.run_in_transaction_with_result(work).await
    }

    /// Like `run_in_transaction`, handing back the value `work` produced
    pub async fn run_in_transaction_with_result<T, F>(&self, work: F) -> DomainResult<T>
    where
        T: Send,
        F: FnOnce(&TodoQueries<'_>) -> DomainResult<T> + Send,
    {
        let mut conn = self.conn.lock().await;
        let tx = conn.transaction()?;

        let result = work(&TodoQueries::new(&tx));
        match result {
            Ok(value) => {
                tx.commit()?;
                Ok(value)
            }
            Err(e) => {
                // Dropping the transaction rolls it back.
                drop(tx);
                log::debug!("transaction rolled back: {}", e);
                Err(e)
            }
        }
    }

    /// Insert and return the generated id in one transaction
    pub async fn insert_returning_id(&self, todo: &NewTodo) -> DomainResult<TodoId> {
        let todo = todo.clone();
        self.run_in_transaction_with_result(move |q| {
            q.insert(&todo)?;
            Ok(q.last_insert_id())
        })
        .await
    }
}

#[async_trait]
impl TodoStore for TodoRepository {
    async fn get_all(&self) -> DomainResult<Vec<TodoItem>> {
        let conn = self.conn.lock().await;
        TodoQueries::new(&conn).get_all()
    }

    async fn get_by_id(&self, id: TodoId) -> DomainResult<Option<TodoItem>> {
        let conn = self.conn.lock().await;
        TodoQueries::new(&conn).get_by_id(id)
    }

    async fn get_incomplete(&self) -> DomainResult<Vec<TodoItem>> {
        let conn = self.conn.lock().await;
        TodoQueries::new(&conn).get_incomplete()
    }

    async fn get_incomplete_due_by(&self, timestamp: i64) -> DomainResult<Vec<TodoItem>> {
        let conn = self.conn.lock().await;
        TodoQueries::new(&conn).get_incomplete_due_by(timestamp)
    }

    async fn insert(&self, todo: &NewTodo) -> DomainResult<()> {
        let conn = self.conn.lock().await;
        TodoQueries::new(&conn).insert(todo)
    }

    async fn update(&self, todo: &TodoItem) -> DomainResult<()> {
        let conn = self.conn.lock().await;
        TodoQueries::new(&conn).update(todo)
    }

    async fn mark_completed(&self, id: TodoId) -> DomainResult<()> {
        let conn = self.conn.lock().await;
        TodoQueries::new(&conn).mark_completed(id)
    }

    async fn mark_incomplete(&self, id: TodoId) -> DomainResult<()> {
        let conn = self.conn.lock().await;
        TodoQueries::new(&conn).mark_incomplete(id)
    }

    async fn delete_by_id(&self, id: TodoId) -> DomainResult<()> {
        let conn = self.conn.lock().await;
        TodoQueries::new(&conn).delete_by_id(id)
    }

    async fn delete_completed(&self) -> DomainResult<usize> {
        let conn = self.conn.lock().await;
        let removed = TodoQueries::new(&conn).delete_completed()?;
        log::debug!("deleted {} completed todos", removed);
        Ok(removed)
    }
}

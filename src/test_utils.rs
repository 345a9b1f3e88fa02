//! Shared test utilities used across multiple test modules.
//!
//! Provides an in-memory SDK plus two store wrappers: one that fails on
//! demand and one that holds list calls until the test releases them.

use std::collections::VecDeque;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::{mpsc, oneshot};

use crate::domain::{DomainError, DomainResult, NewTodo, TodoId, TodoItem};
use crate::repository::{init_db, TodoRepository, TodoStore};
use crate::sdk::TodoListSdk;

/// Fresh in-memory repository
pub async fn memory_repo() -> TodoRepository {
    let state = init_db(Path::new(":memory:"))
        .await
        .expect("init in-memory db");
    TodoRepository::from_state(&state)
}

/// SDK over a fresh in-memory database, plus a handle to the same rows
pub async fn memory_sdk() -> (TodoListSdk, TodoRepository) {
    let repo = memory_repo().await;
    (TodoListSdk::new(Arc::new(repo.clone())), repo)
}

fn simulated_failure() -> DomainError {
    DomainError::Store(rusqlite::Error::SqliteFailure(
        rusqlite::ffi::Error::new(rusqlite::ffi::SQLITE_IOERR),
        Some("simulated disk failure".to_string()),
    ))
}

// ========================
// Flaky store
// ========================

/// Delegates to a real repository unless told to fail reads or writes
pub struct FlakyStore {
    inner: TodoRepository,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
}

impl FlakyStore {
    pub fn new(inner: TodoRepository) -> Self {
        Self {
            inner,
            fail_reads: AtomicBool::new(false),
            fail_writes: AtomicBool::new(false),
        }
    }

    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    fn check_read(&self) -> DomainResult<()> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(simulated_failure());
        }
        Ok(())
    }

    fn check_write(&self) -> DomainResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(simulated_failure());
        }
        Ok(())
    }
}

#[async_trait]
impl TodoStore for FlakyStore {
    async fn get_all(&self) -> DomainResult<Vec<TodoItem>> {
        self.check_read()?;
        self.inner.get_all().await
    }

    async fn get_by_id(&self, id: TodoId) -> DomainResult<Option<TodoItem>> {
        self.check_read()?;
        self.inner.get_by_id(id).await
    }

    async fn get_incomplete(&self) -> DomainResult<Vec<TodoItem>> {
        self.check_read()?;
        self.inner.get_incomplete().await
    }

    async fn get_incomplete_due_by(&self, timestamp: i64) -> DomainResult<Vec<TodoItem>> {
        self.check_read()?;
        self.inner.get_incomplete_due_by(timestamp).await
    }

    async fn insert(&self, todo: &NewTodo) -> DomainResult<()> {
        self.check_write()?;
        self.inner.insert(todo).await
    }

    async fn update(&self, todo: &TodoItem) -> DomainResult<()> {
        self.check_write()?;
        self.inner.update(todo).await
    }

    async fn mark_completed(&self, id: TodoId) -> DomainResult<()> {
        self.check_write()?;
        self.inner.mark_completed(id).await
    }

    async fn mark_incomplete(&self, id: TodoId) -> DomainResult<()> {
        self.check_write()?;
        self.inner.mark_incomplete(id).await
    }

    async fn delete_by_id(&self, id: TodoId) -> DomainResult<()> {
        self.check_write()?;
        self.inner.delete_by_id(id).await
    }

    async fn delete_completed(&self) -> DomainResult<usize> {
        self.check_write()?;
        self.inner.delete_completed().await
    }
}

// ========================
// Gated store
// ========================

/// Holds each list call on the next queued gate until the test opens it.
/// Calls made with no gate queued run straight through.
pub struct GatedStore {
    inner: TodoRepository,
    gates: Mutex<VecDeque<oneshot::Receiver<()>>>,
    entered: mpsc::UnboundedSender<()>,
}

impl GatedStore {
    /// Returns the store and a receiver that yields once per gated list
    /// call, as soon as the call has picked up its gate.
    pub fn new(inner: TodoRepository) -> (Self, mpsc::UnboundedReceiver<()>) {
        let (entered, entered_rx) = mpsc::unbounded_channel();
        let store = Self {
            inner,
            gates: Mutex::new(VecDeque::new()),
            entered,
        };
        (store, entered_rx)
    }

    /// Queue a gate for the next list call; send on the returned sender to open it
    pub fn gate(&self) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.gates.lock().unwrap().push_back(rx);
        tx
    }

    async fn wait(&self) {
        let gate = self.gates.lock().unwrap().pop_front();
        if let Some(gate) = gate {
            let _ = self.entered.send(());
            let _ = gate.await;
        }
    }
}

#[async_trait]
impl TodoStore for GatedStore {
    async fn get_all(&self) -> DomainResult<Vec<TodoItem>> {
        self.wait().await;
        self.inner.get_all().await
    }

    async fn get_by_id(&self, id: TodoId) -> DomainResult<Option<TodoItem>> {
        self.inner.get_by_id(id).await
    }

    async fn get_incomplete(&self) -> DomainResult<Vec<TodoItem>> {
        self.wait().await;
        self.inner.get_incomplete().await
    }

    async fn get_incomplete_due_by(&self, timestamp: i64) -> DomainResult<Vec<TodoItem>> {
        self.inner.get_incomplete_due_by(timestamp).await
    }

    async fn insert(&self, todo: &NewTodo) -> DomainResult<()> {
        self.inner.insert(todo).await
    }

    async fn update(&self, todo: &TodoItem) -> DomainResult<()> {
        self.inner.update(todo).await
    }

    async fn mark_completed(&self, id: TodoId) -> DomainResult<()> {
        self.inner.mark_completed(id).await
    }

    async fn mark_incomplete(&self, id: TodoId) -> DomainResult<()> {
        self.inner.mark_incomplete(id).await
    }

    async fn delete_by_id(&self, id: TodoId) -> DomainResult<()> {
        self.inner.delete_by_id(id).await
    }

    async fn delete_completed(&self) -> DomainResult<usize> {
        self.inner.delete_completed().await
    }
}

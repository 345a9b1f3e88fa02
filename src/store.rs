//! Screen State Store
//!
//! Owns the state the to-do screen renders from and turns user intents into
//! SDK calls. State is published through a `watch` channel: read a snapshot
//! with `state()`, or `subscribe()` to be woken on every change.
//!
//! Every operation runs to completion and never returns an error. Failures end
//! in a safe state (not loading, empty list after a failed load) and are kept
//! in `last_error`. Mutations always reload the incomplete list afterwards,
//! whether they succeeded or not.
//!
//! Overlapping operations are not serialized: whichever finishes last decides
//! the final state.

use std::future::Future;
use std::sync::{Arc, Mutex, PoisonError};

use serde::Serialize;
use tokio::sync::watch;

use crate::domain::{DomainResult, TodoItem};
use crate::sdk::TodoListSdk;

/// What the screen shows
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreenState {
    /// An operation is in flight
    pub is_loading: bool,
    /// Result of the last successful load
    pub items: Vec<TodoItem>,
    /// Most recent swallowed failure since the last user intent
    pub last_error: Option<String>,
}

/// Which listing a load fetches. Mutations always fall back to `Incomplete`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ListFilter {
    #[default]
    Incomplete,
    All,
}

/// Screen state controller for the to-do list
#[derive(Clone)]
pub struct TodoListViewModel {
    sdk: Arc<TodoListSdk>,
    state: Arc<watch::Sender<ScreenState>>,
    filter: Arc<Mutex<ListFilter>>,
}

impl TodoListViewModel {
    /// Starts idle with no items; call `load_incomplete` to populate.
    pub fn new(sdk: Arc<TodoListSdk>) -> Self {
        let (state, _) = watch::channel(ScreenState::default());
        Self {
            sdk,
            state: Arc::new(state),
            filter: Arc::new(Mutex::new(ListFilter::default())),
        }
    }

    /// Snapshot of the current state
    pub fn state(&self) -> ScreenState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<ScreenState> {
        self.state.subscribe()
    }

    pub fn filter(&self) -> ListFilter {
        *self.filter.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // ========================
    // Loads
    // ========================

    pub async fn load_incomplete(&self) {
        self.load(ListFilter::Incomplete).await;
    }

    pub async fn load_all(&self) {
        self.load(ListFilter::All).await;
    }

    async fn load(&self, filter: ListFilter) {
        *self.filter.lock().unwrap_or_else(PoisonError::into_inner) = filter;
        self.state.send_modify(|s| s.last_error = None);
        self.reload().await;
    }

    /// Clear the list, fetch with the current filter, publish the outcome
    async fn reload(&self) {
        let filter = self.filter();
        self.state.send_modify(|s| {
            s.is_loading = true;
            s.items.clear();
        });

        let result = match filter {
            ListFilter::Incomplete => self.sdk.list_incomplete().await,
            ListFilter::All => self.sdk.list_all().await,
        };

        match result {
            Ok(items) => self.state.send_modify(|s| {
                s.is_loading = false;
                s.items = items;
            }),
            Err(e) => {
                log::warn!("Error loading todos: {}", e);
                self.state.send_modify(|s| {
                    s.is_loading = false;
                    s.items.clear();
                    s.last_error = Some(e.to_string());
                });
            }
        }
    }

    // ========================
    // Mutations
    // ========================

    pub async fn add_todo(&self, title: &str, description: Option<&str>, due_date: Option<i64>) {
        self.mutate("adding", self.sdk.add(title, description, due_date))
            .await;
    }

    pub async fn update_todo(&self, item: &TodoItem) {
        self.mutate("updating", self.sdk.update(item)).await;
    }

    /// Saves a copy with the completion flag flipped. The list is not
    /// touched until the reload that follows.
    pub async fn toggle_complete(&self, item: &TodoItem) {
        let updated = item.toggled();
        self.mutate("toggling", self.sdk.update(&updated)).await;
    }

    pub async fn delete_todo(&self, item: &TodoItem) {
        self.mutate("deleting", self.sdk.delete_by_id(item.id)).await;
    }

    pub async fn delete_completed(&self) {
        let op = async { self.sdk.delete_completed().await.map(|_| ()) };
        self.mutate("clearing completed", op).await;
    }

    async fn mutate(&self, action: &str, op: impl Future<Output = DomainResult<()>>) {
        self.state.send_modify(|s| {
            s.is_loading = true;
            s.last_error = None;
        });

        if let Err(e) = op.await {
            log::warn!("Error {} todo: {}", action, e);
            self.state
                .send_modify(|s| s.last_error = Some(e.to_string()));
        }

        *self.filter.lock().unwrap_or_else(PoisonError::into_inner) = ListFilter::Incomplete;
        self.reload().await;
    }
}

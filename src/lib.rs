//! Todo List
//!
//! Layered architecture:
//! - domain: the to-do record and shared errors
//! - repository: SQLite schema, named queries, transactions
//! - sdk: the facade presentation code calls
//! - store: screen state controller over the SDK
//! - commands: UI boundary in epoch milliseconds

pub mod commands;
pub mod config;
pub mod domain;
pub mod repository;
pub mod sdk;
pub mod store;

#[cfg(test)]
mod test_utils;

pub use config::AppConfig;
pub use domain::{DomainError, DomainResult, NewTodo, TodoId, TodoItem};
pub use sdk::TodoListSdk;
pub use store::{ListFilter, ScreenState, TodoListViewModel};

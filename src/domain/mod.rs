//! Domain Layer
//!
//! The to-do record, its creation input, and the errors shared by every layer.
//! This layer knows nothing about SQL or screens.

mod due_date;
mod error;
mod todo;

pub use due_date::{millis_to_seconds, now_epoch_seconds, seconds_to_millis};
pub use error::{DomainError, DomainResult};
pub use todo::{NewTodo, TodoId, TodoItem};

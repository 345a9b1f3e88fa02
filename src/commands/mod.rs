//! Commands Layer
//!
//! Handlers a UI calls into. They speak epoch milliseconds and camelCase JSON
//! and forward to the screen state store, which speaks epoch seconds.

mod todo_cmd;

pub use todo_cmd::*;

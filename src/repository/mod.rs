//! Repository Layer
//!
//! Data access abstractions and the SQLite implementation.

mod db;
mod queries;
mod todo_repo;
mod traits;


pub use db::{init_db, DbState};
pub use queries::TodoQueries;
pub use todo_repo::TodoRepository;
pub use traits::TodoStore;

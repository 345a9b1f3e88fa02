//! Named Queries
//!
//! One method per query against the `todo_list` table. The same handle runs on
//! a plain connection or inside a transaction, since `Transaction` derefs to
//! `Connection`.
//!
//! `is_completed` is stored as 0/1; the conversion never leaves this file.

use rusqlite::{params, Connection, OptionalExtension, Params, Row};

use crate::domain::{DomainResult, NewTodo, TodoId, TodoItem};

const GET_ALL_TODOS: &str = "SELECT id, title, description, is_completed, due_date
     FROM todo_list
     ORDER BY id";

const GET_TODO_BY_ID: &str = "SELECT id, title, description, is_completed, due_date
     FROM todo_list
     WHERE id = ?1";

const GET_INCOMPLETE_TODOS: &str = "SELECT id, title, description, is_completed, due_date
     FROM todo_list
     WHERE is_completed = 0
     ORDER BY id";

const GET_INCOMPLETE_TODOS_DUE_BY: &str = "SELECT id, title, description, is_completed, due_date
     FROM todo_list
     WHERE is_completed = 0 AND due_date IS NOT NULL AND due_date <= ?1
     ORDER BY due_date, id";

const INSERT_TODO: &str = "INSERT INTO todo_list (title, description, due_date) VALUES (?1, ?2, ?3)";

const UPDATE_TODO: &str = "UPDATE todo_list
     SET title = ?1, description = ?2, is_completed = ?3, due_date = ?4
     WHERE id = ?5";

const MARK_AS_COMPLETED: &str = "UPDATE todo_list SET is_completed = 1 WHERE id = ?1";

const MARK_AS_INCOMPLETE: &str = "UPDATE todo_list SET is_completed = 0 WHERE id = ?1";

const DELETE_TODO_BY_ID: &str = "DELETE FROM todo_list WHERE id = ?1";

const DELETE_COMPLETED_TODOS: &str = "DELETE FROM todo_list WHERE is_completed = 1";

/// Query handle borrowing a connection or transaction
pub struct TodoQueries<'c> {
    conn: &'c Connection,
}

impl<'c> TodoQueries<'c> {
    pub fn new(conn: &'c Connection) -> Self {
        Self { conn }
    }

    pub fn get_all(&self) -> DomainResult<Vec<TodoItem>> {
        self.select(GET_ALL_TODOS, [])
    }

    pub fn get_by_id(&self, id: TodoId) -> DomainResult<Option<TodoItem>> {
        let item = self
            .conn
            .query_row(GET_TODO_BY_ID, params![id], row_to_todo)
            .optional()?;
        Ok(item)
    }

    pub fn get_incomplete(&self) -> DomainResult<Vec<TodoItem>> {
        self.select(GET_INCOMPLETE_TODOS, [])
    }

    pub fn get_incomplete_due_by(&self, timestamp: i64) -> DomainResult<Vec<TodoItem>> {
        self.select(GET_INCOMPLETE_TODOS_DUE_BY, params![timestamp])
    }

    pub fn insert(&self, todo: &NewTodo) -> DomainResult<()> {
        self.conn.execute(
            INSERT_TODO,
            params![todo.title, todo.description, todo.due_date],
        )?;
        Ok(())
    }

    /// Row id of the most recent successful insert on this connection.
    /// Only meaningful inside the same transaction as the insert.
    pub fn last_insert_id(&self) -> TodoId {
        self.conn.last_insert_rowid()
    }

    pub fn update(&self, todo: &TodoItem) -> DomainResult<()> {
        let changed = self.conn.execute(
            UPDATE_TODO,
            params![
                todo.title,
                todo.description,
                completed_to_int(todo.is_completed),
                todo.due_date,
                todo.id
            ],
        )?;
        if changed == 0 {
            log::debug!("update touched no rows for todo {}", todo.id);
        }
        Ok(())
    }

    pub fn mark_completed(&self, id: TodoId) -> DomainResult<()> {
        self.conn.execute(MARK_AS_COMPLETED, params![id])?;
        Ok(())
    }

    pub fn mark_incomplete(&self, id: TodoId) -> DomainResult<()> {
        self.conn.execute(MARK_AS_INCOMPLETE, params![id])?;
        Ok(())
    }

    pub fn delete_by_id(&self, id: TodoId) -> DomainResult<()> {
        self.conn.execute(DELETE_TODO_BY_ID, params![id])?;
        Ok(())
    }

    pub fn delete_completed(&self) -> DomainResult<usize> {
        let removed = self.conn.execute(DELETE_COMPLETED_TODOS, [])?;
        Ok(removed)
    }

    fn select<P: Params>(&self, sql: &str, params: P) -> DomainResult<Vec<TodoItem>> {
        let mut stmt = self.conn.prepare(sql)?;
        let items = stmt
            .query_map(params, row_to_todo)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(items)
    }
}

fn completed_to_int(completed: bool) -> i64 {
    if completed {
        1
    } else {
        0
    }
}

/// Convert a database row to TodoItem
fn row_to_todo(row: &Row<'_>) -> rusqlite::Result<TodoItem> {
    Ok(TodoItem {
        id: row.get(0)?,
        title: row.get(1)?,
        description: row.get(2)?,
        is_completed: row.get::<_, i64>(3)? != 0,
        due_date: row.get(4)?,
    })
}

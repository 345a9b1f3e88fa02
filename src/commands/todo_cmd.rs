//! Todo Commands
//!
//! Converts UI arguments to store calls. Due dates cross this boundary in
//! epoch milliseconds and are scaled to seconds here, never deeper.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{millis_to_seconds, seconds_to_millis, TodoId, TodoItem};
use crate::store::TodoListViewModel;

const DATE_FORMAT: &str = "%Y-%m-%d";

// ========================
// Argument Structs
// ========================

/// A to-do as the UI sees it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoDto {
    pub id: TodoId,
    pub title: String,
    pub description: Option<String>,
    pub is_completed: bool,
    pub due_date_millis: Option<i64>,
}

impl From<&TodoItem> for TodoDto {
    fn from(item: &TodoItem) -> Self {
        Self {
            id: item.id,
            title: item.title.clone(),
            description: item.description.clone(),
            is_completed: item.is_completed,
            due_date_millis: item.due_date.map(seconds_to_millis),
        }
    }
}

impl From<TodoDto> for TodoItem {
    fn from(dto: TodoDto) -> Self {
        Self {
            id: dto.id,
            title: dto.title,
            description: normalize_description(dto.description),
            is_completed: dto.is_completed,
            due_date: dto.due_date_millis.map(millis_to_seconds),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddTodoArgs {
    pub title: String,
    pub description: Option<String>,
    pub due_date_millis: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTodoArgs {
    pub id: TodoId,
    pub title: String,
    pub description: Option<String>,
    pub is_completed: bool,
    pub due_date_millis: Option<i64>,
}

// ========================
// Commands
// ========================

/// Create a to-do. A blank title is refused before anything is stored.
pub async fn add_todo(vm: &TodoListViewModel, args: AddTodoArgs) -> Result<(), String> {
    let title = require_title(&args.title)?;
    let description = normalize_description(args.description);
    vm.add_todo(
        title,
        description.as_deref(),
        args.due_date_millis.map(millis_to_seconds),
    )
    .await;
    Ok(())
}

/// Save an edited to-do
pub async fn update_todo(vm: &TodoListViewModel, args: UpdateTodoArgs) -> Result<(), String> {
    let title = require_title(&args.title)?.to_string();
    let item = TodoItem {
        id: args.id,
        title,
        description: normalize_description(args.description),
        is_completed: args.is_completed,
        due_date: args.due_date_millis.map(millis_to_seconds),
    };
    vm.update_todo(&item).await;
    Ok(())
}

/// Flip completion of an item currently on screen
pub async fn toggle_todo(vm: &TodoListViewModel, id: TodoId) -> Result<(), String> {
    let item = find_on_screen(vm, id)?;
    vm.toggle_complete(&item).await;
    Ok(())
}

/// Delete an item currently on screen
pub async fn delete_todo(vm: &TodoListViewModel, id: TodoId) -> Result<(), String> {
    let item = find_on_screen(vm, id)?;
    vm.delete_todo(&item).await;
    Ok(())
}

/// Items currently on screen
pub fn screen_items(vm: &TodoListViewModel) -> Vec<TodoDto> {
    vm.state().items.iter().map(TodoDto::from).collect()
}

fn find_on_screen(vm: &TodoListViewModel, id: TodoId) -> Result<TodoItem, String> {
    vm.state()
        .items
        .into_iter()
        .find(|item| item.id == id)
        .ok_or_else(|| format!("Todo {} not found", id))
}

fn require_title(title: &str) -> Result<&str, String> {
    if title.trim().is_empty() {
        Err("Title is required".to_string())
    } else {
        Ok(title)
    }
}

/// Blank descriptions are stored as absent
pub fn normalize_description(description: Option<String>) -> Option<String> {
    description.filter(|d| !d.trim().is_empty())
}

// ========================
// Date display
// ========================

/// Render a due date given in epoch milliseconds as `YYYY-MM-DD` (UTC)
pub fn format_due_date(millis: Option<i64>) -> String {
    let Some(millis) = millis else {
        return "Not set".to_string();
    };
    match DateTime::<Utc>::from_timestamp_millis(millis) {
        Some(date) => date.format(DATE_FORMAT).to_string(),
        None => "Invalid Date".to_string(),
    }
}

/// Parse `YYYY-MM-DD` into epoch milliseconds at UTC midnight
pub fn parse_due_date(text: &str) -> Option<i64> {
    let date = NaiveDate::parse_from_str(text.trim(), DATE_FORMAT).ok()?;
    let midnight = date.and_hms_opt(0, 0, 0)?;
    Some(midnight.and_utc().timestamp_millis())
}

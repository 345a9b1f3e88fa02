//! Todo List entry point
//!
//! Opens the database, loads the incomplete to-dos through the screen state
//! store and prints them as the UI would receive them.
//! An optional first argument points at a JSON config file.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use todo_list::config::APP_NAME;
use todo_list::{commands, AppConfig, TodoListSdk, TodoListViewModel};

#[tokio::main]
async fn main() -> Result<()> {
    let config = match std::env::args_os().nth(1) {
        Some(path) => AppConfig::from_file(Path::new(&path))?,
        None => AppConfig::load()?,
    };

    rolling_logger::init_logger(&config.log_dir, APP_NAME)
        .context("failed to init rolling logger")?;
    let _ = rolling_logger::info(&format!("Opening {}", config.db_path.display()));

    let sdk = TodoListSdk::open(&config.db_path)
        .await
        .context("failed to open database")?;
    let vm = TodoListViewModel::new(Arc::new(sdk));
    vm.load_incomplete().await;

    if let Some(err) = vm.state().last_error {
        let _ = rolling_logger::error(&format!("Initial load failed: {}", err));
    }

    let items = commands::screen_items(&vm);
    println!("{}", serde_json::to_string_pretty(&items)?);
    Ok(())
}

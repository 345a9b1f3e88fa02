//! Rolling Logger
//!
//! Installs a `tracing` subscriber that writes to one log file per day,
//! keeps only the newest few files, and remembers the most recent lines in
//! memory so they can be shown without touching the disk.
//!
//! Records emitted through the `log` facade are bridged into the same
//! subscriber at the same maximum level, so library crates can keep using
//! `log::info!` and friends.

use std::collections::VecDeque;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, OnceLock, PoisonError};

use chrono::{Local, NaiveDate};
use tracing::Level;
use tracing_subscriber::fmt::MakeWriter;

/// Number of daily log files kept on disk
pub const MAX_LOG_FILES: usize = 7;

/// Number of lines kept in the in-memory ring
pub const RING_CAPACITY: usize = 500;

static LOGGER: OnceLock<RollingWriter> = OnceLock::new();

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    #[error("logger already initialized")]
    AlreadyInitialized,
    #[error("logger not initialized")]
    NotInitialized,
    #[error("failed to prepare log file: {0}")]
    Io(#[from] io::Error),
    #[error("failed to install subscriber: {0}")]
    Subscriber(String),
}

/// Initialize the global logger at `INFO` level
pub fn init_logger(log_dir: impl AsRef<Path>, app_name: &str) -> Result<(), LoggerError> {
    init_logger_with_level(log_dir, app_name, Level::INFO)
}

/// Initialize the global logger with an explicit maximum level
pub fn init_logger_with_level(
    log_dir: impl AsRef<Path>,
    app_name: &str,
    level: Level,
) -> Result<(), LoggerError> {
    if LOGGER.get().is_some() {
        return Err(LoggerError::AlreadyInitialized);
    }

    let writer = RollingWriter::open(log_dir.as_ref(), app_name, MAX_LOG_FILES, RING_CAPACITY)?;

    tracing_subscriber::fmt()
        .with_writer(writer.clone())
        .with_ansi(false)
        .with_max_level(level)
        .try_init()
        .map_err(|e| LoggerError::Subscriber(e.to_string()))?;
    log::set_max_level(log_level_filter(level));

    LOGGER
        .set(writer)
        .map_err(|_| LoggerError::AlreadyInitialized)
}

pub fn info(message: &str) -> Result<(), LoggerError> {
    ensure_initialized()?;
    tracing::info!("{}", message);
    Ok(())
}

pub fn error(message: &str) -> Result<(), LoggerError> {
    ensure_initialized()?;
    tracing::error!("{}", message);
    Ok(())
}

/// Most recent log lines, oldest first. Empty before initialization.
pub fn recent_lines() -> Vec<String> {
    LOGGER.get().map(RollingWriter::recent_lines).unwrap_or_default()
}

/// `log` records above this filter are dropped before reaching the bridge
fn log_level_filter(level: Level) -> log::LevelFilter {
    match level {
        Level::ERROR => log::LevelFilter::Error,
        Level::WARN => log::LevelFilter::Warn,
        Level::INFO => log::LevelFilter::Info,
        Level::DEBUG => log::LevelFilter::Debug,
        Level::TRACE => log::LevelFilter::Trace,
    }
}

fn ensure_initialized() -> Result<(), LoggerError> {
    LOGGER.get().map(|_| ()).ok_or(LoggerError::NotInitialized)
}

// ========================
// Writer
// ========================

/// File writer that switches to a new file when the local date changes
#[derive(Clone)]
pub struct RollingWriter {
    inner: Arc<Mutex<Inner>>,
}

struct Inner {
    dir: PathBuf,
    app_name: String,
    date: NaiveDate,
    file: File,
    max_files: usize,
    ring: VecDeque<String>,
    ring_capacity: usize,
}

impl RollingWriter {
    pub fn open(
        dir: &Path,
        app_name: &str,
        max_files: usize,
        ring_capacity: usize,
    ) -> io::Result<Self> {
        fs::create_dir_all(dir)?;
        let date = Local::now().date_naive();
        let file = open_log_file(dir, app_name, date)?;
        prune_old_files(dir, app_name, max_files)?;

        Ok(Self {
            inner: Arc::new(Mutex::new(Inner {
                dir: dir.to_path_buf(),
                app_name: app_name.to_string(),
                date,
                file,
                max_files,
                ring: VecDeque::with_capacity(ring_capacity),
                ring_capacity,
            })),
        })
    }

    pub fn recent_lines(&self) -> Vec<String> {
        let inner = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        inner.ring.iter().cloned().collect()
    }
}

impl Inner {
    fn roll_if_needed(&mut self, today: NaiveDate) -> io::Result<()> {
        if today == self.date {
            return Ok(());
        }
        self.file.flush()?;
        self.file = open_log_file(&self.dir, &self.app_name, today)?;
        self.date = today;
        prune_old_files(&self.dir, &self.app_name, self.max_files)?;
        Ok(())
    }

    fn remember(&mut self, buf: &[u8]) {
        for line in String::from_utf8_lossy(buf).lines() {
            if line.trim().is_empty() {
                continue;
            }
            self.ring.push_back(line.to_string());
        }
        while self.ring.len() > self.ring_capacity {
            self.ring.pop_front();
        }
    }
}

pub struct RollingHandle {
    inner: Arc<Mutex<Inner>>,
}

impl Write for RollingHandle {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut inner = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        inner.roll_if_needed(Local::now().date_naive())?;
        inner.file.write_all(buf)?;
        inner.remember(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        let mut inner = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        inner.file.flush()
    }
}

impl<'a> MakeWriter<'a> for RollingWriter {
    type Writer = RollingHandle;

    fn make_writer(&'a self) -> Self::Writer {
        RollingHandle {
            inner: Arc::clone(&self.inner),
        }
    }
}

fn log_file_name(app_name: &str, date: NaiveDate) -> String {
    format!("{}-{}.log", app_name, date.format("%Y-%m-%d"))
}

fn open_log_file(dir: &Path, app_name: &str, date: NaiveDate) -> io::Result<File> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(dir.join(log_file_name(app_name, date)))
}

/// Remove all but the newest `keep` log files of `app_name`.
/// File names embed ISO dates, so lexical order is chronological.
fn prune_old_files(dir: &Path, app_name: &str, keep: usize) -> io::Result<usize> {
    let prefix = format!("{}-", app_name);
    let mut files: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            path.file_name()
                .and_then(|n| n.to_str())
                .map(|n| n.starts_with(&prefix) && n.ends_with(".log"))
                .unwrap_or(false)
        })
        .collect();

    if files.len() <= keep {
        return Ok(0);
    }

    files.sort();
    let excess = files.len() - keep;
    for path in &files[..excess] {
        fs::remove_file(path)?;
    }
    Ok(excess)
}

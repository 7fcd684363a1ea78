//! Rolling Logger
//!
//! File logging for the desktop backend. `tracing` events (and `log` records,
//! via the tracing-log bridge) are written to `<dir>/<app>.log`, rotated by
//! size, and the most recent lines are kept in memory for diagnostics.

use std::collections::VecDeque;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, OnceLock};

use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::prelude::*;

/// Rotation and retention settings
#[derive(Debug, Clone, Copy)]
pub struct LoggerConfig {
    /// Rotate once the active file reaches this size
    pub max_file_bytes: u64,
    /// Rotated files kept besides the active one
    pub max_backups: usize,
    /// Lines kept in the in-memory ring
    pub recent_capacity: usize,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            max_file_bytes: 5 * 1024 * 1024,
            max_backups: 3,
            recent_capacity: 500,
        }
    }
}

/// Size-rotated log file: `app.log`, `app.log.1` (newest backup), ...
pub struct RollingFile {
    dir: PathBuf,
    base_name: String,
    config: LoggerConfig,
    file: File,
    written: u64,
}

impl RollingFile {
    pub fn open(dir: &Path, app_name: &str, config: LoggerConfig) -> io::Result<Self> {
        fs::create_dir_all(dir)?;
        let base_name = format!("{}.log", app_name);
        let path = dir.join(&base_name);
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        let written = file.metadata()?.len();
        Ok(Self {
            dir: dir.to_path_buf(),
            base_name,
            config,
            file,
            written,
        })
    }

    pub fn active_path(&self) -> PathBuf {
        self.dir.join(&self.base_name)
    }

    fn backup_path(&self, n: usize) -> PathBuf {
        self.dir.join(format!("{}.{}", self.base_name, n))
    }

    fn rotate(&mut self) -> io::Result<()> {
        self.file.flush()?;
        if self.config.max_backups == 0 {
            self.file = File::create(self.active_path())?;
            self.written = 0;
            return Ok(());
        }
        let oldest = self.backup_path(self.config.max_backups);
        if oldest.exists() {
            fs::remove_file(&oldest)?;
        }
        for n in (1..self.config.max_backups).rev() {
            let from = self.backup_path(n);
            if from.exists() {
                fs::rename(&from, self.backup_path(n + 1))?;
            }
        }
        fs::rename(self.active_path(), self.backup_path(1))?;
        self.file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(self.active_path())?;
        self.written = 0;
        Ok(())
    }

    pub fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        if self.written > 0 && self.written + buf.len() as u64 > self.config.max_file_bytes {
            self.rotate()?;
        }
        self.file.write_all(buf)?;
        self.written += buf.len() as u64;
        Ok(())
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.file.flush()
    }
}

/// Bounded ring of the most recent log lines
#[derive(Debug)]
pub struct RecentLines {
    lines: VecDeque<String>,
    capacity: usize,
}

impl RecentLines {
    pub fn new(capacity: usize) -> Self {
        Self {
            lines: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, line: String) {
        if self.capacity == 0 {
            return;
        }
        if self.lines.len() == self.capacity {
            self.lines.pop_front();
        }
        self.lines.push_back(line);
    }

    pub fn snapshot(&self) -> Vec<String> {
        self.lines.iter().cloned().collect()
    }
}

/// File plus ring, shared by every writer the fmt layer makes
pub struct RollingLogger {
    file: Mutex<RollingFile>,
    recent: Mutex<RecentLines>,
}

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl RollingLogger {
    pub fn open(dir: &Path, app_name: &str, config: LoggerConfig) -> io::Result<Self> {
        Ok(Self {
            file: Mutex::new(RollingFile::open(dir, app_name, config)?),
            recent: Mutex::new(RecentLines::new(config.recent_capacity)),
        })
    }

    pub fn write_record(&self, buf: &[u8]) -> io::Result<()> {
        lock(&self.file).write_all(buf)?;
        let text = String::from_utf8_lossy(buf);
        let mut recent = lock(&self.recent);
        for line in text.lines().filter(|l| !l.is_empty()) {
            recent.push(line.to_string());
        }
        Ok(())
    }

    pub fn recent_lines(&self) -> Vec<String> {
        lock(&self.recent).snapshot()
    }
}

/// `MakeWriter` handle over a shared logger
#[derive(Clone)]
pub struct SharedWriter(pub Arc<RollingLogger>);

impl Write for SharedWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.write_record(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        lock(&self.0.file).flush()
    }
}

impl<'a> MakeWriter<'a> for SharedWriter {
    type Writer = SharedWriter;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// Local wall-clock timestamps with milliseconds
struct LocalTime;

impl FormatTime for LocalTime {
    fn format_time(&self, w: &mut Writer<'_>) -> std::fmt::Result {
        write!(w, "{}", chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"))
    }
}

static LOGGER: OnceLock<Arc<RollingLogger>> = OnceLock::new();

/// Install the global subscriber: rolling file plus stderr, INFO and up.
pub fn init_logger(log_dir: impl AsRef<Path>, app_name: &str) -> Result<(), String> {
    init_logger_with(log_dir, app_name, LoggerConfig::default())
}

pub fn init_logger_with(
    log_dir: impl AsRef<Path>,
    app_name: &str,
    config: LoggerConfig,
) -> Result<(), String> {
    let logger = Arc::new(
        RollingLogger::open(log_dir.as_ref(), app_name, config)
            .map_err(|e| format!("Failed to open log file: {}", e))?,
    );
    LOGGER
        .set(logger.clone())
        .map_err(|_| "Logger already initialized".to_string())?;

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(SharedWriter(logger))
        .with_timer(LocalTime)
        .with_ansi(false)
        .with_filter(LevelFilter::INFO);
    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(io::stderr)
        .with_timer(LocalTime)
        .with_filter(LevelFilter::INFO);

    tracing_subscriber::registry()
        .with(file_layer)
        .with(stderr_layer)
        .try_init()
        .map_err(|e| format!("Failed to install subscriber: {}", e))?;

    log::info!("Logging to {}", log_dir.as_ref().display());
    Ok(())
}

fn ensure_init() -> Result<(), String> {
    LOGGER
        .get()
        .map(|_| ())
        .ok_or_else(|| "Logger not initialized".to_string())
}

pub fn info(msg: &str) -> Result<(), String> {
    ensure_init()?;
    tracing::info!("{}", msg);
    Ok(())
}

pub fn warn(msg: &str) -> Result<(), String> {
    ensure_init()?;
    tracing::warn!("{}", msg);
    Ok(())
}

pub fn error(msg: &str) -> Result<(), String> {
    ensure_init()?;
    tracing::error!("{}", msg);
    Ok(())
}

/// Most recent lines written by the global logger
pub fn recent_lines() -> Vec<String> {
    LOGGER.get().map(|l| l.recent_lines()).unwrap_or_default()
}

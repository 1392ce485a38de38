//! Simple file-based logging

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::config::LoggingSettings;

static LOG_FILE: Mutex<Option<File>> = Mutex::new(None);

/// Get the directory where the executable is located
pub fn exe_dir() -> PathBuf {
    std::env::current_exe()
        .unwrap_or_else(|_| PathBuf::from("iowindow.exe"))
        .parent()
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Default log location: `iowindow.log` next to the executable
pub fn default_log_path() -> PathBuf {
    exe_dir().join("iowindow.log")
}

/// Initialize logging to the given file, truncating it.
///
/// Calling this again redirects the sink to the new file.
pub fn init(path: &Path) {
    if let Ok(file) = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(path)
    {
        if let Ok(mut guard) = LOG_FILE.lock() {
            *guard = Some(file);
        }
    }

    log("=== IOWindow Log Started ===");
}

/// Initialize logging from the `[logging]` config section
pub fn init_from_config(settings: &LoggingSettings) {
    if !settings.enabled {
        shutdown();
        return;
    }

    let path = settings.file.clone().unwrap_or_else(default_log_path);
    init(&path);
}

/// Close the log file; later `log!` calls are dropped
pub fn shutdown() {
    if let Ok(mut guard) = LOG_FILE.lock() {
        *guard = None;
    }
}

fn timestamp() -> String {
    chrono::Local::now()
        .format("%Y-%m-%d %H:%M:%S%.3f")
        .to_string()
}

/// Log a message to the file (no-op until `init` has been called)
pub fn log(msg: &str) {
    if let Ok(mut guard) = LOG_FILE.lock() {
        if let Some(ref mut file) = *guard {
            let _ = writeln!(file, "[{}] {}", timestamp(), msg);
            let _ = file.flush();
        }
    }
}

/// Log a formatted message
#[macro_export]
macro_rules! log {
    ($($arg:tt)*) => {
        $crate::log::log(&format!($($arg)*))
    };
}

//! Debug logging for the fontgrid binary.
//!
//! Controlled by the DEBUG_LEVEL environment variable:
//! - 0 or unset: No debugging
//! - 1: Errors only
//! - 2: Info level (grid builds, discovery results)
//! - 3: Debug level (registry hits, deferred loads)
//! - 4: Trace level
//!
//! Output goes to `fontgrid_debug.log` in the system temp directory so the
//! inspector's stdout stays clean. [`init_log_bridge`] routes the `log`
//! facade used by the library crates into the same file.

use parking_lot::Mutex;
use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;
use std::sync::OnceLock;
use std::time::{SystemTime, UNIX_EPOCH};

use log::{LevelFilter, Log, Metadata, Record};

/// Debug level configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum DebugLevel {
    Off = 0,
    Error = 1,
    Info = 2,
    Debug = 3,
    Trace = 4,
}

impl DebugLevel {
    fn from_env() -> Self {
        match std::env::var("DEBUG_LEVEL") {
            Ok(val) => Self::from_number(&val),
            Err(_) => DebugLevel::Off,
        }
    }

    fn from_number(val: &str) -> Self {
        match val.trim().parse::<u8>() {
            Ok(1) => DebugLevel::Error,
            Ok(2) => DebugLevel::Info,
            Ok(3) => DebugLevel::Debug,
            Ok(4) => DebugLevel::Trace,
            _ => DebugLevel::Off,
        }
    }

    fn from_filter(filter: LevelFilter) -> Self {
        match filter {
            LevelFilter::Off => DebugLevel::Off,
            LevelFilter::Error => DebugLevel::Error,
            LevelFilter::Warn | LevelFilter::Info => DebugLevel::Info,
            LevelFilter::Debug => DebugLevel::Debug,
            LevelFilter::Trace => DebugLevel::Trace,
        }
    }

    fn to_filter(self) -> LevelFilter {
        match self {
            DebugLevel::Off => LevelFilter::Off,
            DebugLevel::Error => LevelFilter::Error,
            DebugLevel::Info => LevelFilter::Info,
            DebugLevel::Debug => LevelFilter::Debug,
            DebugLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// File level plus the `log` filter for the bridge.
///
/// Precedence: `cli`, then `rust_log`, then `debug_level` (a `DEBUG_LEVEL`
/// number). The `log` filter keeps the requested granularity, so `warn`
/// drops `info!` records even though the file logger has no warn level.
fn resolve_level(
    cli: Option<LevelFilter>,
    rust_log: Option<LevelFilter>,
    debug_level: Option<&str>,
) -> (DebugLevel, LevelFilter) {
    match cli.or(rust_log) {
        Some(filter) => (DebugLevel::from_filter(filter), filter),
        None => {
            let level = debug_level.map_or(DebugLevel::Off, DebugLevel::from_number);
            (level, level.to_filter())
        }
    }
}

/// Path of the debug log file.
pub fn log_path() -> PathBuf {
    std::env::temp_dir().join("fontgrid_debug.log")
}

struct DebugLogger {
    level: DebugLevel,
    file: Option<std::fs::File>,
}

impl DebugLogger {
    fn new(level: DebugLevel) -> Self {
        if level == DebugLevel::Off {
            return DebugLogger { level, file: None };
        }

        match OpenOptions::new()
            .write(true)
            .truncate(true)
            .create(true)
            .open(log_path())
        {
            Ok(f) => {
                let mut logger = DebugLogger {
                    level,
                    file: Some(f),
                };
                logger.write_raw(&format!(
                    "\n{}\nfontgrid debug session started at {} (level={:?})\n{}\n",
                    "=".repeat(80),
                    get_timestamp(),
                    level,
                    "=".repeat(80)
                ));
                logger
            }
            // An unwritable temp dir just means no debug log.
            Err(_) => DebugLogger { level, file: None },
        }
    }

    /// Change the level, opening the log file if it was not open yet.
    fn set_level(&mut self, level: DebugLevel) {
        if self.file.is_none() && level != DebugLevel::Off {
            *self = DebugLogger::new(level);
        } else {
            self.level = level;
        }
    }

    fn write_raw(&mut self, msg: &str) {
        if let Some(ref mut file) = self.file {
            let _ = file.write_all(msg.as_bytes());
            let _ = file.flush();
        }
    }

    fn log(&mut self, level: DebugLevel, category: &str, msg: &str) {
        if level <= self.level {
            let level_str = match level {
                DebugLevel::Error => "ERROR",
                DebugLevel::Info => "INFO ",
                DebugLevel::Debug => "DEBUG",
                DebugLevel::Trace => "TRACE",
                DebugLevel::Off => return,
            };
            self.write_raw(&format!(
                "[{}] [{}] [{}] {}\n",
                get_timestamp(),
                level_str,
                category,
                msg
            ));
        }
    }
}

static LOGGER: OnceLock<Mutex<DebugLogger>> = OnceLock::new();

fn get_logger() -> &'static Mutex<DebugLogger> {
    LOGGER.get_or_init(|| Mutex::new(DebugLogger::new(DebugLevel::from_env())))
}

fn get_timestamp() -> String {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    format!("{}.{:06}", now.as_secs(), now.subsec_micros())
}

/// Check if debugging is enabled at given level
pub fn is_enabled(level: DebugLevel) -> bool {
    let logger = get_logger().lock();
    level <= logger.level
}

/// Log a message at specified level
pub fn log(level: DebugLevel, category: &str, msg: &str) {
    let mut logger = get_logger().lock();
    logger.log(level, category, msg);
}

/// Log formatted message
pub fn logf(level: DebugLevel, category: &str, args: fmt::Arguments) {
    if is_enabled(level) {
        log(level, category, &format!("{}", args));
    }
}

/// Routes `log` records into the debug file, optionally mirroring to stderr.
struct LogBridge {
    mirror_stderr: bool,
}

impl Log for LogBridge {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let level = match record.level() {
            log::Level::Error => DebugLevel::Error,
            log::Level::Warn | log::Level::Info => DebugLevel::Info,
            log::Level::Debug => DebugLevel::Debug,
            log::Level::Trace => DebugLevel::Trace,
        };
        let msg = record.args().to_string();
        log(level, record.target(), &msg);
        if self.mirror_stderr {
            eprintln!("[{:<5}] {}: {}", record.level(), record.target(), msg);
        }
    }

    fn flush(&self) {}
}

static BRIDGE: OnceLock<LogBridge> = OnceLock::new();

/// Install the `log` bridge.
///
/// Precedence: `cli_level`, then `RUST_LOG`, then `DEBUG_LEVEL`. When
/// `RUST_LOG` is set, records are also mirrored to stderr. Calling this more
/// than once keeps the first bridge.
pub fn init_log_bridge(cli_level: Option<LevelFilter>) {
    let rust_log = std::env::var("RUST_LOG")
        .ok()
        .and_then(|val| val.trim().parse::<LevelFilter>().ok());
    let debug_level = std::env::var("DEBUG_LEVEL").ok();
    let (level, filter) = resolve_level(cli_level, rust_log, debug_level.as_deref());

    // A debug_* macro may already have created the logger from DEBUG_LEVEL.
    let mut logger = LOGGER
        .get_or_init(|| Mutex::new(DebugLogger::new(level)))
        .lock();
    if logger.level != level {
        let previous = logger.level;
        logger.set_level(level);
        logger.log(
            DebugLevel::Info,
            "LOG",
            &format!("Debug level changed from {previous:?} to {level:?}"),
        );
    }
    drop(logger);

    let bridge = BRIDGE.get_or_init(|| LogBridge {
        mirror_stderr: rust_log.is_some(),
    });
    if log::set_logger(bridge).is_ok() {
        log::set_max_level(filter);
    }
}

// Convenience macros for logging
#[macro_export]
macro_rules! debug_error {
    ($category:expr, $($arg:tt)*) => {
        $crate::debug::logf($crate::debug::DebugLevel::Error, $category, format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! debug_info {
    ($category:expr, $($arg:tt)*) => {
        $crate::debug::logf($crate::debug::DebugLevel::Info, $category, format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! debug_log {
    ($category:expr, $($arg:tt)*) => {
        $crate::debug::logf($crate::debug::DebugLevel::Debug, $category, format_args!($($arg)*))
    };
}

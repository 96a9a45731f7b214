//! File logging for cfg-editor.
//!
//! Every `log::info!()` etc. from the workspace crates ends up in
//! `/tmp/cfg_editor_debug.log` on Unix/macOS, or `%TEMP%\cfg_editor_debug.log`
//! on Windows, so diagnostics never mix with command output on stdout.
//!
//! Level precedence: `--log-level` flag, then `RUST_LOG`, then
//! `DEBUG_LEVEL`:
//! - 0 or unset: No logging
//! - 1: Errors only
//! - 2: Info level
//! - 3: Debug level
//! - 4: Trace level
//!
//! When `RUST_LOG` is set, records are mirrored to stderr as well.

use parking_lot::Mutex;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::OnceLock;
use std::time::{SystemTime, UNIX_EPOCH};

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
    fn parse(value: &str) -> Self {
        match value.trim().parse::<u8>() {
            Ok(1) => DebugLevel::Error,
            Ok(2) => DebugLevel::Info,
            Ok(3) => DebugLevel::Debug,
            Ok(4) => DebugLevel::Trace,
            _ => DebugLevel::Off,
        }
    }

    fn from_env() -> Self {
        std::env::var("DEBUG_LEVEL")
            .map(|v| Self::parse(&v))
            .unwrap_or(DebugLevel::Off)
    }

    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            DebugLevel::Off => log::LevelFilter::Off,
            DebugLevel::Error => log::LevelFilter::Error,
            DebugLevel::Info => log::LevelFilter::Info,
            DebugLevel::Debug => log::LevelFilter::Debug,
            DebugLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Path of the debug log file
pub fn log_path() -> PathBuf {
    #[cfg(unix)]
    let log_path = PathBuf::from("/tmp/cfg_editor_debug.log");
    #[cfg(not(unix))]
    let log_path = std::env::temp_dir().join("cfg_editor_debug.log");
    log_path
}

/// Resolve the effective level from the CLI flag and environment
pub fn resolve_level(
    cli_level: Option<log::LevelFilter>,
    rust_log: Option<&str>,
    debug_level: DebugLevel,
) -> log::LevelFilter {
    if let Some(level) = cli_level {
        return level;
    }
    // RUST_LOG may carry module directives; only a bare level is honoured
    if let Some(level) = rust_log.and_then(|v| log::LevelFilter::from_str(v.trim()).ok()) {
        return level;
    }
    debug_level.to_level_filter()
}

struct LogBridge {
    file: Option<Mutex<std::fs::File>>,
    mirror_stderr: bool,
}

impl log::Log for LogBridge {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &log::Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = format!(
            "[{}] [{:<5}] [{}] {}\n",
            get_timestamp(),
            record.level(),
            record.target(),
            record.args()
        );
        if let Some(file) = &self.file {
            let mut file = file.lock();
            let _ = file.write_all(line.as_bytes());
        }
        if self.mirror_stderr {
            eprint!("{line}");
        }
    }

    fn flush(&self) {
        if let Some(file) = &self.file {
            let _ = file.lock().flush();
        }
    }
}

static BRIDGE: OnceLock<LogBridge> = OnceLock::new();

fn get_timestamp() -> String {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    format!("{}.{:06}", now.as_secs(), now.subsec_micros())
}

/// Install the global logger. Safe to call more than once; only the first
/// call takes effect.
pub fn init_log_bridge(cli_level: Option<log::LevelFilter>) {
    let rust_log = std::env::var("RUST_LOG").ok();
    let level = resolve_level(cli_level, rust_log.as_deref(), DebugLevel::from_env());

    let bridge = BRIDGE.get_or_init(|| {
        let file = if level == log::LevelFilter::Off {
            None
        } else {
            // Silently run without a file if it can't be opened
            OpenOptions::new()
                .write(true)
                .truncate(true)
                .create(true)
                .open(log_path())
                .ok()
                .map(|mut f| {
                    let _ = writeln!(
                        f,
                        "{}\ncfg-editor debug session started at {} (level={})\n{}",
                        "=".repeat(80),
                        get_timestamp(),
                        level,
                        "=".repeat(80)
                    );
                    Mutex::new(f)
                })
        };
        LogBridge {
            file,
            mirror_stderr: rust_log.is_some(),
        }
    });

    if log::set_logger(bridge).is_ok() {
        log::set_max_level(level);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_level_parse() {
        assert_eq!(DebugLevel::parse("0"), DebugLevel::Off);
        assert_eq!(DebugLevel::parse(" 3 "), DebugLevel::Debug);
        assert_eq!(DebugLevel::parse("9"), DebugLevel::Off);
        assert_eq!(DebugLevel::parse("verbose"), DebugLevel::Off);
    }

    #[test]
    fn test_resolve_level_precedence() {
        assert_eq!(
            resolve_level(Some(log::LevelFilter::Warn), Some("trace"), DebugLevel::Debug),
            log::LevelFilter::Warn
        );
        assert_eq!(
            resolve_level(None, Some("trace"), DebugLevel::Error),
            log::LevelFilter::Trace
        );
        assert_eq!(
            resolve_level(None, Some("cfg_editor=debug"), DebugLevel::Info),
            log::LevelFilter::Info
        );
        assert_eq!(resolve_level(None, None, DebugLevel::Off), log::LevelFilter::Off);
    }

    #[test]
    fn test_log_path_file_name() {
        assert!(log_path().ends_with("cfg_editor_debug.log"));
    }
}

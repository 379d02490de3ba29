//! Logging bootstrap for the forum core.
//!
//! # Responsibility
//! - Start file-based rolling logs once per process.
//! - Capture panics as sanitized, single-line log events.
//!
//! # Invariants
//! - Repeated init with the active configuration is a no-op.
//! - Init with a different level or directory than the active one is
//!   rejected, never silently applied.
//! - Nothing in here panics.

use flexi_logger::{Cleanup, Criterion, FileSpec, Logger, LoggerHandle, Naming, WriteMode};
use log::{error, info};
use once_cell::sync::OnceCell;
use std::path::{Path, PathBuf};

const LOG_BASENAME: &str = "agora";
const ROTATE_AT_BYTES: u64 = 10 * 1024 * 1024;
const KEEP_LOG_FILES: usize = 5;
const PANIC_SNIPPET_CHARS: usize = 160;

static ACTIVE: OnceCell<ActiveLogging> = OnceCell::new();
static PANIC_HOOK: OnceCell<()> = OnceCell::new();

struct ActiveLogging {
    level: &'static str,
    directory: PathBuf,
    _handle: LoggerHandle,
}

/// Starts core logging with the given level and directory.
///
/// The first successful call wins for the whole process. Later calls with
/// the same configuration return `Ok(())`; calls with a different level or
/// directory return an error describing the active configuration.
///
/// # Errors
/// - `level` is not one of `trace|debug|info|warn|error` (case-insensitive,
///   `warning` accepted for `warn`).
/// - `log_dir` is empty, relative, or cannot be created.
/// - The logger backend fails to start.
pub fn init_logging(level: &str, log_dir: &str) -> Result<(), String> {
    let level = parse_level(level)?;
    let directory = parse_log_dir(log_dir)?;

    let active = ACTIVE.get_or_try_init(|| start_logging(level, directory.clone()))?;
    // Whether this call or an earlier one started logging, conflicting
    // reconfiguration is rejected in one place.
    ensure_matches(active, level, &directory)
}

/// Returns `(level, directory)` of the active logger, or `None` before init.
pub fn logging_status() -> Option<(&'static str, PathBuf)> {
    ACTIVE
        .get()
        .map(|active| (active.level, active.directory.clone()))
}

/// Default log level for the current build profile: `debug` in debug builds,
/// `info` in release builds.
pub fn default_log_level() -> &'static str {
    if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    }
}

fn start_logging(level: &'static str, directory: PathBuf) -> Result<ActiveLogging, String> {
    std::fs::create_dir_all(&directory).map_err(|err| {
        format!(
            "failed to create log directory `{}`: {err}",
            directory.display()
        )
    })?;

    let handle = Logger::try_with_str(level)
        .map_err(|err| format!("invalid log level `{level}`: {err}"))?
        .log_to_file(
            FileSpec::default()
                .directory(directory.as_path())
                .basename(LOG_BASENAME),
        )
        .rotate(
            Criterion::Size(ROTATE_AT_BYTES),
            Naming::Numbers,
            Cleanup::KeepLogFiles(KEEP_LOG_FILES),
        )
        .write_mode(WriteMode::BufferAndFlush)
        .append()
        // detailed_format carries timestamp and source location, so events
        // can be traced back to the emitting module.
        .format_for_files(flexi_logger::detailed_format)
        .start()
        .map_err(|err| format!("failed to start logger: {err}"))?;

    install_panic_hook();

    info!(
        "event=log_init module=logging status=ok level={level} dir={} build={} version={}",
        directory.display(),
        build_profile(),
        env!("CARGO_PKG_VERSION")
    );

    Ok(ActiveLogging {
        level,
        directory,
        _handle: handle,
    })
}

fn ensure_matches(
    active: &ActiveLogging,
    level: &'static str,
    directory: &Path,
) -> Result<(), String> {
    if active.directory != directory {
        return Err(format!(
            "logging already initialized at `{}`; refusing to switch to `{}`",
            active.directory.display(),
            directory.display()
        ));
    }
    if active.level != level {
        return Err(format!(
            "logging already initialized with level `{}`; refusing to switch to `{}`",
            active.level, level
        ));
    }
    Ok(())
}

fn parse_level(level: &str) -> Result<&'static str, String> {
    match level.trim().to_ascii_lowercase().as_str() {
        "trace" => Ok("trace"),
        "debug" => Ok("debug"),
        "info" => Ok("info"),
        "warn" | "warning" => Ok("warn"),
        "error" => Ok("error"),
        other => Err(format!(
            "unsupported log level `{other}`; expected trace|debug|info|warn|error"
        )),
    }
}

fn parse_log_dir(log_dir: &str) -> Result<PathBuf, String> {
    let trimmed = log_dir.trim();
    if trimmed.is_empty() {
        return Err("log_dir cannot be empty".to_string());
    }
    let path = Path::new(trimmed);
    if !path.is_absolute() {
        return Err(format!("log_dir must be an absolute path, got `{trimmed}`"));
    }
    Ok(path.to_path_buf())
}

fn build_profile() -> &'static str {
    if cfg!(debug_assertions) {
        "debug"
    } else {
        "release"
    }
}

fn install_panic_hook() {
    if PANIC_HOOK.set(()).is_err() {
        return;
    }

    let previous = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let location = info
            .location()
            .map(|loc| format!("{}:{}", loc.file(), loc.line()))
            .unwrap_or_else(|| "unknown".to_string());
        error!(
            "event=panic_captured module=logging status=error location={location} payload={}",
            describe_panic(info)
        );
        previous(info);
    }));
}

fn describe_panic(info: &std::panic::PanicHookInfo<'_>) -> String {
    // Panic payloads can carry user-controlled text; flatten and cap it
    // before it reaches the log file.
    let payload = info.payload();
    let message = if let Some(text) = payload.downcast_ref::<&str>() {
        (*text).to_string()
    } else if let Some(text) = payload.downcast_ref::<String>() {
        text.clone()
    } else {
        "non-string panic payload".to_string()
    };
    clean_for_log(&message, PANIC_SNIPPET_CHARS)
}

fn clean_for_log(value: &str, max_chars: usize) -> String {
    let flat = value.replace(['\n', '\r'], " ");
    let mut snippet: String = flat.chars().take(max_chars).collect();
    if flat.chars().count() > max_chars {
        snippet.push_str("...");
    }
    snippet
}

#[cfg(test)]
mod tests {
    use super::{clean_for_log, init_logging, logging_status, parse_level, parse_log_dir};
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn unique_temp_dir(suffix: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time should be after unix epoch")
            .as_nanos();
        std::env::temp_dir().join(format!(
            "agora-logging-{suffix}-{}-{nanos}",
            std::process::id()
        ))
    }

    #[test]
    fn parse_level_accepts_known_values() {
        assert_eq!(parse_level("INFO").expect("INFO should parse"), "info");
        assert_eq!(
            parse_level(" warning ").expect("warning should parse"),
            "warn"
        );
    }

    #[test]
    fn parse_log_dir_rejects_relative_path() {
        let error = parse_log_dir("logs/dev").expect_err("relative paths must be rejected");
        assert!(error.contains("absolute"));
    }

    #[test]
    fn clean_for_log_flattens_newlines_and_truncates() {
        let cleaned = clean_for_log("line1\nline2\rline3", 8);
        assert!(!cleaned.contains('\n'));
        assert!(!cleaned.contains('\r'));
        assert!(cleaned.ends_with("..."));
    }

    #[test]
    fn init_logging_is_idempotent_for_same_config_and_rejects_conflicts() {
        let log_dir = unique_temp_dir("idempotent");
        let log_dir_str = log_dir
            .to_str()
            .expect("temp dir should be valid UTF-8")
            .to_string();
        let second_dir = unique_temp_dir("different");
        let second_dir_str = second_dir
            .to_str()
            .expect("temp dir should be valid UTF-8")
            .to_string();

        init_logging("info", &log_dir_str).expect("first init should succeed");
        init_logging("info", &log_dir_str).expect("same config should be idempotent");

        let level_error =
            init_logging("debug", &log_dir_str).expect_err("level conflict should fail");
        assert!(level_error.contains("refusing to switch"));

        let dir_error =
            init_logging("info", &second_dir_str).expect_err("directory conflict should fail");
        assert!(dir_error.contains("refusing to switch"));

        let (active_level, active_dir) = logging_status().expect("logging should be active");
        assert_eq!(active_level, "info");
        assert_eq!(active_dir, log_dir);
    }
}

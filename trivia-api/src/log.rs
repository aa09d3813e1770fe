//! Structured JSON logging to stderr.
//!
//! Every line is one JSON object:
//!
//! ```json
//! {"level":"info","msg":"request","method":"GET","path":"/questions?page=2","status":"200","ts":"2025-01-16T10:50:00.000Z"}
//! {"level":"warn","msg":"Query param decode failed: dropped 1 param(s)","ts":"2025-01-16T10:50:01.000Z"}
//! ```
//!
//! # Usage
//!
//! ```no_run
//! use trivia_api::log;
//!
//! let addr = "127.0.0.1:5000";
//! log!(info, "listening", addr: addr, store: "sqlite");
//!
//! log::warn!("page size {} is unusually large", 500);
//! log::error!("store failed: {}", "disk I/O error");
//! log::debug!("only in debug builds");
//! ```
//!
//! # Levels
//!
//! `TRIVIA_LOG` (`debug`, `info`, `warn`, `error`) sets the lowest level that
//! is written; it is read once per process and defaults to `info`.
//! `debug!` compiles to nothing in release builds.
//!
//! The macros are exported as `log_info!` and friends and re-exported here as
//! `log::info!`, `log::warn!`, `log::error!` and `log::debug!`.

use std::io::Write;
use std::sync::OnceLock;
use std::time::{SystemTime, UNIX_EPOCH};

/// Log severity, ordered from least to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[non_exhaustive]
pub enum Level {
    /// Diagnostic detail.
    Debug,
    /// Normal operation.
    Info,
    /// Something was dropped or degraded.
    Warn,
    /// An operation failed.
    Error,
}

impl Level {
    /// Parse a level name, ignoring ASCII case.
    pub fn parse(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "debug" => Some(Self::Debug),
            "info" => Some(Self::Info),
            "warn" | "warning" => Some(Self::Warn),
            "error" => Some(Self::Error),
            _ => None,
        }
    }

    /// Lowercase name as written in the `level` field.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

static MIN_LEVEL: OnceLock<Level> = OnceLock::new();

/// Lowest level written, from `TRIVIA_LOG`.
pub fn min_level() -> Level {
    *MIN_LEVEL.get_or_init(|| {
        std::env::var("TRIVIA_LOG")
            .ok()
            .and_then(|v| Level::parse(&v))
            .unwrap_or(Level::Info)
    })
}

/// Whether lines at `level` are written.
#[inline]
pub fn enabled(level: Level) -> bool {
    level >= min_level()
}

#[doc(hidden)]
pub fn __emit(level: Level, msg: &str, fields: &[(&str, &str)]) {
    if !enabled(level) {
        return;
    }
    let line = __build_structured_log(level.as_str(), msg, fields);
    let _ = writeln!(std::io::stderr(), "{line}");
}

/// Level for the identifier given to [`log!`](crate::log!); unknown names log at info.
#[doc(hidden)]
pub fn __level(name: &str) -> Level {
    Level::parse(name).unwrap_or(Level::Info)
}

/// Current UTC time as `YYYY-MM-DDTHH:MM:SS.mmmZ`.
#[doc(hidden)]
#[must_use]
pub fn __format_timestamp() -> String {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    format_timestamp(now.as_secs(), now.subsec_millis())
}

/// Format seconds since the Unix epoch plus milliseconds as ISO 8601 UTC.
///
/// ```
/// assert_eq!(
///     trivia_api::log::format_timestamp(1_737_024_600, 0),
///     "2025-01-16T10:50:00.000Z"
/// );
/// ```
#[must_use]
#[allow(clippy::similar_names)] // doe/doy are the usual names in the civil calendar algorithm
pub fn format_timestamp(secs: u64, millis: u32) -> String {
    let days = secs / 86_400;
    let time_of_day = secs % 86_400;
    let (hours, minutes, seconds) = (time_of_day / 3600, time_of_day % 3600 / 60, time_of_day % 60);

    // Hinnant's civil_from_days, with years starting on March 1st so the
    // leap day is the last day of the year.
    let z = days + 719_468;
    let era = z / 146_097;
    let doe = z - era * 146_097;
    let yoe = (doe - doe / 1460 + doe / 36524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = doy - (153 * mp + 2) / 5 + 1;
    let month = if mp < 10 { mp + 3 } else { mp - 9 };
    let year = yoe + era * 400 + u64::from(month <= 2);

    format!("{year:04}-{month:02}-{day:02}T{hours:02}:{minutes:02}:{seconds:02}.{millis:03}Z")
}

/// Escape a string for use inside a JSON string literal.
#[doc(hidden)]
#[must_use]
pub fn __escape_json(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 8);
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => {
                use std::fmt::Write;
                let _ = write!(out, "\\u{:04x}", c as u32);
            },
            c => out.push(c),
        }
    }
    out
}

#[doc(hidden)]
#[must_use]
pub fn __build_structured_log(level: &str, msg: &str, fields: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(64 + msg.len() + fields.len() * 24);

    out.push_str(r#"{"level":""#);
    out.push_str(level);
    out.push_str(r#"","msg":""#);
    out.push_str(&__escape_json(msg));
    out.push('"');

    for (key, value) in fields {
        out.push_str(r#",""#);
        out.push_str(&__escape_json(key));
        out.push_str(r#"":""#);
        out.push_str(&__escape_json(value));
        out.push('"');
    }

    out.push_str(r#","ts":""#);
    out.push_str(&__format_timestamp());
    out.push_str(r#""}"#);
    out
}

/// Log at info level with a format string.
#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {{
        if $crate::log::enabled($crate::log::Level::Info) {
            $crate::log::__emit($crate::log::Level::Info, &format!($($arg)*), &[]);
        }
    }};
}

/// Log at warn level with a format string.
#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {{
        if $crate::log::enabled($crate::log::Level::Warn) {
            $crate::log::__emit($crate::log::Level::Warn, &format!($($arg)*), &[]);
        }
    }};
}

/// Log at error level with a format string.
#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {{
        if $crate::log::enabled($crate::log::Level::Error) {
            $crate::log::__emit($crate::log::Level::Error, &format!($($arg)*), &[]);
        }
    }};
}

/// Log at debug level with a format string. No-op in release builds.
#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => {{
        #[cfg(debug_assertions)]
        {
            if $crate::log::enabled($crate::log::Level::Debug) {
                $crate::log::__emit($crate::log::Level::Debug, &format!($($arg)*), &[]);
            }
        }
    }};
}

pub use log_debug as debug;
pub use log_error as error;
pub use log_info as info;
pub use log_warn as warn;

/// Structured log line: `log!(level, "message", key: value, ...)`.
///
/// Values are rendered with `Display` and written as JSON strings.
#[macro_export]
macro_rules! log {
    ($level:ident, $msg:expr $(, $key:ident : $value:expr)* $(,)?) => {{
        let level = $crate::log::__level(stringify!($level));
        if $crate::log::enabled(level) {
            let fields: &[(&str, &str)] = &[
                $( (stringify!($key), &format!("{}", $value)) ),*
            ];
            $crate::log::__emit(level, $msg, fields);
        }
    }};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_json() {
        assert_eq!(__escape_json("plain"), "plain");
        assert_eq!(__escape_json(r#"say "hi""#), r#"say \"hi\""#);
        assert_eq!(__escape_json(r"C:\trivia"), r"C:\\trivia");
        assert_eq!(__escape_json("a\nb\tc\rd"), "a\\nb\\tc\\rd");
        assert_eq!(__escape_json("\x00\x1f"), "\\u0000\\u001f");
        assert_eq!(__escape_json("Pokémon"), "Pokémon");
    }

    #[test]
    fn test_known_timestamps() {
        assert_eq!(format_timestamp(0, 0), "1970-01-01T00:00:00.000Z");
        assert_eq!(format_timestamp(1_737_024_600, 0), "2025-01-16T10:50:00.000Z");
        assert_eq!(format_timestamp(951_782_400, 7), "2000-02-29T00:00:00.007Z");
        assert_eq!(format_timestamp(1_709_164_800, 999), "2024-02-29T00:00:00.999Z");
        assert_eq!(format_timestamp(4_102_444_799, 0), "2099-12-31T23:59:59.000Z");
    }

    #[test]
    fn test_current_timestamp_shape() {
        let ts = __format_timestamp();
        assert_eq!(ts.len(), 24);
        assert_eq!(ts.as_bytes()[10], b'T');
        assert!(ts.ends_with('Z'));
        let year: u32 = ts[0..4].parse().unwrap();
        assert!(year >= 2024);
    }

    #[test]
    fn test_structured_line() {
        let line = __build_structured_log(
            "info",
            "request",
            &[("method", "GET"), ("path", "/questions?page=\"2\"")],
        );
        assert!(line.starts_with(r#"{"level":"info","msg":"request","method":"GET","path":"/questions?page=\"2\"","ts":""#));
        assert!(line.ends_with(r#"Z"}"#));
    }

    #[test]
    fn test_level_parse_and_order() {
        assert_eq!(Level::parse("WARNING"), Some(Level::Warn));
        assert_eq!(Level::parse("Debug"), Some(Level::Debug));
        assert_eq!(Level::parse("trace"), None);
        assert!(Level::Error > Level::Warn && Level::Warn > Level::Info);
        assert_eq!(__level("bogus"), Level::Info);
    }

    #[test]
    fn test_default_threshold() {
        // Tests never set TRIVIA_LOG
        assert!(enabled(Level::Error));
        assert!(enabled(Level::Info));
        assert!(!enabled(Level::Debug));
    }

    #[test]
    fn test_macros_expand() {
        log_info!("info {}", 1);
        log_warn!("warn");
        log_error!("error {}", "x");
        log_debug!("debug");
        crate::log!(info, "structured", id: 7, term: "what");
        crate::log!(warn, "no fields");
    }
}

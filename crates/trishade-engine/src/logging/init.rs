use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Once;

use anyhow::{Context, Result};
use chrono::{DateTime, Local};

/// Logger configuration.
///
/// `env_filter` follows the `env_logger` filter syntax (e.g. "info", "warn",
/// "trishade_engine=debug,wgpu=warn").
///
/// `write_style` controls ANSI coloring behavior on stderr. Records teed to
/// `log_file` are never colored.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub env_filter: Option<String>,
    pub write_style: env_logger::WriteStyle,
    /// Session log file; every record is appended to it as well as stderr.
    pub log_file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            env_filter: None,
            write_style: env_logger::WriteStyle::Auto,
            log_file: None,
        }
    }
}

static INIT: Once = Once::new();

/// Initializes the global logger once.
///
/// Subsequent calls are ignored. Intended usage is early in `main`.
pub fn init_logging(config: LoggingConfig) -> Result<()> {
    if INIT.is_completed() {
        return Ok(());
    }

    let file = config
        .log_file
        .as_deref()
        .map(restart_log_file)
        .transpose()?;

    let mut result = Ok(());
    INIT.call_once(|| {
        let mut builder = env_logger::Builder::new();

        if let Some(filter) = &config.env_filter {
            builder.parse_filters(filter);
        } else if let Ok(filter) = std::env::var("RUST_LOG") {
            builder.parse_filters(&filter);
        } else {
            builder.filter_level(log::LevelFilter::Info);
        }

        match file {
            Some(file) => {
                builder
                    .write_style(env_logger::WriteStyle::Never)
                    .target(env_logger::Target::Pipe(Box::new(TeeWriter::new(
                        io::stderr(),
                        file,
                    ))));
            }
            None => {
                builder.write_style(config.write_style);
            }
        }

        result = builder.try_init().context("failed to install logger");
    });
    result?;

    log::debug!("logging initialized");
    Ok(())
}

/// Opens `path` for appending and writes a session header with the local
/// start time.
///
/// Previous sessions are kept; the file only ever grows.
pub fn restart_log_file(path: &Path) -> Result<File> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open log file {}", path.display()))?;

    file.write_all(session_header(Local::now()).as_bytes())
        .and_then(|()| file.flush())
        .with_context(|| format!("failed to write log file {}", path.display()))?;

    Ok(file)
}

fn session_header(started: DateTime<Local>) -> String {
    format!(
        "==== {} {} session started {} ====\n",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
        started.format("%Y-%m-%d %H:%M:%S %:z")
    )
}

/// Writes every record to two sinks. A failing secondary sink never hides
/// output on the primary.
pub(crate) struct TeeWriter<A, B> {
    primary: A,
    secondary: B,
}

impl<A: Write, B: Write> TeeWriter<A, B> {
    pub(crate) fn new(primary: A, secondary: B) -> Self {
        Self { primary, secondary }
    }
}

impl<A: Write, B: Write> Write for TeeWriter<A, B> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.primary.write_all(buf)?;
        let _ = self.secondary.write_all(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        let _ = self.secondary.flush();
        self.primary.flush()
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use chrono::TimeZone;

    use super::*;

    #[test]
    fn header_carries_start_time() {
        let started = Local.with_ymd_and_hms(2024, 3, 9, 14, 5, 7).single().unwrap();
        let header = session_header(started);
        assert!(header.contains("2024-03-09 14:05:07"));
        assert!(header.contains("trishade-engine"));
        assert!(header.ends_with("====\n"));
    }

    #[test]
    fn restart_appends_one_header_per_session() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trishade.log");

        let mut first = restart_log_file(&path).unwrap();
        writeln!(first, "first session record").unwrap();
        drop(first);
        restart_log_file(&path).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        assert_eq!(contents.matches("session started").count(), 2);
        assert!(contents.contains("first session record"));
    }

    #[test]
    fn tee_writes_to_both_sinks() {
        let mut tee = TeeWriter::new(Vec::new(), Vec::new());
        tee.write_all(b"[INFO] hello\n").unwrap();
        tee.flush().unwrap();
        assert_eq!(tee.primary, b"[INFO] hello\n");
        assert_eq!(tee.secondary, b"[INFO] hello\n");
    }

    #[test]
    fn unopenable_log_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = restart_log_file(&dir.path().join("missing").join("x.log")).unwrap_err();
        assert!(err.to_string().contains("failed to open log file"));
    }
}

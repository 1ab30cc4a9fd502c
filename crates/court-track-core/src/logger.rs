//! Logging backends for binaries, benches and tests.
//!
//! The library crates only emit through the `log` facade. A binary installs
//! one backend at startup: [`init_with_level`] for a plain stderr sink, or
//! [`init_tracing`] (feature `tracing`) for `tracing-subscriber` output with
//! span timings.

use std::io::Write;
use std::sync::OnceLock;
use std::time::Instant;

use log::{LevelFilter, Log, Metadata, Record};

struct StderrSink {
    level: LevelFilter,
    started: Instant,
}

/// `court_track_ball::events` → `ball::events`.
fn component(target: &str) -> &str {
    target
        .strip_prefix("court_track_")
        .or_else(|| target.strip_prefix("court_track::"))
        .unwrap_or(target)
}

impl Log for StderrSink {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = format!(
            "{:>8.3}s {:<5} {}: {}",
            self.started.elapsed().as_secs_f64(),
            record.level(),
            component(record.target()),
            record.args()
        );
        let _ = writeln!(std::io::stderr().lock(), "{line}");
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

static SINK: OnceLock<StderrSink> = OnceLock::new();

/// Send `log` records at or above `level` to stderr.
///
/// Only the first call installs the sink; later calls are no-ops.
pub fn init_with_level(level: LevelFilter) -> Result<(), log::SetLoggerError> {
    if SINK.get().is_some() {
        return Ok(());
    }
    let sink = SINK.get_or_init(|| StderrSink {
        level,
        started: Instant::now(),
    });
    log::set_logger(sink)?;
    log::set_max_level(level);
    Ok(())
}

/// Install a `tracing-subscriber` backend.
///
/// `RUST_LOG` overrides `default_level`. Span close events carry their
/// durations; `json` switches to one flattened JSON object per line.
#[cfg(feature = "tracing")]
pub fn init_tracing(
    default_level: tracing::level_filters::LevelFilter,
    json: bool,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    use tracing_subscriber::fmt::format::FmtSpan;
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::builder()
        .with_default_directive(default_level.into())
        .from_env_lossy();
    let builder = fmt()
        .with_env_filter(filter)
        .with_span_events(FmtSpan::CLOSE)
        .with_writer(std::io::stderr);
    if json {
        builder.json().flatten_event(true).try_init()
    } else {
        builder.with_timer(fmt::time::Uptime::default()).try_init()
    }
}

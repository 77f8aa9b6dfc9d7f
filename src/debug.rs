//! Unified logging for par-play.
//!
//! Routes `log::info!()` etc. to stderr with a monotonic timestamp. Level
//! precedence: CLI `--log-level` flag, then `RUST_LOG`, then warn.

use std::io::Write;
use std::str::FromStr;
use std::sync::OnceLock;
use std::time::Instant;

use log::{LevelFilter, Metadata, Record};

struct StderrLogger {
    started: Instant,
}

impl log::Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let elapsed = self.started.elapsed();
        let mut stderr = std::io::stderr().lock();
        let _ = writeln!(
            stderr,
            "[{:>8.3}] [{:5}] [{}] {}",
            elapsed.as_secs_f64(),
            record.level(),
            record.target(),
            record.args()
        );
    }

    fn flush(&self) {}
}

static LOGGER: OnceLock<StderrLogger> = OnceLock::new();

fn level_from_env() -> Option<LevelFilter> {
    let level = std::env::var("RUST_LOG").ok()?;
    LevelFilter::from_str(level.trim()).ok()
}

/// Install the stderr logger. `cli_level` comes from `--log-level` and wins
/// over `RUST_LOG`. Safe to call once; later calls are ignored.
pub fn init_log_bridge(cli_level: Option<LevelFilter>) {
    let level = cli_level
        .or_else(level_from_env)
        .unwrap_or(LevelFilter::Warn);
    let logger = LOGGER.get_or_init(|| StderrLogger {
        started: Instant::now(),
    });
    if log::set_logger(logger).is_ok() {
        log::set_max_level(level);
    }
}

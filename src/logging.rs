use std::env;

use log::{self, LevelFilter, Metadata, Record};

/// Environment variable holding the log level (`error` .. `trace`, or `off`).
const LOG_ENV: &str = "NAVAL_DUEL_LOG";

/// Writes `LEVEL [module::path] message` lines to stderr.
struct StderrLogger;

impl log::Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            eprintln!("{}", render(record));
        }
    }

    fn flush(&self) {}
}

static LOGGER: StderrLogger = StderrLogger;

fn render(record: &Record) -> String {
    format!("{} [{}] {}", record.level(), record.target(), record.args())
}

fn level_from(value: Option<&str>) -> LevelFilter {
    value
        .and_then(|lvl| lvl.trim().parse().ok())
        .unwrap_or(LevelFilter::Info)
}

/// Initialize logging with a level taken from the `NAVAL_DUEL_LOG` environment variable.
/// Defaults to `info` if the variable is not set or invalid. Output goes to stderr so
/// that stdout stays machine-readable. Later calls are no-ops.
pub fn init_logging() {
    let level = level_from(env::var(LOG_ENV).ok().as_deref());
    let _ = log::set_logger(&LOGGER).map(|()| log::set_max_level(level));
}

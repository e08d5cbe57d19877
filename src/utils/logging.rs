// Logging utilities
// Author: Gabriel Demetrios Lafis

use log::{Level, LevelFilter, Metadata, Record, SetLoggerError};

/// Install the stderr logger with the given level.
///
/// Documents printed by the CLI go to stdout, so log lines never mix with them.
pub fn init_logging(level: LevelFilter) -> Result<(), SetLoggerError> {
    log::set_boxed_logger(Box::new(StderrLogger { level }))
        .map(|()| log::set_max_level(level))
}

struct StderrLogger {
    level: LevelFilter,
}

fn level_tag(level: Level) -> &'static str {
    match level {
        Level::Error => "\x1B[31mERROR\x1B[0m",
        Level::Warn => "\x1B[33mWARN\x1B[0m",
        Level::Info => "\x1B[32mINFO\x1B[0m",
        Level::Debug => "\x1B[34mDEBUG\x1B[0m",
        Level::Trace => "\x1B[90mTRACE\x1B[0m",
    }
}

impl log::Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        eprintln!(
            "[{}] {} {}: {}",
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
            level_tag(record.level()),
            record.target(),
            record.args()
        );
    }

    fn flush(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use log::Log;

    #[test]
    fn test_level_filtering() {
        let logger = StderrLogger { level: LevelFilter::Warn };

        let warn = Metadata::builder().level(Level::Warn).target("builder").build();
        let info = Metadata::builder().level(Level::Info).target("builder").build();

        assert!(logger.enabled(&warn));
        assert!(!logger.enabled(&info));
    }

    #[test]
    fn test_off_disables_everything() {
        let logger = StderrLogger { level: LevelFilter::Off };
        let error = Metadata::builder().level(Level::Error).build();
        assert!(!logger.enabled(&error));
    }
}

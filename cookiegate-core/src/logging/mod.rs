//! Process-wide logger on the `log` facade
//!
//! Library code only uses the standard macros (`log::warn!`, `log::debug!`).
//! Binaries call [`init_logging`] once to decide where those lines go and
//! how they look.
//!
//! ```rust,no_run
//! use cookiegate_core::logging::{LogFormat, LoggingConfig};
//!
//! let config = LoggingConfig::production().with_format(LogFormat::Logfmt);
//! cookiegate_core::logging::init_logging(&config).unwrap();
//!
//! log::info!("Policy engine ready");
//! ```

pub mod config;
pub mod destinations;
pub mod formatter;

pub use config::LoggingConfig;
pub use destinations::{LogEntry, LogOutput};
pub use formatter::LogFormat;

use std::io::Write;
use std::sync::Once;

static INIT: Once = Once::new();

/// Install the logger
///
/// Safe to call more than once; only the first call has any effect.
pub fn init_logging(config: &LoggingConfig) -> anyhow::Result<()> {
    let mut result = Ok(());
    INIT.call_once(|| {
        result = install(config);
    });
    result
}

fn install(config: &LoggingConfig) -> anyhow::Result<()> {
    log::set_boxed_logger(Box::new(CookieGateLogger { config: config.clone() }))
        .map_err(|e| anyhow::anyhow!("Failed to install logger: {}", e))?;
    log::set_max_level(config.level);
    Ok(())
}

struct CookieGateLogger {
    config: LoggingConfig,
}

impl log::Log for CookieGateLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= self.config.level
    }

    fn log(&self, record: &log::Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let entry = LogEntry::from_log_record(record, &self.config);
        let line = self.config.format.format_entry(&entry);

        // Write errors are dropped
        let _ = match self.config.output {
            LogOutput::Stdout => writeln!(std::io::stdout().lock(), "{}", line),
            LogOutput::Stderr => writeln!(std::io::stderr().lock(), "{}", line),
        };
    }

    fn flush(&self) {
        let _ = match self.config.output {
            LogOutput::Stdout => std::io::stdout().flush(),
            LogOutput::Stderr => std::io::stderr().flush(),
        };
    }
}

// In: src/observability.rs

//! Logging hooks for spanframe.
//!
//! All diagnostics go through the `log` facade. Library code never installs a
//! logger on its own; an application either brings its own or calls
//! [`enable_verbose_logging`] once to get a plain `env_logger` setup.
//! The `log_metric!` macro is compiled out of release builds.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Once;

use log::LevelFilter;

static INIT_LOGGER: Once = Once::new();

/// Logs a structured key-value metric line at debug level, only in debug builds.
///
/// # Example
/// ```
/// use spanframe::log_metric;
/// let rows = 4;
/// log_metric!("event"="to_frame", "rows"=&rows);
/// ```
#[macro_export]
macro_rules! log_metric {
    ($($key:literal = $value:expr),+ $(,)?) => {
        #[cfg(debug_assertions)]
        {
            let mut parts = Vec::new();
            $(
                parts.push(format!("\"{}\": \"{}\"", $key, $value));
            )+

            log::debug!("SPANFRAME_METRIC: {{ {} }}", parts.join(", "));
        }
    };
}

/// Installs an `env_logger` at debug level, writing `[LEVEL] message` lines to
/// stderr or, when `log_file` is given, appending them to that file.
///
/// Only the first call has any effect. If another logger is already installed
/// it is left in place.
pub fn enable_verbose_logging(log_file: Option<&Path>) {
    INIT_LOGGER.call_once(|| {
        let mut builder = env_logger::Builder::new();

        builder.is_test(false);
        builder.filter_level(LevelFilter::Debug);

        builder.format(|buf, record| {
            use std::io::Write;
            writeln!(buf, "[{}] {}", record.level(), record.args())?;
            buf.flush()?;
            Ok(())
        });

        if let Some(path) = log_file {
            match OpenOptions::new().append(true).create(true).open(path) {
                Ok(file) => {
                    builder.target(env_logger::Target::Pipe(Box::new(file)));
                }
                Err(err) => {
                    eprintln!("[WARN] could not open log file {}: {err}", path.display());
                }
            }
        }

        let _ = builder.try_init();
    });
}

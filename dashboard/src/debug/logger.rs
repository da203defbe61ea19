//! Logging initialization

use std::fs;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use super::config::{LogConfig, DEFAULT_LOG_FILTER};

/// Log file name inside [`LogConfig::log_dir`] (daily rotation appends the date).
pub const LOG_FILE_NAME: &str = "dashboard.log";

/// Initialize the logging system
///
/// Sets up:
/// - Human-readable output on stderr, so stdout stays clean for command output
/// - Optional daily-rotated file log with thread ids and source locations
/// - Panic hook integration for crash logging
///
/// Returns the file writer guard; keep it alive for the lifetime of the program
/// or buffered lines are lost. Calling `init` twice leaves the first subscriber
/// in place.
pub fn init(config: &LogConfig) -> Option<WorkerGuard> {
    let env_filter = EnvFilter::try_new(&config.log_level)
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .boxed();

    let mut guard = None;
    let mut layers = vec![stderr_layer];

    if config.file_enabled {
        match fs::create_dir_all(&config.log_dir) {
            Ok(()) => {
                let file_appender = tracing_appender::rolling::daily(&config.log_dir, LOG_FILE_NAME);
                let (non_blocking, file_guard) = tracing_appender::non_blocking(file_appender);
                layers.push(
                    fmt::layer()
                        .with_writer(non_blocking)
                        .with_target(true)
                        .with_thread_ids(true)
                        .with_file(true)
                        .with_line_number(true)
                        .with_ansi(false) // No ANSI codes in log files
                        .boxed(),
                );
                guard = Some(file_guard);
            }
            Err(e) => eprintln!("Warning: Failed to create log directory: {}", e),
        }
    }

    if tracing_subscriber::registry()
        .with(env_filter)
        .with(layers)
        .try_init()
        .is_err()
    {
        return None;
    }

    tracing::debug!(
        log_level = %config.log_level,
        log_dir = %config.log_dir.display(),
        file_enabled = config.file_enabled,
        "Logging initialized"
    );

    setup_panic_hook();
    guard
}

/// Set up panic hook to log panics before the default handler runs
fn setup_panic_hook() {
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let location = panic_info
            .location()
            .map(|l| format!("{}:{}:{}", l.file(), l.line(), l.column()))
            .unwrap_or_else(|| "unknown location".to_string());

        let message = if let Some(s) = panic_info.payload().downcast_ref::<&str>() {
            s.to_string()
        } else if let Some(s) = panic_info.payload().downcast_ref::<String>() {
            s.clone()
        } else {
            "unknown panic payload".to_string()
        };

        tracing::error!(location = %location, message = %message, "PANIC");
        default_panic(panic_info);
    }));
}

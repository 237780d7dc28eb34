//! Structured logging for lesson runs
//!
//! Sets up `tracing` with a console layer and an optional rolling file layer,
//! and tracks a per-run correlation id that spans pick up automatically.

pub mod config;
pub mod spans;

use anyhow::Result;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};
use uuid::Uuid;

pub use config::LoggingConfig;
pub use spans::{LessonSpan, OperationSpan};

const BIN_TARGET: &str = "imgfn";

thread_local! {
    static CORRELATION_ID: std::cell::RefCell<Option<Uuid>> = const { std::cell::RefCell::new(None) };
}

/// Initialize the global subscriber.
///
/// `RUST_LOG` takes precedence over `config.global_level`. The returned guard
/// flushes the file writer and must be kept alive for the whole run.
pub fn init_logging(config: &LoggingConfig) -> Result<Option<WorkerGuard>> {
    config.validate().map_err(anyhow::Error::msg)?;

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(&config.global_level)));

    let mut layers = Vec::new();
    let mut guard = None;

    if config.console_output {
        let console_layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_line_number(config.include_file_location)
            .with_file(config.include_file_location);
        layers.push(console_layer.boxed());
    }

    if let Some(ref log_dir) = config.log_directory {
        std::fs::create_dir_all(log_dir)?;
        let file_appender = tracing_appender::rolling::daily(log_dir, "imgfn.log");
        let (non_blocking, worker_guard) = tracing_appender::non_blocking(file_appender);
        guard = Some(worker_guard);

        let file_layer = fmt::layer().with_writer(non_blocking).with_ansi(false);
        if config.json_file_output {
            layers.push(file_layer.json().boxed());
        } else {
            layers.push(file_layer.boxed());
        }
    }

    tracing_subscriber::registry()
        .with(env_filter)
        .with(layers)
        .try_init()?;

    tracing::debug!("Logging initialized with config: {:?}", config);
    Ok(guard)
}

/// Filter directives covering both the library and the `imgfn` binary
fn default_directives(level: &str) -> String {
    format!(
        "{}={level},{}={level}",
        env!("CARGO_PKG_NAME").replace('-', "_"),
        BIN_TARGET
    )
}

/// Set a correlation ID for the current thread
pub fn set_correlation_id(id: Uuid) {
    CORRELATION_ID.with(|correlation_id| {
        *correlation_id.borrow_mut() = Some(id);
    });
}

/// Get the current correlation ID for this thread
pub fn get_correlation_id() -> Option<Uuid> {
    CORRELATION_ID.with(|correlation_id| *correlation_id.borrow())
}

/// Generate a new correlation ID and set it for the current thread
pub fn new_correlation_id() -> Uuid {
    let id = Uuid::new_v4();
    set_correlation_id(id);
    id
}

/// Clear the correlation ID for the current thread
pub fn clear_correlation_id() {
    CORRELATION_ID.with(|correlation_id| {
        *correlation_id.borrow_mut() = None;
    });
}

use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

fn env_filter() -> EnvFilter {
    let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "schoolday={level},schoolday_cli={level},schoolday_config={level},warn",
            level = log_level
        ))
    })
}

/// Initialize console logging.
///
/// # Configuration
///
/// - **Log Level**: `LOG_LEVEL` environment variable (default: "info")
/// - **Filtering**: `RUST_LOG` overrides the whole filter when set
/// - **Format**: Compact, to stderr so command output on stdout stays clean
///
/// Calling this more than once is a no-op.
pub fn init_basic_console_logging() {
    let console_layer = fmt::layer()
        .compact()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_file(false)
        .with_line_number(false)
        .with_filter(env_filter());

    let _ = tracing_subscriber::registry().with(console_layer).try_init();
}

/// Initialize newline-delimited JSON logging on stderr.
pub fn init_json_logging() {
    let json_layer = fmt::layer()
        .json()
        .with_writer(std::io::stderr)
        .with_current_span(true)
        .with_filter(env_filter());

    let _ = tracing_subscriber::registry().with(json_layer).try_init();
}

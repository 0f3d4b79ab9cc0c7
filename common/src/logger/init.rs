use once_cell::sync::OnceCell;
use tracing_subscriber::{EnvFilter, fmt};

static LOGGER_INIT: OnceCell<()> = OnceCell::new();

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Human-readable logs. Only the first call in a process installs a subscriber.
pub fn init_logger(service_name: &'static str) {
    LOGGER_INIT.get_or_init(|| {
        let installed = fmt()
            .with_env_filter(env_filter())
            .with_target(true) // <-- shows crate/module path
            .with_thread_ids(true)
            .with_thread_names(true)
            .with_line_number(true)
            .with_span_events(fmt::format::FmtSpan::CLOSE)
            .try_init()
            .is_ok();

        if installed {
            tracing::info!(service = service_name, "logger initialized");
        }
    });
}

/// Same as [`init_logger`] but emits one JSON object per line.
pub fn init_logger_json(service_name: &'static str) {
    LOGGER_INIT.get_or_init(|| {
        let installed = fmt()
            .json()
            .with_env_filter(env_filter())
            .with_target(true)
            .with_thread_ids(true)
            .with_line_number(true)
            .with_current_span(true)
            .try_init()
            .is_ok();

        if installed {
            tracing::info!(service = service_name, format = "json", "logger initialized");
        }
    });
}

//! Logging bootstrap using `tracing` and `tracing-subscriber`.
//!
//! Level precedence: `RUST_LOG` wins when set; otherwise the verbosity
//! flags drive the workspace crates and external crates stay at `warn`.

use tracing::level_filters::LevelFilter;
use tracing_subscriber::{
    EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt,
};

/// Initialize the global subscriber. Call once at startup.
pub fn init(level: LevelFilter) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "warn,v11n_cli={level},v11n_map={level},v11n_model={level},v11n_systems={level}"
        ))
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).without_time())
        .init();
}

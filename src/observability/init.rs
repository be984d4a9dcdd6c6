//! Subscriber installation for the page core.
//!
//! Configures the tracing subscriber: an [`EnvFilter`] built from
//! the configured level, feeding a plain-text fmt layer. The browser build
//! routes that layer to the developer console.

use crate::Config;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Level used when none is configured or the configured directive is invalid.
const DEFAULT_LEVEL: &str = "info";

/// Installs the global subscriber for page logs.
///
/// The filter is `config.trace_level` when it parses as an `EnvFilter`
/// directive, otherwise `"info"`.
///
/// - Timestamps are omitted; the console stamps entries itself and the
///   browser target has no system clock
/// - Later calls are no-ops; the first subscriber stays installed
///
/// # Example
///
/// ```rust
/// use portfolio::observability::init_tracing;
/// use portfolio::Config;
///
/// let config = Config {
///     trace_level: Some("portfolio=debug".to_string()),
///     ..Default::default()
/// };
///
/// init_tracing(&config);
/// init_tracing(&Config::default());
///
/// tracing::debug!(section = "hero", "page core logging");
/// ```
pub fn init_tracing(config: &Config) {
    let level = config.trace_level.as_deref().unwrap_or(DEFAULT_LEVEL);
    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LEVEL));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .without_time()
        .with_ansi(false)
        .with_target(true);

    #[cfg(feature = "web")]
    let fmt_layer = fmt_layer.with_writer(super::console_writer::ConsoleWriter::new);

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}

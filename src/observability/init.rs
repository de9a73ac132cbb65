//! Subscriber setup.

use super::exporter;
use crate::Config;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry_sdk::resource::Resource;
use std::path::Path;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Installs the global tracing subscriber.
///
/// The pipeline is:
/// 1. An [`EnvFilter`] from `RUST_LOG`, falling back to `config.trace_level`, then `"info"`
/// 2. A compact formatter writing to stderr
/// 3. When `config.trace_file` is set, an OpenTelemetry layer exporting spans to that file
///
/// Tracing is optional: if the trace file's directory cannot be created the
/// file layer is skipped, and calling this twice leaves the first subscriber in place.
///
/// ```rust
/// use showcase::observability::init_tracing;
/// use showcase::Config;
///
/// let config = Config {
///     trace_level: Some("debug".to_string()),
///     ..Default::default()
/// };
/// init_tracing(&config);
///
/// tracing::debug!("tracing is now active");
/// ```
pub fn init_tracing(config: &Config) {
    let level = config.trace_level.as_deref().unwrap_or("info");
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let otel_layer = config
        .trace_file
        .as_deref()
        .filter(|path| ensure_parent(path))
        .map(|path| {
            let resource = Resource::new(vec![opentelemetry::KeyValue::new("service.name", "showcase")]);
            let provider = exporter::create_tracer_provider(path.to_path_buf(), resource);
            OpenTelemetryLayer::new(provider.tracer("showcase"))
        });

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact();

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .with(otel_layer)
        .try_init();
}

fn ensure_parent(path: &Path) -> bool {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => std::fs::create_dir_all(dir).is_ok(),
        _ => true,
    }
}

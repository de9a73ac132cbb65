//! OpenTelemetry span exporter writing one JSON object per line.
//!
//! Each finished span becomes a flat record:
//!
//! ```json
//! {"service":"showcase","trace_id":"…","span_id":"…","parent_id":null,
//!  "name":"mount","start_unix_ms":1718000000000,"duration_us":42,
//!  "status":"unset","attributes":{"section":"faq"},"events":0}
//! ```
//!
//! Records are meant for `jq`-style inspection of a preview run, not for an
//! OTLP collector.

use super::writer::{RotatingWriter, DEFAULT_BACKUPS, DEFAULT_MAX_BYTES};
use futures_util::future::BoxFuture;
use opentelemetry::trace::{SpanId, Status, TraceError};
use opentelemetry::{Key, KeyValue, Value};
use opentelemetry_sdk::export::trace::{ExportResult, SpanData, SpanExporter};
use opentelemetry_sdk::resource::Resource;
use opentelemetry_sdk::trace::TracerProvider;
use serde_json::{json, Map, Value as JsonValue};
use std::path::PathBuf;
use std::time::{Duration, SystemTime};

#[derive(Debug)]
struct JsonLineExporter {
    writer: RotatingWriter,
    service: String,
    is_shutdown: bool,
}

impl JsonLineExporter {
    fn new(path: PathBuf, resource: &Resource) -> Self {
        let service = resource
            .get(Key::new("service.name"))
            .map_or_else(|| "unknown".to_string(), |value| value.to_string());

        Self {
            writer: RotatingWriter::new(path, DEFAULT_MAX_BYTES, DEFAULT_BACKUPS),
            service,
            is_shutdown: false,
        }
    }

    fn record(&self, span: &SpanData) -> JsonValue {
        let parent_id = (span.parent_span_id != SpanId::INVALID).then(|| format!("{:016x}", span.parent_span_id));
        let start_unix_ms = span
            .start_time
            .duration_since(SystemTime::UNIX_EPOCH)
            .unwrap_or(Duration::ZERO)
            .as_millis();
        let duration_us = span
            .end_time
            .duration_since(span.start_time)
            .unwrap_or(Duration::ZERO)
            .as_micros();

        json!({
            "service": self.service,
            "trace_id": format!("{:032x}", span.span_context.trace_id()),
            "span_id": format!("{:016x}", span.span_context.span_id()),
            "parent_id": parent_id,
            "name": span.name,
            "start_unix_ms": start_unix_ms,
            "duration_us": duration_us,
            "status": status_label(&span.status),
            "attributes": attributes(&span.attributes),
            "events": span.events.len(),
        })
    }
}

fn status_label(status: &Status) -> String {
    match status {
        Status::Unset => "unset".to_string(),
        Status::Ok => "ok".to_string(),
        Status::Error { description } => format!("error: {description}"),
    }
}

fn attributes(attributes: &[KeyValue]) -> JsonValue {
    let map: Map<String, JsonValue> = attributes
        .iter()
        .map(|kv| {
            let value = match &kv.value {
                Value::Bool(b) => json!(b),
                Value::I64(i) => json!(i),
                Value::F64(f) => json!(f),
                Value::String(s) => json!(s.as_str()),
                other @ Value::Array(_) => json!(other.to_string()),
            };
            (kv.key.to_string(), value)
        })
        .collect();
    JsonValue::Object(map)
}

impl SpanExporter for JsonLineExporter {
    fn export(&mut self, batch: Vec<SpanData>) -> BoxFuture<'static, ExportResult> {
        if self.is_shutdown {
            return Box::pin(std::future::ready(Err(TraceError::from("exporter is shut down"))));
        }

        for span in &batch {
            let line = self.record(span).to_string();
            if let Err(e) = self.writer.write_line(&line) {
                return Box::pin(std::future::ready(Err(TraceError::from(format!(
                    "failed to write {}: {e}",
                    self.writer.path().display()
                )))));
            }
        }
        Box::pin(std::future::ready(Ok(())))
    }

    fn shutdown(&mut self) {
        self.is_shutdown = true;
    }

    fn set_resource(&mut self, resource: &Resource) {
        if let Some(service) = resource.get(Key::new("service.name")) {
            self.service = service.to_string();
        }
    }
}

/// Builds a tracer provider that exports every finished span to `path`.
///
/// Spans are exported synchronously as they close.
pub fn create_tracer_provider(path: PathBuf, resource: Resource) -> TracerProvider {
    let exporter = JsonLineExporter::new(path, &resource);

    TracerProvider::builder()
        .with_config(opentelemetry_sdk::trace::Config::default().with_resource(resource))
        .with_simple_exporter(exporter)
        .build()
}

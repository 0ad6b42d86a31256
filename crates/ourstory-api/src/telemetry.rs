//! Tracing setup: JSON logs, plus OTLP span export when a collector is
//! configured.

use opentelemetry::trace::TracerProvider as _;
use opentelemetry_otlp::{SpanExporter, WithExportConfig};
use opentelemetry_sdk::Resource;
use opentelemetry_sdk::trace::SdkTracerProvider;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::error::AppError;

const SERVICE_NAME: &str = "ourstory-api";

/// Keeps the span exporter alive. Call [`TelemetryGuard::shutdown`] before
/// exit to flush pending spans.
#[derive(Debug)]
pub struct TelemetryGuard {
    provider: Option<SdkTracerProvider>,
}

impl TelemetryGuard {
    /// Flushes and stops span export, if enabled.
    pub fn shutdown(self) {
        if let Some(provider) = self.provider {
            if let Err(e) = provider.shutdown() {
                warn!(error = %e, "failed to shut down span exporter");
            }
        }
    }
}

fn tracer_provider(endpoint: &str) -> Result<SdkTracerProvider, AppError> {
    let exporter = SpanExporter::builder()
        .with_tonic()
        .with_endpoint(endpoint)
        .build()
        .map_err(|e| AppError::Telemetry(format!("failed to create OTLP exporter: {e}")))?;

    Ok(SdkTracerProvider::builder()
        .with_batch_exporter(exporter)
        .with_resource(Resource::builder().with_service_name(SERVICE_NAME).build())
        .build())
}

/// Installs the global tracing subscriber.
///
/// Log level comes from `RUST_LOG` (default `info`). With `otlp_endpoint`
/// set, spans are also exported over OTLP/gRPC.
///
/// # Errors
///
/// Returns `AppError::Telemetry` if the exporter cannot be built or a global
/// subscriber is already installed.
pub fn init_tracing(otlp_endpoint: Option<&str>) -> Result<TelemetryGuard, AppError> {
    let provider = otlp_endpoint.map(tracer_provider).transpose()?;
    let otel_layer = provider
        .as_ref()
        .map(|p| tracing_opentelemetry::layer().with_tracer(p.tracer(SERVICE_NAME)));

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().json())
        .with(otel_layer)
        .try_init()
        .map_err(|e| AppError::Telemetry(format!("failed to install subscriber: {e}")))?;

    if let Some(endpoint) = otlp_endpoint {
        info!(endpoint, "exporting spans over OTLP");
    }
    Ok(TelemetryGuard { provider })
}

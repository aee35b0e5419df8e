//! Observability wiring for the process hosting the component.
//!
//! The component itself only emits `tracing` spans and events. The host calls
//! [`init_telemetry`] once at start-up to route them to stdout (JSON or
//! pretty) and, optionally, to an OpenTelemetry collector over OTLP.

use anyhow::{bail, Context};
use opentelemetry::trace::TracerProvider as _;
use opentelemetry::KeyValue;
use opentelemetry_otlp::WithExportConfig;
use opentelemetry_sdk::trace::TracerProvider;
use opentelemetry_sdk::{runtime, Resource};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

const FILTER_VAR: &str = "RUST_LOG";
const FORMAT_VAR: &str = "WFENGINE_LOG_FORMAT";
const OTLP_ENDPOINT_VAR: &str = "OTEL_EXPORTER_OTLP_ENDPOINT";
const SERVICE_NAME_VAR: &str = "OTEL_SERVICE_NAME";

const DEFAULT_FILTER: &str = "info";
const DEFAULT_SERVICE_NAME: &str = "wfengine";

/// Output format of the stdout log layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Json,
    Pretty,
}

impl std::str::FromStr for LogFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "pretty" => Ok(Self::Pretty),
            other => bail!("unsupported log format '{other}' (expected 'json' or 'pretty')"),
        }
    }
}

/// Telemetry settings for the hosting process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TelemetryConfig {
    /// `EnvFilter` directive string, e.g. `info,wfengine=debug`.
    pub filter: String,
    pub format: LogFormat,
    /// OTLP collector endpoint. Spans are only exported when this is set.
    pub otlp_endpoint: Option<String>,
    pub service_name: String,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            filter: DEFAULT_FILTER.to_string(),
            format: LogFormat::default(),
            otlp_endpoint: None,
            service_name: DEFAULT_SERVICE_NAME.to_string(),
        }
    }
}

impl TelemetryConfig {
    /// Reads the configuration from the process environment.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads the configuration through `lookup`. Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let format = match get(FORMAT_VAR) {
            Some(raw) => raw
                .parse()
                .with_context(|| format!("invalid {FORMAT_VAR}"))?,
            None => LogFormat::default(),
        };

        Ok(Self {
            filter: get(FILTER_VAR).unwrap_or_else(|| DEFAULT_FILTER.to_string()),
            format,
            otlp_endpoint: get(OTLP_ENDPOINT_VAR),
            service_name: get(SERVICE_NAME_VAR).unwrap_or_else(|| DEFAULT_SERVICE_NAME.to_string()),
        })
    }
}

/// Keeps the span exporter alive; flushes and shuts it down on drop.
#[must_use = "dropping the guard shuts down span export"]
pub struct TelemetryGuard {
    provider: Option<TracerProvider>,
}

impl Drop for TelemetryGuard {
    fn drop(&mut self) {
        if let Some(provider) = self.provider.take() {
            if let Err(err) = provider.shutdown() {
                tracing::warn!(error = %err, "failed to shut down tracer provider");
            }
        }
    }
}

fn tracer_provider(endpoint: &str, service_name: &str) -> anyhow::Result<TracerProvider> {
    let exporter = opentelemetry_otlp::SpanExporter::builder()
        .with_tonic()
        .with_endpoint(endpoint)
        .build()
        .context("failed to build OTLP span exporter")?;

    let resource = Resource::new([KeyValue::new("service.name", service_name.to_string())]);

    Ok(TracerProvider::builder()
        .with_batch_exporter(exporter, runtime::Tokio)
        .with_resource(resource)
        .build())
}

/// Installs the global `tracing` subscriber.
///
/// Must be called from within a tokio runtime when an OTLP endpoint is
/// configured. Fails if a global subscriber is already installed.
pub fn init_telemetry(config: &TelemetryConfig) -> anyhow::Result<TelemetryGuard> {
    let filter = EnvFilter::try_new(&config.filter)
        .with_context(|| format!("invalid log filter '{}'", config.filter))?;

    let (json, pretty) = match config.format {
        LogFormat::Json => (Some(fmt::layer().json()), None),
        LogFormat::Pretty => (None, Some(fmt::layer().pretty())),
    };

    let provider = config
        .otlp_endpoint
        .as_deref()
        .map(|endpoint| tracer_provider(endpoint, &config.service_name))
        .transpose()?;

    let otel = provider.as_ref().map(|provider| {
        tracing_opentelemetry::layer().with_tracer(provider.tracer(config.service_name.clone()))
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(json)
        .with(pretty)
        .with(otel)
        .try_init()
        .context("failed to install tracing subscriber")?;

    if let Some(provider) = &provider {
        opentelemetry::global::set_tracer_provider(provider.clone());
    }

    Ok(TelemetryGuard { provider })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_nothing_is_set() {
        let config = TelemetryConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, TelemetryConfig::default());
        assert_eq!(config.filter, "info");
        assert_eq!(config.format, LogFormat::Json);
        assert!(config.otlp_endpoint.is_none());
        assert_eq!(config.service_name, "wfengine");
    }

    #[test]
    fn test_reads_every_variable() {
        let config = TelemetryConfig::from_lookup(lookup(&[
            ("RUST_LOG", "debug,wfengine=trace"),
            ("WFENGINE_LOG_FORMAT", "Pretty"),
            ("OTEL_EXPORTER_OTLP_ENDPOINT", "http://localhost:4317"),
            ("OTEL_SERVICE_NAME", "workflow-host"),
        ]))
        .unwrap();

        assert_eq!(config.filter, "debug,wfengine=trace");
        assert_eq!(config.format, LogFormat::Pretty);
        assert_eq!(config.otlp_endpoint.as_deref(), Some("http://localhost:4317"));
        assert_eq!(config.service_name, "workflow-host");
    }

    #[test]
    fn test_blank_values_count_as_unset() {
        let config =
            TelemetryConfig::from_lookup(lookup(&[("OTEL_EXPORTER_OTLP_ENDPOINT", "  ")])).unwrap();
        assert!(config.otlp_endpoint.is_none());
    }

    #[test]
    fn test_unknown_log_format_is_rejected() {
        let err = TelemetryConfig::from_lookup(lookup(&[("WFENGINE_LOG_FORMAT", "xml")]))
            .unwrap_err();
        assert!(format!("{err:#}").contains("xml"));
    }

    #[test]
    fn test_invalid_filter_is_rejected_before_installing() {
        let config = TelemetryConfig {
            filter: "wfengine=notalevel".to_string(),
            ..TelemetryConfig::default()
        };
        assert!(init_telemetry(&config).is_err());
    }
}

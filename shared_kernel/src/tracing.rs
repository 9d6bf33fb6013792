use anyhow::Context;
use opentelemetry::global;
use opentelemetry::sdk::propagation::{
    BaggagePropagator, TextMapCompositePropagator, TraceContextPropagator,
};
use opentelemetry::sdk::{trace, Resource};
use opentelemetry::KeyValue;
use opentelemetry_otlp::WithExportConfig;
use tracing::Subscriber;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::prelude::*;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{EnvFilter, Layer, Registry};

const SKIP_OTLP_EXPORTER: &str = "SKIP_OTLP_EXPORTER";

/// Installs the global subscriber with JSON logs on stdout.
pub fn config_telemetry(service_name: &'static str) -> anyhow::Result<()> {
    install(service_name, std::io::stdout)
}

/// Same as [`config_telemetry`], with the logs on stderr so that stdout only
/// carries what the binary prints.
pub fn config_stderr_telemetry(service_name: &'static str) -> anyhow::Result<()> {
    install(service_name, std::io::stderr)
}

pub fn shutdown_global_tracer_provider() {
    global::shutdown_tracer_provider();
}

fn install<W>(service_name: &'static str, writer: W) -> anyhow::Result<()>
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    tracing_log::LogTracer::init().context("Failed to forward `log` records to tracing")?;

    let otlp_enabled = std::env::var_os(SKIP_OTLP_EXPORTER).is_none();
    let otlp_layer = if otlp_enabled {
        Some(tracing_opentelemetry::layer().with_tracer(otlp_tracer(service_name)?))
    } else {
        None
    };

    let subscriber = Registry::default()
        .with(EnvFilter::from_default_env())
        .with(json_log_layer(writer))
        .with(otlp_layer);
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to install the global subscriber")?;

    if !otlp_enabled {
        tracing::info!(service_name, "OTLP export disabled");
    }

    global::set_text_map_propagator(TextMapCompositePropagator::new(vec![
        Box::new(BaggagePropagator::new()),
        Box::new(TraceContextPropagator::new()),
    ]));
    Ok(())
}

fn json_log_layer<S, W>(writer: W) -> impl Layer<S>
where
    S: Subscriber + for<'span> LookupSpan<'span>,
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    tracing_subscriber::fmt::layer()
        .json()
        .with_current_span(true)
        .with_thread_names(true)
        .with_writer(writer)
}

fn otlp_tracer(service_name: &'static str) -> anyhow::Result<trace::Tracer> {
    let resource = Resource::new(vec![KeyValue::new("service.name", service_name)]);
    opentelemetry_otlp::new_pipeline()
        .tracing()
        .with_exporter(opentelemetry_otlp::new_exporter().tonic().with_env())
        .with_trace_config(trace::config().with_resource(resource))
        .install_batch(opentelemetry::runtime::TokioCurrentThread)
        .context("Failed to install the OTLP trace pipeline")
}

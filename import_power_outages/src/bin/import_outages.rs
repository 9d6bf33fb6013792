use import_power_outages::Settings;
use power_outages::pipeline::{OutageFeed, SystemClock};
use power_outages::sink::HttpIncidentSink;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    shared_kernel::tracing::config_telemetry("import_power_outages")?;
    let result = start().await;
    shared_kernel::tracing::shutdown_global_tracer_provider();
    result
}

async fn start() -> anyhow::Result<()> {
    let settings = Settings::parse()?;
    let sink = HttpIncidentSink::new(settings.submission);
    let feed = OutageFeed::new(Arc::new(sink), Arc::new(SystemClock));

    let submitted = feed.run(&settings.outages).await?;
    tracing::info!(submitted, "Power outage import finished");
    Ok(())
}

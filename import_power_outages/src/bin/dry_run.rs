use import_power_outages::DryRunSettings;
use power_outages::pipeline::{OutageFeed, SystemClock};
use power_outages::schema::{input_schema, output_schema};
use power_outages::sink::StdoutSink;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    shared_kernel::tracing::config_stderr_telemetry("import_power_outages_dry_run")?;
    let result = start().await;
    shared_kernel::tracing::shutdown_global_tracer_provider();
    result
}

async fn start() -> anyhow::Result<()> {
    if std::env::args().any(|arg| arg == "--schemas") {
        let schemas = serde_json::json!({
            "input": input_schema(),
            "output": output_schema(),
        });
        println!("{}", serde_json::to_string_pretty(&schemas)?);
        return Ok(());
    }

    let settings = DryRunSettings::parse()?;
    let feed = OutageFeed::new(Arc::new(StdoutSink), Arc::new(SystemClock));
    feed.run(&settings.outages).await?;
    Ok(())
}

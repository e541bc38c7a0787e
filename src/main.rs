use anyhow::Result;
use aws_importer::*;
use aws_sdk_cloudwatch::config::Region;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::time::FormatTime;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

struct LocalTimer;

impl FormatTime for LocalTimer {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> std::fmt::Result {
        write!(
            w,
            "{}",
            chrono::Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z")
        )
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr; stdout carries the JSON records.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_timer(LocalTimer)
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = dotenvy::dotenv() {
        tracing::debug!(error = %e, "no .env loaded");
    }

    let app_config = config::AppConfig::load()?;
    tracing::info!(
        name = env!("CARGO_PKG_NAME"),
        version = env!("CARGO_PKG_VERSION"),
        region = %app_config.importer.location,
        "Starting import"
    );

    let inputs_path = std::env::var("INPUTS_FILE").unwrap_or_else(|_| "inputs.json".into());
    let inputs: Vec<models::PluginInput> =
        serde_json::from_str(&std::fs::read_to_string(&inputs_path)?)
            .map_err(|e| anyhow::anyhow!("inputs {}: {}", inputs_path, e))?;
    // Per-run override of importer.services, e.g. AWS_SERVICES="ec2".
    let services = std::env::var("AWS_SERVICES").ok();

    let sdk_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(Region::new(app_config.importer.location.clone()))
        .load()
        .await;

    let importer = importer::Importer::new(
        app_config,
        monitoring::CloudWatchMonitor::new(&sdk_config),
        inventory::Ec2Inventory::new(&sdk_config),
    );
    let records = importer.execute(&inputs, services.as_deref()).await?;

    let stdout = std::io::stdout();
    serde_json::to_writer_pretty(stdout.lock(), &records)?;
    println!();
    Ok(())
}

//! Elidune Lending - loads the catalog and reports ledger statistics.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use elidune_lending::{
    config::{AppConfig, LoggingConfig},
    seed::CatalogSeed,
    services::AdminGate,
    Ledger,
};

fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let config = AppConfig::load()?;
    init_tracing(&config.logging);

    tracing::info!("Starting Elidune Lending v{}", env!("CARGO_PKG_VERSION"));

    let mut ledger = Ledger::from_config(&config)?;
    tracing::info!(policy = ?ledger.policy(), "Ledger ready");

    let gate = AdminGate::from_config(&config.auth)?;
    if !gate.is_enabled() {
        tracing::warn!("No admin password hash configured, item and member updates are disabled");
    }

    if let Some(path) = &config.catalog.seed_file {
        tracing::info!("Loading catalog seed from {}", path);
        CatalogSeed::from_file(path)?.apply(&mut ledger)?;
    }

    ledger.check_invariants()?;
    let stats = ledger.statistics();
    println!("{}", serde_json::to_string_pretty(&stats)?);

    Ok(())
}

fn init_tracing(logging: &LoggingConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("elidune_lending={},audit={}", logging.level, logging.level).into());

    let registry = tracing_subscriber::registry().with(filter);
    if logging.format == "json" {
        registry.with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr)).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr)).init();
    }
}

//! PanelProbe binary entry point

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use panelprobe_cli::{config::HarnessConfig, demo, runner};

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();

    let config = HarnessConfig::parse();
    info!(
        base_url = %config.base_url,
        wait_ceiling = ?config.wait_ceiling,
        poll_interval = ?config.poll_interval,
        pinned = config.panel_url.is_some(),
        "panelprobe starting"
    );

    let driver = Arc::new(demo::demo_panel_driver(&config));
    let report = match runner::run_suite(&config, driver).await {
        Ok(report) => report,
        Err(err) => {
            error!("run aborted: {}", err);
            std::process::exit(2);
        }
    };

    print!("{}", report.summary());
    if config.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    }

    if !report.passed() {
        std::process::exit(1);
    }
    Ok(())
}

fn init_logging() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

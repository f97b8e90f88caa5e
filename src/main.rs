use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use immich_custodian::cli::Cli;
use immich_custodian::error::CustodianError;
use immich_custodian::immich::ImmichClient;
use immich_custodian::sweep;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("immich_custodian=info")),
        )
        .with_target(false)
        .init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            error!(%error, "Run failed");
            ExitCode::from(error.exit_code())
        }
    }
}

async fn run() -> Result<(), CustodianError> {
    let config = Cli::parse().into_config()?;

    info!(
        api_url = %config.api_url,
        threshold = config.offline_threshold,
        "Starting offline-asset sweep"
    );

    let client = ImmichClient::new(config.api_url, config.api_key);
    let report = sweep::run(&client, config.offline_threshold).await?;

    let failed = report.failed();
    if failed > 0 {
        return Err(CustodianError::Cleanup {
            failed,
            attempted: report.attempted(),
        });
    }
    Ok(())
}

use asset_gateway::cli::Cli;
use asset_gateway::service::execute;
use asset_gateway::setup::setup_gateway;
use asset_gateway::utils::logging::init_logging;
use clap::Parser as _;
use dotenvy::dotenv;
use tracing::{error, info};

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    dotenv().ok();
    init_logging();
    let cli = Cli::parse();
    info!("Starting asset gateway");

    let resolver = match setup_gateway(cli.command.gateway_args()).await {
        Ok(resolver) => resolver,
        Err(e) => {
            error!(error = %e, error_chain = ?e, "Failed to provision image bucket");
            return Err(e.into());
        }
    };

    let mut stdout = tokio::io::stdout();
    if let Err(e) = execute(&resolver, &cli.command, &mut stdout).await {
        error!(error = %e, error_chain = ?e, "Command failed");
        return Err(e.into());
    }
    Ok(())
}

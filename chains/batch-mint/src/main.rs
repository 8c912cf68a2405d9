use anyhow::Result;
use batch_mint::{HttpConnector, MintConfig, MintRound};
use clap::Parser;
use core_logic::{setup_logger, ProcessEnv, StopPolicy, Supervisor};
use dotenv::dotenv;
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value = "config.toml")]
    config: String,

    /// Stop after this many rounds instead of running forever
    #[arg(short, long)]
    iterations: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let _log_guard = setup_logger("batch-mint");
    dotenv().ok();

    let args = Args::parse();
    info!("Loading config from: {}", args.config);

    let config = match MintConfig::load(&args.config) {
        Ok(c) => c,
        Err(e) => {
            error!("Failed to load config: {:#}", e);
            return Ok(());
        }
    };

    info!(
        "Configuration loaded for {} (chain ID: {}), {} attempts per wallet",
        config.chain.name, config.chain.chain_id, config.dispatch.fan_out
    );

    let round = MintRound::new(config, HttpConnector, ProcessEnv)?;

    let policy = args
        .iterations
        .map(StopPolicy::After)
        .unwrap_or(StopPolicy::Forever);
    let report = Supervisor::new(policy).with_ctrl_c().run(&round).await;

    info!(
        "Stopped after {} rounds ({} failed)",
        report.iterations, report.failed_iterations
    );

    Ok(())
}

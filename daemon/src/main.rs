//! NIS daemon: entry point for validating and applying chain files.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context};
use clap::Parser;

use nis_node::{init_logging, replay, BlockProcessor, ChainFile, LogFormat, NodeConfig};
use nis_transactions::DefaultFeeCalculator;
use nis_types::NetworkId;
use nis_validators::ValidatorFactory;

#[derive(Parser)]
#[command(name = "nis-daemon", about = "NIS validation and settlement node")]
struct Cli {
    /// Network blocks and transactions must belong to: "main", "test" or "mijin".
    /// Defaults to the config file's value.
    #[arg(long, env = "NIS_NETWORK")]
    network: Option<String>,

    /// Log level: "trace", "debug", "info", "warn", "error".
    #[arg(long, env = "NIS_LOG_LEVEL")]
    log_level: Option<String>,

    /// Log format: "human" or "json".
    #[arg(long, env = "NIS_LOG_FORMAT")]
    log_format: Option<String>,

    /// Path to a TOML configuration file. CLI flags and env vars override it.
    #[arg(long, env = "NIS_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Apply every block of a JSON chain file on top of its nemesis state.
    Replay {
        /// Chain file to replay.
        chain: PathBuf,
    },
    /// Print the default configuration as TOML.
    DefaultConfig,
}

fn parse_network(s: &str) -> anyhow::Result<NetworkId> {
    match s.to_ascii_lowercase().as_str() {
        "main" | "mainnet" => Ok(NetworkId::Main),
        "test" | "testnet" => Ok(NetworkId::Test),
        "mijin" => Ok(NetworkId::Mijin),
        other => bail!("unknown network: {other}"),
    }
}

fn load_config(cli: &Cli) -> anyhow::Result<NodeConfig> {
    let mut config = match &cli.config {
        Some(path) => NodeConfig::from_toml_file(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => NodeConfig::default(),
    };
    if let Some(network) = &cli.network {
        config.network = parse_network(network)?;
    }
    if let Some(level) = &cli.log_level {
        config.log_level = level.clone();
    }
    if let Some(format) = &cli.log_format {
        config.log_format = format.clone();
    }
    Ok(config)
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;

    if let Command::DefaultConfig = cli.command {
        print!("{}", NodeConfig::default().to_toml_string()?);
        return Ok(());
    }

    let format: LogFormat = config.log_format()?;
    init_logging(format, &config.log_level)?;
    tracing::info!(network = config.network.as_str(), "starting nis-daemon");

    let factory = ValidatorFactory::new(config.chain.clone(), Arc::new(DefaultFeeCalculator::new(&config.chain)))
        .with_network(config.network);
    let processor = BlockProcessor::new(&factory).with_workers(config.validation_workers)?;

    match cli.command {
        Command::Replay { chain } => {
            let chain_file =
                ChainFile::load(&chain).with_context(|| format!("reading chain file {}", chain.display()))?;
            let mut cache = chain_file.seed().context("seeding nemesis state")?;
            let summary = replay(&processor, &chain_file, &mut cache).context("replaying chain")?;
            tracing::info!(
                blocks = summary.blocks,
                transactions = summary.transactions,
                height = %summary.height.map(|h| h.to_string()).unwrap_or_else(|| "1".into()),
                accounts = cache.accounts.len(),
                "replay complete"
            );
        }
        Command::DefaultConfig => {}
    }
    Ok(())
}

use anyhow::{Context, bail};
use clap::Parser;
use log::debug;
use serde::Serialize;
use serde_json::Value;

use monero_rpc::{
    cli::{Cli, Commands, Target},
    config::load_configuration,
    daemon::MoneroDaemon,
    log::init_logging,
    rpc::RpcClient,
    wallet::MoneroWallet,
};

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    init_logging()?;
    let cli = Cli::parse();

    let mut config = load_configuration(&cli.config)?;
    config.apply_connection(&cli.connection);
    debug!(daemon = config.daemon.uri.as_str(), wallet = config.wallet.uri.as_str(); "Configuration loaded");

    let daemon = || -> anyhow::Result<MoneroDaemon> {
        let rpc = RpcClient::with_config(&config.daemon).context("Invalid daemon endpoint")?;
        Ok(MoneroDaemon::new(rpc))
    };
    let wallet = || -> anyhow::Result<MoneroWallet> {
        let rpc = RpcClient::with_config(&config.wallet).context("Invalid wallet endpoint")?;
        Ok(MoneroWallet::new(rpc))
    };

    match cli.command {
        Commands::BlockCount => print_json(&daemon()?.get_block_count().await?),
        Commands::BlockHash { height } => print_json(&daemon()?.get_block_hash(height).await?),
        Commands::LastBlockHeader => print_json(&daemon()?.get_last_block_header().await?),
        Commands::BlockHeader { height, hash } => {
            let daemon = daemon()?;
            let header = match (height, hash) {
                (Some(height), _) => daemon.get_block_header_by_height(height).await?,
                (None, Some(hash)) => daemon.get_block_header_by_hash(&hash).await?,
                (None, None) => bail!("Either --height or --hash is required"),
            };
            print_json(&header)
        },
        Commands::BlockHeaders { start, end } => print_json(&daemon()?.get_block_headers_range(start, end).await?),
        Commands::BlockTemplate { address, reserve_size } => {
            print_json(&daemon()?.get_block_template(&address, reserve_size).await?)
        },
        Commands::Accounts { tag } => print_json(&wallet()?.get_account_listing(tag.as_deref()).await?),
        Commands::Addresses => print_addresses(&wallet()?).await,
        Commands::Call { method, params, target } => {
            let params = params
                .map(|raw| serde_json::from_str::<Value>(&raw))
                .transpose()
                .context("--params is not valid JSON")?;
            let rpc = match target {
                Target::Daemon => daemon()?.rpc().clone(),
                Target::Wallet => wallet()?.rpc().clone(),
            };
            print_json(&rpc.call_value(&method, params).await?)
        },
    }
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

async fn print_addresses(wallet: &MoneroWallet) -> anyhow::Result<()> {
    println!("Primary address: {}", wallet.get_primary_address().await?);
    for account in wallet.get_accounts().await? {
        for subaddress in wallet.get_subaddresses(account.index).await? {
            println!("[{}, {}] {}", account.index, subaddress.index, subaddress.address);
        }
    }
    Ok(())
}

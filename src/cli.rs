use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "monero-rpc")]
#[command(about = "Query a Monero daemon or wallet over JSON-RPC", long_about = None)]
pub struct Cli {
    #[arg(long, global = true, help = "Path to the config file", default_value = "data/config.toml")]
    pub config: PathBuf,
    #[command(flatten)]
    pub connection: ConnectionArgs,
    #[command(subcommand)]
    pub command: Commands,
}

/// Overrides for values loaded from the config file.
#[derive(Args, Debug, Clone, Default)]
pub struct ConnectionArgs {
    #[arg(long, global = true, help = "monerod endpoint, e.g. http://127.0.0.1:18081")]
    pub daemon_url: Option<String>,
    #[arg(long, global = true, help = "monero-wallet-rpc endpoint, e.g. http://127.0.0.1:18082")]
    pub wallet_url: Option<String>,
    #[arg(long, global = true, help = "RPC login user name")]
    pub username: Option<String>,
    #[arg(long, global = true, help = "RPC login password")]
    pub password: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Number of blocks in the longest chain
    BlockCount,
    /// Hash of the block at a height
    BlockHash {
        #[arg(long, help = "Block height")]
        height: u64,
    },
    /// Header of the chain tip
    LastBlockHeader,
    /// Header of a block, by height or by hash
    BlockHeader {
        #[arg(long, conflicts_with = "hash", required_unless_present = "hash", help = "Block height")]
        height: Option<u64>,
        #[arg(long, help = "Block hash in hex")]
        hash: Option<String>,
    },
    /// Headers for an inclusive range of heights
    BlockHeaders {
        #[arg(long, help = "First height")]
        start: u64,
        #[arg(long, help = "Last height, inclusive")]
        end: u64,
    },
    /// Block template for mining to an address
    BlockTemplate {
        #[arg(short, long, help = "Address receiving the coinbase reward")]
        address: String,
        #[arg(long, help = "Bytes reserved in the coinbase extra", default_value_t = 60)]
        reserve_size: u64,
    },
    /// Wallet accounts and balances
    Accounts {
        #[arg(long, help = "Only list accounts with this tag")]
        tag: Option<String>,
    },
    /// Primary address and every subaddress of every account
    Addresses,
    /// Send any JSON-RPC method and print its result
    Call {
        #[arg(short, long, help = "JSON-RPC method name")]
        method: String,
        #[arg(short, long, help = "Params as JSON, e.g. '{\"height\": 10}'")]
        params: Option<String>,
        #[arg(long, value_enum, default_value_t = Target::Daemon, help = "Endpoint to send to")]
        target: Target,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Target {
    Daemon,
    Wallet,
}

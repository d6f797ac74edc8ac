use clap::Parser;
use std::net::IpAddr;

#[derive(Parser, Debug)]
#[command(
    name = "onchain-relay",
    about = "Onchain Relay - headless backend for the research dashboard",
    version = env!("CARGO_PKG_VERSION"),
    author
)]
pub struct Cli {
    #[arg(long, env = "RELAY_HOST", default_value = "127.0.0.1")]
    pub host: IpAddr,

    #[arg(short, long, env = "RELAY_PORT", default_value = "8710")]
    pub port: u16,

    /// Bearer key for the search provider.
    #[arg(long, env = "EXA_API_KEY", default_value = "", hide_env_values = true)]
    pub search_api_key: String,

    /// Search provider base URL.
    #[arg(long, env = "SEARCH_BASE_URL", default_value = "https://api.exa.ai")]
    pub search_base_url: String,

    /// Results requested per search.
    #[arg(long, env = "SEARCH_NUM_RESULTS", default_value = "10")]
    pub search_num_results: u32,

    #[arg(short, long, env = "RUST_LOG", default_value = "info")]
    pub log_level: String,
}

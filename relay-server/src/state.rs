//! Shared application state for the HTTP surface.

use anyhow::Result;
use relay_core::forward::{Forwarder, RetryPolicy};
use relay_core::search::{SearchClient, SearchConfig};

use crate::cli::Cli;

/// Cloned into every handler. Both members are cheap clones around one
/// shared connection pool; each inbound call owns its retry state, so no
/// locking is needed.
#[derive(Clone)]
pub struct AppState {
    pub forwarder: Forwarder,
    pub search: SearchClient,
}

impl AppState {
    pub fn new(cli: &Cli) -> Result<Self> {
        let client = reqwest::Client::builder().build()?;
        let search_config = SearchConfig {
            api_key: cli.search_api_key.clone(),
            base_url: cli.search_base_url.clone(),
            num_results: cli.search_num_results,
        };
        Ok(Self::with_client(client, search_config))
    }

    pub fn with_client(client: reqwest::Client, search_config: SearchConfig) -> Self {
        Self {
            forwarder: Forwarder::new(client.clone(), RetryPolicy::default()),
            search: SearchClient::new(client, search_config),
        }
    }
}

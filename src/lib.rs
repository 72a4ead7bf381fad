pub mod config;
pub mod descriptor;
pub mod error;
pub mod oauth;
pub mod provider;
pub mod server;
pub mod sync;

pub use config::Config;
pub use error::{Error, RequestError, Result};
pub use oauth::{AccountFields, OAuthClient, TokenSet, ValidatedAccount};
pub use provider::ProviderClient;
pub use server::build_router;
pub use sync::{EntityType, NormalizedItem, SyncMode, SyncRequest, SyncResponse};

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde_json::{Map, Value};

/// Main entry point for the Fibery ⇄ TSheets connector.
///
/// Holds only immutable configuration and a pooled HTTP client, so one value
/// is shared by every request.
#[derive(Debug, Clone)]
pub struct Connector {
    provider: ProviderClient,
    oauth: OAuthClient,
    logo_path: PathBuf,
}

impl Connector {
    pub fn new(config: &Config) -> Result<Self> {
        let provider = ProviderClient::new(config)?;
        let oauth = OAuthClient::new(config, provider.clone());
        Ok(Self {
            provider,
            oauth,
            logo_path: config.logo_path.clone(),
        })
    }

    pub fn oauth(&self) -> &OAuthClient {
        &self.oauth
    }

    // ── Synchronizer ───────────────────────────────────────────────

    pub async fn synchronize(&self, req: &SyncRequest) -> Result<SyncResponse> {
        sync::orchestrator::synchronize(&self.provider, req).await
    }

    /// Type-check filters for the given type ids before a sync is attempted.
    pub fn validate_filters(&self, types: &[String], filters: &Map<String, Value>) -> Result<()> {
        let types = types
            .iter()
            .map(|t| EntityType::parse(t.as_str()))
            .collect::<Result<Vec<_>>>()?;
        sync::filter::validate(&types, filters)
    }

    pub fn schema(
        &self,
        types: &[String],
    ) -> BTreeMap<&'static str, BTreeMap<&'static str, descriptor::Field>> {
        descriptor::schemas(types)
    }

    // ── Assets ─────────────────────────────────────────────────────

    pub async fn logo(&self) -> Result<Vec<u8>> {
        Ok(tokio::fs::read(&self.logo_path).await?)
    }
}

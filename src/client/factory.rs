use crate::client::auth::authenticate;
use crate::client::identity::IdentityV3Client;
use crate::config::ProviderConfig;
use crate::domain::ports::ClientFactory;
use crate::utils::error::{LookupError, Result};
use async_trait::async_trait;
use chrono::Utc;
use reqwest::Client;
use std::time::Duration;

/// 依 provider 設定認證，並從 service catalog 取得各 region 的 identity endpoint
pub struct ProviderClientFactory {
    config: ProviderConfig,
    http: Client,
}

impl ProviderClientFactory {
    pub fn new(config: ProviderConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .danger_accept_invalid_certs(config.insecure)
            .build()?;

        if config.insecure {
            tracing::warn!("⚠️ TLS certificate verification is disabled");
        }

        Ok(Self { config, http })
    }
}

#[async_trait]
impl ClientFactory for ProviderClientFactory {
    type Client = IdentityV3Client;

    async fn identity_client(&self, region: &str) -> Result<Self::Client> {
        // 已有 token 且指定 endpoint 時不需要再認證
        if let (Some(endpoint), Some(token)) = (&self.config.identity_endpoint, &self.config.token) {
            if !token.is_empty() {
                tracing::debug!("🔐 Using configured token against {}", endpoint);
                return IdentityV3Client::new(self.http.clone(), endpoint, token.clone());
            }
        }

        let token = authenticate(&self.http, &self.config).await?;
        if token.is_expired(Utc::now()) {
            return Err(LookupError::Auth {
                message: format!("token expired at {:?}", token.expires_at),
            });
        }

        let endpoint = match &self.config.identity_endpoint {
            Some(endpoint) => endpoint.clone(),
            None => token
                .endpoint_for("identity", "public", region)
                .map(str::to_string)
                .ok_or_else(|| LookupError::Auth {
                    message: format!(
                        "no public identity endpoint for region '{}' in the service catalog",
                        region
                    ),
                })?,
        };

        tracing::debug!("🌐 Identity endpoint for region '{}': {}", region, endpoint);
        IdentityV3Client::new(self.http.clone(), &endpoint, token.id)
    }

    fn default_region(&self) -> &str {
        &self.config.region
    }
}

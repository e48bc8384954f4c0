use crate::config::ProviderConfig;
use crate::utils::error::{LookupError, Result};
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;

pub const SUBJECT_TOKEN_HEADER: &str = "X-Subject-Token";

#[derive(Debug, Clone, Deserialize)]
pub struct Endpoint {
    pub interface: String,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub region_id: Option<String>,
    pub url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CatalogEntry {
    #[serde(rename = "type")]
    pub service_type: String,
    #[serde(default)]
    pub endpoints: Vec<Endpoint>,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    token: TokenBody,
}

#[derive(Debug, Deserialize)]
struct TokenBody {
    expires_at: Option<DateTime<Utc>>,
    #[serde(default)]
    catalog: Vec<CatalogEntry>,
}

/// Keystone 發出的 token 與 service catalog
#[derive(Debug, Clone)]
pub struct AuthToken {
    pub id: String,
    pub expires_at: Option<DateTime<Utc>>,
    pub catalog: Vec<CatalogEntry>,
}

impl AuthToken {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|expires_at| expires_at <= now)
    }

    /// 依服務類型、interface 與 region 找 endpoint；region 為空時取第一個
    pub fn endpoint_for(&self, service_type: &str, interface: &str, region: &str) -> Option<&str> {
        self.catalog
            .iter()
            .filter(|entry| entry.service_type == service_type)
            .flat_map(|entry| entry.endpoints.iter())
            .filter(|endpoint| endpoint.interface == interface)
            .find(|endpoint| {
                region.is_empty()
                    || endpoint.region.as_deref() == Some(region)
                    || endpoint.region_id.as_deref() == Some(region)
            })
            .map(|endpoint| endpoint.url.as_str())
    }
}

/// `POST /auth/tokens` 的請求內容
pub fn auth_request_body(config: &ProviderConfig) -> serde_json::Value {
    let identity = match (&config.token, config.uses_token()) {
        (Some(token), true) => json!({
            "methods": ["token"],
            "token": {"id": token},
        }),
        _ => json!({
            "methods": ["password"],
            "password": {
                "user": {
                    "name": config.user_name.clone().unwrap_or_default(),
                    "password": config.password.clone().unwrap_or_default(),
                    "domain": {"name": config.user_domain_name},
                }
            },
        }),
    };

    let scope = match config.project_name.as_deref().filter(|p| !p.is_empty()) {
        Some(project) => json!({
            "project": {"name": project, "domain": {"name": config.user_domain_name}}
        }),
        None => json!({"domain": {"name": config.user_domain_name}}),
    };

    json!({"auth": {"identity": identity, "scope": scope}})
}

pub fn tokens_url(auth_url: &str) -> String {
    format!("{}/auth/tokens", auth_url.trim_end_matches('/'))
}

pub async fn authenticate(http: &Client, config: &ProviderConfig) -> Result<AuthToken> {
    let url = tokens_url(&config.auth_url);
    tracing::debug!("🔐 Requesting token from {}", url);

    let response = http
        .post(&url)
        .header("Accept", "application/json")
        .json(&auth_request_body(config))
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(LookupError::Auth {
            message: format!("POST {} returned {}: {}", url, status, body),
        });
    }

    let id = response
        .headers()
        .get(SUBJECT_TOKEN_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
        .ok_or_else(|| LookupError::Auth {
            message: format!("response from {} has no {} header", url, SUBJECT_TOKEN_HEADER),
        })?;

    let body: TokenResponse = response.json().await.map_err(|e| LookupError::Auth {
        message: format!("invalid token response: {}", e),
    })?;

    tracing::debug!(
        "🔐 Token issued, {} catalog entries, expires at {:?}",
        body.token.catalog.len(),
        body.token.expires_at
    );

    Ok(AuthToken {
        id,
        expires_at: body.token.expires_at,
        catalog: body.token.catalog,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn config() -> ProviderConfig {
        ProviderConfig::from_toml_str(
            r#"
auth_url = "https://iam.example.com/v3/"
user_name = "admin"
password = "secret"
user_domain_name = "acme"
project_name = "eu-west-0_demo"
"#,
        )
        .unwrap()
    }

    fn token_with_catalog() -> AuthToken {
        let catalog: Vec<CatalogEntry> = serde_json::from_value(json!([
            {"type": "compute", "endpoints": [
                {"interface": "public", "region": "eu-west-0", "url": "https://ecs.example.com"}
            ]},
            {"type": "identity", "endpoints": [
                {"interface": "internal", "region": "eu-west-0", "url": "https://iam.internal"},
                {"interface": "public", "region": "eu-west-0", "url": "https://iam.eu-west-0.example.com/v3"},
                {"interface": "public", "region_id": "eu-west-1", "url": "https://iam.eu-west-1.example.com/v3"}
            ]}
        ]))
        .unwrap();

        AuthToken {
            id: "tok".to_string(),
            expires_at: None,
            catalog,
        }
    }

    #[test]
    fn test_password_body_scoped_to_project() {
        let body = auth_request_body(&config());

        assert_eq!(body["auth"]["identity"]["methods"][0], "password");
        assert_eq!(body["auth"]["identity"]["password"]["user"]["name"], "admin");
        assert_eq!(body["auth"]["identity"]["password"]["user"]["domain"]["name"], "acme");
        assert_eq!(body["auth"]["scope"]["project"]["name"], "eu-west-0_demo");
    }

    #[test]
    fn test_token_body_scoped_to_domain() {
        let mut config = config();
        config.token = Some("gAAAA".to_string());
        config.project_name = None;

        let body = auth_request_body(&config);

        assert_eq!(body["auth"]["identity"]["methods"][0], "token");
        assert_eq!(body["auth"]["identity"]["token"]["id"], "gAAAA");
        assert_eq!(body["auth"]["scope"]["domain"]["name"], "acme");
    }

    #[test]
    fn test_tokens_url_trims_slash() {
        assert_eq!(tokens_url("https://iam.example.com/v3/"), "https://iam.example.com/v3/auth/tokens");
    }

    #[test]
    fn test_endpoint_for_region() {
        let token = token_with_catalog();
        assert_eq!(
            token.endpoint_for("identity", "public", "eu-west-0"),
            Some("https://iam.eu-west-0.example.com/v3")
        );
        assert_eq!(
            token.endpoint_for("identity", "public", "eu-west-1"),
            Some("https://iam.eu-west-1.example.com/v3")
        );
        assert_eq!(token.endpoint_for("identity", "public", "cn-north-1"), None);
    }

    #[test]
    fn test_endpoint_for_empty_region_takes_first_public() {
        let token = token_with_catalog();
        assert_eq!(
            token.endpoint_for("identity", "public", ""),
            Some("https://iam.eu-west-0.example.com/v3")
        );
    }

    #[test]
    fn test_token_expiry() {
        let now = Utc::now();
        let mut token = token_with_catalog();
        assert!(!token.is_expired(now));

        token.expires_at = Some(now - Duration::minutes(1));
        assert!(token.is_expired(now));

        token.expires_at = Some(now + Duration::hours(1));
        assert!(!token.is_expired(now));
    }
}

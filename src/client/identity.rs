use crate::domain::model::{PageRequest, ProjectPage};
use crate::domain::ports::IdentityClient;
use crate::utils::error::{LookupError, Result};
use async_trait::async_trait;
use reqwest::Client;
use url::Url;

pub const AUTH_TOKEN_HEADER: &str = "X-Auth-Token";

/// Keystone v3 REST client，只實作 project 清單
#[derive(Debug, Clone)]
pub struct IdentityV3Client {
    http: Client,
    endpoint: Url,
    token: String,
}

impl IdentityV3Client {
    /// `endpoint` 可以帶或不帶 `/v3`
    pub fn new(http: Client, endpoint: &str, token: impl Into<String>) -> Result<Self> {
        let mut endpoint = Url::parse(endpoint).map_err(|e| LookupError::InvalidConfigValue {
            field: "identity_endpoint".to_string(),
            value: endpoint.to_string(),
            reason: e.to_string(),
        })?;

        let path = endpoint.path().trim_end_matches('/').to_string();
        if path.ends_with("/v3") {
            endpoint.set_path(&format!("{}/", path));
        } else {
            endpoint.set_path(&format!("{}/v3/", path));
        }

        Ok(Self {
            http,
            endpoint,
            token: token.into(),
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    fn projects_url(&self) -> Result<Url> {
        self.endpoint.join("projects").map_err(|e| LookupError::Query {
            message: e.to_string(),
        })
    }
}

#[async_trait]
impl IdentityClient for IdentityV3Client {
    async fn fetch_page(&self, request: PageRequest) -> Result<ProjectPage> {
        let url = match request {
            PageRequest::First(filter) => {
                let mut url = self.projects_url()?;
                let pairs = filter.query_pairs();
                if !pairs.is_empty() {
                    url.query_pairs_mut().extend_pairs(pairs);
                }
                url
            }
            PageRequest::Next(url) => url,
        };

        tracing::debug!("📡 GET {}", url);
        let response = self
            .http
            .get(url.clone())
            .header(AUTH_TOKEN_HEADER, &self.token)
            .header("Accept", "application/json")
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        tracing::debug!("📡 API response status: {}", status);

        if !status.is_success() {
            return Err(LookupError::Query {
                message: format!("GET {} returned {}: {}", url, status, text),
            });
        }

        let body = serde_json::from_str(&text).map_err(|e| LookupError::Retrieve {
            message: format!("invalid JSON from {}: {}", url, e),
        })?;

        Ok(ProjectPage { url, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_gets_version_suffix() {
        let client = IdentityV3Client::new(Client::new(), "https://iam.example.com", "tok").unwrap();
        assert_eq!(client.endpoint().as_str(), "https://iam.example.com/v3/");

        let client = IdentityV3Client::new(Client::new(), "https://iam.example.com/v3", "tok").unwrap();
        assert_eq!(client.projects_url().unwrap().as_str(), "https://iam.example.com/v3/projects");

        let client =
            IdentityV3Client::new(Client::new(), "https://example.com/identity/v3/", "tok").unwrap();
        assert_eq!(
            client.projects_url().unwrap().as_str(),
            "https://example.com/identity/v3/projects"
        );
    }

    #[test]
    fn test_invalid_endpoint() {
        let err = IdentityV3Client::new(Client::new(), "not a url", "tok").unwrap_err();
        assert!(matches!(err, LookupError::InvalidConfigValue { .. }));
    }
}

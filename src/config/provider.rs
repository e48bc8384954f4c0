use crate::utils::error::{LookupError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;

const DEFAULT_TIMEOUT_SECONDS: u64 = 60;

/// Provider 層級設定：認證資訊與預設 region
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderConfig {
    pub auth_url: String,
    #[serde(default)]
    pub region: String,
    pub user_name: Option<String>,
    pub password: Option<String>,
    #[serde(default = "default_domain")]
    pub user_domain_name: String,
    pub project_name: Option<String>,
    pub token: Option<String>,
    /// 略過 service catalog，直接使用這個 identity endpoint
    pub identity_endpoint: Option<String>,
    #[serde(default)]
    pub insecure: bool,
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

fn default_domain() -> String {
    "Default".to_string()
}

fn default_timeout() -> u64 {
    DEFAULT_TIMEOUT_SECONDS
}

impl ProviderConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| LookupError::ConfigValidation {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${OS_PASSWORD})
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| LookupError::Config {
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// 從 OS_* 環境變數載入
    pub fn from_env() -> Result<Self> {
        let optional = |name: &str| env::var(name).ok().filter(|v| !v.is_empty());

        let auth_url = optional("OS_AUTH_URL").ok_or_else(|| LookupError::MissingConfig {
            field: "OS_AUTH_URL".to_string(),
        })?;

        let timeout_seconds = match optional("OS_TIMEOUT") {
            Some(raw) => raw.parse().map_err(|_| LookupError::InvalidConfigValue {
                field: "OS_TIMEOUT".to_string(),
                value: raw.clone(),
                reason: "must be a number of seconds".to_string(),
            })?,
            None => DEFAULT_TIMEOUT_SECONDS,
        };

        Ok(Self {
            auth_url,
            region: optional("OS_REGION_NAME").unwrap_or_default(),
            user_name: optional("OS_USERNAME"),
            password: optional("OS_PASSWORD"),
            user_domain_name: optional("OS_USER_DOMAIN_NAME")
                .or_else(|| optional("OS_DOMAIN_NAME"))
                .unwrap_or_else(default_domain),
            project_name: optional("OS_PROJECT_NAME").or_else(|| optional("OS_TENANT_NAME")),
            token: optional("OS_AUTH_TOKEN"),
            identity_endpoint: optional("OS_IDENTITY_ENDPOINT"),
            insecure: optional("OS_INSECURE")
                .map(|v| matches!(v.to_lowercase().as_str(), "1" | "true" | "yes"))
                .unwrap_or(false),
            timeout_seconds,
        })
    }

    pub fn uses_token(&self) -> bool {
        self.token.as_deref().is_some_and(|t| !t.is_empty())
    }
}

impl Validate for ProviderConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_url("auth_url", &self.auth_url)?;

        if let Some(endpoint) = &self.identity_endpoint {
            validation::validate_url("identity_endpoint", endpoint)?;
        }

        // token 或 帳號密碼 二擇一
        if !self.uses_token() {
            let user_name = validation::validate_required_field("user_name", &self.user_name)?;
            validation::validate_non_empty_string("user_name", user_name)?;
            let password = validation::validate_required_field("password", &self.password)?;
            validation::validate_non_empty_string("password", password)?;
            validation::validate_non_empty_string("user_domain_name", &self.user_domain_name)?;
        }

        validation::validate_range("timeout_seconds", self.timeout_seconds, 1, 600)?;

        tracing::debug!("✅ Provider configuration validation passed");
        Ok(())
    }
}

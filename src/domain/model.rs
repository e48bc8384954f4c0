use crate::utils::error::{LookupError, Result};
use serde::{Deserialize, Serialize};

/// Keystone v3 project，只讀
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub domain_id: String,
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub parent_id: String,
    #[serde(default)]
    pub is_domain: bool,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_enabled() -> bool {
    true
}

// Keystone 對 root project 的 parent_id 回傳 null
fn null_as_default<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// 查詢條件，空字串代表不限制
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectFilter {
    pub domain_id: String,
    pub name: String,
    pub parent_id: String,
}

impl ProjectFilter {
    /// 只輸出非空的查詢參數
    pub fn query_pairs(&self) -> Vec<(&'static str, &str)> {
        [
            ("domain_id", self.domain_id.as_str()),
            ("name", self.name.as_str()),
            ("parent_id", self.parent_id.as_str()),
        ]
        .into_iter()
        .filter(|(_, value)| !value.is_empty())
        .collect()
    }

    pub fn is_unconstrained(&self) -> bool {
        self.query_pairs().is_empty()
    }
}

/// 分頁請求：第一頁帶查詢條件，之後跟隨 `links.next`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageRequest {
    First(ProjectFilter),
    Next(url::Url),
}

/// 一頁尚未解析的 `GET /projects` 回應
#[derive(Debug, Clone)]
pub struct ProjectPage {
    pub url: url::Url,
    pub body: serde_json::Value,
}

impl ProjectPage {
    /// 下一頁的位址；相對路徑以本頁 URL 為基準
    ///
    /// `links.next` 不存在、`null` 或空字串代表最後一頁，
    /// 其他無法解析的值回傳 `Retrieve` 錯誤。
    pub fn next_url(&self) -> Result<Option<url::Url>> {
        let next = match self.body.get("links").and_then(|links| links.get("next")) {
            None | Some(serde_json::Value::Null) => return Ok(None),
            Some(serde_json::Value::String(next)) if next.is_empty() => return Ok(None),
            Some(serde_json::Value::String(next)) => next,
            Some(other) => {
                return Err(LookupError::Retrieve {
                    message: format!("invalid links.next in response from {}: {}", self.url, other),
                })
            }
        };

        self.url.join(next).map(Some).map_err(|e| LookupError::Retrieve {
            message: format!("invalid links.next '{}' in response from {}: {}", next, self.url, e),
        })
    }

    pub fn extract_projects(&self) -> Result<Vec<Project>> {
        let projects = self
            .body
            .get("projects")
            .ok_or_else(|| LookupError::Retrieve {
                message: format!("response from {} has no 'projects' field", self.url),
            })?;

        serde_json::from_value(projects.clone()).map_err(|e| LookupError::Retrieve {
            message: e.to_string(),
        })
    }
}

/// `identity_project_v3` data source 的宣告式設定物件
///
/// 輸入欄位為 `region`、`domain_id`、`name`、`parent_id`，
/// 其餘欄位在讀取成功後由遠端 project 填入。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProjectDataSourceModel {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_domain: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
}

impl ProjectDataSourceModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_domain_id(mut self, domain_id: impl Into<String>) -> Self {
        self.domain_id = Some(domain_id.into());
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_parent_id(mut self, parent_id: impl Into<String>) -> Self {
        self.parent_id = Some(parent_id.into());
        self
    }

    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    /// 從編排引擎傳入的 JSON 建立，未知欄位與計算欄位都會被拒絕
    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        let model: Self = serde_json::from_value(value).map_err(|e| LookupError::InvalidModel {
            message: e.to_string(),
        })?;

        let computed = [
            ("id", model.id.is_some()),
            ("description", model.description.is_some()),
            ("is_domain", model.is_domain.is_some()),
            ("enabled", model.enabled.is_some()),
        ];
        if let Some((field, _)) = computed.iter().find(|(_, set)| *set) {
            return Err(LookupError::InvalidModel {
                message: format!("'{}' is a computed attribute and cannot be configured", field),
            });
        }

        Ok(model)
    }

    pub fn to_value(&self) -> Result<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }
}

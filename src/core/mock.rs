use crate::domain::model::{PageRequest, Project, ProjectFilter, ProjectPage};
use crate::domain::ports::{ClientFactory, IdentityClient};
use crate::utils::error::{LookupError, Result};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use url::Url;

const BASE_URL: &str = "http://identity.mock/v3/projects";

pub(crate) fn project(id: &str, name: &str, domain_id: &str) -> Project {
    Project {
        id: id.to_string(),
        description: format!("{} description", name),
        domain_id: domain_id.to_string(),
        name: name.to_string(),
        parent_id: domain_id.to_string(),
        is_domain: false,
        enabled: true,
    }
}

/// 記憶體中的 identity service，依 filter 過濾並分頁
pub(crate) struct MockIdentityClient {
    projects: Vec<Project>,
    page_size: usize,
    fail_on_call: Option<usize>,
    calls: AtomicUsize,
}

impl MockIdentityClient {
    pub(crate) fn new(projects: Vec<Project>) -> Self {
        Self {
            projects,
            page_size: 100,
            fail_on_call: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub(crate) fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    /// 第 n 次呼叫 (從 0 起算) 回傳錯誤
    pub(crate) fn failing_on_call(mut self, call: usize) -> Self {
        self.fail_on_call = Some(call);
        self
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn matches(filter: &ProjectFilter, project: &Project) -> bool {
        (filter.domain_id.is_empty() || filter.domain_id == project.domain_id)
            && (filter.name.is_empty() || filter.name == project.name)
            && (filter.parent_id.is_empty() || filter.parent_id == project.parent_id)
    }

    fn page_url(filter: &ProjectFilter, offset: usize) -> Url {
        let mut pairs: Vec<(&str, String)> = filter
            .query_pairs()
            .into_iter()
            .map(|(k, v)| (k, v.to_string()))
            .collect();
        if offset > 0 {
            pairs.push(("offset", offset.to_string()));
        }
        Url::parse_with_params(BASE_URL, pairs).expect("mock url")
    }

    fn decode_next(url: &Url) -> (ProjectFilter, usize) {
        let mut filter = ProjectFilter::default();
        let mut offset = 0;
        for (key, value) in url.query_pairs() {
            match key.as_ref() {
                "domain_id" => filter.domain_id = value.into_owned(),
                "name" => filter.name = value.into_owned(),
                "parent_id" => filter.parent_id = value.into_owned(),
                "offset" => offset = value.parse().unwrap_or(0),
                _ => {}
            }
        }
        (filter, offset)
    }
}

#[async_trait]
impl IdentityClient for MockIdentityClient {
    async fn fetch_page(&self, request: PageRequest) -> Result<ProjectPage> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_on_call == Some(call) {
            return Err(LookupError::Query {
                message: "503 Service Unavailable".to_string(),
            });
        }

        let (filter, offset) = match request {
            PageRequest::First(filter) => (filter, 0),
            PageRequest::Next(url) => Self::decode_next(&url),
        };

        let matched: Vec<&Project> = self
            .projects
            .iter()
            .filter(|p| Self::matches(&filter, p))
            .collect();
        let end = (offset + self.page_size).min(matched.len());
        let slice = &matched[offset.min(end)..end];

        let next = if end < matched.len() {
            serde_json::Value::String(Self::page_url(&filter, end).to_string())
        } else {
            serde_json::Value::Null
        };

        Ok(ProjectPage {
            url: Self::page_url(&filter, offset),
            body: serde_json::json!({
                "projects": slice,
                "links": {"next": next, "previous": null},
            }),
        })
    }
}

/// 記錄被要求的 region，可設定為建立失敗
#[derive(Clone)]
pub(crate) struct MockClientFactory {
    projects: Vec<Project>,
    default_region: String,
    fail: bool,
    pub(crate) requested_regions: Arc<Mutex<Vec<String>>>,
}

impl MockClientFactory {
    pub(crate) fn new(projects: Vec<Project>, default_region: &str) -> Self {
        Self {
            projects,
            default_region: default_region.to_string(),
            fail: false,
            requested_regions: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub(crate) fn failing(mut self) -> Self {
        self.fail = true;
        self
    }
}

#[async_trait]
impl ClientFactory for MockClientFactory {
    type Client = MockIdentityClient;

    async fn identity_client(&self, region: &str) -> Result<Self::Client> {
        self.requested_regions
            .lock()
            .expect("regions lock")
            .push(region.to_string());
        if self.fail {
            return Err(LookupError::Auth {
                message: "The request you have made requires authentication.".to_string(),
            });
        }
        Ok(MockIdentityClient::new(self.projects.clone()))
    }

    fn default_region(&self) -> &str {
        &self.default_region
    }
}

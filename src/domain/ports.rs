use crate::domain::model::{PageRequest, ProjectPage};
use crate::utils::error::Result;
use async_trait::async_trait;

/// 已完成認證的 identity service 連線
#[async_trait]
pub trait IdentityClient: Send + Sync {
    /// 取回一頁 project 清單，不解析內容
    async fn fetch_page(&self, request: PageRequest) -> Result<ProjectPage>;
}

/// 依 region 建立 identity client
#[async_trait]
pub trait ClientFactory: Send + Sync {
    type Client: IdentityClient;

    async fn identity_client(&self, region: &str) -> Result<Self::Client>;

    /// 資料來源沒有指定 region 時使用的預設值
    fn default_region(&self) -> &str;
}

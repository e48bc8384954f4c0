use crate::core::lookup::read_project;
use crate::domain::model::ProjectDataSourceModel;
use crate::domain::ports::ClientFactory;
use crate::utils::error::{LookupError, Result};

/// `identity_project_v3` data source
pub struct ProjectDataSource<F: ClientFactory> {
    factory: F,
}

impl<F: ClientFactory> ProjectDataSource<F> {
    pub fn new(factory: F) -> Self {
        Self { factory }
    }

    /// 設定物件的 region 優先，否則使用 provider 預設
    pub fn resolve_region(&self, model: &ProjectDataSourceModel) -> String {
        model
            .region
            .as_deref()
            .filter(|r| !r.is_empty())
            .unwrap_or_else(|| self.factory.default_region())
            .to_string()
    }

    pub async fn read(&self, model: &mut ProjectDataSourceModel) -> Result<()> {
        let region = self.resolve_region(model);
        tracing::debug!("🌐 Resolving identity client for region '{}'", region);

        let client = self
            .factory
            .identity_client(&region)
            .await
            .map_err(|e| LookupError::ClientCreation {
                message: e.to_string(),
            })?;

        read_project(&client, model).await?;
        model.region = Some(region);
        Ok(())
    }

    /// 編排引擎的 JSON 介面：設定進、狀態出
    pub async fn read_value(&self, config: serde_json::Value) -> Result<serde_json::Value> {
        let mut model = ProjectDataSourceModel::from_value(config)?;
        self.read(&mut model).await?;
        model.to_value()
    }
}

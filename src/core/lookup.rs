use crate::core::pagination::ProjectPager;
use crate::domain::model::{Project, ProjectDataSourceModel, ProjectFilter};
use crate::domain::ports::IdentityClient;
use crate::utils::error::{LookupError, Result};

/// 由設定物件建立查詢條件，未設定的欄位視為空字串
pub fn build_filter(model: &ProjectDataSourceModel) -> ProjectFilter {
    ProjectFilter {
        domain_id: model.domain_id.clone().unwrap_or_default(),
        name: model.name.clone().unwrap_or_default(),
        parent_id: model.parent_id.clone().unwrap_or_default(),
    }
}

/// 取完所有分頁並解析成 project 清單
pub async fn list_projects<C>(client: &C, filter: &ProjectFilter) -> Result<Vec<Project>>
where
    C: IdentityClient + ?Sized,
{
    tracing::debug!("🔎 List options: {:?}", filter);
    if filter.is_unconstrained() {
        tracing::debug!("🔎 Empty filter, every visible project will be listed");
    }

    let pages = ProjectPager::new(client, filter.clone())
        .all_pages()
        .await
        .map_err(|e| match e {
            LookupError::Query { .. } | LookupError::Retrieve { .. } => e,
            other => LookupError::Query {
                message: other.to_string(),
            },
        })?;

    let mut projects = Vec::new();
    for page in &pages {
        projects.extend(page.extract_projects()?);
    }

    tracing::debug!(
        "🔎 {} project(s) across {} page(s)",
        projects.len(),
        pages.len()
    );
    Ok(projects)
}

/// 查詢結果必須剛好一筆
pub fn ensure_single(mut projects: Vec<Project>) -> Result<Project> {
    match projects.len() {
        0 => Err(LookupError::NoResults),
        1 => Ok(projects.remove(0)),
        count => {
            tracing::debug!("Multiple results found: {:?}", projects);
            Err(LookupError::MultipleResults { count })
        }
    }
}

pub fn apply_project(model: &mut ProjectDataSourceModel, project: &Project) {
    tracing::debug!("identity_project_v3 details: {:?}", project);

    model.id = Some(project.id.clone());
    model.is_domain = Some(project.is_domain);
    model.description = Some(project.description.clone());
    model.domain_id = Some(project.domain_id.clone());
    model.enabled = Some(project.enabled);
    model.name = Some(project.name.clone());
    model.parent_id = Some(project.parent_id.clone());
}

/// 以已認證的 client 執行查詢；失敗時不修改 `model`
pub async fn read_project<C>(client: &C, model: &mut ProjectDataSourceModel) -> Result<()>
where
    C: IdentityClient + ?Sized,
{
    let filter = build_filter(model);
    let projects = list_projects(client, &filter).await?;
    let project = ensure_single(projects)?;

    tracing::debug!("Single project found: {}", project.id);
    apply_project(model, &project);
    Ok(())
}

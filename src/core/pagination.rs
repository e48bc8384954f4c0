use crate::domain::model::{PageRequest, ProjectFilter, ProjectPage};
use crate::domain::ports::IdentityClient;
use crate::utils::error::{LookupError, Result};
use std::collections::HashSet;
use url::Url;

/// 逐頁取回 project 清單，需要時才發出下一個請求
///
/// 每個 URL 只會取一次，`links.next` 指回已取過的頁面時回傳 `Retrieve` 錯誤。
pub struct ProjectPager<'a, C: IdentityClient + ?Sized> {
    client: &'a C,
    next: Option<PageRequest>,
    visited: HashSet<Url>,
}

impl<'a, C: IdentityClient + ?Sized> ProjectPager<'a, C> {
    pub fn new(client: &'a C, filter: ProjectFilter) -> Self {
        Self {
            client,
            next: Some(PageRequest::First(filter)),
            visited: HashSet::new(),
        }
    }

    pub async fn next_page(&mut self) -> Result<Option<ProjectPage>> {
        let Some(request) = self.next.take() else {
            return Ok(None);
        };

        let page = self.client.fetch_page(request).await?;
        self.visited.insert(page.url.clone());

        self.next = match page.next_url()? {
            Some(next) if self.visited.contains(&next) => {
                return Err(LookupError::Retrieve {
                    message: format!(
                        "pagination loop: {} links back to already fetched page {}",
                        page.url, next
                    ),
                });
            }
            Some(next) => Some(PageRequest::Next(next)),
            None => None,
        };

        tracing::debug!(
            "📄 Fetched page {} from {} (more: {})",
            self.visited.len(),
            page.url,
            self.next.is_some()
        );
        Ok(Some(page))
    }

    /// 依序取完所有頁面
    pub async fn all_pages(mut self) -> Result<Vec<ProjectPage>> {
        let mut pages = Vec::new();
        while let Some(page) = self.next_page().await? {
            pages.push(page);
        }
        Ok(pages)
    }
}

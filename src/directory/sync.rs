use std::sync::Arc;

use crate::roles::{PageQuery, PageResult, Role, RoleId};

use super::{DirectoryError, ListRequest, RoleDirectory};

/// Issues list/detail/delete requests for a page query.
///
/// Holds no cache: every call goes to the directory and the caller replaces
/// its view with whatever comes back.
#[derive(Clone)]
pub struct DirectorySync {
    directory: Arc<dyn RoleDirectory>,
}

impl DirectorySync {
    pub fn new(directory: Arc<dyn RoleDirectory>) -> Self {
        Self { directory }
    }

    /// Request for one page of `query`; the directory counts pages from 1.
    pub fn page_request(query: &PageQuery) -> ListRequest {
        ListRequest {
            page: query.page_number(),
            limit: u64::from(query.page_size.get()),
            search: query.search_text.clone(),
        }
    }

    /// Request for the whole collection in a single page.
    pub fn snapshot_request(search_text: &str, total_count: u64) -> ListRequest {
        ListRequest {
            page: 1,
            limit: total_count,
            search: search_text.to_string(),
        }
    }

    pub async fn fetch_page(&self, query: &PageQuery) -> Result<PageResult, DirectoryError> {
        let request = Self::page_request(query);
        tracing::debug!(
            page = request.page,
            limit = request.limit,
            search = %request.search,
            "Fetching role page"
        );
        self.directory.list(&request).await
    }

    pub async fn fetch_one(&self, role_id: RoleId) -> Result<Role, DirectoryError> {
        tracing::debug!(role_id, "Fetching role");
        self.directory.get(role_id).await
    }

    pub async fn delete_one(&self, role_id: RoleId) -> Result<(), DirectoryError> {
        tracing::debug!(role_id, "Deleting role");
        self.directory.delete(role_id).await
    }

    /// Fetch every role matching `search_text`, sized by `total_count`.
    pub async fn fetch_all(
        &self,
        search_text: &str,
        total_count: u64,
    ) -> Result<PageResult, DirectoryError> {
        let request = Self::snapshot_request(search_text, total_count);
        tracing::debug!(limit = request.limit, "Fetching full role snapshot");
        self.directory.list(&request).await
    }
}

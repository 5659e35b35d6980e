//! Role Directory API: the remote collection the view mirrors.
//!
//! [`RoleDirectory`] is the seam between the controller and the backend.
//! [`HttpRoleDirectory`] talks REST; tests plug in scripted doubles.
//! [`DirectorySync`] translates page queries into directory requests.

mod error;
mod http;
mod sync;

use async_trait::async_trait;

use crate::roles::{PageResult, Role, RoleId};

pub use error::{DirectoryError, FailureKind};
pub use http::HttpRoleDirectory;
pub use sync::DirectorySync;

/// Parameters of one list call, exactly as sent on the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListRequest {
    /// 1-based page number.
    pub page: u64,
    pub limit: u64,
    pub search: String,
}

/// Remote collection of roles.
#[async_trait]
pub trait RoleDirectory: Send + Sync {
    async fn list(&self, request: &ListRequest) -> Result<PageResult, DirectoryError>;

    async fn get(&self, role_id: RoleId) -> Result<Role, DirectoryError>;

    async fn delete(&self, role_id: RoleId) -> Result<(), DirectoryError>;
}

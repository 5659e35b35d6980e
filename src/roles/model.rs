//! Server-owned role records and the page shapes exchanged with the directory.

use serde::{Deserialize, Serialize};

/// Identifier of a role in the directory.
pub type RoleId = i64;

/// Activation status of a role, computed by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoleStatus {
    Active,
    Inactive,
}

impl RoleStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoleStatus::Active => "Active",
            RoleStatus::Inactive => "Inactive",
        }
    }
}

impl std::fmt::Display for RoleStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named permission grouping.
///
/// The legacy backend spells its fields `RoleID`, `RoleName` and `Status`;
/// both spellings are accepted on the way in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    #[serde(alias = "RoleID")]
    pub id: RoleId,
    #[serde(alias = "RoleName")]
    pub name: String,
    #[serde(alias = "Status")]
    pub status: RoleStatus,
}

/// One page of roles as the client sees it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PageResult {
    /// Roles in server order.
    pub items: Vec<Role>,
    /// Size of the whole (filtered) collection.
    pub total_count: u64,
}

/// Body of the list endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RolePageBody {
    pub roles: Vec<Role>,
    #[serde(rename = "totalItems")]
    pub total_items: u64,
}

impl From<RolePageBody> for PageResult {
    fn from(body: RolePageBody) -> Self {
        Self {
            items: body.roles,
            total_count: body.total_items,
        }
    }
}

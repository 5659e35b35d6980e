//! Role records and the client-side page query.

mod model;
mod query;

pub use model::{PageResult, Role, RoleId, RolePageBody, RoleStatus};
pub use query::{last_page_index, InvalidPageSize, PageMove, PageQuery, PageSize};

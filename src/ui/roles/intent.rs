//! Intents for the roles table.

use crate::roles::{PageMove, PageResult, PageSize};
use crate::ui::mvi::Intent;

use super::state::{ActionFailure, RequestToken};

#[derive(Debug, Clone)]
pub enum RoleListIntent {
    SetPageIndex(u32),
    /// Resets to the first page.
    SetPageSize(PageSize),
    /// Resets to the first page.
    SetSearchText(String),
    /// Next size in the selector; resets to the first page.
    CyclePageSize,
    /// First/previous/next/last control; ignored when disabled.
    Move(PageMove),

    /// A page fetch is about to be sent; allocates the next request token.
    BeginFetch,
    PageLoaded {
        token: RequestToken,
        page: PageResult,
    },
    PageFailed {
        token: RequestToken,
        failure: ActionFailure,
    },
    /// Edit, delete or export failed.
    ActionFailed(ActionFailure),

    SelectNext,
    SelectPrevious,

    /// The view is gone; later results are dropped.
    Unmount,
}

impl Intent for RoleListIntent {}

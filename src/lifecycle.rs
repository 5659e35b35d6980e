//! Mounted/unmounted lifetime of the roles view.
//!
//! Work started on behalf of the view races against [`ViewLifetime::unmounted`];
//! once the view is gone, pending requests are dropped and their results
//! never reach the state.

use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::Notify;

#[derive(Clone, Default)]
pub struct ViewLifetime {
    unmounted: Arc<AtomicBool>,
    notify: Arc<Notify>,
}

impl ViewLifetime {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_unmounted(&self) -> bool {
        self.unmounted.load(Ordering::SeqCst)
    }

    pub fn unmount(&self) {
        if !self.unmounted.swap(true, Ordering::SeqCst) {
            tracing::debug!("Roles view unmounted");
            self.notify.notify_waiters();
        }
    }

    /// Resolves once the view is unmounted.
    pub async fn unmounted(&self) {
        // Register before checking the flag so a concurrent unmount() is not lost.
        let notified = self.notify.notified();
        tokio::pin!(notified);
        notified.as_mut().enable();
        if self.is_unmounted() {
            return;
        }
        notified.await;
    }

    /// Run `work` unless the view goes away first; `None` means abandoned.
    pub async fn guard<F: Future>(&self, work: F) -> Option<F::Output> {
        if self.is_unmounted() {
            return None;
        }
        tokio::select! {
            output = work => Some(output),
            _ = self.unmounted() => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn guard_passes_output_through_while_mounted() {
        let lifetime = ViewLifetime::new();
        assert_eq!(lifetime.guard(async { 7 }).await, Some(7));
    }

    #[tokio::test]
    async fn guard_abandons_work_on_unmount() {
        let lifetime = ViewLifetime::new();
        let remote = lifetime.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(10)).await;
            remote.unmount();
        });

        let result = lifetime
            .guard(tokio::time::sleep(Duration::from_secs(30)))
            .await;
        assert!(result.is_none());
        assert!(lifetime.is_unmounted());
    }

    #[tokio::test]
    async fn guard_refuses_after_unmount() {
        let lifetime = ViewLifetime::new();
        lifetime.unmount();
        assert_eq!(lifetime.guard(async { 1 }).await, None);
    }
}

//! Lifetime scopes for background work
//!
//! A [`Scope`] is owned by a screen or a long-lived subscription. Work started
//! inside it is abandoned once the scope is closed, and results that arrive
//! after closing are dropped instead of being applied to stale state.

use std::future::Future;
use tokio_util::sync::CancellationToken;

/// Cancellation scope tied to the lifetime of its owner
#[derive(Debug, Clone, Default)]
pub struct Scope {
    token: CancellationToken,
}

impl Scope {
    pub fn new() -> Self {
        Self::default()
    }

    /// A child scope closed together with this one
    pub fn child(&self) -> Self {
        Self {
            token: self.token.child_token(),
        }
    }

    /// Close the scope. Idempotent.
    pub fn close(&self) {
        self.token.cancel();
    }

    pub fn is_closed(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Run `fut` unless the scope closes first; `None` means the result was discarded
    pub async fn run<F, T>(&self, fut: F) -> Option<T>
    where
        F: Future<Output = T>,
    {
        if self.is_closed() {
            return None;
        }
        tokio::select! {
            biased;
            _ = self.token.cancelled() => None,
            out = fut => if self.is_closed() { None } else { Some(out) },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_run_returns_result_while_open() {
        let scope = Scope::new();
        assert_eq!(scope.run(async { 7 }).await, Some(7));
    }

    #[tokio::test]
    async fn test_run_discards_after_close() {
        let scope = Scope::new();
        scope.close();
        assert_eq!(scope.run(async { 7 }).await, None);
    }

    #[tokio::test]
    async fn test_close_interrupts_pending_work() {
        let scope = Scope::new();
        let closer = scope.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(10)).await;
            closer.close();
        });
        let out = scope
            .run(tokio::time::sleep(Duration::from_secs(5)))
            .await;
        assert!(out.is_none());
    }

    #[test]
    fn test_child_closes_with_parent() {
        let parent = Scope::new();
        let child = parent.child();
        parent.close();
        parent.close();
        assert!(child.is_closed());
    }

    #[test]
    fn test_child_discards_after_parent_close() {
        let parent = Scope::new();
        let child = parent.child();
        assert_eq!(tokio_test::block_on(child.run(async { 1 })), Some(1));
        parent.close();
        assert_eq!(tokio_test::block_on(child.run(async { 1 })), None);
    }
}

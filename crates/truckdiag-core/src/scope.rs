//! Cancellation scope binding requests to the lifetime of their view.
//!
//! A view owns one [`RequestScope`]. When the view goes away the scope is
//! dropped, every in-flight request run through it is abandoned, and its
//! result is never delivered.

use std::future::Future;

use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Owner of a cancellation token; cancels on drop.
#[derive(Debug, Default)]
pub struct RequestScope {
    token: CancellationToken,
}

impl RequestScope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Token observed by work run in this scope.
    pub fn token(&self) -> CancellationToken {
        self.token.clone()
    }

    /// Scope cancelled together with this one, but cancellable on its own.
    pub fn child(&self) -> RequestScope {
        RequestScope {
            token: self.token.child_token(),
        }
    }

    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Run `fut` unless the scope is cancelled first.
    pub async fn run<F: Future>(&self, fut: F) -> Option<F::Output> {
        run_scoped(&self.token, fut).await
    }
}

impl Drop for RequestScope {
    fn drop(&mut self) {
        self.token.cancel();
    }
}

/// Drive `fut` to completion, or return `None` once `token` is cancelled.
///
/// A token already cancelled on entry never polls `fut`.
pub async fn run_scoped<F: Future>(token: &CancellationToken, fut: F) -> Option<F::Output> {
    tokio::select! {
        biased;
        _ = token.cancelled() => {
            debug!("request dropped: scope cancelled");
            None
        }
        out = fut => Some(out),
    }
}

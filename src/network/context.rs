//! Cancellation and deadline handling for a single request

use std::future::Future;
use std::time::Duration;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use crate::errors::{QuoterError, QuoterResult};

/// Carries the caller's cancellation signal and optional deadline.
///
/// Work is raced against both; when either fires the work future is dropped,
/// which tears down every sub-future it was driving.
#[derive(Debug, Clone)]
pub struct RequestContext {
    token: CancellationToken,
    started: Instant,
    deadline: Option<Instant>,
}

impl RequestContext {
    pub fn new(token: CancellationToken) -> Self {
        Self {
            token,
            started: Instant::now(),
            deadline: None,
        }
    }

    pub fn background() -> Self {
        Self::new(CancellationToken::new())
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.deadline = Some(self.started + timeout);
        self
    }

    pub fn token(&self) -> &CancellationToken {
        &self.token
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    pub async fn run<F, T>(&self, work: F) -> QuoterResult<T>
    where
        F: Future<Output = QuoterResult<T>>,
    {
        if self.token.is_cancelled() {
            return Err(QuoterError::Cancelled);
        }

        let deadline = async {
            match self.deadline {
                Some(at) => tokio::time::sleep_until(at).await,
                None => std::future::pending::<()>().await,
            }
        };

        tokio::select! {
            biased;
            _ = self.token.cancelled() => Err(QuoterError::Cancelled),
            _ = deadline => Err(QuoterError::DeadlineExceeded {
                elapsed: self.started.elapsed(),
            }),
            result = work => result,
        }
    }
}

impl Default for RequestContext {
    fn default() -> Self {
        Self::background()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_passes_through_result() {
        let ctx = RequestContext::background();
        let out = ctx.run(async { Ok::<_, QuoterError>(5) }).await.unwrap();
        assert_eq!(out, 5);
    }

    #[tokio::test]
    async fn test_already_cancelled() {
        let token = CancellationToken::new();
        token.cancel();
        let ctx = RequestContext::new(token);
        assert!(ctx.is_cancelled());
        let err = ctx.run(async { Ok::<_, QuoterError>(()) }).await.unwrap_err();
        assert!(matches!(err, QuoterError::Cancelled));
    }

    #[tokio::test]
    async fn test_cancel_while_running() {
        let ctx = RequestContext::background();
        let token = ctx.token().clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(10)).await;
            token.cancel();
        });

        let err = ctx
            .run(async {
                tokio::time::sleep(Duration::from_secs(30)).await;
                Ok::<_, QuoterError>(())
            })
            .await
            .unwrap_err();
        assert!(matches!(err, QuoterError::Cancelled));
    }

    #[tokio::test]
    async fn test_deadline_exceeded() {
        let ctx = RequestContext::background().with_timeout(Duration::from_millis(50));
        let err = ctx
            .run(async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                Ok::<_, QuoterError>(())
            })
            .await
            .unwrap_err();
        assert!(matches!(err, QuoterError::DeadlineExceeded { .. }));
    }
}

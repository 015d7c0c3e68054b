use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::errors::{ElsError, ElsResult};

/// Shared flag that asks running scans to stop
#[derive(Debug, Clone, Default)]
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Time limit and cancellation checked between units of cross-search work
#[derive(Debug, Clone)]
pub struct ScanBudget {
    started: Instant,
    limit: Option<Duration>,
    token: CancellationToken,
}

impl ScanBudget {
    /// No deadline; only an explicit cancel stops the scan
    pub fn unlimited() -> Self {
        Self {
            started: Instant::now(),
            limit: None,
            token: CancellationToken::new(),
        }
    }

    /// Deadline `limit` from now
    pub fn with_limit(limit: Option<Duration>) -> Self {
        Self {
            limit,
            ..Self::unlimited()
        }
    }

    /// Ties the budget to an externally held token
    pub fn with_token(mut self, token: CancellationToken) -> Self {
        self.token = token;
        self
    }

    pub fn token(&self) -> &CancellationToken {
        &self.token
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// Fails once the token is cancelled or the deadline has passed
    pub fn check(&self) -> ElsResult<()> {
        if self.token.is_cancelled() {
            return Err(ElsError::Cancelled);
        }
        if let Some(limit) = self.limit {
            let elapsed = self.elapsed();
            if elapsed > limit {
                return Err(ElsError::deadline_exceeded(elapsed));
            }
        }
        Ok(())
    }
}

impl Default for ScanBudget {
    fn default() -> Self {
        Self::unlimited()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unlimited_budget_passes() {
        assert!(ScanBudget::unlimited().check().is_ok());
        assert!(ScanBudget::with_limit(Some(Duration::from_secs(60)))
            .check()
            .is_ok());
    }

    #[test]
    fn test_cancelled_token() {
        let token = CancellationToken::new();
        let budget = ScanBudget::unlimited().with_token(token.clone());
        token.cancel();
        assert!(matches!(budget.check(), Err(ElsError::Cancelled)));
    }

    #[test]
    fn test_expired_deadline() {
        let budget = ScanBudget::with_limit(Some(Duration::ZERO));
        std::thread::sleep(Duration::from_millis(2));
        assert!(matches!(
            budget.check(),
            Err(ElsError::DeadlineExceeded { .. })
        ));
    }
}

use std::sync::atomic::{AtomicBool, Ordering};

/// Circuit breaker that disables all further AI requests
/// as soon as the quota of the service has been exhausted.
///
/// Once tripped it stays open until the process is restarted.
#[derive(Debug, Default)]
pub struct QuotaBreaker(AtomicBool);

impl QuotaBreaker {
    pub const fn new() -> Self {
        Self(AtomicBool::new(false))
    }

    pub fn is_open(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    pub fn trip(&self) {
        if !self.0.swap(true, Ordering::AcqRel) {
            log::warn!("AI quota exhausted: switching to static mode");
        }
    }

    /// Trip the breaker if the error indicates an exhausted quota.
    pub fn observe(&self, err: &super::prelude::AiError) {
        if err.is_quota() {
            self.trip();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateways::ai::AiError;

    #[test]
    fn trip_on_quota_errors_only() {
        let breaker = QuotaBreaker::new();
        assert!(!breaker.is_open());
        breaker.observe(&AiError::Unavailable);
        assert!(!breaker.is_open());
        breaker.observe(&AiError::Quota("429".into()));
        assert!(breaker.is_open());
        breaker.trip();
        assert!(breaker.is_open());
    }
}

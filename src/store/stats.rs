//! Store Statistics Module
//!
//! Tracks verification attempts and record counts.

use serde::Serialize;

// == Store Stats ==
/// Verification outcome counters plus current record counts.
#[derive(Debug, Clone, Default, Serialize)]
pub struct StoreStats {
    /// Number of recorded quiz attempts
    pub attempts: u64,
    /// Number of attempts that advanced an accumulator
    pub successes: u64,
    /// Number of attempts with a wrong answer
    pub failures: u64,
    /// Current number of registered users
    pub total_users: usize,
    /// Current number of caches
    pub total_caches: usize,
}

impl StoreStats {
    // == Constructor ==
    /// Creates a new StoreStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Success Rate ==
    /// Returns successes / attempts, or 0.0 if nothing has been attempted.
    pub fn success_rate(&self) -> f64 {
        if self.attempts == 0 {
            0.0
        } else {
            self.successes as f64 / self.attempts as f64
        }
    }

    // == Record Success ==
    pub fn record_success(&mut self) {
        self.attempts += 1;
        self.successes += 1;
    }

    // == Record Failure ==
    pub fn record_failure(&mut self) {
        self.attempts += 1;
        self.failures += 1;
    }

    // == Update Record Counts ==
    pub fn set_totals(&mut self, users: usize, caches: usize) {
        self.total_users = users;
        self.total_caches = caches;
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_new() {
        let stats = StoreStats::new();
        assert_eq!(stats.attempts, 0);
        assert_eq!(stats.successes, 0);
        assert_eq!(stats.failures, 0);
        assert_eq!(stats.total_users, 0);
        assert_eq!(stats.total_caches, 0);
    }

    #[test]
    fn test_success_rate_no_attempts() {
        assert_eq!(StoreStats::new().success_rate(), 0.0);
    }

    #[test]
    fn test_success_rate_mixed() {
        let mut stats = StoreStats::new();
        stats.record_success();
        stats.record_failure();
        stats.record_failure();
        stats.record_success();
        assert_eq!(stats.attempts, 4);
        assert_eq!(stats.success_rate(), 0.5);
    }

    #[test]
    fn test_set_totals() {
        let mut stats = StoreStats::new();
        stats.set_totals(3, 7);
        assert_eq!(stats.total_users, 3);
        assert_eq!(stats.total_caches, 7);
    }
}

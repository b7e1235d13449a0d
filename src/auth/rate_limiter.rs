//! Brute force protection for sign-in

use crate::config::AuthConfig;
use crate::utils::logging::mask_email;
use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// New trackers between two sweeps of stale entries
const SWEEP_EVERY: u64 = 256;

/// Counts failed sign-ins per account and locks the account out for a while
/// once too many failures pile up inside the window
#[derive(Debug)]
pub struct SignInLimiter {
    /// Account key (normalized e-mail) -> tracker
    attempts: DashMap<String, AttemptTracker>,
    max_attempts: u32,
    window: Duration,
    /// Doubles with every consecutive lockout
    base_lockout: Duration,
    blocked_count: AtomicU64,
    created_count: AtomicU64,
}

#[derive(Debug)]
struct AttemptTracker {
    failure_count: u32,
    window_start: Instant,
    lockout_until: Option<Instant>,
    lockout_count: u32,
}

impl AttemptTracker {
    fn new(now: Instant) -> Self {
        Self {
            failure_count: 0,
            window_start: now,
            lockout_until: None,
            lockout_count: 0,
        }
    }
}

impl SignInLimiter {
    pub fn new(max_attempts: u32, window: Duration, base_lockout: Duration) -> Self {
        Self {
            attempts: DashMap::new(),
            max_attempts: max_attempts.max(1),
            window,
            base_lockout,
            blocked_count: AtomicU64::new(0),
            created_count: AtomicU64::new(0),
        }
    }

    pub fn from_config(config: &AuthConfig) -> Self {
        let lockout = Duration::from_secs(config.lockout_duration);
        Self::new(config.max_failed_attempts, lockout, lockout)
    }

    /// `Err(seconds)` while the account is locked out
    ///
    /// Accounts without failures are not tracked.
    pub fn check_allowed(&self, key: &str) -> Result<(), u64> {
        let now = Instant::now();
        let Some(mut entry) = self.attempts.get_mut(key) else {
            return Ok(());
        };
        let tracker = entry.value_mut();

        if let Some(lockout_until) = tracker.lockout_until {
            if now < lockout_until {
                self.blocked_count.fetch_add(1, Ordering::Relaxed);
                return Err(lockout_until.duration_since(now).as_secs().max(1));
            }
            tracker.lockout_until = None;
        }
        Ok(())
    }

    /// Count a failure; returns the lockout length when this failure caused one
    pub fn record_failure(&self, key: &str) -> Option<u64> {
        let now = Instant::now();
        let lockout = {
            let mut entry = self.attempts.entry(key.to_string()).or_insert_with(|| {
                self.created_count.fetch_add(1, Ordering::Relaxed);
                AttemptTracker::new(now)
            });
            let tracker = entry.value_mut();
            if now.duration_since(tracker.window_start) > self.window {
                tracker.failure_count = 0;
                tracker.window_start = now;
            }
            tracker.failure_count += 1;

            if tracker.failure_count < self.max_attempts {
                None
            } else {
                let multiplier = 2u32.saturating_pow(tracker.lockout_count.min(16));
                let lockout = self.base_lockout.saturating_mul(multiplier);
                tracker.lockout_until = Some(now + lockout);
                tracker.lockout_count += 1;
                tracker.failure_count = 0;

                warn!(
                    "Sign-in for {} locked for {} seconds (lockout #{})",
                    mask_email(key),
                    lockout.as_secs(),
                    tracker.lockout_count
                );
                Some(lockout.as_secs())
            }
        };

        if self.created_count.load(Ordering::Relaxed) >= SWEEP_EVERY {
            self.created_count.store(0, Ordering::Relaxed);
            self.cleanup_old_entries();
        }
        lockout
    }

    pub fn record_success(&self, key: &str) {
        self.attempts.remove(key);
    }

    pub fn blocked_attempts(&self) -> u64 {
        self.blocked_count.load(Ordering::Relaxed)
    }

    /// Number of accounts currently tracked
    pub fn tracked(&self) -> usize {
        self.attempts.len()
    }

    /// Forget trackers that are neither locked nor inside a live window
    pub fn cleanup_old_entries(&self) {
        let now = Instant::now();
        let max_age = self.window.saturating_mul(2);
        let before = self.attempts.len();
        self.attempts.retain(|_, tracker| {
            now.duration_since(tracker.window_start) < max_age
                || tracker.lockout_until.is_some_and(|until| until > now)
        });
        debug!("Sign-in limiter sweep kept {} of {} accounts", self.attempts.len(), before);
    }
}

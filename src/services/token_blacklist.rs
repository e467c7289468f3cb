//! Revoked token ids.
//!
//! Each revoked `jti` is remembered until the token it belongs to would have
//! expired. Logout revokes the caller's tokens here, and refresh rotation
//! revokes every refresh token as soon as it has been exchanged.

use chrono::Utc;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use log::{debug, info};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

/// Minimum time between two sweeps of expired entries.
const SWEEP_INTERVAL: Duration = Duration::from_secs(300);
/// Default `exp` leeway of `jsonwebtoken::Validation`.
const VALIDATION_LEEWAY_SECS: u64 = 60;

/// Shared set of revoked `jti`s. Clones share the same set.
#[derive(Clone)]
pub struct TokenBlacklist {
    revoked: Arc<DashMap<String, Instant>>,
    last_sweep: Arc<RwLock<Instant>>,
}

impl TokenBlacklist {
    pub fn new() -> Self {
        Self {
            revoked: Arc::new(DashMap::new()),
            last_sweep: Arc::new(RwLock::new(Instant::now())),
        }
    }

    /// Revoke `jti` until `exp` (Unix seconds).
    pub async fn blacklist_token(&self, jti: &str, exp: usize) {
        self.revoke(jti, exp).await;
    }

    /// Revoke `jti` until `exp` (Unix seconds) plus the validation leeway.
    ///
    /// Check and insert happen under one map entry lock, so of several
    /// concurrent callers revoking the same id exactly one gets `true`.
    /// Returns `false` when `jti` was already revoked. Tokens expired past
    /// the leeway are not stored; signature validation rejects those.
    pub async fn revoke(&self, jti: &str, exp: usize) -> bool {
        let now = Utc::now().timestamp().max(0) as u64;
        let Some(remaining) = (exp as u64 + VALIDATION_LEEWAY_SECS)
            .checked_sub(now)
            .filter(|secs| *secs > 0)
        else {
            debug!("Skipping revocation of expired token {}", jti);
            return true;
        };

        let now = Instant::now();
        let until = now + Duration::from_secs(remaining);
        let newly_revoked = match self.revoked.entry(jti.to_string()) {
            Entry::Occupied(mut entry) if *entry.get() <= now => {
                entry.insert(until);
                true
            }
            Entry::Occupied(_) => false,
            Entry::Vacant(entry) => {
                entry.insert(until);
                true
            }
        };

        if newly_revoked {
            debug!("Revoked token {} for {}s", jti, remaining);
            self.sweep_if_due().await;
        }
        newly_revoked
    }

    /// True while `jti` is revoked and its token has not yet expired.
    pub fn is_blacklisted(&self, jti: &str) -> bool {
        let now = Instant::now();
        // An expired entry is dropped on sight
        if self.revoked.remove_if(jti, |_, until| *until <= now).is_some() {
            return false;
        }
        self.revoked.contains_key(jti)
    }

    async fn sweep_if_due(&self) {
        if self.last_sweep.read().await.elapsed() < SWEEP_INTERVAL {
            return;
        }

        let mut last_sweep = self.last_sweep.write().await;
        // Another caller may have swept while we waited for the lock
        if last_sweep.elapsed() >= SWEEP_INTERVAL {
            self.sweep();
            *last_sweep = Instant::now();
        }
    }

    fn sweep(&self) {
        let now = Instant::now();
        let before = self.revoked.len();
        self.revoked.retain(|_, until| *until > now);

        let swept = before.saturating_sub(self.revoked.len());
        if swept > 0 {
            info!(
                "Swept {} expired revocations, {} still active",
                swept,
                self.revoked.len()
            );
        }
    }

    pub fn len(&self) -> usize {
        self.revoked.len()
    }

    pub fn is_empty(&self) -> bool {
        self.revoked.is_empty()
    }
}

impl Default for TokenBlacklist {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn in_one_hour() -> usize {
        (Utc::now().timestamp() + 3600) as usize
    }

    #[tokio::test]
    async fn test_revoked_id_is_reported() {
        let blacklist = TokenBlacklist::new();
        assert!(!blacklist.is_blacklisted("jti-1"));

        blacklist.blacklist_token("jti-1", in_one_hour()).await;
        assert!(blacklist.is_blacklisted("jti-1"));
        assert!(!blacklist.is_blacklisted("jti-2"));
        assert_eq!(blacklist.len(), 1);
    }

    #[tokio::test]
    async fn test_expired_token_is_not_stored() {
        let blacklist = TokenBlacklist::new();
        let past = (Utc::now().timestamp() - 120) as usize;
        blacklist.blacklist_token("old", past).await;
        assert!(blacklist.is_empty());
        assert!(!blacklist.is_blacklisted("old"));
    }

    #[tokio::test]
    async fn test_revoke_reports_first_revocation_only() {
        let blacklist = TokenBlacklist::new();
        assert!(blacklist.revoke("once", in_one_hour()).await);
        assert!(!blacklist.revoke("once", in_one_hour()).await);
        assert!(blacklist.is_blacklisted("once"));
    }

    #[tokio::test]
    async fn test_concurrent_revocations_have_one_winner() {
        let blacklist = TokenBlacklist::new();
        let exp = in_one_hour();
        let (a, b, c) = tokio::join!(
            blacklist.revoke("raced", exp),
            blacklist.revoke("raced", exp),
            blacklist.revoke("raced", exp)
        );
        assert_eq!([a, b, c].iter().filter(|won| **won).count(), 1);
    }

    #[tokio::test]
    async fn test_clones_share_revocations() {
        let blacklist = TokenBlacklist::new();
        let clone = blacklist.clone();
        clone.blacklist_token("shared", in_one_hour()).await;
        assert!(blacklist.is_blacklisted("shared"));
    }

    #[test]
    fn test_lapsed_entries_are_dropped() {
        let blacklist = TokenBlacklist::new();
        let lapsed = Instant::now() - Duration::from_secs(1);
        blacklist.revoked.insert("a".to_string(), lapsed);
        blacklist.revoked.insert("b".to_string(), lapsed);

        assert!(!blacklist.is_blacklisted("a"));
        assert_eq!(blacklist.len(), 1);

        blacklist.sweep();
        assert!(blacklist.is_empty());
    }
}

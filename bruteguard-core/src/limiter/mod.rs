//! Per-login, per-password and per-address rate limiting.

pub mod bucket_store;
pub mod window;

use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info, instrument, warn};

pub use bucket_store::BucketStore;
pub use window::WindowLimiter;

use crate::error::GuardError;
use crate::settings::rate_limiter::RateLimiterSettings;
use crate::stop_flag::StopFlag;

/// Facade over the three bucket stores.
///
/// Checks run in the fixed order login, password, address and stop at the first
/// denial, so a rejected attempt only ever increments the counters up to and
/// including the one that tripped.
#[derive(Debug, Clone)]
pub struct RateLimiter {
    login: BucketStore,
    password: BucketStore,
    address: BucketStore,
    sweep_interval: Duration,
}

impl RateLimiter {
    pub fn new(settings: &RateLimiterSettings) -> Self {
        RateLimiter {
            login: BucketStore::from_settings("login", &settings.login),
            password: BucketStore::from_settings("password", &settings.password),
            address: BucketStore::from_settings("address", &settings.address),
            sweep_interval: settings.sweep_interval.clone().into(),
        }
    }

    /// Returns `true` if any of the three counters rejected the attempt.
    #[instrument(skip(self, password))]
    pub async fn is_brute_force(
        &self,
        login: &str,
        password: &str,
        address: &str,
    ) -> Result<bool, GuardError> {
        for (store, key) in [
            (&self.login, login),
            (&self.password, password),
            (&self.address, address),
        ] {
            if !store.check(key).await {
                debug!(store = store.name(), "Rate limit exceeded");
                return Ok(true);
            }
        }
        Ok(false)
    }

    pub async fn reset_login(&self, login: &str) -> Result<(), GuardError> {
        self.login.delete(login).await
    }

    pub async fn reset_password(&self, password: &str) -> Result<(), GuardError> {
        self.password.delete(password).await
    }

    pub async fn reset_address(&self, address: &str) -> Result<(), GuardError> {
        self.address.delete(address).await
    }

    /// One eviction pass over all stores. Returns the number of evicted buckets.
    pub async fn sweep(&self) -> usize {
        self.login.clean().await + self.password.clean().await + self.address.clean().await
    }

    /// Runs [`RateLimiter::sweep`] every `sweep_interval` until `stop_flag` fires.
    pub fn spawn_sweeper(&self, stop_flag: StopFlag) -> JoinHandle<()> {
        let limiter = self.clone();
        let period = self.sweep_interval;

        tokio::spawn(async move {
            info!("Starting bucket sweeper, interval {:?}", period);
            let Some(start) = tokio::time::Instant::now().checked_add(period) else {
                warn!("Sweep interval {:?} is out of range, sweeper idle", period);
                stop_flag.wait().await;
                return;
            };
            let mut interval = tokio::time::interval_at(start, period);

            loop {
                tokio::select! {
                    _ = interval.tick() => {
                        let evicted = limiter.sweep().await;
                        debug!(evicted, "Bucket sweep finished");
                    }
                    _ = stop_flag.wait() => {
                        break;
                    }
                }
            }
            info!("Bucket sweeper stopped");
        })
    }

    pub fn login_store(&self) -> &BucketStore {
        &self.login
    }

    pub fn password_store(&self) -> &BucketStore {
        &self.password
    }

    pub fn address_store(&self) -> &BucketStore {
        &self.address
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::duration::DurationSetting;
    use crate::settings::rate_limiter::BucketSettings;

    fn limiter(login: u32, password: u32, address: u32) -> RateLimiter {
        let bucket = |capacity| {
            BucketSettings::new(
                capacity,
                DurationSetting::Seconds(1),
                DurationSetting::Seconds(2),
            )
        };
        RateLimiter::new(&RateLimiterSettings::new(
            bucket(login),
            bucket(password),
            bucket(address),
            DurationSetting::Seconds(1),
        ))
    }

    #[tokio::test(start_paused = true)]
    async fn test_admits_until_any_dimension_is_exhausted() {
        let limiter = limiter(2, 2, 2);

        assert!(!limiter.is_brute_force("a", "b", "10.0.0.1").await.unwrap());
        assert!(!limiter.is_brute_force("a", "b", "10.0.0.1").await.unwrap());
        assert!(limiter.is_brute_force("a", "b", "10.0.0.1").await.unwrap());
    }

    #[tokio::test(start_paused = true)]
    async fn test_login_denial_short_circuits_later_checks() {
        let limiter = limiter(1, 10, 10);

        assert!(!limiter.is_brute_force("a", "b", "10.0.0.1").await.unwrap());
        assert!(limiter.is_brute_force("a", "b", "10.0.0.1").await.unwrap());

        assert_eq!(limiter.login_store().get("a").await.unwrap().count(), 2);
        assert_eq!(limiter.password_store().get("b").await.unwrap().count(), 1);
        assert_eq!(limiter.address_store().get("10.0.0.1").await.unwrap().count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_password_denial_leaves_address_untouched() {
        let limiter = limiter(10, 1, 10);

        assert!(!limiter.is_brute_force("a", "b", "10.0.0.1").await.unwrap());
        assert!(limiter.is_brute_force("c", "b", "10.0.0.1").await.unwrap());

        assert_eq!(limiter.address_store().get("10.0.0.1").await.unwrap().count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_reset_login_unblocks_login() {
        let limiter = limiter(1, 10, 10);

        assert!(!limiter.is_brute_force("a", "b", "10.0.0.1").await.unwrap());
        assert!(limiter.is_brute_force("a", "b", "10.0.0.1").await.unwrap());

        limiter.reset_login("a").await.unwrap();
        assert!(!limiter.is_brute_force("a", "b", "10.0.0.1").await.unwrap());
    }

    #[tokio::test]
    async fn test_reset_unknown_key_is_not_found() {
        let limiter = limiter(1, 1, 1);
        assert!(limiter.reset_login("nobody").await.unwrap_err().is_not_found());
        assert!(limiter.reset_password("pw").await.unwrap_err().is_not_found());
        assert!(limiter.reset_address("10.9.9.9").await.unwrap_err().is_not_found());
    }

    #[tokio::test(start_paused = true)]
    async fn test_sweep_counts_evictions_across_stores() {
        let limiter = limiter(5, 5, 5);
        limiter.is_brute_force("a", "b", "10.0.0.1").await.unwrap();

        tokio::time::advance(Duration::from_secs(2)).await;
        assert_eq!(limiter.sweep().await, 3);
        assert!(limiter.login_store().is_empty().await);
    }

    #[tokio::test(start_paused = true)]
    async fn test_sweeper_evicts_idle_buckets_and_stops() {
        let limiter = limiter(5, 5, 5);
        limiter.is_brute_force("a", "b", "10.0.0.1").await.unwrap();

        let stop_flag = StopFlag::new();
        let handle = limiter.spawn_sweeper(stop_flag.clone());

        // The paused clock jumps through four sweep ticks while we sleep.
        tokio::time::sleep(Duration::from_millis(4500)).await;
        assert!(limiter.login_store().is_empty().await);
        assert!(limiter.address_store().is_empty().await);

        stop_flag.stop();
        stop_flag.stop();
        handle.await.unwrap();
    }
}

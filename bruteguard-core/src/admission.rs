use std::{net::IpAddr, sync::Arc};

use tracing::{debug, instrument, warn};

use crate::address_list::AddressList;
use crate::error::GuardError;
use crate::limiter::RateLimiter;

/// Login and password of one authentication attempt.
#[derive(Clone)]
pub struct Credentials {
    pub login: String,
    pub password: String,
}

impl Credentials {
    pub fn new(login: impl Into<String>, password: impl Into<String>) -> Self {
        Credentials {
            login: login.into(),
            password: password.into(),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("login", &self.login)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Decides whether an authentication attempt may proceed.
///
/// The allow list is consulted first and wins unconditionally, then the deny
/// list, then the rate limiter. Any error denies the attempt.
#[derive(Clone)]
pub struct AdmissionService {
    address_list: Arc<dyn AddressList>,
    rate_limiter: Arc<RateLimiter>,
}

impl AdmissionService {
    pub fn new(address_list: Arc<dyn AddressList>, rate_limiter: Arc<RateLimiter>) -> Self {
        AdmissionService {
            address_list,
            rate_limiter,
        }
    }

    /// IPv4-mapped IPv6 addresses are treated as the IPv4 address they carry,
    /// both for list lookups and as the address bucket key.
    #[instrument(skip(self, credentials), fields(login = %credentials.login))]
    pub async fn admit(&self, credentials: &Credentials, addr: IpAddr) -> Result<bool, GuardError> {
        let addr = addr.to_canonical();

        if self.address_list.is_in_allow(addr).await? {
            debug!("Address is allow-listed");
            return Ok(true);
        }

        if self.address_list.is_in_deny(addr).await? {
            warn!("Attempt from deny-listed address rejected");
            return Ok(false);
        }

        let brute_force = self
            .rate_limiter
            .is_brute_force(&credentials.login, &credentials.password, &addr.to_string())
            .await?;
        if brute_force {
            warn!("Attempt rejected by rate limiter");
        }
        Ok(!brute_force)
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;

    use super::*;
    use crate::address_list::{InMemoryAddressList, Prefix};
    use crate::settings::duration::DurationSetting;
    use crate::settings::rate_limiter::{BucketSettings, RateLimiterSettings};

    fn rate_limiter(capacity: u32) -> Arc<RateLimiter> {
        Arc::new(RateLimiter::new(&RateLimiterSettings::uniform(
            BucketSettings::new(
                capacity,
                DurationSetting::Seconds(1),
                DurationSetting::Seconds(60),
            ),
            DurationSetting::Seconds(60),
        )))
    }

    fn ip(s: &str) -> IpAddr {
        s.parse().unwrap()
    }

    #[tokio::test(start_paused = true)]
    async fn test_third_attempt_within_window_is_rejected() {
        let service = AdmissionService::new(Arc::new(InMemoryAddressList::new()), rate_limiter(2));
        let credentials = Credentials::new("a", "b");

        assert!(service.admit(&credentials, ip("10.0.0.1")).await.unwrap());
        assert!(service.admit(&credentials, ip("10.0.0.1")).await.unwrap());
        assert!(!service.admit(&credentials, ip("10.0.0.1")).await.unwrap());
    }

    #[tokio::test(start_paused = true)]
    async fn test_allow_list_bypasses_rate_limiting() {
        let list = Arc::new(InMemoryAddressList::new());
        list.add_to_allow(Prefix::parse("10.0.0.0/8").unwrap())
            .await
            .unwrap();
        let limiter = rate_limiter(1);
        let service = AdmissionService::new(list, limiter.clone());
        let credentials = Credentials::new("a", "b");

        for _ in 0..5 {
            assert!(service.admit(&credentials, ip("10.1.2.3")).await.unwrap());
        }
        assert!(limiter.login_store().is_empty().await);
    }

    #[tokio::test(start_paused = true)]
    async fn test_deny_list_rejects_without_touching_buckets() {
        let list = Arc::new(InMemoryAddressList::new());
        list.add_to_deny(Prefix::parse("192.168.1.0/24").unwrap())
            .await
            .unwrap();
        let limiter = rate_limiter(10);
        let service = AdmissionService::new(list, limiter.clone());

        let admitted = service
            .admit(&Credentials::new("a", "b"), ip("192.168.1.55"))
            .await
            .unwrap();

        assert!(!admitted);
        assert!(limiter.login_store().is_empty().await);
        assert!(limiter.password_store().is_empty().await);
        assert!(limiter.address_store().is_empty().await);
    }

    #[tokio::test(start_paused = true)]
    async fn test_allow_wins_over_overlapping_deny() {
        let list = Arc::new(InMemoryAddressList::new());
        list.add_to_allow(Prefix::parse("10.0.0.0/24").unwrap())
            .await
            .unwrap();
        list.add_to_deny(Prefix::parse("10.0.0.7").unwrap())
            .await
            .unwrap();
        let service = AdmissionService::new(list, rate_limiter(1));

        assert!(service
            .admit(&Credentials::new("a", "b"), ip("10.0.0.7"))
            .await
            .unwrap());
    }

    #[tokio::test(start_paused = true)]
    async fn test_mapped_ipv6_address_matches_ipv4_prefixes() {
        let list = Arc::new(InMemoryAddressList::new());
        list.add_to_deny(Prefix::parse("192.168.1.0/24").unwrap())
            .await
            .unwrap();
        list.add_to_allow(Prefix::parse("10.0.0.0/8").unwrap())
            .await
            .unwrap();
        let limiter = rate_limiter(10);
        let service = AdmissionService::new(list, limiter.clone());
        let credentials = Credentials::new("a", "b");

        assert!(!service
            .admit(&credentials, ip("::ffff:192.168.1.55"))
            .await
            .unwrap());
        assert!(service
            .admit(&credentials, ip("::ffff:10.1.2.3"))
            .await
            .unwrap());
        assert!(limiter.address_store().is_empty().await);
    }

    #[tokio::test(start_paused = true)]
    async fn test_mapped_ipv6_address_shares_ipv4_bucket() {
        let limiter = Arc::new(RateLimiter::new(&RateLimiterSettings::new(
            BucketSettings::new(
                100,
                DurationSetting::Seconds(1),
                DurationSetting::Seconds(60),
            ),
            BucketSettings::new(
                100,
                DurationSetting::Seconds(1),
                DurationSetting::Seconds(60),
            ),
            BucketSettings::new(
                1,
                DurationSetting::Seconds(1),
                DurationSetting::Seconds(60),
            ),
            DurationSetting::Seconds(60),
        )));
        let service = AdmissionService::new(Arc::new(InMemoryAddressList::new()), limiter.clone());

        assert!(service
            .admit(&Credentials::new("a", "b"), ip("10.0.0.1"))
            .await
            .unwrap());
        assert!(!service
            .admit(&Credentials::new("c", "d"), ip("::ffff:10.0.0.1"))
            .await
            .unwrap());
        assert_eq!(limiter.address_store().len().await, 1);
        assert!(limiter.address_store().contains("10.0.0.1").await);
    }

    struct BrokenList;

    #[async_trait]
    impl AddressList for BrokenList {
        async fn add_to_allow(&self, _: Prefix) -> Result<(), GuardError> {
            unimplemented!()
        }
        async fn add_to_deny(&self, _: Prefix) -> Result<(), GuardError> {
            unimplemented!()
        }
        async fn remove_from_allow(&self, _: Prefix) -> Result<(), GuardError> {
            unimplemented!()
        }
        async fn remove_from_deny(&self, _: Prefix) -> Result<(), GuardError> {
            unimplemented!()
        }
        async fn is_in_allow(&self, _: IpAddr) -> Result<bool, GuardError> {
            Ok(false)
        }
        async fn is_in_deny(&self, _: IpAddr) -> Result<bool, GuardError> {
            Err(GuardError::Infrastructure("backend down".to_string()))
        }
        async fn allow_count(&self) -> Result<usize, GuardError> {
            unimplemented!()
        }
        async fn deny_count(&self) -> Result<usize, GuardError> {
            unimplemented!()
        }
        async fn allow_entries(&self) -> Result<Vec<Prefix>, GuardError> {
            unimplemented!()
        }
        async fn deny_entries(&self) -> Result<Vec<Prefix>, GuardError> {
            unimplemented!()
        }
    }

    #[tokio::test]
    async fn test_backend_failure_fails_closed() {
        let limiter = rate_limiter(10);
        let service = AdmissionService::new(Arc::new(BrokenList), limiter.clone());

        let err = service
            .admit(&Credentials::new("a", "b"), ip("10.0.0.1"))
            .await
            .unwrap_err();
        assert!(err.is_infrastructure());
        assert!(limiter.login_store().is_empty().await);
    }

    #[test]
    fn test_debug_redacts_password() {
        let debug = format!("{:?}", Credentials::new("alice", "hunter2"));
        assert!(debug.contains("alice"));
        assert!(!debug.contains("hunter2"));
    }
}

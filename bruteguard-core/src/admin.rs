use std::{net::IpAddr, sync::Arc};

use tracing::{info, instrument, warn};

use crate::address_list::{AddressList, Prefix};
use crate::api::AddressListsResponse;
use crate::error::GuardError;
use crate::limiter::RateLimiter;

/// Operator actions: unblocking buckets and curating the address lists.
///
/// Errors of the underlying store or list are returned unchanged.
#[derive(Clone)]
pub struct AdminService {
    address_list: Arc<dyn AddressList>,
    rate_limiter: Arc<RateLimiter>,
}

fn logged<T>(result: Result<T, GuardError>, action: &str, target: &str) -> Result<T, GuardError> {
    match &result {
        Ok(_) => info!("{} {}", action, target),
        Err(e) => warn!("{} {} failed: {}", action, target, e),
    }
    result
}

impl AdminService {
    pub fn new(address_list: Arc<dyn AddressList>, rate_limiter: Arc<RateLimiter>) -> Self {
        AdminService {
            address_list,
            rate_limiter,
        }
    }

    #[instrument(skip(self))]
    pub async fn reset_login_bucket(&self, login: &str) -> Result<(), GuardError> {
        let result = self.rate_limiter.reset_login(login).await;
        logged(result, "Reset login bucket", login)
    }

    #[instrument(skip_all)]
    pub async fn reset_password_bucket(&self, password: &str) -> Result<(), GuardError> {
        let result = self.rate_limiter.reset_password(password).await;
        logged(result, "Reset password bucket", "[REDACTED]")
    }

    #[instrument(skip(self))]
    pub async fn reset_address_bucket(&self, addr: IpAddr) -> Result<(), GuardError> {
        let key = addr.to_canonical().to_string();
        let result = self.rate_limiter.reset_address(&key).await;
        logged(result, "Reset address bucket", &key)
    }

    #[instrument(skip_all, fields(prefix = %prefix))]
    pub async fn add_allow(&self, prefix: Prefix) -> Result<(), GuardError> {
        let result = self.address_list.add_to_allow(prefix).await;
        logged(result, "Add to allow list", &prefix.to_string())
    }

    #[instrument(skip_all, fields(prefix = %prefix))]
    pub async fn remove_allow(&self, prefix: Prefix) -> Result<(), GuardError> {
        let result = self.address_list.remove_from_allow(prefix).await;
        logged(result, "Remove from allow list", &prefix.to_string())
    }

    #[instrument(skip_all, fields(prefix = %prefix))]
    pub async fn add_deny(&self, prefix: Prefix) -> Result<(), GuardError> {
        let result = self.address_list.add_to_deny(prefix).await;
        logged(result, "Add to deny list", &prefix.to_string())
    }

    #[instrument(skip_all, fields(prefix = %prefix))]
    pub async fn remove_deny(&self, prefix: Prefix) -> Result<(), GuardError> {
        let result = self.address_list.remove_from_deny(prefix).await;
        logged(result, "Remove from deny list", &prefix.to_string())
    }

    pub async fn list_summary(&self) -> Result<AddressListsResponse, GuardError> {
        let allow = self.address_list.allow_entries().await?;
        let deny = self.address_list.deny_entries().await?;

        Ok(AddressListsResponse {
            allow_count: self.address_list.allow_count().await?,
            deny_count: self.address_list.deny_count().await?,
            allow: allow.iter().map(ToString::to_string).collect(),
            deny: deny.iter().map(ToString::to_string).collect(),
        })
    }
}

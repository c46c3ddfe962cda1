use std::sync::Arc;

use bruteguard_core::{
    address_list::{AddressList, FileAddressList, InMemoryAddressList},
    admin::AdminService,
    admission::AdmissionService,
    limiter::RateLimiter,
    settings::address_list::{AddressListBackend, AddressListSettings},
};
use tracing::info;

use crate::settings::config::Settings;

#[derive(Clone)]
pub struct AppState {
    pub settings: Settings,
    pub rate_limiter: Arc<RateLimiter>,
    pub admission: AdmissionService,
    pub admin: AdminService,
}

pub type SharedAppState = Arc<AppState>;

async fn create_address_list(
    settings: &AddressListSettings,
) -> anyhow::Result<Arc<dyn AddressList>> {
    match (&settings.backend, &settings.path) {
        (AddressListBackend::File, Some(path)) => {
            info!("Using file address list backend at {}", path);
            Ok(Arc::new(FileAddressList::open(path).await?))
        }
        (AddressListBackend::File, None) => {
            anyhow::bail!("address_list.path is required for the file backend")
        }
        (AddressListBackend::Memory, _) => {
            info!("Using in-memory address list backend");
            Ok(Arc::new(InMemoryAddressList::new()))
        }
    }
}

impl AppState {
    pub async fn new(settings: Settings) -> anyhow::Result<SharedAppState> {
        let address_list = create_address_list(&settings.address_list).await?;
        let rate_limiter = Arc::new(RateLimiter::new(&settings.rate_limiter));

        Ok(Arc::new(AppState {
            admission: AdmissionService::new(address_list.clone(), rate_limiter.clone()),
            admin: AdminService::new(address_list, rate_limiter.clone()),
            rate_limiter,
            settings,
        }))
    }
}

use std::{net::IpAddr, sync::Arc};

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use super::{AddressList, AddressLists, ListKind, Prefix};
use crate::error::GuardError;

/// Address lists kept in process memory only.
#[derive(Debug, Clone, Default)]
pub struct InMemoryAddressList {
    lists: Arc<RwLock<AddressLists>>,
}

impl InMemoryAddressList {
    pub fn new() -> Self {
        Self::default()
    }

    async fn add(&self, kind: ListKind, prefix: Prefix) -> Result<(), GuardError> {
        self.lists.write().await.insert(kind, prefix)?;
        debug!("Added {} to {}", prefix, kind);
        Ok(())
    }

    async fn remove(&self, kind: ListKind, prefix: Prefix) -> Result<(), GuardError> {
        self.lists.write().await.remove(kind, prefix)?;
        debug!("Removed {} from {}", prefix, kind);
        Ok(())
    }
}

#[async_trait]
impl AddressList for InMemoryAddressList {
    async fn add_to_allow(&self, prefix: Prefix) -> Result<(), GuardError> {
        self.add(ListKind::Allow, prefix).await
    }

    async fn add_to_deny(&self, prefix: Prefix) -> Result<(), GuardError> {
        self.add(ListKind::Deny, prefix).await
    }

    async fn remove_from_allow(&self, prefix: Prefix) -> Result<(), GuardError> {
        self.remove(ListKind::Allow, prefix).await
    }

    async fn remove_from_deny(&self, prefix: Prefix) -> Result<(), GuardError> {
        self.remove(ListKind::Deny, prefix).await
    }

    async fn is_in_allow(&self, addr: IpAddr) -> Result<bool, GuardError> {
        Ok(self.lists.read().await.contains(ListKind::Allow, addr))
    }

    async fn is_in_deny(&self, addr: IpAddr) -> Result<bool, GuardError> {
        Ok(self.lists.read().await.contains(ListKind::Deny, addr))
    }

    async fn allow_count(&self) -> Result<usize, GuardError> {
        Ok(self.lists.read().await.count(ListKind::Allow))
    }

    async fn deny_count(&self) -> Result<usize, GuardError> {
        Ok(self.lists.read().await.count(ListKind::Deny))
    }

    async fn allow_entries(&self) -> Result<Vec<Prefix>, GuardError> {
        Ok(self.lists.read().await.entries(ListKind::Allow))
    }

    async fn deny_entries(&self) -> Result<Vec<Prefix>, GuardError> {
        Ok(self.lists.read().await.entries(ListKind::Deny))
    }
}

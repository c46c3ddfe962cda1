use std::{
    net::IpAddr,
    path::{Path, PathBuf},
};

use async_trait::async_trait;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, error, info};

use super::{AddressList, AddressLists, ListKind, Prefix};
use crate::error::GuardError;

/// Address lists persisted as a YAML document.
///
/// Every mutation is applied to a copy, written to `<path>.tmp` and renamed
/// over `path`. Only then does the copy replace the in-memory state, so a failed
/// write leaves both the file and the lists unchanged.
///
/// Mutations are serialized by `write_lock`, which is held across the file
/// I/O. The `lists` lock is only taken for the snapshot and the final swap, so
/// lookups never wait on the disk.
#[derive(Debug)]
pub struct FileAddressList {
    path: PathBuf,
    lists: RwLock<AddressLists>,
    write_lock: Mutex<()>,
}

impl FileAddressList {
    /// Loads the document at `path`. A missing file yields two empty lists.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, GuardError> {
        let path = path.as_ref().to_path_buf();
        let lists = match tokio::fs::read_to_string(&path).await {
            Ok(content) if content.trim().is_empty() => AddressLists::default(),
            Ok(content) => serde_norway::from_str(&content).map_err(|e| {
                GuardError::Infrastructure(format!("Failed to parse {}: {}", path.display(), e))
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!(
                    "Address list file {} does not exist yet, starting empty",
                    path.display()
                );
                AddressLists::default()
            }
            Err(e) => {
                return Err(GuardError::Infrastructure(format!(
                    "Failed to read {}: {}",
                    path.display(),
                    e
                )))
            }
        };

        info!(
            "Loaded {} allow and {} deny entries from {}",
            lists.count(ListKind::Allow),
            lists.count(ListKind::Deny),
            path.display()
        );

        Ok(FileAddressList {
            path,
            lists: RwLock::new(lists),
            write_lock: Mutex::new(()),
        })
    }

    async fn persist(&self, lists: &AddressLists) -> Result<(), GuardError> {
        let content = serde_norway::to_string(lists)
            .map_err(|e| GuardError::Infrastructure(format!("Failed to serialize lists: {e}")))?;

        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        tokio::fs::write(&tmp, content).await.map_err(|e| {
            GuardError::Infrastructure(format!("Failed to write {}: {}", tmp.display(), e))
        })?;
        tokio::fs::rename(&tmp, &self.path).await.map_err(|e| {
            GuardError::Infrastructure(format!(
                "Failed to replace {}: {}",
                self.path.display(),
                e
            ))
        })
    }

    async fn mutate<F>(&self, op: F) -> Result<(), GuardError>
    where
        F: FnOnce(&mut AddressLists) -> Result<(), GuardError>,
    {
        let _guard = self.write_lock.lock().await;
        let mut updated = self.lists.read().await.clone();
        op(&mut updated)?;

        if let Err(e) = self.persist(&updated).await {
            error!("Address list change rolled back: {}", e);
            return Err(e);
        }
        *self.lists.write().await = updated;
        Ok(())
    }

    async fn add(&self, kind: ListKind, prefix: Prefix) -> Result<(), GuardError> {
        self.mutate(|lists| lists.insert(kind, prefix)).await?;
        debug!("Added {} to {}", prefix, kind);
        Ok(())
    }

    async fn remove(&self, kind: ListKind, prefix: Prefix) -> Result<(), GuardError> {
        self.mutate(|lists| lists.remove(kind, prefix)).await?;
        debug!("Removed {} from {}", prefix, kind);
        Ok(())
    }
}

#[async_trait]
impl AddressList for FileAddressList {
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

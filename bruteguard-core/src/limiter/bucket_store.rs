use std::{collections::HashMap, sync::Arc, time::Duration};

use tokio::sync::RwLock;
use tracing::{debug, info};

use super::window::WindowLimiter;
use crate::error::GuardError;
use crate::settings::rate_limiter::BucketSettings;

pub type BucketHashMap = HashMap<String, WindowLimiter>;

/// Concurrent map from an opaque key to its [`WindowLimiter`].
///
/// Buckets are created lazily on first use and evicted by [`BucketStore::clean`]
/// once idle for `idle_expiry`. A single lock guards the whole map.
#[derive(Debug, Clone)]
pub struct BucketStore {
    name: &'static str,
    buckets: Arc<RwLock<BucketHashMap>>,
    capacity: u32,
    window: Duration,
    idle_expiry: Duration,
}

impl BucketStore {
    pub fn new(name: &'static str, capacity: u32, window: Duration, idle_expiry: Duration) -> Self {
        BucketStore {
            name,
            buckets: Arc::new(RwLock::new(BucketHashMap::new())),
            capacity,
            window,
            idle_expiry,
        }
    }

    pub fn from_settings(name: &'static str, settings: &BucketSettings) -> Self {
        Self::new(
            name,
            settings.capacity,
            settings.window.clone().into(),
            settings.idle_expiry.clone().into(),
        )
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Creates a fresh limiter for `key`, failing if one is already present.
    pub async fn add(&self, key: &str) -> Result<WindowLimiter, GuardError> {
        let mut buckets = self.buckets.write().await;
        if buckets.contains_key(key) {
            return Err(GuardError::AlreadyExists(format!("{} bucket", self.name)));
        }

        let limiter = WindowLimiter::new(self.capacity, self.window);
        buckets.insert(key.to_string(), limiter.clone());
        Ok(limiter)
    }

    /// Returns a snapshot of the limiter stored for `key`.
    pub async fn get(&self, key: &str) -> Result<WindowLimiter, GuardError> {
        self.buckets
            .read()
            .await
            .get(key)
            .cloned()
            .ok_or_else(|| GuardError::NotFound(format!("{} bucket", self.name)))
    }

    pub async fn delete(&self, key: &str) -> Result<(), GuardError> {
        match self.buckets.write().await.remove(key) {
            Some(_) => Ok(()),
            None => Err(GuardError::NotFound(format!("{} bucket", self.name))),
        }
    }

    /// Registers one event for `key`, creating its bucket on a miss.
    ///
    /// Lookup, creation and the `allow` call happen under one write lock, so
    /// concurrent checks for the same key are serialized.
    pub async fn check(&self, key: &str) -> bool {
        let mut buckets = self.buckets.write().await;
        let limiter = buckets.entry(key.to_string()).or_insert_with(|| {
            debug!(store = self.name, "Creating bucket");
            WindowLimiter::new(self.capacity, self.window)
        });
        limiter.allow()
    }

    /// Evicts every bucket idle for at least `idle_expiry` and returns how many
    /// were removed. Holds the write lock for the whole pass.
    pub async fn clean(&self) -> usize {
        let mut buckets = self.buckets.write().await;
        let initial_count = buckets.len();

        buckets.retain(|_, limiter| limiter.idle_for() < self.idle_expiry);

        let removed_count = initial_count - buckets.len();
        if removed_count > 0 {
            info!(
                "Cleaned up {} idle {} bucket(s), {} remaining",
                removed_count,
                self.name,
                buckets.len()
            );
        }
        removed_count
    }

    pub async fn contains(&self, key: &str) -> bool {
        self.buckets.read().await.contains_key(key)
    }

    pub async fn len(&self) -> usize {
        self.buckets.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.buckets.read().await.is_empty()
    }
}

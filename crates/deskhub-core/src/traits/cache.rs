//! Cache provider trait for query caching.

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;

use crate::result::AppResult;

/// Trait for cache backends holding cached backend reads.
///
/// Values are stored as JSON strings and invalidated by exact key.
#[async_trait]
pub trait CacheProvider: Send + Sync + std::fmt::Debug + 'static {
    /// Get a value by key. Returns `None` if the key does not exist or has expired.
    async fn get(&self, key: &str) -> AppResult<Option<String>>;

    /// Set a value with a TTL.
    async fn set(&self, key: &str, value: &str, ttl: Duration) -> AppResult<()>;

    /// Set a value with the default TTL.
    async fn set_default(&self, key: &str, value: &str) -> AppResult<()>;

    /// Delete a key from the cache.
    async fn delete(&self, key: &str) -> AppResult<()>;

    /// Check whether a key exists in the cache.
    async fn exists(&self, key: &str) -> AppResult<bool>;
}

/// Typed JSON helpers on top of any [`CacheProvider`], usable through `dyn`.
pub trait CacheProviderExt: CacheProvider {
    /// Get a typed value by deserializing from JSON.
    fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        key: &str,
    ) -> impl Future<Output = AppResult<Option<T>>> + Send {
        async move {
            match self.get(key).await? {
                Some(value) => {
                    let parsed = serde_json::from_str(&value)?;
                    Ok(Some(parsed))
                }
                None => Ok(None),
            }
        }
    }

    /// Set a typed value with the default TTL by serializing to JSON.
    fn set_json<T: serde::Serialize>(
        &self,
        key: &str,
        value: &T,
    ) -> impl Future<Output = AppResult<()>> + Send {
        let encoded = serde_json::to_string(value);
        async move {
            let json = encoded?;
            self.set_default(key, &json).await
        }
    }
}

impl<C: CacheProvider + ?Sized> CacheProviderExt for C {}

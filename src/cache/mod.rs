//! 缓存模块
//!
//! 提供可插拔的对象缓存：moka（进程内，默认）与 redis 两种后端。
//! 业务层通过 get_or_load 以旁路缓存（cache-aside)方式读取，
//! 写路径只做失效，不做同步更新。

pub mod object_cache;
pub mod register;
pub mod traits;

pub use traits::{CacheResult, ObjectCache};

use std::future::Future;
use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::errors::Result;

/// 旁路缓存读取：优先读缓存，未命中或反序列化失败时回源，
/// 回源结果有值则写回缓存。缓存层故障只会降级为直接回源。
pub async fn get_or_load<T, F, Fut>(
    cache: &Arc<dyn ObjectCache>,
    key: &str,
    ttl: u64,
    loader: F,
) -> Result<Option<T>>
where
    T: Serialize + DeserializeOwned,
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<Option<T>>>,
{
    if let CacheResult::Found(raw) = cache.get_raw(key).await {
        match serde_json::from_str::<T>(&raw) {
            Ok(value) => {
                debug!("Cache hit for key: {}", key);
                return Ok(Some(value));
            }
            Err(e) => {
                // 脏数据直接清除，走回源路径重建
                warn!("Failed to deserialize cached value for key '{}': {}", key, e);
                cache.remove(key).await;
            }
        }
    }

    let loaded = loader().await?;
    if let Some(value) = &loaded {
        match serde_json::to_string(value) {
            Ok(raw) => cache.insert_raw(key.to_string(), raw, ttl).await,
            Err(e) => warn!("Failed to serialize value for cache key '{}': {}", key, e),
        }
    }
    Ok(loaded)
}

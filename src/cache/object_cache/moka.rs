use async_trait::async_trait;
use moka::future::Cache;
use tracing::{debug, warn};

use crate::cache::{CacheResult, ObjectCache};
use crate::config::AppConfig;
use crate::declare_object_cache_plugin;

declare_object_cache_plugin!("moka", MokaCacheWrapper);

pub struct MokaCacheWrapper {
    inner: Cache<String, String>,
}

impl Default for MokaCacheWrapper {
    fn default() -> Self {
        Self::new().expect("MokaCacheWrapper 初始化失败，请检查配置")
    }
}

impl MokaCacheWrapper {
    pub fn new() -> Result<Self, String> {
        let config = AppConfig::get();
        let inner = Cache::builder()
            .max_capacity(config.cache.memory.max_capacity)
            .time_to_live(std::time::Duration::from_secs(config.cache.default_ttl))
            // 前缀失效依赖谓词失效能力
            .support_invalidation_closures()
            .build();

        debug!(
            "MokaCacheWrapper initialized with max capacity: {}",
            config.cache.memory.max_capacity
        );
        Ok(Self { inner })
    }
}

#[async_trait]
impl ObjectCache for MokaCacheWrapper {
    async fn get_raw(&self, key: &str) -> CacheResult<String> {
        if let Some(value) = self.inner.get(key).await {
            debug!("Successfully retrieved key: {}", key);
            CacheResult::Found(value)
        } else {
            debug!("Key not found in cache: {}", key);
            CacheResult::NotFound
        }
    }

    async fn insert_raw(&self, key: String, value: String, ttl: u64) {
        // Moka 缓存使用配置的 TTL，这里的 ttl 参数会被忽略
        // 因为 Moka 在创建时就设置了全局的 TTL 策略
        self.inner.insert(key, value).await;

        if ttl != 0 {
            tracing::debug!("Moka cache ignores per-item TTL, using global TTL configuration");
        }
    }

    async fn remove(&self, key: &str) {
        self.inner.invalidate(key).await;
    }

    async fn remove_by_pattern(&self, pattern: &str) {
        // 仅支持尾部通配：去掉 '*' 后按前缀失效
        if let Some(prefix) = pattern.strip_suffix('*') {
            let prefix = prefix.to_string();
            if let Err(e) = self
                .inner
                .invalidate_entries_if(move |key, _| key.starts_with(&prefix))
            {
                warn!("Failed to invalidate entries for pattern '{}': {}", pattern, e);
            }
        } else {
            self.inner.invalidate(pattern).await;
        }
    }

    async fn invalidate_all(&self) {
        self.inner.invalidate_all();
    }
}

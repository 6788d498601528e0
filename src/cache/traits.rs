use async_trait::async_trait;

/// 缓存查询结果
#[derive(Debug, Clone, PartialEq)]
pub enum CacheResult<T> {
    /// 命中
    Found(T),
    /// 未命中
    NotFound,
    /// 键存在但无法取值（缓存层故障时也返回此值，调用方应回源）
    ExistsButNoValue,
}

/// 对象缓存统一接口
///
/// 所有方法都不返回错误：缓存故障在实现内部记录日志并降级，
/// 调用方只会观察到未命中。
#[async_trait]
pub trait ObjectCache: Send + Sync {
    async fn get_raw(&self, key: &str) -> CacheResult<String>;

    /// ttl 单位为秒，0 表示使用后端默认 TTL
    async fn insert_raw(&self, key: String, value: String, ttl: u64);

    async fn remove(&self, key: &str);

    /// 按模式删除，仅支持尾部 '*' 的前缀匹配（如 "rooms:teacher:1:*"）
    async fn remove_by_pattern(&self, pattern: &str);

    async fn invalidate_all(&self);
}

/// 注册缓存插件的宏
///
/// 在模块加载时通过 ctor 将构造器写入注册表，
/// 启动阶段按配置的名称取出并实例化。
#[macro_export]
macro_rules! declare_object_cache_plugin {
    ($name:literal, $cache:ident) => {
        paste::paste! {
            #[ctor::ctor]
            fn [<__register_ $cache:snake _object_cache_plugin>]() {
                $crate::cache::register::register_object_cache_plugin(
                    $name,
                    ::std::sync::Arc::new(|| {
                        ::std::boxed::Box::pin(async {
                            <$cache>::new()
                                .map(|cache| {
                                    ::std::boxed::Box::new(cache)
                                        as ::std::boxed::Box<
                                            dyn $crate::cache::traits::ObjectCache,
                                        >
                                })
                                .map_err($crate::errors::QuizRoomError::cache_connection)
                        }) as $crate::cache::register::BoxedObjectCacheFuture
                    }),
                );
            }
        }
    };
}

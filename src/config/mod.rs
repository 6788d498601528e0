//! 应用配置模块
//!
//! 配置来源优先级：config.toml < config.{APP_ENV}.toml < 环境变量。

mod r#impl;
pub mod structs;

pub use structs::*;

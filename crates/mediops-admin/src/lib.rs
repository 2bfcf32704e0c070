//! # MediOps管理模块
//!
//! 提供环境变量驱动的配置加载和日志初始化

pub mod config;
pub mod logging;

pub use config::{AppConfig, BuildInfo, DatabaseConfig};
pub use logging::init_logging;

//! # MediOps Core
//!
//! MediOps系统的核心模块，提供实体与视图数据结构、错误定义和实体存储抽象。

pub mod error;
pub mod models;
pub mod store;

pub use error::{MediOpsError, Result};
pub use models::*;
pub use store::{DemoData, EntityStore, MemoryEntityStore};

//! # MediOps数据库模块
//!
//! 提供PostgreSQL连接池、表结构初始化、只读查询，以及基于它们的 `EntityStore` 实现。

pub mod connection;
pub mod models;
pub mod queries;
pub mod store;

// 重新导出主要类型
pub use connection::DatabasePool;
pub use queries::DatabaseQueries;
pub use store::PgEntityStore;

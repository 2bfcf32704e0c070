//! 数据库连接管理

use mediops_admin::config::DatabaseConfig;
use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions};
use std::time::Duration;

/// 数据库连接池
#[derive(Debug, Clone)]
pub struct DatabasePool {
    pool: PgPool,
}

impl DatabasePool {
    /// 按配置创建连接池，首次查询时才真正建立连接
    pub fn new(config: &DatabaseConfig) -> Self {
        let options = PgConnectOptions::new()
            .host(&config.host)
            .port(config.port)
            .database(&config.name)
            .username(&config.user)
            .password(config.password());

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.connect_timeout_secs))
            .connect_lazy_with(options);

        tracing::info!(
            "Database pool configured for {}:{}/{}",
            config.host,
            config.port,
            config.name
        );

        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

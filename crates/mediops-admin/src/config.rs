//! 配置管理
//!
//! 所有配置来自进程环境变量。数据库连接参数缺一不可，缺失时启动失败，
//! 版本标签与部署颜色可选。

use config::{Config, Environment};
use mediops_core::{MediOpsError, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::fmt;

const DEFAULT_VERSION_TAG: &str = "dev";
const DEFAULT_DEPLOY_COLOR: &str = "unknown";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 5;

/// 应用完整配置
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// 数据库配置
    pub database: DatabaseConfig,
    /// 版本信息
    pub build: BuildInfo,
}

/// 数据库配置
#[derive(Clone)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub name: String,
    pub user: String,
    password: String,
    /// 最大连接数
    pub max_connections: u32,
    /// 获取连接超时（秒）
    pub connect_timeout_secs: u64,
}

impl DatabaseConfig {
    pub fn new(
        host: impl Into<String>,
        port: u16,
        name: impl Into<String>,
        user: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            host: host.into(),
            port,
            name: name.into(),
            user: user.into(),
            password: password.into(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
            connect_timeout_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
        }
    }

    pub fn with_connect_timeout(mut self, secs: u64) -> Self {
        self.connect_timeout_secs = secs;
        self
    }

    pub fn password(&self) -> &str {
        &self.password
    }
}

// 密码不进日志
impl fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("name", &self.name)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("max_connections", &self.max_connections)
            .field("connect_timeout_secs", &self.connect_timeout_secs)
            .finish()
    }
}

/// 版本信息，原样展示在 `/version` 页面
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BuildInfo {
    pub version_tag: String,
    pub deploy_color: String,
}

impl Default for BuildInfo {
    fn default() -> Self {
        Self {
            version_tag: DEFAULT_VERSION_TAG.to_string(),
            deploy_color: DEFAULT_DEPLOY_COLOR.to_string(),
        }
    }
}

impl BuildInfo {
    /// 从进程环境读取
    pub fn from_env() -> Result<Self> {
        Self::from_environment(Environment::default())
    }

    /// 从给定键值读取，键名同环境变量
    pub fn from_map(vars: HashMap<String, String>) -> Result<Self> {
        Self::from_environment(Environment::default().source(Some(vars)))
    }

    fn from_environment(env: Environment) -> Result<Self> {
        build_config(env)?
            .try_deserialize::<BuildInfo>()
            .map_err(|e| MediOpsError::Config(e.to_string()))
    }
}

/// 环境变量的扁平映射，键名为小写的变量名
#[derive(Debug, Deserialize)]
struct RawConfig {
    db_host: String,
    db_port: u16,
    db_name: String,
    db_user: String,
    db_password: String,
    db_max_connections: u32,
    db_connect_timeout_secs: u64,
    version_tag: String,
    deploy_color: String,
}

impl From<RawConfig> for AppConfig {
    fn from(raw: RawConfig) -> Self {
        let mut database = DatabaseConfig::new(
            raw.db_host,
            raw.db_port,
            raw.db_name,
            raw.db_user,
            raw.db_password,
        );
        database.max_connections = raw.db_max_connections;
        database.connect_timeout_secs = raw.db_connect_timeout_secs;

        AppConfig {
            database,
            build: BuildInfo {
                version_tag: raw.version_tag,
                deploy_color: raw.deploy_color,
            },
        }
    }
}

impl AppConfig {
    /// 从进程环境加载
    pub fn from_env() -> Result<Self> {
        Self::from_environment(Environment::default())
    }

    /// 从给定键值加载，键名同环境变量
    pub fn from_map(vars: HashMap<String, String>) -> Result<Self> {
        Self::from_environment(Environment::default().source(Some(vars)))
    }

    fn from_environment(env: Environment) -> Result<Self> {
        let raw = build_config(env)?
            .try_deserialize::<RawConfig>()
            .map_err(|e| MediOpsError::Config(e.to_string()))?;

        // 空值已按缺失处理，这里再拦截只含空白的值
        let required = [
            ("DB_HOST", &raw.db_host),
            ("DB_NAME", &raw.db_name),
            ("DB_USER", &raw.db_user),
            ("DB_PASSWORD", &raw.db_password),
        ];
        if let Some((key, _)) = required.iter().find(|(_, v)| v.trim().is_empty()) {
            return Err(MediOpsError::Config(format!("{} must not be blank", key)));
        }

        tracing::debug!("Loaded configuration for database {}", raw.db_name);
        Ok(AppConfig::from(raw))
    }
}

fn build_config(env: Environment) -> Result<Config> {
    Config::builder()
        .set_default("version_tag", DEFAULT_VERSION_TAG)
        .and_then(|b| b.set_default("deploy_color", DEFAULT_DEPLOY_COLOR))
        .and_then(|b| b.set_default("db_max_connections", DEFAULT_MAX_CONNECTIONS as i64))
        .and_then(|b| b.set_default("db_connect_timeout_secs", DEFAULT_CONNECT_TIMEOUT_SECS as i64))
        .map_err(|e| MediOpsError::Config(e.to_string()))?
        .add_source(env.ignore_empty(true))
        .build()
        .map_err(|e| MediOpsError::Config(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn database_vars() -> Vec<(&'static str, &'static str)> {
        vec![
            ("DB_HOST", "db.internal"),
            ("DB_PORT", "5433"),
            ("DB_NAME", "mediops"),
            ("DB_USER", "dashboard"),
            ("DB_PASSWORD", "s3cret"),
        ]
    }

    #[test]
    fn test_load_full_config() {
        let mut pairs = database_vars();
        pairs.push(("VERSION_TAG", "v2.3.1"));
        pairs.push(("DEPLOY_COLOR", "blue"));

        let config = AppConfig::from_map(vars(&pairs)).unwrap();
        assert_eq!(config.database.host, "db.internal");
        assert_eq!(config.database.port, 5433);
        assert_eq!(config.database.user, "dashboard");
        assert_eq!(config.database.password(), "s3cret");
        assert_eq!(config.build.version_tag, "v2.3.1");
        assert_eq!(config.build.deploy_color, "blue");
    }

    #[test]
    fn test_optional_values_default() {
        let config = AppConfig::from_map(vars(&database_vars())).unwrap();
        assert_eq!(config.build, BuildInfo::default());
        assert_eq!(config.build.version_tag, "dev");
        assert_eq!(config.build.deploy_color, "unknown");
        assert_eq!(config.database.max_connections, 5);
    }

    #[test]
    fn test_missing_database_value_fails() {
        let pairs: Vec<_> = database_vars()
            .into_iter()
            .filter(|(k, _)| *k != "DB_PASSWORD")
            .collect();

        let err = AppConfig::from_map(vars(&pairs)).unwrap_err();
        assert!(matches!(err, MediOpsError::Config(_)));
        assert!(err.to_string().contains("db_password"));
    }

    #[test]
    fn test_empty_database_value_counts_as_missing() {
        for key in ["DB_HOST", "DB_PORT", "DB_NAME", "DB_USER", "DB_PASSWORD"] {
            let mut pairs = database_vars();
            pairs.retain(|(k, _)| *k != key);
            pairs.push((key, ""));

            let err = AppConfig::from_map(vars(&pairs)).unwrap_err();
            assert!(matches!(err, MediOpsError::Config(_)), "{key}");
            assert!(err.to_string().contains(&key.to_lowercase()), "{key}: {err}");
        }
    }

    #[test]
    fn test_blank_database_value_fails() {
        for key in ["DB_HOST", "DB_NAME", "DB_USER", "DB_PASSWORD"] {
            let mut pairs = database_vars();
            pairs.retain(|(k, _)| *k != key);
            pairs.push((key, "   "));

            let err = AppConfig::from_map(vars(&pairs)).unwrap_err();
            assert!(err.to_string().contains(key), "{key}: {err}");
        }
    }

    #[test]
    fn test_empty_optional_value_uses_default() {
        let mut pairs = database_vars();
        pairs.push(("VERSION_TAG", ""));

        let config = AppConfig::from_map(vars(&pairs)).unwrap();
        assert_eq!(config.build.version_tag, "dev");
    }

    #[test]
    fn test_invalid_port_fails() {
        let mut pairs = database_vars();
        pairs.retain(|(k, _)| *k != "DB_PORT");
        pairs.push(("DB_PORT", "not-a-port"));

        assert!(matches!(
            AppConfig::from_map(vars(&pairs)),
            Err(MediOpsError::Config(_))
        ));
    }

    #[test]
    fn test_build_info_without_database() {
        let info = BuildInfo::from_map(vars(&[("DEPLOY_COLOR", "green")])).unwrap();
        assert_eq!(info.version_tag, "dev");
        assert_eq!(info.deploy_color, "green");
    }

    #[test]
    fn test_debug_redacts_password() {
        let config = DatabaseConfig::new("localhost", 5432, "mediops", "app", "hunter2");
        let printed = format!("{:?}", config);
        assert!(!printed.contains("hunter2"));
        assert!(printed.contains("<redacted>"));
    }
}

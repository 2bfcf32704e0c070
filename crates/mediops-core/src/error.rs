//! 错误定义模块

use thiserror::Error;

/// MediOps系统统一错误类型
#[derive(Error, Debug)]
pub enum MediOpsError {
    #[error("配置错误: {0}")]
    Config(String),

    #[error("数据库初始化错误: {0}")]
    SchemaInit(String),

    #[error("数据库错误: {0}")]
    Database(String),

    #[error("IO错误: {0}")]
    Io(#[from] std::io::Error),
}

impl MediOpsError {
    /// 是否为请求期间的数据访问错误
    pub fn is_data_access(&self) -> bool {
        matches!(self, MediOpsError::Database(_))
    }
}

/// MediOps系统统一结果类型
pub type Result<T> = std::result::Result<T, MediOpsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_database_errors_are_data_access() {
        assert!(MediOpsError::Database("timeout".into()).is_data_access());
        assert!(!MediOpsError::Config("DB_HOST".into()).is_data_access());
        assert!(!MediOpsError::SchemaInit("denied".into()).is_data_access());

        let io: MediOpsError = std::io::Error::new(std::io::ErrorKind::AddrInUse, "in use").into();
        assert!(matches!(io, MediOpsError::Io(_)));
        assert!(!io.is_data_access());
    }
}

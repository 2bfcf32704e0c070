//! 基于PostgreSQL的实体存储

use async_trait::async_trait;
use mediops_core::{Appointment, Doctor, EntityStore, Kpi, Patient, Result};

use crate::connection::DatabasePool;
use crate::queries::DatabaseQueries;

/// PostgreSQL实体存储
#[derive(Debug, Clone)]
pub struct PgEntityStore {
    pool: DatabasePool,
}

impl PgEntityStore {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }

    pub fn queries(&self) -> DatabaseQueries<'_> {
        DatabaseQueries::new(&self.pool)
    }
}

#[async_trait]
impl EntityStore for PgEntityStore {
    async fn list_patients(&self) -> Result<Vec<Patient>> {
        self.queries().list_patients().await
    }

    async fn list_appointments(&self) -> Result<Vec<Appointment>> {
        self.queries().list_appointments().await
    }

    async fn list_doctors(&self) -> Result<Vec<Doctor>> {
        self.queries().list_doctors().await
    }

    async fn current_kpi(&self) -> Result<Option<Kpi>> {
        self.queries().get_current_kpi().await
    }

    async fn ping(&self) -> Result<()> {
        self.queries().ping().await
    }

    async fn find_doctor(&self, id: i32) -> Result<Option<Doctor>> {
        self.queries().get_doctor_by_id(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mediops_admin::DatabaseConfig;
    use mediops_core::MediOpsError;

    fn unreachable_store() -> PgEntityStore {
        // 端口1上没有PostgreSQL，连接会被拒绝
        let config = DatabaseConfig::new("127.0.0.1", 1, "mediops", "mediops", "mediops")
            .with_connect_timeout(1);
        PgEntityStore::new(DatabasePool::new(&config))
    }

    #[tokio::test]
    async fn test_ping_fails_on_unreachable_database() {
        let store = unreachable_store();
        let err = store.ping().await.unwrap_err();
        assert!(matches!(err, MediOpsError::Database(_)));
    }

    #[tokio::test]
    async fn test_queries_surface_data_access_errors() {
        let store = unreachable_store();
        assert!(store.list_patients().await.unwrap_err().is_data_access());
        assert!(store.current_kpi().await.unwrap_err().is_data_access());
    }

    #[tokio::test]
    async fn test_schema_init_failure_is_reported() {
        let store = unreachable_store();
        let err = store.queries().create_tables().await.unwrap_err();
        assert!(matches!(err, MediOpsError::SchemaInit(_)));
    }
}

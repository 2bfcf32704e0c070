//! 实体存储抽象
//!
//! 视图层只依赖 [`EntityStore`]，生产环境使用PostgreSQL实现，
//! 测试与演示模式使用 [`MemoryEntityStore`]。

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::error::{MediOpsError, Result};
use crate::models::*;

/// 只读实体存储接口
#[async_trait]
pub trait EntityStore: Send + Sync {
    /// 全部患者，按插入顺序
    async fn list_patients(&self) -> Result<Vec<Patient>>;

    /// 全部预约
    async fn list_appointments(&self) -> Result<Vec<Appointment>>;

    /// 全部医生
    async fn list_doctors(&self) -> Result<Vec<Doctor>>;

    /// 当前KPI快照，存在多行时取第一行
    async fn current_kpi(&self) -> Result<Option<Kpi>>;

    /// 存活检查
    async fn ping(&self) -> Result<()>;

    /// 根据预约中的医生引用查找医生
    async fn find_doctor(&self, id: i32) -> Result<Option<Doctor>> {
        Ok(self.list_doctors().await?.into_iter().find(|d| d.id == id))
    }
}

/// 内存实体存储
///
/// 构造后不可变，可安全地在请求间共享。
#[derive(Debug, Clone, Default)]
pub struct MemoryEntityStore {
    patients: Vec<Patient>,
    doctors: Vec<Doctor>,
    appointments: Vec<Appointment>,
    kpi: Vec<Kpi>,
    failure: Option<String>,
}

impl MemoryEntityStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 所有调用都返回数据库错误的存储
    pub fn unreachable(reason: impl Into<String>) -> Self {
        Self {
            failure: Some(reason.into()),
            ..Self::default()
        }
    }

    pub fn with_patients(mut self, patients: Vec<Patient>) -> Self {
        self.patients = patients;
        self
    }

    pub fn with_doctors(mut self, doctors: Vec<Doctor>) -> Self {
        self.doctors = doctors;
        self
    }

    pub fn with_appointments(mut self, appointments: Vec<Appointment>) -> Self {
        self.appointments = appointments;
        self
    }

    pub fn with_kpi(mut self, kpi: Kpi) -> Self {
        self.kpi.push(kpi);
        self
    }

    /// 演示数据集
    pub fn demo() -> Self {
        let data = DemoData::new();
        Self::new()
            .with_patients(data.patients)
            .with_doctors(data.doctors)
            .with_appointments(data.appointments)
            .with_kpi(data.kpi)
    }

    fn check(&self) -> Result<()> {
        match &self.failure {
            Some(reason) => Err(MediOpsError::Database(reason.clone())),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl EntityStore for MemoryEntityStore {
    async fn list_patients(&self) -> Result<Vec<Patient>> {
        self.check()?;
        Ok(self.patients.clone())
    }

    async fn list_appointments(&self) -> Result<Vec<Appointment>> {
        self.check()?;
        Ok(self.appointments.clone())
    }

    async fn list_doctors(&self) -> Result<Vec<Doctor>> {
        self.check()?;
        Ok(self.doctors.clone())
    }

    async fn current_kpi(&self) -> Result<Option<Kpi>> {
        self.check()?;
        Ok(self.kpi.first().cloned())
    }

    async fn ping(&self) -> Result<()> {
        self.check()
    }
}

/// 演示数据，供内存模式和数据库初始填充共用
#[derive(Debug, Clone)]
pub struct DemoData {
    pub patients: Vec<Patient>,
    pub doctors: Vec<Doctor>,
    pub appointments: Vec<Appointment>,
    pub kpi: Kpi,
}

impl DemoData {
    pub fn new() -> Self {
        let patient = |id, name: &str, age, diagnosis: &str, status: PatientStatus| Patient {
            id,
            name: name.to_string(),
            age,
            diagnosis: diagnosis.to_string(),
            status,
        };
        let doctor = |id, name: &str, specialization: &str| Doctor {
            id,
            name: name.to_string(),
            specialization: specialization.to_string(),
        };
        // 固定日期，保证演示输出稳定
        let day = NaiveDate::from_ymd_opt(2024, 5, 20).unwrap_or_default();
        let appointment = |id, patient_id, doctor_id, status| Appointment {
            id,
            patient_id,
            doctor_id,
            date: day,
            status,
        };

        Self {
            patients: vec![
                patient(1, "John Doe", 45, "Hypertension", PatientStatus::Admitted),
                patient(2, "Jane Smith", 56, "Diabetes", PatientStatus::Discharged),
                patient(3, "Robert Brown", 35, "Back Pain", PatientStatus::Admitted),
                patient(4, "Mary Johnson", 62, "Flu", PatientStatus::Discharged),
            ],
            doctors: vec![
                doctor(1, "Dr. Williams", "Cardiology"),
                doctor(2, "Dr. Johnson", "Endocrinology"),
                doctor(3, "Dr. Davis", "Orthopedics"),
            ],
            appointments: vec![
                appointment(1, 1, 1, AppointmentStatus::Completed),
                appointment(2, 2, 2, AppointmentStatus::Pending),
                appointment(3, 3, 3, AppointmentStatus::Pending),
            ],
            kpi: Kpi {
                id: 1,
                total_patients: 1250,
                active_doctors: 80,
                todays_appointments: 45,
                bed_occupancy: 85,
            },
        }
    }
}

impl Default for DemoData {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_empty_store_has_no_kpi() {
        let store = MemoryEntityStore::new();
        assert!(store.current_kpi().await.unwrap().is_none());
        assert!(store.list_patients().await.unwrap().is_empty());
        assert!(store.ping().await.is_ok());
    }

    #[tokio::test]
    async fn test_first_kpi_row_wins() {
        let row = |id, total| Kpi {
            id,
            total_patients: total,
            active_doctors: 0,
            todays_appointments: 0,
            bed_occupancy: 0,
        };
        let store = MemoryEntityStore::new().with_kpi(row(1, 10)).with_kpi(row(2, 20));
        assert_eq!(store.current_kpi().await.unwrap().unwrap().total_patients, 10);
    }

    #[tokio::test]
    async fn test_unreachable_store_fails_every_call() {
        let store = MemoryEntityStore::unreachable("connection refused");

        let err = store.list_patients().await.unwrap_err();
        assert!(err.is_data_access());
        assert!(err.to_string().contains("connection refused"));
        assert!(store.current_kpi().await.is_err());
        assert!(store.ping().await.is_err());
        assert!(store.find_doctor(1).await.is_err());
    }

    #[tokio::test]
    async fn test_find_doctor_by_reference() {
        let store = MemoryEntityStore::demo();
        let doctor = store.find_doctor(2).await.unwrap().unwrap();
        assert_eq!(doctor.name, "Dr. Johnson");
        assert!(store.find_doctor(99).await.unwrap().is_none());
    }

    #[test]
    fn test_demo_data_matches_seed_set() {
        let data = DemoData::new();
        assert_eq!(data.patients.len(), 4);
        assert_eq!(data.patients[0].name, "John Doe");
        assert_eq!(data.kpi.total_patients, 1250);
    }
}

//! 视图组装
//!
//! 从实体存储读取数据并整理成页面或JSON接口需要的结构。
//! 存储错误原样向上传递，唯一的兜底是缺少KPI行时返回全零。

use mediops_core::{
    Appointment, Doctor, EntityStore, HealthStatus, KpiView, Patient, PatientOutcomes,
    PatientSummary, Result,
};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// 仪表盘页面数据
#[derive(Debug, Clone)]
pub struct DashboardView {
    pub patients: Vec<Patient>,
    pub appointments: Vec<Appointment>,
    pub kpi: KpiView,
    pub doctors: DoctorDirectory,
}

/// 医生引用到医生的查找表
#[derive(Debug, Clone, Default)]
pub struct DoctorDirectory {
    doctors: HashMap<i32, Doctor>,
}

impl DoctorDirectory {
    pub const UNKNOWN: &'static str = "Unknown";

    pub fn new(doctors: Vec<Doctor>) -> Self {
        Self {
            doctors: doctors.into_iter().map(|d| (d.id, d)).collect(),
        }
    }

    pub fn get(&self, id: i32) -> Option<&Doctor> {
        self.doctors.get(&id)
    }

    pub fn name_of(&self, id: i32) -> &str {
        self.get(id).map(|d| d.name.as_str()).unwrap_or(Self::UNKNOWN)
    }

    pub fn len(&self) -> usize {
        self.doctors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.doctors.is_empty()
    }
}

/// 视图组装服务
#[derive(Clone)]
pub struct DashboardService {
    store: Arc<dyn EntityStore>,
}

impl DashboardService {
    pub fn new(store: Arc<dyn EntityStore>) -> Self {
        Self { store }
    }

    /// 仪表盘：全部患者、全部预约和当前KPI
    pub async fn build_dashboard_view(&self) -> Result<DashboardView> {
        let patients = self.store.list_patients().await?;
        let appointments = self.store.list_appointments().await?;
        let kpi = KpiView::from_current(self.store.current_kpi().await?);
        let doctors = DoctorDirectory::new(self.store.list_doctors().await?);

        debug!(
            "Dashboard view: {} patients, {} appointments",
            patients.len(),
            appointments.len()
        );

        Ok(DashboardView {
            patients,
            appointments,
            kpi,
            doctors,
        })
    }

    /// 患者接口，不含内部ID，顺序与存储一致
    pub async fn build_patients_api_view(&self) -> Result<Vec<PatientSummary>> {
        let patients = self.store.list_patients().await?;
        Ok(patients.into_iter().map(PatientSummary::from).collect())
    }

    /// KPI接口
    pub async fn build_kpi_api_view(&self) -> Result<KpiView> {
        Ok(KpiView::from_current(self.store.current_kpi().await?))
    }

    /// 患者结局指标，固定数据，不访问存储
    pub fn build_patient_outcomes_view(&self) -> PatientOutcomes {
        PatientOutcomes::fixed()
    }

    pub async fn check_health(&self) -> HealthStatus {
        match self.store.ping().await {
            Ok(()) => HealthStatus::Healthy,
            Err(e) => HealthStatus::Unhealthy(e.to_string()),
        }
    }

    pub async fn list_patients(&self) -> Result<Vec<Patient>> {
        self.store.list_patients().await
    }

    pub async fn list_doctors(&self) -> Result<Vec<Doctor>> {
        self.store.list_doctors().await
    }

    pub async fn list_appointments(&self) -> Result<Vec<Appointment>> {
        self.store.list_appointments().await
    }

    /// 预约及其引用的医生，医生不存在时为 `None`
    ///
    /// 医生只查询一次，引用通过 [`DoctorDirectory`] 解析。
    pub async fn list_appointments_with_doctors(
        &self,
    ) -> Result<Vec<(Appointment, Option<Doctor>)>> {
        let appointments = self.store.list_appointments().await?;
        let doctors = DoctorDirectory::new(self.store.list_doctors().await?);

        Ok(appointments
            .into_iter()
            .map(|appointment| {
                let doctor = doctors.get(appointment.doctor_id).cloned();
                (appointment, doctor)
            })
            .collect())
    }
}

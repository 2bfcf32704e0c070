//! 核心数据模型定义

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 患者信息
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Patient {
    pub id: i32,
    pub name: String,
    pub age: i32,
    pub diagnosis: String,
    pub status: PatientStatus,
}

/// 住院状态，存储为字符串
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum PatientStatus {
    Admitted,   // 在院
    Discharged, // 已出院
    Other(String),
}

impl PatientStatus {
    pub fn as_str(&self) -> &str {
        match self {
            PatientStatus::Admitted => "Admitted",
            PatientStatus::Discharged => "Discharged",
            PatientStatus::Other(s) => s,
        }
    }
}

impl From<String> for PatientStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "Admitted" => PatientStatus::Admitted,
            "Discharged" => PatientStatus::Discharged,
            _ => PatientStatus::Other(s),
        }
    }
}

impl From<&str> for PatientStatus {
    fn from(s: &str) -> Self {
        PatientStatus::from(s.to_string())
    }
}

impl From<PatientStatus> for String {
    fn from(status: PatientStatus) -> Self {
        match status {
            PatientStatus::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for PatientStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 医生信息
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Doctor {
    pub id: i32,
    pub name: String,
    pub specialization: String,
}

/// 预约信息
///
/// `patient_id` 与 `doctor_id` 只是整数引用，不做外键约束。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: i32,
    pub patient_id: i32,
    pub doctor_id: i32,
    pub date: NaiveDate,
    pub status: AppointmentStatus,
}

/// 预约状态
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum AppointmentStatus {
    Completed, // 已完成
    Pending,   // 待就诊
    Cancelled, // 已取消
    Other(String),
}

impl AppointmentStatus {
    pub fn as_str(&self) -> &str {
        match self {
            AppointmentStatus::Completed => "Completed",
            AppointmentStatus::Pending => "Pending",
            AppointmentStatus::Cancelled => "Cancelled",
            AppointmentStatus::Other(s) => s,
        }
    }
}

impl From<String> for AppointmentStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "Completed" => AppointmentStatus::Completed,
            "Pending" => AppointmentStatus::Pending,
            "Cancelled" => AppointmentStatus::Cancelled,
            _ => AppointmentStatus::Other(s),
        }
    }
}

impl From<&str> for AppointmentStatus {
    fn from(s: &str) -> Self {
        AppointmentStatus::from(s.to_string())
    }
}

impl From<AppointmentStatus> for String {
    fn from(status: AppointmentStatus) -> Self {
        match status {
            AppointmentStatus::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// KPI快照行
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Kpi {
    pub id: i32,
    pub total_patients: i32,
    pub active_doctors: i32,
    pub todays_appointments: i32,
    pub bed_occupancy: i32, // 百分比
}

/// KPI视图，对外不暴露行ID
///
/// 没有KPI行时所有字段取 `0`，见 [`KpiView::from_current`]。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KpiView {
    pub total_patients: i32,
    pub active_doctors: i32,
    pub todays_appointments: i32,
    pub bed_occupancy: i32,
}

impl KpiView {
    pub fn from_current(kpi: Option<Kpi>) -> Self {
        kpi.map(KpiView::from).unwrap_or_default()
    }
}

impl From<Kpi> for KpiView {
    fn from(kpi: Kpi) -> Self {
        KpiView {
            total_patients: kpi.total_patients,
            active_doctors: kpi.active_doctors,
            todays_appointments: kpi.todays_appointments,
            bed_occupancy: kpi.bed_occupancy,
        }
    }
}

/// 患者API条目
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientSummary {
    pub name: String,
    pub age: i32,
    pub diagnosis: String,
    pub status: PatientStatus,
}

impl From<Patient> for PatientSummary {
    fn from(patient: Patient) -> Self {
        PatientSummary {
            name: patient.name,
            age: patient.age,
            diagnosis: patient.diagnosis,
            status: patient.status,
        }
    }
}

/// 单项结局指标
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutcomeMetric {
    pub value: &'static str,
    pub change: f64, // 相对上期的百分比变化
    pub prev: &'static str,
}

/// 患者结局指标，固定数据
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PatientOutcomes {
    pub avg_stay: OutcomeMetric,
    pub readmission: OutcomeMetric,
    pub satisfaction: OutcomeMetric,
    pub mortality: OutcomeMetric,
}

impl PatientOutcomes {
    pub const fn fixed() -> Self {
        PatientOutcomes {
            avg_stay: OutcomeMetric { value: "4.5 days", change: -2.17, prev: "4.6 days" },
            readmission: OutcomeMetric { value: "12%", change: -7.69, prev: "13%" },
            satisfaction: OutcomeMetric { value: "88", change: 3.53, prev: "85" },
            mortality: OutcomeMetric { value: "2.8%", change: -3.45, prev: "2.9%" },
        }
    }

    /// 按展示顺序返回 (名称, 指标)
    pub fn entries(&self) -> [(&'static str, &OutcomeMetric); 4] {
        [
            ("Average Length of Stay", &self.avg_stay),
            ("Readmission Rate", &self.readmission),
            ("Patient Satisfaction", &self.satisfaction),
            ("Mortality Rate", &self.mortality),
        ]
    }
}

/// 健康检查结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    Healthy,
    Unhealthy(String),
}

impl HealthStatus {
    pub fn is_healthy(&self) -> bool {
        matches!(self, HealthStatus::Healthy)
    }
}

//! 数据库模型

use chrono::NaiveDate;
use mediops_core::models::*;
use sqlx::FromRow;

// 数据库表模型 - 使用FromRow trait用于SQL查询

/// 数据库患者表
#[derive(Debug, FromRow)]
pub struct DbPatient {
    pub id: i32,
    pub name: String,
    pub age: i32,
    pub diagnosis: String,
    pub status: String, // 存储为字符串，转换为PatientStatus枚举
}

impl From<DbPatient> for Patient {
    fn from(db_patient: DbPatient) -> Self {
        Patient {
            id: db_patient.id,
            name: db_patient.name,
            age: db_patient.age,
            diagnosis: db_patient.diagnosis,
            status: PatientStatus::from(db_patient.status),
        }
    }
}

/// 数据库医生表
#[derive(Debug, FromRow)]
pub struct DbDoctor {
    pub id: i32,
    pub name: String,
    pub specialization: String,
}

impl From<DbDoctor> for Doctor {
    fn from(db_doctor: DbDoctor) -> Self {
        Doctor {
            id: db_doctor.id,
            name: db_doctor.name,
            specialization: db_doctor.specialization,
        }
    }
}

/// 数据库预约表
#[derive(Debug, FromRow)]
pub struct DbAppointment {
    pub id: i32,
    pub patient_id: i32,
    pub doctor_id: i32,
    pub date: NaiveDate,
    pub status: String,
}

impl From<DbAppointment> for Appointment {
    fn from(db_appointment: DbAppointment) -> Self {
        Appointment {
            id: db_appointment.id,
            patient_id: db_appointment.patient_id,
            doctor_id: db_appointment.doctor_id,
            date: db_appointment.date,
            status: AppointmentStatus::from(db_appointment.status),
        }
    }
}

/// 数据库KPI表
#[derive(Debug, FromRow)]
pub struct DbKpi {
    pub id: i32,
    pub total_patients: i32,
    pub active_doctors: i32,
    pub todays_appointments: i32,
    pub bed_occupancy: i32,
}

impl From<DbKpi> for Kpi {
    fn from(db_kpi: DbKpi) -> Self {
        Kpi {
            id: db_kpi.id,
            total_patients: db_kpi.total_patients,
            active_doctors: db_kpi.active_doctors,
            todays_appointments: db_kpi.todays_appointments,
            bed_occupancy: db_kpi.bed_occupancy,
        }
    }
}

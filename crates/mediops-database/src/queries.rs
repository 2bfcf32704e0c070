//! 数据库查询操作

use crate::connection::DatabasePool;
use crate::models::*;
use mediops_core::{Appointment, DemoData, Doctor, Kpi, MediOpsError, Patient, Result};
use sqlx::Row;
use std::collections::HashMap;

fn db_error(e: sqlx::Error) -> MediOpsError {
    MediOpsError::Database(e.to_string())
}

/// 演示ID映射为数据库生成的ID，找不到时保持原值
fn remap(ids: &HashMap<i32, i32>, demo_id: i32) -> i32 {
    ids.get(&demo_id).copied().unwrap_or(demo_id)
}

/// 数据库查询操作接口
pub struct DatabaseQueries<'a> {
    pool: &'a DatabasePool,
}

impl<'a> DatabaseQueries<'a> {
    pub fn new(pool: &'a DatabasePool) -> Self {
        Self { pool }
    }

    /// 创建数据库表（已存在则跳过）
    pub async fn create_tables(&self) -> Result<()> {
        let pool = self.pool.pool();

        let tables = [
            r#"
            CREATE TABLE IF NOT EXISTS patients (
                id SERIAL PRIMARY KEY,
                name VARCHAR(255) NOT NULL,
                age INTEGER NOT NULL,
                diagnosis VARCHAR(255) NOT NULL,
                status VARCHAR(32) NOT NULL
            )
            "#,
            r#"
            CREATE TABLE IF NOT EXISTS doctors (
                id SERIAL PRIMARY KEY,
                name VARCHAR(255) NOT NULL,
                specialization VARCHAR(255) NOT NULL
            )
            "#,
            // 引用字段不加外键约束
            r#"
            CREATE TABLE IF NOT EXISTS appointments (
                id SERIAL PRIMARY KEY,
                patient_id INTEGER NOT NULL,
                doctor_id INTEGER NOT NULL,
                date DATE NOT NULL,
                status VARCHAR(32) NOT NULL
            )
            "#,
            r#"
            CREATE TABLE IF NOT EXISTS kpi (
                id SERIAL PRIMARY KEY,
                total_patients INTEGER NOT NULL DEFAULT 0,
                active_doctors INTEGER NOT NULL DEFAULT 0,
                todays_appointments INTEGER NOT NULL DEFAULT 0,
                bed_occupancy INTEGER NOT NULL DEFAULT 0
            )
            "#,
        ];

        for table_sql in tables {
            sqlx::query(table_sql)
                .execute(pool)
                .await
                .map_err(|e| MediOpsError::SchemaInit(e.to_string()))?;
        }

        tracing::info!("Database tables created successfully");
        Ok(())
    }

    /// 数据库为空时写入演示数据，返回是否写入
    ///
    /// 全部写入在同一事务内完成，中途失败不会留下部分数据。
    pub async fn seed_demo_data(&self) -> Result<bool> {
        let mut tx = self.pool.pool().begin().await.map_err(db_error)?;

        let existing: i64 = sqlx::query("SELECT COUNT(*) AS count FROM patients")
            .fetch_one(&mut *tx)
            .await
            .map(|row| row.get("count"))
            .map_err(db_error)?;

        if existing > 0 {
            tracing::info!("Skipping demo seed, {} patients already present", existing);
            return Ok(false);
        }

        let data = DemoData::new();

        let mut patient_ids = HashMap::new();
        for patient in &data.patients {
            let id: i32 = sqlx::query(r#"
                INSERT INTO patients (name, age, diagnosis, status)
                VALUES ($1, $2, $3, $4)
                RETURNING id
            "#)
            .bind(&patient.name)
            .bind(patient.age)
            .bind(&patient.diagnosis)
            .bind(patient.status.as_str())
            .fetch_one(&mut *tx)
            .await
            .map(|row| row.get("id"))
            .map_err(db_error)?;
            patient_ids.insert(patient.id, id);
        }

        let mut doctor_ids = HashMap::new();
        for doctor in &data.doctors {
            let id: i32 = sqlx::query(
                "INSERT INTO doctors (name, specialization) VALUES ($1, $2) RETURNING id",
            )
            .bind(&doctor.name)
            .bind(&doctor.specialization)
            .fetch_one(&mut *tx)
            .await
            .map(|row| row.get("id"))
            .map_err(db_error)?;
            doctor_ids.insert(doctor.id, id);
        }

        // 演示预约引用的是演示ID，需要映射为实际生成的ID
        for appointment in &data.appointments {
            let patient_id = remap(&patient_ids, appointment.patient_id);
            let doctor_id = remap(&doctor_ids, appointment.doctor_id);

            sqlx::query(r#"
                INSERT INTO appointments (patient_id, doctor_id, date, status)
                VALUES ($1, $2, $3, $4)
            "#)
            .bind(patient_id)
            .bind(doctor_id)
            .bind(appointment.date)
            .bind(appointment.status.as_str())
            .execute(&mut *tx)
            .await
            .map_err(db_error)?;
        }

        sqlx::query(r#"
            INSERT INTO kpi (total_patients, active_doctors, todays_appointments, bed_occupancy)
            VALUES ($1, $2, $3, $4)
        "#)
        .bind(data.kpi.total_patients)
        .bind(data.kpi.active_doctors)
        .bind(data.kpi.todays_appointments)
        .bind(data.kpi.bed_occupancy)
        .execute(&mut *tx)
        .await
        .map_err(db_error)?;

        tx.commit().await.map_err(db_error)?;

        tracing::info!(
            "Seeded demo data: {} patients, {} doctors, {} appointments",
            data.patients.len(),
            data.doctors.len(),
            data.appointments.len()
        );
        Ok(true)
    }

    // ========== 患者相关操作 ==========

    /// 获取全部患者
    pub async fn list_patients(&self) -> Result<Vec<Patient>> {
        let results = sqlx::query_as::<_, DbPatient>(
            "SELECT id, name, age, diagnosis, status FROM patients ORDER BY id"
        )
        .fetch_all(self.pool.pool())
        .await
        .map_err(db_error)?;

        Ok(results.into_iter().map(Patient::from).collect())
    }

    // ========== 医生相关操作 ==========

    /// 获取全部医生
    pub async fn list_doctors(&self) -> Result<Vec<Doctor>> {
        let results = sqlx::query_as::<_, DbDoctor>(
            "SELECT id, name, specialization FROM doctors ORDER BY id"
        )
        .fetch_all(self.pool.pool())
        .await
        .map_err(db_error)?;

        Ok(results.into_iter().map(Doctor::from).collect())
    }

    /// 根据ID查找医生
    pub async fn get_doctor_by_id(&self, id: i32) -> Result<Option<Doctor>> {
        let result = sqlx::query_as::<_, DbDoctor>(
            "SELECT id, name, specialization FROM doctors WHERE id = $1"
        )
        .bind(id)
        .fetch_optional(self.pool.pool())
        .await
        .map_err(db_error)?;

        Ok(result.map(Doctor::from))
    }

    // ========== 预约相关操作 ==========

    /// 获取全部预约
    pub async fn list_appointments(&self) -> Result<Vec<Appointment>> {
        let results = sqlx::query_as::<_, DbAppointment>(
            "SELECT id, patient_id, doctor_id, date, status FROM appointments ORDER BY id"
        )
        .fetch_all(self.pool.pool())
        .await
        .map_err(db_error)?;

        Ok(results.into_iter().map(Appointment::from).collect())
    }

    // ========== KPI ==========

    /// 获取当前KPI快照（取ID最小的一行）
    pub async fn get_current_kpi(&self) -> Result<Option<Kpi>> {
        let result = sqlx::query_as::<_, DbKpi>(r#"
            SELECT id, total_patients, active_doctors, todays_appointments, bed_occupancy
            FROM kpi ORDER BY id LIMIT 1
        "#)
        .fetch_optional(self.pool.pool())
        .await
        .map_err(db_error)?;

        Ok(result.map(Kpi::from))
    }

    /// 存活检查
    pub async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1")
            .execute(self.pool.pool())
            .await
            .map_err(db_error)?;
        Ok(())
    }
}

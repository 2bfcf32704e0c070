//! HTTP处理器
//!
//! 处理器只调用视图组装并把结果映射成响应。

use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Json, Response},
};
use mediops_core::{HealthStatus, KpiView, MediOpsError, PatientSummary};
use tracing::{error, warn};

use crate::pages;
use crate::server::AppState;

/// 错误响应，正文为纯文本的错误信息
#[derive(Debug)]
pub struct AppError(MediOpsError);

impl From<MediOpsError> for AppError {
    fn from(err: MediOpsError) -> Self {
        AppError(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let message = self.0.to_string();
        error!("Request failed: {}", message);
        (StatusCode::INTERNAL_SERVER_ERROR, message).into_response()
    }
}

type HandlerResult<T> = std::result::Result<T, AppError>;

/// 首页
pub async fn landing() -> Html<String> {
    Html(pages::landing_page())
}

/// 仪表盘
pub async fn dashboard(State(state): State<AppState>) -> HandlerResult<Html<String>> {
    let view = state.service.build_dashboard_view().await?;
    Ok(Html(pages::dashboard_page(&view)))
}

pub async fn patients(State(state): State<AppState>) -> HandlerResult<Html<String>> {
    let patients = state.service.list_patients().await?;
    Ok(Html(pages::patients_page(&patients)))
}

pub async fn doctors(State(state): State<AppState>) -> HandlerResult<Html<String>> {
    let doctors = state.service.list_doctors().await?;
    Ok(Html(pages::doctors_page(&doctors)))
}

pub async fn appointments(State(state): State<AppState>) -> HandlerResult<Html<String>> {
    let rows = state.service.list_appointments_with_doctors().await?;
    Ok(Html(pages::appointments_page(&rows)))
}

/// 患者结局指标，固定数据
pub async fn patient_outcomes(State(state): State<AppState>) -> Html<String> {
    let outcomes = state.service.build_patient_outcomes_view();
    Html(pages::patient_outcomes_page(&outcomes))
}

pub async fn settings() -> Html<String> {
    Html(pages::settings_page())
}

pub async fn version(State(state): State<AppState>) -> Html<String> {
    Html(pages::version_page(&state.build))
}

/// 患者接口
pub async fn api_patients(State(state): State<AppState>) -> HandlerResult<Json<Vec<PatientSummary>>> {
    Ok(Json(state.service.build_patients_api_view().await?))
}

/// KPI接口
pub async fn api_kpi(State(state): State<AppState>) -> HandlerResult<Json<KpiView>> {
    Ok(Json(state.service.build_kpi_api_view().await?))
}

/// 健康检查
pub async fn health(State(state): State<AppState>) -> Response {
    match state.service.check_health().await {
        HealthStatus::Healthy => (StatusCode::OK, "OK").into_response(),
        HealthStatus::Unhealthy(reason) => {
            warn!("Health check failed: {}", reason);
            (StatusCode::INTERNAL_SERVER_ERROR, reason).into_response()
        }
    }
}

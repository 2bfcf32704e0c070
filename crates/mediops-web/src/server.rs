//! Web服务器

use axum::{routing::get, Router};
use mediops_admin::BuildInfo;
use mediops_core::{EntityStore, Result};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;

use crate::handlers;
use crate::views::DashboardService;

/// 路由共享状态
#[derive(Clone)]
pub struct AppState {
    pub service: DashboardService,
    pub build: Arc<BuildInfo>,
}

impl AppState {
    pub fn new(store: Arc<dyn EntityStore>, build: BuildInfo) -> Self {
        Self {
            service: DashboardService::new(store),
            build: Arc::new(build),
        }
    }
}

/// 创建路由
pub fn create_app(state: AppState) -> Router {
    Router::new()
        // 页面
        .route("/", get(handlers::landing))
        .route("/dashboard", get(handlers::dashboard))
        .route("/patients", get(handlers::patients))
        .route("/doctors", get(handlers::doctors))
        .route("/appointments", get(handlers::appointments))
        .route("/patient-outcomes", get(handlers::patient_outcomes))
        .route("/settings", get(handlers::settings))
        .route("/version", get(handlers::version))

        // JSON接口
        .nest("/api", api_routes())

        // 健康检查
        .route("/health", get(handlers::health))
        .with_state(state)

        // 全局中间件
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(
                    CorsLayer::new()
                        .allow_origin(Any)
                        .allow_methods(Any)
                        .allow_headers(Any),
                ),
        )
}

fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/patients", get(handlers::api_patients))
        .route("/kpi", get(handlers::api_kpi))
}

/// 绑定监听地址，主机可以是主机名、IPv4或IPv6地址
pub async fn bind_listener(host: &str, port: u16) -> Result<TcpListener> {
    let listener = TcpListener::bind((host, port)).await?;
    info!("Listening on {}", listener.local_addr()?);
    Ok(listener)
}

pub struct WebServer {
    host: String,
    port: u16,
    app: Router,
}

impl WebServer {
    pub fn new(host: impl Into<String>, port: u16, state: AppState) -> Self {
        Self {
            host: host.into(),
            port,
            app: create_app(state),
        }
    }

    pub async fn run(self) -> Result<()> {
        info!("Starting web server on {}:{}", self.host, self.port);

        let listener = bind_listener(&self.host, self.port).await?;
        axum::serve(listener, self.app).await?;

        Ok(())
    }
}

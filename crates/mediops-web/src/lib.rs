//! # MediOps Web
//!
//! 视图组装、HTML页面渲染与HTTP路由。

pub mod handlers;
pub mod pages;
pub mod server;
pub mod views;

pub use server::{bind_listener, create_app, AppState, WebServer};
pub use views::{DashboardService, DashboardView, DoctorDirectory};

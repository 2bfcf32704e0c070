//! MediOps服务器主程序

use anyhow::Context;
use clap::Parser;
use mediops_admin::{init_logging, AppConfig, BuildInfo};
use mediops_core::{EntityStore, MemoryEntityStore};
use mediops_database::{DatabasePool, DatabaseQueries, PgEntityStore};
use mediops_web::{AppState, WebServer};
use std::sync::Arc;
use tracing::{error, info, warn};

/// MediOps服务器命令行参数
#[derive(Parser, Debug)]
#[command(name = "mediops-server")]
#[command(about = "MediOps 医院运营仪表盘服务器")]
struct Args {
    /// 监听地址，可以是主机名、IPv4或IPv6地址
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    /// 监听端口
    #[arg(short, long, default_value = "8080")]
    port: u16,

    /// 日志级别
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// 数据库为空时写入演示数据
    #[arg(long)]
    seed_demo: bool,

    /// 使用内存演示数据，不连接数据库
    #[arg(long, conflicts_with = "seed_demo")]
    in_memory: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // 初始化日志
    init_logging(&args.log_level);

    info!("启动MediOps服务器...");

    let (store, build) = if args.in_memory {
        warn!("Serving in-memory demo data, no database configured");
        let store: Arc<dyn EntityStore> = Arc::new(MemoryEntityStore::demo());
        (store, BuildInfo::from_env()?)
    } else {
        let config = AppConfig::from_env().context("缺少必需的数据库配置")?;
        (connect_database(&config, args.seed_demo).await?, config.build)
    };

    info!("版本: {} ({})", build.version_tag, build.deploy_color);

    let server = WebServer::new(args.host, args.port, AppState::new(store, build));
    if let Err(e) = server.run().await {
        error!("服务器启动失败: {}", e);
        return Err(e.into());
    }

    Ok(())
}

/// 连接数据库并初始化表结构，初始化失败时直接退出
async fn connect_database(config: &AppConfig, seed_demo: bool) -> anyhow::Result<Arc<dyn EntityStore>> {
    let pool = DatabasePool::new(&config.database);
    let queries = DatabaseQueries::new(&pool);

    if let Err(e) = queries.create_tables().await {
        error!("数据库初始化失败: {}", e);
        return Err(e.into());
    }

    if seed_demo {
        queries.seed_demo_data().await?;
    }

    Ok(Arc::new(PgEntityStore::new(pool)))
}

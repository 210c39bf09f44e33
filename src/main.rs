mod config;
mod handlers;
mod middleware;
mod models;
mod routes;
mod services;
mod state;
mod utils;

#[cfg(test)]
mod testing;

use crate::config::Config;
use crate::middleware::{create_cors, RequestLogging};
use crate::routes::{panel_routes, public_routes};
use crate::state::AppState;
use actix_web::{web, App, HttpServer};
use anyhow::Context;
use chrono::Local;
use log::info;
use std::io;
use std::io::Write;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // 初始化日志
    let mut log_builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    log_builder
        .format(|buf, record| {
            writeln!(
                buf,
                "{} [{}] - {}",
                Local::now().format("%Y-%m-%d %H:%M:%S %:z"),
                record.level(),
                record.args()
            )
            .map_err(|e| io::Error::new(io::ErrorKind::Other, e)) // 转换为 io::Result
        })
        .init();

    // 加载并验证配置
    let config = Config::from_env().context("Failed to load configuration")?;
    config.validate().context("Invalid configuration")?;

    let bind_address = config.bind_address();
    let workers = config.server.workers;
    let allowed_origins = config.server.allowed_origins.clone();
    info!("Using marketplace backend at {}", config.backend.url);

    let app_state = web::Data::new(AppState::new(config).context("Failed to create application state")?);
    app_state.stats.start();

    let server_state = app_state.clone();
    let mut server = HttpServer::new(move || {
        App::new()
            .app_data(server_state.clone())
            .wrap(create_cors(&allowed_origins))
            .wrap(RequestLogging::new().quiet_path("/health"))
            .service(panel_routes())
            .service(public_routes())
    })
    .bind(&bind_address)
    .with_context(|| format!("Failed to bind {}", bind_address))?;

    if let Some(workers) = workers {
        server = server.workers(workers);
    }

    info!("Control panel listening on {}", bind_address);
    let result = server.run().await;

    app_state.stats.shutdown();
    info!("Control panel stopped");

    result.context("Server error")
}

use actix_web::{App, HttpServer, middleware::Logger};
use anyhow::Context;
use chrono::Local; // timestamp in log lines
use env_logger::{Env, Target};
use std::io::Write; // for env_logger custom formatter
use std::sync::Arc;

use musicworld_backend::{
    AppState,
    config::Config,
    database::{create_pool, run_migrations},
    external::{ExchangeRateSource, PrivatBankRates},
    middlewares::create_cors,
    services::PageService,
    swagger::swagger_config,
};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format(|buf, record| {
            let ts = Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z");
            let level = record.level().as_str().to_ascii_lowercase();
            let msg_json = serde_json::to_string(&format!("{}", record.args()))
                .unwrap_or_else(|_| "\"<invalid utf8>\"".to_string());
            writeln!(
                buf,
                "{{\"timestamp\":\"{}\",\"level\":\"{}\",\"message\":{},\"target\":\"{}\"}}",
                ts,
                level,
                msg_json,
                record.target(),
            )
        })
        .target(Target::Stdout)
        .init();

    // 加载配置
    let config = Config::from_toml()
        .map_err(|e| anyhow::anyhow!("Failed to load configuration: {e}"))?;

    // 创建数据库连接池
    let pool = create_pool(&config.database)
        .await
        .context("Failed to create database connection pool")?;

    // 运行数据库迁移
    run_migrations(&pool)
        .await
        .context("Failed to run database migrations")?;

    // 汇率服务：失败时页面仍可渲染
    let page_service = if config.exchange_rates.enabled {
        match PrivatBankRates::new(&config.exchange_rates) {
            Ok(source) => {
                let source: Arc<dyn ExchangeRateSource> = Arc::new(source);
                PageService::new(Some(source))
            }
            Err(e) => {
                log::error!("Exchange rate client unavailable: {e}");
                PageService::without_rates()
            }
        }
    } else {
        PageService::without_rates()
    };

    let state = AppState::new(pool, &config, page_service)?;

    if let Some(admin) = &config.admin {
        match state
            .auth_service
            .ensure_admin(&admin.email, &admin.password)
            .await
        {
            Ok(true) => {}
            Ok(false) => log::debug!("Admin account {} already exists", admin.email),
            Err(e) => log::error!("Failed to create admin account: {e}"),
        }
    }

    log::info!(
        "Starting HTTP server at {}:{}",
        config.server.host,
        config.server.port
    );

    let allowed_origins = config.server.allowed_origins.clone();
    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(create_cors(&allowed_origins))
            .wrap(state.session_middleware())
            .configure(swagger_config)
            .configure(|cfg| state.configure(cfg))
    })
    .bind((config.server.host.as_str(), config.server.port))?
    .run()
    .await?;

    Ok(())
}

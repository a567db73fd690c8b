// src/lib.rs

pub mod cli;
pub mod client;
pub mod config;
pub mod constants;
pub mod error;
pub mod extractor;
pub mod logging;
pub mod models;
pub mod symbols;
pub mod ui;

use crate::{
    cli::Cli,
    client::RobustClient,
    config::AppConfig,
    error::AppResult,
    extractor::{build_extractors, select_extractor},
    models::Extraction,
};
use log::debug;
use std::sync::Arc;

/// 使用给定配置解析单个链接
pub async fn resolve_url(config: Arc<AppConfig>, url: &str, referer: Option<&str>) -> AppResult<Extraction> {
    let http_client = Arc::new(RobustClient::new(config.clone())?);
    let extractors = build_extractors(http_client, &config);
    let extractor = select_extractor(&extractors, url)?;
    extractor.resolve(url, referer).await
}

/// 库的公共入口点，由 `main.rs` 调用
pub async fn run_from_cli(args: Arc<Cli>) -> AppResult<()> {
    debug!("CLI 参数: {:?}", args);

    let config = Arc::new(AppConfig::resolve(args.config.as_deref())?);
    debug!("加载的应用配置: {:?}", config);

    let extraction = resolve_url(config, &args.url, args.referer.as_deref()).await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&extraction)?);
    } else {
        ui::print_extraction(&args.url, &extraction);
    }
    Ok(())
}

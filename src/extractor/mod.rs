// src/extractor/mod.rs

pub mod filesim;
pub mod kuramadrive;
pub mod linkbox;
pub mod m3u8;
pub mod streamsb;
pub mod unpacker;
pub mod utils;

use crate::{
    client::RobustClient,
    config::{AppConfig, SiteConfig},
    error::*,
    models::Extraction,
};
use async_trait::async_trait;
use log::{error, info};
use std::sync::Arc;
use url::Url;

pub use filesim::FilesimExtractor;
pub use kuramadrive::KuramadriveExtractor;
pub use linkbox::LinkboxExtractor;
pub use streamsb::StreamSbExtractor;

#[async_trait]
pub trait Extractor: Send + Sync {
    fn site(&self) -> &SiteConfig;

    fn name(&self) -> &str {
        &self.site().name
    }

    /// 默认按主域名匹配，忽略 `www.`
    fn matches(&self, url: &Url) -> bool {
        let Some(host) = url.host_str().map(|h| h.trim_start_matches("www.")) else {
            return false;
        };
        utils::normalized_host(&self.site().main_url).is_some_and(|h| h == host)
    }

    /// 提取的具体实现，错误未经包装
    async fn extract(&self, url: &str, referer: Option<&str>) -> AppResult<Extraction>;

    /// 对外入口：所有失败统一包装为 `ExtractionFailed`
    async fn resolve(&self, url: &str, referer: Option<&str>) -> AppResult<Extraction> {
        info!("使用 {} 解析: {}", self.name(), url);
        match self.extract(url, referer).await {
            Ok(extraction) => {
                info!(
                    "{} 解析完成: {} 个链接, {} 个字幕",
                    self.name(),
                    extraction.links.len(),
                    extraction.subtitles.len()
                );
                Ok(extraction)
            }
            Err(e) => {
                error!("{} 解析 '{}' 失败: {}", self.name(), url, e);
                Err(AppError::extraction_failed(e))
            }
        }
    }
}

/// 按配置构建全部提取器
pub fn build_extractors(http_client: Arc<RobustClient>, config: &AppConfig) -> Vec<Box<dyn Extractor>> {
    let sites = &config.sites;
    vec![
        Box::new(StreamSbExtractor::new(http_client.clone(), sites.nyomo.clone())),
        Box::new(FilesimExtractor::new(http_client.clone(), sites.streamhide.clone())),
        Box::new(LinkboxExtractor::new(http_client.clone(), sites.linkbox.clone())),
        Box::new(KuramadriveExtractor::new(http_client, sites.kuramadrive.clone())),
    ]
}

/// 找到第一个能处理该链接的提取器
pub fn select_extractor<'a>(
    extractors: &'a [Box<dyn Extractor>],
    url: &str,
) -> AppResult<&'a dyn Extractor> {
    let parsed = Url::parse(url).map_err(|e| AppError::InvalidInput(format!("无效的链接 '{}': {}", url, e)))?;
    extractors
        .iter()
        .find(|e| e.matches(&parsed))
        .map(|e| e.as_ref())
        .ok_or_else(|| AppError::UnsupportedUrl(url.to_string()))
}

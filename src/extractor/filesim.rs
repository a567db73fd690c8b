// src/extractor/filesim.rs

use super::{Extractor, m3u8, unpacker, utils as extractor_utils};
use crate::{
    client::{RateLimiter, RequestOptions, RobustClient},
    config::SiteConfig,
    error::*,
    models::{Extraction, SubtitleFile},
};
use async_trait::async_trait;
use log::debug;
use regex::Regex;
use scraper::{Html, Selector};
use std::{
    collections::BTreeMap,
    sync::{Arc, LazyLock},
};

static SOURCE_FILE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"file\s*:\s*["']([^"']+)["']"#).unwrap());
static CAPTION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\{\s*file\s*:\s*"([^"]+)"\s*,\s*label\s*:\s*"([^"]+)"\s*,\s*kind\s*:\s*"captions""#)
        .unwrap()
});

/// 播放器脚本中找到的视频源与字幕
#[derive(Debug, PartialEq, Eq)]
pub struct PlayerSources {
    pub file: String,
    pub subtitles: Vec<SubtitleFile>,
}

fn parse_player_script(script: &str) -> Option<PlayerSources> {
    let (_, after_sources) = script.split_once("sources:")?;
    let file = SOURCE_FILE_RE
        .captures(after_sources)
        .map(|c| c[1].to_string())?;
    let subtitles = CAPTION_RE
        .captures_iter(script)
        .map(|c| SubtitleFile {
            lang: c[2].to_string(),
            url: c[1].to_string(),
        })
        .collect();
    Some(PlayerSources { file, subtitles })
}

/// 遍历页面脚本（必要时先解包），取第一个带 `sources:` 的播放器配置
pub fn find_player_sources(html: &str) -> AppResult<PlayerSources> {
    let document = Html::parse_document(html);
    let selector = Selector::parse("script")
        .map_err(|e| AppError::Other(anyhow::anyhow!("选择器解析失败: {:?}", e)))?;

    document
        .select(&selector)
        .map(|el| unpacker::get_and_unpack(&el.text().collect::<String>()))
        .find_map(|script| parse_player_script(&script))
        .ok_or_else(|| AppError::InvalidInput("No video source found".to_string()))
}

/// Filesim 系站点的通用提取策略，站点身份由 `SiteConfig` 提供
pub struct FilesimExtractor {
    http_client: Arc<RobustClient>,
    site: SiteConfig,
    limiter: Option<RateLimiter>,
}

impl FilesimExtractor {
    pub fn new(http_client: Arc<RobustClient>, site: SiteConfig) -> Self {
        let limiter = site.rate_limit.map(RateLimiter::new);
        Self {
            http_client,
            site,
            limiter,
        }
    }

    pub fn limiter(&self) -> Option<&RateLimiter> {
        self.limiter.as_ref()
    }
}

#[async_trait]
impl Extractor for FilesimExtractor {
    fn site(&self) -> &SiteConfig {
        &self.site
    }

    async fn extract(&self, url: &str, _referer: Option<&str>) -> AppResult<Extraction> {
        let site_referer = extractor_utils::root_referer(&self.site.main_url);
        let opts = RequestOptions::new()
            .referer(Some(site_referer.as_str()))
            .limited_by(self.limiter());
        let html = self.http_client.get_text(url, &opts).await?;

        let sources = find_player_sources(&html)?;
        debug!("{} 视频源: {}", self.site.name, sources.file);

        let links = m3u8::expand_master(
            &self.http_client,
            &self.site.name,
            &sources.file,
            &site_referer,
            &BTreeMap::new(),
            self.limiter(),
        )
        .await;

        Ok(Extraction {
            links,
            subtitles: sources.subtitles,
        })
    }
}

// src/extractor/linkbox.rs

use super::{Extractor, utils as extractor_utils};
use crate::{
    client::{RequestOptions, RobustClient},
    config::SiteConfig,
    constants,
    error::*,
    models::{
        Extraction, Quality, ResolvedLink,
        api::{LinkboxResponse, Resolution},
    },
};
use async_trait::async_trait;
use log::{debug, warn};
use std::sync::Arc;
use url::Url;

pub struct LinkboxExtractor {
    http_client: Arc<RobustClient>,
    site: SiteConfig,
}

impl LinkboxExtractor {
    pub fn new(http_client: Arc<RobustClient>, site: SiteConfig) -> Self {
        Self { http_client, site }
    }

    async fn fetch_item_id(&self, token: &str, page_url: &str) -> AppResult<String> {
        let list_url = format!(
            "{}{}{}",
            self.site.api_base(),
            constants::api::linkbox::SHARE_OUT_LIST,
            token
        );
        let opts = RequestOptions::new().referer(Some(page_url));
        let resp: LinkboxResponse = self.http_client.get_json(&list_url, &opts).await?;
        resp.data
            .and_then(|d| d.item_id)
            .filter(|id| !id.is_empty())
            .ok_or_else(|| AppError::Upstream("Failed to get item ID".to_string()))
    }

    async fn fetch_resolutions(&self, item_id: &str, page_url: &str) -> AppResult<Vec<Resolution>> {
        let detail_url = format!(
            "{}{}{}",
            self.site.api_base(),
            constants::api::linkbox::DETAIL,
            item_id
        );
        let opts = RequestOptions::new().referer(Some(page_url));
        let resp: LinkboxResponse = self.http_client.get_json(&detail_url, &opts).await?;
        Ok(resp
            .data
            .and_then(|d| d.item_info)
            .map(|info| info.resolution_list)
            .unwrap_or_default())
    }

    fn to_link(&self, resolution: Resolution) -> Option<ResolvedLink> {
        let Some(video_url) = resolution.url.filter(|u| !u.is_empty()) else {
            warn!("跳过缺少 url 的清晰度条目: {:?}", resolution.resolution);
            return None;
        };
        let quality = resolution
            .resolution
            .as_deref()
            .map_or(Quality::Unknown, extractor_utils::quality_from_name);
        Some(ResolvedLink::new(
            &self.site.name,
            &self.site.name,
            video_url,
            extractor_utils::root_referer(self.site.api_base()),
            quality,
        ))
    }
}

#[async_trait]
impl Extractor for LinkboxExtractor {
    fn site(&self) -> &SiteConfig {
        &self.site
    }

    /// 分享短域名和接口域名都能匹配
    fn matches(&self, url: &Url) -> bool {
        let Some(host) = url.host_str().map(|h| h.trim_start_matches("www.")) else {
            return false;
        };
        [self.site.main_url.as_str(), self.site.api_base()]
            .iter()
            .filter_map(|base| extractor_utils::normalized_host(base))
            .any(|h| h == host)
    }

    async fn extract(&self, url: &str, _referer: Option<&str>) -> AppResult<Extraction> {
        let token = extractor_utils::extract_share_token(url)?;
        debug!("Linkbox 分享 token: {}", token);

        let item_id = self.fetch_item_id(&token, url).await?;
        debug!("Linkbox itemId: {}", item_id);

        let links: Vec<ResolvedLink> = self
            .fetch_resolutions(&item_id, url)
            .await?
            .into_iter()
            .filter_map(|r| self.to_link(r))
            .collect();

        Ok(Extraction::from_links(links))
    }
}

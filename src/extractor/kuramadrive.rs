// src/extractor/kuramadrive.rs

use super::{Extractor, utils as extractor_utils};
use crate::{
    client::{self, RequestOptions, RobustClient},
    config::SiteConfig,
    constants::api::kuramadrive as api,
    error::*,
    models::{Extraction, ResolvedLink, api::AvailabilityResponse},
};
use async_trait::async_trait;
use log::debug;
use scraper::{Html, Selector};
use std::sync::Arc;
use url::Url;

/// 页面中提取出的两个字段
#[derive(Debug, PartialEq, Eq)]
pub struct PageFields {
    pub csrf_token: String,
    pub route: String,
}

fn select_attr(document: &Html, selector: &str, attr: &str) -> Option<String> {
    let selector = Selector::parse(selector).ok()?;
    document
        .select(&selector)
        .next()
        .and_then(|el| el.value().attr(attr))
        .map(str::to_string)
}

/// 解析 CSRF token 与可用性检查路由
pub fn parse_page(html: &str) -> AppResult<PageFields> {
    let document = Html::parse_document(html);
    let csrf_token = select_attr(&document, api::CSRF_SELECTOR, "content")
        .ok_or_else(|| AppError::InvalidInput("CSRF token not found".to_string()))?;
    let route = select_attr(&document, api::ROUTE_SELECTOR, "value")
        .ok_or_else(|| AppError::InvalidInput("Route not found".to_string()))?;
    Ok(PageFields { csrf_token, route })
}

pub struct KuramadriveExtractor {
    http_client: Arc<RobustClient>,
    site: SiteConfig,
}

impl KuramadriveExtractor {
    pub fn new(http_client: Arc<RobustClient>, site: SiteConfig) -> Self {
        Self { http_client, site }
    }
}

#[async_trait]
impl Extractor for KuramadriveExtractor {
    fn site(&self) -> &SiteConfig {
        &self.site
    }

    async fn extract(&self, url: &str, referer: Option<&str>) -> AppResult<Extraction> {
        let page_url = Url::parse(url)
            .map_err(|e| AppError::InvalidInput(format!("Invalid URL '{}': {}", url, e)))?;
        let page = self
            .http_client
            .get(page_url.clone(), &RequestOptions::new().referer(referer))
            .await?;
        let cookies = client::cookie_header(&page);
        let fields = parse_page(&page.text().await?)?;
        // 路由可能是相对路径
        let route = page_url.join(&fields.route)?;
        debug!("DriveKurama 路由: {}, 携带 cookie: {}", route, !cookies.is_empty());

        let opts = RequestOptions::new()
            .referer(Some(url))
            .header("X-Requested-With", "XMLHttpRequest")
            .header("X-CSRF-TOKEN", &fields.csrf_token)
            .cookies(&cookies);
        let resp: AvailabilityResponse = self.http_client.get_json(route, &opts).await?;

        let video_url = resp
            .url
            .filter(|u| !u.is_empty())
            .ok_or_else(|| AppError::Upstream("No video URL found".to_string()))?;

        let quality = extractor_utils::quality_from_url(&video_url);
        let link = ResolvedLink::new(
            &self.site.name,
            &self.site.name,
            video_url,
            extractor_utils::root_referer(&self.site.main_url),
            quality,
        );
        Ok(Extraction::from_links(vec![link]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_page_fields() {
        let html = r#"<html><head><meta name="csrf-token" content="tok-1"></head>
            <body><input type="hidden" id="routeCheckAvl" value="https://kuramadrive.com/check/9"></body></html>"#;
        assert_eq!(
            parse_page(html).unwrap(),
            PageFields {
                csrf_token: "tok-1".into(),
                route: "https://kuramadrive.com/check/9".into()
            }
        );
    }

    #[test]
    fn test_parse_page_missing_fields() {
        let no_token = r#"<input id="routeCheckAvl" value="/check">"#;
        let err = parse_page(no_token).unwrap_err();
        assert_eq!(err.to_string(), "CSRF token not found");

        let no_route = r#"<meta name="csrf-token" content="t"><input id="other" value="/x">"#;
        let err = parse_page(no_route).unwrap_err();
        assert_eq!(err.to_string(), "Route not found");
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }
}

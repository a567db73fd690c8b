// src/extractor/utils.rs

use crate::{error::*, models::Quality};
use regex::Regex;
use std::sync::LazyLock;
use url::Url;

static SHARE_TOKEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:/f/|/file/|\?id=)(\w+)").unwrap());

/// 从 Linkbox 分享链接中取出分享 token
pub fn extract_share_token(url: &str) -> AppResult<String> {
    SHARE_TOKEN_RE
        .captures(url)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .ok_or_else(|| AppError::InvalidInput("Invalid URL format".to_string()))
}

/// 把 "720p"、"1080P"、"4k" 之类的名称映射到清晰度档位，无法识别时为 Unknown
pub fn quality_from_name(name: &str) -> Quality {
    let lowered = name.trim().to_lowercase();
    let stripped = lowered.strip_suffix('p').unwrap_or(&lowered).trim();
    match stripped {
        "4k" => Quality::P2160,
        "2k" => Quality::P1440,
        other => other
            .parse::<u32>()
            .map_or(Quality::Unknown, Quality::from_height),
    }
}

/// 按顺序在 URL 中查找清晰度标记
pub fn quality_from_url(url: &str) -> Quality {
    [
        ("360p", Quality::P360),
        ("480p", Quality::P480),
        ("720p", Quality::P720),
        ("1080p", Quality::P1080),
    ]
    .into_iter()
    .find(|(marker, _)| url.contains(marker))
    .map_or(Quality::Unknown, |(_, q)| q)
}

/// 去掉 `www.` 之后的主机名
pub fn normalized_host(url: &str) -> Option<String> {
    Url::parse(url).ok().and_then(|u| {
        u.host_str()
            .map(|h| h.trim_start_matches("www.").to_ascii_lowercase())
    })
}

/// 站点根地址，作为输出链接的 Referer
pub fn root_referer(base: &str) -> String {
    format!("{}/", base.trim_end_matches('/'))
}

// src/extractor/m3u8.rs

use crate::{
    client::{RateLimiter, RequestOptions, RobustClient},
    constants::api::M3U8_MARKER,
    error::*,
    models::{Quality, ResolvedLink},
};
use itertools::Itertools;
use log::{debug, warn};
use std::collections::BTreeMap;
use url::Url;

/// 主播放列表中的一个清晰度分支
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variant {
    pub url: String,
    pub quality: Quality,
    pub height: Option<u64>,
}

/// 解析主播放列表；若是媒体播放列表则返回空列表
pub fn parse_variants(base: &Url, text: &str) -> AppResult<Vec<Variant>> {
    let playlist = m3u8_rs::parse_playlist_res(text.as_bytes())
        .map_err(|e| AppError::M3u8Parse(e.to_string()))?;

    let m3u8_rs::Playlist::MasterPlaylist(master) = playlist else {
        return Ok(Vec::new());
    };

    let variants = master
        .variants
        .iter()
        .filter(|v| !v.is_i_frame)
        .map(|v| -> AppResult<Variant> {
            let height = v.resolution.as_ref().map(|r| r.height);
            Ok(Variant {
                url: base.join(&v.uri)?.to_string(),
                quality: height
                    .and_then(|h| u32::try_from(h).ok())
                    .map_or(Quality::Unknown, Quality::from_height),
                height,
            })
        })
        .collect::<AppResult<Vec<_>>>()?;

    Ok(variants.into_iter().unique_by(|v| v.url.clone()).collect())
}

async fn fetch_variants(
    client: &RobustClient,
    url: &str,
    opts: &RequestOptions<'_>,
) -> AppResult<Vec<Variant>> {
    let base = Url::parse(url)?;
    let text = client.get_text(base.clone(), opts).await?;
    parse_variants(&base, &text)
}

/// 把 HLS 主播放列表展开成每个清晰度一个链接，失败时退回原链接
pub async fn expand_master(
    client: &RobustClient,
    source: &str,
    url: &str,
    referer: &str,
    headers: &BTreeMap<String, String>,
    limiter: Option<&RateLimiter>,
) -> Vec<ResolvedLink> {
    let opts = headers
        .iter()
        .fold(RequestOptions::new().referer(Some(referer)), |o, (k, v)| {
            o.header(k, v)
        })
        .limited_by(limiter);

    let single = || {
        vec![
            ResolvedLink::new(source, source, url.to_string(), referer.to_string(), Quality::Unknown)
                .with_headers(headers.clone()),
        ]
    };

    // 直链视频 (如 mp4) 不拉取内容
    if !url.contains(M3U8_MARKER) {
        debug!("{} 不是 HLS 链接，直接输出", url);
        return single();
    }

    match fetch_variants(client, url, &opts).await {
        Ok(variants) if !variants.is_empty() => {
            debug!("{} 主播放列表包含 {} 个分支", url, variants.len());
            variants
                .into_iter()
                .map(|v| {
                    let name = match v.height {
                        Some(h) => format!("{} {}p", source, h),
                        None => source.to_string(),
                    };
                    ResolvedLink::new(source, &name, v.url, referer.to_string(), v.quality)
                        .with_headers(headers.clone())
                })
                .collect()
        }
        Ok(_) => {
            debug!("{} 不是主播放列表，直接输出", url);
            single()
        }
        Err(e) => {
            warn!("展开播放列表 '{}' 失败，退回原链接: {}", url, e);
            single()
        }
    }
}

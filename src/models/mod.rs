// src/models/mod.rs

pub mod api;

use crate::symbols;
use colored::{ColoredString, Colorize};
use serde::Serialize;
use std::collections::BTreeMap;

/// 清晰度档位，`Unknown` 排在最低
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Quality {
    #[serde(rename = "unknown")]
    Unknown,
    #[serde(rename = "144p")]
    P144,
    #[serde(rename = "240p")]
    P240,
    #[serde(rename = "360p")]
    P360,
    #[serde(rename = "480p")]
    P480,
    #[serde(rename = "720p")]
    P720,
    #[serde(rename = "1080p")]
    P1080,
    #[serde(rename = "1440p")]
    P1440,
    #[serde(rename = "2160p")]
    P2160,
}

impl Quality {
    pub const ALL: [Quality; 8] = [
        Quality::P144,
        Quality::P240,
        Quality::P360,
        Quality::P480,
        Quality::P720,
        Quality::P1080,
        Quality::P1440,
        Quality::P2160,
    ];

    pub fn height(&self) -> Option<u32> {
        match self {
            Quality::Unknown => None,
            Quality::P144 => Some(144),
            Quality::P240 => Some(240),
            Quality::P360 => Some(360),
            Quality::P480 => Some(480),
            Quality::P720 => Some(720),
            Quality::P1080 => Some(1080),
            Quality::P1440 => Some(1440),
            Quality::P2160 => Some(2160),
        }
    }

    pub fn from_height(height: u32) -> Self {
        Self::ALL
            .into_iter()
            .find(|q| q.height() == Some(height))
            .unwrap_or(Quality::Unknown)
    }

    pub fn label(&self) -> String {
        self.height()
            .map_or_else(|| "未知".to_string(), |h| format!("{}p", h))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedLink {
    pub source: String,
    pub name: String,
    pub url: String,
    pub referer: String,
    pub quality: Quality,
    pub is_multi_part: bool,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub headers: BTreeMap<String, String>,
}

impl ResolvedLink {
    /// 按链接本身推断 `is_multi_part`
    pub fn new(source: &str, name: &str, url: String, referer: String, quality: Quality) -> Self {
        let is_multi_part = url.contains(crate::constants::api::M3U8_MARKER);
        Self {
            source: source.to_string(),
            name: name.to_string(),
            url,
            referer,
            quality,
            is_multi_part,
            headers: BTreeMap::new(),
        }
    }

    pub fn with_headers(mut self, headers: BTreeMap<String, String>) -> Self {
        self.headers = headers;
        self
    }

    pub fn get_display_info(&self) -> (&'static ColoredString, ColoredString) {
        let quality = match self.quality {
            Quality::Unknown => self.quality.label().yellow(),
            _ => self.quality.label().green(),
        };
        (&symbols::OK, quality)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubtitleFile {
    pub lang: String,
    pub url: String,
}

/// 一次解析的全部产出，按发现顺序排列
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Extraction {
    pub links: Vec<ResolvedLink>,
    pub subtitles: Vec<SubtitleFile>,
}

impl Extraction {
    pub fn from_links(links: Vec<ResolvedLink>) -> Self {
        Self {
            links,
            subtitles: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty() && self.subtitles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quality_from_height_is_exact() {
        assert_eq!(Quality::from_height(720), Quality::P720);
        assert_eq!(Quality::from_height(2160), Quality::P2160);
        assert_eq!(Quality::from_height(719), Quality::Unknown);
        assert_eq!(Quality::from_height(0), Quality::Unknown);
        assert!(Quality::Unknown < Quality::P144);
    }

    #[test]
    fn test_resolved_link_multi_part_flag() {
        let hls = ResolvedLink::new("A", "A", "https://x/a.m3u8?t=1".into(), "r".into(), Quality::P720);
        assert!(hls.is_multi_part);
        let mp4 = ResolvedLink::new("A", "A", "https://x/480p/video.mp4".into(), "r".into(), Quality::P480);
        assert!(!mp4.is_multi_part);
    }
}

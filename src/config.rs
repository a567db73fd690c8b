// src/config.rs

use crate::{constants, error::AppResult};
use anyhow::Context;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

/// 单个站点的身份信息
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SiteConfig {
    pub name: String,
    pub main_url: String,
    /// 与展示域名不同的接口域名 (Linkbox)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,
    /// 同一站点同时在途的最大请求数
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rate_limit: Option<usize>,
}

impl SiteConfig {
    pub fn new(name: &str, main_url: &str) -> Self {
        Self {
            name: name.to_string(),
            main_url: main_url.trim_end_matches('/').to_string(),
            api_url: None,
            rate_limit: None,
        }
    }

    pub fn with_api_url(mut self, api_url: &str) -> Self {
        self.api_url = Some(api_url.trim_end_matches('/').to_string());
        self
    }

    pub fn with_rate_limit(mut self, rate_limit: usize) -> Self {
        self.rate_limit = Some(rate_limit);
        self
    }

    /// 接口域名，未配置时回退到主域名
    pub fn api_base(&self) -> &str {
        self.api_url.as_deref().unwrap_or(&self.main_url)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SitesConfig {
    pub nyomo: SiteConfig,
    pub streamhide: SiteConfig,
    pub linkbox: SiteConfig,
    pub kuramadrive: SiteConfig,
}

impl Default for SitesConfig {
    fn default() -> Self {
        use constants::sites::*;
        Self {
            nyomo: SiteConfig::new(nyomo::NAME, nyomo::MAIN_URL).with_rate_limit(nyomo::RATE_LIMIT),
            streamhide: SiteConfig::new(streamhide::NAME, streamhide::MAIN_URL)
                .with_rate_limit(streamhide::RATE_LIMIT),
            linkbox: SiteConfig::new(linkbox::NAME, linkbox::MAIN_URL).with_api_url(linkbox::API_URL),
            kuramadrive: SiteConfig::new(kuramadrive::NAME, kuramadrive::MAIN_URL),
        }
    }
}

#[cfg(feature = "testing")]
impl SitesConfig {
    /// 把所有站点（含接口域名）指向同一个模拟服务器
    pub fn pointed_at(base: &str) -> Self {
        let mut sites = Self::default();
        for site in [
            &mut sites.nyomo,
            &mut sites.streamhide,
            &mut sites.linkbox,
            &mut sites.kuramadrive,
        ] {
            site.main_url = base.trim_end_matches('/').to_string();
            if site.api_url.is_some() {
                site.api_url = Some(site.main_url.clone());
            }
        }
        sites
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct NetworkConfig {
    pub user_agent: Option<String>,
    pub connect_timeout_secs: Option<u64>,
    pub timeout_secs: Option<u64>,
    pub max_retries: Option<u32>,
}

/// 配置文件的结构，所有字段都可省略
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ExternalConfig {
    #[serde(default)]
    pub network: NetworkConfig,
    #[serde(default)]
    pub sites: Option<SitesConfig>,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub user_agent: String,
    pub connect_timeout: Duration,
    pub timeout: Duration,
    pub max_retries: u32,
    pub sites: SitesConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            user_agent: constants::USER_AGENT.into(),
            connect_timeout: Duration::from_secs(constants::DEFAULT_CONNECT_TIMEOUT_SECS),
            timeout: Duration::from_secs(constants::DEFAULT_TIMEOUT_SECS),
            max_retries: constants::DEFAULT_MAX_RETRIES,
            sites: SitesConfig::default(),
        }
    }
}

impl From<ExternalConfig> for AppConfig {
    fn from(external: ExternalConfig) -> Self {
        let defaults = Self::default();
        Self {
            user_agent: external.network.user_agent.unwrap_or(defaults.user_agent),
            connect_timeout: external
                .network
                .connect_timeout_secs
                .map_or(defaults.connect_timeout, Duration::from_secs),
            timeout: external
                .network
                .timeout_secs
                .map_or(defaults.timeout, Duration::from_secs),
            max_retries: external.network.max_retries.unwrap_or(defaults.max_retries),
            sites: external.sites.unwrap_or(defaults.sites),
        }
    }
}

impl AppConfig {
    /// 从 JSON 配置文件加载，缺省字段使用内置默认值
    pub fn load(path: &Path) -> AppResult<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("读取配置文件 '{}' 失败", path.display()))?;
        let external: ExternalConfig = serde_json::from_str(&content)
            .with_context(|| format!("解析配置文件 '{}' 失败", path.display()))?;
        debug!("已解析配置文件: {:?}", external);
        Ok(external.into())
    }

    /// 显式路径优先，其次是用户配置目录，最后是内置默认值
    pub fn resolve(explicit: Option<&Path>) -> AppResult<Self> {
        if let Some(path) = explicit {
            info!("从 {:?} 加载配置", path);
            return Self::load(path);
        }
        match default_config_path() {
            Some(path) if path.is_file() => {
                info!("从 {:?} 加载配置", path);
                Self::load(&path)
            }
            _ => {
                debug!("未找到配置文件，使用内置默认配置");
                Ok(Self::default())
            }
        }
    }
}

pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| {
        dir.join(constants::CONFIG_DIR_NAME)
            .join(constants::CONFIG_FILE_NAME)
    })
}

// src/client.rs

use crate::{config::AppConfig, error::*};
use governor::{DefaultDirectRateLimiter, Quota, RateLimiter as GovernorRateLimiter};
use itertools::Itertools;
use log::debug;
use reqwest::{IntoUrl, Response, header};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{RetryTransientMiddleware, policies::ExponentialBackoff};
use serde::de::DeserializeOwned;
use std::{num::NonZeroU32, sync::Arc};

/// 按站点限制单位时间 (秒) 内发出的请求数
#[derive(Clone)]
pub struct RateLimiter {
    inner: Arc<DefaultDirectRateLimiter>,
    limit: u32,
}

impl RateLimiter {
    pub fn new(limit: usize) -> Self {
        let per_second = u32::try_from(limit)
            .ok()
            .and_then(NonZeroU32::new)
            .unwrap_or(NonZeroU32::MIN);
        Self {
            inner: Arc::new(GovernorRateLimiter::direct(Quota::per_second(per_second))),
            limit: per_second.get(),
        }
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    /// 等待直到配额允许再发出一个请求
    pub async fn until_ready(&self) {
        self.inner.until_ready().await;
    }
}

impl std::fmt::Debug for RateLimiter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RateLimiter").field("limit", &self.limit).finish()
    }
}

/// 单次请求的附加参数
#[derive(Debug, Default, Clone)]
pub struct RequestOptions<'a> {
    referer: Option<&'a str>,
    headers: Vec<(&'a str, &'a str)>,
    cookies: Option<&'a str>,
    limiter: Option<&'a RateLimiter>,
}

impl<'a> RequestOptions<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn referer(mut self, referer: Option<&'a str>) -> Self {
        self.referer = referer;
        self
    }

    pub fn header(mut self, name: &'a str, value: &'a str) -> Self {
        self.headers.push((name, value));
        self
    }

    pub fn cookies(mut self, cookies: &'a str) -> Self {
        self.cookies = Some(cookies).filter(|c| !c.is_empty());
        self
    }

    pub fn limited_by(mut self, limiter: Option<&'a RateLimiter>) -> Self {
        self.limiter = limiter;
        self
    }
}

#[derive(Clone)]
pub struct RobustClient {
    pub client: ClientWithMiddleware,
}

impl RobustClient {
    pub fn new(config: Arc<AppConfig>) -> AppResult<Self> {
        let retry_policy =
            ExponentialBackoff::builder().build_with_max_retries(config.max_retries);
        let client = ClientBuilder::new(
            reqwest::Client::builder()
                .user_agent(config.user_agent.clone())
                .connect_timeout(config.connect_timeout)
                .timeout(config.timeout)
                .build()?,
        )
        .with(RetryTransientMiddleware::new_with_policy(retry_policy))
        .build();

        Ok(Self { client })
    }

    pub async fn get<T: IntoUrl>(&self, url: T, opts: &RequestOptions<'_>) -> AppResult<Response> {
        let url = url.into_url()?;
        debug!("GET {}", url);

        let mut req = self.client.get(url);
        if let Some(referer) = opts.referer {
            req = req.header(header::REFERER, referer);
        }
        for (name, value) in &opts.headers {
            req = req.header(*name, *value);
        }
        if let Some(cookies) = opts.cookies {
            req = req.header(header::COOKIE, cookies);
        }

        // 每个逻辑请求在发出前占用一次配额，重试由退避策略控制间隔
        if let Some(limiter) = opts.limiter {
            limiter.until_ready().await;
        }
        let res = req.send().await?;
        Ok(res.error_for_status()?)
    }

    pub async fn get_text<T: IntoUrl>(&self, url: T, opts: &RequestOptions<'_>) -> AppResult<String> {
        Ok(self.get(url, opts).await?.text().await?)
    }

    /// 获取并反序列化 JSON，解析失败归为上游错误
    pub async fn get_json<D: DeserializeOwned, T: IntoUrl>(
        &self,
        url: T,
        opts: &RequestOptions<'_>,
    ) -> AppResult<D> {
        let url = url.into_url()?;
        let body = self.get_text(url.clone(), opts).await?;
        serde_json::from_str(&body).map_err(|source| AppError::ApiParseFailed {
            url: url.to_string(),
            source,
        })
    }
}

/// 把响应里的 Set-Cookie 拼成可回传的 Cookie 头
pub fn cookie_header(res: &Response) -> String {
    res.cookies()
        .map(|c| format!("{}={}", c.name(), c.value()))
        .join("; ")
}

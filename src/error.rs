// src/error.rs

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")] // 只打印内部信息，不加任何前缀
    InvalidInput(String),
    #[error("不支持的链接: {0}")]
    UnsupportedUrl(String),
    #[error("{0}")]
    Upstream(String),
    #[error("无法解析来自 '{url}' 的API响应: {source}")]
    ApiParseFailed {
        url: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("M3U8 解析错误: {0}")]
    M3u8Parse(String),
    #[error("网络请求失败: {0}")]
    Network(#[from] reqwest::Error),
    #[error("网络中间件错误: {0}")]
    NetworkMiddleware(#[from] reqwest_middleware::Error),
    #[error("URL 解析错误: {0}")]
    Url(#[from] url::ParseError),
    #[error("JSON 解析错误: {0}")]
    Json(#[from] serde_json::Error),
    #[error("I/O 错误: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to extract links: {0}")]
    ExtractionFailed(#[source] Box<AppError>),
    #[error("未知错误: {0}")]
    Other(#[from] anyhow::Error),
}

/// 对外暴露的错误分类
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidInput,
    Upstream,
    Network,
    Other,
}

impl AppError {
    /// 在提取器边界处包装错误，已经包装过的错误原样返回
    pub fn extraction_failed(err: AppError) -> Self {
        match err {
            AppError::ExtractionFailed(_) => err,
            other => AppError::ExtractionFailed(Box::new(other)),
        }
    }

    /// 剥掉边界包装，返回最初的错误
    pub fn cause(&self) -> &AppError {
        match self {
            AppError::ExtractionFailed(inner) => inner.cause(),
            other => other,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self.cause() {
            AppError::InvalidInput(_) | AppError::UnsupportedUrl(_) | AppError::Url(_) => {
                ErrorKind::InvalidInput
            }
            AppError::Upstream(_)
            | AppError::ApiParseFailed { .. }
            | AppError::M3u8Parse(_)
            | AppError::Json(_) => ErrorKind::Upstream,
            AppError::Network(_) | AppError::NetworkMiddleware(_) => ErrorKind::Network,
            _ => ErrorKind::Other,
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extraction_failed_message_and_kind() {
        let err = AppError::extraction_failed(AppError::InvalidInput("CSRF token not found".into()));
        assert_eq!(err.to_string(), "failed to extract links: CSRF token not found");
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
        assert!(matches!(err.cause(), AppError::InvalidInput(_)));

        // 二次包装不会叠加前缀
        let twice = AppError::extraction_failed(err);
        assert_eq!(twice.to_string(), "failed to extract links: CSRF token not found");
    }

    #[test]
    fn test_parse_failure_is_upstream() {
        let source = serde_json::from_str::<serde_json::Value>("<html>").unwrap_err();
        let err = AppError::ApiParseFailed { url: "https://x/api".into(), source };
        assert_eq!(err.kind(), ErrorKind::Upstream);
        assert_eq!(AppError::UnsupportedUrl("x".into()).kind(), ErrorKind::InvalidInput);
    }
}

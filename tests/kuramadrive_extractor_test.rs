// tests/kuramadrive_extractor_test.rs

use kurama_extractors::{
    client::RobustClient,
    config::{AppConfig, SitesConfig},
    error::{AppResult, ErrorKind},
    extractor::{Extractor, KuramadriveExtractor},
    models::Quality,
};
use mockito::Matcher;
use std::{fs, sync::Arc};

const HOST_REFERER: &str = "https://v6.kuramanime.run/";

fn build_extractor(server_url: &str) -> AppResult<KuramadriveExtractor> {
    let config = Arc::new(AppConfig {
        max_retries: 0,
        sites: SitesConfig::pointed_at(server_url),
        ..AppConfig::default()
    });
    let client = Arc::new(RobustClient::new(config.clone())?);
    Ok(KuramadriveExtractor::new(client, config.sites.kuramadrive.clone()))
}

#[tokio::test]
async fn test_kuramadrive_resolves_single_link() -> AppResult<()> {
    // --- 1. Arrange (准备阶段) ---
    let mut server = mockito::Server::new_async().await;
    let page_url = format!("{}/kdrive/abc", server.url());
    let page_body = fs::read_to_string("tests/fixtures/kuramadrive_page.html")
        .expect("无法读取模拟页面文件");

    let page_mock = server
        .mock("GET", "/kdrive/abc")
        .match_header("referer", HOST_REFERER)
        .with_status(200)
        .with_header("content-type", "text/html; charset=utf-8")
        .with_header("set-cookie", "XSRF-TOKEN=xsrf42; Path=/")
        .with_header("set-cookie", "kurama_session=s3ss10n; Path=/; HttpOnly")
        .with_body(&page_body)
        .create_async()
        .await;

    let check_mock = server
        .mock("GET", "/kdrive/check/abc")
        .match_header("x-requested-with", "XMLHttpRequest")
        .match_header("x-csrf-token", "tok-123")
        .match_header("referer", page_url.as_str())
        .match_header(
            "cookie",
            Matcher::AllOf(vec![
                Matcher::Regex("XSRF-TOKEN=xsrf42".to_string()),
                Matcher::Regex("kurama_session=s3ss10n".to_string()),
            ]),
        )
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"url":"https://x/480p/video.mp4"}"#)
        .create_async()
        .await;

    let extractor = build_extractor(&server.url())?;

    // --- 2. Act (执行阶段) ---
    let extraction = extractor.resolve(&page_url, Some(HOST_REFERER)).await?;

    // --- 3. Assert (断言阶段) ---
    page_mock.assert_async().await;
    check_mock.assert_async().await;

    assert_eq!(extraction.links.len(), 1);
    let link = &extraction.links[0];
    assert_eq!(link.url, "https://x/480p/video.mp4");
    assert_eq!(link.quality, Quality::P480);
    assert!(!link.is_multi_part);
    assert_eq!(link.name, "DriveKurama");
    assert_eq!(link.referer, format!("{}/", server.url()));

    Ok(())
}

#[tokio::test]
async fn test_kuramadrive_missing_csrf_stops_before_second_request() -> AppResult<()> {
    let mut server = mockito::Server::new_async().await;
    let page_url = format!("{}/kdrive/abc", server.url());
    let page_body = fs::read_to_string("tests/fixtures/kuramadrive_page_no_csrf.html")
        .expect("无法读取模拟页面文件");

    let _page_mock = server
        .mock("GET", "/kdrive/abc")
        .with_status(200)
        .with_body(&page_body)
        .create_async()
        .await;
    let check_mock = server
        .mock("GET", "/kdrive/check/abc")
        .expect(0)
        .create_async()
        .await;

    let err = build_extractor(&server.url())?
        .resolve(&page_url, None)
        .await
        .unwrap_err();

    check_mock.assert_async().await;
    assert_eq!(err.kind(), ErrorKind::InvalidInput);
    assert_eq!(err.to_string(), "failed to extract links: CSRF token not found");
    Ok(())
}

#[tokio::test]
async fn test_kuramadrive_malformed_url_is_invalid_input() -> AppResult<()> {
    let mut server = mockito::Server::new_async().await;
    let any_mock = server
        .mock("GET", Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let err = build_extractor(&server.url())?
        .resolve("kuramadrive.com/kdrive/abc", None)
        .await
        .unwrap_err();

    any_mock.assert_async().await;
    assert_eq!(err.kind(), ErrorKind::InvalidInput);
    assert!(err.to_string().starts_with("failed to extract links: Invalid URL"));
    Ok(())
}

#[tokio::test]
async fn test_kuramadrive_missing_url_is_upstream_error() -> AppResult<()> {
    let mut server = mockito::Server::new_async().await;
    let page_url = format!("{}/kdrive/abc", server.url());
    let page_body = fs::read_to_string("tests/fixtures/kuramadrive_page.html")
        .expect("无法读取模拟页面文件");

    let _page_mock = server
        .mock("GET", "/kdrive/abc")
        .with_status(200)
        .with_body(&page_body)
        .create_async()
        .await;
    let _check_mock = server
        .mock("GET", "/kdrive/check/abc")
        .with_status(200)
        .with_body(r#"{"status":"unavailable"}"#)
        .create_async()
        .await;

    let err = build_extractor(&server.url())?
        .resolve(&page_url, None)
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Upstream);
    assert_eq!(err.to_string(), "failed to extract links: No video URL found");
    Ok(())
}

#[tokio::test]
async fn test_kuramadrive_hls_link_is_multi_part() -> AppResult<()> {
    let mut server = mockito::Server::new_async().await;
    let page_url = format!("{}/kdrive/abc", server.url());
    let page_body = fs::read_to_string("tests/fixtures/kuramadrive_page.html")
        .expect("无法读取模拟页面文件");

    let _page_mock = server
        .mock("GET", "/kdrive/abc")
        .with_status(200)
        .with_body(&page_body)
        .create_async()
        .await;
    let _check_mock = server
        .mock("GET", "/kdrive/check/abc")
        .with_status(200)
        .with_body(r#"{"url":"https://x/stream/1080p/index.m3u8"}"#)
        .create_async()
        .await;

    let extraction = build_extractor(&server.url())?.resolve(&page_url, None).await?;

    let link = &extraction.links[0];
    assert_eq!(link.quality, Quality::P1080);
    assert!(link.is_multi_part);
    Ok(())
}

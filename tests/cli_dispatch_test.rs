// tests/cli_dispatch_test.rs

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs::File;
use std::io::Write;
use tempfile::tempdir;

// 辅助函数，避免重复
fn main_command() -> Command {
    Command::cargo_bin("kurama-ext").unwrap()
}

// --- 测试基本 CLI 行为 ---

#[test]
fn test_help_flag() {
    let mut cmd = main_command();
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("需要解析的视频页面链接"));
}

#[test]
fn test_missing_url_shows_help() {
    let mut cmd = main_command();
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Usage: kurama-ext"));
}

#[test]
fn test_unsupported_url_fails() {
    let mut cmd = main_command();
    cmd.arg("--url").arg("https://example.com/video/1");
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("不支持的链接"));
}

#[test]
fn test_invalid_linkbox_url_reports_wrapped_error() {
    let mut cmd = main_command();
    cmd.arg("--url").arg("https://lbx.to/s/nothing");
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("failed to extract links: Invalid URL format"));
}

// --- 测试配置文件与 JSON 输出 ---

#[test]
fn test_linkbox_with_config_file_prints_json() {
    let mut server = mockito::Server::new();
    let share_body = std::fs::read_to_string("tests/fixtures/linkbox_share_list.json").unwrap();
    let detail_body = std::fs::read_to_string("tests/fixtures/linkbox_detail.json").unwrap();

    let _list = server
        .mock("GET", mockito::Matcher::Regex(r"^/api/file/share_out_list/".to_string()))
        .match_query(mockito::Matcher::UrlEncoded("shareToken".into(), "abc123".into()))
        .with_status(200)
        .with_body(&share_body)
        .create();
    let _detail = server
        .mock("GET", mockito::Matcher::Regex(r"^/api/file/detail".to_string()))
        .with_status(200)
        .with_body(&detail_body)
        .create();

    let dir = tempdir().unwrap();
    let config_path = dir.path().join("config.json");
    let config = serde_json::json!({
        "network": { "max_retries": 0, "timeout_secs": 10 },
        "sites": {
            "nyomo": { "name": "Nyomo", "main_url": "https://nyomo.my.id", "rate_limit": 2 },
            "streamhide": { "name": "Streamhide", "main_url": "https://streamhide.to", "rate_limit": 2 },
            "linkbox": { "name": "Linkbox", "main_url": "https://lbx.to", "api_url": server.url() },
            "kuramadrive": { "name": "DriveKurama", "main_url": "https://kuramadrive.com" }
        }
    });
    let mut file = File::create(&config_path).unwrap();
    writeln!(file, "{}", config).unwrap();

    let mut cmd = main_command();
    cmd.arg("--url")
        .arg("https://lbx.to/f/abc123")
        .arg("--config")
        .arg(&config_path)
        .arg("--json");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains(r#""quality": "720p""#))
        .stdout(predicate::str::contains("https://cdn.linkbox.example/hls/a.m3u8"))
        .stdout(predicate::str::contains(r#""is_multi_part": true"#));
}

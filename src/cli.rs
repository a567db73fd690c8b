// src/cli.rs

use clap::{Parser, ValueEnum, crate_version};
use std::path::PathBuf;

/// 定义日志输出级别
#[derive(ValueEnum, Copy, Clone, Debug, PartialEq, Eq)]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Parser, Debug, Clone)]
#[command(
    name = "kurama-ext",
    version = crate_version!(),
    about,
    long_about = None,
    arg_required_else_help = true,
    disable_help_flag = true,
    disable_version_flag = true,
)]
pub struct Cli {
    /// 需要解析的视频页面链接 (Nyomo / Streamhide / Linkbox / DriveKurama)
    #[arg(short, long, value_name = "URL", help_heading = "Input")]
    pub url: String,
    /// 请求页面时携带的 Referer
    #[arg(short, long, value_name = "URL", help_heading = "Input")]
    pub referer: Option<String>,

    // --- 选项 (Options) ---
    /// 指定配置文件 (JSON)，默认读取用户配置目录下的 config.json
    #[arg(short, long, value_name = "FILE", help_heading = "Options")]
    pub config: Option<PathBuf>,
    /// 以 JSON 格式输出解析结果
    #[arg(long, action = clap::ArgAction::SetTrue, help_heading = "Options")]
    pub json: bool,
    /// 将日志写入指定文件而不是 stderr
    #[arg(long, value_name = "FILE", help_heading = "Options")]
    pub log_file: Option<PathBuf>,

    // --- 通用选项 (General) ---
    /// 显示此帮助信息并退出
    #[arg(short = 'h', long, action = clap::ArgAction::Help, global = true, help_heading = "General")]
    _help: Option<bool>,
    /// 显示版本信息并退出
    #[arg(short = 'V', long, action = clap::ArgAction::Version, global = true, help_heading = "General")]
    _version: Option<bool>,
    /// (隐藏参数) 设置日志的输出级别，用于调试
    #[arg(long, value_enum, default_value_t = LogLevel::Off, global = true, hide = true)]
    pub log_level: LogLevel,
}

// src/main.rs

use clap::{CommandFactory, FromArgMatches};
use colored::*;
use kurama_extractors::{cli::Cli, logging, run_from_cli};
use std::{env, sync::Arc};

#[tokio::main]
async fn main() {
    // 为 Windows 终端启用 ANSI 颜色支持。
    #[cfg(windows)]
    {
        colored::control::set_virtual_terminal(true).ok();
    }

    let bin_name = env::var("CARGO_BIN_NAME").unwrap_or_else(|_| "kurama-ext".to_string());

    let after_help = format!(
        "示例:\n  # 解析 Linkbox 分享链接\n  {bin} --url \"https://lbx.to/f/xxxx\"\n\n  # 携带 Referer 解析 DriveKurama 页面并输出 JSON\n  {bin} --url \"https://kuramadrive.com/kdrive/xxxx\" --referer \"https://v6.kuramanime.run/\" --json",
        bin = bin_name
    );

    let cmd = Cli::command().after_help(after_help);

    let args = match Cli::from_arg_matches(&cmd.get_matches()) {
        Ok(args) => Arc::new(args),
        Err(e) => e.exit(),
    };

    logging::init_logger(args.log_level, args.log_file.as_deref());

    if let Err(e) = run_from_cli(args).await {
        eprintln!("\n{} {}", "[X]".red(), format!("程序执行出错: {}", e).red());
        std::process::exit(1);
    }
}

// src/logging.rs

use crate::{cli::LogLevel, constants};
use fern::colors::{Color, ColoredLevelConfig};
use log::warn;
use std::path::Path;

fn level_filter(level: LogLevel) -> log::LevelFilter {
    match level {
        LogLevel::Off => log::LevelFilter::Off,
        LogLevel::Error => log::LevelFilter::Error,
        LogLevel::Warn => log::LevelFilter::Warn,
        LogLevel::Info => log::LevelFilter::Info,
        LogLevel::Debug => log::LevelFilter::Debug,
        LogLevel::Trace => log::LevelFilter::Trace,
    }
}

/// 初始化日志：指定了日志文件就写文件，否则写 stderr
pub fn init_logger(level: LogLevel, log_file: Option<&Path>) {
    if level == LogLevel::Off {
        return;
    }
    let filter = level_filter(level);

    let base = fern::Dispatch::new().level(filter);

    let result = match log_file {
        Some(path) => {
            if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
                if let Err(e) = std::fs::create_dir_all(dir) {
                    eprintln!("警告: 无法创建日志目录 {:?}: {}", dir, e);
                }
            }

            let file_appender = match fern::log_file(path) {
                Ok(file) => file,
                Err(e) => {
                    eprintln!("警告: 无法打开日志文件 {:?} : {}。将尝试使用备用日志文件。", path, e);
                    let fallback_path = std::env::temp_dir().join(format!(
                        "{}-{}",
                        clap::crate_name!(),
                        constants::LOG_FALLBACK_FILE_NAME
                    ));
                    match fern::log_file(&fallback_path) {
                        Ok(fb_file) => {
                            warn!("日志将写入备用文件: {:?}", fallback_path);
                            fb_file
                        }
                        Err(e_fb) => {
                            eprintln!("错误: 无法创建备用日志文件 {:?}: {}。日志将不会被记录。", fallback_path, e_fb);
                            return;
                        }
                    }
                }
            };

            base.format(|out, message, record| {
                out.finish(format_args!(
                    "[{}] [{:<5}] [{}:{}] - {}",
                    chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
                    record.level(),
                    record.target(),
                    record.line().unwrap_or(0),
                    message
                ))
            })
            .chain(file_appender)
            .apply()
        }
        None => {
            let colors = ColoredLevelConfig::new()
                .error(Color::Red)
                .warn(Color::Yellow)
                .info(Color::Cyan)
                .debug(Color::White)
                .trace(Color::BrightBlack);
            base.format(move |out, message, record| {
                out.finish(format_args!(
                    "[{}] [{:<5}] [{}:{}] - {}",
                    chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
                    colors.color(record.level()),
                    record.target(),
                    record.line().unwrap_or(0),
                    message
                ))
            })
            .chain(std::io::stderr())
            .apply()
        }
    };

    if let Err(e) = result {
        eprintln!("警告: 日志系统初始化失败: {}", e);
    }
}

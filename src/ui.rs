// src/ui.rs

use crate::{constants, models::Extraction, symbols};
use colored::*;

pub fn print_header(title: &str) {
    println!("\n{}", "═".repeat(constants::UI_WIDTH));
    println!(" {}", title.cyan().bold());
    println!("{}", "═".repeat(constants::UI_WIDTH));
}

pub fn print_sub_header(title: &str) {
    println!("\n--- {} ---", title.bold());
}

pub fn print_extraction(url: &str, extraction: &Extraction) {
    print_header(&format!("解析结果: {}", url));

    if extraction.links.is_empty() {
        println!("{} 未找到可播放的链接。", *symbols::WARN);
    }
    for link in &extraction.links {
        let (symbol, quality) = link.get_display_info();
        let kind = if link.is_multi_part { "HLS" } else { "直链" };
        println!("{} [{}] {} ({})", symbol, quality, link.name.bold(), kind);
        println!("    {}", link.url);
        println!("    Referer: {}", link.referer.dimmed());
        for (name, value) in &link.headers {
            println!("    {}: {}", name, value.dimmed());
        }
    }

    if !extraction.subtitles.is_empty() {
        print_sub_header("字幕");
        for sub in &extraction.subtitles {
            println!("{} {} - {}", *symbols::INFO, sub.lang, sub.url);
        }
    }

    println!(
        "\n{}",
        format!(
            "共 {} 个链接, {} 个字幕",
            extraction.links.len(),
            extraction.subtitles.len()
        )
        .green()
    );
}

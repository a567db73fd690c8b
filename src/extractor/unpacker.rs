// src/extractor/unpacker.rs
//
// Dean Edwards p.a.c.k.e.r 脚本解包

use crate::error::*;
use regex::{Captures, Regex};
use std::sync::LazyLock;

const PACKED_MARKER: &str = "eval(function(p,a,c,k,e,";
const ALPHABET_62: &str = "0123456789abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

static PACKED_ARGS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)\}\s*\(\s*'(.*)',\s*(\d+|\[\]),\s*(\d+),\s*'(.*?)'\.split\('\|'\)").unwrap()
});
static WORD_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b\w+\b").unwrap());

pub fn is_packed(script: &str) -> bool {
    script.contains(PACKED_MARKER)
}

fn unbase(word: &str, radix: u32) -> Option<usize> {
    if radix <= 36 {
        return usize::from_str_radix(word, radix).ok();
    }
    word.chars().try_fold(0usize, |acc, c| {
        let digit = ALPHABET_62[..radix as usize].find(c)?;
        acc.checked_mul(radix as usize)?.checked_add(digit)
    })
}

pub fn unpack(script: &str) -> AppResult<String> {
    let caps = PACKED_ARGS_RE
        .captures(script)
        .ok_or_else(|| AppError::InvalidInput("无法识别的打包脚本".to_string()))?;

    let payload = caps[1].replace("\\'", "'").replace("\\\\", "\\");
    // `[]` 表示 62 进制
    let radix: u32 = match &caps[2] {
        "[]" => 62,
        n => n.parse().unwrap_or(62),
    };
    if !(2..=62).contains(&radix) {
        return Err(AppError::InvalidInput(format!("不支持的进制: {}", radix)));
    }
    let count: usize = caps[3].parse().unwrap_or(0);
    let symtab: Vec<&str> = caps[4].split('|').collect();
    if count != symtab.len() {
        log::debug!("符号表长度不一致: 声明 {}, 实际 {}", count, symtab.len());
    }

    let unpacked = WORD_RE.replace_all(&payload, |c: &Captures| {
        let word = &c[0];
        unbase(word, radix)
            .and_then(|i| symtab.get(i))
            .filter(|s| !s.is_empty())
            .map_or_else(|| word.to_string(), |s| s.to_string())
    });
    Ok(unpacked.into_owned())
}

/// 是打包脚本就解包，否则原样返回
pub fn get_and_unpack(script: &str) -> String {
    if !is_packed(script) {
        return script.to_string();
    }
    unpack(script).unwrap_or_else(|e| {
        log::warn!("解包脚本失败: {}", e);
        script.to_string()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const PACKED: &str = r#"eval(function(p,a,c,k,e,d){while(c--)if(k[c])p=p.replace(new RegExp('\\b'+c.toString(a)+'\\b','g'),k[c]);return p}('0 1={2:[{3:"4://5.6/7.8"}]};',36,9,'var|player|sources|file|https|cdn|example|master|m3u8'.split('|'),0,{}))"#;

    #[test]
    fn test_unpack_replaces_symbols() {
        assert!(is_packed(PACKED));
        let out = unpack(PACKED).unwrap();
        assert_eq!(out, r#"var player={sources:[{file:"https://cdn.example/master.m3u8"}]};"#);
    }

    #[test]
    fn test_unbase_62() {
        assert_eq!(unbase("z", 36), Some(35));
        assert_eq!(unbase("Z", 62), Some(61));
        assert_eq!(unbase("10", 62), Some(62));
        assert_eq!(unbase("!", 62), None);
    }

    #[test]
    fn test_plain_script_is_untouched() {
        assert_eq!(get_and_unpack("var a = 1;"), "var a = 1;");
    }
}

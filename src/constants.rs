// src/constants.rs

pub const UI_WIDTH: usize = 88;
pub const CONFIG_DIR_NAME: &str = clap::crate_name!();
pub const CONFIG_FILE_NAME: &str = "config.json";
pub const LOG_FALLBACK_FILE_NAME: &str = "extract.log";
pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;
pub const DEFAULT_MAX_RETRIES: u32 = 3;

pub mod sites {
    pub mod nyomo {
        pub const NAME: &str = "Nyomo";
        pub const MAIN_URL: &str = "https://nyomo.my.id";
        pub const RATE_LIMIT: usize = 2;
    }
    pub mod streamhide {
        pub const NAME: &str = "Streamhide";
        pub const MAIN_URL: &str = "https://streamhide.to";
        pub const RATE_LIMIT: usize = 2;
    }
    pub mod linkbox {
        pub const NAME: &str = "Linkbox";
        pub const MAIN_URL: &str = "https://lbx.to";
        pub const API_URL: &str = "https://www.linkbox.to";
    }
    pub mod kuramadrive {
        pub const NAME: &str = "DriveKurama";
        pub const MAIN_URL: &str = "https://kuramadrive.com";
    }
}

pub mod api {
    pub mod linkbox {
        pub const SHARE_OUT_LIST: &str = "/api/file/share_out_list/?sortField=utime&sortAsc=0&pageNo=1&pageSize=50&shareToken=";
        pub const DETAIL: &str = "/api/file/detail?itemId=";
    }
    pub mod kuramadrive {
        pub const CSRF_SELECTOR: &str = "meta[name=csrf-token]";
        pub const ROUTE_SELECTOR: &str = "input#routeCheckAvl";
    }
    pub mod streamsb {
        pub const SOURCES_PATH: &str = "375664356a494546326c4b797c7c6e756577776778623171737";
        pub const HEADER_NAME: &str = "watchsb";
        pub const HEADER_VALUE: &str = "sbstream";
    }
    pub const M3U8_MARKER: &str = ".m3u8";
}

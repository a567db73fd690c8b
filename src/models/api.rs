// src/models/api.rs

use serde::Deserialize;

// --- Linkbox API 响应结构体 ---

#[derive(Deserialize, Debug, Clone, Default)]
pub struct LinkboxResponse {
    pub data: Option<LinkboxData>,
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct LinkboxData {
    pub item_id: Option<String>,
    pub item_info: Option<ItemInfo>,
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct ItemInfo {
    #[serde(default)]
    pub resolution_list: Vec<Resolution>,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct Resolution {
    pub url: Option<String>,
    pub resolution: Option<String>,
}

// --- DriveKurama 可用性检查响应 ---

#[derive(Deserialize, Debug, Clone, Default)]
pub struct AvailabilityResponse {
    pub url: Option<String>,
}

// --- StreamSB 源接口响应 ---

#[derive(Deserialize, Debug, Clone)]
pub struct StreamSbResponse {
    pub stream_data: Option<StreamData>,
    pub status_code: Option<i32>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct StreamData {
    pub file: Option<String>,
    pub title: Option<String>,
    pub subs: Option<Vec<StreamSbSub>>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct StreamSbSub {
    pub file: Option<String>,
    pub label: Option<String>,
}

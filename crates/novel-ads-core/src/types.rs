//! Core types for ad strategy decisions

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Identifier of an ad slot inside a campaign schema
pub type SlotId = String;

/// The page currently displayed by the reader
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CurrentPage {
    pub id: String,
    pub chapter: Value,
    pub page: Value,
}

/// The page the reader is navigating towards
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NextPage {
    /// Loosely typed: hosts hand over numbers, numeric strings, or nothing
    pub page: Option<Value>,
}

/// Read-only snapshot of the navigation state for one evaluation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NavigationContext {
    pub is_last_page: bool,
    pub is_root_page: bool,
    pub current_page: CurrentPage,
    pub next_page: NextPage,
    pub chapter_name: String,
    pub original_url: String,
}

/// Per-document cache of the most recent campaign computation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AdsCache {
    /// When true the cache is stale and gets dropped before building novel data
    pub is_need_ads: bool,
    pub fetch_tpl: Vec<Value>,
    pub showed_ads: BTreeMap<SlotId, Value>,
    /// True only on the cycle right after the first successful campaign fetch
    pub is_first_fetch: bool,
    /// Page type the eligibility below was computed for
    pub page_type: String,
    pub eligible_slots: Vec<SlotId>,
}

/// Metadata of the novel page instance, owner of the ads cache
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NovelPageMeta {
    pub title: Option<String>,
    pub office_id: Option<String>,
    pub page_type: Option<String>,
    /// Kept loose so that only the JSON number 2 marks the second page
    pub novel_page_num: Option<Value>,
    pub ads_cache: Option<AdsCache>,
}

/// Payload describing the reading position to the ad subsystem
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NovelData {
    pub is_last_page: bool,
    pub chapter: Value,
    pub page: Value,
    pub chapter_name: String,
    pub original_url: String,
    pub name: String,
    pub office_id: String,
    pub page_type: String,
    pub silent_follow: bool,
    pub is_need_ads: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_second_page: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tpl: Option<Vec<Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub showed_ads: Option<BTreeMap<SlotId, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ignore_send_log: Option<bool>,
}

impl NovelData {
    /// Whether this payload asks for a log-only request
    pub fn ignores_send_log(&self) -> bool {
        self.ignore_send_log.unwrap_or(false)
    }
}

/// Outbound envelope for page ads and fetch control
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope {
    pub custom_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from_search: Option<u8>,
    pub novel_data: NovelData,
}

//! Slot eligibility from a per-page-type campaign schema

use novel_ads_core::{AdsCache, NavigationContext, NovelPageMeta, SlotId, StrategyCache};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Schema key used when the page type has no entry of its own
pub const DEFAULT_PAGE_TYPE: &str = "default";

/// Campaign data as delivered by the ad fetch
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CampaignData {
    /// Page type -> slots that may render on it
    pub schema: BTreeMap<String, Vec<SlotId>>,
    pub tpl: Vec<Value>,
    pub is_need_ads: bool,
}

impl CampaignData {
    /// Parse leniently; malformed campaign data yields an empty campaign
    pub fn from_value(value: &Value) -> Self {
        match serde_json::from_value(value.clone()) {
            Ok(data) => data,
            Err(err) => {
                warn!(error = %err, "malformed campaign data, using empty campaign");
                Self::default()
            }
        }
    }

    fn slots_for(&self, page_type: &str) -> Vec<SlotId> {
        self.schema
            .get(page_type)
            .or_else(|| self.schema.get(DEFAULT_PAGE_TYPE))
            .cloned()
            .unwrap_or_default()
    }
}

/// Reference [`StrategyCache`] keeping the campaign schema of the current document
#[derive(Debug, Clone, Default)]
pub struct SchemaStrategyCache {
    campaign: CampaignData,
    computations: usize,
}

impl SchemaStrategyCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn campaign(&self) -> &CampaignData {
        &self.campaign
    }

    /// Computations run since the cache was last initialized
    pub fn computations(&self) -> usize {
        self.computations
    }
}

impl StrategyCache for SchemaStrategyCache {
    fn init_cache(&mut self, campaign: &Value, page: &mut NovelPageMeta) {
        self.campaign = CampaignData::from_value(campaign);
        self.computations = 0;
        page.ads_cache = Some(AdsCache {
            is_need_ads: self.campaign.is_need_ads,
            fetch_tpl: self.campaign.tpl.clone(),
            is_first_fetch: true,
            ..Default::default()
        });
    }

    fn compute_for_page_type(&mut self, page: &mut NovelPageMeta) {
        let page_type = page
            .page_type
            .clone()
            .unwrap_or_else(|| DEFAULT_PAGE_TYPE.to_string());
        let Some(cache) = page.ads_cache.as_mut() else {
            debug!("no ads cache to compute");
            return;
        };

        cache.eligible_slots = self.campaign.slots_for(&page_type);
        cache.page_type = page_type;
        // Only the cycle right after the first fetch counts as first fetch
        if self.computations > 0 {
            cache.is_first_fetch = false;
        }
        self.computations += 1;
        debug!(
            page_type = %cache.page_type,
            slots = cache.eligible_slots.len(),
            "slot eligibility computed"
        );
    }

    fn extract_ready(&self, ctx: &NavigationContext, page: &NovelPageMeta) -> Value {
        let Some(cache) = &page.ads_cache else {
            return json!({});
        };
        let slots: Vec<&SlotId> = cache
            .eligible_slots
            .iter()
            .filter(|slot| !cache.showed_ads.contains_key(*slot))
            .collect();

        json!({
            "customId": ctx.current_page.id,
            "pageType": cache.page_type,
            "slots": slots,
            "tpl": cache.fetch_tpl,
        })
    }
}

/// Record that `slot` rendered on the page
pub fn mark_shown(page: &mut NovelPageMeta, slot: impl Into<SlotId>, record: Value) -> bool {
    match page.ads_cache.as_mut() {
        Some(cache) => {
            cache.showed_ads.insert(slot.into(), record);
            true
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn campaign() -> Value {
        json!({
            "schema": {
                "chapter": ["banner", "inline"],
                "default": ["footer"]
            },
            "tpl": [{"name": "banner-tpl"}]
        })
    }

    fn chapter_page() -> NovelPageMeta {
        NovelPageMeta {
            page_type: Some("chapter".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_init_marks_first_fetch() {
        let mut strategy = SchemaStrategyCache::new();
        let mut page = chapter_page();

        strategy.init_cache(&campaign(), &mut page);

        let cache = page.ads_cache.as_ref().unwrap();
        assert!(cache.is_first_fetch);
        assert!(!cache.is_need_ads);
        assert_eq!(cache.fetch_tpl, vec![json!({"name": "banner-tpl"})]);
    }

    #[test]
    fn test_first_fetch_cleared_on_second_computation() {
        let mut strategy = SchemaStrategyCache::new();
        let mut page = chapter_page();
        strategy.init_cache(&campaign(), &mut page);

        strategy.compute_for_page_type(&mut page);
        assert!(page.ads_cache.as_ref().unwrap().is_first_fetch);

        strategy.compute_for_page_type(&mut page);
        assert!(!page.ads_cache.as_ref().unwrap().is_first_fetch);
        assert_eq!(strategy.computations(), 2);
    }

    #[test]
    fn test_eligibility_by_page_type() {
        let mut strategy = SchemaStrategyCache::new();
        let mut page = chapter_page();
        strategy.init_cache(&campaign(), &mut page);
        strategy.compute_for_page_type(&mut page);
        assert_eq!(
            page.ads_cache.as_ref().unwrap().eligible_slots,
            vec!["banner", "inline"]
        );

        page.page_type = Some("cover".to_string());
        strategy.compute_for_page_type(&mut page);
        assert_eq!(page.ads_cache.as_ref().unwrap().eligible_slots, vec!["footer"]);
    }

    #[test]
    fn test_extract_skips_shown_slots() {
        let mut strategy = SchemaStrategyCache::new();
        let mut page = chapter_page();
        strategy.init_cache(&campaign(), &mut page);
        strategy.compute_for_page_type(&mut page);
        assert!(mark_shown(&mut page, "banner", json!({"at": 1})));

        let mut ctx = NavigationContext::default();
        ctx.current_page.id = "page-4".to_string();
        let ready = strategy.extract_ready(&ctx, &page);

        assert_eq!(ready["customId"], "page-4");
        assert_eq!(ready["pageType"], "chapter");
        assert_eq!(ready["slots"], json!(["inline"]));
    }

    #[test]
    fn test_malformed_campaign_is_empty() {
        let mut strategy = SchemaStrategyCache::new();
        let mut page = chapter_page();

        strategy.init_cache(&json!({"schema": "not-a-map"}), &mut page);
        strategy.compute_for_page_type(&mut page);

        assert_eq!(strategy.campaign(), &CampaignData::default());
        assert!(page.ads_cache.as_ref().unwrap().eligible_slots.is_empty());
    }

    #[test]
    fn test_without_cache() {
        let mut strategy = SchemaStrategyCache::new();
        let mut page = chapter_page();

        strategy.compute_for_page_type(&mut page);
        assert!(!mark_shown(&mut page, "banner", json!({})));
        assert_eq!(
            strategy.extract_ready(&NavigationContext::default(), &page),
            json!({})
        );
    }
}

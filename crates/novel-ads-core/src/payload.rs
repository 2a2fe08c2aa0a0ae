//! Novel data assembly

use crate::config::EngineConfig;
use crate::types::{NavigationContext, NovelData, NovelPageMeta};
use serde_json::Value;
use tracing::info;

/// Build the novel data record for the current reading position.
///
/// Side effect: when the cache reports `is_need_ads` (or there is no cache)
/// the page's cache is dropped before any cache field is read, so template
/// and shown-slot data from a stale campaign never reach the payload.
pub fn build_novel_data(
    ctx: &NavigationContext,
    page: &mut NovelPageMeta,
    config: &EngineConfig,
) -> NovelData {
    let is_need_ads = page.ads_cache.as_ref().map_or(true, |c| c.is_need_ads);

    let mut data = NovelData {
        is_last_page: ctx.is_last_page,
        chapter: ctx.current_page.chapter.clone(),
        page: ctx.current_page.page.clone(),
        chapter_name: ctx.chapter_name.clone(),
        original_url: ctx.original_url.clone(),
        name: page.title.clone().unwrap_or_default(),
        office_id: page.office_id.clone().unwrap_or_default(),
        page_type: page.page_type.clone().unwrap_or_default(),
        silent_follow: ctx.is_root_page,
        is_need_ads,
        ..Default::default()
    };

    if is_second_page(page.novel_page_num.as_ref(), config.second_page_milestone) {
        data.is_second_page = Some(true);
    }

    if is_need_ads && page.ads_cache.take().is_some() {
        info!("ads cache invalidated, campaign data needed again");
    }

    if let Some(cache) = &page.ads_cache {
        if !cache.fetch_tpl.is_empty() {
            data.tpl = Some(cache.fetch_tpl.clone());
        }
        if !cache.showed_ads.is_empty() {
            data.showed_ads = Some(cache.showed_ads.clone());
        }
        if cache.is_first_fetch {
            data.ignore_send_log = Some(true);
        }
    }

    data
}

// Strict comparison: the string "2" is not the second page
fn is_second_page(novel_page_num: Option<&Value>, milestone: u64) -> bool {
    match novel_page_num {
        Some(Value::Number(n)) => n.as_f64() == Some(milestone as f64),
        _ => false,
    }
}

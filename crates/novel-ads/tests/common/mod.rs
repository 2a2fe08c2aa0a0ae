#![allow(dead_code)]

use novel_ads_core::{
    AdStrategyEngine, AdsCache, EngineConfig, NavigationContext, NovelPageMeta, StaticPageState,
};
use novel_ads_sinks::RecordingSink;
use novel_ads_strategy::SchemaStrategyCache;
use serde_json::{json, Value};

pub type Engine = AdStrategyEngine<StaticPageState, SchemaStrategyCache, RecordingSink>;

pub const ROOT_PAGE_ID: &str = "root-page";

pub fn navigation(id: &str, next_page: Option<Value>) -> NavigationContext {
    let mut ctx = NavigationContext::default();
    ctx.current_page.id = id.to_string();
    ctx.current_page.chapter = json!(1);
    ctx.current_page.page = json!(1);
    ctx.next_page.page = next_page;
    ctx.chapter_name = "Prologue".to_string();
    ctx.original_url = "https://example.com/novel/1".to_string();
    ctx
}

pub fn sample_page() -> NovelPageMeta {
    NovelPageMeta {
        title: Some("Chronicle".to_string()),
        office_id: Some("office-7".to_string()),
        page_type: Some("chapter".to_string()),
        ..Default::default()
    }
}

pub fn warm_cache() -> AdsCache {
    AdsCache {
        is_need_ads: false,
        fetch_tpl: vec![json!({"name": "banner-tpl"})],
        ..Default::default()
    }
}

pub fn sample_campaign() -> Value {
    json!({
        "schema": {"chapter": ["banner", "inline"]},
        "tpl": [{"name": "banner-tpl"}]
    })
}

pub fn engine_with(
    ctx: NavigationContext,
    page: NovelPageMeta,
    config: EngineConfig,
) -> (Engine, RecordingSink) {
    let mut provider = StaticPageState::new(ROOT_PAGE_ID, page);
    provider.set_navigation(ctx);
    let sink = RecordingSink::new();
    let engine = AdStrategyEngine::new(
        config,
        provider,
        SchemaStrategyCache::new(),
        sink.clone(),
    );
    (engine, sink)
}

mod common;

use common::{engine_with, navigation, sample_campaign, sample_page, warm_cache};
use novel_ads_core::{
    attach, AdsCache, EngineConfig, EventName, NovelPageMeta, ResetPolicy, Signal, SignalBus,
    Target,
};
use serde_json::json;
use std::cell::RefCell;
use std::rc::Rc;

#[test]
fn test_need_ads_drops_cache_fields() {
    let mut ctx = navigation("p1", None);
    ctx.is_last_page = true;
    let mut showed_ads = std::collections::BTreeMap::new();
    showed_ads.insert("banner".to_string(), json!({"at": 1}));
    let page = NovelPageMeta {
        ads_cache: Some(AdsCache {
            is_need_ads: true,
            is_first_fetch: true,
            showed_ads,
            ..warm_cache()
        }),
        ..sample_page()
    };
    let (mut engine, sink) = engine_with(ctx, page, EngineConfig::new());

    engine.handle(&Signal::NextPage);

    let events = sink.events();
    assert_eq!(events.len(), 1, "no log-only fetch once the cache is dropped");
    let novel_data = events[0].data["novelData"].as_object().unwrap();
    assert_eq!(novel_data["isNeedAds"], true);
    assert!(!novel_data.contains_key("tpl"));
    assert!(!novel_data.contains_key("showedAds"));
    assert!(!novel_data.contains_key("ignoreSendLog"));
    assert!(engine.provider().page.ads_cache.is_none());
}

#[test]
fn test_second_page_flag_independent_of_global_ad() {
    for (novel_page_num, next_page, expect_second, expect_global) in [
        (json!(2), json!(5), true, false),
        (json!(1), json!(2), false, true),
        (json!(2), json!("2"), true, true),
        (json!("2"), json!(1), false, false),
    ] {
        let mut ctx = navigation("p1", Some(next_page));
        ctx.is_last_page = true;
        let page = NovelPageMeta {
            novel_page_num: Some(novel_page_num.clone()),
            ..sample_page()
        };
        let (mut engine, sink) = engine_with(ctx, page, EngineConfig::new());

        engine.handle(&Signal::NextPage);

        let page_ad = sink
            .events()
            .into_iter()
            .find(|e| e.target == Target::PageTree)
            .unwrap();
        assert_eq!(
            page_ad.data["novelData"].get("isSecondPage").is_some(),
            expect_second,
            "novelPageNum {novel_page_num}"
        );
        assert_eq!(engine.state().show_global_ad, expect_global);
    }
}

#[test]
fn test_global_ad_number_coercion() {
    let qualifying = [json!("2"), json!(2), json!("02")];
    let rejected = [Some(json!("2.5")), None];

    for page in qualifying {
        let (mut engine, sink) =
            engine_with(navigation("p1", Some(page)), sample_page(), EngineConfig::new());
        engine.handle(&Signal::NextPage);
        assert_eq!(sink.count(EventName::ShowAdvertising), 1);
    }
    for page in rejected {
        let (mut engine, sink) =
            engine_with(navigation("p1", page), sample_page(), EngineConfig::new());
        engine.handle(&Signal::NextPage);
        assert!(sink.is_empty());
    }
}

#[test]
fn test_page_ready_latch_survives_evaluations() {
    let (mut engine, sink) = engine_with(navigation("p1", None), sample_page(), EngineConfig::new());

    engine.handle(&Signal::CurrentPageReady);
    for _ in 0..3 {
        engine.handle(&Signal::NextPage);
        engine.handle(&Signal::PreviousPage);
    }

    assert!(engine.state().show_page_ad);
    assert_eq!(sink.count(EventName::ShowAdvertising), 6);
    assert!(sink.events().iter().all(|e| e.target == Target::PageTree));
}

#[test]
fn test_per_cycle_policy_keeps_page_ad() {
    let config = EngineConfig {
        reset_policy: ResetPolicy::PerCycle,
        ..EngineConfig::new()
    };
    let mut ctx = navigation("p1", Some(json!(2)));
    ctx.is_last_page = true;
    let (mut engine, sink) = engine_with(ctx, sample_page(), config);

    engine.handle(&Signal::NextPage);
    assert_eq!(sink.drain().len(), 2);

    let mut ctx = navigation("p2", Some(json!(3)));
    ctx.is_last_page = false;
    engine.provider_mut().set_navigation(ctx);
    engine.handle(&Signal::NextPage);

    let events = sink.drain();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].target, Target::PageTree);
    assert_eq!(events[0].data["customId"], "p2");
}

#[test]
fn test_first_fetch_cycle_with_schema_strategy() {
    let (mut engine, sink) = engine_with(navigation("p1", None), sample_page(), EngineConfig::new());

    engine.handle(&Signal::AdDataReady(vec![sample_campaign()]));

    let events = sink.drain();
    let names: Vec<_> = events.iter().map(|e| e.name).collect();
    assert_eq!(
        names,
        vec![EventName::ControlCustomFetch, EventName::ShowAdStrategyCache]
    );
    assert_eq!(events[1].data["slots"], json!(["banner", "inline"]));

    // Second arrival recomputes, first fetch is over
    engine.handle(&Signal::AdDataReady(vec![sample_campaign()]));
    let events = sink.drain();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].name, EventName::ShowAdStrategyCache);
    assert!(!engine.provider().page.ads_cache.as_ref().unwrap().is_first_fetch);
}

#[test]
fn test_bus_wiring_and_teardown() {
    let mut ctx = navigation("p1", None);
    ctx.is_last_page = true;
    let (engine, sink) = engine_with(ctx, sample_page(), EngineConfig::new());
    let engine = Rc::new(RefCell::new(engine));
    let bus = SignalBus::new();

    let subscriptions = attach(&engine, &bus);
    assert_eq!(subscriptions.len(), 5);
    assert_eq!(bus.listener_count(), 5);

    assert_eq!(bus.dispatch(&Signal::NextPage), 1);
    assert_eq!(bus.dispatch(&Signal::CustomReady), 1);
    assert!(engine.borrow().state().ad_custom_ready);
    assert_eq!(sink.count(EventName::ShowAdvertising), 2);

    for subscription in subscriptions {
        subscription.dispose();
    }
    assert_eq!(bus.listener_count(), 0);
    assert_eq!(bus.dispatch(&Signal::NextPage), 0);
    assert_eq!(sink.len(), 2);
}

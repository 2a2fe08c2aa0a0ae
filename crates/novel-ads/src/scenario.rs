//! Scenario files: scripted navigation driven through the engine

use anyhow::Context;
use novel_ads_core::{
    attach, AdStrategyEngine, EngineConfig, EventSink, NavigationContext, NovelPageMeta,
    OutboundEvent, Signal, SignalBus, SlotId, StaticPageState,
};
use novel_ads_sinks::RecordingSink;
use novel_ads_strategy::{mark_shown, SchemaStrategyCache};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::warn;
use std::cell::RefCell;
use std::path::Path;
use std::rc::Rc;

/// A reading session to replay
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Scenario {
    pub root_page_id: String,
    pub is_root_document: bool,
    pub page: NovelPageMeta,
    pub navigation: NavigationContext,
    pub steps: Vec<Step>,
}

/// One signal, optionally preceded by a navigation update
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Step {
    #[serde(default)]
    pub navigation: Option<NavigationContext>,
    #[serde(default)]
    pub novel_page_num: Option<Value>,
    /// Slots that rendered since the previous step
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub shown: Vec<SlotId>,
    pub signal: Signal,
}

/// Events emitted while handling one step
#[derive(Debug, Clone, Serialize)]
pub struct StepOutcome {
    pub step: usize,
    pub signal: String,
    pub events: Vec<OutboundEvent>,
}

impl Scenario {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("reading scenario {}", path.display()))?;
        serde_json::from_str(&contents)
            .with_context(|| format!("parsing scenario {}", path.display()))
    }
}

/// Sink that mirrors every event into a recorder before forwarding it
struct Tee<S> {
    recorder: RecordingSink,
    inner: S,
}

impl<S: EventSink> EventSink for Tee<S> {
    fn emit(&mut self, event: OutboundEvent) {
        self.recorder.emit(event.clone());
        self.inner.emit(event);
    }
}

/// Replay `scenario` through a freshly wired engine and collect per-step emissions
pub fn replay<S>(scenario: &Scenario, config: EngineConfig, sink: S) -> Vec<StepOutcome>
where
    S: EventSink + 'static,
{
    let mut provider = StaticPageState::new(scenario.root_page_id.clone(), scenario.page.clone());
    provider.is_root_document = scenario.is_root_document;
    provider.set_navigation(scenario.navigation.clone());

    let recorder = RecordingSink::new();
    let tee = Tee {
        recorder: recorder.clone(),
        inner: sink,
    };
    let engine = Rc::new(RefCell::new(AdStrategyEngine::new(
        config,
        provider,
        SchemaStrategyCache::new(),
        tee,
    )));

    let bus = SignalBus::new();
    let _subscriptions = attach(&engine, &bus);

    let mut outcomes = Vec::with_capacity(scenario.steps.len());
    for (index, step) in scenario.steps.iter().enumerate() {
        {
            let mut engine = engine.borrow_mut();
            let provider = engine.provider_mut();
            if let Some(navigation) = &step.navigation {
                provider.set_navigation(navigation.clone());
            }
            if let Some(num) = &step.novel_page_num {
                provider.page.novel_page_num = Some(num.clone());
            }
            for slot in &step.shown {
                if !mark_shown(&mut provider.page, slot.clone(), json!({ "step": index })) {
                    warn!(step = index, slot = %slot, "slot shown before any ads cache, ignored");
                }
            }
        }

        bus.dispatch(&step.signal);
        outcomes.push(StepOutcome {
            step: index,
            signal: step.signal.kind().to_string(),
            events: recorder.drain(),
        });
    }
    outcomes
}

//! Ad strategy engine: signal handlers, evaluation cycle, and emission

use crate::collab::{EventSink, PageStateProvider, StrategyCache};
use crate::config::EngineConfig;
use crate::decision::{DecisionState, StrategyDecision};
use crate::event::{EventName, OutboundEvent, Signal, Target};
use crate::payload::build_novel_data;
use crate::types::Envelope;
use serde_json::{json, Value};
use tracing::{debug, info, trace, warn};

/// Decides whether, where, and with what payload ads are requested.
///
/// One engine per reading session. Collaborators are owned by the engine
/// and reachable through accessors so the host can update page state
/// between signals.
#[derive(Debug)]
pub struct AdStrategyEngine<P, C, S> {
    config: EngineConfig,
    state: DecisionState,
    provider: P,
    cache: C,
    sink: S,
}

impl<P, C, S> AdStrategyEngine<P, C, S>
where
    P: PageStateProvider,
    C: StrategyCache,
    S: EventSink,
{
    pub fn new(config: EngineConfig, provider: P, cache: C, sink: S) -> Self {
        Self {
            config,
            state: DecisionState::new(),
            provider,
            cache,
            sink,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn state(&self) -> DecisionState {
        self.state
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn provider_mut(&mut self) -> &mut P {
        &mut self.provider
    }

    pub fn cache(&self) -> &C {
        &self.cache
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Drop every carried flag, as if the engine had just been created
    pub fn reset(&mut self) {
        self.state = DecisionState::new();
    }

    /// Route a host signal to its handler
    pub fn handle(&mut self, signal: &Signal) {
        trace!(signal = %signal.kind(), "signal received");
        match signal {
            Signal::PreviousPage | Signal::NextPage => self.evaluate(),
            Signal::CurrentPageReady => self.on_current_page_ready(),
            Signal::CustomReady => self.on_custom_ready(),
            Signal::AdDataReady(detail) => self.on_ad_data_ready(detail),
        }
    }

    /// Refresh the decision flags from the current navigation snapshot
    pub fn change_strategy(&mut self) -> StrategyDecision {
        let ctx = self.provider.navigation();
        let decision = StrategyDecision::derive(&ctx, &self.config);
        self.state = self.state.reduce(decision, self.config.reset_policy);
        decision
    }

    /// Run one full evaluation cycle and emit the resulting control events
    pub fn evaluate(&mut self) {
        let ctx = self.provider.navigation();
        let novel_data = build_novel_data(&ctx, self.provider.novel_page_mut(), &self.config);
        let decision = self.change_strategy();
        debug!(
            page = %ctx.current_page.id,
            ?decision,
            show_global_ad = self.state.show_global_ad,
            show_page_ad = self.state.show_page_ad,
            "strategy evaluated"
        );

        let ignore_send_log = novel_data.ignores_send_log();
        let envelope = Envelope {
            custom_id: ctx.current_page.id.clone(),
            from_search: self.state.from_search_flag(),
            novel_data,
        };
        let envelope = match serde_json::to_value(&envelope) {
            Ok(value) => value,
            Err(err) => {
                warn!(error = %err, "failed to encode envelope");
                return;
            }
        };

        if self.state.show_global_ad {
            let root_page_id = self.provider.root_page_id();
            self.emit(
                EventName::ShowAdvertising,
                Target::HostDocument,
                json!({ "customId": root_page_id }),
            );
        }
        if self.state.show_page_ad {
            self.emit(EventName::ShowAdvertising, Target::PageTree, envelope.clone());
        }
        if ignore_send_log {
            self.emit(EventName::ControlCustomFetch, Target::CurrentPage, envelope);
        }
    }

    fn on_current_page_ready(&mut self) {
        self.state.show_page_ad = true;
        if self.provider.is_root_document() {
            self.evaluate();
        }
    }

    fn on_custom_ready(&mut self) {
        if !self.state.show_page_ad {
            debug!("custom content ready before any page ad, ignored");
            return;
        }
        self.state.ad_custom_ready = true;
        self.evaluate();
    }

    fn on_ad_data_ready(&mut self, detail: &[Value]) {
        let campaign = campaign_record(detail);

        if self.provider.novel_page().ads_cache.is_none() {
            info!("first campaign data for document, initializing ads cache");
            self.cache.init_cache(&campaign, self.provider.novel_page_mut());
        }
        self.cache.compute_for_page_type(self.provider.novel_page_mut());

        let ctx = self.provider.navigation();
        let ready = self.cache.extract_ready(&ctx, self.provider.novel_page());

        let first_fetch = self
            .provider
            .novel_page()
            .ads_cache
            .as_ref()
            .is_some_and(|c| c.is_first_fetch);
        if first_fetch {
            self.evaluate();
        }

        self.emit(EventName::ShowAdStrategyCache, Target::CurrentPage, ready);
    }

    fn emit(&mut self, name: EventName, target: Target, data: Value) {
        trace!(event = %name, to = target.as_str(), "emitting");
        self.sink.emit(OutboundEvent::new(name, target, data));
    }
}

/// First campaign entry, or an empty record when it is missing or falsy
fn campaign_record(detail: &[Value]) -> Value {
    let falsy = |value: &Value| match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64().map_or(true, |n| n == 0.0 || n.is_nan()),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    };
    detail
        .first()
        .filter(|value| !falsy(value))
        .cloned()
        .unwrap_or_else(|| json!({}))
}

//! Collaborator traits implemented by the surrounding page shell

use crate::event::OutboundEvent;
use crate::types::{NavigationContext, NovelPageMeta};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Source of the current navigation state and owner of the novel page meta
pub trait PageStateProvider {
    /// Snapshot of the navigation state for one evaluation
    fn navigation(&self) -> NavigationContext;

    /// Id of the root page of the page tree
    fn root_page_id(&self) -> String;

    /// Whether this document is the root of the page tree
    fn is_root_document(&self) -> bool;

    fn novel_page(&self) -> &NovelPageMeta;

    fn novel_page_mut(&mut self) -> &mut NovelPageMeta;
}

/// Turns fetched campaign data into a per-page-type strategy cache
pub trait StrategyCache {
    /// Build `page.ads_cache` from the first campaign data of a document
    fn init_cache(&mut self, campaign: &Value, page: &mut NovelPageMeta);

    /// Recompute slot eligibility for the page's type, in place
    fn compute_for_page_type(&mut self, page: &mut NovelPageMeta);

    /// Ready-to-send strategy data for the current document
    fn extract_ready(&self, ctx: &NavigationContext, page: &NovelPageMeta) -> Value;
}

/// Receiver of outbound control events. Emission is fire-and-forget.
pub trait EventSink {
    fn emit(&mut self, event: OutboundEvent);
}

impl<S: EventSink + ?Sized> EventSink for Box<S> {
    fn emit(&mut self, event: OutboundEvent) {
        (**self).emit(event)
    }
}

impl EventSink for Vec<OutboundEvent> {
    fn emit(&mut self, event: OutboundEvent) {
        self.push(event);
    }
}

/// Page state held in memory, updated by the host between signals
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StaticPageState {
    pub navigation: NavigationContext,
    pub root_page_id: String,
    pub is_root_document: bool,
    pub page: NovelPageMeta,
}

impl StaticPageState {
    pub fn new(root_page_id: impl Into<String>, page: NovelPageMeta) -> Self {
        Self {
            root_page_id: root_page_id.into(),
            page,
            ..Default::default()
        }
    }

    pub fn set_navigation(&mut self, navigation: NavigationContext) {
        self.navigation = navigation;
    }
}

impl PageStateProvider for StaticPageState {
    fn navigation(&self) -> NavigationContext {
        self.navigation.clone()
    }

    fn root_page_id(&self) -> String {
        self.root_page_id.clone()
    }

    fn is_root_document(&self) -> bool {
        self.is_root_document
    }

    fn novel_page(&self) -> &NovelPageMeta {
        &self.page
    }

    fn novel_page_mut(&mut self) -> &mut NovelPageMeta {
        &mut self.page
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{EventName, Target};
    use serde_json::json;

    #[test]
    fn test_static_state_exposes_page() {
        let mut state = StaticPageState::new("root-1", NovelPageMeta::default());
        assert_eq!(state.root_page_id(), "root-1");
        assert!(!state.is_root_document());

        state.novel_page_mut().title = Some("Chronicle".to_string());
        assert_eq!(state.novel_page().title.as_deref(), Some("Chronicle"));
    }

    #[test]
    fn test_vec_sink_collects() {
        let mut sink: Box<Vec<OutboundEvent>> = Box::default();
        sink.emit(OutboundEvent::new(
            EventName::ShowAdvertising,
            Target::PageTree,
            json!({"customId": "p"}),
        ));
        assert_eq!(sink.len(), 1);
    }
}

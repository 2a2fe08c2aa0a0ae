//! Per-cycle strategy decisions and the sticky flag reducer

use crate::coerce::to_number;
use crate::config::{EngineConfig, ResetPolicy};
use crate::types::NavigationContext;
use serde::{Deserialize, Serialize};

/// Decision derived fresh from one navigation snapshot
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrategyDecision {
    /// Context entered from the root (search) page
    pub from_search: bool,
    /// Reader hit the last page, a page ad is due
    pub page_ad: bool,
    /// Next page is the brand campaign page, a global ad is due
    pub global_ad: bool,
}

impl StrategyDecision {
    pub fn derive(ctx: &NavigationContext, config: &EngineConfig) -> Self {
        Self {
            from_search: ctx.is_root_page,
            page_ad: ctx.is_last_page,
            global_ad: to_number(ctx.next_page.page.as_ref()) == config.brand_campaign_page,
        }
    }
}

/// Flags the engine carries between cycles
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecisionState {
    pub show_global_ad: bool,
    pub show_page_ad: bool,
    pub from_search: bool,
    /// A custom-content-ready signal arrived while a page ad was pending
    pub ad_custom_ready: bool,
}

impl DecisionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge a fresh decision into the carried flags.
    ///
    /// `from_search` is always replaced and `show_page_ad` only ever latches.
    /// `show_global_ad` latches under [`ResetPolicy::Sticky`] and follows the
    /// decision under [`ResetPolicy::PerCycle`].
    pub fn reduce(self, decision: StrategyDecision, policy: ResetPolicy) -> Self {
        let show_global_ad = match policy {
            ResetPolicy::Sticky => self.show_global_ad || decision.global_ad,
            ResetPolicy::PerCycle => decision.global_ad,
        };
        Self {
            show_global_ad,
            show_page_ad: self.show_page_ad || decision.page_ad,
            from_search: decision.from_search,
            ad_custom_ready: self.ad_custom_ready,
        }
    }

    /// Value carried as `fromSearch` on the envelope
    pub fn from_search_flag(&self) -> Option<u8> {
        self.from_search.then_some(1)
    }
}

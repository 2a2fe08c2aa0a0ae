//! Ad strategy decisions for a paginated novel reader
//!
//! The engine observes navigation and readiness signals, derives whether a
//! page ad or a global ad is due, assembles the novel data payload, and
//! emits control events to the ad subsystem.

mod bus;
mod coerce;
mod collab;
mod config;
mod decision;
mod engine;
mod event;
mod payload;
mod types;

pub use bus::{attach, SignalBus, Subscription};
pub use coerce::to_number;
pub use collab::{EventSink, PageStateProvider, StaticPageState, StrategyCache};
pub use config::{ConfigError, EngineConfig, ResetPolicy};
pub use decision::{DecisionState, StrategyDecision};
pub use engine::AdStrategyEngine;
pub use event::{EventName, OutboundEvent, Signal, SignalKind, Target};
pub use payload::build_novel_data;
pub use types::{
    AdsCache, CurrentPage, Envelope, NavigationContext, NextPage, NovelData, NovelPageMeta, SlotId,
};

//! Inbound signals and outbound control events

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;

/// Kinds of inbound signals the engine subscribes to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SignalKind {
    #[serde(rename = "previous-page-navigated")]
    PreviousPage,
    #[serde(rename = "next-page-navigated")]
    NextPage,
    #[serde(rename = "current-page-ready")]
    CurrentPageReady,
    #[serde(rename = "custom-content-ready")]
    CustomReady,
    #[serde(rename = "ad-campaign-data-ready")]
    AdDataReady,
}

impl SignalKind {
    pub const ALL: [SignalKind; 5] = [
        SignalKind::PreviousPage,
        SignalKind::NextPage,
        SignalKind::CurrentPageReady,
        SignalKind::CustomReady,
        SignalKind::AdDataReady,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SignalKind::PreviousPage => "previous-page-navigated",
            SignalKind::NextPage => "next-page-navigated",
            SignalKind::CurrentPageReady => "current-page-ready",
            SignalKind::CustomReady => "custom-content-ready",
            SignalKind::AdDataReady => "ad-campaign-data-ready",
        }
    }
}

impl fmt::Display for SignalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Signal delivered by the host event system
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "detail")]
pub enum Signal {
    #[serde(rename = "previous-page-navigated")]
    PreviousPage,
    #[serde(rename = "next-page-navigated")]
    NextPage,
    #[serde(rename = "current-page-ready")]
    CurrentPageReady,
    #[serde(rename = "custom-content-ready")]
    CustomReady,
    /// Campaign data arrives as an array-like detail; the first entry is used
    #[serde(rename = "ad-campaign-data-ready")]
    AdDataReady(Vec<Value>),
}

/// Wire shape accepted from hosts; `detail` may be absent, null, or not an array
#[derive(Deserialize)]
struct RawSignal {
    kind: SignalKind,
    #[serde(default)]
    detail: Option<Value>,
}

impl<'de> Deserialize<'de> for Signal {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = RawSignal::deserialize(deserializer)?;
        Ok(match raw.kind {
            SignalKind::PreviousPage => Signal::PreviousPage,
            SignalKind::NextPage => Signal::NextPage,
            SignalKind::CurrentPageReady => Signal::CurrentPageReady,
            SignalKind::CustomReady => Signal::CustomReady,
            SignalKind::AdDataReady => match raw.detail {
                Some(Value::Array(items)) => Signal::AdDataReady(items),
                _ => Signal::AdDataReady(Vec::new()),
            },
        })
    }
}

impl Signal {
    pub fn kind(&self) -> SignalKind {
        match self {
            Signal::PreviousPage => SignalKind::PreviousPage,
            Signal::NextPage => SignalKind::NextPage,
            Signal::CurrentPageReady => SignalKind::CurrentPageReady,
            Signal::CustomReady => SignalKind::CustomReady,
            Signal::AdDataReady(_) => SignalKind::AdDataReady,
        }
    }
}

/// Names of the control events emitted to the ad subsystem
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventName {
    #[serde(rename = "showAdvertising")]
    ShowAdvertising,
    #[serde(rename = "controlCustomFetch")]
    ControlCustomFetch,
    #[serde(rename = "showAdStategyCache")]
    ShowAdStrategyCache,
}

impl EventName {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventName::ShowAdvertising => "showAdvertising",
            EventName::ControlCustomFetch => "controlCustomFetch",
            EventName::ShowAdStrategyCache => "showAdStategyCache",
        }
    }
}

impl fmt::Display for EventName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where an outbound event is delivered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Target {
    /// The top-level host document, outside the page tree
    HostDocument,
    /// Broadcast from the root to every page of the tree
    PageTree,
    /// Only the current page document
    CurrentPage,
}

impl Target {
    pub fn as_str(&self) -> &'static str {
        match self {
            Target::HostDocument => "host-document",
            Target::PageTree => "page-tree",
            Target::CurrentPage => "current-page",
        }
    }
}

/// A control event handed to the rendering and transport layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutboundEvent {
    pub name: EventName,
    pub target: Target,
    pub data: Value,
}

impl OutboundEvent {
    pub fn new(name: EventName, target: Target, data: Value) -> Self {
        Self { name, target, data }
    }
}

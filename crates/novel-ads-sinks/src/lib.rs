//! Outbound event sinks for the ad strategy engine

pub mod jsonl;
pub mod recording;
pub mod registry;
pub mod tracing_sink;

pub use jsonl::JsonlSink;
pub use recording::RecordingSink;
pub use registry::SinkRegistry;
pub use tracing_sink::TracingSink;

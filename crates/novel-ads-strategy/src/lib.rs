//! Schema-driven strategy cache for campaign data

mod schema;

pub use schema::{mark_shown, CampaignData, SchemaStrategyCache, DEFAULT_PAGE_TYPE};

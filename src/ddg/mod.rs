//! DuckDuckGo Instant Answer API: client, response model, and answer-field selection.

pub mod client;
pub mod types;

pub use client::{DdgError, DuckDuckGoClient, KnowledgeBackend};
pub use types::{Finding, QueryResult};

//! One-sentence answers to factual questions from the DuckDuckGo Instant Answer API.

pub mod answer;
pub mod config;
pub mod ddg;
pub mod locale;
pub mod skill;
pub mod translate;

pub const USER_AGENT: &str = concat!("ddg-answer/", env!("CARGO_PKG_VERSION"));

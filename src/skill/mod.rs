//! Common-query provider: the contract a voice-assistant host sees.

mod matcher;

pub use matcher::QueryMatcher;

use std::sync::Arc;

use tracing::{debug, info};

use crate::answer::AnswerSynthesizer;
use crate::config::SessionConfig;
use crate::ddg::{DdgError, KnowledgeBackend};
use crate::locale::LocaleWords;
use crate::translate::{TranslateError, Translator};

#[derive(Debug, thiserror::Error)]
pub enum SkillError {
    #[error("{0}")]
    Backend(#[from] DdgError),

    #[error("translation failed: {0}")]
    Translate(#[from] TranslateError),
}

/// How confident a provider is, compared by the host across competing skills.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum MatchLevel {
    General,
    Category,
    Exact,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryMatch {
    /// The query exactly as the host passed it.
    pub query: String,
    pub level: MatchLevel,
    pub answer: String,
}

/// Provider interface for the host's common-query round.
pub trait CommonQuerySkill {
    /// Answers `query`, `Ok(None)` to decline.
    async fn match_query_phrase(&self, query: &str) -> Result<Option<QueryMatch>, SkillError>;

    /// Called when the host tears the session down.
    fn stop(&self) {}
}

pub struct DuckDuckGoSkill<B, T> {
    matcher: QueryMatcher,
    synthesizer: AnswerSynthesizer<B, T>,
}

impl<B: KnowledgeBackend, T: Translator> DuckDuckGoSkill<B, T> {
    pub fn new(backend: B, translator: T, session: SessionConfig, words: LocaleWords) -> Self {
        info!(lang = %session.lang, autotranslate = session.autotranslate, "duckduckgo skill ready");
        let words = Arc::new(words);
        Self {
            matcher: QueryMatcher::new(Arc::clone(&words)),
            synthesizer: AnswerSynthesizer::new(backend, translator, session, words),
        }
    }
}

impl<B: KnowledgeBackend, T: Translator> CommonQuerySkill for DuckDuckGoSkill<B, T> {
    async fn match_query_phrase(&self, query: &str) -> Result<Option<QueryMatch>, SkillError> {
        let Some(rest) = self.matcher.strip_question(query) else {
            debug!(query, "no question prefix");
            return Ok(None);
        };

        let answer = self
            .synthesizer
            .respond(rest)
            .await?
            .filter(|answer| !answer.is_empty());

        Ok(answer.map(|answer| QueryMatch {
            query: query.to_string(),
            level: MatchLevel::Category,
            answer,
        }))
    }
}

//! Turns a backend result into a single spoken-style sentence.

mod related;
mod sentences;

pub use related::format_related;
pub use sentences::split_sentences;

use std::sync::Arc;

use tracing::debug;

use crate::config::SessionConfig;
use crate::ddg::{Finding, KnowledgeBackend};
use crate::locale::LocaleWords;
use crate::skill::SkillError;
use crate::translate::Translator;

const BACKEND_LANG: &str = "en";

pub struct AnswerSynthesizer<B, T> {
    backend: B,
    translator: T,
    session: SessionConfig,
    words: Arc<LocaleWords>,
}

impl<B: KnowledgeBackend, T: Translator> AnswerSynthesizer<B, T> {
    pub fn new(backend: B, translator: T, session: SessionConfig, words: Arc<LocaleWords>) -> Self {
        Self {
            backend,
            translator,
            session,
            words,
        }
    }

    /// Answers the noun phrase left after the question prefix, or `None`
    /// when the backend has nothing usable.
    pub async fn respond(&self, query: &str) -> Result<Option<String>, SkillError> {
        if query.is_empty() {
            return Ok(None);
        }

        let search_query = if self.session.translates() {
            let translated = self
                .translator
                .translate(query, self.session.lang.primary(), BACKEND_LANG)
                .await?;
            debug!(%translated, "query translated");
            translated
        } else {
            query.to_string()
        };

        debug!(query, %search_query, "querying backend");
        let result = self.backend.query(&search_query).await?;
        debug!(kind = ?result.kind, answer_type = %result.answer_type, "backend result");

        let answer = match result.finding() {
            Some(Finding::Answer(text)) => {
                debug!(answer = text, "using direct answer");
                let text = self.to_session_lang(text).await?;
                format!("{query}{}{text}.", self.words.is_verb)
            }
            Some(Finding::Abstract(text)) => {
                debug!(
                    abstract_text = text,
                    source = %result.abstract_source,
                    url = %result.abstract_url,
                    "using abstract"
                );
                let first = first_sentence(text);
                if !is_sayable(&first) {
                    debug!("abstract has nothing to say");
                    return Ok(None);
                }
                self.to_session_lang(&first).await?
            }
            Some(Finding::Related(text)) => {
                let formatted = format_related(&first_sentence(text), query, &self.words);
                debug!(related = %formatted, "using related topic");
                if !is_sayable(&formatted) {
                    debug!("related topic trimmed to nothing");
                    return Ok(None);
                }
                self.to_session_lang(&formatted).await?
            }
            None => {
                debug!("no usable field in result");
                return Ok(None);
            }
        };
        Ok(Some(answer))
    }

    async fn to_session_lang(&self, text: &str) -> Result<String, SkillError> {
        if !self.session.translates() {
            return Ok(text.to_string());
        }
        let translated = self
            .translator
            .translate(text, BACKEND_LANG, self.session.lang.primary())
            .await?;
        Ok(translated)
    }
}

fn first_sentence(text: &str) -> String {
    split_sentences(text).swap_remove(0)
}

/// Bare punctuation or whitespace is not an answer.
fn is_sayable(answer: &str) -> bool {
    answer.chars().any(char::is_alphanumeric)
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Mutex;

    use crate::ddg::{DdgError, KnowledgeBackend, QueryResult};
    use crate::translate::{TranslateError, Translator};

    /// Serves one canned JSON body and records every query.
    pub struct StubBackend {
        body: serde_json::Value,
        pub queries: Mutex<Vec<String>>,
    }

    impl StubBackend {
        pub fn new(body: serde_json::Value) -> Self {
            Self {
                body,
                queries: Mutex::new(Vec::new()),
            }
        }

        pub fn calls(&self) -> usize {
            self.queries.lock().unwrap().len()
        }
    }

    impl KnowledgeBackend for &StubBackend {
        async fn query(&self, text: &str) -> Result<QueryResult, DdgError> {
            self.queries.lock().unwrap().push(text.to_string());
            Ok(serde_json::from_value(self.body.clone())?)
        }
    }

    /// Tags text with its target language: "hallo" de->en becomes "[en]hallo".
    #[derive(Default)]
    pub struct TaggingTranslator {
        pub calls: Mutex<Vec<(String, String, String)>>,
    }

    impl TaggingTranslator {
        pub fn calls(&self) -> usize {
            self.calls.lock().unwrap().len()
        }
    }

    impl Translator for &TaggingTranslator {
        async fn translate(
            &self,
            text: &str,
            from: &str,
            to: &str,
        ) -> Result<String, TranslateError> {
            self.calls
                .lock()
                .unwrap()
                .push((text.to_string(), from.to_string(), to.to_string()));
            Ok(format!("[{to}]{text}"))
        }
    }

    pub struct FailingTranslator;

    impl Translator for FailingTranslator {
        async fn translate(&self, _: &str, _: &str, _: &str) -> Result<String, TranslateError> {
            Err(TranslateError::Status(503))
        }
    }
}

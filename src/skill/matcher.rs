use std::sync::Arc;

use crate::locale::LocaleWords;

/// Recognizes "<question word><question verb> [article ]" at the start of a query.
pub struct QueryMatcher {
    words: Arc<LocaleWords>,
}

impl QueryMatcher {
    pub fn new(words: Arc<LocaleWords>) -> Self {
        Self { words }
    }

    /// Returns the text after the first matching question prefix.
    ///
    /// Candidates are tried question word first, then verb, then article,
    /// with "no article" tried last for each verb. Matching is a
    /// case-sensitive prefix test.
    pub fn strip_question<'q>(&self, query: &'q str) -> Option<&'q str> {
        self.prefixes()
            .find_map(|prefix| query.strip_prefix(prefix.as_str()))
    }

    fn prefixes(&self) -> impl Iterator<Item = String> + '_ {
        let words = &self.words;
        words.question_words.iter().flat_map(move |word| {
            words.question_verbs.iter().flat_map(move |verb| {
                words
                    .articles
                    .iter()
                    .map(|article| format!("{article} "))
                    .chain(std::iter::once(String::new()))
                    .map(move |article| format!("{word}{verb} {article}"))
            })
        })
    }
}

use serde::Deserialize;
use serde_json::Value;

/// Body of an Instant Answer API response. Only the fields the answer
/// pipeline reads are modelled; everything else is ignored.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct QueryResult {
    #[serde(rename = "Type")]
    pub kind: ResultKind,
    /// Usually a string; some answer types (calculator, colour codes) send objects.
    pub answer: Value,
    pub answer_type: String,
    pub heading: String,
    pub abstract_text: String,
    pub abstract_source: String,
    #[serde(rename = "AbstractURL")]
    pub abstract_url: String,
    pub related_topics: Vec<RelatedTopic>,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum ResultKind {
    #[serde(rename = "A")]
    Article,
    #[serde(rename = "D")]
    Disambiguation,
    #[serde(rename = "C")]
    Category,
    #[serde(rename = "N")]
    Name,
    #[serde(rename = "E")]
    Exclusive,
    #[default]
    #[serde(other)]
    Nothing,
}

/// Entry of `RelatedTopics`: either a topic blurb or a named group of topics.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum RelatedTopic {
    Topic {
        #[serde(rename = "Text")]
        text: String,
        #[serde(rename = "FirstURL", default)]
        first_url: String,
    },
    Group {
        #[serde(rename = "Name")]
        name: String,
        #[serde(rename = "Topics", default)]
        topics: Vec<RelatedTopic>,
    },
}

impl RelatedTopic {
    /// Blurb of a topic entry; groups carry no text of their own.
    pub fn text(&self) -> &str {
        match self {
            RelatedTopic::Topic { text, .. } => text,
            RelatedTopic::Group { .. } => "",
        }
    }
}

/// The field of a [`QueryResult`] an answer is built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Finding<'a> {
    /// Instant or computed answer.
    Answer(&'a str),
    /// Encyclopedic summary.
    Abstract(&'a str),
    /// First related-topic blurb.
    Related(&'a str),
}

type Extractor = for<'a> fn(&'a QueryResult) -> Option<Finding<'a>>;

/// Tried in order; the first hit wins.
const EXTRACTORS: [Extractor; 3] = [direct_answer, abstract_text, related_topic];

/// Opaque hash payloads ("md5 of ...") are not sayable answers.
const HASH_MARKER: &str = "HASH";

fn direct_answer(result: &QueryResult) -> Option<Finding<'_>> {
    result
        .answer
        .as_str()
        .filter(|text| !text.is_empty() && !text.contains(HASH_MARKER))
        .map(Finding::Answer)
}

fn abstract_text(result: &QueryResult) -> Option<Finding<'_>> {
    Some(result.abstract_text.as_str())
        .filter(|text| !text.is_empty())
        .map(Finding::Abstract)
}

fn related_topic(result: &QueryResult) -> Option<Finding<'_>> {
    result
        .related_topics
        .first()
        .map(RelatedTopic::text)
        .filter(|text| !text.is_empty())
        .map(Finding::Related)
}

impl QueryResult {
    pub fn finding(&self) -> Option<Finding<'_>> {
        EXTRACTORS.iter().find_map(|extract| extract(self))
    }
}

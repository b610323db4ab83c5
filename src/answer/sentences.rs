use std::sync::LazyLock;

use regex::Regex;

/// Stand-in for a period that must not end a sentence.
const PROTECTED_PERIOD: &str = "~.~";

/// A lone character followed by a period, as in "Douglas N. Adams".
static INITIAL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r" ([^ .])\.").unwrap());

/// Splits a run of sentences into separate ones.
///
/// Initials and "Inc." are kept intact; any other abbreviation ends a
/// sentence. Terminal `!`/`?` before a space become periods and are lost,
/// and one trailing `.!?` is dropped from the last sentence. Always returns
/// at least one element.
pub fn split_sentences(text: &str) -> Vec<String> {
    let protected = INITIAL.replace_all(text, " ${1}~.~");
    let protected = protected
        .replace("Inc.", "Inc~.~")
        .replace("! ", ". ")
        .replace("? ", ". ");

    let mut sentences: Vec<String> = protected
        .split(". ")
        .map(|s| s.replace(PROTECTED_PERIOD, "."))
        .collect();

    if let Some(last) = sentences.last_mut()
        && last.ends_with(['.', '!', '?'])
    {
        last.pop();
    }
    sentences
}

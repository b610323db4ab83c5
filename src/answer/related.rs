use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::locale::LocaleWords;

static CATEGORY: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\(([a-z ]+)\)").unwrap());

const EMPTY_CATEGORY: &str = "()";

/// Turns a related-topic blurb ("Name (category) - description, participle
/// phrase..") into a standalone sentence about `query`.
pub fn format_related(text: &str, query: &str, words: &LocaleWords) -> String {
    debug!(blurb = text, "formatting related topic");
    let mut ans = text.to_string();

    if ans.ends_with("..") {
        ans = trim_truncated_tail(&ans, words);
    }

    // Category tags near the start describe the subject; later ones are incidental.
    let mut category = None;
    if let Some(group) = CATEGORY.captures(&ans).and_then(|c| c.get(1)) {
        let offset = ans[..group.start()].chars().count();
        if offset <= 2 * query.chars().count() {
            let name = group.as_str().to_string();
            ans = ans.replace(&format!("({name})"), EMPTY_CATEGORY);
            category = Some(name);
        }
    }

    if let Some(joined) = join_with_copula(&ans, query, words) {
        ans = joined;
    }

    if let Some(category) = category {
        ans = ans.replace(EMPTY_CATEGORY, &format!("{}{category}", words.in_word));
    }

    if !ans.ends_with(['.', '?', '!']) {
        ans.push('.');
    }
    ans
}

/// Drops the dangling clause of a blurb cut off with "..".
fn trim_truncated_tail(text: &str, words: &LocaleWords) -> String {
    let stripped = text.trim_end_matches('.');

    let mut ans = match stripped.rsplit_once(", ") {
        Some((head, last)) if starts_with_start_word(last, words) => head.to_string(),
        Some(_) => stripped.to_string(),
        None if starts_with_start_word(stripped, words) => String::new(),
        None => stripped.to_string(),
    };

    while let Some((head, last)) = ans.rsplit_once(' ') {
        if !(words.is_start_word(last) || last.ends_with("ing")) {
            break;
        }
        let keep = head.len();
        ans.truncate(keep);
    }
    ans
}

fn starts_with_start_word(phrase: &str, words: &LocaleWords) -> bool {
    phrase
        .split_whitespace()
        .next()
        .is_some_and(|first| words.is_start_word(first))
}

/// Rewrites "Name A description" as "Name is a description" when a
/// title-cased article appears close enough to the start.
fn join_with_copula(text: &str, query: &str, words: &LocaleWords) -> Option<String> {
    let tokens: Vec<&str> = text.split_whitespace().collect();
    let limit = 2 * query.split_whitespace().count();

    for article in &words.articles {
        let article = title_case(article);
        let Some(index) = tokens.iter().position(|t| *t == article) else {
            continue;
        };
        if index > limit {
            continue;
        }
        let (name, desc) = tokens.split_at(index);
        let mut desc: Vec<String> = desc.iter().map(|s| s.to_string()).collect();
        desc[0] = desc[0].to_lowercase();
        return Some(format!("{}{}{}", name.join(" "), words.is_verb, desc.join(" ")));
    }
    None
}

/// Upper-cases the first letter of every alphabetic run, lower-cases the rest.
fn title_case(word: &str) -> String {
    let mut out = String::with_capacity(word.len());
    let mut at_start = true;
    for c in word.chars() {
        if c.is_alphabetic() {
            if at_start {
                out.extend(c.to_uppercase());
            } else {
                out.extend(c.to_lowercase());
            }
            at_start = false;
        } else {
            out.push(c);
            at_start = true;
        }
    }
    out
}

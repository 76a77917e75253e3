//! Turning a concordance response into flat result rows.

use crate::cite;
use crate::output::ResultRow;
use crate::query::SearchRequest;
use crate::response::{Hit, QueryResponse};
use itertools::Itertools;
use regex::Regex;
use std::sync::LazyLock;

static TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]+>").unwrap());
static HIGHLIGHT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)<span[^>]*class="[^"]*highlight[^"]*"[^>]*>(.*?)</span>"#).unwrap()
});
static WS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());
static PUNCT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+([,.;:?!])").unwrap());
static OPEN_QUOTE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new("“\\s+").unwrap());

/// Strip markup from a context fragment and tidy the remaining text:
/// entities decoded, whitespace collapsed and trimmed, spaces removed
/// before closing punctuation and after an opening curly quote.
///
/// Pure string transformation, idempotent on its own output.
pub fn clean_context(context: &str) -> String {
    let text = TAG_RE.replace_all(context, " ");
    let text = decode_entities(&text);
    let text = WS_RE.replace_all(&text, " ");
    let text = PUNCT_RE.replace_all(&text, "$1");
    let text = OPEN_QUOTE_RE.replace_all(&text, "“");
    text.trim().to_owned()
}

/// Surface forms of the tokens wrapped in `<span class="highlight">` in a
/// hit's context, in document order. Nested tags inside a span are
/// stripped; spans that clean down to nothing are skipped.
pub fn highlight_tokens(context: &str) -> Vec<String> {
    let mut tokens = vec![];
    for cap in HIGHLIGHT_RE.captures_iter(context) {
        let inner = TAG_RE.replace_all(&cap[1], " ");
        let text = decode_entities(&inner);
        let text = WS_RE.replace_all(&text, " ");
        let text = text.trim();
        if !text.is_empty() {
            tokens.push(text.to_owned());
        }
    }
    tokens
}

/// Decode the HTML entities the service emits in context fragments: the
/// common named ones plus numeric character references. Anything
/// unrecognized is left as written.
fn decode_entities(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(pos) = rest.find('&') {
        out.push_str(&rest[..pos]);
        rest = &rest[pos..];
        // An entity is at most ~8 chars between '&' and ';'
        let end = rest
            .char_indices()
            .take(10)
            .find(|&(_, c)| c == ';')
            .map(|(i, _)| i);
        let decoded = match end {
            Some(end) if end > 1 => decode_entity(&rest[1..end]),
            _ => None,
        };
        match (decoded, end) {
            (Some(c), Some(end)) => {
                out.push(c);
                rest = &rest[end + 1..];
            }
            _ => {
                out.push('&');
                rest = &rest[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

fn decode_entity(entity: &str) -> Option<char> {
    match entity {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        "nbsp" => Some(' '),
        _ => {
            let code = if let Some(hex) = entity
                .strip_prefix("#x")
                .or_else(|| entity.strip_prefix("#X"))
            {
                u32::from_str_radix(hex, 16).ok()?
            } else if let Some(dec) = entity.strip_prefix('#') {
                dec.parse().ok()?
            } else {
                return None;
            };
            char::from_u32(code)
        }
    }
}

/// Flatten a response into result rows, one per highlighted token, in the
/// service's hit order.
///
/// The sequence is lazy over hits. A hit whose context carries no highlight
/// span still yields one row with an empty token, so no cited passage is
/// silently dropped. An empty result set yields an empty sequence.
pub fn rows<'a>(
    response: &'a QueryResponse,
    request: &SearchRequest,
    nav_url: &'a str,
) -> impl Iterator<Item = ResultRow> + 'a {
    let lemma = request.lemma_column();
    let language = request.language.to_string();
    response
        .results
        .iter()
        .flat_map(move |hit| hit_rows(hit, &lemma, &language, nav_url))
}

fn hit_rows(hit: &Hit, lemma: &str, language: &str, nav_url: &str) -> Vec<ResultRow> {
    let id = cite::unique_id(hit);
    let sentence = clean_context(&hit.context);
    let author = hit.metadata_str("author");
    let title = hit.metadata_str("title");
    let passage = cite::passage_url(nav_url, &hit.citation_links);
    let mut tokens = highlight_tokens(&hit.context);
    if tokens.is_empty() {
        tokens.push(String::new());
    }
    tokens
        .into_iter()
        .map(|token| ResultRow {
            id: id.clone(),
            token,
            lemma: lemma.to_owned(),
            sentence: sentence.clone(),
            author: author.clone(),
            title: title.clone(),
            language: language.to_owned(),
            passage: passage.clone(),
        })
        .collect_vec()
}

//! Search requests and the query parameters of the PhiloLogic JSON API.

use crate::errors::{self, Result};
use clap::ValueEnum;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which corpus to search.
///
/// The display form ("Latin", "Greek") doubles as the language's path
/// segment in the service's URLs and as the value of the `language` output
/// column.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize, ValueEnum)]
#[value(rename_all = "PascalCase")]
pub enum Language {
    Latin,
    Greek,
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Language::Latin => write!(f, "Latin"),
            Language::Greek => write!(f, "Greek"),
        }
    }
}

/// One concordance search against a single corpus.
///
/// Immutable once constructed; `author` and `title` are passed to the
/// service verbatim, with the service's own matching semantics.
#[derive(Clone, Debug)]
pub struct SearchRequest {
    pub lemmas: Vec<String>,
    pub author: Option<String>,
    pub title: Option<String>,
    pub language: Language,
}

impl SearchRequest {
    /// The value of the LEMMA output column.
    ///
    /// One queried lemma is recorded verbatim; several are joined with `;`
    /// in query order, on every row, since the service does not report
    /// which of them matched a given token.
    pub fn lemma_column(&self) -> String {
        self.lemmas.iter().join(";")
    }
}

/// Result paging window for one query.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Window {
    pub start: u64,
    pub end: u64,
}

/// The window of the initial probe query, which only reads the result count.
pub const PROBE: Window = Window { start: 0, end: 0 };

/// Build the query parameters for the PhiloLogic JSON API.
///
/// Lemmas are combined as a logical OR (`q=lemma:a | lemma:b`). Fails with
/// [crate::errors::InvalidRequest] if the request carries no lemmas.
pub fn build_params(request: &SearchRequest, window: Window) -> Result<Vec<(String, String)>> {
    if request.lemmas.is_empty() {
        return Err(errors::invalid_request_ref("at least one lemma is required"));
    }
    let q = request
        .lemmas
        .iter()
        .map(|lemma| format!("lemma:{lemma}"))
        .join(" | ");
    let mut params = vec![
        ("report".to_owned(), "concordance".to_owned()),
        ("method".to_owned(), "proxy".to_owned()),
        ("colloc_filter_choice".to_owned(), "frequency".to_owned()),
        ("q".to_owned(), q),
        ("start".to_owned(), window.start.to_string()),
        ("end".to_owned(), window.end.to_string()),
        ("direction".to_owned(), String::new()),
        ("metadata_sorting_field".to_owned(), String::new()),
        ("format".to_owned(), "json".to_owned()),
    ];
    if let Some(author) = &request.author {
        params.push(("author".to_owned(), author.clone()));
    }
    if let Some(title) = &request.title {
        params.push(("title".to_owned(), title.clone()));
    }
    Ok(params)
}

#[cfg(test)]
mod test {
    use super::*;

    fn request(lemmas: &[&str]) -> SearchRequest {
        SearchRequest {
            lemmas: lemmas.iter().map(|&s| s.to_owned()).collect(),
            author: None,
            title: None,
            language: Language::Latin,
        }
    }

    fn param<'a>(params: &'a [(String, String)], key: &str) -> Option<&'a str> {
        params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    #[test]
    fn single_lemma() {
        let params = build_params(&request(&["inspicio"]), PROBE).unwrap();
        assert_eq!(param(&params, "q"), Some("lemma:inspicio"));
        assert_eq!(param(&params, "report"), Some("concordance"));
        assert_eq!(param(&params, "format"), Some("json"));
        assert_eq!(param(&params, "start"), Some("0"));
        assert_eq!(param(&params, "end"), Some("0"));
        assert_eq!(param(&params, "author"), None);
        assert_eq!(param(&params, "title"), None);
    }

    #[test]
    fn multiple_lemmas_are_ored() {
        let params = build_params(&request(&["inspicio", "invideo"]), PROBE).unwrap();
        assert_eq!(param(&params, "q"), Some("lemma:inspicio | lemma:invideo"));
    }

    #[test]
    fn author_and_title_pass_through() {
        let mut req = request(&["aspicio"]);
        req.author = Some("Caesar".to_owned());
        req.title = Some("Gallic War".to_owned());
        let params = build_params(&req, Window { start: 1, end: 57 }).unwrap();
        assert_eq!(param(&params, "author"), Some("Caesar"));
        assert_eq!(param(&params, "title"), Some("Gallic War"));
        assert_eq!(param(&params, "start"), Some("1"));
        assert_eq!(param(&params, "end"), Some("57"));
    }

    #[test]
    fn no_lemmas_is_an_error() {
        let e = build_params(&request(&[]), PROBE).unwrap_err();
        assert!(e.to_string().contains("invalid request"));
    }

    #[test]
    fn lemma_column_joins_with_semicolon() {
        assert_eq!(request(&["inspicio"]).lemma_column(), "inspicio");
        assert_eq!(
            request(&["inspicio", "invideo"]).lemma_column(),
            "inspicio;invideo"
        );
    }
}

//! Citation handling: stable row identifiers and passage deep links.

use crate::response::{Hit, scalar_string};
use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;
use url::Url;

static BYTE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"byte=(\d+)").unwrap());

/// Keys of `citation_links`, in preference order.
const LINK_KEYS: [&str; 3] = ["para", "line", "doc"];

/// Build the row identifier `doc_id.div1.div2.div3.byte_DocLabel` from a
/// hit's citation structure, e.g. `77.5.14.2.636137_Caes.Gal.`.
///
/// The id is the dot-joined concatenation of the document id (falling back
/// to the first element of `philo_id`), up to three division labels, and
/// the byte offset taken from the citation hrefs (falling back to
/// `citation_links`), suffixed with the document's citation label with its
/// whitespace removed. Pure and stable; distinct cited positions yield
/// distinct ids, and every highlighted token of one hit shares the hit's id.
pub fn unique_id(hit: &Hit) -> String {
    let mut doc_id = hit.metadata_str("philo_doc_id");
    if doc_id.is_empty() {
        if let Some(first) = hit.philo_id.first() {
            doc_id = scalar_string(first);
        }
    }

    let mut doc_label = String::new();
    let mut div_labels: Vec<String> = vec![];
    let mut byte = String::new();

    for cit in &hit.citation {
        let object_type = cit.object_type.to_lowercase();
        let label = scalar_string(&cit.label);
        if object_type == "doc" && doc_label.is_empty() && !label.is_empty() {
            doc_label = label.clone();
        }
        if object_type.starts_with("div") && !label.is_empty() {
            div_labels.push(label);
        }
        if byte.is_empty() {
            if let Some(cap) = BYTE_RE.captures(&cit.href) {
                byte = cap[1].to_owned();
            }
        }
    }
    // Only keep the structural levels, e.g. 5.14.2
    div_labels.truncate(3);

    if byte.is_empty() {
        for key in LINK_KEYS {
            if let Some(href) = hit.citation_links.get(key) {
                if let Some(cap) = BYTE_RE.captures(href) {
                    byte = cap[1].to_owned();
                    break;
                }
            }
        }
    }

    let mut parts = vec![];
    if !doc_id.is_empty() {
        parts.push(doc_id);
    }
    parts.extend(div_labels);
    if !byte.is_empty() {
        parts.push(byte);
    }
    let base = parts.join(".");

    if doc_label.is_empty() {
        base
    } else {
        // "Caes. Gal." -> "Caes.Gal."
        let label: String = doc_label.split_whitespace().collect();
        if base.is_empty() {
            label
        } else {
            format!("{base}_{label}")
        }
    }
}

/// Build a browser-ready deep link to the cited passage.
///
/// Prefers the paragraph link, then line, then document. When the href
/// carries a `?byte=` query the path is normalized to end in `/` before
/// it, and relative hrefs are resolved against the corpus navigation root.
/// Empty string when the hit has no usable link.
pub fn passage_url(nav_url: &str, citation_links: &HashMap<String, String>) -> String {
    let raw = LINK_KEYS
        .iter()
        .find_map(|&key| citation_links.get(key).filter(|href| !href.is_empty()));
    let Some(raw) = raw else {
        return String::new();
    };
    let raw = match raw.split_once('?') {
        Some((path, query)) if !path.ends_with('/') => format!("{path}/?{query}"),
        _ => raw.clone(),
    };
    match Url::parse(nav_url).and_then(|base| base.join(&raw)) {
        Ok(url) => url.to_string(),
        Err(_) => raw,
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use serde_json::json;

    const NAV: &str = "https://artflsrv03.uchicago.edu/philologic4/Latin/";

    fn hit(value: serde_json::Value) -> Hit {
        serde_json::from_value(value).unwrap()
    }

    fn caesar_hit() -> Hit {
        hit(json!({
            "metadata_fields": { "philo_doc_id": "77" },
            "citation": [
                { "object_type": "doc", "label": "Caes. Gal.", "href": "" },
                { "object_type": "div1", "label": "5", "href": "" },
                { "object_type": "div2", "label": "14", "href": "" },
                { "object_type": "div3", "label": "2",
                  "href": "./navigate/77/5/14/2?byte=636137" }
            ]
        }))
    }

    #[test]
    fn id_format() {
        assert_eq!(unique_id(&caesar_hit()), "77.5.14.2.636137_Caes.Gal.");
    }

    #[test]
    fn id_is_stable() {
        assert_eq!(unique_id(&caesar_hit()), unique_id(&caesar_hit()));
    }

    #[test]
    fn doc_id_falls_back_to_philo_id() {
        let h = hit(json!({
            "philo_id": [42, 1, 0],
            "citation": [{ "object_type": "div1", "label": "1", "href": "" }]
        }));
        assert_eq!(unique_id(&h), "42.1");
    }

    #[test]
    fn byte_falls_back_to_citation_links() {
        let h = hit(json!({
            "metadata_fields": { "philo_doc_id": "9" },
            "citation": [{ "object_type": "div1", "label": "3", "href": "" }],
            "citation_links": { "para": "./navigate/9/3?byte=100" }
        }));
        assert_eq!(unique_id(&h), "9.3.100");
    }

    #[test]
    fn distinct_positions_get_distinct_ids() {
        let positions = [("77", "5", "636137"), ("77", "6", "636137"), ("78", "5", "1")];
        let ids: Vec<String> = positions
            .iter()
            .map(|(doc, div, byte)| {
                unique_id(&hit(json!({
                    "metadata_fields": { "philo_doc_id": doc },
                    "citation": [{
                        "object_type": "div1",
                        "label": div,
                        "href": format!("./navigate/{doc}/{div}?byte={byte}")
                    }]
                })))
            })
            .collect();
        assert_ne!(ids[0], ids[1]);
        assert_ne!(ids[0], ids[2]);
        assert_ne!(ids[1], ids[2]);
    }

    #[test]
    fn label_only_hit() {
        let h = hit(json!({
            "citation": [{ "object_type": "doc", "label": "Verg. A.", "href": "" }]
        }));
        assert_eq!(unique_id(&h), "Verg.A.");
    }

    fn links(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|&(k, v)| (k.to_owned(), v.to_owned()))
            .collect()
    }

    #[test]
    fn passage_url_prefers_para() {
        let l = links(&[
            ("doc", "./navigate/77/?byte=1"),
            ("para", "./navigate/77/5/14/2?byte=636137"),
        ]);
        assert_eq!(
            passage_url(NAV, &l),
            "https://artflsrv03.uchicago.edu/philologic4/Latin/navigate/77/5/14/2/?byte=636137"
        );
    }

    #[test]
    fn passage_url_falls_back_to_line_then_doc() {
        let l = links(&[("line", "./navigate/77/5/?byte=9")]);
        assert_eq!(
            passage_url(NAV, &l),
            "https://artflsrv03.uchicago.edu/philologic4/Latin/navigate/77/5/?byte=9"
        );
        let l = links(&[("doc", "./navigate/77/")]);
        assert_eq!(
            passage_url(NAV, &l),
            "https://artflsrv03.uchicago.edu/philologic4/Latin/navigate/77/"
        );
    }

    #[test]
    fn passage_url_empty_without_links() {
        assert_eq!(passage_url(NAV, &HashMap::new()), "");
    }
}

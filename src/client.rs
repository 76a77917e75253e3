//! Blocking HTTP client for the PhiloLogic JSON API.

use crate::errors::{self, Result};
use crate::query::Language;
use crate::response::QueryResponse;
use log::debug;
use std::time::Duration;

const ARTFL_ROOT: &str = "https://artflsrv03.uchicago.edu/philologic4";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Where queries go and where passage links should point.
///
/// Held as an explicit value rather than ambient state, so tests can aim
/// the client at a local endpoint.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    pub query_url: String,
    pub nav_url: String,
}

impl ClientConfig {
    /// The public ARTFL endpoints for the given corpus language.
    pub fn for_language(language: Language) -> ClientConfig {
        ClientConfig {
            query_url: format!("{ARTFL_ROOT}/{language}/query"),
            nav_url: format!("{ARTFL_ROOT}/{language}/"),
        }
    }
}

pub struct ApiClient {
    config: ClientConfig,
    http: reqwest::blocking::Client,
}

impl ApiClient {
    pub fn new(config: ClientConfig) -> Result<ApiClient> {
        let http = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| errors::network_error(format!("cannot build HTTP client: {e}")))?;
        Ok(ApiClient { config, http })
    }

    /// Navigation root for passage links, e.g.
    /// `https://artflsrv03.uchicago.edu/philologic4/Latin/`.
    pub fn nav_url(&self) -> &str {
        &self.config.nav_url
    }

    /// One synchronous round trip: GET the query URL with the given
    /// parameters and decode the JSON body. Transport failures and non-2xx
    /// statuses surface as [crate::errors::NetworkError], an undecodable
    /// body as [crate::errors::DecodeError]; neither is retried.
    pub fn fetch(&self, params: &[(String, String)]) -> Result<QueryResponse> {
        let url = &self.config.query_url;
        debug!(target: "concorder", "GET {url}");
        let response = self
            .http
            .get(url)
            .query(params)
            .send()
            .map_err(|e| errors::network_error(format!("cannot contact {url}: {e}")))?;
        let status = response.status();
        if !status.is_success() {
            return Err(errors::network_error(format!("HTTP {status} from {url}")));
        }
        response
            .json()
            .map_err(|e| errors::decode_error(format!("response was not valid JSON: {e}")))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn language_endpoints() {
        let latin = ClientConfig::for_language(Language::Latin);
        assert_eq!(
            latin.query_url,
            "https://artflsrv03.uchicago.edu/philologic4/Latin/query"
        );
        assert_eq!(
            latin.nav_url,
            "https://artflsrv03.uchicago.edu/philologic4/Latin/"
        );
        let greek = ClientConfig::for_language(Language::Greek);
        assert_eq!(
            greek.query_url,
            "https://artflsrv03.uchicago.edu/philologic4/Greek/query"
        );
    }
}

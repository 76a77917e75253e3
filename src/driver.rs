//! Retrieval: the two-phase query flow against the concordance service.

use crate::client::ApiClient;
use crate::errors::Result;
use crate::query::{self, PROBE, SearchRequest, Window};
use crate::response::QueryResponse;
use log::info;

/// Retrieve the full concordance for `request`.
///
/// A probe query with an empty paging window reads `results_length` first;
/// when it is zero the probe response is returned as is (no second
/// request), otherwise one more query fetches the whole result set.
pub fn retrieve(client: &ApiClient, request: &SearchRequest) -> Result<QueryResponse> {
    let probe = client.fetch(&query::build_params(request, PROBE)?)?;
    info!(target: "concorder", "found {} result(s)", probe.results_length);
    if probe.results_length == 0 {
        return Ok(probe);
    }
    let window = Window {
        start: 1,
        end: probe.results_length,
    };
    client.fetch(&query::build_params(request, window)?)
}

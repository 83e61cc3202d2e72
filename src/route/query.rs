use std::collections::HashMap;

use axum::extract::RawQuery;

/// Decodes the query string without ever rejecting the request, so that bad
/// input still produces an envelope.
pub(crate) fn query_pairs(RawQuery(query): RawQuery) -> Vec<(String, String)> {
    query
        .map(|q| url::form_urlencoded::parse(q.as_bytes()).into_owned().collect())
        .unwrap_or_default()
}

/// Non-empty parameters by name; on repeats the last value wins.
pub(crate) fn query_params(query: RawQuery) -> HashMap<String, String> {
    query_pairs(query)
        .into_iter()
        .filter(|(_, value)| !value.is_empty())
        .collect()
}

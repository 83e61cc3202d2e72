use axum::{
    body::Bytes,
    extract::{RawQuery, State, rejection::BytesRejection},
};
use serde_json::Value;
use tracing::warn;

use crate::ServerState;
use crate::envelope::Envelope;
use crate::proxy_service::{
    forward_request::ForwardRequest, forward_result::ForwardResult, proxy_service::ProxyService,
    proxy_service_error::ProxyServiceError,
};
use crate::route::query::query_pairs;

/// `POST /api` with the forwarding request as a JSON document.
pub(crate) async fn forward_json(
    State(state): State<ServerState>,
    body: Result<Bytes, BytesRejection>,
) -> Envelope {
    match parse_json_request(body) {
        Ok(request) => state.proxy_service.forward(request).await,
        Err(error) => {
            warn!("Rejected forwarding request body: {error}");
            ForwardResult::Rejected(error).into()
        }
    }
}

/// `GET /api` with the forwarding request spread over query parameters.
pub(crate) async fn forward_query(State(state): State<ServerState>, query: RawQuery) -> Envelope {
    match ForwardRequest::from_query_pairs(query_pairs(query)) {
        Ok(request) => state.proxy_service.forward(request).await,
        Err(error) => {
            warn!("Rejected forwarding query: {error}");
            ForwardResult::Rejected(error).into()
        }
    }
}

fn parse_json_request(
    body: Result<Bytes, BytesRejection>,
) -> Result<ForwardRequest, ProxyServiceError> {
    let body = body.map_err(|e| ProxyServiceError::InvalidField {
        field: "request",
        reason: e.body_text(),
    })?;

    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(ProxyServiceError::NoData);
    }

    let document: Value =
        serde_json::from_slice(&body).map_err(|e| ProxyServiceError::InvalidField {
            field: "request",
            reason: format!("body is not valid JSON: {e}"),
        })?;

    ForwardRequest::from_json(document)
}

use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use serde_json::Value;
use tracing::{info, warn};
use url::Url;

use crate::envelope::Envelope;
use crate::http_client::{
    http_client::HttpClient,
    request::{Request, RequestHeaders, RequestMethod},
};
use crate::proxy_service::{
    forward_request::{ForwardBody, ForwardRequest},
    forward_result::ForwardResult,
    proxy_service::ProxyService,
    proxy_service_error::ProxyServiceError,
};

const CONTENT_TYPE: &str = "Content-Type";
const APPLICATION_JSON: &str = "application/json";

#[derive(Clone)]
pub struct HttpProxyService {
    http_client: Arc<dyn HttpClient>,
}

impl HttpProxyService {
    pub fn new(http_client: Arc<dyn HttpClient>) -> Self {
        Self { http_client }
    }

    /// Validates, dispatches once and normalizes. No retries.
    pub async fn execute(&self, request: ForwardRequest) -> ForwardResult {
        let outbound = match build_outbound_request(request) {
            Ok(outbound) => outbound,
            Err(error) => {
                warn!("Rejected forwarding request: {error}");
                return ForwardResult::Rejected(error);
            }
        };

        info!(method = %outbound.method, url = %outbound.url, "Forwarding request");

        match self.http_client.execute(outbound).await {
            Ok(response) => {
                info!(status = response.status, "Upstream answered");
                ForwardResult::Succeeded {
                    status: response.status,
                    payload: normalize_payload(&response.body),
                }
            }
            Err(error) => {
                warn!("Forwarding failed: {error}");
                ForwardResult::Failed(ProxyServiceError::Transport(error))
            }
        }
    }
}

#[async_trait]
impl ProxyService for HttpProxyService {
    async fn forward(&self, request: ForwardRequest) -> Envelope {
        self.execute(request).await.into()
    }
}

fn required(value: Option<String>, field: &'static str) -> Result<String, ProxyServiceError> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or(ProxyServiceError::MissingField(field))
}

pub(crate) fn build_outbound_request(
    request: ForwardRequest,
) -> Result<Request, ProxyServiceError> {
    let target_url = required(request.target_url, "url")?;
    let method = required(request.method, "method")?;

    let method: RequestMethod = method
        .parse()
        .map_err(|_| ProxyServiceError::UnsupportedMethod(method.to_ascii_uppercase()))?;

    let mut url =
        Url::parse(&target_url).map_err(|e| ProxyServiceError::InvalidUrl(e.to_string()))?;
    if !url.has_host() {
        return Err(ProxyServiceError::InvalidUrl(format!(
            "{target_url} has no host"
        )));
    }

    // Appends to, never replaces, a query string already on the target.
    if !request.query_params.is_empty() {
        url.query_pairs_mut()
            .extend_pairs(request.query_params.iter());
    }

    let mut headers = request.headers;
    let body = match request.body {
        Some(body) if method.carries_body() => encode_body(body, &mut headers)?,
        _ => Bytes::new(),
    };

    Ok(Request {
        method,
        url,
        headers,
        body,
    })
}

fn encode_body(body: ForwardBody, headers: &mut RequestHeaders) -> Result<Bytes, ProxyServiceError> {
    match body {
        ForwardBody::Raw(text) => Ok(Bytes::from(text)),
        ForwardBody::Structured(value) => {
            let encoded =
                serde_json::to_vec(&value).map_err(|e| ProxyServiceError::InvalidField {
                    field: "body",
                    reason: e.to_string(),
                })?;
            if !headers.contains_ignore_case(CONTENT_TYPE) {
                headers.insert(CONTENT_TYPE.to_string(), APPLICATION_JSON.to_string());
            }
            Ok(Bytes::from(encoded))
        }
    }
}

/// JSON when it parses, raw text otherwise. An empty body is `null`.
pub(crate) fn normalize_payload(body: &Bytes) -> Value {
    if body.is_empty() {
        return Value::Null;
    }

    serde_json::from_slice(body)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(body).into_owned()))
}

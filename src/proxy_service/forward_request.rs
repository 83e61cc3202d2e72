use std::collections::BTreeMap;

use serde_json::{Map, Value};

use crate::http_client::request::RequestHeaders;
use crate::proxy_service::proxy_service_error::ProxyServiceError;

/// A caller's description of the outbound call to perform.
///
/// `target_url` and `method` stay optional here so that their absence is
/// reported through an envelope instead of a deserialization failure.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ForwardRequest {
    pub target_url: Option<String>,
    pub method: Option<String>,
    pub headers: RequestHeaders,
    pub body: Option<ForwardBody>,
    pub query_params: BTreeMap<String, String>,
}

/// Payload of a forwarding request, resolved once at the boundary.
#[derive(Debug, Clone, PartialEq)]
pub enum ForwardBody {
    /// Sent verbatim, no implicit content type.
    Raw(String),
    /// Serialized to JSON text on the way out.
    Structured(Value),
}

impl ForwardBody {
    /// Body taken from an inbound JSON document: strings stay raw.
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Null => None,
            Value::String(text) => Some(ForwardBody::Raw(text)),
            other => Some(ForwardBody::Structured(other)),
        }
    }

    /// Body taken from a query-string parameter: text that parses as a JSON
    /// object or array becomes structured, anything else stays raw.
    pub fn from_text(text: String) -> Self {
        match serde_json::from_str::<Value>(&text) {
            Ok(value @ (Value::Object(_) | Value::Array(_))) => ForwardBody::Structured(value),
            _ => ForwardBody::Raw(text),
        }
    }
}

impl ForwardRequest {
    /// Builds a request from the JSON document posted to the front door.
    pub fn from_json(document: Value) -> Result<Self, ProxyServiceError> {
        let Value::Object(mut fields) = document else {
            return Err(ProxyServiceError::InvalidField {
                field: "request",
                reason: "expected a JSON object".to_string(),
            });
        };

        if fields.is_empty() {
            return Err(ProxyServiceError::NoData);
        }

        Ok(ForwardRequest {
            target_url: optional_string("url", fields.remove("url"))?,
            method: optional_string("method", fields.remove("method"))?,
            headers: string_map("headers", fields.remove("headers"))?
                .into_iter()
                .collect(),
            body: fields.remove("body").and_then(ForwardBody::from_value),
            query_params: string_map("query", fields.remove("query"))?,
        })
    }

    /// Builds a request from query-string parameters, where `headers`,
    /// `query` and `body` arrive as JSON text. Unknown parameters are ignored.
    pub fn from_query_pairs<I>(pairs: I) -> Result<Self, ProxyServiceError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut params: BTreeMap<String, String> = pairs.into_iter().collect();

        if params.is_empty() {
            return Err(ProxyServiceError::NoData);
        }

        Ok(ForwardRequest {
            target_url: params.remove("url"),
            method: params.remove("method"),
            headers: string_map("headers", params.remove("headers").map(Value::String))?
                .into_iter()
                .collect(),
            body: params.remove("body").map(ForwardBody::from_text),
            query_params: string_map("query", params.remove("query").map(Value::String))?,
        })
    }
}

fn optional_string(
    field: &'static str,
    value: Option<Value>,
) -> Result<Option<String>, ProxyServiceError> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(text)) => Ok(Some(text)),
        Some(_) => Err(ProxyServiceError::InvalidField {
            field,
            reason: "expected a string".to_string(),
        }),
    }
}

/// Accepts a JSON object, or JSON text encoding one. Scalar entries are
/// stringified; nested values are rejected.
fn string_map(
    field: &'static str,
    value: Option<Value>,
) -> Result<BTreeMap<String, String>, ProxyServiceError> {
    let invalid = |reason: String| ProxyServiceError::InvalidField { field, reason };

    let object: Map<String, Value> = match value {
        None | Some(Value::Null) => return Ok(BTreeMap::new()),
        Some(Value::Object(object)) => object,
        Some(Value::String(text)) if text.trim().is_empty() => return Ok(BTreeMap::new()),
        Some(Value::String(text)) => match serde_json::from_str(&text) {
            Ok(Value::Object(object)) => object,
            Ok(_) => return Err(invalid("expected a JSON object".to_string())),
            Err(e) => return Err(invalid(e.to_string())),
        },
        Some(_) => return Err(invalid("expected a JSON object".to_string())),
    };

    object
        .into_iter()
        .map(|(key, value)| match value {
            Value::String(text) => Ok((key, text)),
            Value::Number(number) => Ok((key, number.to_string())),
            Value::Bool(flag) => Ok((key, flag.to_string())),
            _ => Err(invalid(format!("value of {key} must be a string"))),
        })
        .collect()
}

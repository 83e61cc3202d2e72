use std::time::Duration;

use async_trait::async_trait;
use http::{HeaderMap, HeaderName, HeaderValue};
use reqwest::redirect::Policy;
use tracing::debug;

use crate::http_client::{
    error::{HttpClientError, HttpClientErrorChecker},
    http_client::HttpClient,
    request::{Request, RequestHeaders, RequestMethod},
    response::Response,
};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
const MAX_REDIRECTS: usize = 10;
const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

#[derive(Clone)]
pub struct ReqwestHttpClient {
    client: reqwest::Client,
}

impl ReqwestHttpClient {
    /// Certificate verification stays on; only the timeout is tunable.
    pub fn with_timeout(timeout: Duration) -> Result<Self, HttpClientError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .redirect(Policy::limited(MAX_REDIRECTS))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| HttpClientError::InvalidRequest(e.to_string()))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl HttpClient for ReqwestHttpClient {
    async fn execute(&self, request: Request) -> Result<Response, HttpClientError> {
        debug!("Proxying {:#?}", request);

        let headers = HeaderMap::try_from(request.headers)?;

        let mut request_builder = self
            .client
            .request(request.method.into(), request.url)
            .headers(headers);

        if !request.body.is_empty() {
            request_builder = request_builder.body(request.body);
        }

        let reqwest_response = request_builder
            .send()
            .await
            .map_err(HttpClientError::from)?;

        let http_status = reqwest_response.status().as_u16();

        let body = reqwest_response
            .bytes()
            .await
            .map_err(HttpClientError::from)?;

        Ok(Response {
            status: http_status,
            body,
        })
    }
}

impl HttpClientErrorChecker for reqwest::Error {
    fn is_builder(&self) -> bool {
        self.is_builder()
    }

    fn is_timeout(&self) -> bool {
        self.is_timeout()
    }

    fn is_connect(&self) -> bool {
        self.is_connect()
    }

    fn error_string(&self) -> String {
        // reqwest's Display hides the root cause (refused, dns, tls).
        let mut message = self.to_string();
        let mut source = std::error::Error::source(self);
        while let Some(cause) = source {
            message.push_str(": ");
            message.push_str(&cause.to_string());
            source = cause.source();
        }
        message
    }
}

impl From<reqwest::Error> for HttpClientError {
    fn from(err: reqwest::Error) -> Self {
        HttpClientError::classify(&err)
    }
}

impl TryFrom<RequestHeaders> for HeaderMap {
    type Error = HttpClientError;

    fn try_from(h: RequestHeaders) -> Result<Self, Self::Error> {
        let mut header_map = HeaderMap::new();
        for (k, v) in h.0 {
            let name =
                HeaderName::from_bytes(k.as_bytes()).map_err(|e| HttpClientError::InvalidHeader {
                    name: k.clone(),
                    reason: e.to_string(),
                })?;
            let value = HeaderValue::from_str(&v).map_err(|e| HttpClientError::InvalidHeader {
                name: k.clone(),
                reason: e.to_string(),
            })?;
            // Names equal up to case are one header on the wire; keep every value.
            header_map.append(name, value);
        }
        Ok(header_map)
    }
}

impl From<RequestMethod> for reqwest::Method {
    fn from(value: RequestMethod) -> Self {
        match value {
            RequestMethod::Get => reqwest::Method::GET,
            RequestMethod::Post => reqwest::Method::POST,
            RequestMethod::Put => reqwest::Method::PUT,
            RequestMethod::Delete => reqwest::Method::DELETE,
            RequestMethod::Patch => reqwest::Method::PATCH,
            RequestMethod::Head => reqwest::Method::HEAD,
            RequestMethod::Options => reqwest::Method::OPTIONS,
        }
    }
}

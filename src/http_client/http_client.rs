use async_trait::async_trait;

use crate::http_client::{error::HttpClientError, request::Request, response::Response};

/// Performs exactly one outbound call per invocation. Implementations must
/// not retry.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn execute(&self, request: Request) -> Result<Response, HttpClientError>;
}

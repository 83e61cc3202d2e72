use async_trait::async_trait;

use crate::envelope::Envelope;
use crate::proxy_service::forward_request::ForwardRequest;

/// Turns one forwarding request into one envelope. Never fails: every
/// outcome, including validation and transport errors, is an envelope.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProxyService: Send + Sync {
    async fn forward(&self, request: ForwardRequest) -> Envelope;
}

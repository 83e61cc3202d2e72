use serde_json::Value;

use crate::envelope::Envelope;
use crate::proxy_service::proxy_service_error::ProxyServiceError;

/// Terminal state of one forwarding attempt.
#[derive(Debug)]
pub enum ForwardResult {
    /// Validation failed; nothing was sent.
    Rejected(ProxyServiceError),
    /// The upstream answered. Any status, including 4xx/5xx, lands here.
    Succeeded { status: u16, payload: Value },
    /// The outbound call never completed.
    Failed(ProxyServiceError),
}

impl ForwardResult {
    pub fn ok(&self) -> bool {
        matches!(self, ForwardResult::Succeeded { .. })
    }

    /// Present iff the target was reached and answered.
    pub fn upstream_status(&self) -> Option<u16> {
        match self {
            ForwardResult::Succeeded { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn error_message(&self) -> Option<String> {
        match self {
            ForwardResult::Rejected(error) | ForwardResult::Failed(error) => Some(error.to_string()),
            ForwardResult::Succeeded { .. } => None,
        }
    }
}

impl From<ForwardResult> for Envelope {
    fn from(result: ForwardResult) -> Self {
        match result {
            ForwardResult::Succeeded { status, payload } => Envelope::success(status, payload),
            ForwardResult::Rejected(error) | ForwardResult::Failed(error) => {
                Envelope::failure(error.status(), error.to_string())
            }
        }
    }
}

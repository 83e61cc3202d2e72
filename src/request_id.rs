use http::{HeaderName, Request};
use uuid::Uuid;

use tower_http::request_id::{MakeRequestId, RequestId};

pub(crate) const X_REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");
pub(crate) const UNKNOWN_REQUEST_ID: &str = "unknown";

#[derive(Clone, Default)]
pub(crate) struct GatewayRequestId {}

impl MakeRequestId for GatewayRequestId {
    fn make_request_id<B>(&mut self, _: &Request<B>) -> Option<RequestId> {
        Uuid::new_v4()
            .to_string()
            .parse()
            .ok()
            .map(RequestId::new)
    }
}

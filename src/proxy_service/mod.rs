pub mod forward_request;
pub mod forward_result;
pub mod http_proxy_service;
#[allow(clippy::module_inception)]
pub mod proxy_service;
pub mod proxy_service_error;

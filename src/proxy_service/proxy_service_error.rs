use crate::http_client::error::HttpClientError;
use crate::http_client::request::RequestMethod;

#[derive(Debug, thiserror::Error)]
pub enum ProxyServiceError {
    #[error("{0} required")]
    MissingField(&'static str),

    #[error("Invalid HTTP method {0}. Allowed methods: {allowed}", allowed = RequestMethod::allowed_list())]
    UnsupportedMethod(String),

    #[error("Invalid URL provided: {0}")]
    InvalidUrl(String),

    #[error("Invalid {field}: {reason}")]
    InvalidField { field: &'static str, reason: String },

    #[error("No data provided. Send JSON body or use query parameters.")]
    NoData,

    #[error(transparent)]
    Transport(#[from] HttpClientError),
}

impl ProxyServiceError {
    pub fn status(&self) -> u16 {
        match self {
            ProxyServiceError::Transport(error) => error.status(),
            _ => 400,
        }
    }
}

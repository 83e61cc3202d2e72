use crate::http_client::error::HttpClientError;

#[derive(Debug, thiserror::Error)]
pub enum CpfInfoError {
    #[error("Transparency base URL cannot be used as a base: {0}")]
    InvalidBaseUrl(String),

    #[error(transparent)]
    Transport(#[from] HttpClientError),

    #[error("Unexpected transparency payload: {0}")]
    InvalidPayload(String),
}

impl CpfInfoError {
    /// Callers only ever see this text; details go to the log.
    pub const PUBLIC_MESSAGE: &'static str = "Erro interno do servidor";

    pub fn status(&self) -> u16 {
        500
    }
}

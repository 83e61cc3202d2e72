#[derive(Debug, thiserror::Error)]
pub enum HttpClientError {
    #[error("Timeout: the upstream did not answer in time")]
    Timeout,

    #[error("Connection error: {0}")]
    Connect(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Invalid header {name}: {reason}")]
    InvalidHeader { name: String, reason: String },
}

impl HttpClientError {
    /// Status reported in the envelope when the outbound call fails.
    /// Failures while building the request never reached the network.
    pub fn status(&self) -> u16 {
        match self {
            HttpClientError::InvalidRequest(_) | HttpClientError::InvalidHeader { .. } => 400,
            HttpClientError::Timeout
            | HttpClientError::Connect(_)
            | HttpClientError::Network(_) => 500,
        }
    }

    pub fn classify<T: HttpClientErrorChecker>(err: &T) -> Self {
        if err.is_builder() {
            HttpClientError::InvalidRequest(err.error_string())
        } else if err.is_timeout() {
            HttpClientError::Timeout
        } else if err.is_connect() {
            HttpClientError::Connect(err.error_string())
        } else {
            HttpClientError::Network(err.error_string())
        }
    }
}

#[cfg_attr(test, mockall::automock)]
pub trait HttpClientErrorChecker {
    fn is_builder(&self) -> bool;
    fn is_timeout(&self) -> bool;
    fn is_connect(&self) -> bool;
    fn error_string(&self) -> String;
}

#[cfg(test)]
mod tests {
    use crate::http_client::error::{HttpClientError, MockHttpClientErrorChecker};

    #[test]
    fn classifies_transport_errors_into_domain_variants() {
        let mut mock = MockHttpClientErrorChecker::new();
        mock.expect_is_builder().return_const(true);
        mock.expect_error_string()
            .return_const("builder error".to_string());
        let result = HttpClientError::classify(&mock);
        assert!(matches!(result, HttpClientError::InvalidRequest(_)));

        mock = MockHttpClientErrorChecker::new();
        mock.expect_is_builder().return_const(false);
        mock.expect_is_timeout().return_const(true);
        let result = HttpClientError::classify(&mock);
        assert!(matches!(result, HttpClientError::Timeout));

        mock = MockHttpClientErrorChecker::new();
        mock.expect_is_builder().return_const(false);
        mock.expect_is_timeout().return_const(false);
        mock.expect_is_connect().return_const(true);
        mock.expect_error_string()
            .return_const("dns error".to_string());
        let result = HttpClientError::classify(&mock);
        assert!(matches!(result, HttpClientError::Connect(_)));

        mock = MockHttpClientErrorChecker::new();
        mock.expect_is_builder().return_const(false);
        mock.expect_is_timeout().return_const(false);
        mock.expect_is_connect().return_const(false);
        mock.expect_error_string()
            .return_const("body error".to_string());
        let result = HttpClientError::classify(&mock);
        assert!(matches!(result, HttpClientError::Network(_)));
    }

    #[test]
    fn request_construction_failures_map_to_400() {
        assert_eq!(HttpClientError::InvalidRequest("bad".into()).status(), 400);
        assert_eq!(
            HttpClientError::InvalidHeader {
                name: "x".into(),
                reason: "bad".into()
            }
            .status(),
            400
        );
    }

    #[test]
    fn transport_failures_map_to_500() {
        assert_eq!(HttpClientError::Timeout.status(), 500);
        assert_eq!(HttpClientError::Connect("refused".into()).status(), 500);
        assert_eq!(HttpClientError::Network("reset".into()).status(), 500);
    }
}

use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use serde_json::{Value, json};
use tracing::{info, warn};
use url::Url;

use crate::envelope::Envelope;
use crate::http_client::{
    http_client::HttpClient,
    request::{Request, RequestHeaders, RequestMethod},
};
use crate::lookup::{
    cpf::validate_cpf,
    cpf_info::{CpfInfo, ServidorRecord},
    cpf_info_error::CpfInfoError,
    cpf_info_service::CpfInfoService,
};

pub const DEFAULT_TRANSPARENCY_BASE_URL: &str = "https://api.portaldatransparencia.gov.br";
pub const API_KEY_HEADER: &str = "chave-api-dados";

const NOT_FOUND_MESSAGE: &str = "CPF não encontrado.";

/// Looks CPFs up in the public-servant registry of the transparency portal.
pub struct TransparencyCpfInfoService {
    http_client: Arc<dyn HttpClient>,
    base_url: Url,
    api_token: Option<String>,
}

impl TransparencyCpfInfoService {
    pub fn new(http_client: Arc<dyn HttpClient>, base_url: Url, api_token: Option<String>) -> Self {
        Self {
            http_client,
            base_url,
            api_token,
        }
    }

    fn servidores_url(&self, cpf: &str) -> Result<Url, CpfInfoError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| CpfInfoError::InvalidBaseUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(["api-de-dados", "servidores"]);
        url.query_pairs_mut()
            .append_pair("cpf", cpf)
            .append_pair("pagina", "1");
        Ok(url)
    }

    /// `Ok(None)` when the registry has no entry for the CPF.
    async fn fetch(&self, cpf: &str) -> Result<(u16, Option<CpfInfo>), CpfInfoError> {
        let mut headers =
            RequestHeaders::from([("Content-Type".to_string(), "application/json".to_string())]);
        if let Some(token) = &self.api_token {
            headers.insert(API_KEY_HEADER.to_string(), token.clone());
        }

        let response = self
            .http_client
            .execute(Request {
                method: RequestMethod::Get,
                url: self.servidores_url(cpf)?,
                headers,
                body: Bytes::new(),
            })
            .await?;

        let payload: Value = serde_json::from_slice(&response.body)
            .map_err(|e| CpfInfoError::InvalidPayload(e.to_string()))?;

        let first = match payload {
            Value::Array(mut records) if !records.is_empty() => records.swap_remove(0),
            _ => return Ok((response.status, None)),
        };

        let record: ServidorRecord = serde_json::from_value(first)
            .map_err(|e| CpfInfoError::InvalidPayload(e.to_string()))?;

        Ok((response.status, Some(CpfInfo::from_record(cpf, record))))
    }
}

#[async_trait]
impl CpfInfoService for TransparencyCpfInfoService {
    async fn lookup(&self, cpf: &str) -> Envelope {
        let cpf = match validate_cpf(cpf) {
            Ok(cpf) => cpf,
            Err(error) => {
                info!("CPF validation failed: {error}");
                return Envelope::failure(400, "CPF is invalid");
            }
        };

        match self.fetch(&cpf).await {
            Ok((status, Some(found))) => {
                info!(status, "CPF found in the transparency registry");
                match serde_json::to_value(found) {
                    Ok(value) => Envelope::success(status, value),
                    Err(error) => {
                        warn!("Failed to encode CPF summary: {error}");
                        Envelope::failure(500, CpfInfoError::PUBLIC_MESSAGE)
                    }
                }
            }
            Ok((status, None)) => {
                info!(upstream_status = status, "CPF not found in the transparency registry");
                Envelope::success(404, json!({ "message": NOT_FOUND_MESSAGE }))
            }
            Err(error) => {
                warn!("CPF lookup failed: {error}");
                Envelope::failure(error.status(), CpfInfoError::PUBLIC_MESSAGE)
            }
        }
    }
}

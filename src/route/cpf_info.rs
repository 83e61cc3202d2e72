use axum::extract::{RawQuery, State};
use tracing::info;

use crate::ServerState;
use crate::envelope::Envelope;
use crate::lookup::cpf_info_service::CpfInfoService;
use crate::route::query::query_params;

/// `GET /api/cpf-info?cpf=`
pub(crate) async fn cpf_info(State(state): State<ServerState>, query: RawQuery) -> Envelope {
    match query_params(query).remove("cpf") {
        Some(cpf) => state.cpf_info_service.lookup(&cpf).await,
        None => {
            info!("CPF lookup without a CPF");
            Envelope::failure(400, "CPF is required")
        }
    }
}

use axum::extract::RawQuery;
use tracing::info;

use crate::envelope::Envelope;
use crate::lookup::una::una_tickets;
use crate::route::query::query_params;

/// `GET /api/una?cpf=`
pub(crate) async fn una(query: RawQuery) -> Envelope {
    let Some(cpf) = query_params(query).remove("cpf") else {
        return Envelope::failure(400, "CPF is required");
    };

    let summary = una_tickets(&cpf);
    info!(total = summary.total, "Una tickets listed");

    match serde_json::to_value(summary) {
        Ok(value) => Envelope::success(200, value),
        Err(error) => Envelope::failure(500, error.to_string()),
    }
}

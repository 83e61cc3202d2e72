use axum::extract::{RawQuery, State};
use tracing::error;

use crate::ServerState;
use crate::envelope::Envelope;
use crate::lookup::ticket_details::ticket_details;
use crate::route::query::query_params;

/// `GET /api/ticket-info-db?id=&cpf=`
pub(crate) async fn ticket_info(State(state): State<ServerState>, query: RawQuery) -> Envelope {
    let mut params = query_params(query);
    let (Some(protocol), Some(owner)) = (params.remove("id"), params.remove("cpf")) else {
        return Envelope::failure(400, "Ticket ID and CPF are required");
    };

    // SQLite calls block; keep them off the async workers.
    let store = state.ticket_store.clone();
    match tokio::task::spawn_blocking(move || ticket_details(store.as_ref(), &protocol, &owner))
        .await
    {
        Ok(envelope) => envelope,
        Err(join_error) => {
            error!("Ticket lookup task failed: {join_error}");
            Envelope::failure(500, "Ticket lookup failed")
        }
    }
}

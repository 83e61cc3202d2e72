use serde_json::{Value, json};
use tracing::{info, warn};

use crate::envelope::Envelope;
use crate::ticket_store::{ticket_store::TicketStore, ticket_store_error::TicketStoreError};

const UNKNOWN_OWNER: &str = "Titular não encontrado";
const TICKET_NOT_FOUND: &str = "Chamado não encontrado";
const FALLBACK_QUEUE: &str = "SEGES_Voz";

#[derive(Debug, Clone, PartialEq)]
pub struct TicketDetails {
    pub nome: String,
    pub descricao: String,
    pub fila: String,
    pub protocolo: String,
}

/// Resolves `protocol` for `owner`. A miss still names the owner when they
/// have other tickets, and routes to the fallback queue.
pub fn ticket_details(store: &dyn TicketStore, protocol: &str, owner: &str) -> Envelope {
    match find_details(store, protocol, owner) {
        Ok((true, details)) => {
            info!(protocol, "Ticket found");
            Envelope::success(200, details.into())
        }
        Ok((false, details)) => {
            info!(protocol, "Ticket not found for owner");
            Envelope::new(false, 404, details.into())
        }
        Err(error) => {
            warn!("Ticket lookup failed: {error}");
            Envelope::failure(500, error.to_string())
        }
    }
}

fn find_details(
    store: &dyn TicketStore,
    protocol: &str,
    owner: &str,
) -> Result<(bool, TicketDetails), TicketStoreError> {
    if let Some(ticket) = store.find_by_protocol_and_owner(protocol, owner)? {
        return Ok((
            true,
            TicketDetails {
                nome: ticket.name,
                descricao: ticket.description,
                fila: ticket.queue,
                protocolo: protocol.to_string(),
            },
        ));
    }

    let nome = store
        .find_by_owner(owner)?
        .into_iter()
        .next()
        .map(|latest| latest.name)
        .unwrap_or_else(|| UNKNOWN_OWNER.to_string());

    Ok((
        false,
        TicketDetails {
            nome,
            descricao: TICKET_NOT_FOUND.to_string(),
            fila: FALLBACK_QUEUE.to_string(),
            protocolo: protocol.to_string(),
        },
    ))
}

impl From<TicketDetails> for Value {
    fn from(details: TicketDetails) -> Self {
        json!({
            "nome": details.nome,
            "descricao": details.descricao,
            "fila": details.fila,
            "protocolo": details.protocolo,
        })
    }
}

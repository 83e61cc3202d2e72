use tracing::info;

use crate::ticket_store::{
    ticket::Ticket, ticket_store::TicketStore, ticket_store_error::TicketStoreError,
};

pub fn sample_tickets() -> Vec<Ticket> {
    vec![
        Ticket::new("1765392696777", "80713245977", "Maria", "Solicitar Aposentadoria", "SGP_Voz"),
        Ticket::new("1765392788425", "44577744058", "Antônio", "Solicitar Aposentadoria", "SGP_Voz"),
        Ticket::new(
            "1765392795637",
            "44577744058",
            "Antônio",
            "Solicitar declaração para ex-servidores e ex-pensionistas",
            "SGP_Voz",
        ),
        Ticket::new("1765392822240", "44577744058", "Antônio", "Solicitar Aposentadoria", "SGP_Voz"),
        Ticket::new("1765392781234", "74185296313", "Francisca", "Incluir nova entrada", "SEGES_Voz"),
        Ticket::new("1765392768526", "74185296313", "Francisca", "Correção de DARF", "SPU_Voz"),
        Ticket::new(
            "1765392789856",
            "36925814720",
            "José",
            "Ratificar declaração de imóvel de domínio",
            "SPU_Voz",
        ),
        Ticket::new("1765392789874", "79846513201", "Paulo", "Regularizar dívidas", "SEGES_Voz"),
    ]
}

/// Upserts the sample tickets; safe to run on every start.
pub fn seed_tickets(store: &dyn TicketStore) -> Result<usize, TicketStoreError> {
    let tickets = sample_tickets();
    for ticket in &tickets {
        store.create(ticket)?;
    }
    info!("Seeded {} tickets", tickets.len());
    Ok(tickets.len())
}

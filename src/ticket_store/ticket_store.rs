use crate::ticket_store::{ticket::Ticket, ticket_store_error::TicketStoreError};

/// Single-table record store keyed by protocol. Writes to the same key must
/// be serialized by the implementation.
#[cfg_attr(test, mockall::automock)]
pub trait TicketStore: Send + Sync {
    /// Inserts or replaces by protocol and returns the persisted row.
    fn create(&self, ticket: &Ticket) -> Result<Ticket, TicketStoreError>;

    fn find_by_protocol(&self, protocol: &str) -> Result<Option<Ticket>, TicketStoreError>;

    /// Newest first.
    fn find_by_owner(&self, owner: &str) -> Result<Vec<Ticket>, TicketStoreError>;

    fn find_by_protocol_and_owner(
        &self,
        protocol: &str,
        owner: &str,
    ) -> Result<Option<Ticket>, TicketStoreError>;

    /// Newest first.
    fn find_all(&self) -> Result<Vec<Ticket>, TicketStoreError>;

    /// Returns whether a row was removed.
    fn delete(&self, protocol: &str) -> Result<bool, TicketStoreError>;
}

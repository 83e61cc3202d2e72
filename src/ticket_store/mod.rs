pub mod seed;
pub mod sqlite_ticket_store;
pub mod ticket;
#[allow(clippy::module_inception)]
pub mod ticket_store;
pub mod ticket_store_error;

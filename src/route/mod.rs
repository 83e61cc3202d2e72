pub(crate) mod cpf_info;
pub(crate) mod health;
pub(crate) mod proxy;
pub(crate) mod query;
pub(crate) mod ticket_info;
pub(crate) mod una;

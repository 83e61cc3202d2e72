pub mod cpf;
pub mod cpf_info;
pub mod cpf_info_error;
pub mod cpf_info_service;
pub mod ticket_details;
pub mod transparency_cpf_info_service;
pub mod una;

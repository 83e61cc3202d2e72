use serde::{Deserialize, Serialize};

/// One row of the `ticket` table. Wire names follow the column names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ticket {
    #[serde(rename = "protocolo")]
    pub protocol: String,
    pub owner: String,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "descricao")]
    pub description: String,
    #[serde(rename = "fila")]
    pub queue: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl Ticket {
    pub fn new(protocol: &str, owner: &str, name: &str, description: &str, queue: &str) -> Self {
        Self {
            protocol: protocol.to_string(),
            owner: owner.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            queue: queue.to_string(),
            created_at: None,
            updated_at: None,
        }
    }
}

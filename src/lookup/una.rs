//! Fixed ticket summaries served by `/api/una`.

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UnaTicket {
    pub nu_protocolo_pedido: &'static str,
    pub nm_servico: &'static str,
    pub status: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnaSummary {
    pub total: usize,
    pub content: Vec<UnaTicket>,
}

const fn una(nu_protocolo_pedido: &'static str, nm_servico: &'static str, status: u8) -> UnaTicket {
    UnaTicket {
        nu_protocolo_pedido,
        nm_servico,
        status,
    }
}

static UNA_TICKETS: &[(&str, &[UnaTicket])] = &[
    (
        "80713245077",
        &[una("1765392696777", "Solicitar Aposentadoria", 1)],
    ),
    (
        "44577744058",
        &[
            una("1765392788425", "Solicitar Aposentadoria", 1),
            una(
                "1765392795637",
                "Solicitar declaração para ex-servidores e ex-pensionistas",
                3,
            ),
            una(
                "1765310358328",
                "Comunicar óbito de agente público ou pensionista",
                2,
            ),
            una("1765392822240", "Solicitar Aposentadoria", 7),
        ],
    ),
];

/// Unknown CPFs get an empty summary, never an error.
pub fn una_tickets(cpf: &str) -> UnaSummary {
    let content = UNA_TICKETS
        .iter()
        .find(|(owner, _)| *owner == cpf)
        .map(|(_, tickets)| tickets.to_vec())
        .unwrap_or_default();

    UnaSummary {
        total: content.len(),
        content,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::lookup::una::una_tickets;

    #[test]
    fn lists_the_tickets_of_a_known_cpf() {
        let summary = una_tickets("44577744058");

        assert_eq!(summary.total, 4);
        assert_eq!(summary.content[3].status, 7);
    }

    #[test]
    fn serializes_with_the_una_field_names() {
        assert_eq!(
            serde_json::to_value(una_tickets("80713245077")).unwrap(),
            json!({
                "total": 1,
                "content": [{
                    "nuProtocoloPedido": "1765392696777",
                    "nmServico": "Solicitar Aposentadoria",
                    "status": 1
                }]
            })
        );
    }

    #[test]
    fn unknown_cpfs_have_no_tickets() {
        assert_eq!(
            serde_json::to_value(una_tickets("52998224725")).unwrap(),
            json!({ "total": 0, "content": [] })
        );
    }
}

use serde::{Deserialize, Serialize};

/// Public-servant summary returned by `/api/cpf-info`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub struct CpfInfo {
    pub cpf: String,
    pub nome: String,
    pub situacao: String,
    pub orgao: String,
    pub sigla: String,
    pub codigo: String,
}

/// One element of the transparency API's `servidores` array. Only the
/// fields the summary needs are read.
#[derive(Debug, Deserialize)]
pub(crate) struct ServidorRecord {
    pub servidor: Servidor,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Servidor {
    pub pessoa: Pessoa,
    pub situacao: String,
    pub orgao_servidor_lotacao: Orgao,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Pessoa {
    pub nome: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Orgao {
    pub nome: String,
    pub sigla: String,
    pub codigo: String,
}

impl CpfInfo {
    pub(crate) fn from_record(cpf: &str, record: ServidorRecord) -> Self {
        let servidor = record.servidor;
        let orgao = servidor.orgao_servidor_lotacao;

        CpfInfo {
            cpf: cpf.to_string(),
            nome: servidor.pessoa.nome.to_uppercase(),
            situacao: servidor.situacao.to_uppercase(),
            orgao: orgao.nome.to_uppercase(),
            sigla: orgao.sigla.to_uppercase(),
            codigo: orgao.codigo.to_uppercase(),
        }
    }
}

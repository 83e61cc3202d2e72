use async_trait::async_trait;

use crate::envelope::Envelope;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CpfInfoService: Send + Sync {
    /// Validates `cpf` and looks it up. Every outcome is an envelope.
    async fn lookup(&self, cpf: &str) -> Envelope;
}

#[derive(Debug, thiserror::Error)]
pub enum TicketStoreError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("I/O error preparing the database: {0}")]
    Io(#[from] std::io::Error),

    #[error("Poisoned connection lock")]
    PoisonedLock,

    #[error("Failed to create ticket with protocol: {0}")]
    NotPersisted(String),
}

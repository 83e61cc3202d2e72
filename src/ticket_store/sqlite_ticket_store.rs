use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use rusqlite::{Connection, OptionalExtension, Row, params};
use tracing::info;

use crate::ticket_store::{
    ticket::Ticket, ticket_store::TicketStore, ticket_store_error::TicketStoreError,
};

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS ticket (
        protocolo TEXT PRIMARY KEY,
        owner TEXT NOT NULL,
        nome TEXT NOT NULL,
        descricao TEXT NOT NULL,
        fila TEXT NOT NULL,
        created_at DATETIME DEFAULT CURRENT_TIMESTAMP,
        updated_at DATETIME DEFAULT CURRENT_TIMESTAMP
    );

    CREATE INDEX IF NOT EXISTS idx_ticket_owner ON ticket(owner);
    CREATE INDEX IF NOT EXISTS idx_ticket_fila ON ticket(fila);
";

const COLUMNS: &str = "protocolo, owner, nome, descricao, fila, created_at, updated_at";

/// SQLite-backed store holding one connection. The mutex serializes every
/// statement, so concurrent upserts of the same protocol cannot interleave.
pub struct SqliteTicketStore {
    conn: Mutex<Connection>,
}

impl SqliteTicketStore {
    /// Opens (creating if needed) the database file and its parent directory.
    pub fn open(path: &Path) -> Result<Self, TicketStoreError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(path)?;
        info!("SQLite database opened at {}", path.display());
        Self::initialize(conn)
    }

    pub fn open_in_memory() -> Result<Self, TicketStoreError> {
        Self::initialize(Connection::open_in_memory()?)
    }

    fn initialize(conn: Connection) -> Result<Self, TicketStoreError> {
        conn.pragma_update(None, "foreign_keys", "ON")?;
        conn.execute_batch(SCHEMA)?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Closes the connection, surfacing any error SQLite reports on close.
    pub fn close(self) -> Result<(), TicketStoreError> {
        let conn = self
            .conn
            .into_inner()
            .map_err(|_| TicketStoreError::PoisonedLock)?;

        conn.close().map_err(|(_, error)| TicketStoreError::Sqlite(error))?;
        info!("SQLite database closed");
        Ok(())
    }

    fn connection(&self) -> Result<MutexGuard<'_, Connection>, TicketStoreError> {
        self.conn.lock().map_err(|_| TicketStoreError::PoisonedLock)
    }

    fn query_one(
        conn: &Connection,
        sql: &str,
        params: impl rusqlite::Params,
    ) -> Result<Option<Ticket>, TicketStoreError> {
        Ok(conn.query_row(sql, params, ticket_from_row).optional()?)
    }

    fn query_many(
        conn: &Connection,
        sql: &str,
        params: impl rusqlite::Params,
    ) -> Result<Vec<Ticket>, TicketStoreError> {
        let mut statement = conn.prepare(sql)?;
        let tickets = statement
            .query_map(params, ticket_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(tickets)
    }
}

fn ticket_from_row(row: &Row<'_>) -> rusqlite::Result<Ticket> {
    Ok(Ticket {
        protocol: row.get("protocolo")?,
        owner: row.get("owner")?,
        name: row.get("nome")?,
        description: row.get("descricao")?,
        queue: row.get("fila")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}

impl TicketStore for SqliteTicketStore {
    fn create(&self, ticket: &Ticket) -> Result<Ticket, TicketStoreError> {
        let conn = self.connection()?;

        conn.execute(
            "INSERT INTO ticket (protocolo, owner, nome, descricao, fila)
             VALUES (?1, ?2, ?3, ?4, ?5)
             ON CONFLICT(protocolo) DO UPDATE SET
                owner = excluded.owner,
                nome = excluded.nome,
                descricao = excluded.descricao,
                fila = excluded.fila,
                updated_at = CURRENT_TIMESTAMP",
            params![
                ticket.protocol,
                ticket.owner,
                ticket.name,
                ticket.description,
                ticket.queue
            ],
        )?;

        Self::query_one(
            &conn,
            &format!("SELECT {COLUMNS} FROM ticket WHERE protocolo = ?1"),
            params![ticket.protocol],
        )?
        .ok_or_else(|| TicketStoreError::NotPersisted(ticket.protocol.clone()))
    }

    fn find_by_protocol(&self, protocol: &str) -> Result<Option<Ticket>, TicketStoreError> {
        let conn = self.connection()?;
        Self::query_one(
            &conn,
            &format!("SELECT {COLUMNS} FROM ticket WHERE protocolo = ?1"),
            params![protocol],
        )
    }

    fn find_by_owner(&self, owner: &str) -> Result<Vec<Ticket>, TicketStoreError> {
        let conn = self.connection()?;
        Self::query_many(
            &conn,
            &format!(
                "SELECT {COLUMNS} FROM ticket WHERE owner = ?1 ORDER BY created_at DESC, rowid DESC"
            ),
            params![owner],
        )
    }

    fn find_by_protocol_and_owner(
        &self,
        protocol: &str,
        owner: &str,
    ) -> Result<Option<Ticket>, TicketStoreError> {
        let conn = self.connection()?;
        Self::query_one(
            &conn,
            &format!("SELECT {COLUMNS} FROM ticket WHERE protocolo = ?1 AND owner = ?2"),
            params![protocol, owner],
        )
    }

    fn find_all(&self) -> Result<Vec<Ticket>, TicketStoreError> {
        let conn = self.connection()?;
        Self::query_many(
            &conn,
            &format!("SELECT {COLUMNS} FROM ticket ORDER BY created_at DESC, rowid DESC"),
            [],
        )
    }

    fn delete(&self, protocol: &str) -> Result<bool, TicketStoreError> {
        let conn = self.connection()?;
        let changes = conn.execute("DELETE FROM ticket WHERE protocolo = ?1", params![protocol])?;
        Ok(changes > 0)
    }
}

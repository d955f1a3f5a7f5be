//! Document repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide `list/get/put/delete` over typed documents grouped by collection.
//! - Keep SQL and JSON payload details inside the persistence boundary.
//!
//! # Invariants
//! - Write paths call `Document::validate()` before any SQL mutation.
//! - Read paths reject payloads that fail to decode or validate.
//! - `put` preserves `created_at` of an existing row.
//! - Lists are ordered by `created_at ASC`, then insertion order.

use crate::db::DbError;
use crate::model::document::{Collection, Document, DocumentId, ValidationError};
use chrono::Utc;
use rusqlite::{params, Connection};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for document persistence and queries.
#[derive(Debug)]
pub enum RepoError {
    Validation(ValidationError),
    Db(DbError),
    NotFound {
        collection: Collection,
        id: DocumentId,
    },
    InvalidData(String),
    MissingRequiredTable(&'static str),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound { collection, id } => {
                write!(f, "document not found: {collection}/{id}")
            }
            Self::InvalidData(message) => write!(f, "invalid persisted document: {message}"),
            Self::MissingRequiredTable(table) => {
                write!(f, "required table `{table}` is missing; was the database migrated?")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::NotFound { .. } | Self::InvalidData(_) | Self::MissingRequiredTable(_) => None,
        }
    }
}

impl From<ValidationError> for RepoError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Storage timestamps of one document row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DocumentTimestamps {
    /// Epoch milliseconds of the first `put`.
    pub created_at: i64,
    /// Epoch milliseconds of the latest `put`.
    pub updated_at: i64,
}

/// Repository interface for typed document CRUD.
pub trait DocumentRepository {
    /// Inserts or replaces one document.
    fn put<D: Document>(&self, document: &D) -> RepoResult<()>;
    /// Gets one document by id.
    fn get<D: Document>(&self, id: DocumentId) -> RepoResult<Option<D>>;
    /// Lists every document of a type in creation order.
    fn list<D: Document>(&self) -> RepoResult<Vec<D>>;
    /// Hard-deletes one document. Missing ids return `NotFound`.
    fn delete<D: Document>(&self, id: DocumentId) -> RepoResult<()>;
    /// Counts documents stored in one collection.
    fn count(&self, collection: Collection) -> RepoResult<u64>;
    /// Returns storage timestamps for one document.
    fn timestamps(&self, collection: Collection, id: DocumentId)
        -> RepoResult<Option<DocumentTimestamps>>;
}

/// SQLite-backed document repository.
pub struct SqliteDocumentRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteDocumentRepository<'conn> {
    /// Constructs a repository from a migrated connection.
    ///
    /// Fails with `MissingRequiredTable` when the schema is not in place.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        if !table_exists(conn, "documents")? {
            return Err(RepoError::MissingRequiredTable("documents"));
        }
        Ok(Self { conn })
    }
}

impl DocumentRepository for SqliteDocumentRepository<'_> {
    fn put<D: Document>(&self, document: &D) -> RepoResult<()> {
        document.validate()?;

        let payload = serde_json::to_string(document).map_err(|err| {
            RepoError::InvalidData(format!("failed to encode {}: {err}", D::COLLECTION))
        })?;
        let now_ms = Utc::now().timestamp_millis();

        self.conn.execute(
            "INSERT INTO documents (collection, id, payload, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?4)
             ON CONFLICT (collection, id) DO UPDATE SET
                payload = excluded.payload,
                updated_at = excluded.updated_at;",
            params![
                D::COLLECTION.as_str(),
                document.id().to_string(),
                payload,
                now_ms
            ],
        )?;

        Ok(())
    }

    fn get<D: Document>(&self, id: DocumentId) -> RepoResult<Option<D>> {
        let mut stmt = self.conn.prepare(
            "SELECT payload
             FROM documents
             WHERE collection = ?1
               AND id = ?2;",
        )?;

        let mut rows = stmt.query(params![D::COLLECTION.as_str(), id.to_string()])?;
        if let Some(row) = rows.next()? {
            let document: D = decode_payload(&row.get::<_, String>("payload")?)?;
            if document.id() != id {
                return Err(RepoError::InvalidData(format!(
                    "payload id {} does not match row id {id} in {}",
                    document.id(),
                    D::COLLECTION
                )));
            }
            return Ok(Some(document));
        }

        Ok(None)
    }

    fn list<D: Document>(&self) -> RepoResult<Vec<D>> {
        let mut stmt = self.conn.prepare(
            "SELECT payload
             FROM documents
             WHERE collection = ?1
             ORDER BY created_at ASC, rowid ASC;",
        )?;

        let mut rows = stmt.query([D::COLLECTION.as_str()])?;
        let mut documents = Vec::new();
        while let Some(row) = rows.next()? {
            documents.push(decode_payload(&row.get::<_, String>("payload")?)?);
        }

        Ok(documents)
    }

    fn delete<D: Document>(&self, id: DocumentId) -> RepoResult<()> {
        let changed = self.conn.execute(
            "DELETE FROM documents WHERE collection = ?1 AND id = ?2;",
            params![D::COLLECTION.as_str(), id.to_string()],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                collection: D::COLLECTION,
                id,
            });
        }

        Ok(())
    }

    fn count(&self, collection: Collection) -> RepoResult<u64> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM documents WHERE collection = ?1;",
            [collection.as_str()],
            |row| row.get(0),
        )?;
        u64::try_from(count)
            .map_err(|_| RepoError::InvalidData(format!("negative document count {count}")))
    }

    fn timestamps(
        &self,
        collection: Collection,
        id: DocumentId,
    ) -> RepoResult<Option<DocumentTimestamps>> {
        let mut stmt = self.conn.prepare(
            "SELECT created_at, updated_at
             FROM documents
             WHERE collection = ?1
               AND id = ?2;",
        )?;

        let mut rows = stmt.query(params![collection.as_str(), id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(DocumentTimestamps {
                created_at: row.get("created_at")?,
                updated_at: row.get("updated_at")?,
            }));
        }

        Ok(None)
    }
}

fn decode_payload<D: Document>(payload: &str) -> RepoResult<D> {
    let document: D = serde_json::from_str(payload).map_err(|err| {
        RepoError::InvalidData(format!("undecodable {} payload: {err}", D::COLLECTION))
    })?;
    document.validate()?;
    Ok(document)
}

fn table_exists(conn: &Connection, table: &str) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

use chrono::Utc;

use sqlx::PgPool;

use uuid::Uuid;

use crate::error::PersistenceError;
use crate::model::{Contact, NewContact};

/// Storage for contact messages
///
/// Every operation is atomic on its own. Callers must not rely on any ordering
/// between concurrent calls.
#[async_trait::async_trait]
pub trait ContactStore: Send + Sync {
    /// Store a new contact, returning the record with its assigned id and timestamp
    async fn create(&self, new_contact: NewContact) -> Result<Contact, PersistenceError>;

    /// Fetch every contact, most recently submitted first
    async fn list_all(&self) -> Result<Vec<Contact>, PersistenceError>;

    /// Delete a contact by id, returning `false` if no such contact exists
    async fn delete_by_id(&self, id: &str) -> Result<bool, PersistenceError>;
}

/// Parse a caller supplied contact id
pub(crate) fn parse_id(id: &str) -> Result<Uuid, PersistenceError> {
    id.parse()
        .map_err(|_| PersistenceError::InvalidId(id.to_string()))
}

/// Postgres backed contact store
#[derive(Debug, Clone)]
pub struct PgContactStore {
    pool: PgPool,
}

impl PgContactStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl ContactStore for PgContactStore {
    #[tracing::instrument(name = "Insert contact", skip(self))]
    async fn create(&self, new_contact: NewContact) -> Result<Contact, PersistenceError> {
        let submitted_at = new_contact.submitted_at.unwrap_or_else(Utc::now);

        let contact = sqlx::query_as::<_, Contact>(
            "insert into contacts(name, email, subject, message, submitted_at) \
             values ($1, $2, $3, $4, $5) \
             returning id, name, email, subject, message, submitted_at",
        )
        .bind(new_contact.name.to_string())
        .bind(new_contact.email.to_string())
        .bind(new_contact.subject.to_string())
        .bind(new_contact.message.to_string())
        .bind(submitted_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(contact)
    }

    #[tracing::instrument(name = "Fetch all contacts", skip(self))]
    async fn list_all(&self) -> Result<Vec<Contact>, PersistenceError> {
        let contacts = sqlx::query_as::<_, Contact>(
            "select id, name, email, subject, message, submitted_at from contacts \
             order by submitted_at desc, id desc",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(contacts)
    }

    #[tracing::instrument(name = "Delete a contact by id", skip(self))]
    async fn delete_by_id(&self, id: &str) -> Result<bool, PersistenceError> {
        let id = parse_id(id)?;

        let result = sqlx::query("delete from contacts where id=$1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

use std::collections::HashMap;

use chrono::Utc;

use tokio::sync::RwLock;

use uuid::Uuid;

use crate::error::PersistenceError;
use crate::model::{Contact, NewContact};
use crate::repo::contacts::{parse_id, ContactStore};

/// In-process contact store, contents are lost on restart
#[derive(Debug, Default)]
pub struct MemoryContactStore {
    contacts: RwLock<HashMap<Uuid, Contact>>,
}

impl MemoryContactStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored contacts
    pub async fn len(&self) -> usize {
        self.contacts.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait::async_trait]
impl ContactStore for MemoryContactStore {
    #[tracing::instrument(name = "Insert contact", skip(self))]
    async fn create(&self, new_contact: NewContact) -> Result<Contact, PersistenceError> {
        let contact = Contact {
            id: Uuid::new_v4(),
            name: new_contact.name.to_string(),
            email: new_contact.email.to_string(),
            subject: new_contact.subject.to_string(),
            message: new_contact.message.to_string(),
            submitted_at: new_contact.submitted_at.unwrap_or_else(Utc::now),
        };

        self.contacts
            .write()
            .await
            .insert(contact.id, contact.clone());

        Ok(contact)
    }

    #[tracing::instrument(name = "Fetch all contacts", skip(self))]
    async fn list_all(&self) -> Result<Vec<Contact>, PersistenceError> {
        let mut contacts: Vec<Contact> = self.contacts.read().await.values().cloned().collect();
        contacts.sort_by(|a, b| {
            b.submitted_at
                .cmp(&a.submitted_at)
                .then_with(|| b.id.cmp(&a.id))
        });

        Ok(contacts)
    }

    #[tracing::instrument(name = "Delete a contact by id", skip(self))]
    async fn delete_by_id(&self, id: &str) -> Result<bool, PersistenceError> {
        let id = parse_id(id)?;

        Ok(self.contacts.write().await.remove(&id).is_some())
    }
}

use thiserror::Error;

use crate::auth::AdminPassword;
use crate::error::PersistenceError;
use crate::model::Contact;
use crate::repo::ContactStore;

#[derive(Debug, Error)]
pub enum AdminError {
    #[error("Administrator password did not match")]
    Unauthorized,

    #[error("Contact not found")]
    NotFound,

    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}

fn authorize(admin: &AdminPassword, password: Option<&str>) -> Result<(), AdminError> {
    if admin.matches(password) {
        Ok(())
    } else {
        tracing::warn!("Rejected administrator request with a bad password");
        Err(AdminError::Unauthorized)
    }
}

/// List every stored contact, newest first
#[tracing::instrument(name = "List contacts as administrator", skip_all)]
pub async fn list_contacts(
    admin: &AdminPassword,
    store: &dyn ContactStore,
    password: Option<&str>,
) -> Result<Vec<Contact>, AdminError> {
    authorize(admin, password)?;

    Ok(store.list_all().await?)
}

/// Delete a single contact by id
#[tracing::instrument(name = "Delete contact as administrator", skip(admin, store, password))]
pub async fn delete_contact(
    admin: &AdminPassword,
    store: &dyn ContactStore,
    password: Option<&str>,
    id: &str,
) -> Result<(), AdminError> {
    authorize(admin, password)?;

    if store.delete_by_id(id).await? {
        Ok(())
    } else {
        Err(AdminError::NotFound)
    }
}

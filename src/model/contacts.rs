use uuid::Uuid;

use chrono::{DateTime, Utc};

use serde::Serialize;

use crate::domain::ContactText;

/// New contact message request
#[derive(Debug, Clone)]
pub struct NewContact {
    pub name: ContactText,
    pub email: ContactText,
    pub subject: ContactText,
    pub message: ContactText,
    /// Submission timestamp, set to the time of insertion when `None`
    pub submitted_at: Option<DateTime<Utc>>,
}

/// Stored contact message record
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    /// ID of the contact, assigned by the store
    pub id: Uuid,
    /// User supplied data
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    /// Never updated after insertion
    pub submitted_at: DateTime<Utc>,
}

use thiserror::Error;

use crate::client::Verifier;
use crate::error::{PersistenceError, VerificationError};
use crate::model::{Contact, NewContact};
use crate::repo::ContactStore;

/// A contact message along with the proof that a human sent it
#[derive(Debug)]
pub struct Submission {
    pub contact: NewContact,
    /// CAPTCHA response token, empty if the caller sent none
    pub token: String,
    /// Network address of the submitter, if known
    pub remote_origin: Option<String>,
}

/// Terminal failures of a submission
#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("CAPTCHA verification rejected the submission")]
    Rejected,

    #[error("CAPTCHA verification unavailable")]
    VerificationUnavailable(#[source] VerificationError),

    #[error("Failed to store contact")]
    PersistFailed(#[source] PersistenceError),
}

/// Verify a submission and store it
///
/// The store is only called once the verifier has returned a positive verdict.
#[tracing::instrument(
    name = "Submit a contact message",
    skip(verifier, store, submission),
    fields(remote_origin = ?submission.remote_origin)
)]
pub async fn submit(
    verifier: &dyn Verifier,
    store: &dyn ContactStore,
    submission: Submission,
) -> Result<Contact, SubmitError> {
    let Submission {
        contact,
        token,
        remote_origin,
    } = submission;

    let is_human = verifier
        .verify(&token, remote_origin.as_deref())
        .await
        .map_err(SubmitError::VerificationUnavailable)?;
    if !is_human {
        tracing::info!("Submission failed CAPTCHA verification");
        return Err(SubmitError::Rejected);
    }

    let contact = store
        .create(contact)
        .await
        .map_err(SubmitError::PersistFailed)?;

    tracing::info!("Stored contact {}", contact.id);
    Ok(contact)
}

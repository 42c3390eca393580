use actix_web::dev::HttpServiceFactory;
use actix_web::{delete, get, post, web, HttpRequest, HttpResponse, Responder};

use serde::{Deserialize, Serialize};

use crate::admin;
use crate::auth::AdminPassword;
use crate::client::Verifier;
use crate::domain::ContactText;
use crate::error::{RestResult, ValidationError};
use crate::model::{Contact, NewContact};
use crate::repo::ContactStore;
use crate::submission::{self, Submission};

/// JSON deserialization wrapper for contact form submissions
#[derive(Debug, Deserialize)]
pub struct ContactForm {
    name: Option<String>,
    email: Option<String>,
    subject: Option<String>,
    message: Option<String>,
    #[serde(alias = "g-recaptcha-response")]
    token: Option<String>,
}

impl ContactForm {
    fn into_submission(self, remote_origin: Option<String>) -> Result<Submission, ValidationError> {
        let contact = NewContact {
            name: required("name", self.name)?,
            email: required("email", self.email)?,
            subject: required("subject", self.subject)?,
            message: required("message", self.message)?,
            submitted_at: None,
        };

        Ok(Submission {
            contact,
            token: self.token.unwrap_or_default(),
            remote_origin,
        })
    }
}

fn required(field: &'static str, value: Option<String>) -> Result<ContactText, ValidationError> {
    value
        .as_deref()
        .unwrap_or_default()
        .parse()
        .map_err(|_| ValidationError::MissingField(field))
}

#[derive(Debug, Serialize)]
struct ContactCreated {
    success: bool,
    msg: &'static str,
    contact: Contact,
}

/// Contact form submission endpoint
#[tracing::instrument(name = "Submit contact form", skip(req, form, verifier, store))]
#[post("/contact")]
async fn create(
    req: HttpRequest,
    form: web::Json<ContactForm>,
    verifier: web::Data<dyn Verifier>,
    store: web::Data<dyn ContactStore>,
) -> RestResult<impl Responder> {
    let remote_origin = req.peer_addr().map(|addr| addr.ip().to_string());
    let submission = form.into_inner().into_submission(remote_origin)?;

    let contact = submission::submit(verifier.get_ref(), store.get_ref(), submission).await?;

    Ok(HttpResponse::Ok().json(ContactCreated {
        success: true,
        msg: "Message sent successfully!",
        contact,
    }))
}

#[derive(Debug, Deserialize)]
pub struct AdminQuery {
    password: Option<String>,
}

#[derive(Debug, Serialize)]
struct ContactList {
    success: bool,
    contacts: Vec<Contact>,
}

/// List all contacts, newest first
#[tracing::instrument(name = "List contacts", skip(query, admin_password, store))]
#[get("/contacts")]
async fn list(
    // An unreadable query string is treated as a missing password
    query: Option<web::Query<AdminQuery>>,
    admin_password: web::Data<AdminPassword>,
    store: web::Data<dyn ContactStore>,
) -> RestResult<impl Responder> {
    let password = query.as_ref().and_then(|query| query.password.as_deref());

    let contacts =
        admin::list_contacts(admin_password.get_ref(), store.get_ref(), password).await?;

    Ok(HttpResponse::Ok().json(ContactList {
        success: true,
        contacts,
    }))
}

#[derive(Debug, Deserialize)]
pub struct AdminBody {
    password: Option<String>,
}

#[derive(Debug, Serialize)]
struct ContactDeleted {
    success: bool,
    msg: &'static str,
}

/// Delete a contact by id
#[tracing::instrument(name = "Delete contact", skip(body, admin_password, store))]
#[delete("/contacts/{id}")]
async fn remove(
    path: web::Path<(String,)>,
    // A missing or unreadable body is treated as a missing password
    body: Option<web::Json<AdminBody>>,
    admin_password: web::Data<AdminPassword>,
    store: web::Data<dyn ContactStore>,
) -> RestResult<impl Responder> {
    let (id,) = path.into_inner();
    let password = body.as_ref().and_then(|body| body.password.as_deref());

    admin::delete_contact(admin_password.get_ref(), store.get_ref(), password, &id).await?;

    Ok(HttpResponse::Ok().json(ContactDeleted {
        success: true,
        msg: "Contact deleted successfully",
    }))
}

/// Contacts API endpoints
pub fn scope() -> impl HttpServiceFactory {
    web::scope("/api")
        .service(create)
        .service(list)
        .service(remove)
}

use std::net::TcpListener;
use std::sync::Arc;

use actix_web::dev::Server;
use actix_web::error::JsonPayloadError;
use actix_web::{get, HttpRequest, HttpResponse, Responder};
use actix_web::{web, App, HttpServer};

use tracing_actix_web::TracingLogger;

use crate::auth::AdminPassword;
use crate::client::Verifier;
use crate::controller::contacts;
use crate::error::RestError;
use crate::repo::ContactStore;

/// Simple health-check endpoint
#[tracing::instrument(name = "Health check")]
#[get("/health_check")]
async fn health_check() -> impl Responder {
    HttpResponse::Ok().finish()
}

/// Render unreadable JSON bodies like every other client error
fn json_error_handler(error: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    tracing::info!("Rejected unreadable JSON body: {}", error);
    RestError::BadRequest("Invalid request body.").into()
}

/// Run the application on a specified TCP listener
pub fn run(
    listener: TcpListener,
    store: Arc<dyn ContactStore>,
    verifier: Arc<dyn Verifier>,
    admin_password: AdminPassword,
) -> anyhow::Result<Server> {
    // Wrap application data
    let store: web::Data<dyn ContactStore> = web::Data::from(store);
    let verifier: web::Data<dyn Verifier> = web::Data::from(verifier);
    let admin_password = web::Data::new(admin_password);

    // Start the server
    let server = HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .app_data(web::JsonConfig::default().error_handler(json_error_handler))
            .app_data(store.clone())
            .app_data(verifier.clone())
            .app_data(admin_password.clone())
            .service(health_check)
            .service(contacts::scope())
    })
    .listen(listener)?
    .run();

    Ok(server)
}

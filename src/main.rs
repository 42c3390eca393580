use std::net::TcpListener;
use std::sync::Arc;

use anyhow::Context;

use sqlx::PgPool;

use contactd::app;
use contactd::auth::AdminPassword;
use contactd::client::{CaptchaClient, Verifier};
use contactd::repo::{ContactStore, MemoryContactStore, PgContactStore};
use contactd::settings::{DatabaseSettings, Settings, StorageBackend};
use contactd::telemetry;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let subscriber = telemetry::create_subscriber(telemetry::DEFAULT_ENV_FILTER, std::io::stdout);
    telemetry::set_subscriber(subscriber)?;

    let settings = Settings::load().context("Failed to load settings")?;

    let admin_password = AdminPassword::new(settings.admin.password())
        .context("`admin.password` must be set (APP_ADMIN__PASSWORD)")?;

    let store = connect_store(&settings.database).await?;

    let verifier: Arc<dyn Verifier> = Arc::new(CaptchaClient::new(
        settings.captcha.api_url()?,
        settings.captcha.api_timeout(),
        settings.captcha.secret(),
    )?);

    let listener = TcpListener::bind(settings.app.addr())?;
    tracing::info!("Listening on {}", listener.local_addr()?);

    app::run(listener, store, verifier, admin_password)?
        .await
        .context("Failed to run app")
}

/// Open the configured contact store, running pending migrations for Postgres
async fn connect_store(settings: &DatabaseSettings) -> anyhow::Result<Arc<dyn ContactStore>> {
    match settings.backend() {
        StorageBackend::Postgres => {
            let pool = PgPool::connect_with(settings.connect_options()?)
                .await
                .context("Failed to connect to database")?;

            sqlx::migrate!("./migrations")
                .run(&pool)
                .await
                .context("Failed to run database migrations")?;

            Ok(Arc::new(PgContactStore::new(pool)))
        }
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory contact store, contacts are lost on restart");
            Ok(Arc::new(MemoryContactStore::new()))
        }
    }
}

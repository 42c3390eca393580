use std::env;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use anyhow::Context;

use config::{Config, Environment, File};

use secrecy::{ExposeSecret, Secret};

use serde::Deserialize;
use serde_aux::prelude::*;

use sqlx::postgres::PgConnectOptions;

use url::Url;

/// Runtime environment, either `Dev` for local development, or `Prod` for release
#[derive(Debug)]
pub enum Runtime {
    Dev,
    Prod,
}

impl Runtime {
    pub fn as_str(&self) -> &str {
        match self {
            Runtime::Dev => "dev",
            Runtime::Prod => "prod",
        }
    }
}

impl TryFrom<String> for Runtime {
    type Error = anyhow::Error;

    fn try_from(s: String) -> anyhow::Result<Self> {
        match s.to_lowercase().as_str() {
            "dev" => Ok(Self::Dev),
            "prod" => Ok(Self::Prod),
            other => anyhow::bail!("{} is not a valid runtime environment", other),
        }
    }
}

/// Application settings wrapper
#[derive(Debug, Deserialize)]
pub struct Settings {
    pub app: ApplicationSettings,
    pub database: DatabaseSettings,
    pub captcha: CaptchaSettings,
    pub admin: AdminSettings,
}

impl Settings {
    /// Load application settings from the settings directory
    pub fn load() -> anyhow::Result<Self> {
        // Get the path to the settings directory
        let path = env::current_dir()?.join("settings");
        // Get the current environment based on the `APP_ENV` environment variable, default to `Dev`
        let runtime: Runtime = env::var("APP_ENV")
            .unwrap_or_else(|_| "dev".into())
            .try_into()?;

        Self::load_from(runtime, &path)
    }
    /// Load application settings from a specified path and runtime
    pub fn load_from(runtime: Runtime, base_path: &Path) -> anyhow::Result<Self> {
        let settings: Self = Config::builder()
            // Include the base settings
            .add_source(File::from(base_path.join("base")).required(true))
            // Include the runtime settings
            .add_source(File::from(base_path.join(runtime.as_str())).required(true))
            // Override/include any settings from environment variables
            // NOTE: Must be used for secrets. Takes the form `APP_<settings category>__<setting name>`.
            .add_source(
                Environment::with_prefix("app")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()
            .context("Failed to load/deserialize settings")?;

        settings.validate()?;
        Ok(settings)
    }

    /// Refuse to run with a blank CAPTCHA secret or without a database url
    ///
    /// A blank admin password is refused by `AdminPassword::new`.
    fn validate(&self) -> anyhow::Result<()> {
        if self.captcha.secret.expose_secret().trim().is_empty() {
            anyhow::bail!("`captcha.secret` must be set (APP_CAPTCHA__SECRET)");
        }
        if self.database.backend == StorageBackend::Postgres && self.database.url.is_none() {
            anyhow::bail!("`database.url` must be set for the postgres backend (APP_DATABASE__URL)");
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
pub struct ApplicationSettings {
    host: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    port: u16,
}

impl ApplicationSettings {
    /// The application address to bind to
    pub fn addr(&self) -> (&str, u16) {
        (&self.host, self.port)
    }
}

/// Where contacts are stored
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    Postgres,
    /// Keeps contacts in process memory, for local development only
    Memory,
}

#[derive(Debug, Deserialize)]
pub struct DatabaseSettings {
    #[serde(default)]
    backend: StorageBackend,
    url: Option<Secret<String>>,
}

impl DatabaseSettings {
    /// The configured storage backend
    pub fn backend(&self) -> StorageBackend {
        self.backend
    }
    /// The database connection options parsed from the connection string
    pub fn connect_options(&self) -> anyhow::Result<PgConnectOptions> {
        let url = self.url.as_ref().context("Missing database connection string")?;

        PgConnectOptions::from_str(url.expose_secret())
            .context("Failed to parse database connection string")
    }
}

#[derive(Debug, Deserialize)]
pub struct CaptchaSettings {
    api_url: String,
    secret: Secret<String>,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    api_timeout_milliseconds: u64,
}

impl CaptchaSettings {
    /// The verification endpoint URL
    pub fn api_url(&self) -> anyhow::Result<Url> {
        Url::parse(&self.api_url).context("Failed to parse CAPTCHA verification URL")
    }
    /// The verification request timeout duration
    pub fn api_timeout(&self) -> Duration {
        Duration::from_millis(self.api_timeout_milliseconds)
    }
    /// The secret shared with the verification service
    pub fn secret(&self) -> Secret<String> {
        self.secret.clone()
    }
}

#[derive(Debug, Deserialize)]
pub struct AdminSettings {
    password: Secret<String>,
}

impl AdminSettings {
    /// The administrator password
    pub fn password(&self) -> Secret<String> {
        self.password.clone()
    }
}

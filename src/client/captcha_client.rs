use std::time::Duration;

use anyhow::Context;

use reqwest::Client;

use secrecy::Secret;

use serde::Deserialize;

use url::Url;

use crate::error::VerificationError;

/// Judges whether a submission came from a human
#[async_trait::async_trait]
pub trait Verifier: Send + Sync {
    /// Ask for a verdict on a CAPTCHA token
    ///
    /// `Ok(false)` is an explicit negative verdict. `Err` means no verdict could be obtained.
    async fn verify(
        &self,
        token: &str,
        remote_origin: Option<&str>,
    ) -> Result<bool, VerificationError>;
}

/// Client for a reCAPTCHA-style `siteverify` endpoint
#[derive(Debug)]
pub struct CaptchaClient {
    client: Client,

    api_url: Url,
    secret: Secret<String>,
}

impl CaptchaClient {
    pub fn new(api_url: Url, api_timeout: Duration, secret: Secret<String>) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(api_timeout)
            .build()
            .context("Failed to build http client")?;

        Ok(Self {
            client,
            api_url,
            secret,
        })
    }
}

#[async_trait::async_trait]
impl Verifier for CaptchaClient {
    #[tracing::instrument(name = "Verify a CAPTCHA token via API", skip(self, token))]
    async fn verify(
        &self,
        token: &str,
        remote_origin: Option<&str>,
    ) -> Result<bool, VerificationError> {
        use secrecy::ExposeSecret;

        let mut query = vec![
            ("secret", self.secret.expose_secret().as_str()),
            ("response", token),
        ];
        if let Some(remote_ip) = remote_origin {
            query.push(("remoteip", remote_ip));
        }

        // Single attempt, the client timeout bounds the whole exchange
        let body = self
            .client
            .post(self.api_url.clone())
            .query(&query)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        let verdict: SiteVerifyResponse = serde_json::from_str(&body)?;
        if !verdict.success {
            tracing::debug!(
                error_codes = ?verdict.error_codes,
                hostname = ?verdict.hostname,
                "CAPTCHA token rejected"
            );
        }

        Ok(verdict.success)
    }
}

#[derive(Debug, Deserialize)]
struct SiteVerifyResponse {
    success: bool,
    #[serde(default, rename = "error-codes")]
    error_codes: Vec<String>,
    #[serde(default)]
    hostname: Option<String>,
}

use secrecy::Secret;

/// Shared administrator password
///
/// Compared byte-for-byte against the password supplied with each admin request.
#[derive(Debug, Clone)]
pub struct AdminPassword(Secret<String>);

impl AdminPassword {
    pub fn new(password: Secret<String>) -> anyhow::Result<Self> {
        use secrecy::ExposeSecret;

        if password.expose_secret().trim().is_empty() {
            anyhow::bail!("Administrator password cannot be empty");
        }

        Ok(Self(password))
    }

    /// Check a caller supplied password, a missing password never matches
    pub fn matches(&self, candidate: Option<&str>) -> bool {
        use secrecy::ExposeSecret;

        candidate.is_some_and(|candidate| {
            candidate.as_bytes() == self.0.expose_secret().as_bytes()
        })
    }
}

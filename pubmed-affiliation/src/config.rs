//! Client configuration for NCBI E-utilities access
//!
//! NCBI asks every E-utilities caller to identify itself with a contact email
//! and a tool name. The email is mandatory here: a [`PubMedClient`] cannot be
//! built without one, either set explicitly or picked up from `NCBI_EMAIL`.
//!
//! [`PubMedClient`]: crate::PubMedClient

use std::env;
use std::time::Duration;

use crate::error::{PubMedError, Result};
use crate::rate_limit::{NCBI_API_KEY_RATE, NCBI_DEFAULT_RATE, RateLimiter, interval_for_rate};

/// Default E-utilities endpoint
pub const NCBI_BASE_URL: &str = "https://eutils.ncbi.nlm.nih.gov/entrez/eutils";

/// Tool name reported to NCBI when none is configured
pub const DEFAULT_TOOL: &str = "PubMedAffiliationFilter";

/// Environment variable consulted for the contact email
pub const EMAIL_ENV_VAR: &str = "NCBI_EMAIL";

/// Environment variable consulted for the API key
pub const API_KEY_ENV_VAR: &str = "NCBI_API_KEY";

/// Configuration for [`PubMedClient`](crate::PubMedClient)
///
/// # Example
///
/// ```
/// use pubmed_affiliation::ClientConfig;
///
/// let config = ClientConfig::new()
///     .with_email("researcher@university.edu")
///     .with_rate_limit(2.0);
///
/// assert_eq!(config.effective_rate_limit(), 2.0);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// Contact email sent as the `email` parameter
    pub email: Option<String>,
    /// Optional NCBI API key
    pub api_key: Option<String>,
    /// Tool name sent as the `tool` parameter
    pub tool: Option<String>,
    /// Requests per second; `None` picks the NCBI default
    pub rate_limit: Option<f64>,
    /// Override for the E-utilities base URL (used by tests)
    pub base_url: Option<String>,
    /// Per-request timeout
    pub timeout: Duration,
}

impl ClientConfig {
    pub fn new() -> Self {
        Self {
            email: None,
            api_key: None,
            tool: None,
            rate_limit: None,
            base_url: None,
            timeout: Duration::from_secs(30),
        }
    }

    /// Build a configuration from `NCBI_EMAIL` and `NCBI_API_KEY`
    pub fn from_env() -> Self {
        Self::new()
            .with_email_fallback(env::var(EMAIL_ENV_VAR).ok())
            .with_api_key_fallback(env::var(API_KEY_ENV_VAR).ok())
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Use `email` only if no non-blank email has been set yet
    pub fn with_email_fallback(mut self, email: Option<String>) -> Self {
        if non_blank(self.email.as_deref()).is_none() {
            self.email = email.filter(|e| !e.trim().is_empty());
        }
        self
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_api_key_fallback(mut self, api_key: Option<String>) -> Self {
        if non_blank(self.api_key.as_deref()).is_none() {
            self.api_key = api_key.filter(|k| !k.trim().is_empty());
        }
        self
    }

    pub fn with_tool(mut self, tool: impl Into<String>) -> Self {
        self.tool = Some(tool.into());
        self
    }

    /// Set the maximum number of requests per second
    pub fn with_rate_limit(mut self, requests_per_second: f64) -> Self {
        self.rate_limit = Some(requests_per_second);
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// The contact email, or a configuration error if there is none
    pub fn contact_email(&self) -> Result<&str> {
        non_blank(self.email.as_deref()).ok_or_else(|| {
            PubMedError::configuration(format!(
                "Email address is required. Set via --email or the {} environment variable.",
                EMAIL_ENV_VAR
            ))
        })
    }

    /// Requests per second actually enforced
    pub fn effective_rate_limit(&self) -> f64 {
        match self.rate_limit {
            Some(rate) => rate,
            None if self.has_api_key() => NCBI_API_KEY_RATE,
            None => NCBI_DEFAULT_RATE,
        }
    }

    pub fn effective_base_url(&self) -> &str {
        self.base_url
            .as_deref()
            .unwrap_or(NCBI_BASE_URL)
            .trim_end_matches('/')
    }

    pub fn effective_tool(&self) -> &str {
        non_blank(self.tool.as_deref()).unwrap_or(DEFAULT_TOOL)
    }

    pub fn effective_user_agent(&self) -> String {
        format!("{}/{}", self.effective_tool(), env!("CARGO_PKG_VERSION"))
    }

    /// Check every precondition a client needs before it is built
    pub fn validate(&self) -> Result<()> {
        self.contact_email()?;

        let rate = self.effective_rate_limit();
        if !rate.is_finite() || rate <= 0.0 {
            return Err(PubMedError::configuration(format!(
                "Requests per second must be a positive number, got {}",
                rate
            )));
        }

        if interval_for_rate(rate).is_none() {
            return Err(PubMedError::configuration(format!(
                "Requests per second {} is too low to schedule",
                rate
            )));
        }

        Ok(())
    }

    /// Query parameters appended to every E-utilities request
    pub fn build_api_params(&self) -> Vec<(String, String)> {
        let mut params = vec![("tool".to_string(), self.effective_tool().to_string())];

        if let Some(email) = non_blank(self.email.as_deref()) {
            params.push(("email".to_string(), email.to_string()));
        }

        if let Some(key) = non_blank(self.api_key.as_deref()) {
            params.push(("api_key".to_string(), key.to_string()));
        }

        params
    }

    /// NCBI preset unless an explicit rate was configured
    pub fn create_rate_limiter(&self) -> RateLimiter {
        match self.rate_limit {
            Some(rate) => RateLimiter::new(rate),
            None if self.has_api_key() => RateLimiter::ncbi_with_key(),
            None => RateLimiter::ncbi_default(),
        }
    }

    fn has_api_key(&self) -> bool {
        non_blank(self.api_key.as_deref()).is_some()
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new()
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

pub mod papers;

use pubmed_affiliation::{ClientConfig, PubMedClient, Result};

/// Build a client from CLI flags, falling back to the environment
///
/// Flags win over `NCBI_EMAIL` / `NCBI_API_KEY`; clap already applies the
/// same fallback, so this only matters when the library is driven without it.
pub fn create_pubmed_client(
    api_key: Option<&str>,
    email: Option<&str>,
    tool: &str,
    rate_limit: Option<f64>,
) -> Result<PubMedClient> {
    let mut config = ClientConfig::new().with_tool(tool);

    if let Some(email) = email {
        config = config.with_email(email);
    }

    if let Some(key) = api_key {
        config = config.with_api_key(key);
    }

    if let Some(rate) = rate_limit {
        config = config.with_rate_limit(rate);
    }

    let env = ClientConfig::from_env();
    let config = config
        .with_email_fallback(env.email)
        .with_api_key_fallback(env.api_key);

    PubMedClient::new(config)
}

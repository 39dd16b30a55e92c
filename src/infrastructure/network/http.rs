// HTTP client utilities
use crate::domain::error::TranslatorError;
use reqwest::Client;

/// Generic desktop browser identification. The unofficial Google endpoint
/// blocks clients that announce themselves as libraries.
pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0 Safari/537.36";

/// Create the shared HTTP client.
///
/// No global timeout is set; each provider applies its own per request.
pub fn create_client() -> Result<Client, TranslatorError> {
    Ok(Client::builder()
        .pool_max_idle_per_host(10)
        .pool_idle_timeout(std::time::Duration::from_secs(30))
        .user_agent(concat!("kntr/", env!("CARGO_PKG_VERSION")))
        .build()?)
}

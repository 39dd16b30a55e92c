pub mod google_cloud;
pub mod google_web;
pub mod libretranslate;
pub mod mymemory;

use crate::domain::traits::TranslationProvider;
use crate::infrastructure::config::{
    ProvidersConfig, PROVIDER_GOOGLE_CLOUD, PROVIDER_GOOGLE_WEB, PROVIDER_LIBRETRANSLATE,
    PROVIDER_MYMEMORY,
};
use reqwest::Client;
use std::sync::Arc;
use tracing::{debug, info, warn};

pub use google_cloud::{load_credential, CloudCredential, GoogleCloudTranslator};
pub use google_web::GoogleWebTranslator;
pub use libretranslate::LibreTranslator;
pub use mymemory::MyMemoryTranslator;

/// Assemble the ordered provider list once, at start-up.
///
/// Providers whose credentials or endpoint are missing are simply left out,
/// so the chain never has to check availability per request.
pub fn build_providers(
    config: &ProvidersConfig,
    client: &Client,
) -> Vec<Arc<dyn TranslationProvider>> {
    let mut providers: Vec<Arc<dyn TranslationProvider>> = Vec::new();
    let mut seen: Vec<&str> = Vec::new();

    for name in &config.order {
        let name = name.trim();
        if seen.contains(&name) {
            debug!(provider = name, "Duplicate provider in order, ignoring");
            continue;
        }
        seen.push(name);

        let provider: Option<Arc<dyn TranslationProvider>> = match name {
            PROVIDER_GOOGLE_WEB if config.google_web.enable => Some(Arc::new(
                GoogleWebTranslator::new(client.clone(), &config.google_web),
            ) as Arc<dyn TranslationProvider>),
            PROVIDER_GOOGLE_WEB => None,
            PROVIDER_GOOGLE_CLOUD => load_credential(&config.google_cloud).map(|credential| {
                Arc::new(GoogleCloudTranslator::new(
                    client.clone(),
                    &config.google_cloud,
                    credential,
                )) as Arc<dyn TranslationProvider>
            }),
            PROVIDER_LIBRETRANSLATE => {
                LibreTranslator::from_config(client.clone(), &config.libretranslate)
                    .map(|p| Arc::new(p) as Arc<dyn TranslationProvider>)
            }
            PROVIDER_MYMEMORY if config.mymemory.enable => Some(Arc::new(
                MyMemoryTranslator::new(client.clone(), &config.mymemory),
            ) as Arc<dyn TranslationProvider>),
            PROVIDER_MYMEMORY => None,
            unknown => {
                warn!(provider = unknown, "Unknown translation provider in order, ignoring");
                None
            }
        };

        match provider {
            Some(provider) => providers.push(provider),
            None => debug!(provider = name, "Provider not available, skipped"),
        }
    }

    info!(
        providers = ?providers.iter().map(|p| p.name()).collect::<Vec<_>>(),
        "Translation providers ready"
    );
    providers
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(config: &ProvidersConfig) -> Vec<&'static str> {
        build_providers(config, &Client::new())
            .iter()
            .map(|p| p.name())
            .collect()
    }

    #[test]
    fn default_chain_skips_providers_without_credentials() {
        assert_eq!(names(&ProvidersConfig::default()), vec!["google_web", "mymemory"]);
    }

    #[test]
    fn full_chain_keeps_canonical_order() {
        let mut config = ProvidersConfig::default();
        config.google_cloud.api_key = Some("key".to_string());
        config.libretranslate.url = Some("http://localhost:5001".to_string());

        assert_eq!(
            names(&config),
            vec!["google_web", "google_cloud", "libretranslate", "mymemory"]
        );
    }

    #[test]
    fn order_is_configurable_and_deduplicated() {
        let mut config = ProvidersConfig::default();
        config.google_cloud.api_key = Some("key".to_string());
        config.order = ["google_cloud", "bogus", "mymemory", "google_cloud"]
            .iter()
            .map(|s| s.to_string())
            .collect();

        assert_eq!(names(&config), vec!["google_cloud", "mymemory"]);
    }

    #[test]
    fn disabled_providers_are_absent() {
        let mut config = ProvidersConfig::default();
        config.google_web.enable = false;
        config.mymemory.enable = false;
        assert!(names(&config).is_empty());
    }
}

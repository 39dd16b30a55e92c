use crate::domain::error::ProviderFailure;
use crate::domain::model::{
    BatchItem, ChainFailure, ProviderAttempt, ProviderInfo, TranslationOutcome, TranslationReport,
    TranslationRequest,
};
use crate::domain::traits::TranslationProvider;
use std::sync::Arc;
use tracing::{debug, warn};

/// Ordered list of providers, built once at start-up and shared read-only.
///
/// Providers are tried strictly one after another. The first acceptable
/// result wins and no later provider is called.
#[derive(Clone, Default)]
pub struct TranslatorChain {
    providers: Vec<Arc<dyn TranslationProvider>>,
}

impl TranslatorChain {
    pub fn new(providers: Vec<Arc<dyn TranslationProvider>>) -> Self {
        Self { providers }
    }

    pub fn provider_names(&self) -> Vec<&'static str> {
        self.providers.iter().map(|p| p.name()).collect()
    }

    /// Providers in the order they will be tried
    pub fn providers(&self) -> Vec<ProviderInfo> {
        self.providers
            .iter()
            .map(|p| ProviderInfo {
                name: p.name(),
                kind: p.kind(),
            })
            .collect()
    }

    pub async fn translate(&self, text: &str) -> TranslationOutcome {
        self.translate_with_report(text).await.outcome
    }

    pub async fn translate_with_report(&self, text: &str) -> TranslationReport {
        let mut attempts = Vec::new();

        if text.trim().is_empty() {
            return TranslationReport {
                outcome: TranslationOutcome::Translated(String::new()),
                attempts,
            };
        }

        if self.providers.is_empty() {
            warn!("Translation requested but no providers are configured");
            return TranslationReport {
                outcome: TranslationOutcome::Failed(ChainFailure::NoProvidersConfigured),
                attempts,
            };
        }

        // providers and the echo check all see the same trimmed text
        let request = TranslationRequest::new(text.trim());

        for provider in &self.providers {
            debug!(provider = provider.name(), "Attempting translation");

            let verdict = provider
                .attempt(&request)
                .await
                .and_then(|candidate| accept(&request.source_text, candidate));

            match verdict {
                Ok(translated) => {
                    debug!(provider = provider.name(), "Translation accepted");
                    attempts.push(ProviderAttempt {
                        provider: provider.name(),
                        failure: None,
                    });
                    return TranslationReport {
                        outcome: TranslationOutcome::Translated(translated),
                        attempts,
                    };
                }
                Err(failure) => {
                    warn!(provider = provider.name(), %failure, "Provider failed, trying next");
                    attempts.push(ProviderAttempt {
                        provider: provider.name(),
                        failure: Some(failure),
                    });
                }
            }
        }

        TranslationReport {
            outcome: TranslationOutcome::Failed(ChainFailure::AllProvidersExhausted),
            attempts,
        }
    }

    /// Translate each text on its own, in order. A failed text yields
    /// `kannada: None` and does not stop the rest of the batch.
    pub async fn translate_batch<S: AsRef<str>>(&self, texts: &[S]) -> Vec<BatchItem> {
        let mut items = Vec::with_capacity(texts.len());
        for text in texts {
            let text = text.as_ref();
            let kannada = self.translate(text).await.into_text();
            items.push(BatchItem {
                english: text.to_string(),
                kannada,
            });
        }
        items
    }
}

/// Acceptance predicate applied to every provider's extracted output.
///
/// Several upstreams echo the input back instead of failing, so an exact
/// echo counts as a failure.
pub fn accept(input: &str, candidate: String) -> Result<String, ProviderFailure> {
    if candidate.trim().is_empty() {
        return Err(ProviderFailure::Empty);
    }
    if candidate == input {
        return Err(ProviderFailure::EchoedInput);
    }
    Ok(candidate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::ProviderKind;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    enum Reply {
        Text(&'static str),
        Echo,
        // echoes what a padding-insensitive upstream would send back
        TrimmedEcho,
        Fail,
    }

    struct FakeProvider {
        name: &'static str,
        reply: Reply,
        calls: AtomicUsize,
    }

    impl FakeProvider {
        fn new(name: &'static str, reply: Reply) -> Arc<Self> {
            Arc::new(Self {
                name,
                reply,
                calls: AtomicUsize::new(0),
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl TranslationProvider for FakeProvider {
        fn name(&self) -> &'static str {
            self.name
        }

        fn kind(&self) -> ProviderKind {
            ProviderKind::FreeFallbackApi
        }

        async fn attempt(&self, request: &TranslationRequest) -> Result<String, ProviderFailure> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match self.reply {
                Reply::Text(text) => Ok(text.to_string()),
                Reply::Echo => Ok(request.source_text.clone()),
                Reply::TrimmedEcho => Ok(request.source_text.trim().to_string()),
                Reply::Fail => Err(ProviderFailure::transport(self.name, "connection refused")),
            }
        }
    }

    fn chain_of(providers: &[Arc<FakeProvider>]) -> TranslatorChain {
        TranslatorChain::new(
            providers
                .iter()
                .map(|p| p.clone() as Arc<dyn TranslationProvider>)
                .collect(),
        )
    }

    #[tokio::test]
    async fn blank_input_short_circuits_without_calls() {
        let first = FakeProvider::new("first", Reply::Text("ಹಲೋ"));
        let chain = chain_of(&[first.clone()]);

        for input in ["", "   ", "\n\t"] {
            let report = chain.translate_with_report(input).await;
            assert_eq!(report.outcome, TranslationOutcome::Translated(String::new()));
            assert!(report.attempts.is_empty());
        }
        assert_eq!(first.calls(), 0);
    }

    #[tokio::test]
    async fn first_accepted_result_stops_the_chain() {
        let first = FakeProvider::new("first", Reply::Text("ನಮಸ್ಕಾರ"));
        let second = FakeProvider::new("second", Reply::Text("unused"));
        let chain = chain_of(&[first.clone(), second.clone()]);

        let outcome = chain.translate("Hello").await;

        assert_eq!(outcome, TranslationOutcome::Translated("ನಮಸ್ಕಾರ".to_string()));
        assert_eq!(first.calls(), 1);
        assert_eq!(second.calls(), 0);
    }

    #[tokio::test]
    async fn echoed_input_falls_through() {
        let echo = FakeProvider::new("echo", Reply::Echo);
        let real = FakeProvider::new("real", Reply::Text("ಸ್ವಾಗತ"));
        let chain = chain_of(&[echo.clone(), real.clone()]);

        let report = chain.translate_with_report("Welcome").await;

        assert_eq!(report.outcome, TranslationOutcome::Translated("ಸ್ವಾಗತ".to_string()));
        assert_eq!(report.attempts.len(), 2);
        assert_eq!(report.attempts[0].failure, Some(ProviderFailure::EchoedInput));
        assert!(report.attempts[1].failure.is_none());
    }

    #[tokio::test]
    async fn padded_input_is_trimmed_before_the_echo_check() {
        let echo = FakeProvider::new("echo", Reply::TrimmedEcho);
        let chain = chain_of(&[echo.clone()]);

        let report = chain.translate_with_report("Hello ").await;
        assert_eq!(
            report.outcome,
            TranslationOutcome::Failed(ChainFailure::AllProvidersExhausted)
        );
        assert_eq!(report.attempts[0].failure, Some(ProviderFailure::EchoedInput));

        let items = chain.translate_batch(&[" Welcome", "\tThanks\n"]).await;
        assert_eq!(items[0].english, " Welcome");
        assert_eq!(items[0].kannada, None);
        assert_eq!(items[1].kannada, None);
        assert_eq!(echo.calls(), 3);
    }

    #[tokio::test]
    async fn empty_output_and_transport_errors_fall_through() {
        let empty = FakeProvider::new("empty", Reply::Text(""));
        let broken = FakeProvider::new("broken", Reply::Fail);
        let last = FakeProvider::new("last", Reply::Text("ಯಂತ್ರ"));
        let chain = chain_of(&[empty.clone(), broken.clone(), last.clone()]);

        let outcome = chain.translate("machine").await;

        assert_eq!(outcome, TranslationOutcome::Translated("ಯಂತ್ರ".to_string()));
        assert_eq!((empty.calls(), broken.calls(), last.calls()), (1, 1, 1));
    }

    #[tokio::test]
    async fn each_provider_is_called_at_most_once() {
        let a = FakeProvider::new("a", Reply::Fail);
        let b = FakeProvider::new("b", Reply::Echo);
        let chain = chain_of(&[a.clone(), b.clone()]);

        let outcome = chain.translate("Hello").await;

        assert_eq!(
            outcome,
            TranslationOutcome::Failed(ChainFailure::AllProvidersExhausted)
        );
        assert_eq!(a.calls(), 1);
        assert_eq!(b.calls(), 1);
    }

    #[test]
    fn lists_providers_in_chain_order() {
        let chain = chain_of(&[
            FakeProvider::new("b", Reply::Fail),
            FakeProvider::new("a", Reply::Fail),
        ]);
        let providers = chain.providers();
        assert_eq!(providers.len(), 2);
        assert_eq!(providers[0].name, "b");
        assert_eq!(providers[1].kind, ProviderKind::FreeFallbackApi);
        assert_eq!(chain.provider_names(), vec!["b", "a"]);
    }

    #[tokio::test]
    async fn empty_chain_reports_no_providers() {
        let chain = TranslatorChain::default();
        assert_eq!(
            chain.translate("Hello").await,
            TranslationOutcome::Failed(ChainFailure::NoProvidersConfigured)
        );
        // blank input still succeeds even with nothing configured
        assert_eq!(
            chain.translate(" ").await,
            TranslationOutcome::Translated(String::new())
        );
    }

    #[tokio::test]
    async fn batch_keeps_order_and_length_through_failures() {
        struct Picky;

        #[async_trait]
        impl TranslationProvider for Picky {
            fn name(&self) -> &'static str {
                "picky"
            }

            fn kind(&self) -> ProviderKind {
                ProviderKind::UnofficialWebEndpoint
            }

            async fn attempt(
                &self,
                request: &TranslationRequest,
            ) -> Result<String, ProviderFailure> {
                match request.source_text.as_str() {
                    "one" => Ok("ಒಂದು".to_string()),
                    "three" => Ok("ಮೂರು".to_string()),
                    _ => Err(ProviderFailure::Rejected("unsupported".to_string())),
                }
            }
        }

        let chain = TranslatorChain::new(vec![Arc::new(Picky) as Arc<dyn TranslationProvider>]);
        let items = chain.translate_batch(&["one", "two", "three", ""]).await;

        assert_eq!(items.len(), 4);
        assert_eq!(items[0].english, "one");
        assert_eq!(items[0].kannada.as_deref(), Some("ಒಂದು"));
        assert_eq!(items[1].english, "two");
        assert_eq!(items[1].kannada, None);
        assert_eq!(items[2].kannada.as_deref(), Some("ಮೂರು"));
        assert_eq!(items[3].kannada.as_deref(), Some(""));
    }

    #[test]
    fn accept_rejects_whitespace_and_exact_echo() {
        assert_eq!(accept("Hi", "  ".to_string()), Err(ProviderFailure::Empty));
        assert_eq!(
            accept("Hi", "Hi".to_string()),
            Err(ProviderFailure::EchoedInput)
        );
        // only an exact echo counts
        assert_eq!(accept("Hi", "hi".to_string()), Ok("hi".to_string()));
    }
}

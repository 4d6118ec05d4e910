//! Token counting service
//!
//! Configured entry point used by the HTTP handlers. Holds the counting
//! settings, the default provider, and (optionally) a shared encoder cache.

use serde::Serialize;

use super::counter::{CountSettings, CounterStrategy};
use super::encoder::EncoderCache;
use super::error::TokenizerError;
use super::provider::{resolve, Provider};
use super::selection::TextSelection;
use crate::config::Config;
use crate::metrics::record_tokens;

/// Token counts for a document and its optional selection
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CountReport {
    pub provider: Provider,
    pub document_tokens: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selection_tokens: Option<usize>,
}

/// Provider-aware token counter
pub struct TokenCountingService {
    settings: CountSettings,
    default_provider: Provider,
    cache: Option<EncoderCache>,
}

impl TokenCountingService {
    /// Create a new service
    pub fn new(settings: CountSettings, default_provider: Provider, cache_encoders: bool) -> Self {
        if CounterStrategy::VendorC.is_approximate(&settings) {
            tracing::warn!(
                encoding = %CounterStrategy::VendorC.encoder_source(&settings).key(),
                "No Claude vocabulary configured, Claude counts are approximate"
            );
        }

        Self {
            settings,
            default_provider,
            cache: cache_encoders.then(EncoderCache::new),
        }
    }

    /// Create a service from application configuration
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            CountSettings {
                reference_model: config.reference_model.clone(),
                vendor_vocabulary: config.claude_vocab_path.clone(),
            },
            config.default_provider,
            config.cache_encoders,
        )
    }

    pub fn default_provider(&self) -> Provider {
        self.default_provider
    }

    pub fn settings(&self) -> &CountSettings {
        &self.settings
    }

    /// Whether counts for `provider` come from an approximate table
    pub fn is_approximate(&self, provider: Provider) -> bool {
        resolve(provider).is_approximate(&self.settings)
    }

    /// Count tokens in `text` for `provider`. Returns 0 on any failure.
    pub fn count_tokens(&self, text: &str, provider: Provider) -> usize {
        let count = resolve(provider).count_tokens(text, &self.settings, self.cache.as_ref());
        record_tokens(provider.as_str(), count as u64);
        count
    }

    /// Count tokens for the default provider
    pub fn count_tokens_default(&self, text: &str) -> usize {
        self.count_tokens(text, self.default_provider)
    }

    /// Count the whole document and, when non-empty, the selected range.
    ///
    /// The two counts are independent calls.
    pub fn count_document(
        &self,
        text: &str,
        selection: Option<TextSelection>,
        provider: Provider,
    ) -> CountReport {
        let document_tokens = self.count_tokens(text, provider);
        let selection_tokens = selection
            .and_then(|s| s.slice(text))
            .map(|selected| self.count_tokens(selected, provider));

        CountReport {
            provider,
            document_tokens,
            selection_tokens,
        }
    }

    /// Try to load the encoder behind a strategy without counting anything
    pub fn check_encoder(&self, strategy: CounterStrategy) -> Result<(), TokenizerError> {
        let source = strategy.encoder_source(&self.settings);
        match &self.cache {
            Some(cache) => cache.get_or_load(&source).map(|_| ()),
            None => source.load().map(|_| ()),
        }
    }
}

impl Default for TokenCountingService {
    fn default() -> Self {
        Self::new(CountSettings::default(), Provider::default(), true)
    }
}

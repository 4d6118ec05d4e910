//! Provider identifiers and strategy resolution
//!
//! Maps a provider identifier (as persisted by the caller) to the counting
//! strategy that approximates that provider's tokenizer. Resolution is total:
//! unknown identifiers land in the fallback group instead of being rejected.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::counter::CounterStrategy;

/// Provider whose tokenization scheme determines the count
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "&'static str")]
pub enum Provider {
    /// OpenAI BPE (scheme A)
    #[default]
    OpenAi,
    /// Anthropic Claude (vendor-C scheme)
    Claude,
    /// Google Gemini, approximated with scheme A
    Gemini,
    /// Unspecified provider, and anything unrecognized
    Other,
}

impl Provider {
    /// All providers, in display order
    pub const ALL: [Provider; 4] = [
        Provider::OpenAi,
        Provider::Claude,
        Provider::Gemini,
        Provider::Other,
    ];

    /// Parse a provider identifier.
    ///
    /// Matching ignores ASCII case and surrounding whitespace. Anything that
    /// is not a known identifier maps to [`Provider::Other`].
    pub fn parse(identifier: &str) -> Self {
        let trimmed = identifier.trim();
        if trimmed.eq_ignore_ascii_case("openai") {
            Provider::OpenAi
        } else if trimmed.eq_ignore_ascii_case("claude") {
            Provider::Claude
        } else if trimmed.eq_ignore_ascii_case("gemini") {
            Provider::Gemini
        } else {
            if !trimmed.eq_ignore_ascii_case("other") {
                tracing::debug!(
                    identifier = %identifier,
                    "Unrecognized token provider, using fallback counter"
                );
            }
            Provider::Other
        }
    }

    /// Identifier as persisted by callers
    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::OpenAi => "openai",
            Provider::Claude => "claude",
            Provider::Gemini => "gemini",
            Provider::Other => "other",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for Provider {
    fn from(identifier: &str) -> Self {
        Provider::parse(identifier)
    }
}

impl From<String> for Provider {
    fn from(identifier: String) -> Self {
        Provider::parse(&identifier)
    }
}

impl From<Provider> for &'static str {
    fn from(provider: Provider) -> Self {
        provider.as_str()
    }
}

/// Resolve a provider to its counting strategy
pub fn resolve(provider: Provider) -> CounterStrategy {
    let strategy = match provider {
        Provider::OpenAi => CounterStrategy::SchemeA,
        Provider::Claude => CounterStrategy::VendorC,
        Provider::Gemini | Provider::Other => CounterStrategy::Fallback,
    };

    tracing::debug!(
        provider = %provider,
        strategy = strategy.name(),
        "Resolved token counter strategy"
    );

    strategy
}

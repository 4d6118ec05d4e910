//! Token counting module
//!
//! Counts tokens the way a given provider's tokenizer would, using
//! tiktoken-rs for the BPE work. Providers resolve to a small set of
//! strategies; counting never returns an error and reports 0 on failure.

pub mod counter;
pub mod encoder;
pub mod error;
pub mod provider;
pub mod selection;
pub mod service;

pub use counter::{CountSettings, CounterStrategy};
pub use encoder::{BuiltinEncoding, EncoderCache, EncoderSource};
pub use error::TokenizerError;
pub use provider::{resolve, Provider};
pub use selection::TextSelection;
pub use service::{CountReport, TokenCountingService};

/// Count tokens in `text` as `provider` would tokenize it.
///
/// Uses the default reference tables with an encoder scoped to this call.
/// Never fails: any internal error is logged and reported as 0.
pub fn count_tokens(text: &str, provider: Provider) -> usize {
    resolve(provider).count_tokens(text, &CountSettings::default(), None)
}

/// Like [`count_tokens`], for a raw provider identifier.
///
/// Unrecognized identifiers count with the fallback strategy.
pub fn count_tokens_for(text: &str, provider: &str) -> usize {
    count_tokens(text, Provider::parse(provider))
}

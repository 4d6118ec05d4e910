//! Token counter strategies
//!
//! Each strategy binds one provider group to an encoding algorithm:
//! - `SchemeA`: OpenAI BPE for the configured reference model
//! - `VendorC`: NFKC normalization followed by Claude's BPE table
//! - `Fallback`: scheme A's algorithm, used as an approximation
//!
//! Counting never fails from the caller's point of view. Every load or encode
//! error, including a panic inside the encoder, is logged and reported as 0.

use std::panic::{self, AssertUnwindSafe};
use std::path::PathBuf;
use std::time::Instant;

use tiktoken_rs::CoreBPE;
use unicode_normalization::UnicodeNormalization;

use super::encoder::{BuiltinEncoding, EncoderCache, EncoderSource};
use super::error::TokenizerError;
use crate::metrics::{record_count_duration, record_count_failure};

/// Reference model for scheme A when none is configured
pub const DEFAULT_REFERENCE_MODEL: &str = "gpt-4";

/// Claude table used when neither a vocabulary file nor the bundled ranks
/// are available. Shares the GPT-2 pre-tokenization pattern with Claude.
pub const VENDOR_APPROXIMATE_ENCODING: BuiltinEncoding = BuiltinEncoding::P50kBase;

/// Which tables the strategies encode with
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountSettings {
    /// Reference model for scheme A and the fallback
    pub reference_model: String,
    /// Optional vendor-C rank file
    pub vendor_vocabulary: Option<PathBuf>,
}

impl Default for CountSettings {
    fn default() -> Self {
        Self {
            reference_model: DEFAULT_REFERENCE_MODEL.to_string(),
            vendor_vocabulary: None,
        }
    }
}

/// Counting strategy selected for a provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CounterStrategy {
    SchemeA,
    VendorC,
    Fallback,
}

impl CounterStrategy {
    /// Name used in logs and metrics
    pub fn name(&self) -> &'static str {
        match self {
            CounterStrategy::SchemeA => "openai",
            CounterStrategy::VendorC => "claude",
            CounterStrategy::Fallback => "fallback",
        }
    }

    /// Encoder table this strategy uses under the given settings.
    ///
    /// Claude resolves to the configured rank file, then the bundled Claude
    /// ranks, then [`VENDOR_APPROXIMATE_ENCODING`].
    pub fn encoder_source(&self, settings: &CountSettings) -> EncoderSource {
        match self {
            CounterStrategy::SchemeA | CounterStrategy::Fallback => {
                EncoderSource::Model(settings.reference_model.clone())
            }
            CounterStrategy::VendorC => match &settings.vendor_vocabulary {
                Some(path) => EncoderSource::RankFile(path.clone()),
                None if BuiltinEncoding::Claude.is_available() => {
                    EncoderSource::Builtin(BuiltinEncoding::Claude)
                }
                None => EncoderSource::Builtin(VENDOR_APPROXIMATE_ENCODING),
            },
        }
    }

    /// True when this strategy counts with an approximate table
    pub fn is_approximate(&self, settings: &CountSettings) -> bool {
        match self {
            CounterStrategy::SchemeA => false,
            CounterStrategy::Fallback => true,
            CounterStrategy::VendorC => {
                self.encoder_source(settings)
                    == EncoderSource::Builtin(VENDOR_APPROXIMATE_ENCODING)
            }
        }
    }

    /// Count tokens in `text`, returning 0 on any failure.
    ///
    /// Without a cache the encoder lives only for the duration of this call.
    pub fn count_tokens(
        &self,
        text: &str,
        settings: &CountSettings,
        cache: Option<&EncoderCache>,
    ) -> usize {
        if text.is_empty() {
            return 0;
        }

        let started = Instant::now();
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
            self.try_count_tokens(text, settings, cache)
        }))
        .unwrap_or_else(|_| {
            Err(TokenizerError::EncodePanicked {
                strategy: self.name(),
            })
        });
        record_count_duration(self.name(), started.elapsed().as_secs_f64());

        match outcome {
            Ok(count) => count,
            Err(e) => {
                tracing::error!(
                    strategy = self.name(),
                    error = %e,
                    "Error counting tokens, reporting 0"
                );
                record_count_failure(self.name());
                0
            }
        }
    }

    fn try_count_tokens(
        &self,
        text: &str,
        settings: &CountSettings,
        cache: Option<&EncoderCache>,
    ) -> Result<usize, TokenizerError> {
        let source = self.encoder_source(settings);

        match self {
            CounterStrategy::SchemeA | CounterStrategy::Fallback => {
                with_encoder(&source, cache, |encoder| encoder.encode_ordinary(text).len())
            }
            CounterStrategy::VendorC => {
                let normalized: String = text.nfkc().collect();
                with_encoder(&source, cache, |encoder| {
                    encoder.encode_ordinary(&normalized).len()
                })
            }
        }
    }
}

/// Run `f` against the encoder for `source`, scoped to this call unless cached
fn with_encoder<T>(
    source: &EncoderSource,
    cache: Option<&EncoderCache>,
    f: impl FnOnce(&CoreBPE) -> T,
) -> Result<T, TokenizerError> {
    match cache {
        Some(cache) => {
            let encoder = cache.get_or_load(source)?;
            Ok(f(&encoder))
        }
        None => {
            let encoder = source.load()?;
            let result = f(&encoder);
            drop(encoder);
            Ok(result)
        }
    }
}

//! Tokenizer failures
//!
//! These never leave the token counting boundary: every variant is logged and
//! collapsed to a count of 0 by [`CounterStrategy::count_tokens`].
//!
//! [`CounterStrategy::count_tokens`]: super::CounterStrategy::count_tokens

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading an encoder or encoding text
#[derive(Debug, Error)]
pub enum TokenizerError {
    #[error("Failed to load encoder '{source_name}': {reason}")]
    EncoderLoad { source_name: String, reason: String },

    #[error("Failed to read vocabulary file {}: {source}", path.display())]
    VocabularyRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed vocabulary file {} at line {line}: {reason}", path.display())]
    VocabularyParse {
        path: PathBuf,
        line: usize,
        reason: String,
    },

    #[error("Encoder panicked while counting with the {strategy} strategy")]
    EncodePanicked { strategy: &'static str },
}

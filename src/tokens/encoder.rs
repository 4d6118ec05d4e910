//! Encoder sources and the shared encoder cache
//!
//! An [`EncoderSource`] describes where a BPE table comes from: a reference
//! model name, one of the bundled tables, or a rank file on disk. Loading builds a fresh [`CoreBPE`]; callers either drop it after a
//! single count or share it through the read-only [`EncoderCache`].

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};

use base64::{engine::general_purpose::STANDARD, Engine as _};
use tiktoken_rs::{get_bpe_from_model, CoreBPE};

use super::error::TokenizerError;

/// GPT-2 style pre-tokenization pattern used with rank-file vocabularies
pub const GPT2_PATTERN: &str =
    r"'s|'t|'re|'ve|'m|'ll|'d| ?\p{L}+| ?\p{N}+| ?[^\s\p{L}\p{N}]+|\s+(?!\S)|\s+";

/// Claude rank table compiled in with the `bundled-claude-vocab` feature
#[cfg(feature = "bundled-claude-vocab")]
const BUNDLED_CLAUDE_RANKS: Option<&str> = Some(include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/assets/claude.tiktoken"
)));

#[cfg(not(feature = "bundled-claude-vocab"))]
const BUNDLED_CLAUDE_RANKS: Option<&str> = None;

/// Bundled BPE tables
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuiltinEncoding {
    Cl100kBase,
    P50kBase,
    R50kBase,
    /// Claude ranks, only present with the `bundled-claude-vocab` feature
    Claude,
}

impl BuiltinEncoding {
    pub fn name(&self) -> &'static str {
        match self {
            BuiltinEncoding::Cl100kBase => "cl100k_base",
            BuiltinEncoding::P50kBase => "p50k_base",
            BuiltinEncoding::R50kBase => "r50k_base",
            BuiltinEncoding::Claude => "claude",
        }
    }

    /// Whether this table is compiled into the current build
    pub fn is_available(&self) -> bool {
        match self {
            BuiltinEncoding::Claude => BUNDLED_CLAUDE_RANKS.is_some(),
            _ => true,
        }
    }
}

/// Where an encoder's table comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EncoderSource {
    /// Table associated with a reference model name (e.g. `gpt-4`)
    Model(String),
    /// Bundled table
    Builtin(BuiltinEncoding),
    /// tiktoken-format rank file, encoded with [`GPT2_PATTERN`]
    RankFile(PathBuf),
}

impl EncoderSource {
    /// Stable cache key for this source
    pub fn key(&self) -> String {
        match self {
            EncoderSource::Model(model) => format!("model:{}", model),
            EncoderSource::Builtin(encoding) => format!("builtin:{}", encoding.name()),
            EncoderSource::RankFile(path) => format!("file:{}", path.display()),
        }
    }

    /// Build a fresh encoder for this source
    pub fn load(&self) -> Result<CoreBPE, TokenizerError> {
        tracing::debug!(source = %self.key(), "Loading BPE encoder");

        match self {
            EncoderSource::Model(model) => {
                get_bpe_from_model(model).map_err(|e| TokenizerError::EncoderLoad {
                    source_name: self.key(),
                    reason: e.to_string(),
                })
            }
            EncoderSource::Builtin(encoding) => {
                let loaded = match encoding {
                    BuiltinEncoding::Cl100kBase => tiktoken_rs::cl100k_base(),
                    BuiltinEncoding::P50kBase => tiktoken_rs::p50k_base(),
                    BuiltinEncoding::R50kBase => tiktoken_rs::r50k_base(),
                    BuiltinEncoding::Claude => return load_bundled_claude(),
                };
                loaded.map_err(|e| TokenizerError::EncoderLoad {
                    source_name: self.key(),
                    reason: e.to_string(),
                })
            }
            EncoderSource::RankFile(path) => load_rank_file(path),
        }
    }
}

fn load_bundled_claude() -> Result<CoreBPE, TokenizerError> {
    match BUNDLED_CLAUDE_RANKS {
        Some(contents) => parse_rank_table(contents, Path::new("assets/claude.tiktoken")),
        None => Err(TokenizerError::EncoderLoad {
            source_name: format!("builtin:{}", BuiltinEncoding::Claude.name()),
            reason: "built without the bundled-claude-vocab feature".to_string(),
        }),
    }
}

fn load_rank_file(path: &Path) -> Result<CoreBPE, TokenizerError> {
    let contents = fs::read_to_string(path).map_err(|source| TokenizerError::VocabularyRead {
        path: path.to_path_buf(),
        source,
    })?;

    parse_rank_table(&contents, path)
}

/// Parse a tiktoken rank table (`<base64 token> <rank>` per line).
///
/// `path` only labels errors and logs.
fn parse_rank_table(contents: &str, path: &Path) -> Result<CoreBPE, TokenizerError> {
    let mut ranks: Vec<(Vec<u8>, usize)> = Vec::new();
    for (idx, line) in contents.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let parse_error = |reason: String| TokenizerError::VocabularyParse {
            path: path.to_path_buf(),
            line: idx + 1,
            reason,
        };

        let (token, rank) = line
            .split_once(char::is_whitespace)
            .ok_or_else(|| parse_error("expected '<base64 token> <rank>'".to_string()))?;
        let token = STANDARD
            .decode(token)
            .map_err(|e| parse_error(format!("invalid base64 token: {}", e)))?;
        let rank = rank
            .trim()
            .parse::<usize>()
            .map_err(|e| parse_error(format!("invalid rank: {}", e)))?;

        ranks.push((token, rank));
    }

    if ranks.is_empty() {
        return Err(TokenizerError::VocabularyParse {
            path: path.to_path_buf(),
            line: 0,
            reason: "vocabulary is empty".to_string(),
        });
    }

    tracing::debug!(path = %path.display(), entries = ranks.len(), "Parsed vocabulary rank file");

    CoreBPE::new(ranks.into_iter().collect(), Default::default(), GPT2_PATTERN).map_err(|e| {
        TokenizerError::EncoderLoad {
            source_name: format!("file:{}", path.display()),
            reason: e.to_string(),
        }
    })
}

/// Read-only encoder cache shared across counting calls
///
/// Entries are inserted once and never mutated afterwards, so readers only
/// ever share immutable `Arc<CoreBPE>` handles. Failed loads are not cached.
#[derive(Default)]
pub struct EncoderCache {
    encoders: RwLock<HashMap<String, Arc<CoreBPE>>>,
}

impl EncoderCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the cached encoder for a source, loading it on first use
    pub fn get_or_load(&self, source: &EncoderSource) -> Result<Arc<CoreBPE>, TokenizerError> {
        let key = source.key();

        {
            let encoders = self.encoders.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(encoder) = encoders.get(&key) {
                return Ok(Arc::clone(encoder));
            }
        }

        // Loading happens outside the write lock; a concurrent loader may win
        // the insert, in which case its encoder is kept.
        let loaded = Arc::new(source.load()?);
        let mut encoders = self.encoders.write().unwrap_or_else(PoisonError::into_inner);
        Ok(Arc::clone(encoders.entry(key).or_insert(loaded)))
    }

    /// Number of cached encoders
    pub fn len(&self) -> usize {
        self.encoders
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

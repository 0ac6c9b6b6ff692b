//! Erros ao carregar fontes de definições.

use std::path::PathBuf;

use thiserror::Error;

/// Falhas ao carregar um dicionário externo.
///
/// O pipeline em si é total; erros só aparecem na borda, quando uma fonte de
/// definições é construída a partir de dados fornecidos pelo usuário.
#[derive(Error, Debug)]
pub enum DictionaryError {
    #[error("failed to read dictionary {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid dictionary JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid dictionary entry {word:?}: {reason}")]
    InvalidEntry { word: String, reason: &'static str },
}

pub type Result<T> = std::result::Result<T, DictionaryError>;

//! Configuração do servidor: argumentos de linha de comando com fallback para
//! variáveis de ambiente `READING_HELPER_*`.

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use reading_core::classifier::DEFAULT_HARD_THRESHOLD;
use reading_core::{DictionaryError, ReadingPipeline, TableDictionary};
use tracing::info;

/// Limite padrão de upload: 1 MiB.
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 1024 * 1024;

#[derive(Debug, Clone, Parser)]
#[command(name = "reading-web", version)]
#[command(about = "Reading Helper: destaca palavras difíceis em textos enviados")]
pub struct Config {
    /// Endereço de escuta do servidor HTTP
    #[arg(long, env = "READING_HELPER_BIND", default_value = "0.0.0.0:3000")]
    pub bind: SocketAddr,

    /// Dicionário JSON extra ({"palavra": "definição"}), consultado antes do embutido
    #[arg(long, env = "READING_HELPER_DICTIONARY")]
    pub dictionary: Option<PathBuf>,

    /// Tamanho máximo de cada arquivo enviado, em bytes
    #[arg(long, env = "READING_HELPER_MAX_UPLOAD_BYTES", default_value_t = DEFAULT_MAX_UPLOAD_BYTES)]
    pub max_upload_bytes: usize,

    /// Palavras com mais caracteres que este limiar são consideradas difíceis
    #[arg(long, env = "READING_HELPER_HARD_THRESHOLD", default_value_t = DEFAULT_HARD_THRESHOLD)]
    pub hard_threshold: usize,
}

impl Config {
    /// Monta o pipeline descrito pela configuração.
    ///
    /// Falha apenas se o dicionário extra não puder ser lido.
    pub fn build_pipeline(&self) -> Result<ReadingPipeline, DictionaryError> {
        let mut builder = ReadingPipeline::builder().hard_threshold(self.hard_threshold);
        if let Some(path) = &self.dictionary {
            let dictionary = TableDictionary::from_json_file(path)?;
            info!(path = %path.display(), entries = dictionary.len(), "dicionário extra carregado");
            builder = builder.source(dictionary);
        }
        Ok(builder.build())
    }
}

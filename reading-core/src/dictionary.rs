//! # Dicionário e Resolvedor de Definições
//!
//! Associa uma palavra difícil a uma definição. A busca passa por duas etapas:
//!
//! 1. **Normalização** ([`normalize`]): caixa baixa e remoção de pontuação nas
//!    bordas (`. , ! ? ; : ' "`), de modo que `"Loquacious,"` e `"loquacious"`
//!    resolvam para a mesma entrada.
//! 2. **Consulta**: as fontes ([`DefinitionSource`]) são consultadas em ordem e a
//!    primeira que conhece a palavra vence. Sem resposta, devolve
//!    [`FALLBACK_DEFINITION`].
//!
//! O dicionário embutido ([`BuiltinDictionary`]) é uma tabela fixa, somente
//! leitura, criada uma vez por processo. Um dicionário em disco
//! ([`TableDictionary::from_json_file`]) pode ser empilhado à frente dele.
//!
//! ```rust
//! use reading_core::dictionary::{DefinitionResolver, FALLBACK_DEFINITION};
//!
//! let resolver = DefinitionResolver::builtin();
//! assert_eq!(resolver.resolve("Professor."), "A university teacher of the highest rank.");
//! assert_eq!(resolver.resolve("xylophonist"), FALLBACK_DEFINITION);
//! ```

use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use tracing::debug;
use unicode_normalization::UnicodeNormalization;

use crate::error::{DictionaryError, Result};

/// Definição devolvida quando nenhuma fonte conhece a palavra.
pub const FALLBACK_DEFINITION: &str = "A complex word worth looking up!";

/// Caracteres removidos das bordas da palavra antes da consulta.
const EDGE_PUNCTUATION: &[char] = &['.', ',', '!', '?', ';', ':', '\'', '"'];

const BUILTIN_DEFINITIONS: &[(&str, &str)] = &[
    ("extraordinary", "Very unusual or remarkable."),
    ("loquacious", "Tending to talk a great deal; talkative."),
    ("comprehensive", "Complete and including everything necessary."),
    ("contemporary", "Living or occurring at the same time."),
    ("documentation", "Material that provides official information."),
    ("illuminating", "Helping to clarify or explain something."),
    ("comfortable", "Providing physical ease and relaxation."),
    ("exceptionally", "To an unusual degree; very."),
    ("particularly", "To a higher degree than is usual or average."),
    ("professor", "A university teacher of the highest rank."),
];

static BUILTIN_TABLE: LazyLock<HashMap<&'static str, &'static str>> =
    LazyLock::new(|| BUILTIN_DEFINITIONS.iter().copied().collect());

/// Normaliza uma palavra para consulta: forma NFC, minúsculas e sem pontuação
/// nas bordas.
///
/// Só as bordas são afetadas: `"don't"` continua `"don't"`.
pub fn normalize(word: &str) -> String {
    let composed: String = word.nfc().collect();
    composed.to_lowercase().trim_matches(EDGE_PUNCTUATION).to_string()
}

/// Uma fonte de definições.
///
/// Recebe sempre a forma já normalizada. Variantes possíveis: tabela em memória,
/// índice em disco, API remota com cache.
pub trait DefinitionSource: Send + Sync {
    fn name(&self) -> &str;

    fn lookup(&self, normalized: &str) -> Option<String>;
}

/// A tabela fixa embutida no binário.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinDictionary;

impl BuiltinDictionary {
    pub fn len(&self) -> usize {
        BUILTIN_TABLE.len()
    }

    pub fn is_empty(&self) -> bool {
        BUILTIN_TABLE.is_empty()
    }

    /// Entradas em ordem alfabética.
    pub fn entries(&self) -> Vec<(&'static str, &'static str)> {
        let mut entries: Vec<_> = BUILTIN_TABLE.iter().map(|(w, d)| (*w, *d)).collect();
        entries.sort_unstable();
        entries
    }
}

impl DefinitionSource for BuiltinDictionary {
    fn name(&self) -> &str {
        "builtin"
    }

    fn lookup(&self, normalized: &str) -> Option<String> {
        BUILTIN_TABLE.get(normalized).map(|d| d.to_string())
    }
}

/// Tabela em memória montada em tempo de execução (ex: a partir de um arquivo JSON).
///
/// Somente leitura depois de construída.
#[derive(Debug, Clone)]
pub struct TableDictionary {
    name: String,
    entries: HashMap<String, String>,
}

impl TableDictionary {
    /// Monta a tabela normalizando as chaves. Chaves que ficam vazias após a
    /// normalização, chaves que colidem com outra já normalizada (ex: "Loquacious"
    /// e "loquacious,") e definições em branco são rejeitadas.
    pub fn from_entries<I, K, V>(name: impl Into<String>, entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut table = HashMap::new();
        for (word, definition) in entries {
            let key = normalize(word.as_ref());
            if key.is_empty() {
                return Err(DictionaryError::InvalidEntry {
                    word: word.as_ref().to_string(),
                    reason: "word is empty after normalization",
                });
            }
            let definition = definition.into();
            if definition.trim().is_empty() {
                return Err(DictionaryError::InvalidEntry {
                    word: word.as_ref().to_string(),
                    reason: "definition is blank",
                });
            }
            if table.contains_key(&key) {
                return Err(DictionaryError::InvalidEntry {
                    word: word.as_ref().to_string(),
                    reason: "duplicate word after normalization",
                });
            }
            table.insert(key, definition);
        }
        Ok(Self {
            name: name.into(),
            entries: table,
        })
    }

    /// Lê um objeto JSON `{ "palavra": "definição", ... }`.
    pub fn from_json_str(name: impl Into<String>, json: &str) -> Result<Self> {
        let raw: HashMap<String, String> = serde_json::from_str(json)?;
        Self::from_entries(name, raw)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| DictionaryError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let dictionary = Self::from_json_str(path.display().to_string(), &json)?;
        debug!(path = %path.display(), entries = dictionary.len(), "dicionário carregado");
        Ok(dictionary)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl DefinitionSource for TableDictionary {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookup(&self, normalized: &str) -> Option<String> {
        self.entries.get(normalized).cloned()
    }
}

/// Resolve definições consultando as fontes em ordem; a primeira que responde vence.
///
/// Nunca falha: sem resposta de nenhuma fonte, devolve [`FALLBACK_DEFINITION`].
pub struct DefinitionResolver {
    sources: Vec<Box<dyn DefinitionSource>>,
}

impl DefinitionResolver {
    pub fn new(sources: Vec<Box<dyn DefinitionSource>>) -> Self {
        Self { sources }
    }

    /// Resolvedor com apenas o dicionário embutido.
    pub fn builtin() -> Self {
        Self::new(vec![Box::new(BuiltinDictionary)])
    }

    /// Definição encontrada em alguma fonte, sem aplicar o fallback.
    pub fn lookup(&self, word: &str) -> Option<String> {
        let normalized = normalize(word);
        self.sources.iter().find_map(|source| source.lookup(&normalized))
    }

    pub fn resolve(&self, word: &str) -> String {
        self.lookup(word)
            .unwrap_or_else(|| FALLBACK_DEFINITION.to_string())
    }

    pub fn source_names(&self) -> Vec<&str> {
        self.sources.iter().map(|s| s.name()).collect()
    }
}

impl Default for DefinitionResolver {
    fn default() -> Self {
        Self::builtin()
    }
}

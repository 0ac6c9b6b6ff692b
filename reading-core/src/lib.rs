//! # reading-core — Anotação de Palavras Difíceis
//!
//! Este crate implementa o núcleo do *Reading Helper*: dado um texto, identifica
//! as palavras "difíceis" e anexa a cada uma delas uma definição, para que a
//! interface possa exibir dicas ao passar o mouse.
//!
//! ## Arquitetura do Sistema
//!
//! Pipeline linear, sem estado entre chamadas:
//!
//! 1.  **Entrada**: Texto bruto (já decodificado pelo chamador).
//! 2.  **Tokenização** ([`tokenizer`]): palavras e pontuações, na ordem original.
//! 3.  **Classificação** ([`classifier`]): difícil ⇔ mais de 7 caracteres de palavra.
//! 4.  **Definições** ([`dictionary`]): só para os tokens difíceis; palavras
//!     desconhecidas recebem uma definição genérica.
//! 5.  **Saída**: Lista de [`AnnotatedToken`].
//!
//! ## Exemplo de Uso
//!
//! ```rust
//! use reading_core::ReadingPipeline;
//!
//! let pipeline = ReadingPipeline::new();
//! let tokens = pipeline.annotate("The cat is loquacious and extraordinary.");
//!
//! for token in tokens.iter().filter(|t| t.is_hard) {
//!     println!("{} → {}", token.text, token.definition.as_deref().unwrap_or_default());
//! }
//! assert_eq!(tokens.iter().filter(|t| t.is_hard).count(), 2);
//! ```
//!
//! ## Módulos Principais
//!
//! - [`pipeline`]: Orquestrador que conecta os estágios.
//! - [`tokenizer`]: Segmentação do texto.
//! - [`classifier`]: Estratégias de dificuldade.
//! - [`dictionary`]: Fontes de definições e normalização.

pub mod classifier;
pub mod dictionary;
pub mod error;
pub mod pipeline;
pub mod samples;
pub mod tokenizer;

pub use classifier::{DifficultyClassifier, LengthClassifier};
pub use dictionary::{DefinitionResolver, DefinitionSource, TableDictionary, FALLBACK_DEFINITION};
pub use error::DictionaryError;
pub use pipeline::{AnnotatedToken, Analysis, PipelineBuilder, ReadingPipeline, Summary};
pub use tokenizer::{Token, TokenKind};

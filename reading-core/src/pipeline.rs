//! # Pipeline de Leitura — Tokenização → Classificação → Definições
//!
//! O pipeline coordena os três estágios de forma linear e sem estado:
//!
//! 1. [`tokenize`](crate::tokenizer::tokenize) divide o texto em tokens.
//! 2. O [`DifficultyClassifier`] marca cada token como difícil ou não.
//! 3. O [`DefinitionResolver`] anexa uma definição **somente** aos tokens difíceis.
//!
//! Não há I/O nem estado entre chamadas: o mesmo `ReadingPipeline` pode ser
//! compartilhado (via `Arc`) por quantas requisições simultâneas forem necessárias.

use std::time::Instant;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::classifier::{DifficultyClassifier, LengthClassifier};
use crate::dictionary::{BuiltinDictionary, DefinitionResolver, DefinitionSource};
use crate::tokenizer::{tokenize, Token, TokenKind};

/// Token enriquecido pela classificação.
///
/// Serializado com a chave `word` para o texto e `definition: null` quando ausente,
/// que é o formato consumido pela página de leitura.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnnotatedToken {
    #[serde(rename = "word")]
    pub text: String,
    pub kind: TokenKind,
    pub is_hard: bool,
    /// Presente se e somente se `is_hard`.
    pub definition: Option<String>,
    pub start: usize,
    pub end: usize,
    pub index: usize,
}

/// Estatísticas de uma análise.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Summary {
    pub total_tokens: usize,
    pub word_count: usize,
    pub hard_count: usize,
    pub processing_ms: u64,
}

/// Resultado completo de [`ReadingPipeline::analyze`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Analysis {
    pub tokens: Vec<AnnotatedToken>,
    pub summary: Summary,
}

/// O pipeline principal.
pub struct ReadingPipeline {
    classifier: Box<dyn DifficultyClassifier>,
    resolver: DefinitionResolver,
}

impl ReadingPipeline {
    /// Regra de comprimento padrão (> 7) e dicionário embutido.
    pub fn new() -> Self {
        Self::builder().build()
    }

    pub fn builder() -> PipelineBuilder {
        PipelineBuilder::default()
    }

    pub fn classifier_name(&self) -> &'static str {
        self.classifier.name()
    }

    pub fn resolver(&self) -> &DefinitionResolver {
        &self.resolver
    }

    /// Anota o texto, preservando a ordem dos tokens.
    pub fn annotate(&self, text: &str) -> Vec<AnnotatedToken> {
        tokenize(text)
            .into_iter()
            .map(|token| self.annotate_token(token))
            .collect()
    }

    fn annotate_token(&self, token: Token) -> AnnotatedToken {
        let is_hard = self.classifier.is_hard(&token.text);
        // Só palavras difíceis recebem definição; o resto fica com `None`
        let definition = is_hard.then(|| self.resolver.resolve(&token.text));
        AnnotatedToken {
            text: token.text,
            kind: token.kind,
            is_hard,
            definition,
            start: token.start,
            end: token.end,
            index: token.index,
        }
    }

    /// Anota e devolve junto as estatísticas da análise.
    pub fn analyze(&self, text: &str) -> Analysis {
        let start = Instant::now();
        let tokens = self.annotate(text);
        let summary = Summary {
            total_tokens: tokens.len(),
            word_count: tokens.iter().filter(|t| t.kind == TokenKind::Word).count(),
            hard_count: tokens.iter().filter(|t| t.is_hard).count(),
            processing_ms: start.elapsed().as_millis() as u64,
        };
        Analysis { tokens, summary }
    }

    /// Analisa vários documentos independentes em paralelo (rayon).
    ///
    /// A saída segue a ordem da entrada.
    pub fn analyze_batch(&self, texts: &[&str]) -> Vec<Analysis> {
        texts.par_iter().map(|text| self.analyze(text)).collect()
    }

    pub fn annotate_batch(&self, texts: &[&str]) -> Vec<Vec<AnnotatedToken>> {
        texts.par_iter().map(|text| self.annotate(text)).collect()
    }
}

impl Default for ReadingPipeline {
    fn default() -> Self {
        Self::new()
    }
}

/// Monta um [`ReadingPipeline`] com classificador e fontes injetados.
///
/// Fontes adicionadas com [`source`](Self::source) são consultadas antes do
/// dicionário embutido, na ordem em que foram adicionadas.
pub struct PipelineBuilder {
    classifier: Option<Box<dyn DifficultyClassifier>>,
    sources: Vec<Box<dyn DefinitionSource>>,
    include_builtin: bool,
}

impl Default for PipelineBuilder {
    fn default() -> Self {
        Self {
            classifier: None,
            sources: Vec::new(),
            include_builtin: true,
        }
    }
}

impl PipelineBuilder {
    pub fn classifier(mut self, classifier: impl DifficultyClassifier + 'static) -> Self {
        self.classifier = Some(Box::new(classifier));
        self
    }

    /// Atalho para um [`LengthClassifier`] com outro limiar.
    pub fn hard_threshold(self, threshold: usize) -> Self {
        self.classifier(LengthClassifier::new(threshold))
    }

    pub fn source(mut self, source: impl DefinitionSource + 'static) -> Self {
        self.sources.push(Box::new(source));
        self
    }

    /// Não consulta o dicionário embutido.
    pub fn without_builtin(mut self) -> Self {
        self.include_builtin = false;
        self
    }

    pub fn build(self) -> ReadingPipeline {
        let classifier = self
            .classifier
            .unwrap_or_else(|| Box::new(LengthClassifier::default()));
        let mut sources = self.sources;
        if self.include_builtin {
            sources.push(Box::new(BuiltinDictionary));
        }
        let resolver = DefinitionResolver::new(sources);
        debug!(
            classifier = classifier.name(),
            sources = ?resolver.source_names(),
            "pipeline construído"
        );
        ReadingPipeline { classifier, resolver }
    }
}

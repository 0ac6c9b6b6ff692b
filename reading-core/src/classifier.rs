//! # Classificador de Dificuldade
//!
//! Decide se um token é uma palavra "difícil". A política padrão é puramente
//! baseada em comprimento: remove tudo o que não é caractere de palavra e marca
//! como difícil quando sobram **mais de 7** caracteres.
//!
//! A política fica atrás do trait [`DifficultyClassifier`] para que outras
//! estratégias (frequência de uso, nível de leitura, modelos treinados) possam
//! substituir a regra de comprimento sem mudar o formato do pipeline.

use std::sync::LazyLock;

use regex::Regex;
use unicode_normalization::UnicodeNormalization;

/// Limiar padrão: palavras com mais de 7 caracteres são difíceis.
pub const DEFAULT_HARD_THRESHOLD: usize = 7;

static NON_WORD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w]").expect("regex de limpeza válida"));

/// Estratégia de classificação de dificuldade.
///
/// Implementações devem ser puras e determinísticas: o mesmo token sempre
/// recebe a mesma resposta, e qualquer string (inclusive vazia) é aceita.
pub trait DifficultyClassifier: Send + Sync {
    /// Nome curto da estratégia (para logs e respostas da API).
    fn name(&self) -> &'static str;

    fn is_hard(&self, token: &str) -> bool;
}

/// Regra de comprimento: difícil ⇔ `len(clean_word(token)) > threshold`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LengthClassifier {
    threshold: usize,
}

impl LengthClassifier {
    pub fn new(threshold: usize) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> usize {
        self.threshold
    }
}

impl Default for LengthClassifier {
    fn default() -> Self {
        Self::new(DEFAULT_HARD_THRESHOLD)
    }
}

impl DifficultyClassifier for LengthClassifier {
    fn name(&self) -> &'static str {
        "length"
    }

    fn is_hard(&self, token: &str) -> bool {
        clean_word(token).chars().count() > self.threshold
    }
}

/// Remove todo caractere que não seja de palavra (inclusive o apóstrofo).
///
/// O token é recomposto em NFC antes da limpeza: `\w` inclui marcas combinantes,
/// então "e" + acento agudo em forma decomposta contaria como dois caracteres.
/// O comprimento é medido em caracteres Unicode, não em bytes.
pub fn clean_word(token: &str) -> String {
    let composed: String = token.nfc().collect();
    NON_WORD_RE.replace_all(&composed, "").into_owned()
}

/// Atalho para a política padrão.
pub fn is_hard_word(token: &str) -> bool {
    LengthClassifier::default().is_hard(token)
}

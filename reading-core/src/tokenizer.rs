//! # Tokenizador
//!
//! Divide o texto bruto em tokens de **palavra** e de **pontuação**, preservando
//! a ordem original. Cada token guarda seus offsets (em bytes) no texto de entrada,
//! o que permite à interface destacar palavras sem recalcular posições.
//!
//! ## Regra de Segmentação
//!
//! Um token é:
//! - uma sequência máxima de caracteres de palavra (letras, dígitos, `_` e apóstrofo), ou
//! - um único caractere do conjunto `. , ! ? ;`.
//!
//! Qualquer outro caractere (espaços, hífens, dois-pontos, aspas duplas, travessões)
//! é simplesmente descartado e **não** vira token.
//!
//! ## Exemplo de Uso
//!
//! ```rust
//! use reading_core::tokenizer::{tokenize, TokenKind};
//!
//! let tokens = tokenize("Hello, world!");
//! let texts: Vec<&str> = tokens.iter().map(|t| t.text.as_str()).collect();
//! assert_eq!(texts, ["Hello", ",", "world", "!"]);
//! assert_eq!(tokens[1].kind, TokenKind::Punctuation);
//! ```

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Pontuações que viram tokens próprios.
pub const PUNCTUATION: &[char] = &['.', ',', '!', '?', ';'];

static TOKEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\w']+|[.,!?;]").expect("regex de tokenização válida"));

/// Tipo do token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    /// Sequência de caracteres de palavra (pode conter apóstrofo, ex: "don't").
    Word,
    /// Um único sinal de [`PUNCTUATION`].
    Punctuation,
}

/// Um token extraído do texto original.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Token {
    /// O texto do token (ex: "loquacious", ",").
    pub text: String,
    pub kind: TokenKind,
    /// Índice de byte inicial no texto original (inclusive).
    pub start: usize,
    /// Índice de byte final no texto original (exclusivo).
    pub end: usize,
    /// Posição do token na sequência (0, 1, 2...).
    pub index: usize,
}

impl Token {
    pub fn is_word(&self) -> bool {
        self.kind == TokenKind::Word
    }
}

/// Tokeniza um texto. Função total: qualquer string é válida e a string vazia
/// produz uma sequência vazia.
pub fn tokenize(text: &str) -> Vec<Token> {
    TOKEN_RE
        .find_iter(text)
        .enumerate()
        .map(|(index, m)| Token {
            text: m.as_str().to_string(),
            kind: kind_of(m.as_str()),
            start: m.start(),
            end: m.end(),
            index,
        })
        .collect()
}

fn kind_of(text: &str) -> TokenKind {
    let mut chars = text.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if PUNCTUATION.contains(&c) => TokenKind::Punctuation,
        _ => TokenKind::Word,
    }
}

/// Reconstrói um texto legível a partir dos tokens.
///
/// O espaçamento original se perde na tokenização, então palavras são unidas por
/// um espaço simples e a pontuação gruda no token anterior ("cat" "." → "cat.").
/// Re-tokenizar o resultado devolve a mesma sequência de textos e tipos.
pub fn reconstruct(tokens: &[Token]) -> String {
    let mut out = String::new();
    for token in tokens {
        if !out.is_empty() && token.is_word() {
            out.push(' ');
        }
        out.push_str(&token.text);
    }
    out
}

//! Textos de demonstração exibidos pela página de leitura.

/// Pares `(título, texto)`. Cada texto mistura palavras do dicionário embutido,
/// palavras longas desconhecidas (que recebem o fallback) e pontuação variada.
pub fn demo_texts() -> Vec<(&'static str, &'static str)> {
    vec![
        (
            "Classroom",
            "The professor was exceptionally loquacious today. Her comprehensive lecture on contemporary poetry was particularly illuminating, although the chairs were hardly comfortable!",
        ),
        (
            "Museum",
            "An extraordinary exhibition opened downtown; visitors praised the documentation, the lighting and the astonishingly detailed reconstructions. Would you recommend it?",
        ),
        (
            "Short words",
            "The cat sat on the mat. It was a good day, and all was well.",
        ),
        (
            "Tokenization",
            "Don't panic: well-known words, \"quoted\" phrases and em-dashes \u{2014} like this \u{2014} are simplified. Underscored_identifiers and numbers like 123456789 count too!",
        ),
    ]
}

use std::{collections::HashSet, sync::LazyLock};

///
/// KEYWORDS
/// rust keywords, strict and reserved, as of the 2024 edition
/// https://doc.rust-lang.org/reference/keywords.html
///

static KEYWORDS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    let mut words = Vec::new();

    // strict
    words.extend(vec![
        "as", "async", "await", "break", "const", "continue", "crate", "dyn", "else", "enum",
        "extern", "false", "fn", "for", "if", "impl", "in", "let", "loop", "match", "mod", "move",
        "mut", "pub", "ref", "return", "self", "Self", "static", "struct", "super", "trait",
        "true", "type", "unsafe", "use", "where", "while",
    ]);

    // reserved
    words.extend(vec![
        "abstract", "become", "box", "do", "final", "gen", "macro", "override", "priv", "try",
        "typeof", "unsized", "virtual", "yield",
    ]);

    words.into_iter().collect()
});

/// Keywords that cannot be written as raw identifiers either.
const NON_RAW: &[&str] = &["crate", "self", "Self", "super", "_"];

/// Check if an identifier is a keyword and must be emitted as `r#ident`.
#[must_use]
pub fn is_keyword(word: &str) -> bool {
    KEYWORDS.contains(word)
}

/// Check if an identifier can never be used, even as a raw identifier.
#[must_use]
pub fn is_unusable(word: &str) -> bool {
    NON_RAW.contains(&word)
}

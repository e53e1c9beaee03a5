//! Case folding for name search.
//!
//! Every entity stores `nome_busca = fold(nome)` next to its name, and the
//! search needle goes through the same function. The comparison therefore
//! never depends on how the database lowers non-ASCII letters.

/// Unicode lowercase, so `"AÇÃO"` and `"ação"` fold to the same key.
pub fn fold(s: &str) -> String {
    s.to_lowercase()
}

/// Case-insensitive substring match, using the same folding as the stored keys.
pub fn contains_folded(haystack: &str, needle: &str) -> bool {
    fold(haystack).contains(&fold(needle))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn folds_accented_capitals() {
        assert_eq!(fold("AÇÃO RADICAL"), "ação radical");
        assert!(contains_folded("Estratégia", "ÉGIA"));
        assert!(!contains_folded("Esportes", "rpg"));
    }
}

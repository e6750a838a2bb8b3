use std::collections::BTreeMap;

/// Splits raw text into lowercase alphanumeric tokens.
pub fn tokens(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|token| !token.is_empty())
        .map(|token| token.to_lowercase())
        .collect()
}

/// Counts how often each token occurs.
pub fn counts(tokens: &[String]) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for token in tokens {
        *counts.entry(token.clone()).or_insert(0) += 1;
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokens_lowercases_and_splits_on_punctuation() {
        assert_eq!(
            tokens("Hello, World! Buy NOW"),
            vec!["hello", "world", "buy", "now"]
        );
    }

    #[test]
    fn test_tokens_keeps_digits() {
        assert_eq!(tokens("win $1000 now"), vec!["win", "1000", "now"]);
    }

    #[test]
    fn test_tokens_empty_text() {
        assert!(tokens("  \t ").is_empty());
    }

    #[test]
    fn test_counts() {
        let tokens = vec!["free".to_string(), "money".to_string(), "free".to_string()];
        let counts = counts(&tokens);
        assert_eq!(counts["free"], 2);
        assert_eq!(counts["money"], 1);
    }
}

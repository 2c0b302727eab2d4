/// Separator between the tokens of an n-gram
pub const NGRAM_SEPARATOR: &str = " ";

/// Contiguous windows of `n` tokens, each joined with a single space.
///
/// Yields `tokens.len() - n + 1` n-grams, or none when `n` is 0 or larger
/// than the token count.
///
/// # Examples
/// ```
/// use feature_vectorizer::vectorizer::ngram::ngrams_from_tokens;
/// let tokens = ["a", "b", "c"];
/// assert_eq!(ngrams_from_tokens(&tokens, 2), vec!["a b", "b c"]);
/// assert!(ngrams_from_tokens(&tokens, 4).is_empty());
/// ```
pub fn ngrams_from_tokens<T>(tokens: &[T], n: usize) -> Vec<String>
where
    T: AsRef<str>,
{
    if n == 0 || n > tokens.len() {
        return Vec::new();
    }
    tokens
        .windows(n)
        .map(|window| {
            let mut ngram = String::with_capacity(window.iter().map(|t| t.as_ref().len() + 1).sum());
            for (i, token) in window.iter().enumerate() {
                if i > 0 {
                    ngram.push_str(NGRAM_SEPARATOR);
                }
                ngram.push_str(token.as_ref());
            }
            ngram
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_count_is_len_minus_n_plus_one() {
        let tokens = ["the", "team", "won", "the", "cup"];
        for n in 1..=5 {
            assert_eq!(ngrams_from_tokens(&tokens, n).len(), tokens.len() - n + 1);
        }
        assert_eq!(ngrams_from_tokens(&tokens, 3)[2], "won the cup");
    }

    #[test]
    fn degenerate_orders_yield_nothing() {
        assert!(ngrams_from_tokens(&["a"], 2).is_empty());
        assert!(ngrams_from_tokens(&["a", "b"], 0).is_empty());
        assert!(ngrams_from_tokens::<&str>(&[], 1).is_empty());
    }
}

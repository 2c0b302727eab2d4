/// Splits raw text into normalized word tokens.
///
/// Implementations must be pure: the same text always yields the same tokens.
pub trait Tokenizer: Send + Sync {
    fn tokenize(&self, text: &str) -> Vec<String>;
}

/// Lowercase, whitespace-split, alphanumeric-only tokenizer.
///
/// Punctuation is dropped in place rather than split off, so `"don't"` becomes
/// `"dont"`. Fragments left empty after filtering are discarded.
///
/// # Examples
/// ```
/// use feature_vectorizer::engine::tokenizer::{SimpleTokenizer, Tokenizer};
/// let tokens = SimpleTokenizer.tokenize("The Striker Scored!!");
/// assert_eq!(tokens, vec!["the", "striker", "scored"]);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct SimpleTokenizer;

impl Tokenizer for SimpleTokenizer {
    fn tokenize(&self, text: &str) -> Vec<String> {
        text.to_lowercase()
            .split_whitespace()
            .filter_map(|fragment| {
                let word: String = fragment.chars().filter(|c| c.is_alphanumeric()).collect();
                if word.is_empty() { None } else { Some(word) }
            })
            .collect()
    }
}

/// Tokenize with [`SimpleTokenizer`].
#[inline]
pub fn tokenize(text: &str) -> Vec<String> {
    SimpleTokenizer.tokenize(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_punctuation_and_lowercases() {
        assert_eq!(tokenize("The Striker Scored!!"), vec!["the", "striker", "scored"]);
    }

    #[test]
    fn punctuation_is_removed_inside_words() {
        assert_eq!(tokenize("don't re-elect U.S."), vec!["dont", "reelect", "us"]);
    }

    #[test]
    fn empty_fragments_are_dropped() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("   \t\n ").is_empty());
        assert_eq!(tokenize("goal -- !!! 2024"), vec!["goal", "2024"]);
    }

    #[test]
    fn duplicates_and_order_are_kept() {
        assert_eq!(tokenize("b a b"), vec!["b", "a", "b"]);
    }

    #[test]
    fn tokens_are_lowercase_alphanumeric() {
        let texts = [
            "Parliament PASSED new legislation; 42 votes!",
            "  mixed\twhitespace\nand (brackets) ",
            "Ünïcödé Straße café",
            "...,,,",
        ];
        for text in texts {
            for token in tokenize(text) {
                assert!(!token.is_empty());
                assert!(token.chars().all(char::is_alphanumeric), "{token:?}");
                assert_eq!(token, token.to_lowercase());
            }
        }
    }

    #[test]
    fn retokenizing_is_idempotent() {
        let texts = ["The Striker Scored!!", "Senate: vote at 10am, (maybe).", ""];
        for text in texts {
            let once = tokenize(text);
            let twice = tokenize(&once.join(" "));
            assert_eq!(once, twice);
        }
    }
}

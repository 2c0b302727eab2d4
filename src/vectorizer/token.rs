use std::cmp::Reverse;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// TokenFrequency
/// Occurrence counts of the tokens (or n-grams) of one document.
///
/// It manages:
/// - The count of occurrences of each token
/// - The total number of tokens in the document
///
/// Keys are unique; insertion order is kept but carries no meaning.
/// Built per document during vectorization and dropped afterwards.
///
/// # Examples
/// ```
/// use feature_vectorizer::TokenFrequency;
/// let mut freq = TokenFrequency::new();
/// freq.add_tokens(&["dog", "dog", "cat"]);
/// assert_eq!(freq.token_count("dog"), 2);
/// assert_eq!(freq.count_vec(&["bird", "cat", "dog"]), vec![0, 1, 2]);
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenFrequency {
    #[serde(with = "indexmap::map::serde_seq")]
    token_count: IndexMap<String, u32>,
    total_token_count: u64,
}

/// トークン追加
impl TokenFrequency {
    pub fn new() -> Self {
        TokenFrequency {
            token_count: IndexMap::new(),
            total_token_count: 0,
        }
    }

    /// Add one occurrence of `token`
    #[inline]
    pub fn add_token(&mut self, token: &str) -> &mut Self {
        self.add_token_n(token, 1)
    }

    /// Add `n` occurrences of `token`
    #[inline]
    pub fn add_token_n(&mut self, token: &str, n: u32) -> &mut Self {
        if n == 0 {
            return self;
        }
        match self.token_count.get_mut(token) {
            Some(count) => *count += n,
            None => {
                self.token_count.insert(token.to_string(), n);
            }
        }
        self.total_token_count += n as u64;
        self
    }

    /// Add every token of the slice
    #[inline]
    pub fn add_tokens<T>(&mut self, tokens: &[T]) -> &mut Self
    where
        T: AsRef<str>,
    {
        for token in tokens {
            self.add_token(token.as_ref());
        }
        self
    }

    /// Fold another frequency table into this one
    pub fn merge(&mut self, other: &TokenFrequency) -> &mut Self {
        for (token, &count) in other.token_count.iter() {
            self.add_token_n(token, count);
        }
        self
    }
}

impl<T> FromIterator<T> for TokenFrequency
where
    T: AsRef<str>,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut freq = TokenFrequency::new();
        for token in iter {
            freq.add_token(token.as_ref());
        }
        freq
    }
}

/// 参照・統計
impl TokenFrequency {
    /// Count of `token`, 0 if absent
    #[inline]
    pub fn token_count(&self, token: &str) -> u32 {
        self.token_count.get(token).copied().unwrap_or(0)
    }

    /// Total number of tokens added, duplicates included
    #[inline]
    pub fn token_sum(&self) -> u64 {
        self.total_token_count
    }

    /// Number of distinct tokens
    #[inline]
    pub fn token_num(&self) -> usize {
        self.token_count.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.total_token_count == 0
    }

    #[inline]
    pub fn contains_token(&self, token: &str) -> bool {
        self.token_count.contains_key(token)
    }

    /// Distinct tokens, borrowed
    pub fn token_set_ref_str(&self) -> Vec<&str> {
        self.token_count.keys().map(|s| s.as_str()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.token_count.iter().map(|(token, &count)| (token.as_str(), count))
    }

    /// Project the counts onto a token dimension.
    /// One entry per element of `token_dim_sample`, 0 where the token is absent.
    pub fn count_vec<T>(&self, token_dim_sample: &[T]) -> Vec<u32>
    where
        T: AsRef<str>,
    {
        token_dim_sample
            .iter()
            .map(|token| self.token_count(token.as_ref()))
            .collect()
    }

    /// The `k` most frequent tokens, count descending then token ascending
    pub fn most_frequent(&self, k: usize) -> Vec<(&str, u32)> {
        let mut entries: Vec<(&str, u32)> = self.iter().collect();
        entries.sort_unstable_by_key(|&(token, count)| (Reverse(count), token));
        entries.truncate(k);
        entries
    }
}

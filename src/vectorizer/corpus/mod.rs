use indexmap::IndexMap;

use crate::TokenFrequency;

/// 文書数とトークンごとの文書頻度を保持する
/// IDF計算1回分のコーパス
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    /// 文書数
    doc_num: u64,
    /// トークンごとの出現文書数
    token_counts: IndexMap<Box<str>, u64>,
}

impl Corpus {
    /// Create a new instance
    pub fn new() -> Self {
        Self {
            doc_num: 0,
            token_counts: IndexMap::new(),
        }
    }

    /// Build a corpus with one entry per frequency table
    pub fn from_frequencies<'a, I>(freqs: I) -> Self
    where
        I: IntoIterator<Item = &'a TokenFrequency>,
    {
        let mut corpus = Self::new();
        for freq in freqs {
            corpus.add_set(&freq.token_set_ref_str());
        }
        corpus
    }

    /// Add a document's distinct tokens to the corpus.
    /// Duplicates in `tokens` are counted once each, so pass a set.
    pub fn add_set<T>(&mut self, tokens: &[T])
    where
        T: AsRef<str>,
    {
        self.doc_num += 1;
        for token in tokens {
            *self.token_counts.entry(token.as_ref().into()).or_insert(0) += 1;
        }
    }

    /// Get the number of documents in the corpus
    #[inline]
    pub fn get_doc_num(&self) -> u64 {
        self.doc_num
    }

    /// Get the number of documents containing `token`
    #[inline]
    pub fn get_token_count(&self, token: &str) -> u64 {
        self.token_counts.get(token).copied().unwrap_or(0)
    }

    /// Get the number of distinct tokens seen
    #[inline]
    pub fn vocab_size(&self) -> usize {
        self.token_counts.len()
    }
}

pub mod corpus;
pub mod ngram;
pub mod tfidf;
pub mod token;

use std::collections::{BTreeMap, BTreeSet};

use indexmap::IndexMap;
use num::Float;
use rayon::prelude::*;
use tracing::{debug, warn};

use crate::engine::tokenizer::{SimpleTokenizer, Tokenizer};
use crate::error::{FeatureError, Result};
use crate::vectorizer::{
    corpus::Corpus,
    ngram::ngrams_from_tokens,
    tfidf::{DefaultTFIDFEngine, TFIDFEngine},
    token::TokenFrequency,
};

/// Feature extractor state.
///
/// Each field changes only through an explicit `&mut self` call:
/// - `vocabulary` grows by union in [`build_vocabulary`](Self::build_vocabulary)
/// - `idf_values` is overwritten for every vocabulary token in
///   [`compute_idf`](Self::compute_idf) / [`tfidf`](Self::tfidf)
/// - `ngram_vocabulary` is filled once per order `n` in
///   [`build_ngram_vocabulary`](Self::build_ngram_vocabulary)
///
/// [`reset`](Self::reset) clears all three.
#[derive(Debug, Clone, Default)]
pub struct FeatureExtractor<T = SimpleTokenizer>
where
    T: Tokenizer,
{
    /// sorted, so iteration order is the vector dimension order
    vocabulary: BTreeSet<Box<str>>,
    idf_values: IndexMap<Box<str>, f64>,
    /// n -> sorted n-gram vocabulary
    ngram_vocabulary: BTreeMap<usize, Vec<String>>,
    tokenizer: T,
}

impl FeatureExtractor<SimpleTokenizer> {
    pub fn new() -> Self {
        Self::with_tokenizer(SimpleTokenizer)
    }
}

impl<T> FeatureExtractor<T>
where
    T: Tokenizer,
{
    pub fn with_tokenizer(tokenizer: T) -> Self {
        Self {
            vocabulary: BTreeSet::new(),
            idf_values: IndexMap::new(),
            ngram_vocabulary: BTreeMap::new(),
            tokenizer,
        }
    }

    #[inline]
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        self.tokenizer.tokenize(text)
    }

    /// Token counts of one document
    #[inline]
    pub fn token_frequency(&self, text: &str) -> TokenFrequency {
        self.tokenize(text).into_iter().collect()
    }

    /// Drop the vocabulary, the IDF table and every cached n-gram vocabulary
    pub fn reset(&mut self) {
        self.vocabulary.clear();
        self.idf_values.clear();
        self.ngram_vocabulary.clear();
    }
}

/// Vocabulary
impl<T> FeatureExtractor<T>
where
    T: Tokenizer,
{
    /// Add every token of `documents` to the stored vocabulary.
    ///
    /// This is a union with what is already stored: repeated calls accumulate
    /// and never remove entries. Use [`reset`](Self::reset) to start over.
    ///
    /// Returns the whole vocabulary in canonical (sorted) order.
    pub fn build_vocabulary<D>(&mut self, documents: &[D]) -> Vec<String>
    where
        D: AsRef<str>,
    {
        let before = self.vocabulary.len();
        for doc in documents {
            for token in self.tokenizer.tokenize(doc.as_ref()) {
                self.vocabulary.insert(token.into_boxed_str());
            }
        }
        debug!(
            documents = documents.len(),
            added = self.vocabulary.len() - before,
            size = self.vocabulary.len(),
            "vocabulary built"
        );
        self.vocabulary.iter().map(|t| t.to_string()).collect()
    }

    /// Vocabulary in canonical order; index `i` is vector dimension `i`
    pub fn vocabulary(&self) -> Vec<&str> {
        self.vocabulary.iter().map(|t| t.as_ref()).collect()
    }

    #[inline]
    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }

    #[inline]
    pub fn contains_token(&self, token: &str) -> bool {
        self.vocabulary.contains(token)
    }
}

/// Bag of words
impl<T> FeatureExtractor<T>
where
    T: Tokenizer,
{
    /// Raw token counts of each document against the stored vocabulary.
    ///
    /// One row per document, one column per vocabulary token. Tokens outside
    /// the vocabulary are ignored. An empty vocabulary gives empty rows.
    pub fn bag_of_words<D>(&self, documents: &[D]) -> Vec<Vec<u32>>
    where
        D: AsRef<str> + Sync,
    {
        let token_dim_sample = self.vocabulary();
        if token_dim_sample.is_empty() {
            warn!(documents = documents.len(), "bag of words against an empty vocabulary");
        }
        documents
            .par_iter()
            .map(|doc| self.token_frequency(doc.as_ref()).count_vec(&token_dim_sample))
            .collect()
    }
}

/// TF-IDF
impl<T> FeatureExtractor<T>
where
    T: Tokenizer,
{
    /// Recompute the IDF of every vocabulary token from `documents`.
    ///
    /// `idf = ln(doc_num / doc_freq)`, or `0` for a token no document contains.
    /// The table is overwritten from *this* collection, whatever collection
    /// built the vocabulary. Computing IDF on a test split therefore gives
    /// test-split IDF values.
    pub fn compute_idf<D>(&mut self, documents: &[D])
    where
        D: AsRef<str> + Sync,
    {
        self.compute_idf_with::<DefaultTFIDFEngine, D>(documents)
    }

    pub fn compute_idf_with<E, D>(&mut self, documents: &[D])
    where
        E: TFIDFEngine<f64>,
        D: AsRef<str> + Sync,
    {
        let freqs: Vec<TokenFrequency> = documents
            .par_iter()
            .map(|doc| self.token_frequency(doc.as_ref()))
            .collect();
        self.store_idf::<E>(&Corpus::from_frequencies(&freqs));
    }

    fn store_idf<E>(&mut self, corpus: &Corpus)
    where
        E: TFIDFEngine<f64>,
    {
        let token_dim_sample: Vec<&str> = self.vocabulary.iter().map(|t| t.as_ref()).collect();
        let idf_vec = E::idf_vec(corpus, &token_dim_sample);
        for (token, idf) in self.vocabulary.iter().zip(idf_vec) {
            self.idf_values.insert(token.clone(), idf);
        }
        debug!(
            documents = corpus.get_doc_num(),
            tokens = self.vocabulary.len(),
            "idf recomputed"
        );
    }

    /// Stored IDF table
    #[inline]
    pub fn idf_values(&self) -> &IndexMap<Box<str>, f64> {
        &self.idf_values
    }

    /// Stored IDF of `token`, 0 if never computed
    #[inline]
    pub fn idf(&self, token: &str) -> f64 {
        self.idf_values.get(token).copied().unwrap_or(0.0)
    }

    /// TF-IDF vectors of `documents` against the stored vocabulary.
    ///
    /// The IDF table is first recomputed from `documents` (see
    /// [`compute_idf`](Self::compute_idf)), then each value is
    /// `count / token_sum * idf`. `token_sum` counts every token of the
    /// document, in the vocabulary or not.
    ///
    /// # Errors
    /// [`FeatureError::InvalidInput`] if a document has no tokens. Nothing is
    /// recomputed in that case.
    pub fn tfidf<D>(&mut self, documents: &[D]) -> Result<Vec<Vec<f64>>>
    where
        D: AsRef<str> + Sync,
    {
        self.tfidf_with::<f64, DefaultTFIDFEngine, D>(documents)
    }

    /// [`tfidf`](Self::tfidf) with an explicit value type and engine
    pub fn tfidf_with<N, E, D>(&mut self, documents: &[D]) -> Result<Vec<Vec<N>>>
    where
        N: Float + Send + Sync,
        E: TFIDFEngine<f64> + TFIDFEngine<N>,
        D: AsRef<str> + Sync,
    {
        let freqs: Vec<TokenFrequency> = documents
            .par_iter()
            .map(|doc| self.token_frequency(doc.as_ref()))
            .collect();
        if let Some(index) = freqs.iter().position(TokenFrequency::is_empty) {
            return Err(FeatureError::InvalidInput { index });
        }

        self.store_idf::<E>(&Corpus::from_frequencies(&freqs));

        let token_dim_sample = self.vocabulary();
        if token_dim_sample.is_empty() {
            warn!(documents = documents.len(), "tf-idf against an empty vocabulary");
        }
        let idf_vec: Vec<N> = token_dim_sample
            .iter()
            .map(|token| N::from(self.idf(token)).unwrap_or_else(N::zero))
            .collect();

        Ok(freqs
            .par_iter()
            .map(|freq| {
                <E as TFIDFEngine<N>>::tf_vec(freq, &token_dim_sample)
                    .into_iter()
                    .zip(&idf_vec)
                    .map(|(tf, &idf)| tf * idf)
                    .collect::<Vec<N>>()
            })
            .collect())
    }
}

/// N-gram
impl<T> FeatureExtractor<T>
where
    T: Tokenizer,
{
    /// Space-joined windows of `n` consecutive tokens of `text`.
    /// Empty when `n` exceeds the token count.
    pub fn extract_ngrams(&self, text: &str, n: usize) -> Vec<String> {
        ngrams_from_tokens(&self.tokenize(text), n)
    }

    /// Build and cache the sorted n-gram vocabulary of order `n`.
    ///
    /// Computed once per `n`: a later call with the same `n` returns the
    /// cached vocabulary and ignores `documents`.
    pub fn build_ngram_vocabulary<D>(&mut self, documents: &[D], n: usize) -> Vec<String>
    where
        D: AsRef<str>,
    {
        if let Some(cached) = self.ngram_vocabulary.get(&n) {
            debug!(n, size = cached.len(), "ngram vocabulary already cached");
            return cached.clone();
        }
        let ngram_set: BTreeSet<String> = documents
            .iter()
            .flat_map(|doc| self.extract_ngrams(doc.as_ref(), n))
            .collect();
        let vocab: Vec<String> = ngram_set.into_iter().collect();
        debug!(n, documents = documents.len(), size = vocab.len(), "ngram vocabulary built");
        self.ngram_vocabulary.insert(n, vocab.clone());
        vocab
    }

    /// Cached n-gram vocabulary of order `n`, if built
    pub fn ngram_vocabulary(&self, n: usize) -> Option<&[String]> {
        self.ngram_vocabulary.get(&n).map(Vec::as_slice)
    }

    /// N-gram counts of each document against the cached vocabulary of order `n`.
    ///
    /// If no vocabulary was built for `n`, every row is empty.
    pub fn ngram_features<D>(&self, documents: &[D], n: usize) -> Vec<Vec<u32>>
    where
        D: AsRef<str> + Sync,
    {
        let token_dim_sample = self.ngram_vocabulary(n).unwrap_or(&[]);
        if token_dim_sample.is_empty() {
            warn!(n, documents = documents.len(), "ngram features against an empty vocabulary");
        }
        documents
            .par_iter()
            .map(|doc| {
                let freq: TokenFrequency = self.extract_ngrams(doc.as_ref(), n).into_iter().collect();
                freq.count_vec(token_dim_sample)
            })
            .collect()
    }
}

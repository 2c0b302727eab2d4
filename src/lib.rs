//! This crate turns short documents into fixed-length feature vectors
//! (bag-of-words, TF-IDF, n-gram counts) for off-the-shelf classifiers.

pub mod analysis;
pub mod dataset;
pub mod engine;
pub mod error;
pub mod vectorizer;

/// Feature Extractor
/// The top-level struct of this crate.
///
/// Internally, it holds:
/// - The vocabulary (sorted token set, grown by union)
/// - The IDF table (overwritten on every IDF computation)
/// - The n-gram vocabulary cache (one sorted list per order `n`)
///
/// Vectors are always laid out in the vocabulary's sorted order, so index `i`
/// of every row refers to the same token for as long as the vocabulary is
/// unchanged.
///
/// `FeatureExtractor<T>` has one generic parameter:
/// - `T`: tokenizer (default `SimpleTokenizer`)
///
/// # Thread Safety
/// Encoders take `&self` and may run concurrently; builders take `&mut self`.
/// Wrap a shared instance in a `Mutex` if both are needed across threads.
pub use vectorizer::FeatureExtractor;

/// Token Frequency structure
/// Occurrence counts of the tokens (or n-grams) of one document.
/// Used as base data for bag-of-words counts and TF.
pub use vectorizer::token::TokenFrequency;

/// Corpus
/// Document count and per-token document frequency of one collection.
/// Used as base data for IDF.
pub use vectorizer::corpus::Corpus;

/// TF IDF Calculation Engine Trait
/// By implementing this trait, you can plug different TF and IDF formulas
/// into `FeatureExtractor::tfidf_with`.
/// `DefaultTFIDFEngine` computes `count / token_sum` and `ln(doc_num / doc_freq)`.
pub use vectorizer::tfidf::{DefaultTFIDFEngine, TFIDFEngine};

/// Tokenizer
/// `SimpleTokenizer` lowercases, splits on whitespace and keeps alphanumeric
/// characters only.
pub use engine::tokenizer::{tokenize, SimpleTokenizer, Tokenizer};

/// Dataset loading and positional train/test split
pub use dataset::{load_dataset, parse_dataset, split_data, Dataset, Sample, Split, DEFAULT_TRAIN_RATIO};

pub use analysis::DatasetStats;

pub use error::{FeatureError, Result};

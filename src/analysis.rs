use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::Serialize;

use crate::{dataset::Dataset, FeatureExtractor, TokenFrequency};

/// A token only one label uses must appear this often to be listed as distinctive
pub const DISTINCTIVE_MIN_COUNT: u32 = 3;
/// At most this many distinctive tokens are listed per label
pub const DISTINCTIVE_LIMIT: usize = 20;

/// Document length in tokens
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct LengthStats {
    pub min: usize,
    pub max: usize,
    pub mean: f64,
}

impl LengthStats {
    fn from_lengths(lengths: &[usize]) -> Self {
        if lengths.is_empty() {
            return Self::default();
        }
        Self {
            min: lengths.iter().copied().min().unwrap_or(0),
            max: lengths.iter().copied().max().unwrap_or(0),
            mean: lengths.iter().sum::<usize>() as f64 / lengths.len() as f64,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabelStats {
    pub label: String,
    pub samples: usize,
    pub vocabulary_size: usize,
    /// tokens no other label uses
    pub exclusive_tokens: usize,
    pub length: LengthStats,
    /// most frequent tokens, count descending
    pub top_tokens: Vec<(String, u32)>,
    /// exclusive tokens seen at least [`DISTINCTIVE_MIN_COUNT`] times, sorted
    pub distinctive_tokens: Vec<String>,
}

/// Summary of a labeled dataset: class balance, vocabulary overlap between
/// labels, document lengths and frequent words per label.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetStats {
    pub total_samples: usize,
    pub vocabulary_size: usize,
    /// tokens every label uses
    pub shared_tokens: usize,
    /// sorted by label
    pub labels: Vec<LabelStats>,
}

impl DatasetStats {
    pub fn from_dataset(dataset: &Dataset, top_k: usize) -> Self {
        let mut extractor = FeatureExtractor::new();
        extractor.build_vocabulary(&dataset.texts);

        let mut per_label: BTreeMap<&str, (TokenFrequency, Vec<usize>)> = BTreeMap::new();
        for (text, label) in dataset.samples() {
            let tokens = extractor.tokenize(text);
            let (freq, lengths) = per_label.entry(label).or_default();
            lengths.push(tokens.len());
            freq.add_tokens(&tokens);
        }

        let token_sets: Vec<BTreeSet<&str>> = per_label
            .values()
            .map(|(freq, _)| freq.iter().map(|(token, _)| token).collect())
            .collect();
        let shared_tokens = extractor
            .vocabulary()
            .into_iter()
            .filter(|token| token_sets.iter().all(|set| set.contains(token)))
            .count();

        let labels = per_label
            .iter()
            .enumerate()
            .map(|(i, (label, (freq, lengths)))| {
                let exclusive: Vec<&str> = token_sets[i]
                    .iter()
                    .copied()
                    .filter(|token| {
                        token_sets
                            .iter()
                            .enumerate()
                            .all(|(j, other)| j == i || !other.contains(token))
                    })
                    .collect();
                let distinctive_tokens = exclusive
                    .iter()
                    .filter(|token| freq.token_count(token) >= DISTINCTIVE_MIN_COUNT)
                    .take(DISTINCTIVE_LIMIT)
                    .map(|token| token.to_string())
                    .collect();
                LabelStats {
                    label: label.to_string(),
                    samples: lengths.len(),
                    vocabulary_size: freq.token_num(),
                    exclusive_tokens: exclusive.len(),
                    length: LengthStats::from_lengths(lengths),
                    top_tokens: freq
                        .most_frequent(top_k)
                        .into_iter()
                        .map(|(token, count)| (token.to_string(), count))
                        .collect(),
                    distinctive_tokens,
                }
            })
            .collect();

        Self {
            total_samples: dataset.len(),
            vocabulary_size: extractor.vocabulary_size(),
            shared_tokens,
            labels,
        }
    }
}

impl fmt::Display for DatasetStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "class distribution ({} samples)", self.total_samples)?;
        for label in &self.labels {
            let share = if self.total_samples == 0 {
                0.0
            } else {
                label.samples as f64 / self.total_samples as f64 * 100.0
            };
            writeln!(f, "  {}: {} ({:.1}%)", label.label, label.samples, share)?;
        }

        writeln!(f, "vocabulary")?;
        writeln!(f, "  unique tokens: {}", self.vocabulary_size)?;
        writeln!(f, "  shared by all labels: {}", self.shared_tokens)?;
        for label in &self.labels {
            writeln!(f, "  only in {}: {}", label.label, label.exclusive_tokens)?;
        }

        writeln!(f, "document length")?;
        for label in &self.labels {
            writeln!(
                f,
                "  {}: avg {:.1}, min {}, max {}",
                label.label, label.length.mean, label.length.min, label.length.max
            )?;
        }

        for label in &self.labels {
            writeln!(f, "top tokens: {}", label.label)?;
            for (token, count) in &label.top_tokens {
                writeln!(f, "  {token}: {count}")?;
            }
            writeln!(f, "distinctive tokens: {}", label.label)?;
            writeln!(f, "  {}", label.distinctive_tokens.join(", "))?;
        }
        Ok(())
    }
}

use std::{fs, path::Path};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{FeatureError, Result};

/// Default share of records that go to the train split
pub const DEFAULT_TRAIN_RATIO: f64 = 0.8;

/// One labeled document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sample {
    pub text: String,
    pub label: String,
}

/// Labeled documents as two parallel vectors, in file order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dataset {
    pub texts: Vec<String>,
    pub labels: Vec<String>,
}

impl Dataset {
    pub fn from_samples<I>(samples: I) -> Self
    where
        I: IntoIterator<Item = Sample>,
    {
        let (texts, labels) = samples.into_iter().map(|s| (s.text, s.label)).unzip();
        Self { texts, labels }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.texts.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.texts.is_empty()
    }

    pub fn samples(&self) -> impl Iterator<Item = (&str, &str)> {
        self.texts
            .iter()
            .zip(&self.labels)
            .map(|(text, label)| (text.as_str(), label.as_str()))
    }

    /// Positional split, see [`split_data`]
    pub fn split(&self, train_ratio: f64) -> Split {
        split_data(&self.texts, &self.labels, train_ratio)
    }
}

/// Read a JSON list of `{"text": ..., "label": ...}` records.
///
/// # Errors
/// - [`FeatureError::Io`] if the file cannot be read
/// - [`FeatureError::Json`] if it is not a JSON array
/// - [`FeatureError::MalformedInput`] on the first record without a string
///   `text` or `label`; no partial dataset is returned
pub fn load_dataset<P>(path: P) -> Result<Dataset>
where
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let raw = fs::read_to_string(path)?;
    let dataset = parse_dataset(&raw)?;
    debug!(path = %path.display(), records = dataset.len(), "dataset loaded");
    Ok(dataset)
}

/// [`load_dataset`] on an in-memory JSON document
pub fn parse_dataset(raw: &str) -> Result<Dataset> {
    let records: Vec<Value> = serde_json::from_str(raw)?;
    let mut dataset = Dataset {
        texts: Vec::with_capacity(records.len()),
        labels: Vec::with_capacity(records.len()),
    };
    for (index, record) in records.iter().enumerate() {
        let Value::Object(fields) = record else {
            return Err(FeatureError::MalformedInput {
                index,
                reason: "record is not an object".to_string(),
            });
        };
        let text = string_field(fields, "text", index)?;
        let label = string_field(fields, "label", index)?;
        dataset.texts.push(text.to_string());
        dataset.labels.push(label.to_string());
    }
    Ok(dataset)
}

fn string_field<'a>(
    fields: &'a serde_json::Map<String, Value>,
    name: &str,
    index: usize,
) -> Result<&'a str> {
    match fields.get(name) {
        Some(Value::String(s)) => Ok(s.as_str()),
        Some(_) => Err(FeatureError::MalformedInput {
            index,
            reason: format!("field `{name}` is not a string"),
        }),
        None => Err(FeatureError::MalformedInput {
            index,
            reason: format!("missing field `{name}`"),
        }),
    }
}

/// Train/test partition, order preserved
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Split<T = String, L = String> {
    pub train_texts: Vec<T>,
    pub train_labels: Vec<L>,
    pub test_texts: Vec<T>,
    pub test_labels: Vec<L>,
}

/// Positional split: the first `floor(total * train_ratio)` records train,
/// the rest test. No shuffling, so a file sorted by label gives a biased
/// split; shuffle first if that matters.
///
/// `train_ratio` is clamped to `[0, 1]`. If `texts` and `labels` differ in
/// length, `total` is the shorter one.
///
/// # Examples
/// ```
/// use feature_vectorizer::split_data;
/// let texts: Vec<u32> = (0..10).collect();
/// let split = split_data(&texts, &texts, 0.8);
/// assert_eq!(split.train_texts, (0..8).collect::<Vec<_>>());
/// assert_eq!(split.test_texts, vec![8, 9]);
/// ```
pub fn split_data<T, L>(texts: &[T], labels: &[L], train_ratio: f64) -> Split<T, L>
where
    T: Clone,
    L: Clone,
{
    if texts.len() != labels.len() {
        warn!(texts = texts.len(), labels = labels.len(), "texts and labels differ in length");
    }
    let total = texts.len().min(labels.len());
    let ratio = if train_ratio.is_nan() { 0.0 } else { train_ratio.clamp(0.0, 1.0) };
    let train_size = ((total as f64 * ratio).floor() as usize).min(total);

    Split {
        train_texts: texts[..train_size].to_vec(),
        train_labels: labels[..train_size].to_vec(),
        test_texts: texts[train_size..total].to_vec(),
        test_labels: labels[train_size..total].to_vec(),
    }
}

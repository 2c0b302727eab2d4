use std::{fs, path::PathBuf, time::Instant};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use serde_json::Value;
use tracing::info;
use tracing_subscriber::EnvFilter;

use feature_vectorizer::{load_dataset, tokenize, Dataset, DatasetStats, FeatureExtractor, DEFAULT_TRAIN_RATIO};

#[derive(Parser)]
#[command(name = "feature-vectorizer", version, about = "Turn labeled short documents into feature vectors")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the tokens of a text
    Tokenize { text: String },
    /// Print dataset statistics
    Analyze {
        dataset: PathBuf,
        /// Most frequent tokens listed per label
        #[arg(long, default_value_t = 10)]
        top_k: usize,
        /// Print JSON instead of a report
        #[arg(long)]
        json: bool,
    },
    /// Split a dataset and vectorize both sides against the train vocabulary
    Vectorize {
        dataset: PathBuf,
        #[arg(long, value_enum, default_value_t = Method::Bow)]
        method: Method,
        /// N-gram order for `--method ngram`
        #[arg(long, default_value_t = 2)]
        ngram: usize,
        #[arg(long, default_value_t = DEFAULT_TRAIN_RATIO)]
        train_ratio: f64,
        /// Write the feature matrices as JSON
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
enum Method {
    Bow,
    Tfidf,
    Ngram,
}

/// Feature rows of one split with their labels
#[derive(Serialize)]
struct Rows<V> {
    features: Vec<Vec<V>>,
    labels: Vec<String>,
}

/// Output of `vectorize`; `vocabulary[i]` names column `i`
#[derive(Serialize)]
struct FeatureMatrix<V> {
    method: Method,
    vocabulary: Vec<String>,
    train: Rows<V>,
    test: Rows<V>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    match Cli::parse().command {
        Command::Tokenize { text } => {
            println!("{}", tokenize(&text).join(" "));
        }
        Command::Analyze { dataset, top_k, json } => {
            let data = load_dataset(&dataset)
                .with_context(|| format!("failed to load {}", dataset.display()))?;
            let stats = DatasetStats::from_dataset(&data, top_k);
            if json {
                println!("{}", serde_json::to_string_pretty(&stats)?);
            } else {
                print!("{stats}");
            }
        }
        Command::Vectorize { dataset, method, ngram, train_ratio, output } => {
            vectorize(dataset, method, ngram, train_ratio, output)?;
        }
    }
    Ok(())
}

fn vectorize(
    dataset: PathBuf,
    method: Method,
    ngram: usize,
    train_ratio: f64,
    output: Option<PathBuf>,
) -> Result<()> {
    let data = load_dataset(&dataset)
        .with_context(|| format!("failed to load {}", dataset.display()))?;
    let json = feature_matrix_json(&data, method, ngram, train_ratio)?;

    if let Some(path) = output {
        fs::write(&path, serde_json::to_string(&json)?)
            .with_context(|| format!("failed to write {}", path.display()))?;
        info!(path = %path.display(), "features written");
    }
    Ok(())
}

/// Split `data`, build the vocabulary from the train side and encode both sides.
fn feature_matrix_json(data: &Dataset, method: Method, ngram: usize, train_ratio: f64) -> Result<Value> {
    let split = data.split(train_ratio);
    info!(train = split.train_texts.len(), test = split.test_texts.len(), "dataset split");

    let mut extractor = FeatureExtractor::new();
    extractor.build_vocabulary(&split.train_texts);

    let start = Instant::now();
    let json = match method {
        Method::Bow => {
            let matrix = FeatureMatrix {
                method,
                vocabulary: extractor.vocabulary().iter().map(|t| t.to_string()).collect(),
                train: Rows { features: extractor.bag_of_words(&split.train_texts), labels: split.train_labels },
                test: Rows { features: extractor.bag_of_words(&split.test_texts), labels: split.test_labels },
            };
            report(&matrix, start);
            serde_json::to_value(&matrix)?
        }
        Method::Tfidf => {
            // each call recomputes IDF from its own split
            let train = extractor.tfidf(&split.train_texts).context("train split")?;
            let test = extractor.tfidf(&split.test_texts).context("test split")?;
            let matrix = FeatureMatrix {
                method,
                vocabulary: extractor.vocabulary().iter().map(|t| t.to_string()).collect(),
                train: Rows { features: train, labels: split.train_labels },
                test: Rows { features: test, labels: split.test_labels },
            };
            report(&matrix, start);
            serde_json::to_value(&matrix)?
        }
        Method::Ngram => {
            let vocabulary = extractor.build_ngram_vocabulary(&split.train_texts, ngram);
            let matrix = FeatureMatrix {
                method,
                vocabulary,
                train: Rows { features: extractor.ngram_features(&split.train_texts, ngram), labels: split.train_labels },
                test: Rows { features: extractor.ngram_features(&split.test_texts, ngram), labels: split.test_labels },
            };
            report(&matrix, start);
            serde_json::to_value(&matrix)?
        }
    };
    Ok(json)
}

fn report<V>(matrix: &FeatureMatrix<V>, start: Instant) {
    info!(
        method = ?matrix.method,
        width = matrix.vocabulary.len(),
        train = matrix.train.features.len(),
        test = matrix.test.features.len(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "features extracted"
    );
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn dataset() -> Dataset {
        Dataset {
            texts: ["cat dog", "dog bird", "cat cat", "bird", "dog fish"]
                .map(String::from)
                .to_vec(),
            labels: ["a", "b", "a", "b", "a"].map(String::from).to_vec(),
        }
    }

    #[test]
    fn bow_matrix_uses_train_vocabulary() {
        let value = feature_matrix_json(&dataset(), Method::Bow, 2, 0.8).unwrap();
        assert_eq!(value["method"], json!("bow"));
        assert_eq!(value["vocabulary"], json!(["bird", "cat", "dog"]));
        assert_eq!(value["train"]["features"], json!([[0, 1, 1], [1, 0, 1], [0, 2, 0], [1, 0, 0]]));
        assert_eq!(value["train"]["labels"], json!(["a", "b", "a", "b"]));
        // fish is not in the train vocabulary
        assert_eq!(value["test"]["features"], json!([[0, 0, 1]]));
        assert_eq!(value["test"]["labels"], json!(["a"]));
    }

    #[test]
    fn ngram_matrix_uses_train_bigrams() {
        let value = feature_matrix_json(&dataset(), Method::Ngram, 2, 0.8).unwrap();
        assert_eq!(value["method"], json!("ngram"));
        assert_eq!(value["vocabulary"], json!(["cat cat", "cat dog", "dog bird"]));
        assert_eq!(value["train"]["features"][3], json!([0, 0, 0]));
        assert_eq!(value["test"]["features"], json!([[0, 0, 0]]));
    }

    #[test]
    fn tfidf_matrix_rows_match_vocabulary_width() {
        let value = feature_matrix_json(&dataset(), Method::Tfidf, 2, 0.8).unwrap();
        let width = value["vocabulary"].as_array().unwrap().len();
        for side in ["train", "test"] {
            for row in value[side]["features"].as_array().unwrap() {
                assert_eq!(row.as_array().unwrap().len(), width);
            }
        }
        // a single test document makes every idf ln(1/1) = 0
        assert_eq!(value["test"]["features"], json!([[0.0, 0.0, 0.0]]));
    }

    #[test]
    fn tfidf_matrix_fails_on_empty_document() {
        let mut data = dataset();
        data.texts[1] = "?!".to_string();
        assert!(feature_matrix_json(&data, Method::Tfidf, 2, 0.8).is_err());
    }
}

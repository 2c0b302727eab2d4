use num::Float;

use crate::vectorizer::{corpus::Corpus, token::TokenFrequency};

pub trait TFIDFEngine<N>
where
    N: Float,
{
    /// IDFベクトルを生成するメソッド
    /// # Arguments
    /// * `corpus` - コーパス
    /// * `token_dim_sample` - トークンの次元サンプル
    /// # Returns
    /// * `Vec<N>` - `token_dim_sample` 順のIDFベクトル
    fn idf_vec(corpus: &Corpus, token_dim_sample: &[&str]) -> Vec<N>;

    /// TFベクトルを生成するメソッド
    /// `freq` は空であってはならない
    fn tf_vec(freq: &TokenFrequency, token_dim_sample: &[&str]) -> Vec<N>;
}

/// Default TF-IDF engine
///
/// - `tf = count / token_sum`
/// - `idf = ln(doc_num / doc_freq)`, or `0` when the token is in no document
///
/// Implemented for every `num::Float` (`f32`, `f64`).
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultTFIDFEngine;

impl DefaultTFIDFEngine {
    pub fn new() -> Self {
        DefaultTFIDFEngine
    }

    /// 1トークン分のIDF
    #[inline]
    pub fn idf(doc_num: u64, doc_freq: u64) -> f64 {
        if doc_freq == 0 {
            return 0.0;
        }
        (doc_num as f64 / doc_freq as f64).ln()
    }
}

impl<N> TFIDFEngine<N> for DefaultTFIDFEngine
where
    N: Float,
{
    fn idf_vec(corpus: &Corpus, token_dim_sample: &[&str]) -> Vec<N> {
        let doc_num = corpus.get_doc_num();
        token_dim_sample
            .iter()
            .map(|token| {
                let idf = Self::idf(doc_num, corpus.get_token_count(token));
                N::from(idf).unwrap_or_else(N::zero)
            })
            .collect()
    }

    fn tf_vec(freq: &TokenFrequency, token_dim_sample: &[&str]) -> Vec<N> {
        let total_count = freq.token_sum() as f64;
        token_dim_sample
            .iter()
            .map(|token| {
                let count = freq.token_count(token) as f64;
                N::from(count / total_count).unwrap_or_else(N::zero)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idf_is_log_ratio_and_zero_when_unseen() {
        assert_eq!(DefaultTFIDFEngine::idf(4, 0), 0.0);
        assert_eq!(DefaultTFIDFEngine::idf(4, 4), 0.0);
        assert!((DefaultTFIDFEngine::idf(4, 1) - 4f64.ln()).abs() < 1e-12);
    }

    #[test]
    fn idf_vec_follows_dimension() {
        let freqs: Vec<TokenFrequency> = vec![
            ["cat", "dog"].into_iter().collect(),
            ["dog", "bird"].into_iter().collect(),
        ];
        let corpus = Corpus::from_frequencies(&freqs);
        let idf: Vec<f64> =
            <DefaultTFIDFEngine as TFIDFEngine<f64>>::idf_vec(&corpus, &["bird", "dog", "fish"]);
        assert!((idf[0] - 2f64.ln()).abs() < 1e-12);
        assert_eq!(idf[1], 0.0);
        assert_eq!(idf[2], 0.0);
    }

    #[test]
    fn tf_vec_divides_by_token_sum() {
        let freq: TokenFrequency = ["a", "a", "b", "c"].into_iter().collect();
        let tf: Vec<f32> = <DefaultTFIDFEngine as TFIDFEngine<f32>>::tf_vec(&freq, &["a", "c", "z"]);
        assert_eq!(tf, vec![0.5, 0.25, 0.0]);
    }
}

//! TF-IDF Vectorizer
//!
//! Bag of unigrams + bigrams over `\b\w\w+\b` tokens (lowercased),
//! vocabulary capped by corpus term frequency, smooth idf, L2 rows.

use std::collections::{BTreeMap, HashMap};

use ndarray::Array2;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{EngineError, EngineResult};

static TOKEN_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b\w\w+\b").expect("token pattern is valid"));

#[derive(Debug, Clone)]
pub struct TfidfVectorizer {
    pub max_features: usize,
    /// Inclusive n-gram range
    pub ngram_range: (usize, usize),
}

impl Default for TfidfVectorizer {
    fn default() -> Self {
        Self {
            max_features: 50,
            ngram_range: (1, 2),
        }
    }
}

/// Fitted document-term matrix
#[derive(Debug, Clone)]
pub struct TfidfMatrix {
    /// One L2-normalized row per document
    pub matrix: Array2<f64>,
    /// Column terms, alphabetical
    pub vocabulary: Vec<String>,
    pub idf: Vec<f64>,
}

impl TfidfVectorizer {
    pub fn new(max_features: usize) -> Self {
        Self {
            max_features,
            ..Default::default()
        }
    }

    /// Terms of one document, n-grams joined by a single space
    pub fn analyze(&self, doc: &str) -> Vec<String> {
        let lowered = doc.to_lowercase();
        let words: Vec<&str> = TOKEN_PATTERN.find_iter(&lowered).map(|m| m.as_str()).collect();

        let (min_n, max_n) = self.ngram_range;
        let mut terms = Vec::new();
        for n in min_n.max(1)..=max_n {
            if n > words.len() {
                break;
            }
            terms.extend(words.windows(n).map(|w| w.join(" ")));
        }
        terms
    }

    pub fn fit_transform<S: AsRef<str>>(&self, docs: &[S]) -> EngineResult<TfidfMatrix> {
        let analyzed: Vec<Vec<String>> = docs.iter().map(|d| self.analyze(d.as_ref())).collect();

        // Corpus term frequency and document frequency
        let mut term_freq: HashMap<&str, usize> = HashMap::new();
        let mut doc_freq: HashMap<&str, usize> = HashMap::new();
        for terms in &analyzed {
            let mut seen: Vec<&str> = Vec::with_capacity(terms.len());
            for term in terms {
                *term_freq.entry(term.as_str()).or_insert(0) += 1;
                if !seen.contains(&term.as_str()) {
                    seen.push(term.as_str());
                    *doc_freq.entry(term.as_str()).or_insert(0) += 1;
                }
            }
        }

        if term_freq.is_empty() {
            return Err(EngineError::model_fit(
                "empty vocabulary; documents contain no terms",
            ));
        }

        // Keep the most frequent terms, ties broken lexically
        let mut ranked: Vec<(&str, usize)> = term_freq.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        ranked.truncate(self.max_features);

        let mut vocabulary: Vec<String> = ranked.iter().map(|(t, _)| t.to_string()).collect();
        vocabulary.sort();
        let column: BTreeMap<&str, usize> = vocabulary
            .iter()
            .enumerate()
            .map(|(i, t)| (t.as_str(), i))
            .collect();

        let n_docs = docs.len() as f64;
        let idf: Vec<f64> = vocabulary
            .iter()
            .map(|t| {
                let df = doc_freq.get(t.as_str()).copied().unwrap_or(0) as f64;
                ((1.0 + n_docs) / (1.0 + df)).ln() + 1.0
            })
            .collect();

        let mut matrix = Array2::<f64>::zeros((docs.len(), vocabulary.len()));
        for (row, terms) in analyzed.iter().enumerate() {
            for term in terms {
                if let Some(&col) = column.get(term.as_str()) {
                    matrix[[row, col]] += 1.0;
                }
            }
            for (col, w) in idf.iter().enumerate() {
                matrix[[row, col]] *= w;
            }
            let norm = matrix.row(row).dot(&matrix.row(row)).sqrt();
            if norm > 0.0 {
                matrix.row_mut(row).mapv_inplace(|v| v / norm);
            }
        }

        Ok(TfidfMatrix { matrix, vocabulary, idf })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analyze_unigrams_and_bigrams() {
        let v = TfidfVectorizer::default();
        assert_eq!(
            v.analyze("T1059.001 PowerShell"),
            vec!["t1059", "001", "powershell", "t1059 001", "001 powershell"]
        );
        // Single-character words are not terms
        assert!(v.analyze("a b").is_empty());
    }

    #[test]
    fn test_rows_are_unit_length() {
        let docs = ["T1566 phishing", "T1566 phishing link", "T1110 brute force"];
        let fitted = TfidfVectorizer::default().fit_transform(&docs).unwrap();

        assert_eq!(fitted.matrix.nrows(), 3);
        for row in fitted.matrix.rows() {
            assert!((row.dot(&row).sqrt() - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_vocabulary_cap() {
        let docs: Vec<String> = (0..30).map(|i| format!("term{} shared", i)).collect();
        let fitted = TfidfVectorizer::new(5).fit_transform(&docs).unwrap();
        assert_eq!(fitted.vocabulary.len(), 5);
        // The most frequent term always survives
        assert!(fitted.vocabulary.contains(&"shared".to_string()));
    }

    #[test]
    fn test_empty_vocabulary_is_error() {
        let docs = ["a", "b", "-"];
        assert!(TfidfVectorizer::default().fit_transform(&docs).is_err());
    }
}

//! Offline relevance evaluation.
//!
//! Scores the lexical, probabilistic, and hybrid rankings against labelled
//! queries with binary relevance: precision@k, recall@k, F1 and nDCG@k
//! (log2 discount).

use crate::engine::{HybridRanker, SearchQuery};
use crate::text::TextNormalizer;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A query with the ids of the recipes judged relevant to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvalQuery {
    pub query: String,
    pub relevant_ids: Vec<u64>,
}

/// Which ranking produced a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Retriever {
    Lexical,
    Probabilistic,
    Hybrid,
}

impl Retriever {
    pub const ALL: [Retriever; 3] = [Retriever::Lexical, Retriever::Probabilistic, Retriever::Hybrid];
}

/// Metrics for one ranking of one query, or a mean over queries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Metrics {
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    pub ndcg: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryResult {
    pub query: String,
    pub retriever: Retriever,
    pub metrics: Metrics,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvaluationReport {
    pub k: usize,
    pub alpha: f32,
    pub queries: Vec<QueryResult>,
    /// Mean metrics per retriever, in [`Retriever::ALL`] order.
    pub summary: Vec<(Retriever, Metrics)>,
}

impl EvaluationReport {
    pub fn mean(&self, retriever: Retriever) -> Option<Metrics> {
        self.summary
            .iter()
            .find(|(r, _)| *r == retriever)
            .map(|(_, m)| *m)
    }
}

/// Fraction of the first `k` predictions that are relevant. Divides by `k`.
pub fn precision_at_k(predicted: &[u64], relevant: &HashSet<u64>, k: usize) -> f64 {
    if k == 0 {
        return 0.0;
    }
    hits(predicted, relevant, k) as f64 / k as f64
}

/// Fraction of the relevant set found in the first `k` predictions.
pub fn recall_at_k(predicted: &[u64], relevant: &HashSet<u64>, k: usize) -> f64 {
    if relevant.is_empty() {
        return 0.0;
    }
    hits(predicted, relevant, k) as f64 / relevant.len() as f64
}

/// Harmonic mean of precision and recall; 0 when both are 0.
pub fn f1(precision: f64, recall: f64) -> f64 {
    if precision + recall == 0.0 {
        0.0
    } else {
        2.0 * precision * recall / (precision + recall)
    }
}

/// Normalized discounted cumulative gain with binary gains.
pub fn ndcg_at_k(predicted: &[u64], relevant: &HashSet<u64>, k: usize) -> f64 {
    let dcg: f64 = predicted
        .iter()
        .take(k)
        .enumerate()
        .filter(|(_, id)| relevant.contains(*id))
        .map(|(i, _)| 1.0 / ((i + 2) as f64).log2())
        .sum();
    let ideal_hits = relevant.len().min(k);
    let idcg: f64 = (0..ideal_hits).map(|i| 1.0 / ((i + 2) as f64).log2()).sum();
    if idcg > 0.0 {
        dcg / idcg
    } else {
        0.0
    }
}

fn hits(predicted: &[u64], relevant: &HashSet<u64>, k: usize) -> usize {
    predicted
        .iter()
        .take(k)
        .collect::<HashSet<_>>()
        .into_iter()
        .filter(|id| relevant.contains(*id))
        .count()
}

fn score(predicted: &[u64], relevant: &HashSet<u64>, k: usize) -> Metrics {
    let precision = precision_at_k(predicted, relevant, k);
    let recall = recall_at_k(predicted, relevant, k);
    Metrics {
        precision,
        recall,
        f1: f1(precision, recall),
        ndcg: ndcg_at_k(predicted, relevant, k),
    }
}

/// Runs every query through the three rankings and averages the metrics.
pub fn evaluate(
    ranker: &HybridRanker,
    normalizer: &TextNormalizer,
    queries: &[EvalQuery],
    k: usize,
    alpha: f32,
) -> EvaluationReport {
    let ids = |ordinals: Vec<u32>| -> Vec<u64> {
        ordinals
            .into_iter()
            .filter_map(|o| ranker.document(o).map(|r| r.id))
            .collect()
    };

    let mut rows = Vec::with_capacity(queries.len() * Retriever::ALL.len());
    for q in queries {
        let relevant: HashSet<u64> = q.relevant_ids.iter().copied().collect();
        let tokens = normalizer.normalize(&q.query);

        for retriever in Retriever::ALL {
            let predicted = match retriever {
                Retriever::Lexical => ids(ranker
                    .lexical()
                    .search(&q.query, k)
                    .into_iter()
                    .map(|(o, _)| o)
                    .collect()),
                Retriever::Probabilistic => ids(ranker
                    .probabilistic()
                    .search(&tokens, k)
                    .into_iter()
                    .map(|(o, _)| o)
                    .collect()),
                Retriever::Hybrid => {
                    let query = SearchQuery::new(q.query.as_str(), tokens.clone())
                        .with_top_k(k)
                        .with_alpha(alpha);
                    ranker.search(&query).iter().map(|r| r.recipe.id).collect()
                }
            };
            rows.push(QueryResult {
                query: q.query.clone(),
                retriever,
                metrics: score(&predicted, &relevant, k),
            });
        }
    }

    let summary = Retriever::ALL
        .iter()
        .map(|&retriever| {
            let selected: Vec<&Metrics> = rows
                .iter()
                .filter(|r| r.retriever == retriever)
                .map(|r| &r.metrics)
                .collect();
            let n = selected.len().max(1) as f64;
            let mean = Metrics {
                precision: selected.iter().map(|m| m.precision).sum::<f64>() / n,
                recall: selected.iter().map(|m| m.recall).sum::<f64>() / n,
                f1: selected.iter().map(|m| m.f1).sum::<f64>() / n,
                ndcg: selected.iter().map(|m| m.ndcg).sum::<f64>() / n,
            };
            (retriever, mean)
        })
        .collect();

    tracing::info!(queries = queries.len(), k, "Evaluation finished");
    EvaluationReport {
        k,
        alpha,
        queries: rows,
        summary,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::{DocumentBuilder, RecipeRecord};

    fn set(ids: &[u64]) -> HashSet<u64> {
        ids.iter().copied().collect()
    }

    #[test]
    fn test_precision_divides_by_k() {
        assert_eq!(precision_at_k(&[1, 2], &set(&[1]), 10), 0.1);
        assert_eq!(precision_at_k(&[1, 2, 3], &set(&[1, 3]), 2), 0.5);
        assert_eq!(precision_at_k(&[1], &set(&[1]), 0), 0.0);
    }

    #[test]
    fn test_recall() {
        assert_eq!(recall_at_k(&[1, 2, 3], &set(&[1, 3, 9, 10]), 3), 0.5);
        assert_eq!(recall_at_k(&[1], &set(&[]), 3), 0.0);
    }

    #[test]
    fn test_f1() {
        assert_eq!(f1(0.0, 0.0), 0.0);
        assert!((f1(0.5, 0.25) - 1.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_ndcg() {
        assert!((ndcg_at_k(&[1, 2], &set(&[1, 2]), 10) - 1.0).abs() < 1e-12);
        // single hit at rank 2 of one relevant: (1/log2(3)) / 1
        let expected = 1.0 / 3f64.log2();
        assert!((ndcg_at_k(&[5, 1], &set(&[1]), 10) - expected).abs() < 1e-12);
        assert_eq!(ndcg_at_k(&[5, 6], &set(&[]), 10), 0.0);
        assert_eq!(ndcg_at_k(&[5, 1], &set(&[1]), 1), 0.0);
    }

    #[test]
    fn test_evaluate_reports_every_retriever() {
        let records = [
            ("Chicken Rice Soup", vec!["chicken", "rice", "water"]),
            ("Chocolate Cake", vec!["chocolate", "flour", "sugar"]),
            ("Fried Rice", vec!["rice", "egg", "soy sauce"]),
        ]
        .into_iter()
        .enumerate()
        .map(|(i, (name, ingredients))| RecipeRecord {
            id: Some(10 + i as u64),
            name: Some(name.into()),
            minutes: Some(20),
            ingredients: Some(ingredients.into_iter().map(String::from).collect()),
            steps: Some(vec!["cook".into()]),
            ..Default::default()
        })
        .collect();
        let builder = DocumentBuilder::default();
        let ranker = HybridRanker::build(builder.build(records).unwrap()).unwrap();

        let queries = vec![EvalQuery {
            query: "chocolate cake".into(),
            relevant_ids: vec![11],
        }];
        let report = evaluate(&ranker, builder.normalizer(), &queries, 1, 0.7);

        assert_eq!(report.queries.len(), 3);
        for retriever in Retriever::ALL {
            let m = report.mean(retriever).unwrap();
            assert_eq!(m.precision, 1.0, "{retriever:?}");
            assert_eq!(m.ndcg, 1.0, "{retriever:?}");
        }
    }
}

use crate::{ActiveCriterion, CriterionWeight};

use super::matrix::{build_comparison_matrix, JudgmentMap};
use super::AhpError;

/// Saaty random index by matrix size (n = 1..=10). Sizes beyond the table
/// use 0, which also forces CR to 0.
const RANDOM_INDEX: [f64; 10] = [0.00, 0.00, 0.58, 0.90, 1.12, 1.24, 1.32, 1.41, 1.45, 1.49];

/// Judgments with CR at or below this are conventionally accepted.
pub const CONSISTENCY_THRESHOLD: f64 = 0.10;

fn random_index(n: usize) -> f64 {
    n.checked_sub(1)
        .and_then(|idx| RANDOM_INDEX.get(idx))
        .copied()
        .unwrap_or(0.0)
}

/// Full outcome of one AHP run: the reconstructed matrix, every intermediate
/// step, and the consistency verdict. Kept whole so admin screens can show
/// the derivation, not just the weights.
#[derive(Debug, Clone)]
pub struct AhpComputation {
    /// Criteria in matrix row/column order (ascending id).
    pub criteria: Vec<ActiveCriterion>,
    pub comparison_matrix: Vec<Vec<f64>>,
    pub column_sums: Vec<f64>,
    pub normalized_matrix: Vec<Vec<f64>>,
    /// Derived weights, one per criterion, summing to 1.
    pub priority_vector: Vec<f64>,
    /// Per-row lambda estimates; their mean is `lambda_max`.
    pub lambda_values: Vec<f64>,
    pub lambda_max: f64,
    pub consistency_index: f64,
    pub consistency_ratio: f64,
    pub is_consistent: bool,
}

impl AhpComputation {
    /// Weights paired back with their criteria, in matrix order.
    pub fn criterion_weights(&self) -> Vec<CriterionWeight> {
        self.criteria
            .iter()
            .zip(&self.priority_vector)
            .map(|(criterion, weight)| CriterionWeight {
                criterion_id: criterion.id,
                name: criterion.name.clone(),
                weight: *weight,
            })
            .collect()
    }
}

/// Derive priority weights for the given criteria from their pairwise
/// judgments and evaluate judgment consistency.
///
/// Inconsistent judgments (CR above the threshold) are not rejected: the
/// computation is returned with `is_consistent = false` and the caller
/// decides whether to store it and prompt for revised judgments.
pub fn compute_weights(
    criteria: &[ActiveCriterion],
    judgments: &JudgmentMap,
) -> Result<AhpComputation, AhpError> {
    let n = criteria.len();
    if n < 2 {
        return Err(AhpError::InsufficientCriteria { count: n });
    }

    let criterion_ids: Vec<i64> = criteria.iter().map(|criterion| criterion.id).collect();
    let comparison_matrix = build_comparison_matrix(&criterion_ids, judgments)?;

    let mut column_sums = vec![0.0; n];
    for row in &comparison_matrix {
        for (j, value) in row.iter().enumerate() {
            column_sums[j] += value;
        }
    }

    let normalized_matrix: Vec<Vec<f64>> = comparison_matrix
        .iter()
        .map(|row| {
            row.iter()
                .enumerate()
                .map(|(j, value)| value / column_sums[j])
                .collect()
        })
        .collect();

    let priority_vector: Vec<f64> = normalized_matrix
        .iter()
        .map(|row| row.iter().sum::<f64>() / n as f64)
        .collect();

    let lambda_values: Vec<f64> = comparison_matrix
        .iter()
        .enumerate()
        .map(|(i, row)| {
            let weighted_sum: f64 = row
                .iter()
                .zip(&priority_vector)
                .map(|(value, weight)| value * weight)
                .sum();
            weighted_sum / priority_vector[i]
        })
        .collect();

    let lambda_max = lambda_values.iter().sum::<f64>() / n as f64;
    let consistency_index = (lambda_max - n as f64) / (n as f64 - 1.0);
    let ri = random_index(n);
    let consistency_ratio = if ri != 0.0 {
        consistency_index / ri
    } else {
        0.0
    };

    Ok(AhpComputation {
        criteria: criteria.to_vec(),
        comparison_matrix,
        column_sums,
        normalized_matrix,
        priority_vector,
        lambda_values,
        lambda_max,
        consistency_index,
        consistency_ratio,
        is_consistent: consistency_ratio <= CONSISTENCY_THRESHOLD,
    })
}

use serde::{Deserialize, Serialize};

use crate::ahp::AhpComputation;

/// Serializable payload of one AHP run, including every intermediate step
/// so admin screens can render the whole derivation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AhpReport {
    /// Criteria in matrix row/column order.
    pub criteria: Vec<CriterionRef>,
    pub comparison_matrix: Vec<Vec<f64>>,
    pub column_sums: Vec<f64>,
    pub normalized_matrix: Vec<Vec<f64>>,
    pub priority_vector: Vec<WeightEntry>,
    pub lambda_values: Vec<f64>,
    pub lambda_max: f64,
    pub consistency_index: f64,
    pub consistency_ratio: f64,
    pub is_consistent: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CriterionRef {
    pub criterion_id: i64,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeightEntry {
    pub criterion_id: i64,
    pub name: String,
    pub weight: f64,
}

impl AhpReport {
    pub fn from_computation(computation: &AhpComputation) -> Self {
        Self {
            criteria: computation
                .criteria
                .iter()
                .map(|criterion| CriterionRef {
                    criterion_id: criterion.id,
                    name: criterion.name.clone(),
                })
                .collect(),
            comparison_matrix: computation.comparison_matrix.clone(),
            column_sums: computation.column_sums.clone(),
            normalized_matrix: computation.normalized_matrix.clone(),
            priority_vector: computation
                .criterion_weights()
                .into_iter()
                .map(|weight| WeightEntry {
                    criterion_id: weight.criterion_id,
                    name: weight.name,
                    weight: weight.weight,
                })
                .collect(),
            lambda_values: computation.lambda_values.clone(),
            lambda_max: computation.lambda_max,
            consistency_index: computation.consistency_index,
            consistency_ratio: computation.consistency_ratio,
            is_consistent: computation.is_consistent,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ahp::{compute_weights, JudgmentMap};
    use crate::ActiveCriterion;

    #[test]
    fn report_round_trips_through_json() {
        let criteria = vec![
            ActiveCriterion {
                id: 1,
                name: "Technical Skill".into(),
            },
            ActiveCriterion {
                id: 2,
                name: "Soft Skill".into(),
            },
        ];
        let mut judgments = JudgmentMap::new();
        judgments.insert((1, 2), 3.0);

        let computation = compute_weights(&criteria, &judgments).unwrap();
        let report = AhpReport::from_computation(&computation);

        let json = serde_json::to_string(&report).unwrap();
        let parsed: AhpReport = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.criteria.len(), 2);
        assert_eq!(parsed.priority_vector.len(), 2);
        assert_eq!(parsed.lambda_max, computation.lambda_max);
        assert_eq!(parsed.is_consistent, computation.is_consistent);
        assert_eq!(parsed.comparison_matrix[0][1], 3.0);
    }
}

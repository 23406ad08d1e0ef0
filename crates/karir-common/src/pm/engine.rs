use std::collections::HashMap;

use crate::{CriterionWeight, SubCriterionProfile};

use super::gap::gap_score;
use super::PmError;

/// Where the actual values of a profile-matching run come from.
#[derive(Debug, Clone, Copy)]
pub enum ActualValues<'a> {
    /// Baseline mode: every actual equals the job's own ideal value, so
    /// every gap is 0 and every evaluated sub-criterion scores 5. This is
    /// intentionally degenerate; it seeds a reference score for the job
    /// whenever its weights change.
    IdealSelf,
    /// Values the end user supplied, keyed by sub-criterion id. A missing
    /// entry and an explicit 0 both mean "not rated": the valid scale starts
    /// at 1 and 0 is reused as the blank sentinel.
    User(&'a HashMap<i64, i32>),
}

impl ActualValues<'_> {
    /// The present actual value for one profile entry, with the 0 sentinel
    /// already normalized away.
    fn resolve(&self, entry: &SubCriterionProfile) -> Option<i32> {
        match self {
            ActualValues::IdealSelf => Some(entry.ideal_value),
            ActualValues::User(values) => values
                .get(&entry.sub_criterion_id)
                .copied()
                .filter(|value| *value != 0),
        }
    }
}

/// One sub-criterion of the gap trace. Rows for absent actual values are
/// kept, with `None` in the actual/gap/score fields.
#[derive(Debug, Clone, PartialEq)]
pub struct GapRow {
    pub criterion_id: i64,
    pub criterion_name: String,
    pub sub_criterion_id: i64,
    pub sub_criterion_name: String,
    pub ideal_value: i32,
    pub actual_value: Option<i32>,
    pub gap: Option<i32>,
    pub score: Option<f64>,
}

/// Mean sub-criterion score for one main criterion.
#[derive(Debug, Clone, PartialEq)]
pub struct AspectScore {
    pub criterion_id: i64,
    pub criterion_name: String,
    pub score: f64,
    /// How many sub-criteria had a present actual value and entered the mean.
    pub evaluated_sub_criteria: usize,
}

/// Full outcome of one profile-matching run for one job.
#[derive(Debug, Clone, PartialEq)]
pub struct PmComputation {
    pub gap_rows: Vec<GapRow>,
    pub aspect_scores: Vec<AspectScore>,
    pub final_score: f64,
}

/// Score how well a set of actual values matches a job's ideal profile.
///
/// Criteria are walked in `weights` order. Each criterion's aspect score is
/// the mean of its present sub-criterion scores; a criterion with no present
/// sub-criterion (or none at all) keeps an aspect score of 0 and still
/// appears in the output, weighted into the final sum as weight times 0.
/// Sub-criteria whose criterion carries no AHP weight are not evaluated.
pub fn evaluate(
    weights: &[CriterionWeight],
    profile: &[SubCriterionProfile],
    actuals: ActualValues<'_>,
) -> Result<PmComputation, PmError> {
    if weights.is_empty() {
        return Err(PmError::MissingAhpWeights);
    }
    if profile.is_empty() {
        return Err(PmError::NoActiveSubCriteria);
    }

    let mut gap_rows = Vec::with_capacity(profile.len());
    let mut aspect_scores = Vec::with_capacity(weights.len());
    let mut final_score = 0.0;

    for weight in weights {
        let mut score_sum = 0.0;
        let mut evaluated = 0usize;

        for entry in profile
            .iter()
            .filter(|entry| entry.criterion_id == weight.criterion_id)
        {
            let actual_value = actuals.resolve(entry);
            let gap = actual_value.map(|actual| actual - entry.ideal_value);
            let score = gap.map(gap_score);

            if let Some(score) = score {
                score_sum += score;
                evaluated += 1;
            }

            gap_rows.push(GapRow {
                criterion_id: weight.criterion_id,
                criterion_name: weight.name.clone(),
                sub_criterion_id: entry.sub_criterion_id,
                sub_criterion_name: entry.name.clone(),
                ideal_value: entry.ideal_value,
                actual_value,
                gap,
                score,
            });
        }

        let aspect = if evaluated > 0 {
            score_sum / evaluated as f64
        } else {
            0.0
        };

        aspect_scores.push(AspectScore {
            criterion_id: weight.criterion_id,
            criterion_name: weight.name.clone(),
            score: aspect,
            evaluated_sub_criteria: evaluated,
        });
        final_score += weight.weight * aspect;
    }

    Ok(PmComputation {
        gap_rows,
        aspect_scores,
        final_score,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 1e-9;

    fn weights() -> Vec<CriterionWeight> {
        vec![
            CriterionWeight {
                criterion_id: 1,
                name: "Technical Skill".into(),
                weight: 0.6,
            },
            CriterionWeight {
                criterion_id: 2,
                name: "Soft Skill".into(),
                weight: 0.4,
            },
        ]
    }

    fn profile_entry(
        sub_criterion_id: i64,
        criterion_id: i64,
        ideal_value: i32,
    ) -> SubCriterionProfile {
        SubCriterionProfile {
            sub_criterion_id,
            criterion_id,
            criterion_name: if criterion_id == 1 {
                "Technical Skill".into()
            } else {
                "Soft Skill".into()
            },
            name: format!("sub-{sub_criterion_id}"),
            code: format!("S{sub_criterion_id}"),
            ideal_value,
        }
    }

    fn profile() -> Vec<SubCriterionProfile> {
        vec![
            profile_entry(10, 1, 4),
            profile_entry(11, 1, 3),
            profile_entry(20, 2, 5),
        ]
    }

    #[test]
    fn ideal_self_assessment_scores_five_everywhere() {
        let result = evaluate(&weights(), &profile(), ActualValues::IdealSelf).unwrap();

        assert!(result.gap_rows.iter().all(|row| row.gap == Some(0)));
        assert!(result.gap_rows.iter().all(|row| row.score == Some(5.0)));
        for aspect in &result.aspect_scores {
            assert!((aspect.score - 5.0).abs() < TOLERANCE);
        }
        // Weights sum to 1, so the baseline final score is exactly 5.
        assert!((result.final_score - 5.0).abs() < TOLERANCE);
    }

    #[test]
    fn user_assessment_combines_weighted_aspect_means() {
        let mut values = HashMap::new();
        values.insert(10, 4); // gap 0 -> 5
        values.insert(11, 1); // gap -2 -> 3
        values.insert(20, 3); // gap -2 -> 3

        let result =
            evaluate(&weights(), &profile(), ActualValues::User(&values)).unwrap();

        // Criterion 1: mean(5, 3) = 4; criterion 2: 3.
        assert!((result.aspect_scores[0].score - 4.0).abs() < TOLERANCE);
        assert!((result.aspect_scores[1].score - 3.0).abs() < TOLERANCE);
        assert!((result.final_score - (0.6 * 4.0 + 0.4 * 3.0)).abs() < TOLERANCE);
    }

    #[test]
    fn zero_and_missing_values_are_absent() {
        let mut values = HashMap::new();
        values.insert(10, 0); // explicit 0: not rated
        values.insert(20, 4); // sub 11 omitted entirely

        let result =
            evaluate(&weights(), &profile(), ActualValues::User(&values)).unwrap();

        let zero_row = result
            .gap_rows
            .iter()
            .find(|row| row.sub_criterion_id == 10)
            .unwrap();
        assert_eq!(zero_row.actual_value, None);
        assert_eq!(zero_row.gap, None);
        assert_eq!(zero_row.score, None);

        let missing_row = result
            .gap_rows
            .iter()
            .find(|row| row.sub_criterion_id == 11)
            .unwrap();
        assert_eq!(missing_row.score, None);

        // Criterion 1 has no present sub-criterion, so its aspect is 0 and
        // it still contributes weight * 0 rather than being renormalized.
        assert_eq!(result.aspect_scores[0].score, 0.0);
        assert_eq!(result.aspect_scores[0].evaluated_sub_criteria, 0);
        assert!((result.final_score - 0.4 * 4.0).abs() < TOLERANCE);
    }

    #[test]
    fn weighted_criterion_without_sub_criteria_contributes_zero() {
        let mut all_weights = weights();
        all_weights.push(CriterionWeight {
            criterion_id: 3,
            name: "Interest".into(),
            weight: 0.2,
        });

        let mut values = HashMap::new();
        values.insert(10, 4); // gap 0 -> 5
        values.insert(11, 1); // gap -2 -> 3
        values.insert(20, 5); // gap 0 -> 5

        let result =
            evaluate(&all_weights, &profile(), ActualValues::User(&values)).unwrap();

        let interest = result
            .aspect_scores
            .iter()
            .find(|aspect| aspect.criterion_id == 3)
            .unwrap();
        assert_eq!(interest.score, 0.0);
        assert!((result.final_score - (0.6 * 4.0 + 0.4 * 5.0)).abs() < TOLERANCE);
    }

    #[test]
    fn unweighted_sub_criteria_stay_out_of_the_trace() {
        let mut extended = profile();
        extended.push(profile_entry(30, 9, 3)); // criterion 9 has no weight

        let result = evaluate(&weights(), &extended, ActualValues::IdealSelf).unwrap();
        assert!(result
            .gap_rows
            .iter()
            .all(|row| row.sub_criterion_id != 30));
    }

    #[test]
    fn missing_weights_block_the_run() {
        let err = evaluate(&[], &profile(), ActualValues::IdealSelf).unwrap_err();
        assert_eq!(err, PmError::MissingAhpWeights);
    }

    #[test]
    fn empty_profile_blocks_the_run() {
        let err = evaluate(&weights(), &[], ActualValues::IdealSelf).unwrap_err();
        assert_eq!(err, PmError::NoActiveSubCriteria);
    }
}

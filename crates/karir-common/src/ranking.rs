use std::{cmp::Ordering, collections::HashMap};

use crate::pm::{self, ActualValues, PmComputation};
use crate::{CriterionWeight, Job, SubCriterionProfile};

/// Everything needed to score one job for one user: the job itself, its
/// stored AHP weights, and its active ideal profile.
#[derive(Debug, Clone)]
pub struct JobEvaluation {
    pub job: Job,
    pub weights: Vec<CriterionWeight>,
    pub profile: Vec<SubCriterionProfile>,
}

/// One ranked job with its full computation trace for display.
#[derive(Debug, Clone)]
pub struct RankedJob {
    pub job: Job,
    pub result: PmComputation,
}

/// Score every candidate job against one user input vector and sort best
/// first. Jobs without stored AHP weights or without any active
/// sub-criterion are skipped rather than reported as errors. Ties keep the
/// incoming job order.
pub fn rank_jobs(
    candidates: Vec<JobEvaluation>,
    user_values: &HashMap<i64, i32>,
) -> Vec<RankedJob> {
    let mut ranked: Vec<RankedJob> = candidates
        .into_iter()
        .filter_map(|candidate| {
            pm::evaluate(
                &candidate.weights,
                &candidate.profile,
                ActualValues::User(user_values),
            )
            .ok()
            .map(|result| RankedJob {
                job: candidate.job,
                result,
            })
        })
        .collect();

    ranked.sort_by(|a, b| {
        match b
            .result
            .final_score
            .partial_cmp(&a.result.final_score)
            .unwrap_or(Ordering::Equal)
        {
            Ordering::Equal => Ordering::Equal,
            other => other,
        }
    });

    ranked
}

#[cfg(test)]
mod tests {
    use super::*;

    fn job(id: i64, name: &str) -> Job {
        Job {
            id,
            name: name.into(),
            average_salary: Some(8_000_000.0),
            description: None,
        }
    }

    fn weight(criterion_id: i64, weight: f64) -> CriterionWeight {
        CriterionWeight {
            criterion_id,
            name: format!("criterion-{criterion_id}"),
            weight,
        }
    }

    fn entry(sub_criterion_id: i64, criterion_id: i64, ideal_value: i32) -> SubCriterionProfile {
        SubCriterionProfile {
            sub_criterion_id,
            criterion_id,
            criterion_name: format!("criterion-{criterion_id}"),
            name: format!("sub-{sub_criterion_id}"),
            code: format!("S{sub_criterion_id}"),
            ideal_value,
        }
    }

    #[test]
    fn ranks_jobs_by_descending_final_score() {
        let mut values = HashMap::new();
        values.insert(10, 5);

        // Exact match on the close job, gap 4 on the far one.
        let close = JobEvaluation {
            job: job(1, "Data Analyst"),
            weights: vec![weight(1, 1.0)],
            profile: vec![entry(10, 1, 5)],
        };
        let far = JobEvaluation {
            job: job(2, "Graphic Designer"),
            weights: vec![weight(1, 1.0)],
            profile: vec![entry(10, 1, 1)],
        };

        let ranked = rank_jobs(vec![far, close], &values);

        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].job.id, 1);
        assert!(ranked[0].result.final_score > ranked[1].result.final_score);
    }

    #[test]
    fn jobs_missing_preconditions_are_skipped_silently() {
        let mut values = HashMap::new();
        values.insert(10, 3);

        let no_weights = JobEvaluation {
            job: job(1, "No Weights"),
            weights: vec![],
            profile: vec![entry(10, 1, 3)],
        };
        let no_profile = JobEvaluation {
            job: job(2, "No Profile"),
            weights: vec![weight(1, 1.0)],
            profile: vec![],
        };
        let ready = JobEvaluation {
            job: job(3, "Ready"),
            weights: vec![weight(1, 1.0)],
            profile: vec![entry(10, 1, 3)],
        };

        let ranked = rank_jobs(vec![no_weights, no_profile, ready], &values);

        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].job.id, 3);
    }

    #[test]
    fn tied_scores_keep_input_order() {
        let mut values = HashMap::new();
        values.insert(10, 4);

        let make = |id: i64| JobEvaluation {
            job: job(id, "Tied"),
            weights: vec![weight(1, 1.0)],
            profile: vec![entry(10, 1, 4)],
        };

        let ranked = rank_jobs(vec![make(7), make(3), make(5)], &values);
        let ids: Vec<i64> = ranked.iter().map(|r| r.job.id).collect();
        assert_eq!(ids, vec![7, 3, 5]);
    }

    #[test]
    fn each_ranked_job_carries_its_trace() {
        let mut values = HashMap::new();
        values.insert(10, 2);

        let candidate = JobEvaluation {
            job: job(1, "Traced"),
            weights: vec![weight(1, 1.0)],
            profile: vec![entry(10, 1, 4)],
        };

        let ranked = rank_jobs(vec![candidate], &values);
        let trace = &ranked[0].result;

        assert_eq!(trace.gap_rows.len(), 1);
        assert_eq!(trace.gap_rows[0].gap, Some(-2));
        assert_eq!(trace.gap_rows[0].score, Some(3.0));
        assert_eq!(trace.aspect_scores.len(), 1);
    }
}

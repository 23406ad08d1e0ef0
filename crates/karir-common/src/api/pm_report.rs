use serde::{Deserialize, Serialize};

use crate::pm::{AspectScore, GapRow, PmComputation};
use crate::ranking::RankedJob;

/// One gap-trace row. Sub-criteria the user left unrated keep their row with
/// null actual/gap/score.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GapRowDto {
    pub criterion_id: i64,
    pub criterion_name: String,
    pub sub_criterion_id: i64,
    pub sub_criterion_name: String,
    pub ideal_value: i32,
    pub actual_value: Option<i32>,
    pub gap: Option<i32>,
    pub score: Option<f64>,
}

impl From<&GapRow> for GapRowDto {
    fn from(row: &GapRow) -> Self {
        Self {
            criterion_id: row.criterion_id,
            criterion_name: row.criterion_name.clone(),
            sub_criterion_id: row.sub_criterion_id,
            sub_criterion_name: row.sub_criterion_name.clone(),
            ideal_value: row.ideal_value,
            actual_value: row.actual_value,
            gap: row.gap,
            score: row.score,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AspectScoreDto {
    pub criterion_id: i64,
    pub criterion_name: String,
    pub score: f64,
}

impl From<&AspectScore> for AspectScoreDto {
    fn from(aspect: &AspectScore) -> Self {
        Self {
            criterion_id: aspect.criterion_id,
            criterion_name: aspect.criterion_name.clone(),
            score: aspect.score,
        }
    }
}

/// Serializable payload of one profile-matching run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PmReport {
    pub gap_rows: Vec<GapRowDto>,
    pub aspect_scores: Vec<AspectScoreDto>,
    pub final_score: f64,
}

impl PmReport {
    pub fn from_computation(computation: &PmComputation) -> Self {
        Self {
            gap_rows: computation.gap_rows.iter().map(GapRowDto::from).collect(),
            aspect_scores: computation
                .aspect_scores
                .iter()
                .map(AspectScoreDto::from)
                .collect(),
            final_score: computation.final_score,
        }
    }
}

/// One recommended job with its score and full computation trace.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedJobDto {
    pub job_id: i64,
    pub name: String,
    pub average_salary: Option<f64>,
    pub description: Option<String>,
    pub score: f64,
    pub report: PmReport,
}

/// Ranked recommendation list, best match first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationReport {
    pub jobs: Vec<RankedJobDto>,
}

impl RecommendationReport {
    pub fn from_ranked(ranked: &[RankedJob]) -> Self {
        Self {
            jobs: ranked
                .iter()
                .map(|entry| RankedJobDto {
                    job_id: entry.job.id,
                    name: entry.job.name.clone(),
                    average_salary: entry.job.average_salary,
                    description: entry.job.description.clone(),
                    score: entry.result.final_score,
                    report: PmReport::from_computation(&entry.result),
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::pm::{evaluate, ActualValues};
    use crate::ranking::{rank_jobs, JobEvaluation};
    use crate::{CriterionWeight, Job, SubCriterionProfile};

    fn fixture() -> (Vec<CriterionWeight>, Vec<SubCriterionProfile>) {
        let weights = vec![CriterionWeight {
            criterion_id: 1,
            name: "Technical Skill".into(),
            weight: 1.0,
        }];
        let profile = vec![
            SubCriterionProfile {
                sub_criterion_id: 10,
                criterion_id: 1,
                criterion_name: "Technical Skill".into(),
                name: "Programming".into(),
                code: "TS1".into(),
                ideal_value: 4,
            },
            SubCriterionProfile {
                sub_criterion_id: 11,
                criterion_id: 1,
                criterion_name: "Technical Skill".into(),
                name: "Databases".into(),
                code: "TS2".into(),
                ideal_value: 3,
            },
        ];
        (weights, profile)
    }

    #[test]
    fn unrated_rows_serialize_as_nulls() {
        let (weights, profile) = fixture();
        let mut values = HashMap::new();
        values.insert(10, 4);

        let computation = evaluate(&weights, &profile, ActualValues::User(&values)).unwrap();
        let report = PmReport::from_computation(&computation);

        let json = serde_json::to_value(&report).unwrap();
        let rows = json["gap_rows"].as_array().unwrap();
        assert_eq!(rows.len(), 2);
        assert!(rows[1]["actual_value"].is_null());
        assert!(rows[1]["gap"].is_null());
        assert!(rows[1]["score"].is_null());
        assert_eq!(rows[0]["score"], 5.0);
    }

    #[test]
    fn recommendation_report_preserves_rank_order() {
        let (weights, profile) = fixture();
        let mut values = HashMap::new();
        values.insert(10, 4);
        values.insert(11, 3);

        let strong = JobEvaluation {
            job: Job {
                id: 1,
                name: "Backend Engineer".into(),
                average_salary: Some(9_500_000.0),
                description: Some("Builds services".into()),
            },
            weights: weights.clone(),
            profile: profile.clone(),
        };

        let mut weak_profile = profile;
        weak_profile[0].ideal_value = 1;
        weak_profile[1].ideal_value = 1;
        let weak = JobEvaluation {
            job: Job {
                id: 2,
                name: "Surveyor".into(),
                average_salary: None,
                description: None,
            },
            weights,
            profile: weak_profile,
        };

        let ranked = rank_jobs(vec![weak, strong], &values);
        let report = RecommendationReport::from_ranked(&ranked);

        assert_eq!(report.jobs.len(), 2);
        assert_eq!(report.jobs[0].job_id, 1);
        assert!(report.jobs[0].score > report.jobs[1].score);
        assert_eq!(report.jobs[0].report.gap_rows.len(), 2);

        let json = serde_json::to_string(&report).unwrap();
        let parsed: RecommendationReport = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.jobs[0].name, "Backend Engineer");
    }
}

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use clap::{ArgGroup, Parser, Subcommand};
use dotenvy::dotenv;
use karir_common::api::{AhpReport, RecommendationReport};
use karir_common::db::{self, PairwiseJudgmentInsert, PgPool};
use karir_common::pm::{self, ActualValues};
use karir_common::ranking::{rank_jobs, JobEvaluation};
use karir_common::{ahp, logging, run_id};
use tracing::{info, warn};

#[derive(Debug, Parser)]
#[command(
    name = "karir-recompute",
    about = "Recompute AHP weights and profile-matching scores"
)]
struct Cli {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL")]
    database_url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Apply schema migrations
    Migrate,
    /// Recompute AHP weights and the baseline profile-matching score
    #[command(group(ArgGroup::new("target").required(true).args(["job_id", "all"])))]
    Recompute {
        /// Job to recompute
        #[arg(long)]
        job_id: Option<i64>,
        /// Recompute every job, skipping jobs that are not ready
        #[arg(long)]
        all: bool,
    },
    /// Rank all jobs against a user assessment and print the report as JSON
    Rank {
        /// Path to a JSON object of sub-criterion id -> rated value
        #[arg(long)]
        input: PathBuf,
    },
    /// List jobs with their stored scores, best first
    List,
    /// Store one pairwise judgment for a job
    SetJudgment {
        #[arg(long)]
        job_id: i64,
        /// The more important criterion of the pair
        #[arg(long)]
        criterion_a: i64,
        #[arg(long)]
        criterion_b: i64,
        /// Saaty-scale importance of a over b
        #[arg(long)]
        value: f64,
    },
    /// Set the ideal value of one job profile entry
    SetIdeal {
        #[arg(long)]
        job_id: i64,
        #[arg(long)]
        sub_criterion_id: i64,
        #[arg(long)]
        value: i32,
    },
}

#[derive(Debug, thiserror::Error)]
enum WorkerError {
    #[error(transparent)]
    Pool(#[from] db::DbPoolError),
    #[error(transparent)]
    Migration(#[from] db::MigrationError),
    #[error(transparent)]
    Criteria(#[from] db::CriteriaStorageError),
    #[error(transparent)]
    Judgments(#[from] db::JudgmentStorageError),
    #[error(transparent)]
    Weights(#[from] db::WeightStorageError),
    #[error(transparent)]
    Profiles(#[from] db::ProfileStorageError),
    #[error(transparent)]
    Results(#[from] db::ResultStorageError),
    #[error(transparent)]
    Jobs(#[from] db::JobStorageError),
    #[error(transparent)]
    Ahp(#[from] ahp::AhpError),
    #[error(transparent)]
    Pm(#[from] pm::PmError),
    #[error("failed to read user input {path}: {source}")]
    ReadInput {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

struct RecomputeOutcome {
    computation: ahp::AhpComputation,
    baseline_score: f64,
}

/// Recompute one job end to end: derive fresh AHP weights from its stored
/// judgments, replace the weight set, then seed the baseline score from the
/// ideal self-assessment. Validation failures surface before any write.
async fn recompute_job(pool: &PgPool, job_id: i64) -> Result<RecomputeOutcome, WorkerError> {
    let criteria = db::fetch_active_criteria(pool, job_id).await?;
    let criterion_ids: Vec<i64> = criteria.iter().map(|criterion| criterion.id).collect();
    let judgments = db::fetch_pairwise_judgments(pool, job_id, &criterion_ids).await?;

    let computation = ahp::compute_weights(&criteria, &judgments)?;
    db::replace_ahp_weights(pool, job_id, &computation).await?;

    if !computation.is_consistent {
        warn!(
            job_id,
            consistency_ratio = computation.consistency_ratio,
            "judgments exceed the consistency threshold; weights stored provisionally"
        );
    }

    let weights = computation.criterion_weights();
    let profile = db::fetch_active_sub_profiles(pool, job_id).await?;
    let baseline = pm::evaluate(&weights, &profile, ActualValues::IdealSelf)?;
    db::upsert_pm_result(pool, job_id, baseline.final_score, None).await?;

    info!(
        job_id,
        lambda_max = computation.lambda_max,
        consistency_ratio = computation.consistency_ratio,
        baseline_score = baseline.final_score,
        "recomputed weights and baseline score"
    );

    Ok(RecomputeOutcome {
        computation,
        baseline_score: baseline.final_score,
    })
}

/// Recompute every job. Jobs that fail an AHP or PM precondition are logged
/// and skipped; storage failures abort the run.
async fn recompute_all(pool: &PgPool) -> Result<(), WorkerError> {
    let jobs = db::fetch_jobs(pool).await?;
    let mut recomputed = 0usize;
    let mut skipped = 0usize;

    for job in jobs {
        match recompute_job(pool, job.id).await {
            Ok(_) => recomputed += 1,
            Err(WorkerError::Ahp(err)) => {
                skipped += 1;
                warn!(job_id = job.id, error = %err, "skipped job");
            }
            Err(WorkerError::Pm(err)) => {
                skipped += 1;
                warn!(job_id = job.id, error = %err, "skipped job");
            }
            Err(other) => return Err(other),
        }
    }

    info!(recomputed, skipped, "recompute pass finished");
    Ok(())
}

fn read_user_values(path: &Path) -> Result<HashMap<i64, i32>, WorkerError> {
    let raw = std::fs::read_to_string(path).map_err(|source| WorkerError::ReadInput {
        path: path.display().to_string(),
        source,
    })?;
    Ok(serde_json::from_str(&raw)?)
}

/// Evaluate every job against one user assessment vector and build the
/// ranked report. Jobs missing weights or an active profile are omitted.
async fn rank(pool: &PgPool, input: &Path) -> Result<RecommendationReport, WorkerError> {
    let user_values = read_user_values(input)?;
    let jobs = db::fetch_jobs(pool).await?;

    let mut candidates = Vec::with_capacity(jobs.len());
    for job in jobs {
        let weights = db::fetch_ahp_weights(pool, job.id).await?;
        let profile = db::fetch_active_sub_profiles(pool, job.id).await?;
        candidates.push(JobEvaluation {
            job,
            weights,
            profile,
        });
    }

    let ranked = rank_jobs(candidates, &user_values);
    info!(ranked = ranked.len(), "ranking finished");

    Ok(RecommendationReport::from_ranked(&ranked))
}

async fn run() -> Result<(), WorkerError> {
    dotenv().ok();
    logging::init_tracing_subscriber("karir-recompute");
    logging::install_tracing_panic_hook("karir-recompute");

    let cli = Cli::parse();
    let pool = db::create_pool_from_url(&cli.database_url)?;

    info!(run_id = run_id::get(), "karir-recompute starting");

    match cli.command {
        Command::Migrate => db::run_migrations(&pool).await?,
        Command::Recompute { job_id, all } => {
            if all {
                recompute_all(&pool).await?;
            } else if let Some(job_id) = job_id {
                let outcome = recompute_job(&pool, job_id).await?;
                let payload = serde_json::json!({
                    "ahp": AhpReport::from_computation(&outcome.computation),
                    "baseline_score": outcome.baseline_score,
                });
                println!("{}", serde_json::to_string_pretty(&payload)?);
            }
        }
        Command::Rank { input } => {
            let report = rank(&pool, &input).await?;
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Command::List => {
            for row in db::fetch_ranked_jobs(&pool).await? {
                let score = row
                    .final_score
                    .map(|score| format!("{score:.4}"))
                    .unwrap_or_else(|| "-".into());
                println!("{}\t{}\t{}", row.job.id, score, row.job.name);
            }
        }
        Command::SetJudgment {
            job_id,
            criterion_a,
            criterion_b,
            value,
        } => {
            let judgment = PairwiseJudgmentInsert {
                criterion_a,
                criterion_b,
                value,
            };
            let stored = db::upsert_judgments(&pool, job_id, &[judgment]).await?;
            info!(job_id, criterion_a, criterion_b, value, stored, "stored judgment");
        }
        Command::SetIdeal {
            job_id,
            sub_criterion_id,
            value,
        } => {
            db::set_ideal_value(&pool, job_id, sub_criterion_id, value).await?;
            info!(job_id, sub_criterion_id, value, "updated ideal value");
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        tracing::error!(error = %err, "karir-recompute failed");
        std::process::exit(1);
    }
}

use chrono::{DateTime, Utc};
use deadpool_postgres::PoolError;
use tokio_postgres::Error as PgError;
use tracing::instrument;

use crate::db::PgPool;
use crate::Job;

#[derive(Debug, thiserror::Error)]
pub enum ResultStorageError {
    #[error("failed to get postgres connection: {0}")]
    Pool(#[from] PoolError),
    #[error("postgres error: {0}")]
    Postgres(#[from] PgError),
}

/// A job joined with its stored final score, if one has been computed.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedJobRow {
    pub job: Job,
    pub final_score: Option<f64>,
    pub computed_at: Option<DateTime<Utc>>,
}

/// Store a job's final profile-matching score. One row per job; the upsert
/// is a single statement, so readers see either the old score or the new
/// one, never an intermediate state.
#[instrument(skip(pool))]
pub async fn upsert_pm_result(
    pool: &PgPool,
    job_id: i64,
    final_score: f64,
    computed_at: Option<DateTime<Utc>>,
) -> Result<u64, ResultStorageError> {
    let client = pool.get().await?;
    let computed_at = computed_at.unwrap_or_else(Utc::now);

    let rows = client
        .execute(
            "INSERT INTO karir.pm_results (job_id, final_score, computed_at)
             VALUES ($1, $2, $3)
             ON CONFLICT (job_id)
             DO UPDATE SET final_score = EXCLUDED.final_score,
                           computed_at = EXCLUDED.computed_at",
            &[&job_id, &final_score, &computed_at],
        )
        .await?;

    Ok(rows)
}

/// Jobs with their stored scores, best first. Jobs never scored sort last.
#[instrument(skip(pool))]
pub async fn fetch_ranked_jobs(pool: &PgPool) -> Result<Vec<RankedJobRow>, ResultStorageError> {
    let client = pool.get().await?;
    let rows = client
        .query(
            "SELECT j.id, j.name, j.average_salary, j.description,
                    r.final_score, r.computed_at
             FROM karir.jobs j
             LEFT JOIN karir.pm_results r ON r.job_id = j.id
             ORDER BY r.final_score DESC NULLS LAST, j.id ASC",
            &[],
        )
        .await?;

    Ok(rows
        .iter()
        .map(|row| RankedJobRow {
            job: Job {
                id: row.get("id"),
                name: row.get("name"),
                average_salary: row.get("average_salary"),
                description: row.get("description"),
            },
            final_score: row.get("final_score"),
            computed_at: row.get("computed_at"),
        })
        .collect())
}

use deadpool_postgres::PoolError;
use tokio_postgres::Error as PgError;
use tracing::instrument;

use crate::db::PgPool;
use crate::ActiveCriterion;

#[derive(Debug, thiserror::Error)]
pub enum CriteriaStorageError {
    #[error("failed to get postgres connection: {0}")]
    Pool(#[from] PoolError),
    #[error("postgres error: {0}")]
    Postgres(#[from] PgError),
}

/// Active criteria for a job, ordered by criterion id so matrix indexing is
/// stable across calls.
#[instrument(skip(pool))]
pub async fn fetch_active_criteria(
    pool: &PgPool,
    job_id: i64,
) -> Result<Vec<ActiveCriterion>, CriteriaStorageError> {
    let client = pool.get().await?;
    let rows = client
        .query(
            "SELECT c.id, c.name
             FROM karir.job_criteria jc
             JOIN karir.criteria c ON c.id = jc.criterion_id
             WHERE jc.job_id = $1 AND jc.active
             ORDER BY c.id ASC",
            &[&job_id],
        )
        .await?;

    Ok(rows
        .iter()
        .map(|row| ActiveCriterion {
            id: row.get("id"),
            name: row.get("name"),
        })
        .collect())
}

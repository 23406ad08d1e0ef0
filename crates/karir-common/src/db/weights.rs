use deadpool_postgres::PoolError;
use tokio_postgres::Error as PgError;
use tracing::instrument;

use crate::ahp::AhpComputation;
use crate::db::PgPool;
use crate::CriterionWeight;

#[derive(Debug, thiserror::Error)]
pub enum WeightStorageError {
    #[error("failed to get postgres connection: {0}")]
    Pool(#[from] PoolError),
    #[error("postgres error: {0}")]
    Postgres(#[from] PgError),
}

/// Stored AHP weights for a job, ordered by criterion id. Empty if AHP has
/// not been run yet.
#[instrument(skip(pool))]
pub async fn fetch_ahp_weights(
    pool: &PgPool,
    job_id: i64,
) -> Result<Vec<CriterionWeight>, WeightStorageError> {
    let client = pool.get().await?;
    let rows = client
        .query(
            "SELECT w.criterion_id, c.name, w.weight
             FROM karir.ahp_weights w
             JOIN karir.criteria c ON c.id = w.criterion_id
             WHERE w.job_id = $1
             ORDER BY w.criterion_id ASC",
            &[&job_id],
        )
        .await?;

    Ok(rows
        .iter()
        .map(|row| CriterionWeight {
            criterion_id: row.get("criterion_id"),
            name: row.get("name"),
            weight: row.get("weight"),
        })
        .collect())
}

/// Replace the stored weight set for a job with a fresh AHP outcome.
///
/// Delete and insert run in one transaction; a concurrent reader sees
/// either the previous complete set or the new complete set, never an
/// empty or mixed one. The DELETE's row locks also serialize concurrent
/// recomputes of the same job.
#[instrument(skip(pool, computation))]
pub async fn replace_ahp_weights(
    pool: &PgPool,
    job_id: i64,
    computation: &AhpComputation,
) -> Result<(), WeightStorageError> {
    let mut client = pool.get().await?;
    let tx = client.transaction().await?;

    tx.execute(
        "DELETE FROM karir.ahp_weights WHERE job_id = $1",
        &[&job_id],
    )
    .await?;

    let stmt = tx
        .prepare_cached(
            "INSERT INTO karir.ahp_weights (
                job_id,
                criterion_id,
                weight,
                lambda_max,
                consistency_index,
                consistency_ratio,
                is_consistent
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)",
        )
        .await?;

    for (criterion, weight) in computation.criteria.iter().zip(&computation.priority_vector) {
        tx.execute(
            &stmt,
            &[
                &job_id,
                &criterion.id,
                weight,
                &computation.lambda_max,
                &computation.consistency_index,
                &computation.consistency_ratio,
                &computation.is_consistent,
            ],
        )
        .await?;
    }

    tx.commit().await?;
    Ok(())
}

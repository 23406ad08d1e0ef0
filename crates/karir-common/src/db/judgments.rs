use deadpool_postgres::PoolError;
use tokio_postgres::Error as PgError;
use tracing::instrument;

use crate::ahp::JudgmentMap;
use crate::db::PgPool;

#[derive(Debug, thiserror::Error)]
pub enum JudgmentStorageError {
    #[error("failed to get postgres connection: {0}")]
    Pool(#[from] PoolError),
    #[error("postgres error: {0}")]
    Postgres(#[from] PgError),
}

/// One pairwise judgment to store: criterion a is `value` times as important
/// as criterion b on the Saaty scale.
#[derive(Debug, Clone, PartialEq)]
pub struct PairwiseJudgmentInsert {
    pub criterion_a: i64,
    pub criterion_b: i64,
    pub value: f64,
}

/// The stored judgment half for a job, restricted to the given criteria.
/// The map is partial by design: reciprocals and the diagonal are derived
/// by the matrix builder.
#[instrument(skip(pool, criterion_ids))]
pub async fn fetch_pairwise_judgments(
    pool: &PgPool,
    job_id: i64,
    criterion_ids: &[i64],
) -> Result<JudgmentMap, JudgmentStorageError> {
    let client = pool.get().await?;
    let rows = client
        .query(
            "SELECT criterion_a, criterion_b, value
             FROM karir.ahp_judgments
             WHERE job_id = $1
               AND criterion_a = ANY($2)
               AND criterion_b = ANY($2)",
            &[&job_id, &criterion_ids],
        )
        .await?;

    let mut judgments = JudgmentMap::with_capacity(rows.len());
    for row in &rows {
        judgments.insert(
            (row.get("criterion_a"), row.get("criterion_b")),
            row.get("value"),
        );
    }

    Ok(judgments)
}

/// Store or refresh a batch of judgments in one transaction.
#[instrument(skip(pool, judgments), fields(count = judgments.len()))]
pub async fn upsert_judgments(
    pool: &PgPool,
    job_id: i64,
    judgments: &[PairwiseJudgmentInsert],
) -> Result<u64, JudgmentStorageError> {
    let mut client = pool.get().await?;
    let tx = client.transaction().await?;

    let stmt = tx
        .prepare_cached(
            "INSERT INTO karir.ahp_judgments (job_id, criterion_a, criterion_b, value)
             VALUES ($1, $2, $3, $4)
             ON CONFLICT (job_id, criterion_a, criterion_b)
             DO UPDATE SET value = EXCLUDED.value",
        )
        .await?;

    let mut stored = 0;
    for judgment in judgments {
        stored += tx
            .execute(
                &stmt,
                &[
                    &job_id,
                    &judgment.criterion_a,
                    &judgment.criterion_b,
                    &judgment.value,
                ],
            )
            .await?;
    }

    tx.commit().await?;
    Ok(stored)
}

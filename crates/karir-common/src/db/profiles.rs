use deadpool_postgres::PoolError;
use tokio_postgres::Error as PgError;
use tracing::instrument;

use crate::db::PgPool;
use crate::SubCriterionProfile;

#[derive(Debug, thiserror::Error)]
pub enum ProfileStorageError {
    #[error("failed to get postgres connection: {0}")]
    Pool(#[from] PoolError),
    #[error("postgres error: {0}")]
    Postgres(#[from] PgError),
    #[error("no profile entry for job {job_id} and sub-criterion {sub_criterion_id}")]
    NotFound { job_id: i64, sub_criterion_id: i64 },
}

/// Active sub-criterion profile entries for a job with their ideal values,
/// ordered by owning criterion then sub-criterion id.
#[instrument(skip(pool))]
pub async fn fetch_active_sub_profiles(
    pool: &PgPool,
    job_id: i64,
) -> Result<Vec<SubCriterionProfile>, ProfileStorageError> {
    let client = pool.get().await?;
    let rows = client
        .query(
            "SELECT jsc.sub_criterion_id,
                    sc.criterion_id,
                    c.name AS criterion_name,
                    sc.name,
                    sc.code,
                    jsc.ideal_value
             FROM karir.job_sub_criteria jsc
             JOIN karir.sub_criteria sc ON sc.id = jsc.sub_criterion_id
             JOIN karir.criteria c ON c.id = sc.criterion_id
             WHERE jsc.job_id = $1 AND jsc.active
             ORDER BY sc.criterion_id ASC, sc.id ASC",
            &[&job_id],
        )
        .await?;

    Ok(rows
        .iter()
        .map(|row| SubCriterionProfile {
            sub_criterion_id: row.get("sub_criterion_id"),
            criterion_id: row.get("criterion_id"),
            criterion_name: row.get("criterion_name"),
            name: row.get("name"),
            code: row.get("code"),
            ideal_value: row.get("ideal_value"),
        })
        .collect())
}

/// Update the ideal value of one profile entry.
#[instrument(skip(pool))]
pub async fn set_ideal_value(
    pool: &PgPool,
    job_id: i64,
    sub_criterion_id: i64,
    ideal_value: i32,
) -> Result<(), ProfileStorageError> {
    let client = pool.get().await?;
    let updated = client
        .execute(
            "UPDATE karir.job_sub_criteria
             SET ideal_value = $3, updated_at = NOW()
             WHERE job_id = $1 AND sub_criterion_id = $2",
            &[&job_id, &sub_criterion_id, &ideal_value],
        )
        .await?;

    if updated == 0 {
        return Err(ProfileStorageError::NotFound {
            job_id,
            sub_criterion_id,
        });
    }

    Ok(())
}

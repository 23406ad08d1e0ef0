use deadpool_postgres::PoolError;
use tokio_postgres::Error as PgError;
use tracing::instrument;

use crate::db::PgPool;
use crate::Job;

#[derive(Debug, thiserror::Error)]
pub enum JobStorageError {
    #[error("failed to get postgres connection: {0}")]
    Pool(#[from] PoolError),
    #[error("postgres error: {0}")]
    Postgres(#[from] PgError),
}

/// All jobs, in id order.
#[instrument(skip(pool))]
pub async fn fetch_jobs(pool: &PgPool) -> Result<Vec<Job>, JobStorageError> {
    let client = pool.get().await?;
    let rows = client
        .query(
            "SELECT id, name, average_salary, description
             FROM karir.jobs
             ORDER BY id ASC",
            &[],
        )
        .await?;

    Ok(rows
        .iter()
        .map(|row| Job {
            id: row.get("id"),
            name: row.get("name"),
            average_salary: row.get("average_salary"),
            description: row.get("description"),
        })
        .collect())
}

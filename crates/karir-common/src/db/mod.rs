pub mod criteria;
pub mod jobs;
pub mod judgments;
pub mod migrations;
pub mod pool;
pub mod profiles;
pub mod results;
pub mod weights;

// Keep re-exports unique so downstream crates see a single symbol per helper.
pub use criteria::{fetch_active_criteria, CriteriaStorageError};
pub use jobs::{fetch_jobs, JobStorageError};
pub use judgments::{
    fetch_pairwise_judgments, upsert_judgments, JudgmentStorageError, PairwiseJudgmentInsert,
};
pub use migrations::{run_migrations, MigrationError};
pub use pool::{create_pool_from_url, DbPoolError, PgPool};
pub use profiles::{fetch_active_sub_profiles, set_ideal_value, ProfileStorageError};
pub use results::{fetch_ranked_jobs, upsert_pm_result, RankedJobRow, ResultStorageError};
pub use weights::{fetch_ahp_weights, replace_ahp_weights, WeightStorageError};

pub mod ahp;
pub mod api;
pub mod db;
pub mod logging;
pub mod pm;
pub mod ranking;
pub mod run_id;
pub mod schema;

// Commonly used data models shared by the engines and the storage layer.

/// A job posting that can be scored against a user profile.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Job {
    pub id: i64,
    pub name: String,
    pub average_salary: Option<f64>,
    pub description: Option<String>,
}

/// An evaluation criterion toggled active for a specific job.
///
/// The id doubles as the matrix index key: criteria are always handled in
/// ascending-id order so the same judgment set reconstructs the same matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct ActiveCriterion {
    pub id: i64,
    pub name: String,
}

/// One active sub-criterion of a job's target profile, with the ideal value
/// the job expects for it. The ideal value belongs to the (job, sub-criterion)
/// pair, not to the global sub-criterion definition.
#[derive(Debug, Clone, PartialEq)]
pub struct SubCriterionProfile {
    pub sub_criterion_id: i64,
    pub criterion_id: i64,
    pub criterion_name: String,
    pub name: String,
    pub code: String,
    pub ideal_value: i32,
}

/// A stored AHP weight for one criterion of one job.
#[derive(Debug, Clone, PartialEq)]
pub struct CriterionWeight {
    pub criterion_id: i64,
    pub name: String,
    pub weight: f64,
}

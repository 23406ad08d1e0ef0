pub mod ahp_report;
pub mod pm_report;

pub use ahp_report::{AhpReport, CriterionRef, WeightEntry};
pub use pm_report::{
    AspectScoreDto, GapRowDto, PmReport, RankedJobDto, RecommendationReport,
};

pub mod metric_submission;
pub mod score_computation;

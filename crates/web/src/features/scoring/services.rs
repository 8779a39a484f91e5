use storage::{
    dto::metrics::{CalculateRequest, ScoreBreakdown},
    services::score_computation,
};

/// Live preview of a submission's score; nothing is stored
pub fn calculate(request: &CalculateRequest) -> ScoreBreakdown {
    score_computation::compute_score(request)
}

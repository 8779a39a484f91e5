use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use crate::dto::metrics::{CalculateRequest, ScoreBreakdown};

/// Scaling constant of the violation penalty term.
pub const KAPPA: f64 = 0.28572;

/// Compute the weekly performance score.
///
/// Formula: score = G × T × M × Π² / ((1 + σ²) × 1000), where
/// G = Σ score·weight, M = 1 + k1 + ke, Π² = (B·W)² and σ² = (N·D·κ)².
///
/// Pure: the same request always yields the same breakdown.
pub fn compute_score(request: &CalculateRequest) -> ScoreBreakdown {
    let g: f64 = request
        .domains
        .iter()
        .map(|domain| domain.score * domain.weight)
        .sum();
    let m = 1.0 + request.k1_bonus + request.ke_bonus;
    let pi2 = (request.b_days as f64 * request.w_weight).powi(2);
    let sigma2 = (request.n_violations as f64 * request.d_severity * KAPPA).powi(2);

    let numerator = g * request.t_minutes as f64 * m * pi2;
    let denominator = (1.0 + sigma2) * 1000.0;

    // Unreachable with a positive KAPPA, kept so a constant change cannot divide by zero.
    let final_score = if denominator != 0.0 {
        round_dp(numerator / denominator, 4)
    } else {
        0.0
    };

    ScoreBreakdown {
        g: round_dp(g, 4),
        m: round_dp(m, 4),
        pi2: round_dp(pi2, 4),
        sigma2: round_dp(sigma2, 8),
        numerator: round_dp(numerator, 4),
        denominator: round_dp(denominator, 4),
        final_score,
    }
}

/// Round to `dp` decimal places, half to even, on the exact binary value.
///
/// Values outside the `Decimal` range (or non-finite) are returned unchanged.
pub fn round_dp(value: f64, dp: u32) -> f64 {
    Decimal::from_f64_retain(value)
        .map(|decimal| decimal.round_dp(dp))
        .and_then(|decimal| decimal.to_f64())
        .unwrap_or(value)
}

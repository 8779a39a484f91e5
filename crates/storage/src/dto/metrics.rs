use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::models::{DomainScore, WeeklyMetricWithDomains};

/// One weighted domain entry of a submission
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DomainInput {
    pub name: String,
    pub weight: f64,
    pub score: f64,
}

/// Raw weekly inputs, shared by live calculation and save
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CalculateRequest {
    #[serde(rename = "T_minutes")]
    pub t_minutes: i64,
    #[serde(rename = "B_days")]
    pub b_days: i64,
    #[serde(rename = "W_weight")]
    pub w_weight: f64,
    pub k1_bonus: f64,
    pub ke_bonus: f64,
    #[serde(rename = "N_violations")]
    pub n_violations: i64,
    #[serde(rename = "D_severity")]
    pub d_severity: f64,
    pub domains: Vec<DomainInput>,
}

/// Score and the intermediate terms it was built from
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ScoreBreakdown {
    #[serde(rename = "G")]
    pub g: f64,
    #[serde(rename = "M")]
    pub m: f64,
    #[serde(rename = "Pi2")]
    pub pi2: f64,
    pub sigma2: f64,
    pub numerator: f64,
    pub denominator: f64,
    pub final_score: f64,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SaveMetricsParams {
    /// Target user; defaults to the demo user
    pub user_id: Option<i64>,
}

impl SaveMetricsParams {
    pub fn user_id_or_default(&self) -> i64 {
        self.user_id.unwrap_or(crate::DEFAULT_USER_ID)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SaveMetricsResponse {
    pub status: String,
    pub metric_id: i64,
    pub computed_score: f64,
    pub breakdown: ScoreBreakdown,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DomainScoreInfo {
    pub name: String,
    pub weight: f64,
    pub score: f64,
}

/// One entry of a user's score history
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MetricHistoryEntry {
    pub id: i64,
    pub week_date: NaiveDateTime,
    pub computed_score: f64,
    #[serde(rename = "T_minutes")]
    pub t_minutes: i64,
    #[serde(rename = "B_days")]
    pub b_days: i64,
    #[serde(rename = "W_weight")]
    pub w_weight: f64,
    pub k1_bonus: f64,
    pub ke_bonus: f64,
    #[serde(rename = "N_violations")]
    pub n_violations: i64,
    #[serde(rename = "D_severity")]
    pub d_severity: f64,
    pub domains: Vec<DomainScoreInfo>,
}

/// Flattened row of the all-entries audit view
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MetricAuditEntry {
    pub id: i64,
    pub user_name: String,
    pub week_date: NaiveDateTime,
    pub computed_score: f64,
    #[serde(rename = "T_minutes")]
    pub t_minutes: i64,
    #[serde(rename = "N_violations")]
    pub n_violations: i64,
}

impl From<DomainScore> for DomainScoreInfo {
    fn from(domain: DomainScore) -> Self {
        Self {
            name: domain.domain_name,
            weight: domain.weight,
            score: domain.score,
        }
    }
}

impl From<WeeklyMetricWithDomains> for MetricHistoryEntry {
    fn from(record: WeeklyMetricWithDomains) -> Self {
        let WeeklyMetricWithDomains { metric, domains } = record;
        Self {
            id: metric.id,
            week_date: metric.week_date,
            computed_score: metric.computed_score,
            t_minutes: metric.t_minutes,
            b_days: metric.b_days,
            w_weight: metric.w_weight,
            k1_bonus: metric.k1_bonus,
            ke_bonus: metric.ke_bonus,
            n_violations: metric.n_violations,
            d_severity: metric.d_severity,
            domains: domains.into_iter().map(DomainScoreInfo::from).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calculate_request_uses_formula_field_names() {
        let req: CalculateRequest = serde_json::from_str(
            r#"{
                "T_minutes": 120, "B_days": 5, "W_weight": 1.0,
                "k1_bonus": 0.1, "ke_bonus": 0.05,
                "N_violations": 2, "D_severity": 1.5,
                "domains": [{"name": "Quality", "weight": 1.0, "score": 8.0}]
            }"#,
        )
        .unwrap();

        assert_eq!(req.t_minutes, 120);
        assert_eq!(req.n_violations, 2);
        assert_eq!(req.domains[0].name, "Quality");
    }

    #[test]
    fn test_calculate_request_requires_every_field() {
        let result = serde_json::from_str::<CalculateRequest>(r#"{"T_minutes": 120}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_breakdown_serializes_with_formula_names() {
        let breakdown = ScoreBreakdown {
            g: 11.0,
            m: 1.15,
            pi2: 25.0,
            sigma2: 0.73472327,
            numerator: 37950.0,
            denominator: 1734.7233,
            final_score: 21.8767,
        };
        let value = serde_json::to_value(breakdown).unwrap();

        assert_eq!(value["G"], 11.0);
        assert_eq!(value["M"], 1.15);
        assert_eq!(value["Pi2"], 25.0);
        assert_eq!(value["sigma2"], 0.73472327);
        assert_eq!(value["final_score"], 21.8767);
    }

    #[test]
    fn test_save_params_default_to_demo_user() {
        let params = SaveMetricsParams { user_id: None };
        assert_eq!(params.user_id_or_default(), crate::DEFAULT_USER_ID);

        let params = SaveMetricsParams { user_id: Some(7) };
        assert_eq!(params.user_id_or_default(), 7);
    }
}

use std::collections::HashMap;

use chrono::NaiveDateTime;
use sqlx::{FromRow, SqlitePool};

use crate::dto::metrics::{CalculateRequest, MetricAuditEntry};
use crate::error::Result;
use crate::models::{DomainScore, WeeklyMetric, WeeklyMetricWithDomains};
use crate::services::score_computation::round_dp;

#[derive(FromRow)]
struct AuditRow {
    id: i64,
    user_name: String,
    week_date: NaiveDateTime,
    computed_score: f64,
    t_minutes: i64,
    n_violations: i64,
}

pub struct MetricsRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> MetricsRepository<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a weekly metric and the domain scores it owns.
    ///
    /// Both are written in one transaction, parent first.
    pub async fn create_with_domains(
        &self,
        user_id: i64,
        week_date: NaiveDateTime,
        request: &CalculateRequest,
        computed_score: f64,
    ) -> Result<i64> {
        let mut tx = self.pool.begin().await?;

        let metric_id = sqlx::query(
            r#"
            INSERT INTO weekly_metrics (
                user_id, week_date, t_minutes, b_days, w_weight,
                k1_bonus, ke_bonus, n_violations, d_severity, computed_score
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(user_id)
        .bind(week_date)
        .bind(request.t_minutes)
        .bind(request.b_days)
        .bind(request.w_weight)
        .bind(request.k1_bonus)
        .bind(request.ke_bonus)
        .bind(request.n_violations)
        .bind(request.d_severity)
        .bind(computed_score)
        .execute(&mut *tx)
        .await?
        .last_insert_rowid();

        for domain in &request.domains {
            sqlx::query(
                r#"
                INSERT INTO domain_scores (weekly_metric_id, domain_name, weight, score)
                VALUES (?, ?, ?, ?)
                "#,
            )
            .bind(metric_id)
            .bind(&domain.name)
            .bind(domain.weight)
            .bind(domain.score)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(metric_id)
    }

    /// All metrics of a user, oldest first, each with its domain scores.
    ///
    /// An unknown user simply has no history.
    pub async fn history_for_user(&self, user_id: i64) -> Result<Vec<WeeklyMetricWithDomains>> {
        let metrics = sqlx::query_as::<_, WeeklyMetric>(
            r#"
            SELECT id, user_id, week_date, t_minutes, b_days, w_weight,
                   k1_bonus, ke_bonus, n_violations, d_severity, computed_score
            FROM weekly_metrics
            WHERE user_id = ?
            ORDER BY week_date ASC, id ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        if metrics.is_empty() {
            return Ok(Vec::new());
        }

        let domains = sqlx::query_as::<_, DomainScore>(
            r#"
            SELECT ds.id, ds.weekly_metric_id, ds.domain_name, ds.weight, ds.score
            FROM domain_scores ds
            INNER JOIN weekly_metrics wm ON ds.weekly_metric_id = wm.id
            WHERE wm.user_id = ?
            ORDER BY ds.weekly_metric_id, ds.id
            "#,
        )
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        let mut by_metric: HashMap<i64, Vec<DomainScore>> = HashMap::new();
        for domain in domains {
            by_metric
                .entry(domain.weekly_metric_id)
                .or_default()
                .push(domain);
        }

        Ok(metrics
            .into_iter()
            .map(|metric| WeeklyMetricWithDomains {
                domains: by_metric.remove(&metric.id).unwrap_or_default(),
                metric,
            })
            .collect())
    }

    /// Every metric across users, newest first, with the owner's name.
    pub async fn list_all(&self) -> Result<Vec<MetricAuditEntry>> {
        let rows = sqlx::query_as::<_, AuditRow>(
            r#"
            SELECT wm.id,
                   COALESCE(u.name, 'Unknown') AS user_name,
                   wm.week_date,
                   wm.computed_score,
                   wm.t_minutes,
                   wm.n_violations
            FROM weekly_metrics wm
            LEFT JOIN users u ON wm.user_id = u.id
            ORDER BY wm.week_date DESC, wm.id DESC
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        let entries = rows
            .into_iter()
            .map(|row| MetricAuditEntry {
                id: row.id,
                user_name: row.user_name,
                week_date: row.week_date,
                computed_score: round_dp(row.computed_score, 2),
                t_minutes: row.t_minutes,
                n_violations: row.n_violations,
            })
            .collect();

        Ok(entries)
    }
}

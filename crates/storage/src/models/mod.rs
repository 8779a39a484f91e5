pub mod domain_score;
pub mod user;
pub mod weekly_metric;

pub use domain_score::DomainScore;
pub use user::User;
pub use weekly_metric::{WeeklyMetric, WeeklyMetricWithDomains};

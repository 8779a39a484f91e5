pub mod leaderboard;
pub mod metrics;
pub mod user;

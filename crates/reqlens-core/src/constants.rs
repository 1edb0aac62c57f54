//! Shared constants for reqlens.

/// reqlens version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default score for each estimated value dimension and the estimated effort.
pub const DEFAULT_ESTIMATE: i64 = 5;

/// Effort used in place of a non-positive estimate when a requirement is created.
pub const MIN_CREATE_EFFORT: i64 = 1;

/// Inclusive bounds for every estimated and actual value score and effort.
pub const VALUE_SCORE_RANGE: (i64, i64) = (-10_000, 10_000);

/// Default stakeholder influence and interest (scale 1-5).
pub const DEFAULT_STAKEHOLDER_SCORE: i64 = 3;

/// Inclusive bounds for stakeholder influence and interest.
pub const STAKEHOLDER_SCORE_RANGE: (i64, i64) = (1, 5);

/// Inclusive bounds for `user_satisfaction`.
pub const SATISFACTION_RANGE: (i64, i64) = (1, 10);

/// Number of completed assessments above which the estimation trend is "improving".
pub const IMPROVING_TREND_THRESHOLD: usize = 3;

/// Bucket for missing values in aggregate statistics.
pub const UNKNOWN: &str = "unknown";

//! Known vocabularies for free-text status-like columns.
//!
//! Values outside these sets are stored and returned unchanged; the names
//! here only drive groupings and defaults.

pub const COLLECTED: &str = "collected";
pub const ANALYZING: &str = "analyzing";
pub const CONFIRMED: &str = "confirmed";
pub const REJECTED: &str = "rejected";
pub const IN_PROGRESS: &str = "in_progress";
pub const COMPLETED: &str = "completed";

pub const PLANNED: &str = "planned";

pub const HIGH: &str = "high";
pub const MEDIUM: &str = "medium";
pub const LOW: &str = "low";

/// KANO model categories.
pub mod kano {
    pub const MUST_BE: &str = "must_be";
    pub const ONE_DIMENSIONAL: &str = "one_dimensional";
    pub const ATTRACTIVE: &str = "attractive";
    pub const INDIFFERENT: &str = "indifferent";
    pub const REVERSE: &str = "reverse";
}

pub const DEFAULT_REQUIREMENT_STATUS: &str = COLLECTED;
pub const DEFAULT_MILESTONE_STATUS: &str = PLANNED;
pub const DEFAULT_PRIORITY: &str = MEDIUM;
pub const DEFAULT_CATEGORY: &str = "functional";

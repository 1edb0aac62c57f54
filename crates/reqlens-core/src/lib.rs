//! # reqlens-core
//!
//! Foundation crate for the reqlens requirements service.
//! Defines the domain model and its pure business rules (ROI valuation, the
//! nine-element description template, id lists and dashboard lenses) along
//! with errors, config, tracing setup and domain events.
//! Storage and the HTTP server both depend on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod events;
pub mod idlist;
pub mod lenses;
pub mod model;
pub mod template;
pub mod tracing;
pub mod valuation;

// Re-export the most commonly used types at the crate root.
pub use config::ReqlensConfig;
pub use errors::{ConfigError, ReqErrorCode, ServiceError, StorageError, ValidationError};
pub use events::{EventDispatcher, ReqEventHandler, TracingEventHandler};
pub use model::{Milestone, Project, Requirement, Stakeholder};

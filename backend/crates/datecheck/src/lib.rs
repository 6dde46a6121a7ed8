//! Date Cross-Field Validation Module
//!
//! Clean Architecture structure:
//! - `domain/` - Patterns, field values, constraints, the `DateTarget` capability
//! - `application/` - The validator and its configuration
//! - `presentation/` - Validating extractor and the schedule endpoint
//!
//! ## Checking Model
//! - Rules are registered once per type and evaluated in declaration order
//! - The first failing rule decides the outcome; later rules are not run
//! - Values are compared at the precision of their field's pattern
//! - Misconfiguration (unknown fields, bad patterns, unreadable values) is an
//!   error, never a pass or a fail

pub mod application;
pub mod domain;
pub mod error;
pub mod presentation;

// Re-exports for convenience
pub use application::config::DateCheckConfig;
pub use application::validator::{DateTimeValidator, compare};
pub use domain::constraint::{CheckKind, ConstraintMessages, DateRules, FieldConstraint};
pub use domain::outcome::ValidationOutcome;
pub use domain::pattern::DatePattern;
pub use domain::target::DateTarget;
pub use domain::value::FieldValue;
pub use error::{DateCheckError, DateCheckResult};
pub use presentation::router::schedule_router;

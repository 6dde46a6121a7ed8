//! Application Layer
//!
//! Validator service and its configuration.

pub mod config;
pub mod validator;

pub use config::DateCheckConfig;
pub use validator::{DateTimeValidator, compare};

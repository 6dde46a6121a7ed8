//! Shared Kernel - Cross-cutting web plumbing
//!
//! This crate contains the pieces every handler in the backend agrees on:
//! - The response envelope and its canonical result codes
//! - The failure taxonomy ([`error::app_error::AppError`]) and result aliases
//! - The exception mapper that turns failures into envelopes
//! - Field labels and the violation collector used by request validation
//! - A clock abstraction so time-dependent checks can be tested
//!
//! **Design Principle**: Only include things that are "hard to change"
//! and have consistent meaning across all domains.

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
    pub mod mapper;
}
pub mod response {
    pub mod code;
    pub mod envelope;
}
pub mod clock;
pub mod schema;
pub mod validate;

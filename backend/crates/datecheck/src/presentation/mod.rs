//! Presentation Layer
//!
//! HTTP handlers, DTOs and the validating extractor.

pub mod dto;
pub mod extract;
pub mod handlers;
pub mod router;

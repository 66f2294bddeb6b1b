//! Flat, backend-shaped resource DTOs
//!
//! These records mirror the backend JSON field for field: Option-heavy,
//! defaulted, and carrying no behavior.

pub mod auth;
pub mod circle;
pub mod dashboard;
pub mod deleted;
pub mod invoice;
pub mod report;
pub mod subscription;
pub mod user;

//! maqraa-api: Shared wire contracts for the maqraa backend
//!
//! Contains the response envelope, paged-result types and normalization,
//! the list filter descriptor, and the flat resource DTOs used across the
//! client, CLI, and TUI.

pub mod dto;
pub mod envelope;
pub mod page;
pub mod request;

pub use envelope::{ApiError, ApiFailure, ApiResponse};
pub use page::{PagedResult, RawPage, normalize_page, normalize_response};
pub use request::{ListRequest, ParamCasing, SortDirection};

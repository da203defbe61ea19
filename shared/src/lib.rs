//! # Shared Data Transfer Objects Library
//!
//! This library defines the wire contract between the dashboard access layer and the
//! partner network REST API. All DTOs use JSON serialization via `serde`.
//!
//! ## Structure
//!
//! - **[`dto`]**: Data Transfer Objects for API communication
//!   - **[`dto::envelope`]**: `ApiResponse<T>` and error bodies
//!   - **[`dto::pagination`]**: `PageRequest` and `PaginatedResponse<T>`
//!   - one module per resource (partners, agents, bookings, buses, users, roles, settings)
//! - **[`utils`]**: Shared utility functions
//!   - **[`utils::mask_secret`]**: Redact credentials for logs and status output
//!
//! ## Wire Format
//!
//! The remote API speaks camelCase JSON:
//! - Rust fields are snake_case and renamed with `#[serde(rename_all = "camelCase")]`
//! - Optional fields are omitted from JSON when `None`
//! - Fields this crate does not model are preserved in a flattened `extra` map, so the
//!   access layer stays a pass-through for shapes it does not own
//!
//! ## Usage
//!
//! ```rust
//! use shared::dto::envelope::ApiResponse;
//! use shared::dto::pagination::PaginatedResponse;
//! use shared::dto::agent::SuperAgent;
//!
//! let body = r#"{"status":true,"data":{"items":[],"page":0,"size":10,"totalItems":0,"totalPages":0}}"#;
//! let envelope: ApiResponse<PaginatedResponse<SuperAgent>> = serde_json::from_str(body).unwrap();
//! let page = envelope.into_result().unwrap();
//! assert!(page.items.is_empty());
//! ```

pub mod dto;
pub mod utils;

// Note: Wildcard re-exports are used here since shared is a DTO library
// where all exports are meant to be public API
pub use dto::*;
pub use utils::*;

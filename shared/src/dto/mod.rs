//! # Data Transfer Objects (DTOs)
//!
//! Data structures exchanged with the partner network REST API.
//!
//! ## Module Organization
//!
//! - [`envelope`] - `ApiResponse<T>` envelope and error bodies
//! - [`pagination`] - page requests and paginated result pages
//! - [`common`] - entity status and the pass-through field map
//! - [`partner`], [`agent`], [`booking`], [`bus`], [`user`], [`role`], [`settings`] - resources
//!
//! ## Example JSON Communication
//!
//! ```text
//! GET /super-agents?page=0&size=10
//! X-API-KEY: ...
//! X-API-SECRET: ...
//! ```
//!
//! ```text
//! HTTP/1.1 200 OK
//! Content-Type: application/json
//!
//! {
//!   "status": true,
//!   "data": {
//!     "items": [{ "uid": "SA-001", "businessName": "Northline Travel", "status": "ACTIVE" }],
//!     "page": 0,
//!     "size": 10,
//!     "totalItems": 1,
//!     "totalPages": 1
//!   }
//! }
//! ```

pub mod agent;
pub mod booking;
pub mod bus;
pub mod common;
pub mod envelope;
pub mod pagination;
pub mod partner;
pub mod role;
pub mod settings;
pub mod user;

pub use agent::*;
pub use booking::*;
pub use bus::*;
pub use common::*;
pub use envelope::*;
pub use pagination::*;
pub use partner::*;
pub use role::*;
pub use settings::*;
pub use user::*;

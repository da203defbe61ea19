//! # Core Abstractions
//!
//! Core traits and error types shared by the request wrapper, the service modules
//! and the remote collections.
//!
//! ## Modules
//!
//! - **[`error`]**: Error taxonomy (`AppError`, `ErrorKind`, `Result<T>`)
//! - **[`service`]**: The `RemoteResource` seam used by remote collections
//!
//! ## Dependency Injection
//!
//! Remote collections depend on the `RemoteResource` trait rather than on the HTTP
//! client, so tests drive them with scripted resources:
//!
//! ```rust,ignore
//! use dashboard::state::RemoteCollection;
//!
//! // In production: an adapter over the typed service module
//! let agents = RemoteCollection::new(SuperAgentResource::new(client), settings);
//!
//! // In tests: a fake that resolves pages when told to
//! let agents = RemoteCollection::new(ScriptedResource::default(), settings);
//! ```

pub mod error;
pub mod service;

pub use error::{AppError, ErrorKind, Result};
pub use service::{not_found_as_none, RemoteResource, SearchQuery};

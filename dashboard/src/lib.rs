//! # Partner Network Dashboard - Library Root
//!
//! The typed API-access layer behind the partner-network admin dashboard
//! (partners, agents, super-agents, group-agents, bookings, buses, users, roles,
//! settings). Pages render from the state this crate maintains; the REST API itself
//! lives elsewhere.
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────┐
//! │  page action (mount, pagination click, form submit)    │
//! └────────────────────────────────────────────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐   state::RemoteCollection<R>
//! │ Client state    │   sequencing, cancellation, debounce, error state
//! └─────────────────┘
//!          │ RemoteResource
//!          ▼
//! ┌─────────────────┐   services::api::{partners, super_agents, ...}
//! │ Service modules │   one wrapper call per operation
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐   services::api::ApiClient
//! │ Request wrapper │   credentials, query params, timeout, envelope decoding
//! └─────────────────┘
//!          │ HTTP (X-API-KEY / X-API-SECRET)
//!          ▼
//! ┌─────────────────┐
//! │  Partner API    │
//! └─────────────────┘
//! ```
//!
//! ## Module Structure
//!
//! - **app**: [`app::Dashboard`], the composition root, and the credential setup flow
//! - **config**: Environment-driven [`config::Config`]
//! - **core**: Error taxonomy and the `RemoteResource` seam
//! - **debug**: Logging setup
//! - **services**: Credential store, preferences, local storage, and the API client
//!   with one module per resource
//! - **state**: The generic remote collection and its debounce timer
//!
//! ## Example
//!
//! ```rust,no_run
//! use dashboard::app::Dashboard;
//! use dashboard::config::Config;
//!
//! # async fn run() -> dashboard::core::Result<()> {
//! let dashboard = Dashboard::with_file_store(Config::from_env()?)?;
//! dashboard.setup_credentials("pk_live_...", "sk_live_...").await?;
//!
//! let super_agents = &dashboard.collections().super_agents;
//! super_agents.load(0).await?;
//! for agent in super_agents.snapshot().items {
//!     println!("{} {}", agent.uid, agent.business_name);
//! }
//! # Ok(())
//! # }
//! ```

pub mod app;
pub mod config;
pub mod core;
pub mod debug;
pub mod services;
pub mod state;

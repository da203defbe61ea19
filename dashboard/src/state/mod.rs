//! # Client State
//!
//! Remote collections: one generic container, instantiated per resource by the
//! composition root.

pub mod collection;
pub mod debounce;

pub use collection::{CollectionSettings, CollectionState, Outcome, Phase, RemoteCollection, StateOf};
pub use debounce::Debouncer;

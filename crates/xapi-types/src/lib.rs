//! Shared types, collaborator traits, and core utilities for the xAPI tracking admin.
//!
//! The host environment is modelled as a set of traits defined here: the
//! settings store, the identity facade, and the capability probes. Adapter
//! crates and the admin crate both depend on this crate only.

#![forbid(unsafe_code)]

pub mod error;
pub mod identity;
pub mod prelude;
pub mod probe;
pub mod settings_store;
pub mod types;

// vim: ts=4

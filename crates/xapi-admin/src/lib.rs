//! Site and network configuration for xAPI learning-analytics tracking.
//!
//! # Architecture
//!
//! - **Network policy** (`network.rs`): network-wide LRS defaults and constraints
//! - **Site settings** (`site.rs`): per-site tracking options and guest policy correction
//! - **Sanitizer** (`sanitize.rs`): validates a submitted site form against the policy
//! - **Gate** (`gate.rs`): who may see and change which fields
//! - **LRS** (`lrs.rs`): which endpoint a site actually reports to
//! - **Service** (`service.rs`): request-scoped orchestration over a settings store
//!
//! # Two scopes
//!
//! The network policy is shared by all sites and only super-admins change it.
//! Site settings are private to one site and are always checked against the
//! policy before they are written.

#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![forbid(unsafe_code)]

pub mod gate;
pub mod lrs;
pub mod network;
pub mod opts;
pub mod prelude;
pub mod sanitize;
pub mod service;
pub mod site;

use std::collections::HashMap;

/// Raw submitted form fields, as the host decoded them
pub type FormInput = HashMap<String, String>;

pub use gate::FieldName;
pub use network::NetworkPolicy;
pub use opts::AdminOpts;
pub use sanitize::{Sanitized, ValidationError, ValidationErrorKind, sanitize};
pub use service::{AdminRequest, AdminService};
pub use site::{SiteSettings, TrackPages, TrackPublish, TrackVoting};

// vim: ts=4

pub use crate::error::{Error, XResult};
pub use crate::types::{Scope, SiteId};

pub use tracing::{debug, error, info, warn};

// vim: ts=4

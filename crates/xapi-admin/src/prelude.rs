pub use crate::FormInput;
pub use xapi_types::error::{Error, XResult};
pub use xapi_types::identity::{AuthCtx, Identity};
pub use xapi_types::probe::CapabilityProbe;
pub use xapi_types::settings_store::SettingsStore;
pub use xapi_types::types::{Scope, SiteId};

pub use tracing::{debug, info, warn};

// vim: ts=4

//! Admin options
//!
//! Hosts deserialize these from their own configuration source. Missing
//! fields fall back to the defaults below.

use serde::Deserialize;

use crate::prelude::*;

pub const DEFAULT_SITE_SETTINGS_KEY: &str = "xapi.settings";
pub const DEFAULT_NETWORK_SETTINGS_KEY: &str = "xapi.network_settings";

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct AdminOpts {
	/// Store key of the per-site settings blob
	pub site_settings_key: Box<str>,
	/// Store key of the network policy blob
	pub network_settings_key: Box<str>,
}

impl Default for AdminOpts {
	fn default() -> Self {
		Self {
			site_settings_key: DEFAULT_SITE_SETTINGS_KEY.into(),
			network_settings_key: DEFAULT_NETWORK_SETTINGS_KEY.into(),
		}
	}
}

impl AdminOpts {
	pub fn validate(&self) -> XResult<()> {
		if self.site_settings_key.trim().is_empty() {
			return Err(Error::ConfigError("site_settings_key must not be empty".into()));
		}
		if self.network_settings_key.trim().is_empty() {
			return Err(Error::ConfigError("network_settings_key must not be empty".into()));
		}
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_defaults_from_empty_config() {
		let opts: AdminOpts = serde_json::from_str("{}").expect("deserialize");
		assert_eq!(&*opts.site_settings_key, DEFAULT_SITE_SETTINGS_KEY);
		assert_eq!(&*opts.network_settings_key, DEFAULT_NETWORK_SETTINGS_KEY);
		assert!(opts.validate().is_ok());
	}

	#[test]
	fn test_partial_override() {
		let opts: AdminOpts =
			serde_json::from_str(r#"{"site_settings_key": "wpxapi_settings"}"#).expect("deserialize");
		assert_eq!(&*opts.site_settings_key, "wpxapi_settings");
		assert_eq!(&*opts.network_settings_key, DEFAULT_NETWORK_SETTINGS_KEY);
	}

	#[test]
	fn test_empty_key_rejected() {
		let opts = AdminOpts { site_settings_key: " ".into(), ..AdminOpts::default() };
		assert!(matches!(opts.validate(), Err(Error::ConfigError(_))));
	}
}

// vim: ts=4

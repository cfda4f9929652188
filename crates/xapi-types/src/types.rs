//! Common types used throughout the admin crates.

use serde::{Deserialize, Serialize};

// SiteId //
//********//
/// Host site identifier. `0` is reserved for the network scope.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SiteId(pub u64);

impl std::fmt::Display for SiteId {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.0)
	}
}

impl Serialize for SiteId {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: serde::Serializer,
	{
		serializer.serialize_u64(self.0)
	}
}

impl<'de> Deserialize<'de> for SiteId {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: serde::Deserializer<'de>,
	{
		Ok(SiteId(u64::deserialize(deserializer)?))
	}
}

// Scope //
//*******//
/// Where a settings blob lives
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Scope {
	/// Shared by every site of the network
	Network,
	/// Private to one site
	Site(SiteId),
}

impl Scope {
	/// Numeric id used by stores that keep both scopes in one table
	pub fn storage_id(&self) -> u64 {
		match self {
			Scope::Network => 0,
			Scope::Site(site_id) => site_id.0,
		}
	}
}

impl std::fmt::Display for Scope {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Scope::Network => write!(f, "network"),
			Scope::Site(site_id) => write!(f, "site:{}", site_id),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_site_id_display_is_plain_decimal() {
		assert_eq!(SiteId(7).to_string(), "7");
		assert_eq!(SiteId(70).to_string(), "70");
	}

	#[test]
	fn test_scope_storage_id() {
		assert_eq!(Scope::Network.storage_id(), 0);
		assert_eq!(Scope::Site(SiteId(12)).storage_id(), 12);
	}

	#[test]
	fn test_site_id_serde() {
		let json = serde_json::to_string(&SiteId(3)).expect("serialize");
		assert_eq!(json, "3");
		let back: SiteId = serde_json::from_str(&json).expect("deserialize");
		assert_eq!(back, SiteId(3));
	}
}

// vim: ts=4

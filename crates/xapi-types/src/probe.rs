//! Capability probes
//!
//! Feature detection over the hosting environment. Optional tracking fields
//! are only offered when the feature they track is installed.

pub trait CapabilityProbe: Send + Sync {
	/// A badge-awarding system is installed
	fn badge_system_present(&self) -> bool;

	/// A theme with post voting and favoriting is active
	fn voting_theme_present(&self) -> bool;
}

/// Probe with answers fixed at construction time
#[derive(Clone, Copy, Debug, Default)]
pub struct StaticProbe {
	pub badges: bool,
	pub voting: bool,
}

impl CapabilityProbe for StaticProbe {
	fn badge_system_present(&self) -> bool {
		self.badges
	}

	fn voting_theme_present(&self) -> bool {
		self.voting
	}
}

// vim: ts=4

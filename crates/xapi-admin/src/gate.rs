//! Authorization gate
//!
//! Decides who may change the network policy, who may override the LRS of a
//! site, and which site settings fields a request gets to see. Field
//! visibility is a declarative table evaluated the same way for every field.

use std::collections::BTreeSet;

use crate::network::NetworkPolicy;
use crate::prelude::*;

/// Fields of the site settings form
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FieldName {
	TrackPages,
	TrackComments,
	TrackBadges,
	TrackGuest,
	TrackPublish,
	TrackVoting,
	LrsUrl,
	LrsUsername,
	LrsPassword,
}

impl FieldName {
	pub const ALL: &'static [FieldName] = &[
		FieldName::TrackPages,
		FieldName::TrackComments,
		FieldName::TrackBadges,
		FieldName::TrackGuest,
		FieldName::TrackPublish,
		FieldName::TrackVoting,
		FieldName::LrsUrl,
		FieldName::LrsUsername,
		FieldName::LrsPassword,
	];

	/// Checkbox fields, omitted from a submission when unchecked
	pub const CHECKBOXES: &'static [FieldName] =
		&[FieldName::TrackComments, FieldName::TrackBadges, FieldName::TrackGuest];

	/// Form and blob key
	pub fn key(self) -> &'static str {
		match self {
			FieldName::TrackPages => "track_pages",
			FieldName::TrackComments => "track_comments",
			FieldName::TrackBadges => "track_badges",
			FieldName::TrackGuest => "track_guest",
			FieldName::TrackPublish => "track_publish",
			FieldName::TrackVoting => "track_voting",
			FieldName::LrsUrl => "lrs_url",
			FieldName::LrsUsername => "lrs_username",
			FieldName::LrsPassword => "lrs_password",
		}
	}

	pub fn from_key(key: &str) -> Option<FieldName> {
		Self::ALL.iter().copied().find(|field| field.key() == key)
	}
}

impl std::fmt::Display for FieldName {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.key())
	}
}

/// Condition under which a field is offered
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Visibility {
	Always,
	/// Site is listed as a guest site by the network policy
	GuestSite,
	/// A badge system is installed
	BadgeSystem,
	/// A voting theme is active
	VotingTheme,
	/// User may override the LRS of the site
	LrsAdmin,
}

pub const FIELD_RULES: &[(FieldName, Visibility)] = &[
	(FieldName::TrackPages, Visibility::Always),
	(FieldName::TrackPublish, Visibility::Always),
	(FieldName::TrackGuest, Visibility::GuestSite),
	(FieldName::TrackComments, Visibility::Always),
	(FieldName::TrackBadges, Visibility::BadgeSystem),
	(FieldName::TrackVoting, Visibility::VotingTheme),
	(FieldName::LrsUrl, Visibility::LrsAdmin),
	(FieldName::LrsUsername, Visibility::LrsAdmin),
	(FieldName::LrsPassword, Visibility::LrsAdmin),
];

impl Visibility {
	pub fn evaluate(
		self,
		site_id: SiteId,
		user: &dyn Identity,
		policy: &NetworkPolicy,
		probe: &dyn CapabilityProbe,
	) -> bool {
		match self {
			Visibility::Always => true,
			Visibility::GuestSite => guest_tracking_allowed(site_id, policy),
			Visibility::BadgeSystem => probe.badge_system_present(),
			Visibility::VotingTheme => probe.voting_theme_present(),
			Visibility::LrsAdmin => can_edit_site_lrs_override(user, policy),
		}
	}
}

/// Only super-admins change the network policy
pub fn can_edit_network_policy(user: &dyn Identity) -> bool {
	user.is_super_admin()
}

pub fn can_edit_site_lrs_override(user: &dyn Identity, policy: &NetworkPolicy) -> bool {
	user.is_super_admin() || policy.admin_usernames().any(|name| name == user.username())
}

/// Site ids are compared in their string form, so `7` never matches `70`
pub fn guest_tracking_allowed(site_id: SiteId, policy: &NetworkPolicy) -> bool {
	let site_id = site_id.to_string();
	policy.guest_site_ids().any(|id| id == site_id)
}

/// Fields offered to `user` on `site_id`.
///
/// Pure: the guest policy correction that goes with hiding `track_guest` is
/// `site::enforce_guest_policy`.
pub fn visible_fields(
	site_id: SiteId,
	user: &dyn Identity,
	policy: &NetworkPolicy,
	probe: &dyn CapabilityProbe,
) -> BTreeSet<FieldName> {
	FIELD_RULES
		.iter()
		.filter(|(_, visibility)| visibility.evaluate(site_id, user, policy, probe))
		.map(|(field, _)| *field)
		.collect()
}


// vim: ts=4

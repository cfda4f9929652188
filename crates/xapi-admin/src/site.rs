//! Site settings
//!
//! Per-site tracking options. Stored as one blob per site with enum choices
//! as integer codes and checkboxes as `0`/`1`.

use serde::{Deserialize, Serialize};

use crate::gate::{self, FieldName};
use crate::network::NetworkPolicy;
use crate::prelude::*;

/// Closed set of options stored as an integer code
pub trait Choice: Copy + Sized + 'static {
	const ALL: &'static [Self];

	fn code(self) -> u8;

	/// Fixed English label of the option
	fn description(self) -> &'static str;

	fn from_code(code: u8) -> Option<Self> {
		Self::ALL.iter().copied().find(|choice| choice.code() == code)
	}

	/// Parse a submitted form value
	fn parse_code(raw: &str) -> Option<Self> {
		raw.trim().parse::<u8>().ok().and_then(Self::from_code)
	}
}

/// Which page views are recorded
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TrackPages {
	AllPages,
	SingularOnly,
	#[default]
	NoPages,
}

impl Choice for TrackPages {
	const ALL: &'static [Self] = &[Self::AllPages, Self::SingularOnly, Self::NoPages];

	fn code(self) -> u8 {
		match self {
			Self::AllPages => 1,
			Self::SingularOnly => 2,
			Self::NoPages => 3,
		}
	}

	fn description(self) -> &'static str {
		match self {
			Self::AllPages => "All Pages",
			Self::SingularOnly => "Singular Pages Only",
			Self::NoPages => "No Pages",
		}
	}
}

/// Which post status changes are recorded
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TrackPublish {
	PubUpdateRetractDelete,
	PubUpdateDelete,
	PubDelete,
	PubOnly,
	#[default]
	None,
}

impl Choice for TrackPublish {
	const ALL: &'static [Self] = &[
		Self::PubUpdateRetractDelete,
		Self::PubUpdateDelete,
		Self::PubDelete,
		Self::PubOnly,
		Self::None,
	];

	fn code(self) -> u8 {
		match self {
			Self::PubUpdateRetractDelete => 1,
			Self::PubUpdateDelete => 2,
			Self::PubDelete => 3,
			Self::PubOnly => 4,
			Self::None => 5,
		}
	}

	fn description(self) -> &'static str {
		match self {
			Self::PubUpdateRetractDelete => {
				"Track posts being published, updated, retracted, and deleted"
			}
			Self::PubUpdateDelete => "Track posts being published, updated, and deleted",
			Self::PubDelete => "Track posts being published and deleted",
			Self::PubOnly => "Only track posts being published",
			Self::None => "Do not track any posts status changes",
		}
	}
}

/// Which voting theme interactions are recorded
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TrackVoting {
	VotesAndFavorites,
	VotesOnly,
	FavoritesOnly,
	#[default]
	Neither,
}

impl Choice for TrackVoting {
	const ALL: &'static [Self] =
		&[Self::VotesAndFavorites, Self::VotesOnly, Self::FavoritesOnly, Self::Neither];

	fn code(self) -> u8 {
		match self {
			Self::VotesAndFavorites => 1,
			Self::VotesOnly => 2,
			Self::FavoritesOnly => 3,
			Self::Neither => 4,
		}
	}

	fn description(self) -> &'static str {
		match self {
			Self::VotesAndFavorites => "Track all votes and favoriting",
			Self::VotesOnly => "Track only votes",
			Self::FavoritesOnly => "Track only favoriting",
			Self::Neither => "Do not track votes or favoriting",
		}
	}
}

// Blob codecs //
//*************//
/// Stored choice code: older blobs keep form values as strings
#[derive(Deserialize)]
#[serde(untagged)]
enum RawCode {
	Int(u64),
	Str(String),
	Other(serde::de::IgnoredAny),
}

impl RawCode {
	fn code(&self) -> Option<u8> {
		match self {
			RawCode::Int(n) => u8::try_from(*n).ok(),
			RawCode::Str(s) => s.trim().parse().ok(),
			RawCode::Other(_) => None,
		}
	}
}

macro_rules! choice_serde {
	($ty:ident) => {
		impl Serialize for $ty {
			fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
			where
				S: serde::Serializer,
			{
				serializer.serialize_u8(self.code())
			}
		}

		impl<'de> Deserialize<'de> for $ty {
			fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
			where
				D: serde::Deserializer<'de>,
			{
				let raw = RawCode::deserialize(deserializer)?;
				Ok(raw.code().and_then($ty::from_code).unwrap_or_else(|| {
					warn!("Unknown stored {} code, using the default", stringify!($ty));
					$ty::default()
				}))
			}
		}
	};
}

choice_serde!(TrackPages);
choice_serde!(TrackPublish);
choice_serde!(TrackVoting);

/// Checkbox stored as `0`/`1`
mod flag {
	use serde::Deserialize;
	use tracing::warn;

	#[derive(Deserialize)]
	#[serde(untagged)]
	enum RawFlag {
		Bool(bool),
		Int(i64),
		Float(f64),
		Str(String),
		Other(serde::de::IgnoredAny),
	}

	pub fn serialize<S>(value: &bool, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: serde::Serializer,
	{
		serializer.serialize_u8(u8::from(*value))
	}

	pub fn deserialize<'de, D>(deserializer: D) -> Result<bool, D::Error>
	where
		D: serde::Deserializer<'de>,
	{
		Ok(match RawFlag::deserialize(deserializer)? {
			RawFlag::Bool(value) => value,
			RawFlag::Int(value) => value != 0,
			RawFlag::Float(value) => value != 0.0,
			RawFlag::Str(value) => crate::sanitize::checkbox_value(&value),
			RawFlag::Other(_) => {
				warn!("Unreadable stored checkbox value, treating it as unchecked");
				false
			}
		})
	}
}

/// Tracking configuration of one site
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteSettings {
	pub track_pages: TrackPages,
	#[serde(with = "flag")]
	pub track_comments: bool,
	#[serde(with = "flag")]
	pub track_badges: bool,
	#[serde(with = "flag")]
	pub track_guest: bool,
	pub track_publish: TrackPublish,
	pub track_voting: TrackVoting,
	pub lrs_url: Box<str>,
	pub lrs_username: Box<str>,
	pub lrs_password: Box<str>,
}

fn flag_str(value: bool) -> String {
	if value { "1".to_string() } else { "0".to_string() }
}

impl SiteSettings {
	/// Render as form input, the shape `sanitize` consumes
	pub fn to_form(&self) -> FormInput {
		FieldName::ALL
			.iter()
			.map(|field| {
				let value = match field {
					FieldName::TrackPages => self.track_pages.code().to_string(),
					FieldName::TrackComments => flag_str(self.track_comments),
					FieldName::TrackBadges => flag_str(self.track_badges),
					FieldName::TrackGuest => flag_str(self.track_guest),
					FieldName::TrackPublish => self.track_publish.code().to_string(),
					FieldName::TrackVoting => self.track_voting.code().to_string(),
					FieldName::LrsUrl => self.lrs_url.to_string(),
					FieldName::LrsUsername => self.lrs_username.to_string(),
					FieldName::LrsPassword => self.lrs_password.to_string(),
				};
				(field.key().to_string(), value)
			})
			.collect()
	}

	/// Copy one field over from another settings instance
	pub fn restore_field(&mut self, from: &SiteSettings, field: FieldName) {
		match field {
			FieldName::TrackPages => self.track_pages = from.track_pages,
			FieldName::TrackComments => self.track_comments = from.track_comments,
			FieldName::TrackBadges => self.track_badges = from.track_badges,
			FieldName::TrackGuest => self.track_guest = from.track_guest,
			FieldName::TrackPublish => self.track_publish = from.track_publish,
			FieldName::TrackVoting => self.track_voting = from.track_voting,
			FieldName::LrsUrl => self.lrs_url.clone_from(&from.lrs_url),
			FieldName::LrsUsername => self.lrs_username.clone_from(&from.lrs_username),
			FieldName::LrsPassword => self.lrs_password.clone_from(&from.lrs_password),
		}
	}
}

/// Load the settings of a site, creating defaults on first access
pub async fn load(store: &dyn SettingsStore, key: &str, site_id: SiteId) -> XResult<SiteSettings> {
	let scope = Scope::Site(site_id);
	let value = match store.read_setting(scope, key).await? {
		Some(value) => value,
		None => {
			info!("Creating default site settings '{}' for site {}", key, site_id);
			let default = serde_json::to_value(SiteSettings::default())?;
			store.create_setting_if_absent(scope, key, default).await?
		}
	};

	serde_json::from_value(value).map_err(|err| {
		warn!("Stored site settings '{}' of site {} are unreadable: {}", key, site_id, err);
		Error::from(err)
	})
}

/// Overwrite the settings of a site
pub async fn save(
	store: &dyn SettingsStore,
	key: &str,
	site_id: SiteId,
	settings: &SiteSettings,
) -> XResult<()> {
	store.update_setting(Scope::Site(site_id), key, serde_json::to_value(settings)?).await?;
	info!("Site settings '{}' updated for site {}", key, site_id);
	Ok(())
}

/// Policy correction: a site that may not record guests never has guest
/// tracking switched on.
///
/// Turns `track_guest` off and persists it right away when the site is not a
/// guest site. Returns whether a correction was written.
pub async fn enforce_guest_policy(
	store: &dyn SettingsStore,
	key: &str,
	site_id: SiteId,
	policy: &NetworkPolicy,
	settings: &mut SiteSettings,
) -> XResult<bool> {
	if gate::guest_tracking_allowed(site_id, policy) || !settings.track_guest {
		return Ok(false);
	}

	warn!("Site {} is not allowed to record guests, turning guest tracking off", site_id);
	settings.track_guest = false;
	save(store, key, site_id, settings).await?;
	Ok(true)
}


// vim: ts=4

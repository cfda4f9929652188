//! Network policy
//!
//! Network-wide LRS defaults and the constraints sites are checked against.
//! The lists are stored exactly as the network admin typed them and parsed on
//! every read.

use serde::{Deserialize, Serialize};

use crate::prelude::*;

/// Network-wide policy, one instance per installation
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkPolicy {
	pub lrs_url: Box<str>,
	pub lrs_username: Box<str>,
	pub lrs_password: Box<str>,
	/// Comma separated usernames allowed to override the LRS of a site
	pub lrs_admin_usernames: Box<str>,
	/// Comma separated site ids allowed to record anonymous page views
	pub lrs_guest_site_ids: Box<str>,
	/// One allowed LRS url prefix per line
	pub lrs_whitelist: Box<str>,
}

impl NetworkPolicy {
	/// Form keys accepted by `merge_form`
	pub const FIELDS: &'static [&'static str] = &[
		"lrs_url",
		"lrs_username",
		"lrs_password",
		"lrs_admin_usernames",
		"lrs_guest_site_ids",
		"lrs_whitelist",
	];

	fn field_mut(&mut self, key: &str) -> Option<&mut Box<str>> {
		match key {
			"lrs_url" => Some(&mut self.lrs_url),
			"lrs_username" => Some(&mut self.lrs_username),
			"lrs_password" => Some(&mut self.lrs_password),
			"lrs_admin_usernames" => Some(&mut self.lrs_admin_usernames),
			"lrs_guest_site_ids" => Some(&mut self.lrs_guest_site_ids),
			"lrs_whitelist" => Some(&mut self.lrs_whitelist),
			_ => None,
		}
	}

	/// Apply the recognized keys of a submission; others are dropped.
	///
	/// Returns the number of fields taken from the submission.
	pub fn merge_form(&mut self, raw: &FormInput) -> usize {
		let mut applied = 0;
		for (key, value) in raw {
			if let Some(field) = self.field_mut(key) {
				*field = value.as_str().into();
				applied += 1;
			} else {
				debug!("Dropping unknown network policy field '{}'", key);
			}
		}
		applied
	}

	pub fn admin_usernames(&self) -> impl Iterator<Item = &str> {
		split_list(&self.lrs_admin_usernames)
	}

	pub fn guest_site_ids(&self) -> impl Iterator<Item = &str> {
		split_list(&self.lrs_guest_site_ids)
	}

	/// Allowed LRS url prefixes. Empty means any url is accepted.
	pub fn whitelist(&self) -> Vec<&str> {
		self.lrs_whitelist
			.split(['\r', '\n'])
			.map(str::trim)
			.filter(|line| !line.is_empty())
			.collect()
	}

	/// Network default LRS credentials are complete
	pub fn is_configured(&self) -> bool {
		!self.lrs_url.is_empty() && !self.lrs_username.is_empty() && !self.lrs_password.is_empty()
	}
}

/// Split a comma separated list, trimming items and skipping empty ones
pub(crate) fn split_list(list: &str) -> impl Iterator<Item = &str> {
	list.split(',').map(str::trim).filter(|item| !item.is_empty())
}

/// Load the policy, creating the all-empty default on first access
pub async fn load(store: &dyn SettingsStore, key: &str) -> XResult<NetworkPolicy> {
	let value = match store.read_setting(Scope::Network, key).await? {
		Some(value) => value,
		None => {
			info!("Creating default network policy '{}'", key);
			let default = serde_json::to_value(NetworkPolicy::default())?;
			store.create_setting_if_absent(Scope::Network, key, default).await?
		}
	};

	serde_json::from_value(value).map_err(|err| {
		warn!("Stored network policy '{}' is unreadable: {}", key, err);
		Error::from(err)
	})
}

/// Merge a network admin submission into the stored policy and persist it.
///
/// Network admin input is trusted: nothing is validated here.
pub async fn save(store: &dyn SettingsStore, key: &str, raw: &FormInput) -> XResult<NetworkPolicy> {
	let mut policy = load(store, key).await?;
	let applied = policy.merge_form(raw);

	store.update_setting(Scope::Network, key, serde_json::to_value(&policy)?).await?;
	info!("Network policy '{}' updated ({} fields submitted)", key, applied);

	Ok(policy)
}


// vim: ts=4

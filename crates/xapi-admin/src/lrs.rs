//! Effective LRS endpoint of a site

use crate::network::NetworkPolicy;
use crate::prelude::*;
use crate::sanitize::whitelist_allows;
use crate::site::SiteSettings;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LrsSource {
	/// Local override of the site
	Site,
	/// Network default
	Network,
}

/// Endpoint and credentials statements are sent to
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LrsEndpoint<'a> {
	pub url: &'a str,
	pub username: &'a str,
	pub password: &'a str,
	pub source: LrsSource,
}

/// Resolve the endpoint a site reports to.
///
/// The site override wins when it is set and still passes the current
/// whitelist, otherwise the network default is used when it is complete.
pub fn effective_lrs<'a>(
	settings: &'a SiteSettings,
	policy: &'a NetworkPolicy,
) -> Option<LrsEndpoint<'a>> {
	if !settings.lrs_url.is_empty() {
		if whitelist_allows(&policy.whitelist(), &settings.lrs_url) {
			return Some(LrsEndpoint {
				url: &settings.lrs_url,
				username: &settings.lrs_username,
				password: &settings.lrs_password,
				source: LrsSource::Site,
			});
		}
		warn!("Site LRS override {:?} is no longer whitelisted, ignoring it", settings.lrs_url);
	}

	policy.is_configured().then(|| LrsEndpoint {
		url: &policy.lrs_url,
		username: &policy.lrs_username,
		password: &policy.lrs_password,
		source: LrsSource::Network,
	})
}

#[cfg(test)]
mod tests {
	use super::*;

	fn network() -> NetworkPolicy {
		NetworkPolicy {
			lrs_url: "http://lrs.example.org/xapi/".into(),
			lrs_username: "net".into(),
			lrs_password: "netpw".into(),
			..NetworkPolicy::default()
		}
	}

	#[test]
	fn test_network_default_used_without_override() {
		let settings = SiteSettings::default();
		let policy = network();
		let endpoint = effective_lrs(&settings, &policy).expect("endpoint");
		assert_eq!(endpoint.source, LrsSource::Network);
		assert_eq!(endpoint.username, "net");
	}

	#[test]
	fn test_site_override_wins() {
		let settings = SiteSettings {
			lrs_url: "http://local.example/".into(),
			lrs_username: "site".into(),
			..SiteSettings::default()
		};
		let policy = network();
		let endpoint = effective_lrs(&settings, &policy).expect("endpoint");
		assert_eq!(endpoint.source, LrsSource::Site);
		assert_eq!(endpoint.url, "http://local.example/");
		assert_eq!(endpoint.username, "site");
	}

	#[test]
	fn test_stale_override_falls_back() {
		let settings =
			SiteSettings { lrs_url: "http://local.example/".into(), ..SiteSettings::default() };
		let policy = NetworkPolicy { lrs_whitelist: "http://lrs.example.org/".into(), ..network() };
		let endpoint = effective_lrs(&settings, &policy).expect("endpoint");
		assert_eq!(endpoint.source, LrsSource::Network);
	}

	#[test]
	fn test_nothing_configured() {
		assert!(effective_lrs(&SiteSettings::default(), &NetworkPolicy::default()).is_none());
	}
}

// vim: ts=4

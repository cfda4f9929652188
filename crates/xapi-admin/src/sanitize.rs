//! Site settings sanitizer
//!
//! Turns a raw form submission into complete site settings. Rejected values
//! are reported and replaced, they never fail the whole submission.
//!
//! - `lrs_url` must start with one of the whitelisted prefixes when the
//!   network policy has a whitelist. An empty whitelist accepts any url.
//! - Unchecked checkboxes are missing from a submission and become `false`.
//! - Choice codes outside their closed set are reported and reset to the default.

use crate::gate::FieldName;
use crate::network::NetworkPolicy;
use crate::prelude::*;
use crate::site::{Choice, SiteSettings};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ValidationErrorKind {
	/// LRS url does not match the network whitelist
	InvalidEndpoint,
	/// Unknown choice code
	InvalidChoice,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidationError {
	pub kind: ValidationErrorKind,
	pub field: FieldName,
}

impl std::fmt::Display for ValidationError {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self.kind {
			ValidationErrorKind::InvalidEndpoint => {
				write!(f, "You have entered an invalid LRS Endpoint")
			}
			ValidationErrorKind::InvalidChoice => {
				write!(f, "Invalid option for '{}', the default was used", self.field)
			}
		}
	}
}

/// Result of sanitizing one submission
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Sanitized {
	pub clean: SiteSettings,
	pub errors: Vec<ValidationError>,
}

/// Checkbox value of a field that is present in a submission
pub(crate) fn checkbox_value(raw: &str) -> bool {
	let raw = raw.trim();
	!(raw.is_empty()
		|| raw == "0"
		|| raw.eq_ignore_ascii_case("false")
		|| raw.eq_ignore_ascii_case("off")
		|| raw.eq_ignore_ascii_case("no"))
}

/// Whether `url` passes the whitelist, compared as a literal byte prefix
pub fn whitelist_allows(whitelist: &[&str], url: &str) -> bool {
	whitelist.is_empty() || whitelist.iter().any(|prefix| url.as_bytes().starts_with(prefix.as_bytes()))
}

fn field<'a>(raw: &'a FormInput, field: FieldName) -> Option<&'a str> {
	raw.get(field.key()).map(String::as_str)
}

fn choice<T: Choice + Default>(
	raw: &FormInput,
	name: FieldName,
	errors: &mut Vec<ValidationError>,
) -> T {
	match field(raw, name) {
		None => T::default(),
		Some(code) => T::parse_code(code).unwrap_or_else(|| {
			debug!("Rejecting choice code {:?} for '{}'", code, name);
			errors.push(ValidationError { kind: ValidationErrorKind::InvalidChoice, field: name });
			T::default()
		}),
	}
}

pub fn sanitize(raw: &FormInput, policy: &NetworkPolicy) -> Sanitized {
	let mut errors = Vec::new();

	let mut lrs_url = field(raw, FieldName::LrsUrl).unwrap_or_default();
	if !lrs_url.is_empty() && !whitelist_allows(&policy.whitelist(), lrs_url) {
		debug!("LRS url {:?} is not whitelisted", lrs_url);
		errors.push(ValidationError {
			kind: ValidationErrorKind::InvalidEndpoint,
			field: FieldName::LrsUrl,
		});
		lrs_url = "";
	}

	let checkbox = |name: FieldName| field(raw, name).is_some_and(checkbox_value);

	let clean = SiteSettings {
		track_pages: choice(raw, FieldName::TrackPages, &mut errors),
		track_comments: checkbox(FieldName::TrackComments),
		track_badges: checkbox(FieldName::TrackBadges),
		track_guest: checkbox(FieldName::TrackGuest),
		track_publish: choice(raw, FieldName::TrackPublish, &mut errors),
		track_voting: choice(raw, FieldName::TrackVoting, &mut errors),
		lrs_url: lrs_url.into(),
		lrs_username: field(raw, FieldName::LrsUsername).unwrap_or_default().into(),
		lrs_password: field(raw, FieldName::LrsPassword).unwrap_or_default().into(),
	};

	Sanitized { clean, errors }
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::site::{TrackPages, TrackPublish, TrackVoting};

	fn form(pairs: &[(&str, &str)]) -> FormInput {
		pairs.iter().map(|(k, v)| ((*k).to_string(), (*v).to_string())).collect()
	}

	fn whitelisted(lines: &str) -> NetworkPolicy {
		NetworkPolicy { lrs_whitelist: lines.into(), ..NetworkPolicy::default() }
	}

	#[test]
	fn test_whitelisted_url_accepted() {
		let policy = whitelisted("http://lrs.example.org/");
		let res = sanitize(&form(&[("lrs_url", "http://lrs.example.org/statements")]), &policy);
		assert!(res.errors.is_empty());
		assert_eq!(&*res.clean.lrs_url, "http://lrs.example.org/statements");
	}

	#[test]
	fn test_subdomain_url_rejected() {
		let policy = whitelisted("http://lrs.example.org/");
		let res = sanitize(&form(&[("lrs_url", "http://statements.lrs.example.org/")]), &policy);
		assert_eq!(&*res.clean.lrs_url, "");
		assert_eq!(
			res.errors,
			vec![ValidationError {
				kind: ValidationErrorKind::InvalidEndpoint,
				field: FieldName::LrsUrl,
			}]
		);
	}

	#[test]
	fn test_any_line_of_whitelist_matches() {
		let policy = whitelisted("https://a.example/\nhttps://b.example/xapi/");
		let res = sanitize(&form(&[("lrs_url", "https://b.example/xapi/statements")]), &policy);
		assert!(res.errors.is_empty());

		let res = sanitize(&form(&[("lrs_url", "https://b.example/other")]), &policy);
		assert_eq!(res.errors.len(), 1);
	}

	#[test]
	fn test_trailing_blank_lines_do_not_open_whitelist() {
		let policy = whitelisted("http://a.example/\r\n\r\n  \n");
		let res = sanitize(&form(&[("lrs_url", "http://other.example/")]), &policy);
		assert_eq!(res.errors.len(), 1);
		assert_eq!(&*res.clean.lrs_url, "");

		let res = sanitize(&form(&[("lrs_url", "http://a.example/xapi/")]), &policy);
		assert!(res.errors.is_empty());
	}

	#[test]
	fn test_blank_only_whitelist_accepts_anything() {
		let policy = whitelisted("\r\n \n");
		let res = sanitize(&form(&[("lrs_url", "http://other.example/")]), &policy);
		assert!(res.errors.is_empty());
	}

	#[test]
	fn test_empty_whitelist_accepts_anything() {
		let res = sanitize(&form(&[("lrs_url", "gopher://anything")]), &NetworkPolicy::default());
		assert!(res.errors.is_empty());
		assert_eq!(&*res.clean.lrs_url, "gopher://anything");
	}

	#[test]
	fn test_empty_url_not_checked() {
		let policy = whitelisted("http://lrs.example.org/");
		let res = sanitize(&form(&[("lrs_url", "")]), &policy);
		assert!(res.errors.is_empty());
		let res = sanitize(&form(&[]), &policy);
		assert!(res.errors.is_empty());
		assert_eq!(&*res.clean.lrs_url, "");
	}

	#[test]
	fn test_prefix_is_case_sensitive() {
		let policy = whitelisted("http://lrs.example.org/");
		let res = sanitize(&form(&[("lrs_url", "HTTP://lrs.example.org/")]), &policy);
		assert_eq!(res.errors.len(), 1);
	}

	#[test]
	fn test_whitelist_allows_property() {
		let urls = ["", "http://a/", "http://a/b", "http://b/", "https://a/"];
		let lists: [&[&str]; 4] = [&[], &["http://a/"], &["http://b/", "https://"], &["x"]];
		for list in lists {
			for url in urls {
				let expected = list.is_empty() || list.iter().any(|w| url.starts_with(w));
				assert_eq!(whitelist_allows(list, url), expected, "{:?} {:?}", list, url);
			}
		}
	}

	#[test]
	fn test_missing_checkboxes_become_false() {
		let res = sanitize(&form(&[("track_comments", "1")]), &NetworkPolicy::default());
		assert!(res.clean.track_comments);
		assert!(!res.clean.track_badges);
		assert!(!res.clean.track_guest);
		assert!(res.errors.is_empty());
	}

	#[test]
	fn test_checkbox_values() {
		for off in ["", "0", "false", "OFF", " no "] {
			assert!(!checkbox_value(off), "{:?}", off);
		}
		for on in ["1", "on", "true", "yes"] {
			assert!(checkbox_value(on), "{:?}", on);
		}
	}

	#[test]
	fn test_choices_parsed() {
		let res = sanitize(
			&form(&[("track_pages", "1"), ("track_publish", "3"), ("track_voting", "2")]),
			&NetworkPolicy::default(),
		);
		assert_eq!(res.clean.track_pages, TrackPages::AllPages);
		assert_eq!(res.clean.track_publish, TrackPublish::PubDelete);
		assert_eq!(res.clean.track_voting, TrackVoting::VotesOnly);
		assert!(res.errors.is_empty());
	}

	#[test]
	fn test_unknown_choice_reported_and_defaulted() {
		let res = sanitize(
			&form(&[("track_pages", "9"), ("track_voting", "x"), ("track_comments", "1")]),
			&NetworkPolicy::default(),
		);
		assert_eq!(res.clean.track_pages, TrackPages::NoPages);
		assert_eq!(res.clean.track_voting, TrackVoting::Neither);
		assert!(res.clean.track_comments);
		let fields: Vec<FieldName> = res.errors.iter().map(|e| e.field).collect();
		assert_eq!(fields, vec![FieldName::TrackPages, FieldName::TrackVoting]);
		assert!(res.errors.iter().all(|e| e.kind == ValidationErrorKind::InvalidChoice));
	}

	#[test]
	fn test_strings_pass_through() {
		let res = sanitize(
			&form(&[("lrs_username", " user "), ("lrs_password", "p@ss"), ("extra", "ignored")]),
			&NetworkPolicy::default(),
		);
		assert_eq!(&*res.clean.lrs_username, " user ");
		assert_eq!(&*res.clean.lrs_password, "p@ss");
	}

	#[test]
	fn test_resanitizing_clean_output_is_noop() {
		let policy = whitelisted("http://lrs.example.org/");
		let inputs = [
			form(&[("track_comments", "1"), ("lrs_url", "http://evil.example/")]),
			form(&[("track_pages", "2"), ("track_guest", "on"), ("track_voting", "7")]),
			form(&[("lrs_url", "http://lrs.example.org/x"), ("lrs_username", "u")]),
			form(&[]),
		];
		for input in inputs {
			let once = sanitize(&input, &policy);
			let twice = sanitize(&once.clean.to_form(), &policy);
			assert_eq!(twice.clean, once.clean);
			assert!(twice.errors.is_empty());
		}
	}

	#[test]
	fn test_error_messages() {
		let err =
			ValidationError { kind: ValidationErrorKind::InvalidEndpoint, field: FieldName::LrsUrl };
		assert_eq!(err.to_string(), "You have entered an invalid LRS Endpoint");
		let err = ValidationError {
			kind: ValidationErrorKind::InvalidChoice,
			field: FieldName::TrackPages,
		};
		assert!(err.to_string().contains("track_pages"));
	}
}

// vim: ts=4

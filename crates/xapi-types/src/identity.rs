//! Identity facade
//!
//! The host authenticates the request. The admin crates only need to know
//! who is asking, on which site, and whether that user is a super-admin.

use crate::types::SiteId;

/// Role carried by network super-administrators
pub const SUPER_ADMIN_ROLE: &str = "SADM";

/// Identity of the current request as reported by the host
pub trait Identity: Send + Sync {
	/// Login name of the current user
	fn username(&self) -> &str;

	/// Whether the current user administers the whole network
	fn is_super_admin(&self) -> bool;

	/// Site the request is made on
	fn current_site_id(&self) -> SiteId;
}

/// Context struct for an authenticated admin request
#[derive(Clone, Debug)]
pub struct AuthCtx {
	pub site_id: SiteId,
	pub username: Box<str>,
	pub roles: Box<[Box<str>]>,
}

impl AuthCtx {
	pub fn new(site_id: SiteId, username: impl Into<Box<str>>) -> Self {
		Self { site_id, username: username.into(), roles: Box::default() }
	}

	pub fn with_roles<S: AsRef<str>>(mut self, roles: &[S]) -> Self {
		self.roles = roles.iter().map(|r| Box::from(r.as_ref())).collect();
		self
	}

	pub fn has_role(&self, role: &str) -> bool {
		self.roles.iter().any(|r| r.as_ref() == role)
	}
}

impl Identity for AuthCtx {
	fn username(&self) -> &str {
		&self.username
	}

	fn is_super_admin(&self) -> bool {
		self.has_role(SUPER_ADMIN_ROLE)
	}

	fn current_site_id(&self) -> SiteId {
		self.site_id
	}
}


// vim: ts=4

//! Admin service over a settings store
//!
//! `AdminService` is shared by all requests. `AdminRequest` is created once per
//! admin page load: it reads the network policy and the site settings once,
//! applies the guest policy correction, and serves every later question of
//! that request from the loaded copies.

use std::collections::BTreeSet;
use std::sync::Arc;

use crate::gate::{self, FieldName};
use crate::lrs::{self, LrsEndpoint};
use crate::network::{self, NetworkPolicy};
use crate::opts::AdminOpts;
use crate::prelude::*;
use crate::sanitize::{Sanitized, sanitize};
use crate::site::{self, SiteSettings};

pub struct AdminService {
	store: Arc<dyn SettingsStore>,
	opts: AdminOpts,
}

impl std::fmt::Debug for AdminService {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("AdminService").field("store", &self.store).field("opts", &self.opts).finish()
	}
}

impl AdminService {
	pub fn new(store: Arc<dyn SettingsStore>, opts: AdminOpts) -> XResult<Self> {
		opts.validate()?;
		Ok(Self { store, opts })
	}

	pub fn opts(&self) -> &AdminOpts {
		&self.opts
	}

	pub async fn load_network_policy(&self) -> XResult<NetworkPolicy> {
		network::load(self.store.as_ref(), &self.opts.network_settings_key).await
	}

	/// Store a network admin submission. Super-admins only.
	pub async fn save_network_policy(
		&self,
		user: &dyn Identity,
		raw: &FormInput,
	) -> XResult<NetworkPolicy> {
		if !gate::can_edit_network_policy(user) {
			warn!("User {} attempted to update the network policy without permission", user.username());
			return Err(Error::PermissionDenied);
		}
		network::save(self.store.as_ref(), &self.opts.network_settings_key, raw).await
	}

	pub async fn load_site_settings(&self, site_id: SiteId) -> XResult<SiteSettings> {
		site::load(self.store.as_ref(), &self.opts.site_settings_key, site_id).await
	}

	pub async fn enforce_guest_policy(
		&self,
		site_id: SiteId,
		policy: &NetworkPolicy,
		settings: &mut SiteSettings,
	) -> XResult<bool> {
		site::enforce_guest_policy(
			self.store.as_ref(),
			&self.opts.site_settings_key,
			site_id,
			policy,
			settings,
		)
		.await
	}

	/// Fields offered on `site_id`, applying the guest policy correction first
	pub async fn visible_fields(
		&self,
		site_id: SiteId,
		user: &dyn Identity,
		policy: &NetworkPolicy,
		probe: &dyn CapabilityProbe,
	) -> XResult<BTreeSet<FieldName>> {
		let mut settings = self.load_site_settings(site_id).await?;
		self.enforce_guest_policy(site_id, policy, &mut settings).await?;
		Ok(gate::visible_fields(site_id, user, policy, probe))
	}

	/// Load everything an admin page of the current site needs
	pub async fn open_request<'a>(
		&'a self,
		auth: AuthCtx,
		probe: &'a dyn CapabilityProbe,
	) -> XResult<AdminRequest<'a>> {
		let site_id = auth.current_site_id();
		let policy = self.load_network_policy().await?;
		let mut settings = self.load_site_settings(site_id).await?;
		self.enforce_guest_policy(site_id, &policy, &mut settings).await?;

		if !policy.is_configured() {
			debug!("Network LRS defaults are not configured");
		}

		Ok(AdminRequest { service: self, auth, probe, policy, settings })
	}
}

/// Request-scoped view of the configuration of one site
pub struct AdminRequest<'a> {
	service: &'a AdminService,
	auth: AuthCtx,
	probe: &'a dyn CapabilityProbe,
	policy: NetworkPolicy,
	settings: SiteSettings,
}

impl AdminRequest<'_> {
	pub fn auth(&self) -> &AuthCtx {
		&self.auth
	}

	pub fn site_id(&self) -> SiteId {
		self.auth.current_site_id()
	}

	pub fn policy(&self) -> &NetworkPolicy {
		&self.policy
	}

	pub fn settings(&self) -> &SiteSettings {
		&self.settings
	}

	pub fn visible_fields(&self) -> BTreeSet<FieldName> {
		gate::visible_fields(self.site_id(), &self.auth, &self.policy, self.probe)
	}

	pub fn can_edit_lrs_override(&self) -> bool {
		gate::can_edit_site_lrs_override(&self.auth, &self.policy)
	}

	pub fn can_edit_network_policy(&self) -> bool {
		gate::can_edit_network_policy(&self.auth)
	}

	/// Network default LRS credentials are complete; site admins are told to
	/// ask the network admin otherwise
	pub fn network_configured(&self) -> bool {
		self.policy.is_configured()
	}

	pub fn effective_lrs(&self) -> Option<LrsEndpoint<'_>> {
		lrs::effective_lrs(&self.settings, &self.policy)
	}

	/// Sanitize and store a site settings submission.
	///
	/// Fields the requester cannot see keep their stored value, and problems
	/// with those fields are not reported.
	pub async fn submit_site_settings(&mut self, raw: &FormInput) -> XResult<Sanitized> {
		let visible = self.visible_fields();
		let Sanitized { mut clean, errors } = sanitize(raw, &self.policy);

		for field in FieldName::ALL {
			if !visible.contains(field) {
				clean.restore_field(&self.settings, *field);
			}
		}
		let errors: Vec<_> = errors.into_iter().filter(|err| visible.contains(&err.field)).collect();
		for err in &errors {
			debug!("Site {} submission: {}: {}", self.site_id(), err.field, err);
		}

		site::save(
			self.service.store.as_ref(),
			&self.service.opts.site_settings_key,
			self.site_id(),
			&clean,
		)
		.await?;
		self.settings = clean.clone();

		Ok(Sanitized { clean, errors })
	}

	/// Store a network admin submission and re-apply the guest policy to the
	/// current site
	pub async fn submit_network_policy(&mut self, raw: &FormInput) -> XResult<&NetworkPolicy> {
		self.policy = self.service.save_network_policy(&self.auth, raw).await?;
		let site_id = self.site_id();
		self.service.enforce_guest_policy(site_id, &self.policy, &mut self.settings).await?;
		Ok(&self.policy)
	}
}

// vim: ts=4

//! Settings store adapter
//!
//! Opaque key -> JSON blob storage at two scopes. The admin crate only ever
//! reads, overwrites, or creates a blob when it is missing.

use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::fmt::Debug;

use crate::prelude::*;

#[async_trait]
pub trait SettingsStore: Debug + Send + Sync {
	/// Read a blob, `None` if it was never written
	async fn read_setting(&self, scope: Scope, key: &str) -> XResult<Option<serde_json::Value>>;

	/// Overwrite (or create) a blob
	async fn update_setting(&self, scope: Scope, key: &str, value: serde_json::Value)
	-> XResult<()>;

	/// Atomically store `default` unless a blob already exists under the key.
	///
	/// Returns the blob stored after the call: `default` when this call created
	/// it, otherwise the value a previous (or concurrent) writer stored.
	async fn create_setting_if_absent(
		&self,
		scope: Scope,
		key: &str,
		default: serde_json::Value,
	) -> XResult<serde_json::Value>;
}

/// In-process store, used by tests and by hosts without persistence
#[derive(Debug, Default)]
pub struct MemorySettingsStore {
	blobs: RwLock<HashMap<(Scope, Box<str>), serde_json::Value>>,
}

impl MemorySettingsStore {
	pub fn new() -> Self {
		Self::default()
	}

	/// Number of stored blobs across both scopes
	pub fn len(&self) -> usize {
		self.blobs.read().len()
	}

	pub fn is_empty(&self) -> bool {
		self.blobs.read().is_empty()
	}
}

#[async_trait]
impl SettingsStore for MemorySettingsStore {
	async fn read_setting(&self, scope: Scope, key: &str) -> XResult<Option<serde_json::Value>> {
		Ok(self.blobs.read().get(&(scope, Box::from(key))).cloned())
	}

	async fn update_setting(
		&self,
		scope: Scope,
		key: &str,
		value: serde_json::Value,
	) -> XResult<()> {
		self.blobs.write().insert((scope, Box::from(key)), value);
		Ok(())
	}

	async fn create_setting_if_absent(
		&self,
		scope: Scope,
		key: &str,
		default: serde_json::Value,
	) -> XResult<serde_json::Value> {
		let mut blobs = self.blobs.write();
		let value = blobs.entry((scope, Box::from(key))).or_insert_with(|| {
			debug!("Creating default setting '{}' in {}", key, scope);
			default
		});
		Ok(value.clone())
	}
}


// vim: ts=4

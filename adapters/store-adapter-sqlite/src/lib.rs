//! SQLite-backed settings store.
//!
//! Both scopes share one `settings` table keyed by `(site_id, name)`; the
//! network scope uses `site_id = 0`.

#![forbid(unsafe_code)]

use std::path::Path;

use async_trait::async_trait;
use sqlx::sqlite::{self, SqlitePool};

use xapi_types::prelude::*;
use xapi_types::settings_store::SettingsStore;

mod schema;
mod setting;

#[derive(Debug)]
pub struct SettingsStoreSqlite {
	db: SqlitePool,
}

impl SettingsStoreSqlite {
	pub async fn new(path: impl AsRef<Path>) -> XResult<Self> {
		let opts = sqlite::SqliteConnectOptions::new()
			.filename(path.as_ref())
			.create_if_missing(true)
			.journal_mode(sqlite::SqliteJournalMode::Wal);
		let db = sqlite::SqlitePoolOptions::new()
			.max_connections(5)
			.connect_with(opts)
			.await
			.inspect_err(|err| warn!("DB: {:#?}", err))
			.map_err(|_| Error::DbError)?;

		schema::init_db(&db)
			.await
			.inspect_err(|err| warn!("DB: {:#?}", err))
			.map_err(|_| Error::DbError)?;

		info!("Settings store opened at {}", path.as_ref().display());
		Ok(Self { db })
	}
}

#[async_trait]
impl SettingsStore for SettingsStoreSqlite {
	async fn read_setting(&self, scope: Scope, key: &str) -> XResult<Option<serde_json::Value>> {
		setting::read(&self.db, scope, key).await
	}

	async fn update_setting(
		&self,
		scope: Scope,
		key: &str,
		value: serde_json::Value,
	) -> XResult<()> {
		setting::update(&self.db, scope, key, &value).await
	}

	async fn create_setting_if_absent(
		&self,
		scope: Scope,
		key: &str,
		default: serde_json::Value,
	) -> XResult<serde_json::Value> {
		setting::create_if_absent(&self.db, scope, key, &default).await
	}
}

// vim: ts=4

//! Settings key-value store management
//!
//! Handles persistent storage of settings blobs as JSON text.

use sqlx::{Row, SqlitePool};

use xapi_types::prelude::*;

/// Row id of a scope. Site 0 would alias the network scope and is refused.
fn scope_id(scope: Scope) -> XResult<i64> {
	if scope == Scope::Site(SiteId(0)) {
		return Err(Error::ValidationError("site id 0 is reserved for the network scope".into()));
	}
	i64::try_from(scope.storage_id())
		.map_err(|_| Error::ValidationError(format!("site id out of range: {}", scope)))
}

/// Read a single setting by name
pub(crate) async fn read(
	db: &SqlitePool,
	scope: Scope,
	name: &str,
) -> XResult<Option<serde_json::Value>> {
	let row = sqlx::query("SELECT value FROM settings WHERE site_id = ? AND name = ?")
		.bind(scope_id(scope)?)
		.bind(name)
		.fetch_optional(db)
		.await
		.inspect_err(|err| warn!("DB: {:#?}", err))
		.map_err(|_| Error::DbError)?;

	let Some(row) = row else {
		return Ok(None);
	};
	let value: Option<String> = row.try_get("value").map_err(|_| Error::DbError)?;
	match value {
		Some(value) => Ok(Some(serde_json::from_str(&value)?)),
		None => Ok(None),
	}
}

/// Update or create a setting
pub(crate) async fn update(
	db: &SqlitePool,
	scope: Scope,
	name: &str,
	value: &serde_json::Value,
) -> XResult<()> {
	sqlx::query("INSERT OR REPLACE INTO settings (site_id, name, value) VALUES (?, ?, ?)")
		.bind(scope_id(scope)?)
		.bind(name)
		.bind(value.to_string())
		.execute(db)
		.await
		.inspect_err(|err| warn!("DB: {:#?}", err))
		.map_err(|_| Error::DbError)?;

	Ok(())
}

/// Insert a setting unless one exists, then return the stored value
pub(crate) async fn create_if_absent(
	db: &SqlitePool,
	scope: Scope,
	name: &str,
	default: &serde_json::Value,
) -> XResult<serde_json::Value> {
	let res = sqlx::query("INSERT OR IGNORE INTO settings (site_id, name, value) VALUES (?, ?, ?)")
		.bind(scope_id(scope)?)
		.bind(name)
		.bind(default.to_string())
		.execute(db)
		.await
		.inspect_err(|err| warn!("DB: {:#?}", err))
		.map_err(|_| Error::DbError)?;

	if res.rows_affected() > 0 {
		debug!("Created default setting '{}' in {}", name, scope);
	}

	read(db, scope, name).await?.ok_or_else(|| {
		warn!("DB: setting '{}' in {} has no value after insert", name, scope);
		Error::DbError
	})
}

// vim: ts=4

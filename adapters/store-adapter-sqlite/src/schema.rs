//! Database schema initialization

use sqlx::SqlitePool;

/// Create the settings table if it does not exist yet
pub(crate) async fn init_db(db: &SqlitePool) -> Result<(), sqlx::Error> {
	let mut tx = db.begin().await?;

	// Settings
	//**********
	// site_id 0 holds the network scope
	sqlx::query(
		"CREATE TABLE IF NOT EXISTS settings (
		site_id integer NOT NULL,
		name text NOT NULL,
		value text,
		PRIMARY KEY(site_id, name)
	)",
	)
	.execute(&mut *tx)
	.await?;

	tx.commit().await?;

	Ok(())
}

// vim: ts=4

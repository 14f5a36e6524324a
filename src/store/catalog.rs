use rusqlite::Connection;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use super::data::{CartItem, ImageRecord};
use crate::error::{CatalogError, Result};

/// Current schema version, stored in SQLite's `user_version` pragma.
const SCHEMA_VERSION: i32 = 1;

/// The Catalog manages the SQLite database behind the gallery.
///
/// It owns two tables: `images` (the seeded photo collection) and `cart`
/// (the user's persisted selection basket). The database is seeded exactly
/// once, the first time it is created; reopening an existing database never
/// re-runs the seed.
pub struct Catalog {
    conn: Connection,
    db_path: PathBuf,
}

impl Catalog {
    /// Open or create the catalog database at `path`.
    ///
    /// Equivalent to [`Catalog::open_with_seed`] with a seeder that does
    /// nothing, so a brand-new database starts empty.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::open_with_seed(path, |_| Ok(0))
    }

    /// Open or create the catalog database, seeding it on first creation.
    ///
    /// `seeder` runs exactly once per database lifetime: only when the file
    /// is brand new (schema version 0), and before `open_with_seed` returns,
    /// so no consumer can observe a half-seeded store. A failed seed is
    /// logged and leaves the store empty; it is not retried on later opens,
    /// matching the populate-once contract.
    ///
    /// Open failure itself is fatal and propagates to the caller.
    pub fn open_with_seed<F>(path: impl AsRef<Path>, seeder: F) -> Result<Self>
    where
        F: FnOnce(&mut Catalog) -> Result<usize>,
    {
        let db_path = path.as_ref().to_path_buf();

        // Ensure the parent directory exists
        if let Some(parent) = db_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(&db_path)?;
        let version: i32 = conn.query_row("PRAGMA user_version", [], |row| row.get(0))?;
        let fresh = version == 0;

        let mut catalog = Catalog { conn, db_path };
        catalog.init_schema()?;

        if fresh {
            match seeder(&mut catalog) {
                Ok(count) => info!(count, "seeded new catalog"),
                // The version is bumped below regardless, so a bad bulk
                // source leaves the store empty for good rather than
                // retrying on every launch.
                Err(e) => warn!("initial seed failed, catalog left empty: {e}"),
            }
            catalog
                .conn
                .pragma_update(None, "user_version", SCHEMA_VERSION)?;
        }

        debug!(path = %catalog.db_path.display(), "catalog opened");
        Ok(catalog)
    }

    /// Default database location under the user's data directory,
    /// e.g. `~/.local/share/lightbox/lightbox.db` on Linux.
    pub fn default_db_path() -> Result<PathBuf> {
        let mut path = dirs::data_dir()
            .or_else(dirs::home_dir)
            .ok_or(CatalogError::NoDataDir)?;
        path.push("lightbox");
        path.push("lightbox.db");
        Ok(path)
    }

    /// Create all tables and indexes if they don't exist.
    fn init_schema(&mut self) -> Result<()> {
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS images (
                id          INTEGER PRIMARY KEY AUTOINCREMENT,
                title       TEXT NOT NULL,
                url         TEXT NOT NULL,
                weight      REAL,
                added_at    INTEGER NOT NULL
            )",
            [],
        )?;

        self.conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_images_title ON images(title)",
            [],
        )?;
        self.conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_images_url ON images(url)",
            [],
        )?;

        // Basket identity is supplied by the caller, not AUTOINCREMENT.
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS cart (
                id          INTEGER PRIMARY KEY,
                image_id    INTEGER NOT NULL,
                title       TEXT NOT NULL,
                url         TEXT NOT NULL,
                weight      REAL,
                image_data  TEXT NOT NULL,
                file_size   INTEGER NOT NULL,
                added_at    INTEGER NOT NULL
            )",
            [],
        )?;

        // One basket entry per source image, enforced at the store level
        // as a backstop for the toggle semantics in the gallery.
        self.conn.execute(
            "CREATE UNIQUE INDEX IF NOT EXISTS idx_cart_image_id ON cart(image_id)",
            [],
        )?;
        self.conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_cart_title ON cart(title)",
            [],
        )?;
        self.conn
            .execute("CREATE INDEX IF NOT EXISTS idx_cart_url ON cart(url)", [])?;

        Ok(())
    }

    /// Get the path to the database file
    pub fn path(&self) -> &PathBuf {
        &self.db_path
    }

    /// Insert a batch of seed records into `images` in one transaction.
    ///
    /// Returns the number of rows inserted. Ids are assigned by SQLite.
    pub fn bulk_insert_images(&mut self, records: &[super::seed::SeedRecord]) -> Result<usize> {
        let now = chrono::Utc::now().timestamp();
        let tx = self.conn.transaction()?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO images (title, url, weight, added_at) VALUES (?1, ?2, ?3, ?4)",
            )?;
            for record in records {
                stmt.execute(rusqlite::params![
                    record.title,
                    record.url,
                    record.weight,
                    now
                ])?;
            }
        }
        tx.commit()?;
        Ok(records.len())
    }

    /// Get all images, oldest first (seeding order).
    pub fn all_images(&self) -> Result<Vec<ImageRecord>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, title, url, weight, added_at FROM images ORDER BY id")?;

        let rows = stmt.query_map([], |row| {
            Ok(ImageRecord {
                id: row.get(0)?,
                title: row.get(1)?,
                url: row.get(2)?,
                weight: row.get(3)?,
                added_at: row.get(4)?,
            })
        })?;

        let mut images = Vec::new();
        for image in rows {
            images.push(image?);
        }
        Ok(images)
    }

    /// Get one image by id.
    pub fn image(&self, id: i64) -> Result<ImageRecord> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, title, url, weight, added_at FROM images WHERE id = ?1")?;

        let mut rows = stmt.query_map([id], |row| {
            Ok(ImageRecord {
                id: row.get(0)?,
                title: row.get(1)?,
                url: row.get(2)?,
                weight: row.get(3)?,
                added_at: row.get(4)?,
            })
        })?;

        match rows.next() {
            Some(image) => Ok(image?),
            None => Err(CatalogError::UnknownImage(id)),
        }
    }

    /// Scan the image collection, keeping records the predicate accepts.
    ///
    /// The store itself is never mutated by a filter.
    pub fn filter_images<P>(&self, predicate: P) -> Result<Vec<ImageRecord>>
    where
        P: Fn(&ImageRecord) -> bool,
    {
        let mut images = self.all_images()?;
        images.retain(|image| predicate(image));
        Ok(images)
    }

    /// Upsert a basket entry by its basket-local id.
    ///
    /// A second entry for the same source image violates the unique
    /// `image_id` index and is rejected rather than silently replacing
    /// the existing row.
    pub fn put_cart_item(&self, item: &CartItem) -> Result<()> {
        self.conn.execute(
            "INSERT INTO cart (id, image_id, title, url, weight, image_data, file_size, added_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
             ON CONFLICT(id) DO UPDATE SET
                image_id = excluded.image_id,
                title = excluded.title,
                url = excluded.url,
                weight = excluded.weight,
                image_data = excluded.image_data,
                file_size = excluded.file_size,
                added_at = excluded.added_at",
            rusqlite::params![
                item.id,
                item.image_id,
                item.title,
                item.url,
                item.weight,
                item.image_data,
                item.file_size as i64,
                item.added_at,
            ],
        )?;
        Ok(())
    }

    /// Delete a basket entry by its basket-local id.
    pub fn delete_cart_item(&self, id: i64) -> Result<()> {
        self.conn.execute("DELETE FROM cart WHERE id = ?1", [id])?;
        Ok(())
    }

    /// Get all basket entries, oldest first.
    pub fn all_cart_items(&self) -> Result<Vec<CartItem>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, image_id, title, url, weight, image_data, file_size, added_at
             FROM cart ORDER BY id",
        )?;

        let rows = stmt.query_map([], |row| {
            Ok(CartItem {
                id: row.get(0)?,
                image_id: row.get(1)?,
                title: row.get(2)?,
                url: row.get(3)?,
                weight: row.get(4)?,
                image_data: row.get(5)?,
                file_size: row.get::<_, i64>(6)? as u64,
                added_at: row.get(7)?,
            })
        })?;

        let mut items = Vec::new();
        for item in rows {
            items.push(item?);
        }
        Ok(items)
    }

    /// Next free basket-local id.
    ///
    /// `MAX(id) + 1` only ever reuses an id after the row that held it is
    /// gone, so ids stay unique at insertion time even after removals.
    pub fn next_cart_id(&self) -> Result<i64> {
        let next: i64 =
            self.conn
                .query_row("SELECT COALESCE(MAX(id), 0) + 1 FROM cart", [], |row| {
                    row.get(0)
                })?;
        Ok(next)
    }

    /// Count of images in the catalog
    pub fn image_count(&self) -> Result<i64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM images", [], |row| row.get(0))?;
        Ok(count)
    }

    /// Count of basket entries
    pub fn cart_count(&self) -> Result<i64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM cart", [], |row| row.get(0))?;
        Ok(count)
    }
}

// Implement Debug for better error messages
impl std::fmt::Debug for Catalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Catalog")
            .field("db_path", &self.db_path)
            .finish()
    }
}

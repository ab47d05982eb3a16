//! Photo record storage

use sqlx::sqlite::{SqlitePool, SqliteRow};
use std::path::Path;

use crate::error::Result;
use crate::types::PhotoRecord;

#[derive(Clone)]
pub struct PhotoStore {
    pool: SqlitePool,
}

impl PhotoStore {
    /// Open (or create) the photo database at the given path
    pub async fn connect(db_path: &str) -> Result<Self> {
        // Expand path and create parent directories
        let expanded_path = shellexpand::tilde(db_path).to_string();
        let path = Path::new(&expanded_path);

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(crate::error::StoreError::IoError)?;
        }

        // Use forward slashes for SQLite URL (works on both Windows and Unix)
        // Use mode=rwc to allow creating the database file if it doesn't exist
        let db_url = format!("sqlite://{}?mode=rwc", expanded_path.replace('\\', "/"));

        let pool = SqlitePool::connect(&db_url)
            .await
            .map_err(crate::error::StoreError::SqlxError)?;

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .map_err(crate::error::StoreError::MigrationError)?;

        Ok(Self { pool })
    }

    /// Photos flagged as birds that have not been posted since the cutoff.
    ///
    /// `posted_before = None` drops the cooldown filter and returns every
    /// bird photo. Never-posted photos always qualify.
    pub async fn select_postable(&self, posted_before: Option<i64>) -> Result<Vec<PhotoRecord>> {
        let mut where_clauses = vec!["is_bird = 1"];

        if posted_before.is_some() {
            where_clauses.push("(last_posted IS NULL OR last_posted <= ?)");
        }

        let query_str = format!(
            r#"
            SELECT name, title, ownername, download_url, is_bird, last_posted, updated_at
            FROM photos
            WHERE {}
            ORDER BY name ASC
            "#,
            where_clauses.join(" AND ")
        );

        let mut query = sqlx::query(&query_str);
        if let Some(cutoff) = posted_before {
            query = query.bind(cutoff);
        }

        let rows = query
            .fetch_all(&self.pool)
            .await
            .map_err(crate::error::StoreError::SqlxError)?;

        Ok(rows.iter().map(photo_from_row).collect())
    }

    /// Get a photo by its record name
    pub async fn get_photo(&self, name: &str) -> Result<Option<PhotoRecord>> {
        let row = sqlx::query(
            r#"
            SELECT name, title, ownername, download_url, is_bird, last_posted, updated_at
            FROM photos WHERE name = ?
            "#,
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(crate::error::StoreError::SqlxError)?;

        Ok(row.as_ref().map(photo_from_row))
    }

    /// Insert or update photos, keyed by record name
    pub async fn upsert_photos(&self, photos: &[PhotoRecord]) -> Result<()> {
        for photo in photos {
            let is_bird = if photo.is_bird { 1 } else { 0 };

            sqlx::query(
                r#"
                INSERT INTO photos (name, title, ownername, download_url, is_bird, last_posted, updated_at)
                VALUES (?, ?, ?, ?, ?, ?, ?)
                ON CONFLICT(name) DO UPDATE SET
                    title = excluded.title,
                    ownername = excluded.ownername,
                    download_url = excluded.download_url,
                    is_bird = excluded.is_bird,
                    last_posted = excluded.last_posted,
                    updated_at = excluded.updated_at
                "#,
            )
            .bind(&photo.name)
            .bind(&photo.title)
            .bind(&photo.ownername)
            .bind(&photo.download_url)
            .bind(is_bird)
            .bind(photo.last_posted)
            .bind(photo.updated_at)
            .execute(&self.pool)
            .await
            .map_err(crate::error::StoreError::SqlxError)?;
        }

        Ok(())
    }
}

fn photo_from_row(r: &SqliteRow) -> PhotoRecord {
    use sqlx::Row;

    PhotoRecord {
        name: r.get("name"),
        title: r.get("title"),
        ownername: r.get("ownername"),
        download_url: r.get("download_url"),
        is_bird: r.get::<i64, _>("is_bird") != 0,
        last_posted: r.get("last_posted"),
        updated_at: r.get("updated_at"),
    }
}

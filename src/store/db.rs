// (C) Coralbits SL 2025
// This file is part of Techlabs Pages and is licensed under the
// GNU Affero General Public License v3.0.
// A commercial license on request is also available;
// contact info@coralbits.com for details.

use anyhow::Result;
use async_trait::async_trait;
use sqlx::{
    sqlite::{SqlitePool, SqlitePoolOptions},
    Executor, Row,
};
use tracing::{debug, info};

use crate::page::types::{media_url, Page};
use crate::store::traits::PageStore;

/// SQLite backed store: `pages` rows point at their thumbnail in `media`.
pub struct DbStore {
    name: String,
    media_base_url: String,
    db: SqlitePool,
}

impl DbStore {
    pub async fn new(name: &str, url: &str, media_base_url: &str) -> Result<Self> {
        info!("Connecting to database at url={}", url);
        let db = if url.contains(":memory:") {
            // every connection would get its own empty database
            SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None::<std::time::Duration>)
                .max_lifetime(None::<std::time::Duration>)
                .connect(url)
                .await?
        } else {
            if url.starts_with("sqlite://") {
                let path = url.trim_start_matches("sqlite://");
                if !std::path::Path::new(path).exists() {
                    debug!("Creating new SQLite database file at {}", path);
                    std::fs::File::create(path)?;
                }
            }
            SqlitePool::connect(url).await?
        };
        let ret = Self {
            name: name.to_string(),
            media_base_url: media_base_url.to_string(),
            db,
        };

        ret.init().await?;

        Ok(ret)
    }

    async fn init(&self) -> Result<()> {
        let mut tx = self.db.begin().await?;
        tx.execute("CREATE TABLE IF NOT EXISTS media (id INTEGER PRIMARY KEY, path TEXT NOT NULL)")
            .await?;
        tx.execute(
            "CREATE TABLE IF NOT EXISTS pages (id INTEGER PRIMARY KEY, kind TEXT NOT NULL DEFAULT 'page', title TEXT NOT NULL DEFAULT '', content TEXT NOT NULL DEFAULT '', thumbnail_id INTEGER REFERENCES media(id))",
        )
        .await?;
        tx.commit().await?;
        Ok(())
    }

    pub async fn insert_media(&self, path: &str) -> Result<i64> {
        let rec = sqlx::query(r#"INSERT INTO media (path) VALUES (?)"#)
            .bind(path)
            .execute(&self.db)
            .await?;
        Ok(rec.last_insert_rowid())
    }

    /// Inserts or replaces a record; a thumbnail path gets its own media row.
    pub async fn insert_page(&self, page: &Page) -> Result<()> {
        let id = i64::try_from(page.id)?;
        let thumbnail_id = match &page.thumbnail {
            Some(path) => Some(self.insert_media(path).await?),
            None => None,
        };
        sqlx::query(
            r#"INSERT OR REPLACE INTO pages (id, kind, title, content, thumbnail_id) VALUES (?, ?, ?, ?, ?)"#,
        )
        .bind(id)
        .bind(&page.kind)
        .bind(&page.title)
        .bind(&page.content)
        .bind(thumbnail_id)
        .execute(&self.db)
        .await?;
        Ok(())
    }
}

#[async_trait]
impl PageStore for DbStore {
    fn name(&self) -> &str {
        &self.name
    }

    async fn get_page(&self, id: u64) -> anyhow::Result<Option<Page>> {
        // ids past i64::MAX cannot be stored
        let Ok(id) = i64::try_from(id) else {
            return Ok(None);
        };
        let rec = sqlx::query(
            r#"SELECT p.id, p.kind, p.title, p.content, m.path AS thumbnail
               FROM pages p LEFT JOIN media m ON m.id = p.thumbnail_id
               WHERE p.id = ?"#,
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await?;

        let Some(rec) = rec else {
            debug!("No page record for id={}", id);
            return Ok(None);
        };
        Ok(Some(Page {
            id: rec.try_get::<i64, _>("id")? as u64,
            kind: rec.try_get("kind")?,
            title: rec.try_get("title")?,
            content: rec.try_get("content")?,
            thumbnail: rec.try_get("thumbnail")?,
        }))
    }

    async fn thumbnail_url(&self, id: u64) -> anyhow::Result<Option<String>> {
        let Ok(id) = i64::try_from(id) else {
            return Ok(None);
        };
        let rec = sqlx::query(
            r#"SELECT m.path FROM pages p JOIN media m ON m.id = p.thumbnail_id WHERE p.id = ?"#,
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await?;
        match rec {
            Some(rec) => {
                let path: String = rec.try_get("path")?;
                Ok(Some(media_url(&self.media_base_url, &path)))
            }
            None => Ok(None),
        }
    }
}

//! # blog-db
//!
//! libSQL storage and the article engine for the blog backend.
//!
//! Holds the relational state (articles with their ordered tag set,
//! categories, tags, comments) and every operation over it: the list-query
//! builder, the reference resolver, the article lifecycle, related/sibling
//! resolution, archives and statistics. All operations are methods on
//! [`service::BlogService`], grouped per entity under [`repos`].

pub mod error;
pub mod helpers;
pub mod inputs;
mod migrations;
pub mod query;
pub mod repos;
pub mod service;

#[cfg(test)]
mod test_support;

use std::ops::Deref;

use blog_core::ids::GENERATE_ID_SQL;
use error::DatabaseError;
use libsql::Builder;
use tokio::sync::{Mutex, MutexGuard};

/// Central database handle.
///
/// Wraps a libSQL database and its single connection. Every statement that
/// writes goes through [`Self::write_lock`] or [`Self::transaction`], so at
/// most one transaction is open on the connection and no other writer's
/// statements run inside it.
pub struct BlogDb {
    #[allow(dead_code)]
    db: libsql::Database,
    conn: libsql::Connection,
    writer: Mutex<()>,
}

/// A transaction that holds the write lock until it commits or drops.
///
/// Dropping without [`Self::commit`] rolls back, then releases the lock.
pub struct WriteTransaction<'a> {
    tx: libsql::Transaction,
    _writer: MutexGuard<'a, ()>,
}

impl WriteTransaction<'_> {
    /// Commit and release the write lock.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the commit fails.
    pub async fn commit(self) -> Result<(), DatabaseError> {
        self.tx.commit().await?;
        Ok(())
    }
}

impl Deref for WriteTransaction<'_> {
    type Target = libsql::Transaction;

    fn deref(&self) -> &Self::Target {
        &self.tx
    }
}

impl BlogDb {
    /// Open a local database at the given path (`":memory:"` for tests).
    ///
    /// Runs migrations automatically on open.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened or
    /// migrations fail.
    pub async fn open_local(path: &str) -> Result<Self, DatabaseError> {
        let db = Builder::new_local(path).build().await?;
        let conn = db.connect()?;

        // Enable foreign keys (must be per-connection in SQLite)
        conn.execute("PRAGMA foreign_keys = ON", ())
            .await
            .map_err(|e| DatabaseError::Migration(format!("PRAGMA foreign_keys: {e}")))?;

        let blog_db = Self {
            db,
            conn,
            writer: Mutex::new(()),
        };
        blog_db.run_migrations().await?;
        Ok(blog_db)
    }

    /// Access the underlying libSQL connection for direct queries.
    #[must_use]
    pub const fn conn(&self) -> &libsql::Connection {
        &self.conn
    }

    /// Wait for exclusive write access to the connection.
    pub async fn write_lock(&self) -> MutexGuard<'_, ()> {
        self.writer.lock().await
    }

    /// Begin a transaction under the write lock.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if `BEGIN` fails.
    pub async fn transaction(&self) -> Result<WriteTransaction<'_>, DatabaseError> {
        let writer = self.writer.lock().await;
        let tx = self.conn.transaction().await?;
        Ok(WriteTransaction {
            tx,
            _writer: writer,
        })
    }

    /// Generate a 24-hex document identifier via libSQL.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails or returns no rows.
    pub async fn generate_id(&self) -> Result<String, DatabaseError> {
        let mut rows = self.conn.query(GENERATE_ID_SQL, ()).await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        Ok(row.get::<String>(0)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blog_core::ids::{NOT_FOUND_ID, is_identifier};
    use std::collections::HashSet;

    async fn test_db() -> BlogDb {
        BlogDb::open_local(":memory:").await.unwrap()
    }

    #[tokio::test]
    async fn open_local_creates_schema() {
        let db = test_db().await;
        for table in ["categories", "tags", "articles", "article_tags", "comments"] {
            let mut rows = db
                .conn()
                .query(
                    "SELECT name FROM sqlite_master WHERE type='table' AND name=?1",
                    [table],
                )
                .await
                .unwrap();
            assert!(rows.next().await.unwrap().is_some(), "table '{table}' should exist");
        }
    }

    #[tokio::test]
    async fn migrations_are_idempotent() {
        let db = test_db().await;
        db.run_migrations().await.unwrap();
        db.run_migrations().await.unwrap();
    }

    #[tokio::test]
    async fn foreign_keys_enabled() {
        let db = test_db().await;
        let mut rows = db.conn().query("PRAGMA foreign_keys", ()).await.unwrap();
        let row = rows.next().await.unwrap().unwrap();
        assert_eq!(row.get::<i64>(0).unwrap(), 1);
    }

    #[tokio::test]
    async fn generate_id_shape_and_uniqueness() {
        let db = test_db().await;
        let mut seen = HashSet::new();
        for _ in 0..100 {
            let id = db.generate_id().await.unwrap();
            assert!(is_identifier(&id), "bad id {id}");
            assert_ne!(id, NOT_FOUND_ID);
            assert_eq!(id, id.to_lowercase());
            seen.insert(id);
        }
        assert_eq!(seen.len(), 100);
    }

    #[tokio::test]
    async fn state_check_constraint_rejects_unknown_values() {
        let db = test_db().await;
        let result = db
            .conn()
            .execute(
                "INSERT INTO articles (id, title, content, state, created_at, updated_at)
                 VALUES ('a', 't', 'c', 2, 'x', 'x')",
                (),
            )
            .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn dropped_transaction_rolls_back_and_releases_the_lock() {
        let db = test_db().await;
        {
            let tx = db.transaction().await.unwrap();
            tx.execute(
                "INSERT INTO tags (id, name, created_at, updated_at) VALUES ('t', 'rust', 'x', 'x')",
                (),
            )
            .await
            .unwrap();
        }
        let tx = db.transaction().await.unwrap();
        tx.commit().await.unwrap();
        let mut rows = db.conn().query("SELECT count(*) FROM tags", ()).await.unwrap();
        assert_eq!(rows.next().await.unwrap().unwrap().get::<i64>(0).unwrap(), 0);
    }

    #[tokio::test]
    async fn file_backed_store_persists_across_opens() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("blog.db");
        let path = path.to_str().unwrap();
        {
            let db = BlogDb::open_local(path).await.unwrap();
            db.conn()
                .execute(
                    "INSERT INTO tags (id, name, created_at, updated_at) VALUES ('t', 'rust', 'x', 'x')",
                    (),
                )
                .await
                .unwrap();
        }
        let db = BlogDb::open_local(path).await.unwrap();
        let mut rows = db.conn().query("SELECT count(*) FROM tags", ()).await.unwrap();
        assert_eq!(rows.next().await.unwrap().unwrap().get::<i64>(0).unwrap(), 1);
    }
}

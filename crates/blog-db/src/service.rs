//! Service layer owning the database handle and the blog settings.
//!
//! All repo methods are implemented as `impl BlogService` blocks under
//! [`crate::repos`]. The service holds no mutable in-process state; every
//! operation is an independent sequence of storage calls.

use blog_config::BlogSettings;

use crate::BlogDb;
use crate::error::DatabaseError;

pub struct BlogService {
    db: BlogDb,
    settings: BlogSettings,
}

impl BlogService {
    /// Open (or create) the store at `db_path` and wrap it.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened or migrated.
    pub async fn new_local(db_path: &str, settings: BlogSettings) -> Result<Self, DatabaseError> {
        let db = BlogDb::open_local(db_path).await?;
        Ok(Self::from_db(db, settings))
    }

    /// Create from an existing `BlogDb`.
    #[must_use]
    pub const fn from_db(db: BlogDb, settings: BlogSettings) -> Self {
        Self { db, settings }
    }

    #[must_use]
    pub const fn db(&self) -> &BlogDb {
        &self.db
    }

    #[must_use]
    pub const fn settings(&self) -> &BlogSettings {
        &self.settings
    }
}

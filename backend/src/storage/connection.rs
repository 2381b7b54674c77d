use sqlx::{
    migrate::MigrateDatabase,
    sqlite::SqlitePoolOptions,
    Sqlite, SqlitePool,
};
use tracing::info;

use crate::error::Result;

/// DbConnection is the explicit database handle shared by the repositories.
///
/// Cloning is cheap: every clone refers to the same underlying pool.
#[derive(Clone)]
pub struct DbConnection {
    pool: SqlitePool,
}

impl DbConnection {
    /// Open the database at `url`, creating the file and schema if missing
    pub async fn connect(url: &str, max_connections: u32) -> Result<Self> {
        // In-memory databases have nothing to create on disk
        if !url.contains("mode=memory") && !Sqlite::database_exists(url).await.unwrap_or(false) {
            info!("Creating database at {}", url);
            Sqlite::create_database(url).await?;
        }

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections.max(1))
            .connect(url)
            .await?;

        Self::setup_schema(&pool).await?;

        Ok(Self { pool })
    }

    /// Open a private in-memory database with a unique name
    pub async fn in_memory() -> Result<Self> {
        let test_id = uuid::Uuid::new_v4().to_string();
        let db_url = format!("sqlite:file:memdb_{}?mode=memory&cache=shared", test_id);

        Self::connect(&db_url, 1).await
    }

    /// Set up the required database schema
    async fn setup_schema(pool: &SqlitePool) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS children (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL
            );
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS chores (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                description TEXT NOT NULL
            );
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS chore_assignments (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                child_id INTEGER NOT NULL REFERENCES children(id),
                chore_id INTEGER NOT NULL REFERENCES chores(id),
                weekday TEXT NOT NULL CHECK (weekday IN (
                    'monday', 'tuesday', 'wednesday', 'thursday',
                    'friday', 'saturday', 'sunday'
                )),
                status TEXT NOT NULL DEFAULT 'pending' CHECK (status IN ('pending', 'done')),
                updated_on TEXT
            );
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS idx_chore_assignments_child_weekday
            ON chore_assignments(child_id, weekday);
            "#,
        )
        .execute(pool)
        .await?;

        Ok(())
    }

    /// Get the underlying SQLite pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Release every pooled connection
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

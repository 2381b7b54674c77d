use sqlx::Row;
use shared::{Child, ChoreDefinition};

use crate::error::Result;
use crate::storage::connection::DbConnection;

/// Repository for children and chore definitions
#[derive(Clone)]
pub struct ChildRepository {
    db: DbConnection,
}

impl ChildRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    /// List all children in registration order
    pub async fn list_children(&self) -> Result<Vec<Child>> {
        let rows = sqlx::query(
            r#"
            SELECT id, name
            FROM children
            ORDER BY id ASC
            "#,
        )
        .fetch_all(self.db.pool())
        .await?;

        let children = rows
            .iter()
            .map(|row| Child {
                id: row.get("id"),
                name: row.get("name"),
            })
            .collect();

        Ok(children)
    }

    /// Register a child. Children are normally administered directly in the
    /// database; this exists for seeding.
    pub async fn insert_child(&self, name: &str) -> Result<Child> {
        let result = sqlx::query("INSERT INTO children (name) VALUES (?)")
            .bind(name)
            .execute(self.db.pool())
            .await?;

        Ok(Child {
            id: result.last_insert_rowid(),
            name: name.to_string(),
        })
    }

    /// Register a chore definition
    pub async fn insert_chore(&self, description: &str) -> Result<ChoreDefinition> {
        let result = sqlx::query("INSERT INTO chores (description) VALUES (?)")
            .bind(description)
            .execute(self.db.pool())
            .await?;

        Ok(ChoreDefinition {
            id: result.last_insert_rowid(),
            description: description.to_string(),
        })
    }
}

use chrono::{NaiveDate, Weekday};
use shared::ChoreStatus;
use sqlx::{sqlite::SqliteRow, Row};

use crate::domain::chore_state::{Assignment, AssignmentState};
use crate::domain::digest::DigestEntry;
use crate::domain::weekday::{parse_weekday_key, weekday_key};
use crate::error::Result;
use crate::storage::connection::DbConnection;

/// Repository for the weekly chore assignment rows
#[derive(Clone)]
pub struct AssignmentRepository {
    db: DbConnection,
}

impl AssignmentRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    /// Create an assignment row, returning its id
    pub async fn insert_assignment(
        &self,
        child_id: i64,
        chore_id: i64,
        weekday: Weekday,
        state: AssignmentState,
    ) -> Result<i64> {
        let result = sqlx::query(
            r#"
            INSERT INTO chore_assignments (child_id, chore_id, weekday, status, updated_on)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(child_id)
        .bind(chore_id)
        .bind(weekday_key(weekday))
        .bind(state.status.as_str())
        .bind(state.updated_on)
        .execute(self.db.pool())
        .await?;

        Ok(result.last_insert_rowid())
    }

    /// Get an assignment by ID
    pub async fn get_assignment(&self, assignment_id: i64) -> Result<Option<Assignment>> {
        let row = sqlx::query(
            r#"
            SELECT a.id, a.child_id, a.chore_id, c.description, a.weekday, a.status, a.updated_on
            FROM chore_assignments AS a
            JOIN chores AS c ON a.chore_id = c.id
            WHERE a.id = ?
            "#,
        )
        .bind(assignment_id)
        .fetch_optional(self.db.pool())
        .await?;

        row.as_ref().map(map_assignment).transpose()
    }

    /// Every row a child has on `weekday`, whatever its status
    pub async fn list_for_child(&self, child_id: i64, weekday: Weekday) -> Result<Vec<Assignment>> {
        let rows = sqlx::query(
            r#"
            SELECT a.id, a.child_id, a.chore_id, c.description, a.weekday, a.status, a.updated_on
            FROM chore_assignments AS a
            JOIN chores AS c ON a.chore_id = c.id
            WHERE a.child_id = ? AND a.weekday = ?
            ORDER BY a.id
            "#,
        )
        .bind(child_id)
        .bind(weekday_key(weekday))
        .fetch_all(self.db.pool())
        .await?;

        rows.iter().map(map_assignment).collect()
    }

    /// Read transition: the rows a child still has to do today.
    ///
    /// A row qualifies when it was not written today (its status is stale)
    /// or when it is pending. Rows completed today are left out.
    pub async fn actionable_for_child(
        &self,
        child_id: i64,
        weekday: Weekday,
        today: NaiveDate,
    ) -> Result<Vec<Assignment>> {
        let rows = sqlx::query(
            r#"
            SELECT a.id, a.child_id, a.chore_id, c.description, a.weekday, a.status, a.updated_on
            FROM chore_assignments AS a
            JOIN chores AS c ON a.chore_id = c.id
            WHERE a.child_id = ?
              AND a.weekday = ?
              AND (a.updated_on IS NULL OR a.updated_on <> ? OR a.status = 'pending')
            ORDER BY a.id
            "#,
        )
        .bind(child_id)
        .bind(weekday_key(weekday))
        .bind(today)
        .fetch_all(self.db.pool())
        .await?;

        rows.iter().map(map_assignment).collect()
    }

    /// Read transition across all children, joined with child names.
    /// Ordered by child, then by assignment.
    pub async fn actionable_entries(&self, weekday: Weekday, today: NaiveDate) -> Result<Vec<DigestEntry>> {
        let rows = sqlx::query(
            r#"
            SELECT ch.name AS child_name, c.description AS chore
            FROM chore_assignments AS a
            JOIN children AS ch ON a.child_id = ch.id
            JOIN chores AS c ON a.chore_id = c.id
            WHERE a.weekday = ?
              AND (a.updated_on IS NULL OR a.updated_on <> ? OR a.status = 'pending')
            ORDER BY ch.id, a.id
            "#,
        )
        .bind(weekday_key(weekday))
        .bind(today)
        .fetch_all(self.db.pool())
        .await?;

        let entries = rows
            .iter()
            .map(|row| DigestEntry {
                child_name: row.get("child_name"),
                chore: row.get("chore"),
            })
            .collect();

        Ok(entries)
    }

    /// Write transition. Sets the status and stamps `today`.
    /// Returns false when no row has that id.
    pub async fn mark(&self, assignment_id: i64, status: ChoreStatus, today: NaiveDate) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE chore_assignments
            SET status = ?, updated_on = ?
            WHERE id = ?
            "#,
        )
        .bind(status.as_str())
        .bind(today)
        .bind(assignment_id)
        .execute(self.db.pool())
        .await?;

        Ok(result.rows_affected() > 0)
    }
}

fn map_assignment(row: &SqliteRow) -> Result<Assignment> {
    let status: String = row.try_get("status")?;
    let weekday: String = row.try_get("weekday")?;

    Ok(Assignment {
        id: row.try_get("id")?,
        child_id: row.try_get("child_id")?,
        chore_id: row.try_get("chore_id")?,
        description: row.try_get("description")?,
        weekday: parse_weekday_key(&weekday)?,
        state: AssignmentState::new(status.parse()?, row.try_get("updated_on")?),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::repositories::ChildRepository;
    use chrono::Duration;

    struct Fixture {
        children: ChildRepository,
        assignments: AssignmentRepository,
    }

    async fn setup_test() -> Fixture {
        let db = DbConnection::in_memory().await.expect("Failed to create test database");
        Fixture {
            children: ChildRepository::new(db.clone()),
            assignments: AssignmentRepository::new(db),
        }
    }

    // 2025-06-09 is a Monday
    fn monday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 9).unwrap()
    }

    impl Fixture {
        async fn assign(&self, child_id: i64, chore: &str, weekday: Weekday, state: AssignmentState) -> i64 {
            let chore = self.children.insert_chore(chore).await.unwrap();
            self.assignments
                .insert_assignment(child_id, chore.id, weekday, state)
                .await
                .unwrap()
        }
    }

    #[tokio::test]
    async fn test_stale_rows_are_returned_regardless_of_status() {
        let f = setup_test().await;
        let ana = f.children.insert_child("Ana").await.unwrap();
        let last_week = monday() - Duration::days(7);
        let yesterday = monday() - Duration::days(1);

        f.assign(ana.id, "Dishes", Weekday::Mon, AssignmentState::new(ChoreStatus::Done, Some(last_week)))
            .await;
        f.assign(ana.id, "Homework", Weekday::Mon, AssignmentState::new(ChoreStatus::Pending, Some(yesterday)))
            .await;
        f.assign(ana.id, "Bed", Weekday::Mon, AssignmentState::new(ChoreStatus::Done, None))
            .await;

        let rows = f
            .assignments
            .actionable_for_child(ana.id, Weekday::Mon, monday())
            .await
            .unwrap();

        let descriptions: Vec<_> = rows.iter().map(|a| a.description.as_str()).collect();
        assert_eq!(descriptions, vec!["Dishes", "Homework", "Bed"]);
    }

    #[tokio::test]
    async fn test_rows_written_today_are_returned_only_when_pending() {
        let f = setup_test().await;
        let ana = f.children.insert_child("Ana").await.unwrap();

        f.assign(ana.id, "Dishes", Weekday::Mon, AssignmentState::new(ChoreStatus::Pending, Some(monday())))
            .await;
        f.assign(ana.id, "Homework", Weekday::Mon, AssignmentState::new(ChoreStatus::Done, Some(monday())))
            .await;

        let rows = f
            .assignments
            .actionable_for_child(ana.id, Weekday::Mon, monday())
            .await
            .unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].description, "Dishes");
    }

    #[tokio::test]
    async fn test_sql_read_transition_matches_state_rule() {
        let f = setup_test().await;
        let ana = f.children.insert_child("Ana").await.unwrap();
        let dates = [None, Some(monday() - Duration::days(7)), Some(monday()), Some(monday() + Duration::days(1))];

        for (i, updated_on) in dates.iter().enumerate() {
            for status in [ChoreStatus::Pending, ChoreStatus::Done] {
                f.assign(ana.id, &format!("chore-{}-{}", i, status), Weekday::Mon, AssignmentState::new(status, *updated_on))
                    .await;
            }
        }

        let all = f.assignments.list_for_child(ana.id, Weekday::Mon).await.unwrap();
        let actionable = f
            .assignments
            .actionable_for_child(ana.id, Weekday::Mon, monday())
            .await
            .unwrap();

        let expected: Vec<_> = all.into_iter().filter(|a| a.state.is_actionable(monday())).collect();
        assert_eq!(actionable, expected);
    }

    #[tokio::test]
    async fn test_other_weekdays_and_children_are_excluded() {
        let f = setup_test().await;
        let ana = f.children.insert_child("Ana").await.unwrap();
        let leo = f.children.insert_child("Leo").await.unwrap();

        f.assign(ana.id, "Dishes", Weekday::Mon, AssignmentState::new(ChoreStatus::Pending, None)).await;
        f.assign(ana.id, "Laundry", Weekday::Tue, AssignmentState::new(ChoreStatus::Pending, None)).await;
        f.assign(leo.id, "Trash", Weekday::Mon, AssignmentState::new(ChoreStatus::Pending, None)).await;

        let rows = f
            .assignments
            .actionable_for_child(ana.id, Weekday::Mon, monday())
            .await
            .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].description, "Dishes");
        assert_eq!(rows[0].weekday, Weekday::Mon);
    }

    #[tokio::test]
    async fn test_mark_stamps_today() {
        let f = setup_test().await;
        let ana = f.children.insert_child("Ana").await.unwrap();
        let id = f
            .assign(ana.id, "Dishes", Weekday::Mon, AssignmentState::new(ChoreStatus::Pending, None))
            .await;

        assert!(f.assignments.mark(id, ChoreStatus::Done, monday()).await.unwrap());
        let row = f.assignments.get_assignment(id).await.unwrap().unwrap();
        assert_eq!(row.state, AssignmentState::new(ChoreStatus::Done, Some(monday())));

        // Marking done again leaves the same state
        assert!(f.assignments.mark(id, ChoreStatus::Done, monday()).await.unwrap());
        let row = f.assignments.get_assignment(id).await.unwrap().unwrap();
        assert_eq!(row.state, AssignmentState::new(ChoreStatus::Done, Some(monday())));
    }

    #[tokio::test]
    async fn test_mark_done_then_pending_is_actionable_again() {
        let f = setup_test().await;
        let ana = f.children.insert_child("Ana").await.unwrap();
        let id = f
            .assign(ana.id, "Dishes", Weekday::Mon, AssignmentState::new(ChoreStatus::Pending, None))
            .await;

        f.assignments.mark(id, ChoreStatus::Done, monday()).await.unwrap();
        let rows = f.assignments.actionable_for_child(ana.id, Weekday::Mon, monday()).await.unwrap();
        assert!(rows.is_empty());

        f.assignments.mark(id, ChoreStatus::Pending, monday()).await.unwrap();
        let row = f.assignments.get_assignment(id).await.unwrap().unwrap();
        assert_eq!(row.state, AssignmentState::new(ChoreStatus::Pending, Some(monday())));

        let rows = f.assignments.actionable_for_child(ana.id, Weekday::Mon, monday()).await.unwrap();
        assert_eq!(rows.len(), 1);
    }

    #[tokio::test]
    async fn test_mark_unknown_assignment() {
        let f = setup_test().await;
        let found = f.assignments.mark(42, ChoreStatus::Done, monday()).await.unwrap();
        assert!(!found);
        assert!(f.assignments.get_assignment(42).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_actionable_entries_ordered_by_child() {
        let f = setup_test().await;
        let ana = f.children.insert_child("Ana").await.unwrap();
        let leo = f.children.insert_child("Leo").await.unwrap();

        f.assign(leo.id, "Trash", Weekday::Mon, AssignmentState::new(ChoreStatus::Pending, None)).await;
        f.assign(ana.id, "Dishes", Weekday::Mon, AssignmentState::new(ChoreStatus::Pending, None)).await;
        f.assign(ana.id, "Bed", Weekday::Mon, AssignmentState::new(ChoreStatus::Done, Some(monday()))).await;

        let entries = f.assignments.actionable_entries(Weekday::Mon, monday()).await.unwrap();
        assert_eq!(
            entries,
            vec![
                DigestEntry::new("Ana", "Dishes"),
                DigestEntry::new("Leo", "Trash"),
            ]
        );
    }
}

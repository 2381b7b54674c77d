use std::sync::Arc;

use shared::{ChildBoard, MarkChoreResponse, TodayBoardResponse, TodayChore};
use tracing::{info, warn};

use crate::domain::chore_state::{Assignment, AssignmentState};
use crate::domain::clock::Clock;
use crate::domain::weekday::{self, WeekdayLocale};
use crate::error::{ChoreError, Result};
use crate::storage::{AssignmentRepository, ChildRepository, DbConnection};

/// Service behind the dashboard: loads today's board and applies toggles
#[derive(Clone)]
pub struct BoardService {
    children: ChildRepository,
    assignments: AssignmentRepository,
    clock: Arc<dyn Clock>,
    locale: WeekdayLocale,
}

impl BoardService {
    pub fn new(db: DbConnection, clock: Arc<dyn Clock>, locale: WeekdayLocale) -> Self {
        Self {
            children: ChildRepository::new(db.clone()),
            assignments: AssignmentRepository::new(db),
            clock,
            locale,
        }
    }

    /// Load today's board: each child's actionable chores, with rows completed
    /// today left out. On rest days no assignment queries are issued.
    pub async fn today_board(&self) -> Result<TodayBoardResponse> {
        let today = self.clock.today();

        let Some(day) = weekday::resolve(today, self.locale) else {
            info!("{} is a rest day, no chores to load", today);
            return Ok(TodayBoardResponse {
                date: today,
                weekday_label: None,
                children: Vec::new(),
            });
        };

        info!("Loading board for {} ({})", day.label, today);

        let children = self.children.list_children().await?;
        let mut boards = Vec::with_capacity(children.len());

        for child in children {
            let rows = self
                .assignments
                .actionable_for_child(child.id, day.weekday, today)
                .await?;
            let chores = rows.iter().map(|row| to_today_chore(row, today)).collect();
            boards.push(ChildBoard { child, chores });
        }

        Ok(TodayBoardResponse {
            date: today,
            weekday_label: Some(day.label),
            children: boards,
        })
    }

    /// The chores a child still has to do today (reset-on-read applied)
    pub async fn pending_for_child(&self, child_id: i64) -> Result<Vec<TodayChore>> {
        let today = self.clock.today();
        let Some(day) = weekday::resolve(today, self.locale) else {
            return Ok(Vec::new());
        };

        let rows = self
            .assignments
            .actionable_for_child(child_id, day.weekday, today)
            .await?;

        Ok(rows.iter().map(|row| to_today_chore(row, today)).collect())
    }

    /// Apply a checkbox toggle. The row is stamped with today's date
    /// whether it was checked or unchecked.
    pub async fn mark(&self, assignment_id: i64, done: bool) -> Result<MarkChoreResponse> {
        let today = self.clock.today();
        let state = AssignmentState::mark(done, today);

        info!("Marking assignment {} as {}", assignment_id, state.status);

        if !self.assignments.mark(assignment_id, state.status, today).await? {
            warn!("Assignment not found: {}", assignment_id);
            return Err(ChoreError::NotFound(assignment_id));
        }

        Ok(MarkChoreResponse {
            assignment_id,
            status: state.status,
            updated_on: today,
        })
    }
}

fn to_today_chore(row: &Assignment, today: chrono::NaiveDate) -> TodayChore {
    TodayChore {
        assignment_id: row.id,
        description: row.description.clone(),
        status: row.state.effective_status(today),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::clock::FixedClock;
    use chrono::{Duration, NaiveDate, Weekday};
    use shared::ChoreStatus;

    // 2025-06-09 is a Monday
    fn monday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 9).unwrap()
    }

    async fn setup_on(date: NaiveDate) -> (BoardService, DbConnection) {
        let db = DbConnection::in_memory().await.expect("Failed to create test database");
        let service = BoardService::new(db.clone(), Arc::new(FixedClock::on(date)), WeekdayLocale::English);
        (service, db)
    }

    async fn seed(db: &DbConnection) -> (i64, i64) {
        let children = ChildRepository::new(db.clone());
        let assignments = AssignmentRepository::new(db.clone());

        let ana = children.insert_child("Ana").await.unwrap();
        let dishes = children.insert_chore("Dishes").await.unwrap();
        let homework = children.insert_chore("Homework").await.unwrap();

        let dishes_id = assignments
            .insert_assignment(ana.id, dishes.id, Weekday::Mon, AssignmentState::new(ChoreStatus::Pending, None))
            .await
            .unwrap();
        let homework_id = assignments
            .insert_assignment(
                ana.id,
                homework.id,
                Weekday::Mon,
                AssignmentState::new(ChoreStatus::Done, Some(monday() - Duration::days(7))),
            )
            .await
            .unwrap();

        (dishes_id, homework_id)
    }

    #[tokio::test]
    async fn test_today_board_resets_stale_rows() {
        let (service, db) = setup_on(monday()).await;
        seed(&db).await;

        let board = service.today_board().await.unwrap();
        assert_eq!(board.weekday_label.as_deref(), Some("Monday"));
        assert_eq!(board.children.len(), 1);

        let chores = &board.children[0].chores;
        assert_eq!(chores.len(), 2);
        assert!(chores.iter().all(|c| c.status == ChoreStatus::Pending));
    }

    #[tokio::test]
    async fn test_chores_done_today_leave_the_board() {
        let (service, db) = setup_on(monday()).await;
        let (dishes_id, homework_id) = seed(&db).await;

        service.mark(dishes_id, true).await.unwrap();

        let board = service.today_board().await.unwrap();
        let ids: Vec<i64> = board.children[0].chores.iter().map(|c| c.assignment_id).collect();
        assert_eq!(ids, vec![homework_id]);

        let pending = service.pending_for_child(board.children[0].child.id).await.unwrap();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].description, "Homework");
    }

    #[tokio::test]
    async fn test_unchecked_chore_returns_to_the_board() {
        let (service, db) = setup_on(monday()).await;
        let (dishes_id, _) = seed(&db).await;

        service.mark(dishes_id, true).await.unwrap();
        service.mark(dishes_id, false).await.unwrap();

        let board = service.today_board().await.unwrap();
        let dishes = board.children[0]
            .chores
            .iter()
            .find(|c| c.assignment_id == dishes_id)
            .unwrap();
        assert_eq!(dishes.status, ChoreStatus::Pending);
    }

    #[tokio::test]
    async fn test_child_with_everything_done_keeps_an_empty_column() {
        let (service, db) = setup_on(monday()).await;
        let (dishes_id, homework_id) = seed(&db).await;

        service.mark(dishes_id, true).await.unwrap();
        service.mark(homework_id, true).await.unwrap();

        let board = service.today_board().await.unwrap();
        assert_eq!(board.children.len(), 1);
        assert_eq!(board.children[0].child.name, "Ana");
        assert!(board.children[0].chores.is_empty());
    }

    #[tokio::test]
    async fn test_rest_day_issues_no_queries() {
        // 2025-06-14 is a Saturday; a closed pool would fail any query
        let (service, db) = setup_on(NaiveDate::from_ymd_opt(2025, 6, 14).unwrap()).await;
        db.close().await;

        let board = service.today_board().await.unwrap();
        assert!(board.is_rest_day());
        assert!(board.children.is_empty());
        assert!(service.pending_for_child(1).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_mark_round_trip() {
        let (service, db) = setup_on(monday()).await;
        let (dishes_id, _) = seed(&db).await;

        let done = service.mark(dishes_id, true).await.unwrap();
        assert_eq!(done.status, ChoreStatus::Done);
        assert_eq!(done.updated_on, monday());

        let again = service.mark(dishes_id, true).await.unwrap();
        assert_eq!(again, done);

        let undone = service.mark(dishes_id, false).await.unwrap();
        assert_eq!(undone.status, ChoreStatus::Pending);
        assert_eq!(undone.updated_on, monday());
    }

    #[tokio::test]
    async fn test_mark_unknown_assignment() {
        let (service, _db) = setup_on(monday()).await;
        let result = service.mark(99, true).await;
        assert!(matches!(result, Err(ChoreError::NotFound(99))));
    }

    #[tokio::test]
    async fn test_database_failure_is_reported() {
        let (service, db) = setup_on(monday()).await;
        db.close().await;

        let result = service.today_board().await;
        assert!(matches!(result, Err(ChoreError::Database(_))));
    }
}

// src/services/board_service.rs
use crate::db::Database;
use crate::errors::ServiceError;
use crate::models::{Board, BoardPageQuery, EventPayload, ResourceKind, TeamEvent};
use crate::repo::{BoardRecord, BoardRepository, ColumnRepository, ThoughtRepository};
use crate::services::action_item_service::archive_completed_in;
use crate::services::{ActionItemService, EventPublisher};
use chrono::Utc;
use log::{error, info};
use rusqlite::Connection;
use uuid::Uuid;

/// Retro boards: the running one and the archived history.
#[derive(Clone)]
pub struct BoardService {
    db: Database,
    events: EventPublisher,
    action_items: ActionItemService,
}

impl BoardService {
    pub fn new(db: Database, events: EventPublisher, action_items: ActionItemService) -> Self {
        Self {
            db,
            events,
            action_items,
        }
    }

    /// Opens an active, empty board for the team's next retro.
    pub fn create_board(&self, team_id: &Uuid, description: Option<&str>) -> Result<Board, ServiceError> {
        let description = description.map(str::trim).unwrap_or_default();
        let board = self.db.transaction(|tx| {
            let repo = BoardRepository::new(tx);
            let board_id = repo.insert(team_id, description, true, Utc::now())?;
            load_board(tx, team_id, board_id)
        })?;

        info!("🧾 Board {} opened for team {}", board.id, team_id);
        self.publish_update(&board);
        Ok(board)
    }

    /// Newest first.
    pub fn list_boards(&self, team_id: &Uuid, page: &BoardPageQuery) -> Result<Vec<Board>, ServiceError> {
        let (limit, offset) = page.limit_offset();
        self.db.with_conn(|conn| {
            let records = BoardRepository::new(conn).list_for_team(team_id, limit, offset)?;
            records
                .into_iter()
                .map(|record| with_thoughts(conn, record))
                .collect()
        })
    }

    pub fn get_board(&self, team_id: &Uuid, board_id: i64) -> Result<Board, ServiceError> {
        self.db.with_conn(|conn| load_board(conn, team_id, board_id))
    }

    pub fn delete_board(&self, team_id: &Uuid, board_id: i64) -> Result<(), ServiceError> {
        let removed = self.db.with_conn(|conn| {
            Ok::<_, ServiceError>(BoardRepository::new(conn).delete_for_team(team_id, board_id)?)
        })?;
        if removed == 0 {
            return Err(ServiceError::BoardNotFound);
        }

        info!("🗑️ Board {} deleted from team {}", board_id, team_id);
        self.events
            .publish(TeamEvent::delete(*team_id, ResourceKind::Board, board_id));
        Ok(())
    }

    /// Deletes the listed boards the team owns; ids of other teams are skipped
    /// and repeated ids count once.
    pub fn delete_boards(&self, team_id: &Uuid, board_ids: &[i64]) -> Result<Vec<i64>, ServiceError> {
        let deleted = self.db.transaction(|tx| {
            let repo = BoardRepository::new(tx);
            let mut deleted = Vec::with_capacity(board_ids.len());
            for id in board_ids {
                if repo.delete_for_team(team_id, *id)? > 0 {
                    deleted.push(*id);
                }
            }
            Ok::<_, ServiceError>(deleted)
        })?;

        info!(
            "🗑️ Deleted {} of {} requested boards from team {}",
            deleted.len(),
            board_ids.len(),
            team_id
        );
        for id in &deleted {
            self.events
                .publish(TeamEvent::delete(*team_id, ResourceKind::Board, *id));
        }
        Ok(deleted)
    }

    /// Closes the running retro: the active board (or a fresh one) receives a
    /// snapshot of the columns and every active thought, then becomes
    /// inactive. Completed action items are archived in the same transaction.
    pub fn end_retro(&self, team_id: &Uuid) -> Result<Board, ServiceError> {
        let (board, archived) = self.db.transaction(|tx| {
            let boards = BoardRepository::new(tx);
            let board_id = match boards.find_active(team_id)? {
                Some(active) => active.id,
                None => boards.insert(team_id, "", true, Utc::now())?,
            };

            let columns = ColumnRepository::new(tx).list_for_team(team_id)?;
            let moved = ThoughtRepository::new(tx).archive_active(team_id, board_id)?;
            boards.close(board_id, &columns)?;
            let archived = archive_completed_in(tx, team_id)?;
            info!(
                "🏁 Retro ended for team {}: board {} holds {} thoughts",
                team_id, board_id, moved
            );

            Ok::<_, ServiceError>((load_board(tx, team_id, board_id)?, archived))
        })?;

        self.publish_update(&board);
        self.action_items.announce(&archived);
        Ok(board)
    }

    fn publish_update(&self, board: &Board) {
        self.events
            .publish(TeamEvent::update(board.team_id, EventPayload::Board(board.clone())));
    }
}

fn load_board(conn: &Connection, team_id: &Uuid, board_id: i64) -> Result<Board, ServiceError> {
    let record = BoardRepository::new(conn)
        .find_for_team(team_id, board_id)?
        .ok_or_else(|| {
            error!("❌ Board {} not found in team {}", board_id, team_id);
            ServiceError::BoardNotFound
        })?;
    with_thoughts(conn, record)
}

fn with_thoughts(conn: &Connection, record: BoardRecord) -> Result<Board, ServiceError> {
    let thoughts = ThoughtRepository::new(conn).list_for_board(&record.team_id, record.id)?;
    Ok(Board {
        id: record.id,
        team_id: record.team_id,
        created_at: record.created_at,
        description: record.description,
        active: record.active,
        columns: record.columns,
        thoughts,
    })
}

#[cfg(test)]
mod tests {
    use super::BoardService;
    use crate::db::Database;
    use crate::errors::ServiceError;
    use crate::models::{BoardPageQuery, CreateActionItemRequest, EventPayload, EventType};
    use crate::services::{
        ActionItemService, ColumnService, EventPublisher, TeamService, ThoughtService,
    };

    struct Fixture {
        events: EventPublisher,
        teams: TeamService,
        boards: BoardService,
        thoughts: ThoughtService,
        columns: ColumnService,
        items: ActionItemService,
    }

    fn fixture() -> Fixture {
        let db = Database::open_in_memory().unwrap();
        let events = EventPublisher::new(32);
        let items = ActionItemService::new(db.clone(), events.clone());
        Fixture {
            events: events.clone(),
            teams: TeamService::new(db.clone()),
            boards: BoardService::new(db.clone(), events.clone(), items.clone()),
            thoughts: ThoughtService::new(db.clone(), events.clone()),
            columns: ColumnService::new(db, events),
            items,
        }
    }

    #[test]
    fn end_retro_archives_thoughts_and_completed_items() {
        let f = fixture();
        let team = f.teams.create_team("Alpha", "alice").unwrap();
        let column = f.columns.get_columns(&team.id).unwrap()[0].clone();
        let opened = f.boards.create_board(&team.id, Some("Sprint 12")).unwrap();
        assert!(opened.active);

        let thought = f.thoughts.create_thought(&team.id, "ship it", column.id).unwrap();
        let done = f
            .items
            .create_action_item(&team.id, &CreateActionItemRequest { task: "done".into(), ..Default::default() })
            .unwrap();
        f.items.update_completed_status(&team.id, done.id, true).unwrap();

        let ended = f.boards.end_retro(&team.id).unwrap();
        assert_eq!(ended.id, opened.id);
        assert_eq!(ended.description, "Sprint 12");
        assert!(!ended.active);
        assert_eq!(ended.columns.len(), 3);
        assert_eq!(ended.thoughts.len(), 1);
        assert_eq!(ended.thoughts[0].id, thought.id);
        assert_eq!(ended.thoughts[0].board_id, Some(ended.id));

        assert!(f.thoughts.fetch_all_active_thoughts(&team.id).unwrap().is_empty());
        assert!(f.items.fetch_action_item(&team.id, done.id).unwrap().archived);

        // Renaming a column later does not rewrite the frozen snapshot
        f.columns.edit_title(&team.id, column.id, "Glad").unwrap();
        let stored = f.boards.get_board(&team.id, ended.id).unwrap();
        assert_eq!(stored.columns[0].title, column.title);
    }

    #[test]
    fn end_retro_without_open_board_creates_one() {
        let f = fixture();
        let team = f.teams.create_team("Alpha", "alice").unwrap();
        let board = f.boards.end_retro(&team.id).unwrap();
        assert!(!board.active);
        assert!(board.thoughts.is_empty());
    }

    #[test]
    fn boards_are_listed_newest_first_and_scoped() {
        let f = fixture();
        let alpha = f.teams.create_team("Alpha", "alice").unwrap();
        let beta = f.teams.create_team("Beta", "bob").unwrap();
        let first = f.boards.end_retro(&alpha.id).unwrap();
        let second = f.boards.end_retro(&alpha.id).unwrap();
        let foreign = f.boards.end_retro(&beta.id).unwrap();

        let listed = f.boards.list_boards(&alpha.id, &BoardPageQuery::default()).unwrap();
        let ids: Vec<i64> = listed.iter().map(|b| b.id).collect();
        assert_eq!(ids, vec![second.id, first.id]);

        let page = BoardPageQuery { page_index: Some(1), page_size: Some(1) };
        let second_page = f.boards.list_boards(&alpha.id, &page).unwrap();
        assert_eq!(second_page.len(), 1);
        assert_eq!(second_page[0].id, first.id);

        assert_eq!(f.boards.get_board(&alpha.id, foreign.id), Err(ServiceError::BoardNotFound));
        assert_eq!(f.boards.delete_board(&alpha.id, foreign.id), Err(ServiceError::BoardNotFound));
        assert_eq!(
            f.boards.delete_boards(&alpha.id, &[first.id, foreign.id]).unwrap(),
            vec![first.id]
        );
        assert!(f.boards.get_board(&beta.id, foreign.id).is_ok());
    }

    #[test]
    fn repeated_board_ids_are_deleted_and_announced_once() {
        let f = fixture();
        let team = f.teams.create_team("Alpha", "alice").unwrap();
        let board = f.boards.end_retro(&team.id).unwrap();
        let mut receiver = f.events.subscribe();

        let deleted = f.boards.delete_boards(&team.id, &[board.id, board.id]).unwrap();
        assert_eq!(deleted, vec![board.id]);

        let event = receiver.try_recv().unwrap();
        assert_eq!(event.event_type, EventType::Delete);
        assert!(receiver.try_recv().is_err());
        assert_eq!(f.boards.get_board(&team.id, board.id), Err(ServiceError::BoardNotFound));
    }

    #[test]
    fn end_retro_announces_archived_action_items() {
        let f = fixture();
        let team = f.teams.create_team("Alpha", "alice").unwrap();
        let done = f
            .items
            .create_action_item(&team.id, &CreateActionItemRequest { task: "done".into(), ..Default::default() })
            .unwrap();
        f.items.update_completed_status(&team.id, done.id, true).unwrap();
        let mut receiver = f.events.subscribe();

        f.boards.end_retro(&team.id).unwrap();

        let board_event = receiver.try_recv().unwrap();
        assert!(matches!(board_event.payload, EventPayload::Board(_)));
        match receiver.try_recv().unwrap().payload {
            EventPayload::ActionItem(item) => {
                assert_eq!(item.id, done.id);
                assert!(item.archived);
            }
            other => panic!("unexpected payload {other:?}"),
        }
        assert!(receiver.try_recv().is_err());
    }
}

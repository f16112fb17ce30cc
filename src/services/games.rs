use super::{
    associations::{
        children::children_of,
        find_record,
        many::related,
        pairs::{GameComments, GameMoves, GameOpening, GamePlayers, GameTournament},
        parent::parent_of,
    },
    delete_record, not_in_future, record_by_id, require, require_id, require_some_id,
    ServiceError, ServiceResult,
};
use crate::{
    database::entities::{games, Comment, Game, Move, Opening, Player, Tournament},
    utils::types::{PageIndex, RecordId},
};
use chrono::{DateTime, Utc};
use log::debug;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ConnectionTrait, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryOrder, Set, TransactionTrait,
};
use serde::{Deserialize, Serialize};

/// Game details provided when creating or updating a game
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameInput {
    pub id: Option<RecordId>,
    pub result: Option<String>,
    pub date: Option<DateTime<Utc>>,
    pub image: Option<String>,
}

impl GameInput {
    /// The tournament and opening links are managed through their own
    /// associations and are left untouched here
    fn into_active(self) -> ServiceResult<games::ActiveModel> {
        let result = require(self.result, "game result")?;
        let date = require(self.date, "game date")?;
        not_in_future(&date, "game date")?;

        Ok(games::ActiveModel {
            id: NotSet,
            result: Set(result),
            date: Set(date),
            image: Set(self.image),
            tournament_id: NotSet,
            opening_id: NotSet,
        })
    }
}

/// Game along with its directly related records
#[derive(Debug, Serialize)]
pub struct GameDetail {
    #[serde(flatten)]
    pub game: Game,
    pub tournament: Option<Tournament>,
    pub opening: Option<Opening>,
    pub players: Vec<Player>,
    pub moves: Vec<Move>,
    pub comments: Vec<Comment>,
}

pub async fn create(db: &DatabaseConnection, input: GameInput) -> ServiceResult<Game> {
    require_some_id(input.id, "game")?;
    let game = input.into_active()?;

    let txn = db.begin().await?;
    let game = game.insert(&txn).await?;
    txn.commit().await?;

    debug!("Created game {} ({})", game.id, game.result);
    Ok(game)
}

/// Loads one page of games ordered by id
///
/// `db`   The database connection
/// `page` The zero based page index
/// `size` The number of games per page
pub async fn get_page(
    db: &DatabaseConnection,
    page: PageIndex,
    size: u64,
) -> ServiceResult<Vec<Game>> {
    if size == 0 {
        return Err(ServiceError::illegal(
            "The page size must be greater than zero",
        ));
    }

    // The store takes signed limits and offsets
    let in_range = |value: u64| value <= i64::MAX as u64;
    let offset = page.checked_mul(size).filter(|offset| in_range(*offset));
    if !in_range(size) || offset.is_none() {
        return Err(ServiceError::illegal("The requested page is out of range"));
    }

    let games = games::Entity::find()
        .order_by_asc(games::Column::Id)
        .paginate(db, size)
        .fetch_page(page)
        .await?;
    Ok(games)
}

pub async fn get_by_id<C: ConnectionTrait>(db: &C, id: RecordId) -> ServiceResult<Game> {
    record_by_id::<games::Entity, _>(db, id).await
}

/// Loads the game with its tournament, opening, players, moves and
/// comments
pub async fn detail(db: &DatabaseConnection, id: RecordId) -> ServiceResult<GameDetail> {
    let txn = db.begin().await?;
    let game = get_by_id(&txn, id).await?;
    let tournament = parent_of::<GameTournament, _>(&txn, &game).await?;
    let opening = parent_of::<GameOpening, _>(&txn, &game).await?;
    let players = related::<GamePlayers, _>(&txn, id).await?;
    let moves = children_of::<GameMoves, _>(&txn, id).await?;
    let comments = children_of::<GameComments, _>(&txn, id).await?;
    txn.commit().await?;

    Ok(GameDetail {
        game,
        tournament,
        opening,
        players,
        moves,
        comments,
    })
}

pub async fn update(db: &DatabaseConnection, id: RecordId, input: GameInput) -> ServiceResult<Game> {
    require_id(id, "game")?;
    let mut game = input.into_active()?;

    let txn = db.begin().await?;
    find_record::<games::Entity, _>(&txn, id).await?;
    game.id = Set(id);
    let game = game.update(&txn).await?;
    txn.commit().await?;

    debug!("Updated game {}", id);
    Ok(game)
}

/// Deletes the game along with its moves and comments
pub async fn delete(db: &DatabaseConnection, id: RecordId) -> ServiceResult<()> {
    delete_record::<games::Entity>(db, id).await
}

#[cfg(test)]
mod test {
    use super::{create, get_by_id, get_page, update, GameInput};
    use crate::{database::test_connection, services::ServiceError};
    use chrono::{Duration, TimeZone, Utc};

    fn game(result: &str) -> GameInput {
        GameInput {
            id: Some(1),
            result: Some(result.to_string()),
            date: Some(Utc.with_ymd_and_hms(2023, 5, 20, 15, 30, 0).unwrap()),
            image: Some("https://example.com/board.png".to_string()),
        }
    }

    #[tokio::test]
    async fn test_create_round_trip() {
        let db = test_connection().await;

        let created = create(&db, game("1-0")).await.unwrap();
        let found = get_by_id(&db, created.id).await.unwrap();

        assert_eq!(created, found);
        assert_eq!(found.result, "1-0");
        assert_eq!(found.tournament_id, None);
        assert_eq!(found.opening_id, None);
    }

    #[tokio::test]
    async fn test_required_fields() {
        let db = test_connection().await;

        let mut input = game("1-0");
        input.result = None;
        assert!(matches!(
            create(&db, input).await,
            Err(ServiceError::IllegalOperation(_))
        ));

        let mut input = game("1-0");
        input.date = None;
        assert!(matches!(
            create(&db, input).await,
            Err(ServiceError::IllegalOperation(_))
        ));

        let created = create(&db, game("1-0")).await.unwrap();
        let mut input = game("0-1");
        input.result = None;
        assert!(matches!(
            update(&db, created.id, input).await,
            Err(ServiceError::IllegalOperation(_))
        ));
    }

    #[tokio::test]
    async fn test_dates() {
        let db = test_connection().await;

        let mut input = game("1-0");
        input.date = Some(Utc::now() + Duration::days(365));
        assert!(matches!(
            create(&db, input).await,
            Err(ServiceError::IllegalOperation(_))
        ));

        let mut input = game("1-0");
        input.date = Some(Utc::now());
        assert!(create(&db, input).await.is_ok());
    }

    #[tokio::test]
    async fn test_pages() {
        let db = test_connection().await;

        for result in ["1-0", "0-1", "1/2-1/2", "1-0", "0-1", "1-0"] {
            create(&db, game(result)).await.unwrap();
        }

        let first = get_page(&db, 0, 4).await.unwrap();
        let second = get_page(&db, 1, 4).await.unwrap();
        let third = get_page(&db, 2, 4).await.unwrap();

        assert_eq!(first.len(), 4);
        assert_eq!(second.len(), 2);
        assert!(third.is_empty());
        assert!(first.iter().all(|game| second.iter().all(|other| other.id > game.id)));

        assert!(matches!(
            get_page(&db, 0, 0).await,
            Err(ServiceError::IllegalOperation(_))
        ));

        // Offsets past what the store accepts are rejected
        for (page, size) in [(u64::MAX, 4), (1 << 61, 4), (0, u64::MAX)] {
            assert!(matches!(
                get_page(&db, page, size).await,
                Err(ServiceError::IllegalOperation(_))
            ));
        }

        // Distant pages within range are just empty
        assert!(get_page(&db, i64::MAX as u64 / 4, 4)
            .await
            .unwrap()
            .is_empty());
    }
}

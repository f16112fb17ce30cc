use super::{
    all_records,
    associations::{
        find_record,
        many::related,
        pairs::{MoveGame, MoveOpenings, MovePlayer},
        parent::parent_of,
    },
    delete_record, record_by_id, require, require_id, require_some_id, ServiceError,
    ServiceResult,
};
use crate::{
    database::entities::{moves, Game, Move, Opening, Player},
    utils::{types::RecordId, validate::is_valid_notation},
};
use log::debug;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ConnectionTrait, DatabaseConnection, Set,
    TransactionTrait,
};
use serde::{Deserialize, Serialize};

/// Move details provided when creating or updating a move
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveInput {
    pub id: Option<RecordId>,
    pub notation: Option<String>,
}

impl MoveInput {
    fn into_active(self) -> ServiceResult<moves::ActiveModel> {
        let notation = require(self.notation, "move notation")?;
        if !is_valid_notation(&notation) {
            return Err(ServiceError::illegal(format!(
                "The move notation \"{notation}\" is not valid"
            )));
        }

        Ok(moves::ActiveModel {
            id: NotSet,
            notation: Set(notation),
            player_id: NotSet,
            game_id: NotSet,
        })
    }
}

/// Move along with its directly related records
#[derive(Debug, Serialize)]
pub struct MoveDetail {
    #[serde(flatten)]
    pub chess_move: Move,
    pub player: Option<Player>,
    pub game: Option<Game>,
    pub openings: Vec<Opening>,
}

pub async fn create(db: &DatabaseConnection, input: MoveInput) -> ServiceResult<Move> {
    require_some_id(input.id, "move")?;
    let chess_move = input.into_active()?;

    let txn = db.begin().await?;
    let chess_move = chess_move.insert(&txn).await?;
    txn.commit().await?;

    debug!("Created move {} ({})", chess_move.id, chess_move.notation);
    Ok(chess_move)
}

pub async fn get_all(db: &DatabaseConnection) -> ServiceResult<Vec<Move>> {
    all_records::<moves::Entity>(db).await
}

pub async fn get_by_id<C: ConnectionTrait>(db: &C, id: RecordId) -> ServiceResult<Move> {
    record_by_id::<moves::Entity, _>(db, id).await
}

pub async fn detail(db: &DatabaseConnection, id: RecordId) -> ServiceResult<MoveDetail> {
    let txn = db.begin().await?;
    let chess_move = get_by_id(&txn, id).await?;
    let player = parent_of::<MovePlayer, _>(&txn, &chess_move).await?;
    let game = parent_of::<MoveGame, _>(&txn, &chess_move).await?;
    let openings = related::<MoveOpenings, _>(&txn, id).await?;
    txn.commit().await?;

    Ok(MoveDetail {
        chess_move,
        player,
        game,
        openings,
    })
}

pub async fn update(db: &DatabaseConnection, id: RecordId, input: MoveInput) -> ServiceResult<Move> {
    require_id(id, "move")?;
    let mut chess_move = input.into_active()?;

    let txn = db.begin().await?;
    find_record::<moves::Entity, _>(&txn, id).await?;
    chess_move.id = Set(id);
    let chess_move = chess_move.update(&txn).await?;
    txn.commit().await?;

    debug!("Updated move {}", id);
    Ok(chess_move)
}

pub async fn delete(db: &DatabaseConnection, id: RecordId) -> ServiceResult<()> {
    delete_record::<moves::Entity>(db, id).await
}

#[cfg(test)]
mod test {
    use super::{create, get_by_id, update, MoveInput};
    use crate::{database::test_connection, services::ServiceError};

    fn chess_move(notation: &str) -> MoveInput {
        MoveInput {
            id: Some(1),
            notation: Some(notation.to_string()),
        }
    }

    #[tokio::test]
    async fn test_create_round_trip() {
        let db = test_connection().await;

        let created = create(&db, chess_move("Nf3")).await.unwrap();
        let found = get_by_id(&db, created.id).await.unwrap();

        assert_eq!(created, found);
        assert_eq!(found.notation, "Nf3");
        assert_eq!(found.player_id, None);
    }

    #[tokio::test]
    async fn test_invalid_notation() {
        let db = test_connection().await;

        assert!(matches!(
            create(&db, chess_move("invalidNotation")).await,
            Err(ServiceError::IllegalOperation(_))
        ));
        assert!(matches!(
            create(&db, MoveInput::default()).await,
            Err(ServiceError::IllegalOperation(_))
        ));

        let created = create(&db, chess_move("e4")).await.unwrap();
        assert!(matches!(
            update(&db, created.id, chess_move("e9")).await,
            Err(ServiceError::IllegalOperation(_))
        ));

        let updated = update(&db, created.id, chess_move("O-O-O#")).await.unwrap();
        assert_eq!(updated.notation, "O-O-O#");
    }
}

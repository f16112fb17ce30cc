//! Operations for one-to-many associations viewed from the child,
//! managing the single parent it references

use super::{find_record, ForeignKey, ModelOf};
use crate::{
    database::entities::Record,
    services::{require_id, ServiceError, ServiceResult},
    utils::types::RecordId,
};
use log::debug;
use sea_orm::{
    sea_query::Expr, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, TransactionTrait,
};

/// Loads the parent referenced by a loaded child if it has one
///
/// `db`    The connection or transaction to use
/// `child` The loaded child
pub async fn parent_of<K, C>(
    db: &C,
    child: &ModelOf<K::Child>,
) -> Result<Option<ModelOf<K::Parent>>, DbErr>
where
    K: ForeignKey,
    C: ConnectionTrait,
{
    match K::parent_of(child) {
        Some(parent) => {
            K::Parent::find()
                .filter(K::Parent::id_column().eq(parent))
                .one(db)
                .await
        }
        None => Ok(None),
    }
}

/// Sets the parent of the child, replacing any current parent
///
/// `db`     The database connection
/// `child`  The id of the child record
/// `parent` The id of the new parent record
pub async fn set<K: ForeignKey>(
    db: &DatabaseConnection,
    child: RecordId,
    parent: RecordId,
) -> ServiceResult<ModelOf<K::Parent>> {
    require_id(child, K::Child::NAME)?;
    require_id(parent, K::Parent::NAME)?;

    let txn = db.begin().await?;
    find_record::<K::Child, _>(&txn, child).await?;
    let model = find_record::<K::Parent, _>(&txn, parent).await?;

    K::Child::update_many()
        .col_expr(K::column(), Expr::value(parent))
        .filter(K::Child::id_column().eq(child))
        .exec(&txn)
        .await?;

    txn.commit().await?;

    debug!(
        "Set {} of {} {} to {}",
        K::Parent::NAME,
        K::Child::NAME,
        child,
        parent
    );

    Ok(model)
}

/// Loads the parent of the child
///
/// `db`    The database connection
/// `child` The id of the child record
pub async fn get<K: ForeignKey>(
    db: &DatabaseConnection,
    child: RecordId,
) -> ServiceResult<ModelOf<K::Parent>> {
    require_id(child, K::Child::NAME)?;

    let txn = db.begin().await?;
    let model = find_record::<K::Child, _>(&txn, child).await?;
    let parent = parent_of::<K, _>(&txn, &model)
        .await?
        .ok_or_else(|| ServiceError::not_found(K::Parent::NAME))?;
    txn.commit().await?;
    Ok(parent)
}

/// Clears the parent of the child
///
/// `db`    The database connection
/// `child` The id of the child record
pub async fn remove<K: ForeignKey>(db: &DatabaseConnection, child: RecordId) -> ServiceResult<()> {
    require_id(child, K::Child::NAME)?;

    let txn = db.begin().await?;
    let model = find_record::<K::Child, _>(&txn, child).await?;

    if K::parent_of(&model).is_none() {
        return Err(ServiceError::illegal(format!(
            "The {} has no {} to remove",
            K::Child::NAME,
            K::Parent::NAME
        )));
    }

    super::children::detach::<K, _>(&txn, &[child]).await?;
    txn.commit().await?;

    debug!("Cleared {} of {} {}", K::Parent::NAME, K::Child::NAME, child);

    Ok(())
}

#[cfg(test)]
mod test {
    use super::{get, remove, set};
    use crate::{
        database::{entities::OpeningClassification, test_connection},
        services::{
            associations::pairs::{GameOpening, MovePlayer},
            credentials::PlainText,
            games::{self, GameInput},
            moves::{self, MoveInput},
            openings::{self, OpeningInput},
            players::{self, PlayerInput},
            ServiceError,
        },
    };
    use chrono::{TimeZone, Utc};

    #[tokio::test]
    async fn test_move_player() {
        let db = test_connection().await;

        let input = MoveInput {
            id: Some(1),
            notation: Some("Nf3".to_string()),
        };
        let chess_move = moves::create(&db, input).await.unwrap();
        let input = PlayerInput {
            id: Some(1),
            username: Some("magnus".to_string()),
            password: Some("secret".to_string()),
            ..Default::default()
        };
        let player = players::create(&db, &PlainText, input).await.unwrap();

        assert!(matches!(
            get::<MovePlayer>(&db, chess_move.id).await,
            Err(ServiceError::NotFound(_))
        ));
        assert!(matches!(
            remove::<MovePlayer>(&db, chess_move.id).await,
            Err(ServiceError::IllegalOperation(_))
        ));

        let set_player = set::<MovePlayer>(&db, chess_move.id, player.id)
            .await
            .unwrap();
        assert_eq!(set_player, player);
        assert_eq!(get::<MovePlayer>(&db, chess_move.id).await.unwrap(), player);

        remove::<MovePlayer>(&db, chess_move.id).await.unwrap();
        assert!(matches!(
            get::<MovePlayer>(&db, chess_move.id).await,
            Err(ServiceError::NotFound(_))
        ));

        // Clearing the player keeps both records
        assert!(moves::get_by_id(&db, chess_move.id).await.is_ok());
        assert!(players::get_by_id(&db, player.id).await.is_ok());
    }

    #[tokio::test]
    async fn test_deleted_opening_clears_game() {
        let db = test_connection().await;

        let input = GameInput {
            id: Some(1),
            result: Some("1/2-1/2".to_string()),
            date: Some(Utc.with_ymd_and_hms(2023, 5, 20, 15, 30, 0).unwrap()),
            image: None,
        };
        let game = games::create(&db, input).await.unwrap();
        let input = OpeningInput {
            id: Some(1),
            name: Some("English Opening".to_string()),
            classification: Some(OpeningClassification::Flank),
        };
        let opening = openings::create(&db, input).await.unwrap();

        set::<GameOpening>(&db, game.id, opening.id).await.unwrap();
        assert_eq!(
            games::get_by_id(&db, game.id).await.unwrap().opening_id,
            Some(opening.id)
        );

        openings::delete(&db, opening.id).await.unwrap();

        let game = games::get_by_id(&db, game.id).await.unwrap();
        assert_eq!(game.opening_id, None);
    }

    #[tokio::test]
    async fn test_invalid_ids() {
        let db = test_connection().await;

        assert!(matches!(
            get::<GameOpening>(&db, 0).await,
            Err(ServiceError::IllegalOperation(_))
        ));
        assert!(matches!(
            get::<GameOpening>(&db, 999).await,
            Err(ServiceError::NotFound(_))
        ));
        assert!(matches!(
            set::<GameOpening>(&db, 999, 1).await,
            Err(ServiceError::NotFound(_))
        ));
    }
}

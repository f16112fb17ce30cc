//! Operations for one-to-many associations viewed from the parent,
//! managing the collection of children referencing it

use super::{distinct_ids, find_record, find_records, not_associated, ForeignKey, ModelOf};
use crate::{
    database::entities::Record,
    services::{require_id, ServiceResult},
    utils::types::RecordId,
};
use log::debug;
use sea_orm::{
    sea_query::Expr, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder, TransactionTrait,
};

/// Loads every child currently referencing the parent, without checking
/// the parent exists
///
/// `db`     The connection or transaction to use
/// `parent` The id of the parent record
pub async fn children_of<K, C>(db: &C, parent: RecordId) -> Result<Vec<ModelOf<K::Child>>, DbErr>
where
    K: ForeignKey,
    C: ConnectionTrait,
{
    K::Child::find()
        .filter(K::column().eq(parent))
        .order_by_asc(K::Child::id_column())
        .all(db)
        .await
}

/// Points the foreign key of the provided children at the parent
async fn attach<K, C>(db: &C, parent: RecordId, children: &[RecordId]) -> Result<(), DbErr>
where
    K: ForeignKey,
    C: ConnectionTrait,
{
    if children.is_empty() {
        return Ok(());
    }

    K::Child::update_many()
        .col_expr(K::column(), Expr::value(parent))
        .filter(K::Child::id_column().is_in(children.iter().copied()))
        .exec(db)
        .await?;
    Ok(())
}

/// Detaches the provided children from their parent. Orphaned children
/// are deleted when the key removes orphans.
pub(super) async fn detach<K, C>(db: &C, children: &[RecordId]) -> Result<(), DbErr>
where
    K: ForeignKey,
    C: ConnectionTrait,
{
    if children.is_empty() {
        return Ok(());
    }

    let filter = K::Child::id_column().is_in(children.iter().copied());

    if K::ORPHAN_REMOVAL {
        K::Child::delete_many().filter(filter).exec(db).await?;
    } else {
        K::Child::update_many()
            .col_expr(K::column(), Expr::value(Option::<RecordId>::None))
            .filter(filter)
            .exec(db)
            .await?;
    }
    Ok(())
}

/// Makes the parent the owner of the child, moving it away from any
/// previous parent
///
/// `db`     The database connection
/// `parent` The id of the parent record
/// `child`  The id of the child record
pub async fn add<K: ForeignKey>(
    db: &DatabaseConnection,
    parent: RecordId,
    child: RecordId,
) -> ServiceResult<ModelOf<K::Child>> {
    require_id(parent, K::Parent::NAME)?;
    require_id(child, K::Child::NAME)?;

    let txn = db.begin().await?;
    find_record::<K::Parent, _>(&txn, parent).await?;
    find_record::<K::Child, _>(&txn, child).await?;

    attach::<K, _>(&txn, parent, &[child]).await?;
    let model = find_record::<K::Child, _>(&txn, child).await?;

    txn.commit().await?;

    debug!(
        "Attached {} {} to {} {}",
        K::Child::NAME,
        child,
        K::Parent::NAME,
        parent
    );

    Ok(model)
}

/// Loads a child of the parent
///
/// `db`     The database connection
/// `parent` The id of the parent record
/// `child`  The id of the child record
pub async fn get_one<K: ForeignKey>(
    db: &DatabaseConnection,
    parent: RecordId,
    child: RecordId,
) -> ServiceResult<ModelOf<K::Child>> {
    require_id(parent, K::Parent::NAME)?;
    require_id(child, K::Child::NAME)?;

    let txn = db.begin().await?;
    find_record::<K::Parent, _>(&txn, parent).await?;
    let model = find_record::<K::Child, _>(&txn, child).await?;

    if K::parent_of(&model) != Some(parent) {
        return Err(not_associated(K::Parent::NAME, K::Child::NAME));
    }

    txn.commit().await?;
    Ok(model)
}

/// Loads every child of the parent
///
/// `db`     The database connection
/// `parent` The id of the parent record
pub async fn get_all<K: ForeignKey>(
    db: &DatabaseConnection,
    parent: RecordId,
) -> ServiceResult<Vec<ModelOf<K::Child>>> {
    require_id(parent, K::Parent::NAME)?;

    let txn = db.begin().await?;
    find_record::<K::Parent, _>(&txn, parent).await?;
    let models = children_of::<K, _>(&txn, parent).await?;
    txn.commit().await?;
    Ok(models)
}

/// Replaces the children of the parent with the provided records. Current
/// children missing from the list are detached.
///
/// `db`       The database connection
/// `parent`   The id of the parent record
/// `children` The ids of the new children
pub async fn replace_all<K: ForeignKey>(
    db: &DatabaseConnection,
    parent: RecordId,
    children: &[RecordId],
) -> ServiceResult<Vec<ModelOf<K::Child>>> {
    require_id(parent, K::Parent::NAME)?;
    let children = distinct_ids(children, K::Child::NAME)?;

    let txn = db.begin().await?;
    find_record::<K::Parent, _>(&txn, parent).await?;
    find_records::<K::Child, _>(&txn, &children).await?;

    let dropped: Vec<RecordId> = children_of::<K, _>(&txn, parent)
        .await?
        .iter()
        .map(K::Child::id_of)
        .filter(|id| !children.contains(id))
        .collect();

    detach::<K, _>(&txn, &dropped).await?;
    attach::<K, _>(&txn, parent, &children).await?;

    let models = children_of::<K, _>(&txn, parent).await?;
    txn.commit().await?;

    debug!(
        "Replaced {} children of {} {} ({} detached)",
        K::Child::NAME,
        K::Parent::NAME,
        parent,
        dropped.len()
    );

    Ok(models)
}

/// Detaches the child from the parent
///
/// `db`     The database connection
/// `parent` The id of the parent record
/// `child`  The id of the child record
pub async fn remove<K: ForeignKey>(
    db: &DatabaseConnection,
    parent: RecordId,
    child: RecordId,
) -> ServiceResult<()> {
    require_id(parent, K::Parent::NAME)?;
    require_id(child, K::Child::NAME)?;

    let txn = db.begin().await?;
    find_record::<K::Parent, _>(&txn, parent).await?;
    let model = find_record::<K::Child, _>(&txn, child).await?;

    if K::parent_of(&model) != Some(parent) {
        return Err(not_associated(K::Parent::NAME, K::Child::NAME));
    }

    detach::<K, _>(&txn, &[child]).await?;
    txn.commit().await?;

    debug!(
        "Detached {} {} from {} {}",
        K::Child::NAME,
        child,
        K::Parent::NAME,
        parent
    );

    Ok(())
}

#[cfg(test)]
mod test {
    use super::{add, get_all, get_one, remove, replace_all};
    use crate::{
        database::{test_connection, DatabaseConnection},
        services::{
            associations::{
                many,
                pairs::{
                    GameComments, GameMoves, LeagueTournaments, TournamentGames,
                    TournamentPlayers,
                },
            },
            comments::{self, CommentInput},
            credentials::PlainText,
            games::{self, GameInput},
            leagues::{self, LeagueInput},
            moves::{self, MoveInput},
            players::{self, PlayerInput},
            tournaments::{self, TournamentInput},
            ServiceError,
        },
    };
    use chrono::{TimeZone, Utc};

    async fn league(db: &DatabaseConnection, name: &str) -> i32 {
        let input = LeagueInput {
            id: Some(1),
            name: Some(name.to_string()),
            ..Default::default()
        };
        leagues::create(db, input).await.unwrap().id
    }

    async fn tournament(db: &DatabaseConnection, name: &str) -> i32 {
        let input = TournamentInput {
            id: Some(1),
            name: Some(name.to_string()),
            ..Default::default()
        };
        tournaments::create(db, input).await.unwrap().id
    }

    async fn game(db: &DatabaseConnection) -> i32 {
        let input = GameInput {
            id: Some(1),
            result: Some("1-0".to_string()),
            date: Some(Utc.with_ymd_and_hms(2023, 5, 20, 15, 30, 0).unwrap()),
            image: None,
        };
        games::create(db, input).await.unwrap().id
    }

    async fn chess_move(db: &DatabaseConnection, notation: &str) -> i32 {
        let input = MoveInput {
            id: Some(1),
            notation: Some(notation.to_string()),
        };
        moves::create(db, input).await.unwrap().id
    }

    async fn comment(db: &DatabaseConnection) -> i32 {
        let input = CommentInput {
            id: Some(1),
            comment: Some("Sharp line".to_string()),
            date: Some(Utc.with_ymd_and_hms(2023, 5, 21, 9, 0, 0).unwrap()),
        };
        comments::create(db, input).await.unwrap().id
    }

    #[tokio::test]
    async fn test_league_cascade() {
        let db = test_connection().await;

        let league = league(&db, "Uniandes Open").await;
        let tournament = tournament(&db, "Copa Uniandes").await;
        let game = game(&db).await;
        let chess_move = chess_move(&db, "e4").await;
        let comment = comment(&db).await;

        add::<LeagueTournaments>(&db, league, tournament).await.unwrap();
        add::<TournamentGames>(&db, tournament, game).await.unwrap();
        add::<GameMoves>(&db, game, chess_move).await.unwrap();
        add::<GameComments>(&db, game, comment).await.unwrap();

        leagues::delete(&db, league).await.unwrap();

        assert!(matches!(
            tournaments::get_by_id(&db, tournament).await,
            Err(ServiceError::NotFound(_))
        ));
        assert!(matches!(
            games::get_by_id(&db, game).await,
            Err(ServiceError::NotFound(_))
        ));
        assert!(matches!(
            moves::get_by_id(&db, chess_move).await,
            Err(ServiceError::NotFound(_))
        ));
        assert!(matches!(
            comments::get_by_id(&db, comment).await,
            Err(ServiceError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_tournament_delete_keeps_league_and_players() {
        let db = test_connection().await;

        let league = league(&db, "Uniandes Open").await;
        let tournament = tournament(&db, "Copa Uniandes").await;
        let input = PlayerInput {
            id: Some(1),
            username: Some("magnus".to_string()),
            password: Some("secret".to_string()),
            ..Default::default()
        };
        let player = players::create(&db, &PlainText, input).await.unwrap();

        add::<LeagueTournaments>(&db, league, tournament).await.unwrap();
        many::add::<TournamentPlayers>(&db, tournament, player.id)
            .await
            .unwrap();

        tournaments::delete(&db, tournament).await.unwrap();

        assert!(leagues::get_by_id(&db, league).await.is_ok());
        assert!(players::get_by_id(&db, player.id).await.is_ok());
        assert!(get_all::<LeagueTournaments>(&db, league)
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn test_detach_without_orphan_removal() {
        let db = test_connection().await;

        let league = league(&db, "Uniandes Open").await;
        let tournament = tournament(&db, "Copa Uniandes").await;

        let added = add::<LeagueTournaments>(&db, league, tournament).await.unwrap();
        assert_eq!(added.league_id, Some(league));
        assert_eq!(
            get_one::<LeagueTournaments>(&db, league, tournament)
                .await
                .unwrap()
                .id,
            tournament
        );

        remove::<LeagueTournaments>(&db, league, tournament)
            .await
            .unwrap();

        let detached = tournaments::get_by_id(&db, tournament).await.unwrap();
        assert_eq!(detached.league_id, None);
        assert!(matches!(
            get_one::<LeagueTournaments>(&db, league, tournament).await,
            Err(ServiceError::IllegalOperation(_))
        ));
        assert!(matches!(
            remove::<LeagueTournaments>(&db, league, tournament).await,
            Err(ServiceError::IllegalOperation(_))
        ));
    }

    #[tokio::test]
    async fn test_orphan_removal() {
        let db = test_connection().await;

        let game = game(&db).await;
        let first = chess_move(&db, "e4").await;
        let second = chess_move(&db, "e5").await;
        let third = chess_move(&db, "Nf3").await;

        let attached = replace_all::<GameMoves>(&db, game, &[first, second])
            .await
            .unwrap();
        assert_eq!(attached.len(), 2);

        let attached = replace_all::<GameMoves>(&db, game, &[second, third])
            .await
            .unwrap();
        let ids: Vec<i32> = attached.iter().map(|value| value.id).collect();
        assert_eq!(ids, vec![second, third]);

        // Dropped moves are deleted along with the association
        assert!(matches!(
            moves::get_by_id(&db, first).await,
            Err(ServiceError::NotFound(_))
        ));

        let comment = comment(&db).await;
        add::<GameComments>(&db, game, comment).await.unwrap();
        remove::<GameComments>(&db, game, comment).await.unwrap();
        assert!(matches!(
            comments::get_by_id(&db, comment).await,
            Err(ServiceError::NotFound(_))
        ));
        assert!(games::get_by_id(&db, game).await.is_ok());
    }

    #[tokio::test]
    async fn test_moving_child() {
        let db = test_connection().await;

        let first = league(&db, "Uniandes Open").await;
        let second = league(&db, "Bogota Open").await;
        let tournament = tournament(&db, "Copa Uniandes").await;

        add::<LeagueTournaments>(&db, first, tournament).await.unwrap();
        add::<LeagueTournaments>(&db, second, tournament).await.unwrap();

        assert!(get_all::<LeagueTournaments>(&db, first)
            .await
            .unwrap()
            .is_empty());
        assert_eq!(
            get_all::<LeagueTournaments>(&db, second).await.unwrap().len(),
            1
        );
    }

    #[tokio::test]
    async fn test_invalid_ids() {
        let db = test_connection().await;

        let league = league(&db, "Uniandes Open").await;

        assert!(matches!(
            add::<LeagueTournaments>(&db, league, 0).await,
            Err(ServiceError::IllegalOperation(_))
        ));
        assert!(matches!(
            add::<LeagueTournaments>(&db, league, 999).await,
            Err(ServiceError::NotFound(_))
        ));
        assert!(matches!(
            get_all::<LeagueTournaments>(&db, 999).await,
            Err(ServiceError::NotFound(_))
        ));
        assert!(matches!(
            replace_all::<LeagueTournaments>(&db, league, &[999]).await,
            Err(ServiceError::NotFound(_))
        ));
    }
}

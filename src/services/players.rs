use super::{
    all_records,
    associations::{
        find_record,
        many::related,
        pairs::{PlayerGames, PlayerLeagues, PlayerTournaments},
    },
    credentials::{seal_replacing, CredentialStore},
    day_not_in_future, delete_record, record_by_id, require, require_id, require_some_id,
    ServiceResult,
};
use crate::{
    database::entities::{players, Game, League, Player, Tournament},
    utils::types::RecordId,
};
use chrono::NaiveDate;
use log::debug;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ConnectionTrait, DatabaseConnection, Set,
    TransactionTrait,
};
use serde::{Deserialize, Serialize};

/// Player details provided when creating or updating a player
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerInput {
    pub id: Option<RecordId>,
    pub name: Option<String>,
    #[serde(rename = "photoURL")]
    pub photo_url: Option<String>,
    pub username: Option<String>,
    /// Raw password, sealed by the credential store before storing
    pub password: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub birth_place: Option<String>,
    pub elo_rating: Option<i32>,
}

impl PlayerInput {
    /// Validates the input producing the model to store without its
    /// password along with the raw password
    fn into_active(self) -> ServiceResult<(players::ActiveModel, String)> {
        let username = require(self.username, "player username")?;
        let password = require(self.password, "player password")?;
        if let Some(birth_date) = &self.birth_date {
            day_not_in_future(birth_date, "player birth date")?;
        }

        let player = players::ActiveModel {
            id: NotSet,
            name: Set(self.name),
            photo_url: Set(self.photo_url),
            username: Set(username),
            password: NotSet,
            birth_date: Set(self.birth_date),
            birth_place: Set(self.birth_place),
            elo_rating: Set(self.elo_rating),
        };
        Ok((player, password))
    }
}

/// Player along with its directly related records
#[derive(Debug, Serialize)]
pub struct PlayerDetail {
    #[serde(flatten)]
    pub player: Player,
    pub leagues: Vec<League>,
    pub tournaments: Vec<Tournament>,
    pub games: Vec<Game>,
}

pub async fn create(
    db: &DatabaseConnection,
    store: &dyn CredentialStore,
    input: PlayerInput,
) -> ServiceResult<Player> {
    require_some_id(input.id, "player")?;
    let (mut player, password) = input.into_active()?;
    player.password = Set(store.seal(&password)?);

    let txn = db.begin().await?;
    let player = player.insert(&txn).await?;
    txn.commit().await?;

    debug!("Created player {} ({})", player.id, player.username);
    Ok(player)
}

pub async fn get_all(db: &DatabaseConnection) -> ServiceResult<Vec<Player>> {
    all_records::<players::Entity>(db).await
}

pub async fn get_by_id<C: ConnectionTrait>(db: &C, id: RecordId) -> ServiceResult<Player> {
    record_by_id::<players::Entity, _>(db, id).await
}

/// Loads the player with the leagues, tournaments and games they take
/// part in
pub async fn detail(db: &DatabaseConnection, id: RecordId) -> ServiceResult<PlayerDetail> {
    let txn = db.begin().await?;
    let player = get_by_id(&txn, id).await?;
    let leagues = related::<PlayerLeagues, _>(&txn, id).await?;
    let tournaments = related::<PlayerTournaments, _>(&txn, id).await?;
    let games = related::<PlayerGames, _>(&txn, id).await?;
    txn.commit().await?;

    Ok(PlayerDetail {
        player,
        leagues,
        tournaments,
        games,
    })
}

pub async fn update(
    db: &DatabaseConnection,
    store: &dyn CredentialStore,
    id: RecordId,
    input: PlayerInput,
) -> ServiceResult<Player> {
    require_id(id, "player")?;
    let (mut player, password) = input.into_active()?;

    let txn = db.begin().await?;
    let current = find_record::<players::Entity, _>(&txn, id).await?;
    player.id = Set(id);
    player.password = Set(seal_replacing(
        store,
        &password,
        Some(current.password.as_str()),
    )?);
    let player = player.update(&txn).await?;
    txn.commit().await?;

    debug!("Updated player {}", id);
    Ok(player)
}

pub async fn delete(db: &DatabaseConnection, id: RecordId) -> ServiceResult<()> {
    delete_record::<players::Entity>(db, id).await
}

#[cfg(test)]
mod test {
    use super::{create, get_by_id, update, PlayerInput};
    use crate::{
        database::test_connection,
        services::{
            credentials::{Argon2Hashed, CredentialStore, PlainText},
            ServiceError, CONSTRAINT_MESSAGE,
        },
    };
    use chrono::{Duration, NaiveDate, Utc};

    fn player(username: &str) -> PlayerInput {
        PlayerInput {
            id: Some(1),
            name: Some("Magnus Carlsen".to_string()),
            photo_url: None,
            username: Some(username.to_string()),
            password: Some("secret".to_string()),
            birth_date: NaiveDate::from_ymd_opt(1990, 11, 30),
            birth_place: Some("Tonsberg".to_string()),
            elo_rating: Some(2830),
        }
    }

    #[tokio::test]
    async fn test_create_round_trip() {
        let db = test_connection().await;

        let created = create(&db, &PlainText, player("magnus")).await.unwrap();
        let found = get_by_id(&db, created.id).await.unwrap();

        assert_eq!(created, found);
        assert_eq!(found.password, "secret");
        assert_eq!(found.birth_date, NaiveDate::from_ymd_opt(1990, 11, 30));
    }

    #[tokio::test]
    async fn test_password_sealed() {
        let db = test_connection().await;
        let store = Argon2Hashed;

        let created = create(&db, &store, player("magnus")).await.unwrap();
        assert_ne!(created.password, "secret");
        assert!(store.verify("secret", &created.password));

        // Same password keeps the stored hash
        let updated = update(&db, &store, created.id, player("magnus"))
            .await
            .unwrap();
        assert_eq!(updated.password, created.password);

        let mut input = player("magnus");
        input.password = Some("changed".to_string());
        let updated = update(&db, &store, created.id, input).await.unwrap();
        assert!(store.verify("changed", &updated.password));
    }

    #[tokio::test]
    async fn test_password_not_serialized() {
        let db = test_connection().await;

        let created = create(&db, &PlainText, player("magnus")).await.unwrap();
        let value = serde_json::to_value(&created).unwrap();

        assert!(value.get("password").is_none());
        assert_eq!(value["username"], "magnus");
        assert_eq!(value["eloRating"], 2830);
        assert!(value.get("photoURL").is_some());
    }

    #[tokio::test]
    async fn test_required_fields() {
        let db = test_connection().await;

        let mut input = player("magnus");
        input.username = None;
        assert!(matches!(
            create(&db, &PlainText, input).await,
            Err(ServiceError::IllegalOperation(_))
        ));

        let mut input = player("magnus");
        input.password = None;
        assert!(matches!(
            create(&db, &PlainText, input).await,
            Err(ServiceError::IllegalOperation(_))
        ));
    }

    #[tokio::test]
    async fn test_birth_date() {
        let db = test_connection().await;

        let mut input = player("future");
        input.birth_date = Some((Utc::now() + Duration::days(365)).date_naive());
        assert!(matches!(
            create(&db, &PlainText, input).await,
            Err(ServiceError::IllegalOperation(_))
        ));

        let mut input = player("today");
        input.birth_date = Some(Utc::now().date_naive());
        assert!(create(&db, &PlainText, input).await.is_ok());
    }

    #[tokio::test]
    async fn test_duplicate_username() {
        let db = test_connection().await;

        create(&db, &PlainText, player("magnus")).await.unwrap();
        let other = create(&db, &PlainText, player("hikaru")).await.unwrap();

        match update(&db, &PlainText, other.id, player("magnus")).await {
            Err(ServiceError::IllegalOperation(message)) => {
                assert_eq!(message, CONSTRAINT_MESSAGE)
            }
            other => panic!("Expected illegal operation got {:?}", other),
        }
    }
}

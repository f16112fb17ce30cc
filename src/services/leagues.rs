use super::{
    all_records,
    associations::{
        children::children_of,
        find_record,
        many::related,
        pairs::{LeagueAdministrators, LeaguePlayers, LeagueTournaments},
    },
    delete_record, record_by_id, require, require_id, require_some_id, ServiceResult,
};
use crate::{
    database::entities::{leagues, Administrator, League, Player, Tournament},
    utils::types::RecordId,
};
use log::debug;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ConnectionTrait, DatabaseConnection, Set,
    TransactionTrait,
};
use serde::{Deserialize, Serialize};

/// League details provided when creating or updating a league
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeagueInput {
    pub id: Option<RecordId>,
    pub name: Option<String>,
    pub city: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    #[serde(rename = "webURL")]
    pub web_url: Option<String>,
}

impl LeagueInput {
    fn into_active(self) -> ServiceResult<leagues::ActiveModel> {
        Ok(leagues::ActiveModel {
            id: NotSet,
            name: Set(require(self.name, "league name")?),
            city: Set(self.city),
            address: Set(self.address),
            phone: Set(self.phone),
            web_url: Set(self.web_url),
        })
    }
}

/// League along with its directly related records
#[derive(Debug, Serialize)]
pub struct LeagueDetail {
    #[serde(flatten)]
    pub league: League,
    pub players: Vec<Player>,
    pub administrators: Vec<Administrator>,
    pub tournaments: Vec<Tournament>,
}

pub async fn create(db: &DatabaseConnection, input: LeagueInput) -> ServiceResult<League> {
    require_some_id(input.id, "league")?;
    let league = input.into_active()?;

    let txn = db.begin().await?;
    let league = league.insert(&txn).await?;
    txn.commit().await?;

    debug!("Created league {} ({})", league.id, league.name);
    Ok(league)
}

pub async fn get_all(db: &DatabaseConnection) -> ServiceResult<Vec<League>> {
    all_records::<leagues::Entity>(db).await
}

pub async fn get_by_id<C: ConnectionTrait>(db: &C, id: RecordId) -> ServiceResult<League> {
    record_by_id::<leagues::Entity, _>(db, id).await
}

/// Loads the league with its players, administrators and tournaments
pub async fn detail(db: &DatabaseConnection, id: RecordId) -> ServiceResult<LeagueDetail> {
    let txn = db.begin().await?;
    let league = get_by_id(&txn, id).await?;
    let players = related::<LeaguePlayers, _>(&txn, id).await?;
    let administrators = related::<LeagueAdministrators, _>(&txn, id).await?;
    let tournaments = children_of::<LeagueTournaments, _>(&txn, id).await?;
    txn.commit().await?;

    Ok(LeagueDetail {
        league,
        players,
        administrators,
        tournaments,
    })
}

pub async fn update(
    db: &DatabaseConnection,
    id: RecordId,
    input: LeagueInput,
) -> ServiceResult<League> {
    require_id(id, "league")?;
    let mut league = input.into_active()?;

    let txn = db.begin().await?;
    find_record::<leagues::Entity, _>(&txn, id).await?;
    league.id = Set(id);
    let league = league.update(&txn).await?;
    txn.commit().await?;

    debug!("Updated league {}", id);
    Ok(league)
}

/// Deletes the league along with its tournaments
pub async fn delete(db: &DatabaseConnection, id: RecordId) -> ServiceResult<()> {
    delete_record::<leagues::Entity>(db, id).await
}

#[cfg(test)]
mod test {
    use super::{create, delete, detail, get_all, get_by_id, update, LeagueInput};
    use crate::{
        database::test_connection,
        services::{ServiceError, CONSTRAINT_MESSAGE},
    };

    fn league(name: &str) -> LeagueInput {
        LeagueInput {
            id: Some(1),
            name: Some(name.to_string()),
            city: Some("Bogota".to_string()),
            address: Some("Cra 1 # 18A-12".to_string()),
            phone: Some("6013394949".to_string()),
            web_url: Some("https://uniandes.edu.co".to_string()),
        }
    }

    #[tokio::test]
    async fn test_create_round_trip() {
        let db = test_connection().await;

        let created = create(&db, league("Uniandes Open")).await.unwrap();
        let found = get_by_id(&db, created.id).await.unwrap();

        assert_eq!(created, found);
        assert_eq!(found.name, "Uniandes Open");
        assert_eq!(found.web_url.as_deref(), Some("https://uniandes.edu.co"));
        assert_eq!(get_all(&db).await.unwrap(), vec![found]);
    }

    #[tokio::test]
    async fn test_create_requires_id_and_name() {
        let db = test_connection().await;

        let mut input = league("No id");
        input.id = None;
        assert!(matches!(
            create(&db, input).await,
            Err(ServiceError::IllegalOperation(_))
        ));

        let mut input = league("Zero id");
        input.id = Some(0);
        assert!(matches!(
            create(&db, input).await,
            Err(ServiceError::IllegalOperation(_))
        ));

        let mut input = league("");
        input.name = None;
        assert!(matches!(
            create(&db, input).await,
            Err(ServiceError::IllegalOperation(_))
        ));

        assert!(get_all(&db).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_duplicate_name() {
        let db = test_connection().await;

        create(&db, league("Uniandes Open")).await.unwrap();
        match create(&db, league("Uniandes Open")).await {
            Err(ServiceError::IllegalOperation(message)) => {
                assert_eq!(message, CONSTRAINT_MESSAGE)
            }
            other => panic!("Expected illegal operation got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_unknown_and_zero_ids() {
        let db = test_connection().await;

        assert!(matches!(
            get_by_id(&db, 0).await,
            Err(ServiceError::IllegalOperation(_))
        ));
        assert!(matches!(
            get_by_id(&db, 999).await,
            Err(ServiceError::NotFound(_))
        ));
        assert!(matches!(
            update(&db, 999, league("Missing")).await,
            Err(ServiceError::NotFound(_))
        ));
        assert!(matches!(
            delete(&db, 0).await,
            Err(ServiceError::IllegalOperation(_))
        ));
        assert!(matches!(
            delete(&db, 999).await,
            Err(ServiceError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_update_keeps_id() {
        let db = test_connection().await;

        let created = create(&db, league("Uniandes Open")).await.unwrap();
        let mut input = league("Uniandes Closed");
        input.city = None;
        let updated = update(&db, created.id, input).await.unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.name, "Uniandes Closed");
        assert_eq!(updated.city, None);
        assert_eq!(get_by_id(&db, created.id).await.unwrap(), updated);
    }

    #[tokio::test]
    async fn test_delete() {
        let db = test_connection().await;

        let created = create(&db, league("Uniandes Open")).await.unwrap();
        delete(&db, created.id).await.unwrap();

        assert!(matches!(
            get_by_id(&db, created.id).await,
            Err(ServiceError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_detail_of_empty_league() {
        let db = test_connection().await;

        let created = create(&db, league("Uniandes Open")).await.unwrap();
        let detail = detail(&db, created.id).await.unwrap();

        assert_eq!(detail.league, created);
        assert!(detail.players.is_empty());
        assert!(detail.administrators.is_empty());
        assert!(detail.tournaments.is_empty());
    }
}

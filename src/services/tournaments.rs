use super::{
    all_records,
    associations::{
        children::children_of,
        find_record,
        many::related,
        pairs::{TournamentGames, TournamentLeague, TournamentPlayers},
        parent::parent_of,
    },
    delete_record, not_in_future, record_by_id, require, require_id, require_some_id,
    ServiceResult,
};
use crate::{
    database::entities::{tournaments, Game, League, Player, Tournament},
    utils::types::RecordId,
};
use chrono::{DateTime, Utc};
use log::debug;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ConnectionTrait, DatabaseConnection, Set,
    TransactionTrait,
};
use serde::{Deserialize, Serialize};

/// Tournament details provided when creating or updating a tournament
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TournamentInput {
    pub id: Option<RecordId>,
    pub name: Option<String>,
    pub location: Option<String>,
    pub date: Option<DateTime<Utc>>,
    pub prize: Option<String>,
    pub image: Option<String>,
}

impl TournamentInput {
    /// The league link is managed through the league associations and is
    /// left untouched here
    fn into_active(self) -> ServiceResult<tournaments::ActiveModel> {
        if let Some(date) = &self.date {
            not_in_future(date, "tournament date")?;
        }

        Ok(tournaments::ActiveModel {
            id: NotSet,
            name: Set(require(self.name, "tournament name")?),
            location: Set(self.location),
            date: Set(self.date),
            prize: Set(self.prize),
            image: Set(self.image),
            league_id: NotSet,
        })
    }
}

/// Tournament along with its directly related records
#[derive(Debug, Serialize)]
pub struct TournamentDetail {
    #[serde(flatten)]
    pub tournament: Tournament,
    pub league: Option<League>,
    pub players: Vec<Player>,
    pub games: Vec<Game>,
}

pub async fn create(db: &DatabaseConnection, input: TournamentInput) -> ServiceResult<Tournament> {
    require_some_id(input.id, "tournament")?;
    let tournament = input.into_active()?;

    let txn = db.begin().await?;
    let tournament = tournament.insert(&txn).await?;
    txn.commit().await?;

    debug!(
        "Created tournament {} ({})",
        tournament.id, tournament.name
    );
    Ok(tournament)
}

pub async fn get_all(db: &DatabaseConnection) -> ServiceResult<Vec<Tournament>> {
    all_records::<tournaments::Entity>(db).await
}

pub async fn get_by_id<C: ConnectionTrait>(db: &C, id: RecordId) -> ServiceResult<Tournament> {
    record_by_id::<tournaments::Entity, _>(db, id).await
}

/// Loads the tournament with its league, players and games
pub async fn detail(db: &DatabaseConnection, id: RecordId) -> ServiceResult<TournamentDetail> {
    let txn = db.begin().await?;
    let tournament = get_by_id(&txn, id).await?;
    let league = parent_of::<TournamentLeague, _>(&txn, &tournament).await?;
    let players = related::<TournamentPlayers, _>(&txn, id).await?;
    let games = children_of::<TournamentGames, _>(&txn, id).await?;
    txn.commit().await?;

    Ok(TournamentDetail {
        tournament,
        league,
        players,
        games,
    })
}

pub async fn update(
    db: &DatabaseConnection,
    id: RecordId,
    input: TournamentInput,
) -> ServiceResult<Tournament> {
    require_id(id, "tournament")?;
    let mut tournament = input.into_active()?;

    let txn = db.begin().await?;
    find_record::<tournaments::Entity, _>(&txn, id).await?;
    tournament.id = Set(id);
    let tournament = tournament.update(&txn).await?;
    txn.commit().await?;

    debug!("Updated tournament {}", id);
    Ok(tournament)
}

/// Deletes the tournament along with its games
pub async fn delete(db: &DatabaseConnection, id: RecordId) -> ServiceResult<()> {
    delete_record::<tournaments::Entity>(db, id).await
}

#[cfg(test)]
mod test {
    use super::{create, get_by_id, update, TournamentInput};
    use crate::{database::test_connection, services::ServiceError};
    use chrono::{Duration, TimeZone, Utc};

    fn tournament(name: &str) -> TournamentInput {
        TournamentInput {
            id: Some(1),
            name: Some(name.to_string()),
            location: Some("Bogota".to_string()),
            date: Some(Utc.with_ymd_and_hms(2023, 5, 20, 14, 0, 0).unwrap()),
            prize: Some("1000 USD".to_string()),
            image: None,
        }
    }

    #[tokio::test]
    async fn test_create_round_trip() {
        let db = test_connection().await;

        let created = create(&db, tournament("Copa Uniandes")).await.unwrap();
        let found = get_by_id(&db, created.id).await.unwrap();

        assert_eq!(created, found);
        assert_eq!(found.date, tournament("").date);
        assert_eq!(found.league_id, None);
    }

    #[tokio::test]
    async fn test_future_date_rejected() {
        let db = test_connection().await;

        let mut input = tournament("Copa Futura");
        input.date = Some(Utc::now() + Duration::days(365));
        assert!(matches!(
            create(&db, input).await,
            Err(ServiceError::IllegalOperation(_))
        ));

        let created = create(&db, tournament("Copa Uniandes")).await.unwrap();
        let mut input = tournament("Copa Uniandes");
        input.date = Some(Utc::now() + Duration::days(365));
        assert!(matches!(
            update(&db, created.id, input).await,
            Err(ServiceError::IllegalOperation(_))
        ));

        // Tournaments without a date are allowed
        let mut input = tournament("Copa Sin Fecha");
        input.date = None;
        assert!(create(&db, input).await.is_ok());
    }

    #[tokio::test]
    async fn test_missing_name() {
        let db = test_connection().await;

        let mut input = tournament("");
        input.name = None;
        assert!(matches!(
            create(&db, input).await,
            Err(ServiceError::IllegalOperation(_))
        ));
    }
}

use super::{
    all_records,
    associations::{
        children::children_of,
        find_record,
        many::related,
        pairs::{GameOpening, OpeningMoves},
    },
    delete_record, record_by_id, require, require_id, require_some_id, ServiceResult,
};
use crate::{
    database::entities::{openings, Game, Move, Opening, OpeningClassification},
    utils::types::RecordId,
};
use log::debug;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ConnectionTrait, DatabaseConnection, Set,
    TransactionTrait,
};
use serde::{Deserialize, Serialize};

/// Opening details provided when creating or updating an opening
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpeningInput {
    pub id: Option<RecordId>,
    pub name: Option<String>,
    pub classification: Option<OpeningClassification>,
}

impl OpeningInput {
    fn into_active(self) -> ServiceResult<openings::ActiveModel> {
        Ok(openings::ActiveModel {
            id: NotSet,
            name: Set(self.name),
            classification: Set(require(self.classification, "opening classification")?),
        })
    }
}

/// Opening along with its moves and the games it was played in
#[derive(Debug, Serialize)]
pub struct OpeningDetail {
    #[serde(flatten)]
    pub opening: Opening,
    pub moves: Vec<Move>,
    pub games: Vec<Game>,
}

pub async fn create(db: &DatabaseConnection, input: OpeningInput) -> ServiceResult<Opening> {
    require_some_id(input.id, "opening")?;
    let opening = input.into_active()?;

    let txn = db.begin().await?;
    let opening = opening.insert(&txn).await?;
    txn.commit().await?;

    debug!("Created opening {}", opening.id);
    Ok(opening)
}

pub async fn get_all(db: &DatabaseConnection) -> ServiceResult<Vec<Opening>> {
    all_records::<openings::Entity>(db).await
}

pub async fn get_by_id<C: ConnectionTrait>(db: &C, id: RecordId) -> ServiceResult<Opening> {
    record_by_id::<openings::Entity, _>(db, id).await
}

pub async fn detail(db: &DatabaseConnection, id: RecordId) -> ServiceResult<OpeningDetail> {
    let txn = db.begin().await?;
    let opening = get_by_id(&txn, id).await?;
    let moves = related::<OpeningMoves, _>(&txn, id).await?;
    let games = children_of::<GameOpening, _>(&txn, id).await?;
    txn.commit().await?;

    Ok(OpeningDetail {
        opening,
        moves,
        games,
    })
}

pub async fn update(
    db: &DatabaseConnection,
    id: RecordId,
    input: OpeningInput,
) -> ServiceResult<Opening> {
    require_id(id, "opening")?;
    let mut opening = input.into_active()?;

    let txn = db.begin().await?;
    find_record::<openings::Entity, _>(&txn, id).await?;
    opening.id = Set(id);
    let opening = opening.update(&txn).await?;
    txn.commit().await?;

    debug!("Updated opening {}", id);
    Ok(opening)
}

/// Deletes the opening. Games that used it are kept without an opening.
pub async fn delete(db: &DatabaseConnection, id: RecordId) -> ServiceResult<()> {
    delete_record::<openings::Entity>(db, id).await
}

#[cfg(test)]
mod test {
    use super::{create, get_by_id, OpeningInput};
    use crate::{
        database::{entities::OpeningClassification, test_connection},
        services::ServiceError,
    };

    #[tokio::test]
    async fn test_create_round_trip() {
        let db = test_connection().await;

        let input: OpeningInput = serde_json::from_str(
            r#"{ "id": 1, "name": "Sicilian Defense", "classification": "SEMI-OPEN" }"#,
        )
        .unwrap();
        let created = create(&db, input).await.unwrap();
        let found = get_by_id(&db, created.id).await.unwrap();

        assert_eq!(created, found);
        assert_eq!(found.classification, OpeningClassification::SemiOpen);
        assert_eq!(
            serde_json::to_value(&found).unwrap()["classification"],
            "SEMI-OPEN"
        );
    }

    #[tokio::test]
    async fn test_classification_required() {
        let db = test_connection().await;

        let input = OpeningInput {
            id: Some(1),
            name: Some("Ruy Lopez".to_string()),
            classification: None,
        };
        assert!(matches!(
            create(&db, input).await,
            Err(ServiceError::IllegalOperation(_))
        ));
    }

    #[test]
    fn test_unknown_classification() {
        assert!(
            serde_json::from_str::<OpeningInput>(r#"{ "classification": "SIDEWAYS" }"#).is_err()
        );
    }
}

use super::{
    all_records,
    associations::{
        find_record,
        pairs::{CommentAdministrator, CommentGame},
        parent::parent_of,
    },
    delete_record, not_in_future, record_by_id, require, require_id, require_some_id,
    ServiceResult,
};
use crate::{
    database::entities::{comments, Administrator, Comment, Game},
    utils::types::RecordId,
};
use chrono::{DateTime, Utc};
use log::debug;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ConnectionTrait, DatabaseConnection, Set,
    TransactionTrait,
};
use serde::{Deserialize, Serialize};

/// Comment details provided when creating or updating a comment
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentInput {
    pub id: Option<RecordId>,
    pub comment: Option<String>,
    pub date: Option<DateTime<Utc>>,
}

impl CommentInput {
    fn into_active(self) -> ServiceResult<comments::ActiveModel> {
        let comment = require(self.comment, "comment text")?;
        let date = require(self.date, "comment date")?;
        not_in_future(&date, "comment date")?;

        Ok(comments::ActiveModel {
            id: NotSet,
            comment: Set(comment),
            date: Set(date),
            game_id: NotSet,
            author_id: NotSet,
        })
    }
}

/// Comment along with its author and the game it was written on
#[derive(Debug, Serialize)]
pub struct CommentDetail {
    #[serde(flatten)]
    pub comment: Comment,
    pub author: Option<Administrator>,
    pub game: Option<Game>,
}

pub async fn create(db: &DatabaseConnection, input: CommentInput) -> ServiceResult<Comment> {
    require_some_id(input.id, "comment")?;
    let comment = input.into_active()?;

    let txn = db.begin().await?;
    let comment = comment.insert(&txn).await?;
    txn.commit().await?;

    debug!("Created comment {}", comment.id);
    Ok(comment)
}

pub async fn get_all(db: &DatabaseConnection) -> ServiceResult<Vec<Comment>> {
    all_records::<comments::Entity>(db).await
}

pub async fn get_by_id<C: ConnectionTrait>(db: &C, id: RecordId) -> ServiceResult<Comment> {
    record_by_id::<comments::Entity, _>(db, id).await
}

pub async fn detail(db: &DatabaseConnection, id: RecordId) -> ServiceResult<CommentDetail> {
    let txn = db.begin().await?;
    let comment = get_by_id(&txn, id).await?;
    let author = parent_of::<CommentAdministrator, _>(&txn, &comment).await?;
    let game = parent_of::<CommentGame, _>(&txn, &comment).await?;
    txn.commit().await?;

    Ok(CommentDetail {
        comment,
        author,
        game,
    })
}

pub async fn update(
    db: &DatabaseConnection,
    id: RecordId,
    input: CommentInput,
) -> ServiceResult<Comment> {
    require_id(id, "comment")?;
    let mut comment = input.into_active()?;

    let txn = db.begin().await?;
    find_record::<comments::Entity, _>(&txn, id).await?;
    comment.id = Set(id);
    let comment = comment.update(&txn).await?;
    txn.commit().await?;

    debug!("Updated comment {}", id);
    Ok(comment)
}

pub async fn delete(db: &DatabaseConnection, id: RecordId) -> ServiceResult<()> {
    delete_record::<comments::Entity>(db, id).await
}

#[cfg(test)]
mod test {
    use super::{create, get_by_id, update, CommentInput};
    use crate::{database::test_connection, services::ServiceError};
    use chrono::{Duration, TimeZone, Utc};

    fn comment(text: &str) -> CommentInput {
        CommentInput {
            id: Some(1),
            comment: Some(text.to_string()),
            date: Some(Utc.with_ymd_and_hms(2023, 5, 21, 9, 0, 0).unwrap()),
        }
    }

    #[tokio::test]
    async fn test_create_round_trip() {
        let db = test_connection().await;

        let created = create(&db, comment("Great endgame")).await.unwrap();
        let found = get_by_id(&db, created.id).await.unwrap();

        assert_eq!(created, found);
        assert_eq!(found.comment, "Great endgame");
        assert_eq!(found.author_id, None);
    }

    #[tokio::test]
    async fn test_validation() {
        let db = test_connection().await;

        let mut input = comment("From the future");
        input.date = Some(Utc::now() + Duration::days(365));
        assert!(matches!(
            create(&db, input).await,
            Err(ServiceError::IllegalOperation(_))
        ));

        let mut input = comment("");
        input.comment = None;
        assert!(matches!(
            create(&db, input).await,
            Err(ServiceError::IllegalOperation(_))
        ));

        assert!(matches!(
            update(&db, 0, comment("Zero")).await,
            Err(ServiceError::IllegalOperation(_))
        ));
        assert!(matches!(
            update(&db, 42, comment("Missing")).await,
            Err(ServiceError::NotFound(_))
        ));
    }
}

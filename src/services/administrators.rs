use super::{
    all_records,
    associations::{
        children::children_of,
        find_record,
        many::related,
        pairs::{AdministratorLeagues, CommentAdministrator},
    },
    credentials::{seal_replacing, CredentialStore},
    delete_record, record_by_id, require, require_id, require_some_id, ServiceResult,
};
use crate::{
    database::entities::{administrators, Administrator, Comment, League},
    utils::types::RecordId,
};
use log::debug;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ConnectionTrait, DatabaseConnection, Set,
    TransactionTrait,
};
use serde::{Deserialize, Serialize};

/// Administrator details provided when creating or updating an
/// administrator
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdministratorInput {
    pub id: Option<RecordId>,
    pub name: Option<String>,
    #[serde(rename = "photoURL")]
    pub photo_url: Option<String>,
    #[serde(rename = "IDNumber")]
    pub id_number: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
}

impl AdministratorInput {
    fn into_active(self) -> ServiceResult<(administrators::ActiveModel, String)> {
        let id_number = require(self.id_number, "administrator IDNumber")?;
        let username = require(self.username, "administrator username")?;
        let password = require(self.password, "administrator password")?;

        let administrator = administrators::ActiveModel {
            id: NotSet,
            name: Set(self.name),
            photo_url: Set(self.photo_url),
            id_number: Set(id_number),
            username: Set(username),
            password: NotSet,
        };
        Ok((administrator, password))
    }
}

/// Administrator along with the leagues they manage and the comments
/// they wrote
#[derive(Debug, Serialize)]
pub struct AdministratorDetail {
    #[serde(flatten)]
    pub administrator: Administrator,
    pub leagues: Vec<League>,
    pub comments: Vec<Comment>,
}

pub async fn create(
    db: &DatabaseConnection,
    store: &dyn CredentialStore,
    input: AdministratorInput,
) -> ServiceResult<Administrator> {
    require_some_id(input.id, "administrator")?;
    let (mut administrator, password) = input.into_active()?;
    administrator.password = Set(store.seal(&password)?);

    let txn = db.begin().await?;
    let administrator = administrator.insert(&txn).await?;
    txn.commit().await?;

    debug!(
        "Created administrator {} ({})",
        administrator.id, administrator.username
    );
    Ok(administrator)
}

pub async fn get_all(db: &DatabaseConnection) -> ServiceResult<Vec<Administrator>> {
    all_records::<administrators::Entity>(db).await
}

pub async fn get_by_id<C: ConnectionTrait>(db: &C, id: RecordId) -> ServiceResult<Administrator> {
    record_by_id::<administrators::Entity, _>(db, id).await
}

pub async fn detail(db: &DatabaseConnection, id: RecordId) -> ServiceResult<AdministratorDetail> {
    let txn = db.begin().await?;
    let administrator = get_by_id(&txn, id).await?;
    let leagues = related::<AdministratorLeagues, _>(&txn, id).await?;
    let comments = children_of::<CommentAdministrator, _>(&txn, id).await?;
    txn.commit().await?;

    Ok(AdministratorDetail {
        administrator,
        leagues,
        comments,
    })
}

pub async fn update(
    db: &DatabaseConnection,
    store: &dyn CredentialStore,
    id: RecordId,
    input: AdministratorInput,
) -> ServiceResult<Administrator> {
    require_id(id, "administrator")?;
    let (mut administrator, password) = input.into_active()?;

    let txn = db.begin().await?;
    let current = find_record::<administrators::Entity, _>(&txn, id).await?;
    administrator.id = Set(id);
    administrator.password = Set(seal_replacing(
        store,
        &password,
        Some(current.password.as_str()),
    )?);
    let administrator = administrator.update(&txn).await?;
    txn.commit().await?;

    debug!("Updated administrator {}", id);
    Ok(administrator)
}

/// Deletes the administrator. Comments they wrote are kept without an
/// author.
pub async fn delete(db: &DatabaseConnection, id: RecordId) -> ServiceResult<()> {
    delete_record::<administrators::Entity>(db, id).await
}

#[cfg(test)]
mod test {
    use super::{create, delete, get_by_id, AdministratorInput};
    use crate::{
        database::test_connection,
        services::{credentials::PlainText, ServiceError, CONSTRAINT_MESSAGE},
    };

    fn administrator(id_number: &str, username: &str) -> AdministratorInput {
        AdministratorInput {
            id: Some(1),
            name: Some("Juan Perez".to_string()),
            photo_url: Some("https://example.com/juan.png".to_string()),
            id_number: Some(id_number.to_string()),
            username: Some(username.to_string()),
            password: Some("admin".to_string()),
        }
    }

    #[tokio::test]
    async fn test_create_round_trip() {
        let db = test_connection().await;

        let created = create(&db, &PlainText, administrator("1", "admin1"))
            .await
            .unwrap();
        let found = get_by_id(&db, created.id).await.unwrap();

        assert_eq!(created, found);
        assert_eq!(found.id_number, "1");

        let value = serde_json::to_value(&found).unwrap();
        assert_eq!(value["IDNumber"], "1");
        assert!(value.get("password").is_none());
    }

    #[tokio::test]
    async fn test_unique_fields() {
        let db = test_connection().await;

        create(&db, &PlainText, administrator("1", "admin1"))
            .await
            .unwrap();

        for input in [administrator("1", "admin2"), administrator("2", "admin1")] {
            match create(&db, &PlainText, input).await {
                Err(ServiceError::IllegalOperation(message)) => {
                    assert_eq!(message, CONSTRAINT_MESSAGE)
                }
                other => panic!("Expected illegal operation got {:?}", other),
            }
        }

        assert!(create(&db, &PlainText, administrator("2", "admin2"))
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn test_required_fields() {
        let db = test_connection().await;

        let mut input = administrator("1", "admin1");
        input.id_number = None;
        assert!(matches!(
            create(&db, &PlainText, input).await,
            Err(ServiceError::IllegalOperation(_))
        ));

        let mut input = administrator("1", "admin1");
        input.password = None;
        assert!(matches!(
            create(&db, &PlainText, input).await,
            Err(ServiceError::IllegalOperation(_))
        ));
    }

    #[tokio::test]
    async fn test_delete() {
        let db = test_connection().await;

        let created = create(&db, &PlainText, administrator("1", "admin1"))
            .await
            .unwrap();
        delete(&db, created.id).await.unwrap();
        assert!(matches!(
            get_by_id(&db, created.id).await,
            Err(ServiceError::NotFound(_))
        ));
    }
}

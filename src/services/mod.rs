//! Validation and persistence logic for every record type along with the
//! associations between them. Each operation runs inside its own database
//! transaction.

use crate::{database::entities::Record, utils::types::RecordId};
use associations::{find_record, ModelOf};
use chrono::{DateTime, NaiveDate, Utc};
use log::{debug, warn};
use sea_orm::{
    ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, QueryFilter, QueryOrder, SqlErr,
    TransactionTrait,
};
use thiserror::Error;

pub mod administrators;
pub mod associations;
pub mod comments;
pub mod credentials;
pub mod games;
pub mod leagues;
pub mod moves;
pub mod openings;
pub mod players;
pub mod tournaments;

/// Message used when the store rejects a write because of a
/// uniqueness constraint
pub const CONSTRAINT_MESSAGE: &str = "some values cannot be null or repeated.";

/// Errors that can occur while performing a service operation
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The request was malformed or broke a business rule
    #[error("{0}")]
    IllegalOperation(String),

    /// A referenced record doesn't exist
    #[error("{0}")]
    NotFound(String),

    /// Unexpected database error
    #[error("Server error occurred")]
    Database(DbErr),

    /// Failed to seal a password
    #[error("Server error occurred")]
    Credentials,
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl ServiceError {
    pub fn illegal(message: impl Into<String>) -> Self {
        Self::IllegalOperation(message.into())
    }

    /// Creates a not found error for the provided kind of record
    pub fn not_found(name: &str) -> Self {
        Self::NotFound(format!("The {name} with the given id was not found"))
    }
}

/// Uniqueness conflicts reported by the store are client errors rather
/// than server failures
impl From<DbErr> for ServiceError {
    fn from(err: DbErr) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(detail)) => {
                warn!("Rejected write conflicting with existing data: {}", detail);
                Self::illegal(CONSTRAINT_MESSAGE)
            }
            _ => Self::Database(err),
        }
    }
}

/// Ensures the provided identifier can reference a record
///
/// `id`   The identifier to check
/// `name` The kind of record being referenced
pub fn require_id(id: RecordId, name: &str) -> ServiceResult<RecordId> {
    if id == 0 {
        return Err(ServiceError::illegal(format!("The {name} id must be provided")));
    }
    Ok(id)
}

/// Ensures an identifier was provided and can reference a record
///
/// `id`   The optional identifier
/// `name` The kind of record being referenced
pub fn require_some_id(id: Option<RecordId>, name: &str) -> ServiceResult<RecordId> {
    match id {
        Some(id) => require_id(id, name),
        None => Err(ServiceError::illegal(format!("The {name} id must be provided"))),
    }
}

/// Takes the value of a required field
///
/// `value` The optional field value
/// `field` The name of the field
pub fn require<T>(value: Option<T>, field: &str) -> ServiceResult<T> {
    value.ok_or_else(|| ServiceError::illegal(format!("The {field} is required")))
}

/// Ensures a date describing a past event isn't in the future
///
/// `date`  The date to check
/// `field` The name of the field
pub fn not_in_future(date: &DateTime<Utc>, field: &str) -> ServiceResult<()> {
    if *date > Utc::now() {
        return Err(ServiceError::illegal(format!(
            "The {field} cannot be in the future"
        )));
    }
    Ok(())
}

/// Calendar date variant of [`not_in_future`]
pub fn day_not_in_future(date: &NaiveDate, field: &str) -> ServiceResult<()> {
    if *date > Utc::now().date_naive() {
        return Err(ServiceError::illegal(format!(
            "The {field} cannot be in the future"
        )));
    }
    Ok(())
}

/// Loads every record of a kind ordered by id
pub async fn all_records<R: Record>(db: &DatabaseConnection) -> ServiceResult<Vec<ModelOf<R>>> {
    let records = R::find().order_by_asc(R::id_column()).all(db).await?;
    Ok(records)
}

/// Loads a single record by id
///
/// `db` The connection or transaction to use
/// `id` The id of the record
pub async fn record_by_id<R, C>(db: &C, id: RecordId) -> ServiceResult<ModelOf<R>>
where
    R: Record,
    C: ConnectionTrait,
{
    require_id(id, R::NAME)?;
    find_record::<R, _>(db, id).await
}

/// Deletes a record by id. Owned records and associations are removed
/// along with it by the store.
///
/// `db` The database connection
/// `id` The id of the record
pub async fn delete_record<R: Record>(db: &DatabaseConnection, id: RecordId) -> ServiceResult<()> {
    require_id(id, R::NAME)?;

    let txn = db.begin().await?;
    find_record::<R, _>(&txn, id).await?;
    R::delete_many()
        .filter(R::id_column().eq(id))
        .exec(&txn)
        .await?;
    txn.commit().await?;

    debug!("Deleted {} {}", R::NAME, id);
    Ok(())
}

#[cfg(test)]
mod test {
    use super::{not_in_future, require, require_id, require_some_id, ServiceError};
    use chrono::{Duration, Utc};

    #[test]
    fn test_zero_id_rejected() {
        assert!(matches!(
            require_id(0, "league"),
            Err(ServiceError::IllegalOperation(_))
        ));
        assert!(matches!(
            require_some_id(None, "league"),
            Err(ServiceError::IllegalOperation(_))
        ));
        assert_eq!(require_some_id(Some(3), "league").unwrap(), 3);
    }

    #[test]
    fn test_required_field() {
        assert!(require::<String>(None, "name").is_err());
        assert_eq!(require(Some(1), "name").unwrap(), 1);
    }

    #[test]
    fn test_future_dates() {
        let past = Utc::now() - Duration::days(1);
        let future = Utc::now() + Duration::days(365);

        assert!(not_in_future(&past, "date").is_ok());
        assert!(not_in_future(&Utc::now(), "date").is_ok());
        assert!(matches!(
            not_in_future(&future, "date"),
            Err(ServiceError::IllegalOperation(_))
        ));
    }
}

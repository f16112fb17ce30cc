//! Association management shared by every pair of related records.
//!
//! Many-to-many pairs are described once by a [`JoinTable`] and viewed
//! from either side through a [`Direction`], so both sides of a pair
//! always read and write the same join rows. One-to-many links are
//! described by a [`ForeignKey`] on the child table and managed from the
//! parent side by [`children`] or from the child side by [`parent`].

use super::{ServiceError, ServiceResult};
use crate::{database::entities::Record, utils::types::RecordId};
use sea_orm::{ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder};
use std::marker::PhantomData;

pub mod children;
pub mod many;
pub mod pairs;
pub mod parent;

/// Model type loaded for a record
pub type ModelOf<R> = <R as EntityTrait>::Model;

/// Column type of an entity
pub type ColumnOf<E> = <E as EntityTrait>::Column;

/// Join table linking two kinds of record
pub trait JoinTable: Send + Sync + 'static {
    /// The join table entity
    type Entity: EntityTrait;
    /// Active model used to insert new join rows
    type Link: ActiveModelTrait<Entity = Self::Entity> + Send;
    type Left: Record;
    type Right: Record;

    /// Column referencing the left record
    fn left_column() -> ColumnOf<Self::Entity>;

    /// Column referencing the right record
    fn right_column() -> ColumnOf<Self::Entity>;

    /// Creates the join row linking the two records
    fn link(left: RecordId, right: RecordId) -> Self::Link;
}

/// One side of a join table, identifying which record owns the
/// collection and which record is collected
pub trait Direction: Send + Sync + 'static {
    type Table: JoinTable;
    type Owner: Record;
    type Related: Record;

    fn owner_column() -> ColumnOf<<Self::Table as JoinTable>::Entity>;

    fn related_column() -> ColumnOf<<Self::Table as JoinTable>::Entity>;

    fn link(owner: RecordId, related: RecordId) -> <Self::Table as JoinTable>::Link;
}

/// Views a join table from its left record
pub struct Forward<J>(PhantomData<J>);

/// Views a join table from its right record
pub struct Backward<J>(PhantomData<J>);

impl<J: JoinTable> Direction for Forward<J> {
    type Table = J;
    type Owner = J::Left;
    type Related = J::Right;

    fn owner_column() -> ColumnOf<J::Entity> {
        J::left_column()
    }

    fn related_column() -> ColumnOf<J::Entity> {
        J::right_column()
    }

    fn link(owner: RecordId, related: RecordId) -> J::Link {
        J::link(owner, related)
    }
}

impl<J: JoinTable> Direction for Backward<J> {
    type Table = J;
    type Owner = J::Right;
    type Related = J::Left;

    fn owner_column() -> ColumnOf<J::Entity> {
        J::right_column()
    }

    fn related_column() -> ColumnOf<J::Entity> {
        J::left_column()
    }

    fn link(owner: RecordId, related: RecordId) -> J::Link {
        J::link(related, owner)
    }
}

/// Nullable foreign key on a child table referencing its parent
pub trait ForeignKey: Send + Sync + 'static {
    type Child: Record;
    type Parent: Record;

    /// Whether detaching a child from its parent deletes the child
    const ORPHAN_REMOVAL: bool = false;

    /// The foreign key column on the child table
    fn column() -> ColumnOf<Self::Child>;

    /// Reads the foreign key of a loaded child
    fn parent_of(child: &ModelOf<Self::Child>) -> Option<RecordId>;
}

/// Loads a record by id failing with a not found error when it's missing
///
/// `db` The connection or transaction to use
/// `id` The id of the record
pub async fn find_record<R, C>(db: &C, id: RecordId) -> ServiceResult<ModelOf<R>>
where
    R: Record,
    C: ConnectionTrait,
{
    R::find()
        .filter(R::id_column().eq(id))
        .one(db)
        .await?
        .ok_or_else(|| ServiceError::not_found(R::NAME))
}

/// Loads every record from the provided ids failing with a not found
/// error if any of them are missing. Records are returned ordered by id.
///
/// `db`  The connection or transaction to use
/// `ids` The ids of the records, must not contain duplicates
pub async fn find_records<R, C>(db: &C, ids: &[RecordId]) -> ServiceResult<Vec<ModelOf<R>>>
where
    R: Record,
    C: ConnectionTrait,
{
    if ids.is_empty() {
        return Ok(Vec::new());
    }

    let records = R::find()
        .filter(R::id_column().is_in(ids.iter().copied()))
        .order_by_asc(R::id_column())
        .all(db)
        .await?;

    if records.len() != ids.len() {
        return Err(ServiceError::not_found(R::NAME));
    }

    Ok(records)
}

/// Validates a list of ids removing any repeated values while keeping
/// the first occurrence order
///
/// `ids`  The ids to validate
/// `name` The kind of record the ids reference
fn distinct_ids(ids: &[RecordId], name: &str) -> ServiceResult<Vec<RecordId>> {
    let mut out: Vec<RecordId> = Vec::with_capacity(ids.len());
    for id in ids {
        let id = super::require_id(*id, name)?;
        if !out.contains(&id) {
            out.push(id);
        }
    }
    Ok(out)
}

/// Error for operations requiring two records to be associated
fn not_associated(owner: &str, related: &str) -> ServiceError {
    ServiceError::illegal(format!("The {related} is not associated to the {owner}"))
}

#[cfg(test)]
mod test {
    use super::distinct_ids;
    use crate::services::ServiceError;

    #[test]
    fn test_distinct_ids() {
        assert_eq!(distinct_ids(&[3, 1, 3, 2, 1], "player").unwrap(), vec![3, 1, 2]);
        assert!(distinct_ids(&[], "player").unwrap().is_empty());
        assert!(matches!(
            distinct_ids(&[4, 0], "player"),
            Err(ServiceError::IllegalOperation(_))
        ));
    }
}

//! Operations for many-to-many associations viewed from one side of
//! their join table

use super::{
    distinct_ids, find_record, find_records, not_associated, Direction, JoinTable, ModelOf,
};
use crate::{
    database::entities::Record,
    services::{require_id, ServiceResult},
    utils::types::RecordId,
};
use log::debug;
use sea_orm::{
    ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, QueryTrait, TransactionTrait,
};

/// Join table entity used by a direction
type TableOf<D> = <<D as Direction>::Table as JoinTable>::Entity;

/// Loads every record currently associated to the owner, without
/// checking the owner exists
///
/// `db`    The connection or transaction to use
/// `owner` The id of the owning record
pub async fn related<D, C>(db: &C, owner: RecordId) -> Result<Vec<ModelOf<D::Related>>, DbErr>
where
    D: Direction,
    C: ConnectionTrait,
{
    let linked = TableOf::<D>::find()
        .select_only()
        .column(D::related_column())
        .filter(D::owner_column().eq(owner))
        .into_query();

    D::Related::find()
        .filter(D::Related::id_column().in_subquery(linked))
        .order_by_asc(D::Related::id_column())
        .all(db)
        .await
}

/// Checks whether a join row exists between the two records
async fn is_linked<D, C>(db: &C, owner: RecordId, related: RecordId) -> Result<bool, DbErr>
where
    D: Direction,
    C: ConnectionTrait,
{
    let link = TableOf::<D>::find()
        .filter(D::owner_column().eq(owner))
        .filter(D::related_column().eq(related))
        .one(db)
        .await?;
    Ok(link.is_some())
}

/// Associates the related record with the owner. Adding an existing
/// association leaves it unchanged.
///
/// `db`      The database connection
/// `owner`   The id of the owning record
/// `related` The id of the record to associate
pub async fn add<D: Direction>(
    db: &DatabaseConnection,
    owner: RecordId,
    related: RecordId,
) -> ServiceResult<ModelOf<D::Related>> {
    require_id(owner, D::Owner::NAME)?;
    require_id(related, D::Related::NAME)?;

    let txn = db.begin().await?;
    find_record::<D::Owner, _>(&txn, owner).await?;
    let model = find_record::<D::Related, _>(&txn, related).await?;

    if !is_linked::<D, _>(&txn, owner, related).await? {
        TableOf::<D>::insert(D::link(owner, related))
            .exec(&txn)
            .await?;
        debug!(
            "Associated {} {} with {} {}",
            D::Related::NAME,
            related,
            D::Owner::NAME,
            owner
        );
    }

    txn.commit().await?;
    Ok(model)
}

/// Loads a record associated with the owner
///
/// `db`      The database connection
/// `owner`   The id of the owning record
/// `related` The id of the associated record
pub async fn get_one<D: Direction>(
    db: &DatabaseConnection,
    owner: RecordId,
    related: RecordId,
) -> ServiceResult<ModelOf<D::Related>> {
    require_id(owner, D::Owner::NAME)?;
    require_id(related, D::Related::NAME)?;

    let txn = db.begin().await?;
    find_record::<D::Owner, _>(&txn, owner).await?;
    let model = find_record::<D::Related, _>(&txn, related).await?;

    if !is_linked::<D, _>(&txn, owner, related).await? {
        return Err(not_associated(D::Owner::NAME, D::Related::NAME));
    }

    txn.commit().await?;
    Ok(model)
}

/// Loads every record associated with the owner
///
/// `db`    The database connection
/// `owner` The id of the owning record
pub async fn get_all<D: Direction>(
    db: &DatabaseConnection,
    owner: RecordId,
) -> ServiceResult<Vec<ModelOf<D::Related>>> {
    require_id(owner, D::Owner::NAME)?;

    let txn = db.begin().await?;
    find_record::<D::Owner, _>(&txn, owner).await?;
    let models = related::<D, _>(&txn, owner).await?;
    txn.commit().await?;
    Ok(models)
}

/// Replaces every association of the owner with the provided records
///
/// `db`      The database connection
/// `owner`   The id of the owning record
/// `related` The ids of the records to associate
pub async fn replace_all<D: Direction>(
    db: &DatabaseConnection,
    owner: RecordId,
    related: &[RecordId],
) -> ServiceResult<Vec<ModelOf<D::Related>>> {
    require_id(owner, D::Owner::NAME)?;
    let related = distinct_ids(related, D::Related::NAME)?;

    let txn = db.begin().await?;
    find_record::<D::Owner, _>(&txn, owner).await?;
    let models = find_records::<D::Related, _>(&txn, &related).await?;

    TableOf::<D>::delete_many()
        .filter(D::owner_column().eq(owner))
        .exec(&txn)
        .await?;

    for id in &related {
        TableOf::<D>::insert(D::link(owner, *id)).exec(&txn).await?;
    }

    txn.commit().await?;

    debug!(
        "Replaced {} associations of {} {} ({} total)",
        D::Related::NAME,
        D::Owner::NAME,
        owner,
        models.len()
    );

    Ok(models)
}

/// Removes the association between the two records, leaving both
/// records in place
///
/// `db`      The database connection
/// `owner`   The id of the owning record
/// `related` The id of the associated record
pub async fn remove<D: Direction>(
    db: &DatabaseConnection,
    owner: RecordId,
    related: RecordId,
) -> ServiceResult<()> {
    require_id(owner, D::Owner::NAME)?;
    require_id(related, D::Related::NAME)?;

    let txn = db.begin().await?;
    find_record::<D::Owner, _>(&txn, owner).await?;
    find_record::<D::Related, _>(&txn, related).await?;

    if !is_linked::<D, _>(&txn, owner, related).await? {
        return Err(not_associated(D::Owner::NAME, D::Related::NAME));
    }

    TableOf::<D>::delete_many()
        .filter(D::owner_column().eq(owner))
        .filter(D::related_column().eq(related))
        .exec(&txn)
        .await?;

    txn.commit().await?;

    debug!(
        "Removed {} {} from {} {}",
        D::Related::NAME,
        related,
        D::Owner::NAME,
        owner
    );

    Ok(())
}

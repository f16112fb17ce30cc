//! Handlers shared by every association route. Each handler is generic
//! over the association it manages and is registered by the record
//! routers for their concrete associations.
//!
//! Many-valued associations are exposed as:
//! - GET    /:id/{related}              list the associated records
//! - PUT    /:id/{related}              replace the associated records
//! - GET    /:id/{related}/:related_id  get one associated record
//! - POST   /:id/{related}/:related_id  associate a record
//! - DELETE /:id/{related}/:related_id  remove an association
//!
//! Single-valued associations are exposed as:
//! - GET    /:id/{related}              get the associated record
//! - PUT    /:id/{related}              set the associated record
//! - DELETE /:id/{related}              clear the associated record
//! - POST   /:id/{related}/:related_id  set the associated record

use super::Payload;
use crate::{
    services::{
        associations::{children, many, parent, Direction, ForeignKey, ModelOf},
        ServiceResult,
    },
    utils::types::RecordId,
};
use axum::{extract::Path, http::StatusCode, Extension, Json};
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};

/// Reference to a record within a request body
#[derive(Debug, Deserialize)]
pub struct RecordRef {
    pub id: RecordId,
}

fn ids(refs: &[RecordRef]) -> Vec<RecordId> {
    refs.iter().map(|value| value.id).collect()
}

pub async fn many_list<D: Direction>(
    Extension(db): Extension<DatabaseConnection>,
    Path(owner): Path<RecordId>,
) -> ServiceResult<Json<Vec<ModelOf<D::Related>>>>
where
    ModelOf<D::Related>: Serialize,
{
    many::get_all::<D>(&db, owner).await.map(Json)
}

pub async fn many_replace<D: Direction>(
    Extension(db): Extension<DatabaseConnection>,
    Path(owner): Path<RecordId>,
    Payload(related): Payload<Vec<RecordRef>>,
) -> ServiceResult<Json<Vec<ModelOf<D::Related>>>>
where
    ModelOf<D::Related>: Serialize,
{
    many::replace_all::<D>(&db, owner, &ids(&related))
        .await
        .map(Json)
}

pub async fn many_get<D: Direction>(
    Extension(db): Extension<DatabaseConnection>,
    Path((owner, related)): Path<(RecordId, RecordId)>,
) -> ServiceResult<Json<ModelOf<D::Related>>>
where
    ModelOf<D::Related>: Serialize,
{
    many::get_one::<D>(&db, owner, related).await.map(Json)
}

pub async fn many_add<D: Direction>(
    Extension(db): Extension<DatabaseConnection>,
    Path((owner, related)): Path<(RecordId, RecordId)>,
) -> ServiceResult<Json<ModelOf<D::Related>>>
where
    ModelOf<D::Related>: Serialize,
{
    many::add::<D>(&db, owner, related).await.map(Json)
}

pub async fn many_remove<D: Direction>(
    Extension(db): Extension<DatabaseConnection>,
    Path((owner, related)): Path<(RecordId, RecordId)>,
) -> ServiceResult<StatusCode> {
    many::remove::<D>(&db, owner, related).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn children_list<K: ForeignKey>(
    Extension(db): Extension<DatabaseConnection>,
    Path(parent): Path<RecordId>,
) -> ServiceResult<Json<Vec<ModelOf<K::Child>>>>
where
    ModelOf<K::Child>: Serialize,
{
    children::get_all::<K>(&db, parent).await.map(Json)
}

pub async fn children_replace<K: ForeignKey>(
    Extension(db): Extension<DatabaseConnection>,
    Path(parent): Path<RecordId>,
    Payload(children): Payload<Vec<RecordRef>>,
) -> ServiceResult<Json<Vec<ModelOf<K::Child>>>>
where
    ModelOf<K::Child>: Serialize,
{
    children::replace_all::<K>(&db, parent, &ids(&children))
        .await
        .map(Json)
}

pub async fn children_get<K: ForeignKey>(
    Extension(db): Extension<DatabaseConnection>,
    Path((parent, child)): Path<(RecordId, RecordId)>,
) -> ServiceResult<Json<ModelOf<K::Child>>>
where
    ModelOf<K::Child>: Serialize,
{
    children::get_one::<K>(&db, parent, child).await.map(Json)
}

pub async fn children_add<K: ForeignKey>(
    Extension(db): Extension<DatabaseConnection>,
    Path((parent, child)): Path<(RecordId, RecordId)>,
) -> ServiceResult<Json<ModelOf<K::Child>>>
where
    ModelOf<K::Child>: Serialize,
{
    children::add::<K>(&db, parent, child).await.map(Json)
}

pub async fn children_remove<K: ForeignKey>(
    Extension(db): Extension<DatabaseConnection>,
    Path((parent, child)): Path<(RecordId, RecordId)>,
) -> ServiceResult<StatusCode> {
    children::remove::<K>(&db, parent, child).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn parent_get<K: ForeignKey>(
    Extension(db): Extension<DatabaseConnection>,
    Path(child): Path<RecordId>,
) -> ServiceResult<Json<ModelOf<K::Parent>>>
where
    ModelOf<K::Parent>: Serialize,
{
    parent::get::<K>(&db, child).await.map(Json)
}

pub async fn parent_set<K: ForeignKey>(
    Extension(db): Extension<DatabaseConnection>,
    Path(child): Path<RecordId>,
    Payload(parent): Payload<RecordRef>,
) -> ServiceResult<Json<ModelOf<K::Parent>>>
where
    ModelOf<K::Parent>: Serialize,
{
    parent::set::<K>(&db, child, parent.id).await.map(Json)
}

pub async fn parent_add<K: ForeignKey>(
    Extension(db): Extension<DatabaseConnection>,
    Path((child, parent)): Path<(RecordId, RecordId)>,
) -> ServiceResult<Json<ModelOf<K::Parent>>>
where
    ModelOf<K::Parent>: Serialize,
{
    parent::set::<K>(&db, child, parent).await.map(Json)
}

pub async fn parent_remove<K: ForeignKey>(
    Extension(db): Extension<DatabaseConnection>,
    Path(child): Path<RecordId>,
) -> ServiceResult<StatusCode> {
    parent::remove::<K>(&db, child).await?;
    Ok(StatusCode::NO_CONTENT)
}

use super::associations::{many_add, many_get, many_list, many_remove, many_replace};
use super::Payload;
use crate::{
    database::entities::Administrator,
    services::{
        administrators::{self, AdministratorDetail, AdministratorInput},
        associations::pairs::AdministratorLeagues,
        credentials::CredentialStore,
        ServiceResult,
    },
    utils::types::RecordId,
};
use axum::{extract::Path, http::StatusCode, routing::get, Extension, Json, Router};
use sea_orm::DatabaseConnection;
use std::sync::Arc;

/// Router function creates a new router with all the underlying
/// routes for this file.
///
/// Prefix: /administrators
pub fn router() -> Router {
    Router::new()
        .route("/", get(get_administrators).post(create_administrator))
        .route(
            "/:id",
            get(get_administrator)
                .post(update_administrator)
                .delete(delete_administrator),
        )
        .route(
            "/:id/leagues",
            get(many_list::<AdministratorLeagues>).put(many_replace::<AdministratorLeagues>),
        )
        .route(
            "/:id/leagues/:related_id",
            get(many_get::<AdministratorLeagues>)
                .post(many_add::<AdministratorLeagues>)
                .delete(many_remove::<AdministratorLeagues>),
        )
}

/// GET /administrators
async fn get_administrators(
    Extension(db): Extension<DatabaseConnection>,
) -> ServiceResult<Json<Vec<Administrator>>> {
    administrators::get_all(&db).await.map(Json)
}

/// POST /administrators
async fn create_administrator(
    Extension(db): Extension<DatabaseConnection>,
    Extension(store): Extension<Arc<dyn CredentialStore>>,
    Payload(input): Payload<AdministratorInput>,
) -> ServiceResult<(StatusCode, Json<Administrator>)> {
    let administrator = administrators::create(&db, store.as_ref(), input).await?;
    Ok((StatusCode::CREATED, Json(administrator)))
}

/// GET /administrators/:id
async fn get_administrator(
    Extension(db): Extension<DatabaseConnection>,
    Path(id): Path<RecordId>,
) -> ServiceResult<Json<AdministratorDetail>> {
    administrators::detail(&db, id).await.map(Json)
}

/// POST /administrators/:id
async fn update_administrator(
    Extension(db): Extension<DatabaseConnection>,
    Extension(store): Extension<Arc<dyn CredentialStore>>,
    Path(id): Path<RecordId>,
    Payload(input): Payload<AdministratorInput>,
) -> ServiceResult<Json<Administrator>> {
    administrators::update(&db, store.as_ref(), id, input)
        .await
        .map(Json)
}

/// DELETE /administrators/:id
async fn delete_administrator(
    Extension(db): Extension<DatabaseConnection>,
    Path(id): Path<RecordId>,
) -> ServiceResult<StatusCode> {
    administrators::delete(&db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

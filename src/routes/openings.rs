use super::associations::{many_add, many_get, many_list, many_remove, many_replace};
use super::Payload;
use crate::{
    database::entities::Opening,
    services::{
        associations::pairs::OpeningMoves,
        openings::{self, OpeningDetail, OpeningInput},
        ServiceResult,
    },
    utils::types::RecordId,
};
use axum::{extract::Path, http::StatusCode, routing::get, Extension, Json, Router};
use sea_orm::DatabaseConnection;

/// Router function creates a new router with all the underlying
/// routes for this file.
///
/// Prefix: /openings
pub fn router() -> Router {
    Router::new()
        .route("/", get(get_openings).post(create_opening))
        .route(
            "/:id",
            get(get_opening).post(update_opening).delete(delete_opening),
        )
        .route(
            "/:id/moves",
            get(many_list::<OpeningMoves>).put(many_replace::<OpeningMoves>),
        )
        .route(
            "/:id/moves/:related_id",
            get(many_get::<OpeningMoves>)
                .post(many_add::<OpeningMoves>)
                .delete(many_remove::<OpeningMoves>),
        )
}

/// GET /openings
async fn get_openings(
    Extension(db): Extension<DatabaseConnection>,
) -> ServiceResult<Json<Vec<Opening>>> {
    openings::get_all(&db).await.map(Json)
}

/// POST /openings
async fn create_opening(
    Extension(db): Extension<DatabaseConnection>,
    Payload(input): Payload<OpeningInput>,
) -> ServiceResult<(StatusCode, Json<Opening>)> {
    let opening = openings::create(&db, input).await?;
    Ok((StatusCode::CREATED, Json(opening)))
}

/// GET /openings/:id
async fn get_opening(
    Extension(db): Extension<DatabaseConnection>,
    Path(id): Path<RecordId>,
) -> ServiceResult<Json<OpeningDetail>> {
    openings::detail(&db, id).await.map(Json)
}

/// POST /openings/:id
async fn update_opening(
    Extension(db): Extension<DatabaseConnection>,
    Path(id): Path<RecordId>,
    Payload(input): Payload<OpeningInput>,
) -> ServiceResult<Json<Opening>> {
    openings::update(&db, id, input).await.map(Json)
}

/// DELETE /openings/:id
async fn delete_opening(
    Extension(db): Extension<DatabaseConnection>,
    Path(id): Path<RecordId>,
) -> ServiceResult<StatusCode> {
    openings::delete(&db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

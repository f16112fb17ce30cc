use super::associations::{
    many_add, many_get, many_list, many_remove, many_replace, parent_add, parent_get,
    parent_remove, parent_set,
};
use super::Payload;
use crate::{
    database::entities::Move,
    services::{
        associations::pairs::{MoveOpenings, MovePlayer},
        moves::{self, MoveDetail, MoveInput},
        ServiceResult,
    },
    utils::types::RecordId,
};
use axum::{
    extract::Path,
    http::StatusCode,
    routing::{get, post},
    Extension, Json, Router,
};
use sea_orm::DatabaseConnection;

/// Router function creates a new router with all the underlying
/// routes for this file.
///
/// Prefix: /moves
pub fn router() -> Router {
    Router::new()
        .route("/", get(get_moves).post(create_move))
        .route(
            "/:id",
            get(get_move).post(update_move).delete(delete_move),
        )
        .route(
            "/:id/player",
            get(parent_get::<MovePlayer>)
                .put(parent_set::<MovePlayer>)
                .delete(parent_remove::<MovePlayer>),
        )
        .route("/:id/player/:related_id", post(parent_add::<MovePlayer>))
        .route(
            "/:id/openings",
            get(many_list::<MoveOpenings>).put(many_replace::<MoveOpenings>),
        )
        .route(
            "/:id/openings/:related_id",
            get(many_get::<MoveOpenings>)
                .post(many_add::<MoveOpenings>)
                .delete(many_remove::<MoveOpenings>),
        )
}

/// GET /moves
async fn get_moves(
    Extension(db): Extension<DatabaseConnection>,
) -> ServiceResult<Json<Vec<Move>>> {
    moves::get_all(&db).await.map(Json)
}

/// POST /moves
///
/// Moves with notation that isn't valid chess notation are rejected
async fn create_move(
    Extension(db): Extension<DatabaseConnection>,
    Payload(input): Payload<MoveInput>,
) -> ServiceResult<(StatusCode, Json<Move>)> {
    let chess_move = moves::create(&db, input).await?;
    Ok((StatusCode::CREATED, Json(chess_move)))
}

/// GET /moves/:id
async fn get_move(
    Extension(db): Extension<DatabaseConnection>,
    Path(id): Path<RecordId>,
) -> ServiceResult<Json<MoveDetail>> {
    moves::detail(&db, id).await.map(Json)
}

/// POST /moves/:id
async fn update_move(
    Extension(db): Extension<DatabaseConnection>,
    Path(id): Path<RecordId>,
    Payload(input): Payload<MoveInput>,
) -> ServiceResult<Json<Move>> {
    moves::update(&db, id, input).await.map(Json)
}

/// DELETE /moves/:id
async fn delete_move(
    Extension(db): Extension<DatabaseConnection>,
    Path(id): Path<RecordId>,
) -> ServiceResult<StatusCode> {
    moves::delete(&db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

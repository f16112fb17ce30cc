use super::associations::{parent_add, parent_get, parent_remove, parent_set};
use super::Payload;
use crate::{
    database::entities::Comment,
    services::{
        associations::pairs::CommentAdministrator,
        comments::{self, CommentDetail, CommentInput},
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
/// Prefix: /comments
pub fn router() -> Router {
    Router::new()
        .route("/", get(get_comments).post(create_comment))
        .route(
            "/:id",
            get(get_comment).post(update_comment).delete(delete_comment),
        )
        .route(
            "/:id/administrator",
            get(parent_get::<CommentAdministrator>)
                .put(parent_set::<CommentAdministrator>)
                .delete(parent_remove::<CommentAdministrator>),
        )
        .route(
            "/:id/administrator/:related_id",
            post(parent_add::<CommentAdministrator>),
        )
}

/// GET /comments
async fn get_comments(
    Extension(db): Extension<DatabaseConnection>,
) -> ServiceResult<Json<Vec<Comment>>> {
    comments::get_all(&db).await.map(Json)
}

/// POST /comments
async fn create_comment(
    Extension(db): Extension<DatabaseConnection>,
    Payload(input): Payload<CommentInput>,
) -> ServiceResult<(StatusCode, Json<Comment>)> {
    let comment = comments::create(&db, input).await?;
    Ok((StatusCode::CREATED, Json(comment)))
}

/// GET /comments/:id
///
/// Responds with the comment along with its author and game
async fn get_comment(
    Extension(db): Extension<DatabaseConnection>,
    Path(id): Path<RecordId>,
) -> ServiceResult<Json<CommentDetail>> {
    comments::detail(&db, id).await.map(Json)
}

/// POST /comments/:id
async fn update_comment(
    Extension(db): Extension<DatabaseConnection>,
    Path(id): Path<RecordId>,
    Payload(input): Payload<CommentInput>,
) -> ServiceResult<Json<Comment>> {
    comments::update(&db, id, input).await.map(Json)
}

/// DELETE /comments/:id
async fn delete_comment(
    Extension(db): Extension<DatabaseConnection>,
    Path(id): Path<RecordId>,
) -> ServiceResult<StatusCode> {
    comments::delete(&db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

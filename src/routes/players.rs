use super::associations::{many_add, many_get, many_list, many_remove, many_replace};
use super::Payload;
use crate::{
    database::entities::Player,
    services::{
        associations::pairs::{PlayerGames, PlayerLeagues, PlayerTournaments},
        credentials::CredentialStore,
        players::{self, PlayerDetail, PlayerInput},
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
/// Prefix: /players
pub fn router() -> Router {
    Router::new()
        .route("/", get(get_players).post(create_player))
        .route(
            "/:id",
            get(get_player).post(update_player).delete(delete_player),
        )
        .route(
            "/:id/leagues",
            get(many_list::<PlayerLeagues>).put(many_replace::<PlayerLeagues>),
        )
        .route(
            "/:id/leagues/:related_id",
            get(many_get::<PlayerLeagues>)
                .post(many_add::<PlayerLeagues>)
                .delete(many_remove::<PlayerLeagues>),
        )
        .route(
            "/:id/tournaments",
            get(many_list::<PlayerTournaments>).put(many_replace::<PlayerTournaments>),
        )
        .route(
            "/:id/tournaments/:related_id",
            get(many_get::<PlayerTournaments>)
                .post(many_add::<PlayerTournaments>)
                .delete(many_remove::<PlayerTournaments>),
        )
        .route(
            "/:id/games",
            get(many_list::<PlayerGames>).put(many_replace::<PlayerGames>),
        )
        .route(
            "/:id/games/:related_id",
            get(many_get::<PlayerGames>)
                .post(many_add::<PlayerGames>)
                .delete(many_remove::<PlayerGames>),
        )
}

/// GET /players
async fn get_players(
    Extension(db): Extension<DatabaseConnection>,
) -> ServiceResult<Json<Vec<Player>>> {
    players::get_all(&db).await.map(Json)
}

/// POST /players
///
/// The password is sealed by the configured credential store and is never
/// included in responses
async fn create_player(
    Extension(db): Extension<DatabaseConnection>,
    Extension(store): Extension<Arc<dyn CredentialStore>>,
    Payload(input): Payload<PlayerInput>,
) -> ServiceResult<(StatusCode, Json<Player>)> {
    let player = players::create(&db, store.as_ref(), input).await?;
    Ok((StatusCode::CREATED, Json(player)))
}

/// GET /players/:id
///
/// Responds with the player along with their leagues, tournaments and
/// games
async fn get_player(
    Extension(db): Extension<DatabaseConnection>,
    Path(id): Path<RecordId>,
) -> ServiceResult<Json<PlayerDetail>> {
    players::detail(&db, id).await.map(Json)
}

/// POST /players/:id
async fn update_player(
    Extension(db): Extension<DatabaseConnection>,
    Extension(store): Extension<Arc<dyn CredentialStore>>,
    Path(id): Path<RecordId>,
    Payload(input): Payload<PlayerInput>,
) -> ServiceResult<Json<Player>> {
    players::update(&db, store.as_ref(), id, input)
        .await
        .map(Json)
}

/// DELETE /players/:id
async fn delete_player(
    Extension(db): Extension<DatabaseConnection>,
    Path(id): Path<RecordId>,
) -> ServiceResult<StatusCode> {
    players::delete(&db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

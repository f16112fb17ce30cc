use super::associations::{
    children_add, children_get, children_list, children_remove, children_replace, many_add,
    many_get, many_list, many_remove, many_replace, parent_add, parent_get, parent_remove,
    parent_set,
};
use super::Payload;
use crate::{
    database::entities::Tournament,
    services::{
        associations::pairs::{TournamentGames, TournamentLeague, TournamentPlayers},
        tournaments::{self, TournamentDetail, TournamentInput},
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
/// Prefix: /tournaments
pub fn router() -> Router {
    Router::new()
        .route("/", get(get_tournaments).post(create_tournament))
        .route(
            "/:id",
            get(get_tournament)
                .post(update_tournament)
                .delete(delete_tournament),
        )
        .route(
            "/:id/league",
            get(parent_get::<TournamentLeague>)
                .put(parent_set::<TournamentLeague>)
                .delete(parent_remove::<TournamentLeague>),
        )
        .route(
            "/:id/league/:related_id",
            post(parent_add::<TournamentLeague>),
        )
        .route(
            "/:id/players",
            get(many_list::<TournamentPlayers>).put(many_replace::<TournamentPlayers>),
        )
        .route(
            "/:id/players/:related_id",
            get(many_get::<TournamentPlayers>)
                .post(many_add::<TournamentPlayers>)
                .delete(many_remove::<TournamentPlayers>),
        )
        .route(
            "/:id/games",
            get(children_list::<TournamentGames>).put(children_replace::<TournamentGames>),
        )
        .route(
            "/:id/games/:related_id",
            get(children_get::<TournamentGames>)
                .post(children_add::<TournamentGames>)
                .delete(children_remove::<TournamentGames>),
        )
}

/// GET /tournaments
async fn get_tournaments(
    Extension(db): Extension<DatabaseConnection>,
) -> ServiceResult<Json<Vec<Tournament>>> {
    tournaments::get_all(&db).await.map(Json)
}

/// POST /tournaments
async fn create_tournament(
    Extension(db): Extension<DatabaseConnection>,
    Payload(input): Payload<TournamentInput>,
) -> ServiceResult<(StatusCode, Json<Tournament>)> {
    let tournament = tournaments::create(&db, input).await?;
    Ok((StatusCode::CREATED, Json(tournament)))
}

/// GET /tournaments/:id
///
/// Responds with the tournament along with its league, players and games
async fn get_tournament(
    Extension(db): Extension<DatabaseConnection>,
    Path(id): Path<RecordId>,
) -> ServiceResult<Json<TournamentDetail>> {
    tournaments::detail(&db, id).await.map(Json)
}

/// POST /tournaments/:id
async fn update_tournament(
    Extension(db): Extension<DatabaseConnection>,
    Path(id): Path<RecordId>,
    Payload(input): Payload<TournamentInput>,
) -> ServiceResult<Json<Tournament>> {
    tournaments::update(&db, id, input).await.map(Json)
}

/// DELETE /tournaments/:id
///
/// Deleting a tournament also deletes its games
async fn delete_tournament(
    Extension(db): Extension<DatabaseConnection>,
    Path(id): Path<RecordId>,
) -> ServiceResult<StatusCode> {
    tournaments::delete(&db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

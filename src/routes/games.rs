use super::associations::{
    children_add, children_get, children_list, children_remove, children_replace, many_add,
    many_get, many_list, many_remove, many_replace, parent_add, parent_get, parent_remove,
    parent_set,
};
use super::Payload;
use crate::{
    config::Config,
    database::entities::Game,
    services::{
        associations::pairs::{GameComments, GameMoves, GameOpening, GamePlayers, GameTournament},
        games::{self, GameDetail, GameInput},
        ServiceResult,
    },
    utils::types::{PageIndex, RecordId},
};
use axum::{
    extract::{Path, Query},
    http::StatusCode,
    routing::{get, post},
    Extension, Json, Router,
};
use sea_orm::DatabaseConnection;
use serde::Deserialize;
use std::sync::Arc;

/// Router function creates a new router with all the underlying
/// routes for this file.
///
/// Prefix: /games
pub fn router() -> Router {
    Router::new()
        .route("/", get(get_games).post(create_game))
        .route(
            "/:id",
            get(get_game).post(update_game).delete(delete_game),
        )
        .route(
            "/:id/tournament",
            get(parent_get::<GameTournament>)
                .put(parent_set::<GameTournament>)
                .delete(parent_remove::<GameTournament>),
        )
        .route(
            "/:id/tournament/:related_id",
            post(parent_add::<GameTournament>),
        )
        .route(
            "/:id/opening",
            get(parent_get::<GameOpening>)
                .put(parent_set::<GameOpening>)
                .delete(parent_remove::<GameOpening>),
        )
        .route("/:id/opening/:related_id", post(parent_add::<GameOpening>))
        .route(
            "/:id/players",
            get(many_list::<GamePlayers>).put(many_replace::<GamePlayers>),
        )
        .route(
            "/:id/players/:related_id",
            get(many_get::<GamePlayers>)
                .post(many_add::<GamePlayers>)
                .delete(many_remove::<GamePlayers>),
        )
        .route(
            "/:id/moves",
            get(children_list::<GameMoves>).put(children_replace::<GameMoves>),
        )
        .route(
            "/:id/moves/:related_id",
            get(children_get::<GameMoves>)
                .post(children_add::<GameMoves>)
                .delete(children_remove::<GameMoves>),
        )
        .route(
            "/:id/comments",
            get(children_list::<GameComments>).put(children_replace::<GameComments>),
        )
        .route(
            "/:id/comments/:related_id",
            get(children_get::<GameComments>)
                .post(children_add::<GameComments>)
                .delete(children_remove::<GameComments>),
        )
}

/// The query structure for a games query
#[derive(Deserialize)]
struct GamesQuery {
    /// The zero based page to respond with
    #[serde(default)]
    page: PageIndex,
    /// The number of games per page, the configured page size is used
    /// when this is missing
    size: Option<u64>,
}

/// GET /games
///
/// Responds with one page of games ordered by id
async fn get_games(
    Extension(db): Extension<DatabaseConnection>,
    Extension(config): Extension<Arc<Config>>,
    Query(query): Query<GamesQuery>,
) -> ServiceResult<Json<Vec<Game>>> {
    let size = query.size.unwrap_or(config.games_page_size);
    games::get_page(&db, query.page, size).await.map(Json)
}

/// POST /games
async fn create_game(
    Extension(db): Extension<DatabaseConnection>,
    Payload(input): Payload<GameInput>,
) -> ServiceResult<(StatusCode, Json<Game>)> {
    let game = games::create(&db, input).await?;
    Ok((StatusCode::CREATED, Json(game)))
}

/// GET /games/:id
///
/// Responds with the game along with its tournament, opening, players,
/// moves and comments
async fn get_game(
    Extension(db): Extension<DatabaseConnection>,
    Path(id): Path<RecordId>,
) -> ServiceResult<Json<GameDetail>> {
    games::detail(&db, id).await.map(Json)
}

/// POST /games/:id
async fn update_game(
    Extension(db): Extension<DatabaseConnection>,
    Path(id): Path<RecordId>,
    Payload(input): Payload<GameInput>,
) -> ServiceResult<Json<Game>> {
    games::update(&db, id, input).await.map(Json)
}

/// DELETE /games/:id
///
/// Deleting a game also deletes its moves and comments
async fn delete_game(
    Extension(db): Extension<DatabaseConnection>,
    Path(id): Path<RecordId>,
) -> ServiceResult<StatusCode> {
    games::delete(&db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

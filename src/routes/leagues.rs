use super::associations::{
    children_add, children_get, children_list, children_remove, children_replace, many_add,
    many_get, many_list, many_remove, many_replace,
};
use super::Payload;
use crate::{
    database::entities::League,
    services::{
        associations::pairs::{LeagueAdministrators, LeaguePlayers, LeagueTournaments},
        leagues::{self, LeagueDetail, LeagueInput},
        ServiceResult,
    },
    utils::types::RecordId,
};
use axum::{extract::Path, http::StatusCode, routing::get, Extension, Json, Router};
use sea_orm::DatabaseConnection;

/// Router function creates a new router with all the underlying
/// routes for this file.
///
/// Prefix: /leagues
pub fn router() -> Router {
    Router::new()
        .route("/", get(get_leagues).post(create_league))
        .route(
            "/:id",
            get(get_league).post(update_league).delete(delete_league),
        )
        .route(
            "/:id/players",
            get(many_list::<LeaguePlayers>).put(many_replace::<LeaguePlayers>),
        )
        .route(
            "/:id/players/:related_id",
            get(many_get::<LeaguePlayers>)
                .post(many_add::<LeaguePlayers>)
                .delete(many_remove::<LeaguePlayers>),
        )
        .route(
            "/:id/administrators",
            get(many_list::<LeagueAdministrators>).put(many_replace::<LeagueAdministrators>),
        )
        .route(
            "/:id/administrators/:related_id",
            get(many_get::<LeagueAdministrators>)
                .post(many_add::<LeagueAdministrators>)
                .delete(many_remove::<LeagueAdministrators>),
        )
        .route(
            "/:id/tournaments",
            get(children_list::<LeagueTournaments>).put(children_replace::<LeagueTournaments>),
        )
        .route(
            "/:id/tournaments/:related_id",
            get(children_get::<LeagueTournaments>)
                .post(children_add::<LeagueTournaments>)
                .delete(children_remove::<LeagueTournaments>),
        )
}

/// GET /leagues
async fn get_leagues(
    Extension(db): Extension<DatabaseConnection>,
) -> ServiceResult<Json<Vec<League>>> {
    leagues::get_all(&db).await.map(Json)
}

/// POST /leagues
async fn create_league(
    Extension(db): Extension<DatabaseConnection>,
    Payload(input): Payload<LeagueInput>,
) -> ServiceResult<(StatusCode, Json<League>)> {
    let league = leagues::create(&db, input).await?;
    Ok((StatusCode::CREATED, Json(league)))
}

/// GET /leagues/:id
///
/// Responds with the league along with its players, administrators
/// and tournaments
async fn get_league(
    Extension(db): Extension<DatabaseConnection>,
    Path(id): Path<RecordId>,
) -> ServiceResult<Json<LeagueDetail>> {
    leagues::detail(&db, id).await.map(Json)
}

/// POST /leagues/:id
async fn update_league(
    Extension(db): Extension<DatabaseConnection>,
    Path(id): Path<RecordId>,
    Payload(input): Payload<LeagueInput>,
) -> ServiceResult<Json<League>> {
    leagues::update(&db, id, input).await.map(Json)
}

/// DELETE /leagues/:id
async fn delete_league(
    Extension(db): Extension<DatabaseConnection>,
    Path(id): Path<RecordId>,
) -> ServiceResult<StatusCode> {
    leagues::delete(&db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

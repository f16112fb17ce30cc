use crate::services::ServiceError;
use axum::{
    async_trait,
    extract::{FromRequest, Request},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json, Router,
};
use log::error;
use serde::de::DeserializeOwned;

mod administrators;
mod associations;
mod comments;
mod games;
mod leagues;
mod moves;
mod openings;
mod players;
mod tournaments;

/// Creates the router for every record kind along with its associations.
/// The database connection, credential store and config are expected as
/// extension layers.
pub fn router() -> Router {
    Router::new()
        .nest("/leagues", leagues::router())
        .nest("/tournaments", tournaments::router())
        .nest("/games", games::router())
        .nest("/players", players::router())
        .nest("/administrators", administrators::router())
        .nest("/moves", moves::router())
        .nest("/openings", openings::router())
        .nest("/comments", comments::router())
}

/// IntoResponse implementation for ServiceError to allow it to be
/// used within the result type as a error response
impl IntoResponse for ServiceError {
    #[inline]
    fn into_response(self) -> Response {
        let status_code = match &self {
            ServiceError::IllegalOperation(_) => StatusCode::BAD_REQUEST,
            ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
            ServiceError::Database(err) => {
                error!("Database error while handling request: {}", err);
                StatusCode::INTERNAL_SERVER_ERROR
            }
            ServiceError::Credentials => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status_code, self.to_string()).into_response()
    }
}

/// JSON request body. Bodies that can't be read as the expected type
/// are rejected as illegal operations.
pub struct Payload<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for Payload<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ServiceError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|err| ServiceError::illegal(err.body_text()))?;
        Ok(Self(value))
    }
}

use std::collections::BTreeMap;

use axum::{
    async_trait,
    extract::{FromRequestParts, Path, Query, State},
    http::{request::Parts, StatusCode},
    response::{IntoResponse, Redirect, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::warn;

use crate::models::Activity;
use crate::services::activities_service::{self, ActivityError};
use crate::store::ActivityStore;

impl IntoResponse for ActivityError {
    fn into_response(self) -> Response {
        let status = match self {
            ActivityError::NotFound => StatusCode::NOT_FOUND,
            ActivityError::AlreadyRegistered
            | ActivityError::CapacityExceeded
            | ActivityError::NotRegistered => StatusCode::BAD_REQUEST,
        };
        warn!(status = %status, detail = %self, "activity request rejected");
        (status, Json(json!({ "detail": self.to_string() }))).into_response()
    }
}

#[derive(Debug, Deserialize)]
pub struct EmailQuery {
    pub email: String,
}

/// `?email=` query extractor whose rejection keeps the `{"detail": ...}` body
/// convention instead of axum's plain-text default.
pub struct Email(pub String);

#[async_trait]
impl<S> FromRequestParts<S> for Email
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Query::<EmailQuery>::from_request_parts(parts, state).await {
            Ok(Query(query)) => Ok(Email(query.email)),
            Err(rejection) => Err((
                rejection.status(),
                Json(json!({ "detail": rejection.body_text() })),
            )
                .into_response()),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MessageBody {
    pub message: String,
}

pub async fn root_handler() -> Redirect {
    Redirect::temporary("/static/index.html")
}

pub async fn activities_handler(
    State(store): State<ActivityStore>,
) -> Json<BTreeMap<String, Activity>> {
    Json(activities_service::list_activities(&store).await)
}

pub async fn signup_handler(
    Path(activity_name): Path<String>,
    Email(email): Email,
    State(store): State<ActivityStore>,
) -> Result<Json<MessageBody>, ActivityError> {
    let message = activities_service::signup(&store, &activity_name, &email).await?;
    Ok(Json(MessageBody { message }))
}

pub async fn unregister_handler(
    Path(activity_name): Path<String>,
    Email(email): Email,
    State(store): State<ActivityStore>,
) -> Result<Json<MessageBody>, ActivityError> {
    let message = activities_service::unregister(&store, &activity_name, &email).await?;
    Ok(Json(MessageBody { message }))
}

/// Users API routes
use crate::{
    api::response::Envelope,
    error::{Result, ServerError},
    state::AppState,
};
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use serde_json::{Map, Value};
use users_core::types::{CreateUser, NewUserPayload, User, UserId, UserSummary};

#[derive(Debug, Serialize)]
pub struct UsersData {
    pub users: Vec<UserSummary>,
}

/// GET /users/ping
pub async fn ping() -> Json<Envelope> {
    Json(Envelope::success("pong!"))
}

/// POST /users
///
/// Any body that is not a JSON object with string `username` and `email`
/// fields is an invalid payload.
pub async fn create_user(
    State(app_state): State<AppState>,
    body: std::result::Result<Json<Map<String, Value>>, JsonRejection>,
) -> Result<(StatusCode, Json<Envelope>)> {
    let Json(object) = body.map_err(|e| ServerError::InvalidPayload(e.body_text()))?;
    let new_user = CreateUser::try_from(decode_payload(object)?)?;

    let user = app_state.store.create_user(new_user).await?;
    tracing::info!(id = user.id, "Created user");

    Ok((
        StatusCode::CREATED,
        Json(Envelope::success(format!("{} ha sido agregado!", user.email))),
    ))
}

/// Arrays would otherwise fill the payload fields by position
fn decode_payload(object: Map<String, Value>) -> Result<NewUserPayload> {
    serde_json::from_value(Value::Object(object))
        .map_err(|e| ServerError::InvalidPayload(e.to_string()))
}

/// GET /users/:id
pub async fn get_user(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
) -> Result<Json<Envelope<User>>> {
    let user_id: UserId = id
        .parse()
        .map_err(|_| ServerError::UserNotFound(id.clone()))?;

    let user = app_state
        .store
        .get_user(user_id)
        .await?
        .ok_or(ServerError::UserNotFound(id))?;

    Ok(Json(Envelope::with_data(user)))
}

/// GET /users
pub async fn list_users(State(app_state): State<AppState>) -> Result<Json<Envelope<UsersData>>> {
    let users = app_state
        .store
        .get_all_users()
        .await?
        .into_iter()
        .map(UserSummary::from)
        .collect();

    Ok(Json(Envelope::with_data(UsersData { users })))
}

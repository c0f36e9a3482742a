use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tracing::{error, info, instrument, warn};

use crate::{
    error::StoreError,
    state::AppState,
    users::{
        dto::{CreateUserRequest, Pagination, PublicUser},
        NewUser,
    },
};

pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(list_users).post(create_user))
        .route("/users/:id", get(get_user))
}

#[instrument(skip(state, payload))]
pub async fn create_user(
    State(state): State<AppState>,
    Json(payload): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<PublicUser>), (StatusCode, String)> {
    let username = payload.username.clone();
    let mut session = state.session();
    session.add(NewUser::new(payload.username, payload.password, payload.email));

    let user = match session.commit().await {
        Ok(mut users) => match users.pop() {
            Some(u) => u,
            None => {
                error!("commit returned no rows");
                return Err((StatusCode::INTERNAL_SERVER_ERROR, "User not created".into()));
            }
        },
        Err(StoreError::UniqueViolation { column, .. }) => {
            warn!(%column, username = %username, "user already exists");
            return Err((StatusCode::CONFLICT, format!("{column} already exists")));
        }
        Err(e) => {
            error!(error = %e, "create user failed");
            return Err((StatusCode::INTERNAL_SERVER_ERROR, e.to_string()));
        }
    };

    info!(user_id = user.id, username = %user.username, "user created");
    Ok((StatusCode::CREATED, Json(user.into())))
}

#[instrument(skip(state))]
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<PublicUser>, (StatusCode, String)> {
    match state.session().user_by_id(id).await {
        Ok(Some(user)) => Ok(Json(user.into())),
        Ok(None) => Err((StatusCode::NOT_FOUND, "User not found".into())),
        Err(e) => {
            error!(error = %e, user_id = id, "get_user failed");
            Err(internal(e))
        }
    }
}

#[instrument(skip(state))]
pub async fn list_users(
    State(state): State<AppState>,
    Query(p): Query<Pagination>,
) -> Result<Json<Vec<PublicUser>>, (StatusCode, String)> {
    let users = state.session()
        .users(p.limit, p.offset)
        .await
        .map_err(internal)?;
    Ok(Json(users.into_iter().map(PublicUser::from).collect()))
}

fn internal<E: std::error::Error>(e: E) -> (StatusCode, String) {
    (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
}

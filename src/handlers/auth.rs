use crate::db::{CreateUserOutcome, DbUser, Role};
use crate::error::DeskError;
use crate::router::DeskState;
use crate::session::{Action, SessionContext, start_session};
use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::extract::WithRejection;
use axum_extra::extract::cookie::PrivateCookieJar;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub username: String,
    pub password: String,
    pub role: Role,
}

#[derive(Debug, Serialize)]
pub struct CreateUserResponse {
    pub created: bool,
}

/// POST /login -> checks credentials and opens a session for the caller.
pub async fn login(
    State(state): State<DeskState>,
    jar: PrivateCookieJar,
    WithRejection(Json(req), _): WithRejection<Json<LoginRequest>, DeskError>,
) -> Result<Response, DeskError> {
    let Some(role) = state.users.authenticate(&req.username, &req.password).await? else {
        warn!(username = %req.username, "rejected login");
        return Err(DeskError::InvalidCredentials);
    };

    info!(username = %req.username, %role, "login succeeded");
    let jar = start_session(jar, role);
    Ok((jar, Json(SessionContext::authenticated(role))).into_response())
}

/// GET /session -> the caller's current authentication state.
pub async fn session(ctx: SessionContext) -> Json<SessionContext> {
    Json(ctx)
}

/// POST /users -> admin-only account creation. A taken username answers 409.
pub async fn create_user(
    State(state): State<DeskState>,
    ctx: SessionContext,
    WithRejection(Json(req), _): WithRejection<Json<CreateUserRequest>, DeskError>,
) -> Result<Response, DeskError> {
    ctx.require(Action::ManageUsers)?;

    let outcome = state
        .users
        .create_user(&req.username, &req.password, req.role)
        .await?;
    let resp = match outcome {
        CreateUserOutcome::Created => (
            StatusCode::CREATED,
            Json(CreateUserResponse { created: true }),
        ),
        CreateUserOutcome::AlreadyExists => (
            StatusCode::CONFLICT,
            Json(CreateUserResponse { created: false }),
        ),
    };
    Ok(resp.into_response())
}

/// GET /users -> admin-only account listing, without passwords.
pub async fn list_users(
    State(state): State<DeskState>,
    ctx: SessionContext,
) -> Result<Json<Vec<DbUser>>, DeskError> {
    ctx.require(Action::ManageUsers)?;
    Ok(Json(state.users.list().await?))
}

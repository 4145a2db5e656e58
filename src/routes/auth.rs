use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::IntoResponse,
};
use serde_json::Value;

use crate::{
    contract,
    dto::{
        auth::{AuthResponse, GoogleLoginRequest, LoginRequest, SignupRequest},
        errors::ValidationErrorBody,
    },
    error::AppResult,
    middleware::auth::{AuthUser, SESSION_COOKIE},
    models::User,
    routes::decode_body,
    services::auth_service::{self, SESSION_TTL_HOURS},
    state::AppState,
};

fn session_cookie(state: &AppState, user: &User) -> AppResult<String> {
    let token = auth_service::issue_session(&state.session_secret, user)?;
    Ok(format!(
        "{SESSION_COOKIE}={token}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
        SESSION_TTL_HOURS * 3600
    ))
}

fn cleared_session_cookie() -> String {
    format!("{SESSION_COOKIE}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0")
}

#[utoipa::path(
    post,
    path = "/api/auth/signup",
    request_body = SignupRequest,
    responses(
        (status = 201, description = "User created and signed in", body = User),
        (status = 400, description = "Invalid input or taken username/email", body = ValidationErrorBody)
    ),
    tag = "Auth"
)]
pub async fn signup(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let payload: SignupRequest = decode_body(&contract::auth::SIGNUP, body)?;
    let user = auth_service::signup(&state, payload).await?;
    let cookie = session_cookie(&state, &user)?;
    Ok((StatusCode::CREATED, [(header::SET_COOKIE, cookie)], Json(user)))
}

#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Signed in", body = AuthResponse),
        (status = 400, description = "Invalid input", body = ValidationErrorBody),
        (status = 401, description = "Invalid credentials", body = ValidationErrorBody)
    ),
    tag = "Auth"
)]
pub async fn login(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let payload: LoginRequest = decode_body(&contract::auth::LOGIN, body)?;
    let user = auth_service::login(&state, payload).await?;
    let cookie = session_cookie(&state, &user)?;
    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, cookie)],
        Json(AuthResponse { user }),
    ))
}

#[utoipa::path(
    get,
    path = "/api/auth/me",
    responses(
        (status = 200, description = "Current user", body = User),
        (status = 401, description = "Not signed in", body = ValidationErrorBody)
    ),
    security(("session_cookie" = []), ("bearer_auth" = [])),
    tag = "Auth"
)]
pub async fn me(State(state): State<AppState>, user: AuthUser) -> AppResult<Json<User>> {
    let user = auth_service::me(&state, &user).await?;
    Ok(Json(user))
}

#[utoipa::path(
    post,
    path = "/api/auth/logout",
    responses(
        (status = 204, description = "Session cleared")
    ),
    tag = "Auth"
)]
pub async fn logout() -> impl IntoResponse {
    (
        StatusCode::NO_CONTENT,
        [(header::SET_COOKIE, cleared_session_cookie())],
    )
}

#[utoipa::path(
    post,
    path = "/api/auth/google",
    request_body = GoogleLoginRequest,
    responses(
        (status = 200, description = "Signed in with Google", body = AuthResponse),
        (status = 400, description = "Invalid input", body = ValidationErrorBody),
        (status = 401, description = "Token rejected", body = ValidationErrorBody)
    ),
    tag = "Auth"
)]
pub async fn google(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let payload: GoogleLoginRequest = decode_body(&contract::auth::GOOGLE, body)?;
    let user = auth_service::google(&state, payload).await?;
    let cookie = session_cookie(&state, &user)?;
    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, cookie)],
        Json(AuthResponse { user }),
    ))
}

use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Extension, Json,
};
use serde::Serialize;
use tracing::warn;

use common::types::TokenBody;
use service::auth::domain::{Identity, LoginInput, RegisterInput};
use service::auth::errors::AuthError;

use crate::errors::ApiError;
use crate::metrics;
use crate::routes::extract::JsonBody;
use crate::state::ServerState;

#[derive(Serialize, utoipa::ToSchema)]
pub struct MeOutput {
    pub id: i32,
    pub email: String,
    pub name: String,
}

#[utoipa::path(post, path = "/register", tag = "auth", request_body = crate::openapi::RegisterRequest, responses((status = 201, description = "Registered", body = crate::openapi::TokenResponse), (status = 400, description = "Bad Request", body = crate::openapi::ErrorResponse)))]
pub async fn register(
    State(state): State<ServerState>,
    JsonBody(input): JsonBody<RegisterInput>,
) -> Result<(StatusCode, Json<TokenBody>), ApiError> {
    let session = state.auth.register(input).await?;
    metrics::REGISTRATIONS_TOTAL.inc();
    Ok((StatusCode::CREATED, Json(TokenBody { token: session.token })))
}

#[utoipa::path(post, path = "/login", tag = "auth", request_body = crate::openapi::LoginRequest, responses((status = 200, description = "Logged In", body = crate::openapi::TokenResponse), (status = 401, description = "Unauthorized", body = crate::openapi::ErrorResponse)))]
pub async fn login(
    State(state): State<ServerState>,
    JsonBody(input): JsonBody<LoginInput>,
) -> Result<Json<TokenBody>, ApiError> {
    match state.auth.login(input).await {
        Ok(session) => {
            metrics::record_login(true);
            Ok(Json(TokenBody { token: session.token }))
        }
        Err(e) => {
            if matches!(e, AuthError::Unauthorized) {
                metrics::record_login(false);
            }
            Err(e.into())
        }
    }
}

#[utoipa::path(get, path = "/me", tag = "auth", security(("bearer" = [])), responses((status = 200, description = "Current user", body = MeOutput), (status = 401, description = "Missing token"), (status = 403, description = "Invalid token")))]
pub async fn me(
    State(state): State<ServerState>,
    Extension(identity): Extension<Identity>,
) -> Result<Json<MeOutput>, ApiError> {
    let user = state.auth.current_user(identity).await?;
    Ok(Json(MeOutput { id: user.id, email: user.email, name: user.name }))
}

/// Route-layer middleware: verify `Authorization: Bearer <token>` and attach the
/// caller's `Identity`. Missing token is 401, a bad one 403.
pub async fn require_bearer(State(state): State<ServerState>, mut req: Request, next: Next) -> Response {
    let header = req.headers().get(AUTHORIZATION).and_then(|v| v.to_str().ok());
    match state.auth.authenticate(header) {
        Ok(identity) => {
            req.extensions_mut().insert(identity);
            next.run(req).await
        }
        Err(e) => {
            warn!(path = %req.uri().path(), error = %e, "bearer authentication failed");
            ApiError::from(e).into_response()
        }
    }
}

use axum::{
    extract::{FromRef, State},
    routing::{get, post},
    Json, Router,
};
use tracing::{info, instrument, warn};

use crate::{
    auth::{
        dto::{AuthResponse, LoginRequest, PublicUser, SignupRequest},
        error::AuthError,
        jwt::{AuthUser, JwtKeys},
        password::{hash_password, verify_password},
    },
    state::AppState,
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/signup", post(signup))
        .route("/auth/login", post(login))
        .route("/auth/validate", get(validate))
}

#[instrument(skip(state, payload))]
pub async fn signup(
    State(state): State<AppState>,
    Json(payload): Json<SignupRequest>,
) -> Result<Json<AuthResponse>, AuthError> {
    let hash = hash_password(&payload.password).map_err(AuthError::SignupFailed)?;

    // Duplicate check and insert are one critical section inside the store
    let user = state
        .users
        .create(&payload.full_name, &payload.email, &hash)
        .await
        .map_err(|_| {
            warn!(email = %payload.email, "signup for existing email");
            AuthError::DuplicateEmail
        })?;

    let keys = JwtKeys::from_ref(&state);
    let token = keys.sign(user.id).map_err(AuthError::SignupFailed)?;

    info!(user_id = user.id, email = %user.email, "user registered");
    Ok(Json(AuthResponse {
        token,
        user: PublicUser::from(user),
    }))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, AuthError> {
    // Unknown email and wrong password produce the same response on purpose
    let user = match state.users.find_by_email(&payload.email).await {
        Some(u) => u,
        None => {
            warn!(email = %payload.email, "login unknown email");
            return Err(AuthError::InvalidCredentials);
        }
    };

    let ok = verify_password(&payload.password, &user.password_hash)
        .map_err(AuthError::LoginFailed)?;
    if !ok {
        warn!(user_id = user.id, "login invalid password");
        return Err(AuthError::InvalidCredentials);
    }

    let keys = JwtKeys::from_ref(&state);
    let token = keys.sign(user.id).map_err(AuthError::LoginFailed)?;

    info!(user_id = user.id, email = %user.email, "user logged in");
    Ok(Json(AuthResponse {
        token,
        user: PublicUser::from(user),
    }))
}

#[instrument(skip(state))]
pub async fn validate(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<PublicUser>, AuthError> {
    // A token whose subject no longer exists is as bad as a forged one
    let user = state.users.find_by_id(user_id).await.ok_or_else(|| {
        warn!(user_id, "valid signature but unknown user");
        AuthError::InvalidToken
    })?;

    info!(user_id = user.id, email = %user.email, "token validated");
    Ok(Json(PublicUser::from(user)))
}

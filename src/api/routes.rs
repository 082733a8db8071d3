//! API route handlers

use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use super::server::{AppState, SharedState};
use crate::auth::middleware::authenticate;
use crate::auth::models::{
    ErrorResponse, LoginRequest, LoginResponse, MessageResponse, RefreshResponse, RegisterRequest,
    Role, User,
};
use crate::auth::password::{hash_password, verify_password};
use crate::auth::session::{self, RefreshOutcome, TokenPair};
use crate::books::Book;
use crate::error::{Error, Result};

/// Name of the refresh-token cookie
const REFRESH_COOKIE: &str = "refresh_token";
/// The cookie is scoped to the refresh endpoint only
const REFRESH_COOKIE_PATH: &str = "/refresh_token";

// Cookie helpers

/// Build the Set-Cookie value carrying a refresh token
fn refresh_cookie(token: &str) -> String {
    format!(
        "{}={}; HttpOnly; Path={}; SameSite=Strict",
        REFRESH_COOKIE, token, REFRESH_COOKIE_PATH
    )
}

/// Build the Set-Cookie value that expires the refresh cookie
fn clear_refresh_cookie() -> String {
    format!(
        "{}=; HttpOnly; Path={}; SameSite=Strict; Max-Age=0",
        REFRESH_COOKIE, REFRESH_COOKIE_PATH
    )
}

/// Pull the refresh token out of the Cookie header, if present
fn refresh_token_from(headers: &HeaderMap) -> Option<String> {
    let cookies = headers.get(header::COOKIE)?.to_str().ok()?;
    for cookie in cookies.split(';') {
        let mut parts = cookie.trim().splitn(2, '=');
        if parts.next() == Some(REFRESH_COOKIE) {
            return parts.next().map(|token| token.to_string());
        }
    }
    None
}

// Failure mapping

/// Map an error to its HTTP status code
fn status_for(err: &Error) -> StatusCode {
    match err {
        Error::MissingCredential
        | Error::MalformedCredential
        | Error::InvalidSignature
        | Error::Expired
        | Error::InvalidCredentials
        | Error::UnknownIdentity => StatusCode::UNAUTHORIZED,
        Error::NotAuthorized => StatusCode::FORBIDDEN,
        Error::DuplicateIdentity(_) => StatusCode::CONFLICT,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Convert an error into the documented `{error}` payload
fn failure(err: Error) -> Response {
    (
        status_for(&err),
        Json(ErrorResponse {
            error: err.to_string(),
        }),
    )
        .into_response()
}

// Health check

pub async fn health() -> impl IntoResponse {
    Json(MessageResponse {
        message: "healthy".to_string(),
    })
}

// Account routes

pub async fn register(
    State(state): State<SharedState>,
    Json(req): Json<RegisterRequest>,
) -> Response {
    let state = state.read().await;

    match register_user(&state, req).await {
        Ok(message) => (StatusCode::CREATED, Json(MessageResponse { message })).into_response(),
        Err(e) => failure(e),
    }
}

async fn register_user(state: &AppState, req: RegisterRequest) -> Result<String> {
    if state.users.find_by_email(&req.email).await.is_some() {
        return Err(Error::DuplicateIdentity(req.email));
    }

    let password_hash = hash_password(&req.password)?;
    let user = User::new(req.email, password_hash, Role::User);
    let email = user.email.clone();
    state.users.insert(user).await?;

    tracing::info!(email = %email, "User registered");
    Ok("User created successfully".to_string())
}

pub async fn login(State(state): State<SharedState>, Json(req): Json<LoginRequest>) -> Response {
    let state = state.read().await;

    match login_user(&state, &req).await {
        Ok((pair, email)) => (
            StatusCode::OK,
            [(header::SET_COOKIE, refresh_cookie(&pair.refresh))],
            Json(LoginResponse {
                access_token: pair.access,
                email,
            }),
        )
            .into_response(),
        Err(e) => failure(e),
    }
}

async fn login_user(state: &AppState, req: &LoginRequest) -> Result<(TokenPair, String)> {
    // A wrong email and a wrong password fail identically
    let user = state
        .users
        .find_by_email(&req.email)
        .await
        .ok_or(Error::InvalidCredentials)?;

    if !verify_password(&req.password, &user.password_hash)? {
        return Err(Error::InvalidCredentials);
    }

    let pair = session::issue_pair(&state.config.auth, &state.users, &user).await?;
    Ok((pair, user.email))
}

// Book routes

pub async fn list_books(State(state): State<SharedState>, headers: HeaderMap) -> Response {
    let state = state.read().await;

    let claims = match authenticate(&headers, &state.config.auth.access_secret) {
        Ok(claims) => claims,
        Err(e) => return failure(e),
    };

    // Any recognized role may browse; an unrecognized one fails here
    if claims.role().is_none() {
        return failure(Error::NotAuthorized);
    }

    Json(state.books.list().await).into_response()
}

pub async fn create_book(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Json(book): Json<Book>,
) -> Response {
    let state = state.read().await;

    let claims = match authenticate(&headers, &state.config.auth.access_secret) {
        Ok(claims) => claims,
        Err(e) => return failure(e),
    };

    if claims.role() != Some(Role::Admin) {
        return failure(Error::NotAuthorized);
    }

    state.books.add(book).await;

    (
        StatusCode::CREATED,
        Json(MessageResponse {
            message: "Book added successfully".to_string(),
        }),
    )
        .into_response()
}

// Session routes

pub async fn refresh_token(State(state): State<SharedState>, headers: HeaderMap) -> Response {
    let state = state.read().await;
    let presented = refresh_token_from(&headers);

    match session::rotate(&state.config.auth, &state.users, presented.as_deref()).await {
        RefreshOutcome::Rotated(pair) => (
            StatusCode::OK,
            [(header::SET_COOKIE, refresh_cookie(&pair.refresh))],
            Json(RefreshResponse {
                access_token: pair.access,
            }),
        )
            .into_response(),
        // A missing session and a rejected token look identical to the
        // client: 200 with an empty token
        RefreshOutcome::NoSession | RefreshOutcome::Rejected => Json(RefreshResponse {
            access_token: String::new(),
        })
        .into_response(),
    }
}

pub async fn logout(State(state): State<SharedState>, headers: HeaderMap) -> Response {
    let state = state.read().await;
    let presented = refresh_token_from(&headers);

    // Expire the cookie and drop the stored session so the token cannot be
    // replayed later
    session::invalidate(&state.config.auth, &state.users, presented.as_deref()).await;

    (
        StatusCode::OK,
        [(header::SET_COOKIE, clear_refresh_cookie())],
        Json(MessageResponse {
            message: "Logged out".to_string(),
        }),
    )
        .into_response()
}

use axum::{
    extract::{FromRef, State},
    routing::post,
    Form, Json, Router,
};
use tracing::{error, info, instrument, warn};

use crate::{
    auth::{
        dto::{AuthResponse, Credentials, MsgResponse},
        repo_types::User,
        services::{hash_password, is_valid_username, verify_password, JwtKeys},
    },
    state::AppState,
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/signup", post(signup))
        .route("/login", post(login))
}

#[instrument(skip(state, form))]
pub async fn signup(
    State(state): State<AppState>,
    Form(mut form): Form<Credentials>,
) -> Result<Json<MsgResponse>, (axum::http::StatusCode, String)> {
    form.username = form.username.trim().to_string();

    if !is_valid_username(&form.username) {
        warn!(username = %form.username, "invalid username");
        return Err((axum::http::StatusCode::BAD_REQUEST, "Invalid username".into()));
    }

    if form.password.len() < 8 {
        warn!("password too short");
        return Err((
            axum::http::StatusCode::BAD_REQUEST,
            "Password too short".into(),
        ));
    }

    // Ensure username is not taken
    if let Ok(Some(_)) = User::find_by_username(&state.db, &form.username).await {
        warn!(username = %form.username, "username already exists");
        return Err((
            axum::http::StatusCode::BAD_REQUEST,
            "Username already exists".into(),
        ));
    }

    let hash = match hash_password(&form.password) {
        Ok(h) => h,
        Err(e) => {
            error!(error = %e, "hash_password failed");
            return Err((axum::http::StatusCode::INTERNAL_SERVER_ERROR, e.to_string()));
        }
    };

    match User::create(&state.db, &form.username, &hash).await {
        Ok(user) => {
            info!(user_id = %user.id, username = %user.username, "user signed up");
            Ok(Json(MsgResponse {
                msg: "Signup successful",
            }))
        }
        // Concurrent signup with the same name loses the insert race.
        Err(e) if is_unique_violation(&e) => {
            warn!(username = %form.username, "username already exists");
            Err((
                axum::http::StatusCode::BAD_REQUEST,
                "Username already exists".into(),
            ))
        }
        Err(e) => {
            error!(error = %e, "create user failed");
            Err((axum::http::StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))
        }
    }
}

#[instrument(skip(state, form))]
pub async fn login(
    State(state): State<AppState>,
    Form(mut form): Form<Credentials>,
) -> Result<Json<AuthResponse>, (axum::http::StatusCode, String)> {
    form.username = form.username.trim().to_string();

    let user = match User::find_by_username(&state.db, &form.username).await {
        Ok(Some(u)) => u,
        Ok(None) => {
            warn!(username = %form.username, "login unknown username");
            return Err((
                axum::http::StatusCode::BAD_REQUEST,
                "Invalid username or password".into(),
            ));
        }
        Err(e) => {
            error!(error = %e, "find_by_username failed");
            return Err((axum::http::StatusCode::INTERNAL_SERVER_ERROR, e.to_string()));
        }
    };

    let ok = match verify_password(&form.password, &user.password_hash) {
        Ok(v) => v,
        Err(e) => {
            error!(error = %e, "verify_password failed");
            return Err((axum::http::StatusCode::INTERNAL_SERVER_ERROR, e.to_string()));
        }
    };

    if !ok {
        warn!(username = %form.username, user_id = %user.id, "login invalid password");
        return Err((
            axum::http::StatusCode::BAD_REQUEST,
            "Invalid username or password".into(),
        ));
    }

    let keys = JwtKeys::from_ref(&state);
    let access_token = match keys.sign_access(user.id) {
        Ok(t) => t,
        Err(e) => {
            error!(error = %e, "jwt sign access failed");
            return Err((axum::http::StatusCode::INTERNAL_SERVER_ERROR, e.to_string()));
        }
    };

    info!(user_id = %user.id, username = %user.username, "user logged in");
    Ok(Json(AuthResponse {
        access_token,
        user: user.username,
    }))
}

fn is_unique_violation(e: &anyhow::Error) -> bool {
    e.downcast_ref::<sqlx::Error>()
        .and_then(|e| e.as_database_error())
        .is_some_and(|db| db.is_unique_violation())
}

#[cfg(test)]
mod response_tests {
    use super::*;

    #[test]
    fn signup_response_serialization() {
        let response = MsgResponse {
            msg: "Signup successful",
        };
        let json = serde_json::to_string(&response).unwrap();
        assert_eq!(json, r#"{"msg":"Signup successful"}"#);
    }

    #[test]
    fn login_response_serialization() {
        let response = AuthResponse {
            access_token: "abc".into(),
            user: "alice".into(),
        };
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("access_token"));
        assert!(json.contains("alice"));
    }
}

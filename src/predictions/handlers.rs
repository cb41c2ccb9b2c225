use axum::{
    extract::{DefaultBodyLimit, Multipart, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tracing::{error, instrument};

use crate::{
    auth::{repo_types::User, services::AuthUser},
    state::AppState,
};

use super::dto::{HistoryItem, HistoryResponse, PredictResponse};
use super::repo_types::Transaction;
use super::services::{run_prediction, PredictionOutcome};

pub fn predict_routes() -> Router<AppState> {
    Router::new()
        .route("/predict", post(predict))
        .layer(DefaultBodyLimit::max(20 * 1024 * 1024)) // 20MB
}

pub fn history_routes() -> Router<AppState> {
    Router::new().route("/history", get(history))
}

/// POST /predict (multipart field `image`)
#[instrument(skip(state, mp))]
pub async fn predict(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    mut mp: Multipart,
) -> Result<Json<PredictResponse>, (StatusCode, String)> {
    let mut upload: Option<(bytes::Bytes, String)> = None;
    while let Ok(Some(field)) = mp.next_field().await {
        if field.name() == Some("image") {
            let content_type = field
                .content_type()
                .map(|s| s.to_string())
                .unwrap_or_else(|| "application/octet-stream".into());
            let data = field.bytes().await.map_err(internal)?;
            upload = Some((data, content_type));
            break;
        }
    }
    let Some((body, content_type)) = upload else {
        return Err((StatusCode::BAD_REQUEST, "image is required".into()));
    };

    match run_prediction(&state, user_id, body, &content_type).await {
        Ok(PredictionOutcome::NotFood { confidence }) => {
            Ok(Json(PredictResponse::no_food(confidence)))
        }
        Ok(PredictionOutcome::Undetected) => Ok(Json(PredictResponse::undetected())),
        Ok(PredictionOutcome::Accepted {
            transaction,
            category,
        }) => Ok(Json(PredictResponse::accepted(transaction, category))),
        Err(e) => {
            error!(error = %e, %user_id, "predict failed");
            Err((StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))
        }
    }
}

/// GET /history — the caller's transactions, oldest first.
#[instrument(skip(state))]
pub async fn history(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<HistoryResponse>, (StatusCode, String)> {
    let user = User::find_by_id(&state.db, user_id)
        .await
        .map_err(internal)?
        .ok_or((StatusCode::UNAUTHORIZED, "User not found".to_string()))?;

    let rows = Transaction::list_by_user(&state.db, user_id)
        .await
        .map_err(internal)?;

    Ok(Json(HistoryResponse {
        user: user.username,
        history: rows.into_iter().map(HistoryItem::from).collect(),
    }))
}

fn internal<E: std::fmt::Display>(e: E) -> (StatusCode, String) {
    (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
}

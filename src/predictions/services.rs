use anyhow::Context;
use bytes::Bytes;
use tracing::{debug, info};
use uuid::Uuid;

use crate::classify::{self, Classification};
use crate::state::AppState;

use super::repo_types::Transaction;

/// What a prediction run produced. Only `Accepted` touches storage and the db.
#[derive(Debug)]
pub enum PredictionOutcome {
    NotFood {
        confidence: f64,
    },
    Undetected,
    Accepted {
        transaction: Transaction,
        category: Option<&'static str>,
    },
}

pub fn meets_threshold(confidence: f32, threshold: f32) -> bool {
    confidence >= threshold
}

/// Decode → food gate → dish gate → upload → transaction write.
pub async fn run_prediction(
    st: &AppState,
    user_id: Uuid,
    body: Bytes,
    content_type: &str,
) -> anyhow::Result<PredictionOutcome> {
    let image = classify::decode_image(&body).context("decode uploaded image")?;

    let check = st.detector.detect(&image)?;
    if !check.is_food {
        info!(%user_id, confidence = check.confidence, "no food detected");
        return Ok(PredictionOutcome::NotFood {
            confidence: check.confidence as f64,
        });
    }

    let Classification { label, confidence } = st.classifier.classify(&image)?;
    if !meets_threshold(confidence, st.config.models.acceptance_threshold) {
        info!(%user_id, %label, confidence, "below acceptance threshold");
        return Ok(PredictionOutcome::Undetected);
    }

    let ext = ext_from_mime(content_type).unwrap_or("bin");
    let key = format!("predictions/{}/{}.{}", user_id, Uuid::new_v4(), ext);
    st.storage
        .put_object(&key, body, content_type)
        .await
        .with_context(|| format!("put_object {}", key))?;
    let image_url = st.storage.public_url(&key);

    let transaction =
        Transaction::create(&st.db, user_id, &image_url, &label, confidence as f64).await?;
    debug!(%user_id, transaction_id = %transaction.id, "transaction recorded");

    Ok(PredictionOutcome::Accepted {
        category: classify::labels::food_group(&transaction.prediction),
        transaction,
    })
}

fn ext_from_mime(ct: &str) -> Option<&'static str> {
    match ct {
        "image/jpeg" | "image/jpg" => Some("jpg"),
        "image/png" => Some("png"),
        "image/webp" => Some("webp"),
        _ => None,
    }
}

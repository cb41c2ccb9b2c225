use serde::Serialize;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::predictions::repo_types::Transaction;

/// Label returned when the food-presence check says no.
pub const NO_FOOD_LABEL: &str = "No Food Item Is Detected";
/// Label returned when the dish classifier stays below the acceptance threshold.
pub const UNDETECTED_LABEL: &str = "Unable to Detect";

#[derive(Debug, Serialize)]
pub struct PredictResponse {
    pub prediction: String,
    pub confidence: f64,
    pub image_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl PredictResponse {
    pub fn no_food(confidence: f64) -> Self {
        Self {
            prediction: NO_FOOD_LABEL.into(),
            confidence,
            image_url: String::new(),
            category: None,
        }
    }

    pub fn undetected() -> Self {
        Self {
            prediction: UNDETECTED_LABEL.into(),
            confidence: 0.0,
            image_url: String::new(),
            category: None,
        }
    }

    pub fn accepted(transaction: Transaction, category: Option<&'static str>) -> Self {
        Self {
            prediction: transaction.prediction,
            confidence: transaction.confidence,
            image_url: transaction.image_url,
            category: category.map(str::to_string),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HistoryItem {
    pub id: Uuid,
    pub image_url: String,
    pub prediction: String,
    pub confidence: f64,
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
}

impl From<Transaction> for HistoryItem {
    fn from(t: Transaction) -> Self {
        Self {
            id: t.id,
            image_url: t.image_url,
            prediction: t.prediction,
            confidence: t.confidence,
            timestamp: t.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    pub user: String,
    pub history: Vec<HistoryItem>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn undetected_matches_wire_contract() {
        let json = serde_json::to_string(&PredictResponse::undetected()).unwrap();
        assert_eq!(
            json,
            r#"{"prediction":"Unable to Detect","confidence":0.0,"image_url":""}"#
        );
    }

    #[test]
    fn no_food_reports_check_confidence_and_no_url() {
        let resp = PredictResponse::no_food(0.82);
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("No Food Item Is Detected"));
        assert!(json.contains(r#""image_url":"""#));
        assert!(!json.contains("category"));
    }

    #[test]
    fn accepted_carries_stored_fields_and_category() {
        let t = Transaction {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            image_url: "https://cdn.example/predictions/x.jpg".into(),
            prediction: "samosa".into(),
            confidence: 0.91,
            created_at: OffsetDateTime::UNIX_EPOCH,
        };
        let resp = PredictResponse::accepted(t, Some("Fried Food"));
        assert_eq!(resp.prediction, "samosa");
        assert_eq!(resp.confidence, 0.91);
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains(r#""category":"Fried Food""#));
    }

    #[test]
    fn history_item_timestamp_is_rfc3339() {
        let item = HistoryItem {
            id: Uuid::new_v4(),
            image_url: "u".into(),
            prediction: "idli".into(),
            confidence: 0.7,
            timestamp: OffsetDateTime::UNIX_EPOCH,
        };
        let json = serde_json::to_string(&item).unwrap();
        assert!(json.contains("1970-01-01T00:00:00Z"));
    }
}

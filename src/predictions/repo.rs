use anyhow::Context;
use sqlx::PgPool;
use uuid::Uuid;

use crate::predictions::repo_types::Transaction;

impl Transaction {
    /// Record an accepted prediction.
    pub async fn create(
        db: &PgPool,
        user_id: Uuid,
        image_url: &str,
        prediction: &str,
        confidence: f64,
    ) -> anyhow::Result<Transaction> {
        let row = sqlx::query_as::<_, Transaction>(
            r#"
            INSERT INTO transactions (user_id, image_url, prediction, confidence)
            VALUES ($1, $2, $3, $4)
            RETURNING id, user_id, image_url, prediction, confidence, created_at
            "#,
        )
        .bind(user_id)
        .bind(image_url)
        .bind(prediction)
        .bind(confidence)
        .fetch_one(db)
        .await
        .context("insert transaction")?;
        Ok(row)
    }

    /// All of a user's transactions, oldest first.
    pub async fn list_by_user(db: &PgPool, user_id: Uuid) -> anyhow::Result<Vec<Transaction>> {
        let rows = sqlx::query_as::<_, Transaction>(
            r#"
            SELECT id, user_id, image_url, prediction, confidence, created_at
            FROM transactions
            WHERE user_id = $1
            ORDER BY created_at ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(db)
        .await
        .context("list transactions by user")?;
        Ok(rows)
    }
}

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    pub issuer: String,
    pub audience: String,
    pub ttl_minutes: i64,
}

/// Where the exported model graphs live and how strict acceptance is.
#[derive(Debug, Clone, Deserialize)]
pub struct ModelConfig {
    pub food_model_path: String,
    pub dish_model_path: String,
    pub acceptance_threshold: f32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub jwt: JwtConfig,
    pub models: ModelConfig,
    pub minio_endpoint: String,
    pub minio_bucket: String,
    pub minio_access_key: String,
    pub minio_secret_key: String,
    /// Base under which uploaded objects are publicly reachable.
    /// Falls back to the endpoint for path-style MinIO setups.
    pub minio_public_url: String,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL")?;
        let jwt = JwtConfig {
            secret: std::env::var("JWT_SECRET")?,
            issuer: std::env::var("JWT_ISSUER").unwrap_or_else(|_| "foodlens".into()),
            audience: std::env::var("JWT_AUDIENCE").unwrap_or_else(|_| "foodlens-users".into()),
            ttl_minutes: std::env::var("JWT_TTL_MINUTES")
                .ok()
                .and_then(|v| v.parse::<i64>().ok())
                .unwrap_or(60),
        };
        let models = ModelConfig {
            food_model_path: std::env::var("FOOD_MODEL_PATH")
                .unwrap_or_else(|_| "models/food.onnx".into()),
            dish_model_path: std::env::var("DISH_MODEL_PATH")
                .unwrap_or_else(|_| "models/food_classifier.onnx".into()),
            acceptance_threshold: std::env::var("ACCEPTANCE_THRESHOLD")
                .ok()
                .and_then(|v| v.parse::<f32>().ok())
                .unwrap_or(0.6),
        };
        let minio_endpoint = std::env::var("MINIO_ENDPOINT")?;
        let minio_public_url =
            std::env::var("MINIO_PUBLIC_URL").unwrap_or_else(|_| minio_endpoint.clone());
        Ok(Self {
            database_url,
            jwt,
            models,
            minio_endpoint,
            minio_bucket: std::env::var("MINIO_BUCKET")?,
            minio_access_key: std::env::var("MINIO_ACCESS_KEY")?,
            minio_secret_key: std::env::var("MINIO_SECRET_KEY")?,
            minio_public_url,
        })
    }
}

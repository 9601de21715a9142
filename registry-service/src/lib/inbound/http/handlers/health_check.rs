use axum::Json;
use serde_json::json;
use serde_json::Value;

pub async fn health_check() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

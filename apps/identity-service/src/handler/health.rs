//! # ヘルスチェックハンドラ
//!
//! - `/health` — Liveness Check（常に `"healthy"` を返す）
//! - `/health/ready` — Readiness Check（データベースへの疎通を確認）

use std::{collections::HashMap, sync::Arc, time::Duration};

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use identity_infra::db;
use identity_shared::{CheckStatus, HealthResponse, ReadinessResponse};
use sqlx::MySqlPool;

/// Readiness Check 用の State
pub struct ReadinessState {
    pub pool: MySqlPool,
}

/// Liveness Check
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse::healthy(env!("CARGO_PKG_VERSION")))
}

/// Readiness Check
///
/// データベースに到達できれば 200、できなければ 503。
#[tracing::instrument(skip_all)]
pub async fn readiness_check(State(state): State<Arc<ReadinessState>>) -> impl IntoResponse {
    let mut checks = HashMap::new();
    checks.insert("database".to_string(), check_database(&state.pool).await);

    let response = ReadinessResponse::from_checks(checks);
    let http_status = if response.is_ready() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (http_status, Json(response))
}

/// `SELECT 1` で疎通を確認する（タイムアウト: 5 秒）
async fn check_database(pool: &MySqlPool) -> CheckStatus {
    match tokio::time::timeout(Duration::from_secs(5), db::ping(pool)).await {
        Ok(Ok(())) => CheckStatus::Ok,
        Ok(Err(e)) => {
            tracing::warn!(error = %e, "readiness check: database ping failed");
            CheckStatus::Error
        }
        Err(_) => {
            tracing::warn!("readiness check: database check timed out");
            CheckStatus::Error
        }
    }
}

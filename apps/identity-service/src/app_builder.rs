//! # アプリケーション構築
//!
//! 依存コンポーネントの組み立てとルーター構築を担当する。
//! `main.rs` は設定読み込みとサーバー起動に集中する。

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use identity_domain::clock::SystemClock;
use identity_infra::{
    HashSchemeDispatcher,
    JwtTokenSigner,
    repository::MySqlUserRepository,
};
use identity_shared::{
    canonical_log::CanonicalLogLineLayer,
    observability::{MakeRequestUuidV7, make_request_span},
};
use sqlx::MySqlPool;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::{
    config::IdentityConfig,
    handler::{AuthState, ReadinessState, health_check, login, readiness_check},
    usecase::AuthUseCaseImpl,
};

/// 本番用の依存コンポーネントで State を組み立てる
pub fn build_states(
    config: &IdentityConfig,
    pool: MySqlPool,
) -> (Arc<AuthState>, Arc<ReadinessState>) {
    let readiness_state = Arc::new(ReadinessState { pool: pool.clone() });

    let clock = Arc::new(SystemClock);
    let usecase = AuthUseCaseImpl::new(
        Arc::new(MySqlUserRepository::new(pool)),
        Arc::new(HashSchemeDispatcher::new()),
        Arc::new(JwtTokenSigner::new(&config.jwt_secret, clock.clone())),
        clock,
        config.pepper.clone(),
    );
    let auth_state = Arc::new(AuthState {
        usecase: Arc::new(usecase),
    });

    (auth_state, readiness_state)
}

/// ルーターを構築する
///
/// レイヤーは下に書いたものが外側:
/// 1. `SetRequestIdLayer`: `x-request-id` がなければ UUID v7 を付与
/// 2. `TraceLayer`: request_id を含むリクエストスパン
/// 3. `PropagateRequestIdLayer`: レスポンスヘッダーへ `x-request-id` をコピー
/// 4. `CanonicalLogLineLayer`: リクエストごとのサマリログ
pub fn build_router(auth_state: Arc<AuthState>, readiness_state: Arc<ReadinessState>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .merge(
            Router::new()
                .route("/health/ready", get(readiness_check))
                .with_state(readiness_state),
        )
        .route("/api/auth/login", post(login))
        .with_state(auth_state)
        .layer(CanonicalLogLineLayer)
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV7))
}

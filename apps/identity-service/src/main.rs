//! # Identity Service サーバー
//!
//! `POST /api/auth/login` でメールアドレスとパスワードを受け取り、
//! 身元情報を含む署名済みトークンを返す。
//!
//! ## 環境変数
//!
//! | 変数名 | 必須 | 説明 |
//! |--------|------|------|
//! | `HOST` | No | バインドアドレス（デフォルト: `0.0.0.0`） |
//! | `PORT` | No | ポート番号（デフォルト: `8081`） |
//! | `DB_HOST` | **Yes** | MySQL ホスト |
//! | `DB_PORT` | No | MySQL ポート（デフォルト: `3306`） |
//! | `DB_USER` | **Yes** | MySQL ユーザー |
//! | `DB_PASSWORD` | No | MySQL パスワード |
//! | `DB_NAME` | **Yes** | データベース名 |
//! | `DB_MAX_CONNECTIONS` | No | 接続プール上限（デフォルト: `10`） |
//! | `DB_PASSWORD_PEPPER` | **Yes** | パスワード検証前に連結するペッパー |
//! | `JWT_SECRET` | **Yes** | トークン署名鍵 |
//! | `LOG_FORMAT` | No | `json` / `pretty` |
//!
//! ## 起動方法
//!
//! ```bash
//! cargo run -p identity-service
//! ```

use std::net::SocketAddr;

use anyhow::Context as _;
use identity_infra::db;
use identity_service::{app_builder, config::IdentityConfig};
use identity_shared::observability::TracingConfig;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env ファイルを読み込む（存在する場合）
    dotenvy::dotenv().ok();

    let tracing_config = TracingConfig::from_env("identity-service");
    identity_shared::observability::init_tracing(tracing_config);
    let _tracing_guard = tracing::info_span!("app", service = "identity-service").entered();

    let config = IdentityConfig::from_env().context("設定の読み込みに失敗しました")?;

    tracing::info!(
        "Identity Service サーバーを起動します: {}:{}",
        config.host,
        config.port
    );

    let pool = db::create_pool(&config.database);
    match db::ping(&pool).await {
        Ok(()) => tracing::info!("データベースに接続しました"),
        // 起動は継続し、Readiness Check で 503 を返す
        Err(e) => tracing::warn!(error = %e, "データベースに接続できません"),
    }

    let (auth_state, readiness_state) = app_builder::build_states(&config, pool);
    let app = app_builder::build_router(auth_state, readiness_state);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .context("アドレスのパースに失敗しました")?;

    let listener = TcpListener::bind(addr).await?;
    tracing::info!("Identity Service サーバーが起動しました: {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

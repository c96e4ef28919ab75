//! 리뷰 생성 프록시 HTTP 서버(axum).
//! 브라우저는 자격 증명 없이 이 라우트만 호출한다.

mod handlers;

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::Router;
use axum::http::{Method, header};
use axum::routing::{get, post};
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tracing::{info, warn};

use crate::application::ports::CompletionGateway;
use crate::domain::resort::ConfigurationCatalog;

/// 리뷰 생성 라우트. 두 번째 경로는 기존 배포의 함수 경로와 호환된다.
pub const GENERATE_ROUTES: [&str; 2] = [
    "/api/generate-review",
    "/.netlify/functions/generate-review",
];

/// 모든 핸들러가 공유하는 읽기 전용 상태.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<ConfigurationCatalog>,
    pub gateway: Arc<dyn CompletionGateway>,
}

pub fn router(state: AppState, static_dir: Option<&str>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    let mut app = Router::new();
    for path in GENERATE_ROUTES {
        app = app.route(
            path,
            post(handlers::generate_review)
                .options(handlers::preflight)
                .fallback(handlers::method_not_allowed),
        );
    }
    let app = app
        .route("/api/resorts", get(handlers::list_resorts))
        .route("/api/resort", get(handlers::resolve_resort));

    let app = match static_dir {
        Some(dir) => app.fallback_service(ServeDir::new(dir)),
        None => app,
    };

    app.with_state(state).layer(cors)
}

/// Ctrl-C를 받을 때까지 서비스한다.
pub async fn serve(bind: &str, app: Router) -> Result<()> {
    let listener = TcpListener::bind(bind)
        .await
        .with_context(|| format!("failed to bind {bind}"))?;
    info!(addr = %listener.local_addr()?, "review proxy listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("review proxy stopped unexpectedly")?;

    info!("review proxy stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "failed to install Ctrl-C handler");
        std::future::pending::<()>().await;
    }
}

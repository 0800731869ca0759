//! Wishboard server entry point.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio::signal;
use tower_http::{
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    trace::TraceLayer,
};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use wishboard_api::{AppState, RateLimiterState};
use wishboard_common::Config;
use wishboard_core::{
    AuthService, CommentService, InteractionService, TokenService, UserService,
    WishFavoriteService, WishLikeService, WishListCache, WishService,
};
use wishboard_db::repositories::{
    CommentRepository, UserRepository, WishFavoriteRepository, WishLikeRepository, WishRepository,
};

/// Largest accepted request body.
const MAX_BODY_BYTES: usize = 64 * 1024;

/// How often expired rate limit windows are dropped.
const RATE_LIMIT_CLEANUP_INTERVAL: Duration = Duration::from_secs(300);

/// Waits for a shutdown signal (SIGINT or SIGTERM).
///
/// On Unix systems, this listens for both SIGINT (Ctrl+C) and SIGTERM.
/// On Windows, this only listens for Ctrl+C.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received SIGINT, initiating graceful shutdown...");
        },
        () = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown...");
        },
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "wishboard=debug,tower_http=debug".into()),
        )
        .init();

    info!("Starting wishboard server...");

    let config = Config::load()?;

    let db = Arc::new(wishboard_db::init(&config).await?);
    info!("Connected to database");

    info!("Running database migrations...");
    wishboard_db::migrate(&db).await?;
    info!("Migrations completed");

    // Initialize repositories
    let user_repo = UserRepository::new(Arc::clone(&db));
    let wish_repo = WishRepository::new(Arc::clone(&db));
    let like_repo = WishLikeRepository::new(Arc::clone(&db));
    let favorite_repo = WishFavoriteRepository::new(Arc::clone(&db));
    let comment_repo = CommentRepository::new(Arc::clone(&db));

    // Initialize services
    let user_service = UserService::new(user_repo);
    let auth_service = AuthService::new(user_service.clone(), TokenService::new(&config.auth));
    let wish_service = WishService::new(wish_repo.clone(), WishListCache::new(&config.cache));
    let like_service =
        WishLikeService::new(like_repo.clone(), wish_repo.clone(), wish_service.clone());
    let favorite_service = WishFavoriteService::new(favorite_repo.clone(), wish_repo.clone());
    let comment_service = CommentService::new(comment_repo.clone(), wish_repo.clone());
    let interaction_service =
        InteractionService::new(wish_repo, like_repo, favorite_repo, comment_repo);

    match &config.bootstrap {
        Some(bootstrap) => {
            if let Some(admin) = user_service.ensure_admin(bootstrap).await? {
                info!(user_id = %admin.id, "Bootstrap admin ready");
            }
        }
        None => info!("No bootstrap admin configured"),
    }

    let state = AppState {
        auth_service,
        wish_service,
        like_service,
        favorite_service,
        comment_service,
        interaction_service,
    };

    let rate_limiter = RateLimiterState::new();

    // Periodically drop expired rate limit windows
    let cleanup_limiter = rate_limiter.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(RATE_LIMIT_CLEANUP_INTERVAL);
        loop {
            interval.tick().await;
            cleanup_limiter.cleanup().await;
        }
    });

    let app = wishboard_api::app(state, rate_limiter)
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        );

    // Start server with graceful shutdown
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    info!("Server shutdown complete");
    Ok(())
}

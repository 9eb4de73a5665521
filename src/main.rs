use axum::{
    routing::{get, post},
    Router,
};
use quizgen::{
    config::{get_config, init_config},
    database::pool::create_pool,
    middleware::{auth, cors},
    routes, AppState,
};
use std::net::SocketAddr;
use std::path::Path;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    init_config()?;
    let config = get_config();

    let pool = create_pool().await?;
    sqlx::migrate!("./migrations").run(&pool).await?;

    let app_state = AppState::new(pool);

    let open_api = Router::new()
        .route("/health", get(routes::health::health))
        .route("/api/register", post(routes::auth::register))
        .route("/api/token", post(routes::auth::token))
        .route("/api/logout", get(routes::auth::logout));

    let session_api = Router::new()
        .route("/api/generate-quiz", post(routes::quiz::generate_quiz))
        .route("/api/histories", get(routes::quiz::histories))
        .layer(axum::middleware::from_fn(auth::require_session_auth));

    let app = open_api
        .merge(session_api)
        .with_state(app_state)
        .layer(cors::credentialed_cors(&config.allowed_origins))
        .layer(TraceLayer::new_for_http());

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;

    let has_certificates =
        Path::new(&config.tls_cert_path).exists() && Path::new(&config.tls_key_path).exists();
    let use_https = config.https && has_certificates;

    if use_https {
        info!("Ready on https://{}", addr);
        let tls = axum_server::tls_rustls::RustlsConfig::from_pem_file(
            &config.tls_cert_path,
            &config.tls_key_path,
        )
        .await?;
        axum_server::bind_rustls(addr, tls)
            .serve(app.into_make_service())
            .await?;
    } else {
        info!("Ready on http://{}", addr);
        let listener = TcpListener::bind(addr).await?;
        axum::serve(listener, app).await?;
    }

    Ok(())
}

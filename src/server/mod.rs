//! HTTP API over the content store

mod auth;
mod categories;
mod error;
mod posts;
mod sitemap;

use anyhow::Result;
use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

pub use error::{ApiError, ApiResult};
pub use sitemap::render_sitemap;

use crate::config::SiteConfig;
use crate::content::FileStorage;
use crate::Blog;

/// Server state shared by every handler
pub struct AppState {
    pub store: FileStorage,
    pub config: SiteConfig,
}

/// Build the application router
///
/// Unmatched paths fall through to the static files in `public_dir`, which
/// is also where `robots.txt` and `ads.txt` are expected to live.
pub fn router(blog: &Blog, store: FileStorage) -> Router {
    let state = Arc::new(AppState {
        store,
        config: blog.config.clone(),
    });

    let admin = Router::new()
        .route(
            "/api/admin/posts",
            get(posts::list_all).post(posts::create),
        )
        .route(
            "/api/admin/posts/:id",
            put(posts::update).delete(posts::delete),
        )
        .route("/api/admin/categories", post(categories::create))
        .route(
            "/api/admin/categories/:id",
            put(categories::update).delete(categories::delete),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_admin,
        ));

    Router::new()
        .route("/api/posts", get(posts::list_published))
        .route("/api/posts/:slug", get(posts::get_by_slug))
        .route("/api/categories", get(categories::list))
        .route("/api/categories/:slug", get(categories::get_by_slug))
        .route("/api/categories/:slug/posts", get(categories::posts))
        .route("/api/admin/login", post(auth::login))
        .route("/sitemap.xml", get(sitemap::sitemap))
        .merge(admin)
        .fallback_service(ServeDir::new(&blog.public_dir))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the API server
pub async fn start(blog: &Blog, ip: &str, port: u16) -> Result<()> {
    let store = blog.open_storage().await;
    tracing::info!("Serving content from {:?}", store.content_dir());

    let app = router(blog, store);

    // Parse address - handle "localhost" specially
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    println!("Server running at http://{}:{}", ip, port);
    println!("Press Ctrl+C to stop.");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

// (C) Coralbits SL 2025
// This file is part of Techlabs Pages and is licensed under the
// GNU Affero General Public License v3.0.
// A commercial license on request is also available;
// contact info@coralbits.com for details.

pub mod api;

#[cfg(test)]
mod tests;

pub use api::*;

use std::sync::Arc;

use anyhow::Result;
use poem::middleware::Cors;
use poem::{
    listener::TcpListener,
    middleware::{NormalizePath, Tracing, TrailingSlash},
    Endpoint, EndpointExt, Route, Server,
};
use poem_openapi::OpenApiService;
use tracing::info;

use crate::config::ConfigManager;
use crate::page::PageResource;

/// Mounts the page resource under `/{namespace}` and its docs under `/docs`.
pub fn build_app(
    namespace: &str,
    config: Arc<ConfigManager>,
    resource: PageResource,
) -> impl Endpoint {
    let prefix = format!("/{}", namespace.trim_matches('/'));
    let api = Api::new(config, resource);
    let api_service =
        OpenApiService::new(api, "Techlabs Pages", env!("CARGO_PKG_VERSION")).server(prefix.clone());

    let cors = Cors::new()
        .allow_methods(vec!["GET", "OPTIONS"])
        .allow_headers(vec!["authorization", "content-type"]);
    let docs = api_service.swagger_ui();
    Route::new()
        .nest(prefix, api_service)
        .nest("/docs", docs)
        .with(Tracing)
        .with(NormalizePath::new(TrailingSlash::Trim))
        .with(cors)
}

pub async fn start(
    listen: &str,
    namespace: &str,
    config: Arc<ConfigManager>,
    resource: PageResource,
) -> Result<()> {
    let app = build_app(namespace, config, resource);

    info!("Listening on {} namespace={}", listen, namespace);
    let listener = TcpListener::bind(listen);
    Server::new(listener)
        .run_with_graceful_shutdown(
            app,
            async {
                let _ = tokio::signal::ctrl_c().await;
                info!("Shutdown signal received, stopping server...");
            },
            None,
        )
        .await?;

    Ok(())
}

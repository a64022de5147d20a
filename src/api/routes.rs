use axum::http::{header, HeaderValue, Method};
use axum::{routing::get, Router};
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer, cors::CorsLayer, services::ServeDir,
    set_header::SetResponseHeaderLayer, trace::TraceLayer,
};

#[cfg(not(test))]
use {
    crate::Error,
    axum::extract::ConnectInfo,
    std::net::{IpAddr, SocketAddr},
    std::sync::Arc,
    tower_governor::{governor::GovernorConfigBuilder, key_extractor::KeyExtractor, GovernorLayer},
};

use crate::api::handlers::{self as api_handlers, AppState};
use crate::config::Settings;
use crate::web::{self, handlers as web_handlers};
use crate::Result;

/// Create the router with all endpoints (Web UI + API)
#[cfg_attr(test, allow(unused_variables))]
pub fn create_router(state: AppState, settings: &Settings) -> Result<Router> {
    // Every route here makes one provider call per request
    #[cfg_attr(test, allow(unused_mut))]
    let mut provider_routes = Router::new()
        .route("/recipes", get(web_handlers::recipes_page))
        .route("/recipes/:id", get(web_handlers::recipe_detail))
        .route("/api/search", get(api_handlers::search_recipes))
        .route("/api/recipes/:id", get(api_handlers::get_recipe))
        .with_state(state.clone());

    // Rate limit per client IP to protect the provider quota. The peer address
    // is only known when served with connect info; otherwise all requests
    // share the localhost bucket.
    #[cfg(not(test))]
    {
        #[derive(Clone, Copy, Debug)]
        struct FallbackIpKeyExtractor;

        impl KeyExtractor for FallbackIpKeyExtractor {
            type Key = IpAddr;

            fn extract<B>(
                &self,
                req: &axum::http::Request<B>,
            ) -> std::result::Result<Self::Key, tower_governor::GovernorError> {
                if let Some(ConnectInfo(addr)) = req.extensions().get::<ConnectInfo<SocketAddr>>() {
                    return Ok(addr.ip());
                }

                Ok(IpAddr::V4(std::net::Ipv4Addr::new(127, 0, 0, 1)))
            }
        }

        let burst = u32::try_from(settings.server.rate_limit.saturating_mul(2)).unwrap_or(u32::MAX);
        let governor_conf = Arc::new(
            GovernorConfigBuilder::default()
                .key_extractor(FallbackIpKeyExtractor)
                .per_second(settings.server.rate_limit)
                .burst_size(burst)
                .finish()
                .ok_or_else(|| Error::Config("Rate limit must be non-zero".to_string()))?,
        );
        let governor_layer = GovernorLayer {
            config: governor_conf,
        };
        provider_routes = provider_routes.layer(governor_layer);
    }

    let provider_routes = provider_routes;

    let page_routes = Router::new().route("/", get(web_handlers::index));

    let health_routes = Router::new().route("/health", get(api_handlers::health_check));

    // Static file serving
    let static_routes = Router::new().nest_service("/static", ServeDir::new("src/web/static"));

    // Main router with middleware
    let router = Router::new()
        .merge(page_routes)
        .merge(provider_routes)
        .merge(health_routes)
        .merge(static_routes)
        .fallback(web::not_found)
        .layer(
            // CORS - the JSON API is public and read-only
            CorsLayer::new()
                .allow_methods([Method::GET, Method::OPTIONS])
                .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
                .allow_origin(tower_http::cors::Any)
                .max_age(Duration::from_secs(3600)),
        )
        .layer(
            // Security headers
            SetResponseHeaderLayer::if_not_present(
                header::X_CONTENT_TYPE_OPTIONS,
                HeaderValue::from_static("nosniff"),
            ),
        )
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::CONTENT_SECURITY_POLICY,
            HeaderValue::from_static(
                "default-src 'self'; style-src 'self'; img-src 'self' data: https:; object-src 'none'; base-uri 'self'; form-action 'self'",
            ),
        ))
        .layer(
            // Compression
            CompressionLayer::new(),
        )
        .layer(
            // Tracing
            TraceLayer::new_for_http(),
        );

    Ok(router)
}

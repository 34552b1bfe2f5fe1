//! Inbound API handlers.
//!
//! Five operations, one shape: resolve coordinates, build the upstream
//! URL, optionally acquire a session, issue the single upstream call,
//! relay the result. The shared tail lives in [`proxy_operation`]; the
//! handlers only differ in URL construction, session need, and error
//! body format.

use std::time::Instant;

use axum::extract::{Query, State};
use axum::response::Response;
use serde::Deserialize;
use url::Url;

use crate::http::response::{relay, session_unavailable, ErrorStyle};
use crate::http::server::AppState;
use crate::observability::metrics;
use crate::upstream::SessionOutcome;

/// Coordinates only; both optional, both defaulted.
#[derive(Debug, Deserialize)]
pub struct GeoQuery {
    lat: Option<String>,
    lng: Option<String>,
}

/// Menu lookup: restaurant id is required.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuQuery {
    res_id: String,
    lat: Option<String>,
    lng: Option<String>,
}

/// Search operations: the query string is required.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchQuery {
    search_query: String,
    lat: Option<String>,
    lng: Option<String>,
}

/// `GET /api/restaurants` — listing for a coordinate. No session.
pub async fn list_restaurants(
    State(state): State<AppState>,
    Query(query): Query<GeoQuery>,
) -> Response {
    let geo = state.resolve_geo(query.lat, query.lng);
    let url = state.endpoints.restaurant_list(&geo);
    proxy_operation(&state, "restaurants", false, url, ErrorStyle::Json).await
}

/// `GET /api/menu` — full menu for one restaurant.
pub async fn get_menu(
    State(state): State<AppState>,
    Query(query): Query<MenuQuery>,
) -> Response {
    let geo = state.resolve_geo(query.lat, query.lng);
    let url = state.endpoints.menu(&query.res_id, &geo);
    proxy_operation(&state, "menu", true, url, ErrorStyle::Text).await
}

/// `GET /api/cuisines` — landing categories shown before a search.
pub async fn list_cuisines(
    State(state): State<AppState>,
    Query(query): Query<GeoQuery>,
) -> Response {
    let geo = state.resolve_geo(query.lat, query.lng);
    let url = state.endpoints.pre_search(&geo);
    proxy_operation(&state, "cuisines", true, url, ErrorStyle::Text).await
}

/// `GET /api/search-sugggestions` — type-ahead suggestions. The route
/// spelling is a published caller contract.
pub async fn search_suggestions(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Response {
    let geo = state.resolve_geo(query.lat, query.lng);
    let url = state.endpoints.search_suggest(&query.search_query, &geo);
    proxy_operation(&state, "search_suggestions", true, url, ErrorStyle::Text).await
}

/// `GET /api/search-results` — full search.
pub async fn search_results(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Response {
    let geo = state.resolve_geo(query.lat, query.lng);
    let url = state.endpoints.search_results(&query.search_query, &geo);
    proxy_operation(&state, "search_results", true, url, ErrorStyle::Text).await
}

/// Shared tail of every operation: [optional session] → single upstream
/// call → relay or map error. No retries at this level.
async fn proxy_operation(
    state: &AppState,
    operation: &'static str,
    needs_session: bool,
    url: Url,
    style: ErrorStyle,
) -> Response {
    let start = Instant::now();
    tracing::debug!(operation, url = %url, "Proxying request");

    let session = if needs_session {
        match state.sessions.acquire().await {
            SessionOutcome::Acquired(session) => Some(session),
            SessionOutcome::Unavailable => {
                tracing::error!(operation, "Upstream session unavailable");
                let response = session_unavailable();
                metrics::record_request(operation, response.status().as_u16(), start);
                return response;
            }
        }
    } else {
        None
    };

    let outcome = state.upstream.fetch(url, session.as_ref()).await;
    let response = relay(outcome, style, operation);
    metrics::record_request(operation, response.status().as_u16(), start);
    response
}

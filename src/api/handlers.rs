use axum::{
    extract::{Path, Query, State},
    Json,
};
use tracing::debug;

use crate::{
    api::models::*,
    provider::{RecipeClient, RecipeDetail},
    search::{pagination, SearchFilters, SearchParams, PAGE_SIZE},
    Result,
};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub client: RecipeClient,
    pub settings: crate::config::Settings,
}

/// GET /api/search - Search recipes
pub async fn search_recipes(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchResponse>> {
    let filters = SearchFilters::from(params);
    debug!("Search request: {:?}", filters);

    let page = state.client.search(&filters).await?;
    let total_pages = pagination::compute_page_count(page.total_results, PAGE_SIZE);

    Ok(Json(SearchResponse {
        total_results: page.total_results,
        offset: page.offset,
        number: page.page_size,
        results: page.items,
        pagination: Pagination {
            page: filters.page,
            total_pages,
            entries: pagination::build_pagination_entries(filters.page, total_pages),
        },
    }))
}

/// GET /api/recipes/:id - Get recipe details
pub async fn get_recipe(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<RecipeDetail>> {
    debug!("Get recipe request: {}", id);

    let recipe = state.client.get_details(&id).await?;
    Ok(Json(recipe))
}

/// GET /health - Health check endpoint
pub async fn health_check() -> Result<Json<HealthResponse>> {
    Ok(Json(HealthResponse {
        status: "ok".to_string(),
    }))
}

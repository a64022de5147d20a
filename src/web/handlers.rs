use askama::Template;
use axum::{
    extract::{Path, Query, State},
    http::header,
    response::{Html, IntoResponse, Redirect, Response},
};
use tracing::{debug, info};

use super::{render, PageResult};
use crate::{
    api::handlers::AppState,
    provider::{Ingredient, RecipeDetail, RecipeSummary, ResultsPage, WinePairing},
    search::{
        pagination::{self, PaginationEntry},
        Cuisine, SearchFilters, SearchParams, PAGE_SIZE,
    },
    utils::text,
};
use url::Url;

/// Where ingredient image names are resolved
pub const INGREDIENT_IMAGE_BASE: &str = "https://spoonacular.com/cdn/ingredients_100x100/";

/// Search form template
#[derive(Template)]
#[template(path = "search.html")]
struct SearchTemplate {
    cuisines: Vec<&'static str>,
}

/// GET / - Search form
pub async fn index() -> PageResult<impl IntoResponse> {
    let template = SearchTemplate {
        cuisines: Cuisine::ALL.iter().map(Cuisine::as_str).collect(),
    };
    Ok(Html(render(&template)?))
}

/// Results listing template
#[derive(Template)]
#[template(path = "recipes.html")]
struct RecipesTemplate {
    tags: Vec<FilterTag>,
    total: u32,
    show_range: bool,
    range_start: u32,
    range_end: u32,
    results: Vec<RecipeCardData>,
    pager: Option<PagerData>,
}

#[derive(Clone)]
struct FilterTag {
    label: &'static str,
    value: String,
}

#[derive(Clone)]
struct RecipeCardData {
    id: u64,
    title: String,
    image_url: String,
    ready_in_minutes: String,
}

impl From<RecipeSummary> for RecipeCardData {
    fn from(recipe: RecipeSummary) -> Self {
        Self {
            id: recipe.id,
            title: recipe.title,
            image_url: recipe.image_ref,
            ready_in_minutes: recipe
                .ready_in_minutes
                .map(|m| m.to_string())
                .unwrap_or_default(),
        }
    }
}

#[derive(Clone)]
struct PagerData {
    current: u32,
    total_pages: u32,
    previous_url: String,
    next_url: String,
    links: Vec<PageLink>,
}

#[derive(Clone)]
struct PageLink {
    label: String,
    url: String,
    current: bool,
    ellipsis: bool,
}

impl PagerData {
    fn new(filters: &SearchFilters, total_pages: u32) -> Self {
        let current = filters.page;
        let links = pagination::build_pagination_entries(current, total_pages)
            .into_iter()
            .map(|entry| match entry {
                PaginationEntry::Page(page) => PageLink {
                    label: entry.to_string(),
                    url: pagination::build_page_url(page, filters),
                    current: page == current,
                    ellipsis: false,
                },
                PaginationEntry::Ellipsis => PageLink {
                    label: entry.to_string(),
                    url: String::new(),
                    current: false,
                    ellipsis: true,
                },
            })
            .collect();

        Self {
            current,
            total_pages,
            previous_url: pagination::previous_page_url(current, filters).unwrap_or_default(),
            next_url: pagination::next_page_url(current, total_pages, filters).unwrap_or_default(),
            links,
        }
    }
}

/// One tag per filter that is sent to the provider
fn filter_tags(filters: &SearchFilters) -> Vec<FilterTag> {
    filters
        .filter_pairs()
        .into_iter()
        .filter_map(|(key, value)| match key {
            "query" => Some(FilterTag {
                label: "Search",
                value,
            }),
            "cuisine" => Some(FilterTag {
                label: "Cuisine",
                value,
            }),
            "maxReadyTime" => Some(FilterTag {
                label: "Max Prep Time",
                value: format!("{value} min"),
            }),
            _ => None,
        })
        .collect()
}

fn results_template(filters: &SearchFilters, page: ResultsPage) -> RecipesTemplate {
    let returned = page.items.len() as u32;
    let (range_start, range_end) =
        pagination::compute_display_range(page.offset, returned, page.total_results);
    let total_pages = pagination::compute_page_count(page.total_results, PAGE_SIZE);

    let pager = (!page.is_empty() && total_pages > 1).then(|| PagerData::new(filters, total_pages));

    RecipesTemplate {
        tags: filter_tags(filters),
        total: page.total_results,
        show_range: page.total_results > returned,
        range_start,
        range_end,
        results: page.items.into_iter().map(RecipeCardData::from).collect(),
        pager,
    }
}

/// GET /recipes - Search results
///
/// A submission with no filter set goes back to the search form without
/// calling the provider.
pub async fn recipes_page(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> PageResult<Response> {
    let filters = SearchFilters::from(params);
    debug!("Results page request: {:?}", filters);

    if filters.is_empty() {
        return Ok(Redirect::to("/").into_response());
    }

    let page = state.client.search(&filters).await?;
    info!(
        "Search returned {} of {} recipes (page {})",
        page.items.len(),
        page.total_results,
        filters.page
    );

    let template = results_template(&filters, page);
    let cache_control = format!(
        "public, max-age={}",
        state.settings.server.search_freshness_seconds
    );

    Ok((
        [(header::CACHE_CONTROL, cache_control)],
        Html(render(&template)?),
    )
        .into_response())
}

/// Recipe detail page template
#[derive(Template)]
#[template(path = "recipe.html")]
struct RecipeTemplate {
    recipe: RecipeData,
}

#[derive(Clone)]
pub struct RecipeData {
    pub id: u64,
    pub title: String,
    pub image_url: String,
    pub dish_types: Vec<String>,
    pub diets: Vec<String>,
    pub ready_in_minutes: u32,
    pub servings: u32,
    pub health_score: String,
    pub source_url: String,
    pub source_name: String,
    pub summary: String,
    pub ingredients: Vec<IngredientData>,
    pub steps: Vec<String>,
    pub wine: Option<WineData>,
}

#[derive(Clone)]
pub struct IngredientData {
    pub name: String,
    pub original: String,
    pub amount: String,
    pub unit: String,
    pub image_url: String,
}

#[derive(Clone)]
pub struct WineData {
    pub pairing_text: String,
    pub product: Option<WineProductData>,
}

#[derive(Clone)]
pub struct WineProductData {
    pub title: String,
    pub price: String,
    pub description: String,
    pub image_url: String,
}

impl From<&Ingredient> for IngredientData {
    fn from(ingredient: &Ingredient) -> Self {
        Self {
            name: ingredient.name.clone(),
            original: ingredient.original_text.clone(),
            amount: format_amount(ingredient.amount),
            unit: ingredient.unit.clone(),
            image_url: ingredient_image_url(&ingredient.image_ref),
        }
    }
}

impl From<&WinePairing> for WineData {
    fn from(pairing: &WinePairing) -> Self {
        Self {
            pairing_text: pairing.pairing_text.clone(),
            product: pairing.product_matches.first().map(|p| WineProductData {
                title: p.title.clone(),
                price: p.price.clone(),
                description: p.description.clone(),
                image_url: p.image_url.clone(),
            }),
        }
    }
}

impl From<&RecipeDetail> for RecipeData {
    fn from(recipe: &RecipeDetail) -> Self {
        Self {
            id: recipe.id,
            title: recipe.title.clone(),
            image_url: recipe.image_ref.clone(),
            dish_types: recipe
                .dish_types
                .iter()
                .take(3)
                .map(|t| text::title_case(t))
                .collect(),
            diets: recipe
                .diets
                .iter()
                .take(2)
                .map(|d| text::title_case(d))
                .collect(),
            ready_in_minutes: recipe.ready_in_minutes,
            servings: recipe.servings,
            health_score: format_amount(recipe.health_score),
            source_url: recipe.source_url.clone(),
            source_name: recipe.source_name.clone(),
            summary: text::strip_markup(&recipe.summary_html),
            ingredients: recipe.ingredients.iter().map(IngredientData::from).collect(),
            steps: text::split_instructions(&recipe.instructions_raw),
            wine: recipe.displayable_wine_pairing().map(WineData::from),
        }
    }
}

/// Ingredient image names are relative to the CDN; absolute URLs pass through
fn ingredient_image_url(image_ref: &str) -> String {
    if image_ref.is_empty() {
        return String::new();
    }
    Url::parse(INGREDIENT_IMAGE_BASE)
        .and_then(|base| base.join(image_ref))
        .map(String::from)
        .unwrap_or_default()
}

/// Whole numbers without a trailing ".0"
fn format_amount(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", (value * 100.0).round() / 100.0)
    }
}

/// GET /recipes/:id - Recipe detail page
pub async fn recipe_detail(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> PageResult<impl IntoResponse> {
    debug!("Recipe detail request: {}", id);

    let recipe = state.client.get_details(&id).await?;

    let template = RecipeTemplate {
        recipe: RecipeData::from(&recipe),
    };

    Ok(Html(render(&template)?))
}

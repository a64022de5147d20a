use serde::Serialize;

use crate::provider::RecipeSummary;
use crate::search::pagination::PaginationEntry;

/// Search response: the provider page plus pagination metadata
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    pub results: Vec<RecipeSummary>,
    pub total_results: u32,
    pub offset: u32,
    pub number: u32,
    pub pagination: Pagination,
}

/// Pagination metadata
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: u32,
    pub total_pages: u32,
    pub entries: Vec<PaginationEntry>,
}

/// Health check response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
}

//! Search filters and their query-string encoding.
//!
//! The same filters are encoded two ways: for the provider call (with
//! `offset` and `number`) and for links back into the results page (with
//! `page`). Empty filters are omitted from both.

pub mod pagination;

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use url::form_urlencoded;

/// Fixed number of recipes per results page
pub const PAGE_SIZE: u32 = 9;

/// Cuisines offered by the search form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
pub enum Cuisine {
    Italian,
    Mexican,
    Chinese,
    Indian,
    Thai,
    Japanese,
    Mediterranean,
}

impl Cuisine {
    pub const ALL: [Cuisine; 7] = [
        Cuisine::Italian,
        Cuisine::Mexican,
        Cuisine::Chinese,
        Cuisine::Indian,
        Cuisine::Thai,
        Cuisine::Japanese,
        Cuisine::Mediterranean,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Cuisine::Italian => "Italian",
            Cuisine::Mexican => "Mexican",
            Cuisine::Chinese => "Chinese",
            Cuisine::Indian => "Indian",
            Cuisine::Thai => "Thai",
            Cuisine::Japanese => "Japanese",
            Cuisine::Mediterranean => "Mediterranean",
        }
    }
}

impl fmt::Display for Cuisine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// User supplied search constraints for one request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchFilters {
    pub query: Option<String>,
    pub cuisine: Option<String>,
    /// Raw form value; the provider rejects anything malformed
    pub max_ready_time: Option<String>,
    pub page: u32,
}

impl Default for SearchFilters {
    fn default() -> Self {
        Self {
            query: None,
            cuisine: None,
            max_ready_time: None,
            page: 1,
        }
    }
}

/// Where an encoded query string is going to be used
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryTarget {
    /// Remote search call: filters plus `offset` and `number`
    Provider,
    /// Results page link: filters plus `page`
    Link,
}

impl SearchFilters {
    /// Zero-based index of the first result on the current page
    pub fn offset(&self) -> u32 {
        self.page.max(1).saturating_sub(1).saturating_mul(PAGE_SIZE)
    }

    /// Copy of these filters pointing at another page
    pub fn with_page(&self, page: u32) -> Self {
        Self {
            page: page.max(1),
            ..self.clone()
        }
    }

    /// True when no filter is set
    pub fn is_empty(&self) -> bool {
        self.filter_pairs().is_empty()
    }

    /// Present filters in canonical order: query, cuisine, maxReadyTime
    pub fn filter_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();

        if let Some(query) = non_empty(&self.query) {
            pairs.push(("query", query.to_string()));
        }
        if let Some(cuisine) = non_empty(&self.cuisine) {
            pairs.push(("cuisine", cuisine.to_string()));
        }
        if let Some(max_ready_time) = non_empty(&self.max_ready_time) {
            pairs.push(("maxReadyTime", max_ready_time.to_string()));
        }

        pairs
    }

    /// Filters plus the paging parameters for `target`
    pub fn query_pairs(&self, target: QueryTarget) -> Vec<(&'static str, String)> {
        let mut pairs = self.filter_pairs();

        match target {
            QueryTarget::Provider => {
                pairs.push(("offset", self.offset().to_string()));
                pairs.push(("number", PAGE_SIZE.to_string()));
            }
            QueryTarget::Link => {
                pairs.push(("page", self.page.max(1).to_string()));
            }
        }

        pairs
    }

    /// Form-urlencoded query string for `target`
    pub fn to_query_string(&self, target: QueryTarget) -> String {
        encode_pairs(&self.query_pairs(target))
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

/// Encode pairs with `application/x-www-form-urlencoded` rules
pub fn encode_pairs(pairs: &[(&str, String)]) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for (key, value) in pairs {
        serializer.append_pair(key, value);
    }
    serializer.finish()
}

/// Results page parameters as they arrive in the URL
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchParams {
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub query: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub cuisine: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub max_ready_time: Option<String>,
    #[serde(default = "default_page", deserialize_with = "deserialize_page")]
    pub page: u32,
}

fn default_page() -> u32 {
    1
}

impl From<SearchParams> for SearchFilters {
    fn from(params: SearchParams) -> Self {
        Self {
            query: params.query,
            cuisine: params.cuisine,
            max_ready_time: params.max_ready_time,
            page: params.page.max(1),
        }
    }
}

/// Deserialize optional string, treating empty strings as None
fn deserialize_optional_string<'de, D>(
    deserializer: D,
) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    match opt.as_deref() {
        None | Some("") => Ok(None),
        Some(s) => Ok(Some(s.to_string())),
    }
}

/// Deserialize a page number; anything that is not a positive integer becomes 1
fn deserialize_page<'de, D>(deserializer: D) -> std::result::Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt
        .and_then(|s| s.trim().parse::<u32>().ok())
        .filter(|page| *page >= 1)
        .unwrap_or(1))
}

use crate::config::ProviderConfig;
use crate::provider::models::{RecipeDetail, ResultsPage};
use crate::search::{QueryTarget, SearchFilters};
use crate::{Error, Result};
use reqwest::{header, Client};
use tracing::{debug, error};
use url::Url;

/// Operation name reported when a search call fails
pub const SEARCH_OPERATION: &str = "fetchRecipes";

/// Operation name reported when a detail call fails
pub const DETAILS_OPERATION: &str = "fetchRecipeDetails";

/// Recipe provider API client
#[derive(Clone)]
pub struct RecipeClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl RecipeClient {
    /// Create a new provider client
    pub fn new(config: &ProviderConfig) -> Result<Self> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/json"),
        );

        // No request timeout: provider calls run until the network gives up
        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .default_headers(headers)
            .build()
            .map_err(|e| Error::Internal(format!("Failed to create HTTP client: {e}")))?;

        // Reject unusable base URLs up front rather than on the first request
        Url::parse(&config.base_url)?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        })
    }

    /// Run one page of a recipe search
    pub async fn search(&self, filters: &SearchFilters) -> Result<ResultsPage> {
        let params = filters.query_pairs(QueryTarget::Provider);
        self.get(SEARCH_OPERATION, "/recipes/complexSearch", &params)
            .await
    }

    /// Fetch the full information for one recipe
    pub async fn get_details(&self, id: &str) -> Result<RecipeDetail> {
        let path = format!("/recipes/{}/information", urlencoding::encode(id));
        self.get(DETAILS_OPERATION, &path, &[]).await
    }

    /// Make a GET request to the provider
    async fn get<T>(
        &self,
        operation: &'static str,
        path: &str,
        params: &[(&'static str, String)],
    ) -> Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        let url = self.request_url(path, params)?;
        debug!("Provider request: GET {} ({})", path, operation);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| Error::fetch(operation, e.without_url().to_string()))?;

        let status = response.status();

        if !status.is_success() {
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read error response".to_string());
            error!("Provider error on {}: {} - {}", operation, status, error_body);

            return Err(Error::fetch(operation, format!("HTTP {status}")));
        }

        response.json::<T>().await.map_err(|e| {
            Error::fetch(
                operation,
                format!("Invalid response body: {}", e.without_url()),
            )
        })
    }

    /// Full request URL; the credential is always the last parameter
    fn request_url(&self, path: &str, params: &[(&'static str, String)]) -> Result<Url> {
        let mut url = Url::parse(&format!("{}{}", self.base_url, path))?;
        url.query_pairs_mut()
            .extend_pairs(params.iter().map(|(k, v)| (*k, v.as_str())))
            .append_pair("apiKey", &self.api_key);
        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base_url: &str) -> RecipeClient {
        RecipeClient::new(&ProviderConfig::new(base_url, "test-key")).unwrap()
    }

    #[test]
    fn test_client_creation() {
        assert!(RecipeClient::new(&ProviderConfig::new("https://api.spoonacular.com", "k")).is_ok());
        assert!(RecipeClient::new(&ProviderConfig::new("not a url", "k")).is_err());
    }

    #[test]
    fn test_search_url_puts_api_key_last() {
        let filters = SearchFilters {
            query: Some("pasta".to_string()),
            page: 2,
            ..SearchFilters::default()
        };
        let url = client("https://api.example.com/")
            .request_url(
                "/recipes/complexSearch",
                &filters.query_pairs(QueryTarget::Provider),
            )
            .unwrap();

        assert_eq!(
            url.as_str(),
            "https://api.example.com/recipes/complexSearch?query=pasta&offset=9&number=9&apiKey=test-key"
        );
    }

    #[test]
    fn test_detail_url_keeps_base_path() {
        let url = client("http://localhost:8080/spoonacular")
            .request_url("/recipes/716429/information", &[])
            .unwrap();

        assert_eq!(
            url.as_str(),
            "http://localhost:8080/spoonacular/recipes/716429/information?apiKey=test-key"
        );
    }
}

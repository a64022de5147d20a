use serde::{Deserialize, Deserializer, Serialize};

/// Decode `null` the same as a missing field
fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// One page of search results, as returned by the provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultsPage {
    #[serde(rename = "results", default, deserialize_with = "null_as_default")]
    pub items: Vec<RecipeSummary>,
    #[serde(default)]
    pub total_results: u32,
    #[serde(default)]
    pub offset: u32,
    #[serde(rename = "number", default)]
    pub page_size: u32,
}

impl ResultsPage {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Search result card
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeSummary {
    pub id: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(rename = "image", default, deserialize_with = "null_as_default")]
    pub image_ref: String,
    #[serde(default)]
    pub ready_in_minutes: Option<u32>,
}

/// Full recipe information
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeDetail {
    pub id: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(rename = "image", default, deserialize_with = "null_as_default")]
    pub image_ref: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub servings: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub ready_in_minutes: u32,
    #[serde(rename = "summary", default, deserialize_with = "null_as_default")]
    pub summary_html: String,
    #[serde(rename = "instructions", default, deserialize_with = "null_as_default")]
    pub instructions_raw: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub source_url: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub source_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub health_score: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub dish_types: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub diets: Vec<String>,
    #[serde(
        rename = "extendedIngredients",
        default,
        deserialize_with = "null_as_default"
    )]
    pub ingredients: Vec<Ingredient>,
    #[serde(default)]
    pub wine_pairing: Option<WinePairing>,
}

impl RecipeDetail {
    /// Wine pairing worth showing: one with non-empty pairing text
    pub fn displayable_wine_pairing(&self) -> Option<&WinePairing> {
        self.wine_pairing
            .as_ref()
            .filter(|pairing| !pairing.pairing_text.trim().is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ingredient {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(rename = "original", default, deserialize_with = "null_as_default")]
    pub original_text: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub amount: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub unit: String,
    #[serde(rename = "image", default, deserialize_with = "null_as_default")]
    pub image_ref: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WinePairing {
    #[serde(default, deserialize_with = "null_as_default")]
    pub paired_wines: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub pairing_text: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub product_matches: Vec<ProductMatch>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductMatch {
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub price: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub image_url: String,
}

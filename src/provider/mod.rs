// Remote recipe provider: typed models and the HTTP client

pub mod client;
pub mod models;

pub use client::RecipeClient;
pub use models::{Ingredient, ProductMatch, RecipeDetail, RecipeSummary, ResultsPage, WinePairing};

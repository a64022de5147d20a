use crate::provider::{RecipeClient, RecipeDetail, ResultsPage};
use crate::search::{pagination, Cuisine, SearchFilters, PAGE_SIZE};
use crate::utils::text;
use crate::Result;

/// Search for recipes and print one page of results
pub async fn search(
    client: &RecipeClient,
    query: Option<String>,
    cuisine: Option<Cuisine>,
    max_time: Option<u32>,
    page: u32,
) -> Result<()> {
    let filters = SearchFilters {
        query: query.filter(|q| !q.is_empty()),
        cuisine: cuisine.map(|c| c.as_str().to_string()),
        max_ready_time: max_time.map(|m| m.to_string()),
        page: page.max(1),
    };

    let results = client.search(&filters).await?;
    print!("{}", format_results(&filters, &results));

    Ok(())
}

/// Fetch one recipe and print it
pub async fn show(client: &RecipeClient, id: &str) -> Result<()> {
    let recipe = client.get_details(id).await?;
    print!("{}", format_recipe(&recipe));

    Ok(())
}

fn format_results(filters: &SearchFilters, results: &ResultsPage) -> String {
    let mut out = String::new();

    if results.is_empty() {
        out.push_str("No recipes found. Try adjusting your search criteria.\n");
        return out;
    }

    let returned = results.items.len() as u32;
    out.push_str(&format!("Found {} recipes", results.total_results));
    if results.total_results > returned {
        let (start, end) =
            pagination::compute_display_range(results.offset, returned, results.total_results);
        out.push_str(&format!(
            " (showing {start}-{end} of {})",
            results.total_results
        ));
    }
    out.push_str("\n\n");

    for recipe in &results.items {
        match recipe.ready_in_minutes {
            Some(minutes) => out.push_str(&format!(
                "  [{}] {} ({minutes} min)\n",
                recipe.id, recipe.title
            )),
            None => out.push_str(&format!("  [{}] {}\n", recipe.id, recipe.title)),
        }
    }

    let total_pages = pagination::compute_page_count(results.total_results, PAGE_SIZE);
    if total_pages > 1 {
        let pages: Vec<String> = pagination::build_pagination_entries(filters.page, total_pages)
            .into_iter()
            .map(|entry| match entry {
                pagination::PaginationEntry::Page(page) if page == filters.page => {
                    format!("[{page}]")
                }
                other => other.to_string(),
            })
            .collect();
        out.push_str(&format!("\nPages: {}\n", pages.join(" ")));
    }

    out
}

fn format_recipe(recipe: &RecipeDetail) -> String {
    let mut out = String::new();

    out.push_str(&format!("{}\n", recipe.title));
    out.push_str(&format!(
        "  Prep time: {} min | Servings: {} | Health score: {}/100\n",
        recipe.ready_in_minutes, recipe.servings, recipe.health_score
    ));
    if !recipe.source_url.is_empty() {
        out.push_str(&format!("  Source: {} <{}>\n", recipe.source_name, recipe.source_url));
    }

    let summary = text::strip_markup(&recipe.summary_html);
    if !summary.is_empty() {
        out.push_str(&format!("\n{summary}\n"));
    }

    out.push_str("\nIngredients:\n");
    for ingredient in &recipe.ingredients {
        out.push_str(&format!("  - {}\n", ingredient.original_text));
    }

    out.push_str("\nInstructions:\n");
    let steps = text::split_instructions(&recipe.instructions_raw);
    if steps.is_empty() {
        out.push_str("  No detailed instructions available. Check the source website.\n");
    }
    for (i, step) in steps.iter().enumerate() {
        out.push_str(&format!("  {}. {step}\n", i + 1));
    }

    if let Some(pairing) = recipe.displayable_wine_pairing() {
        out.push_str(&format!("\nWine pairing: {}\n", pairing.pairing_text));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::RecipeSummary;

    #[test]
    fn test_format_results() {
        let filters = SearchFilters {
            query: Some("soup".to_string()),
            page: 5,
            ..SearchFilters::default()
        };
        let results = ResultsPage {
            items: vec![RecipeSummary {
                id: 11,
                title: "Tomato Soup".to_string(),
                image_ref: String::new(),
                ready_in_minutes: Some(25),
            }],
            total_results: 90,
            offset: 36,
            page_size: 9,
        };

        let out = format_results(&filters, &results);
        assert!(out.starts_with("Found 90 recipes (showing 37-37 of 90)"));
        assert!(out.contains("[11] Tomato Soup (25 min)"));
        assert!(out.contains("Pages: 1 … 4 [5] 6 … 10"));
    }

    #[test]
    fn test_format_empty_results() {
        let results = ResultsPage {
            items: vec![],
            total_results: 0,
            offset: 0,
            page_size: 9,
        };
        let out = format_results(&SearchFilters::default(), &results);
        assert!(out.starts_with("No recipes found"));
    }
}

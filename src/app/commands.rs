use crate::config::cli::Command;
use crate::domain::model::{PriceRange, ProductId, RecommendationRequest};
use crate::domain::ports::CatalogApi;
use crate::ui::render;
use crate::utils::error::Result;
use crate::utils::validation::{validate_non_empty_string, validate_price_bounds};

/// Runs a one-shot subcommand and returns the rendered output.
/// `Command::Shell` is interactive and handled by the console instead.
pub async fn run_command<A: CatalogApi>(api: &A, command: &Command) -> Result<String> {
    match command {
        Command::Shell => Ok(String::new()),
        Command::Products => {
            let products = api.get_all_products().await?;
            Ok(render::product_list(Some(products.as_slice()), false))
        }
        Command::Product { id } => {
            validate_non_empty_string("id", id)?;
            let id: ProductId = id.trim().parse().unwrap_or_else(|e| match e {});
            let product = api.get_product_by_id(&id).await?;
            Ok(render::product_card(&product, None, None))
        }
        Command::Category { name } => {
            validate_non_empty_string("category", name)?;
            let products = api.get_products_by_category(name.trim()).await?;
            Ok(render::product_list(Some(products.as_slice()), false))
        }
        Command::Categories => {
            let categories = api.get_categories().await?;
            Ok(render::categories(&categories))
        }
        Command::Search { query } => {
            let query = query.join(" ");
            validate_non_empty_string("query", &query)?;
            let products = api.search_products(query.trim()).await?;
            if products.is_empty() {
                return Ok(format!("No products matched \"{}\"\n", query.trim()));
            }
            Ok(render::product_list(Some(products.as_slice()), false))
        }
        Command::Recommend {
            query,
            category,
            min_price,
            max_price,
        } => {
            let query = query.join(" ");
            validate_non_empty_string("query", &query)?;
            validate_price_bounds(*min_price, *max_price)?;

            let request = RecommendationRequest::new(query.trim())
                .with_category(category.clone())
                .with_price_range(PriceRange::new(*min_price, *max_price));
            let response = api.get_recommendations(&request).await?;
            Ok(render::recommendation_display(Some(&response), query.trim()))
        }
        Command::History => {
            let entries = api.get_recommendation_history().await?;
            Ok(render::history(&entries))
        }
        Command::Health => {
            let status = api.check_health().await?;
            Ok(render::health(&status))
        }
    }
}

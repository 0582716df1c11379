use crate::domain::model::{HealthStatus, HistoryEntry, Product, RecommendationResponse};
use chrono::{DateTime, NaiveDateTime};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt::Write;

pub const TITLE: &str = "🛍️  AI Product Recommendation System";
pub const TAGLINE: &str = "Find the perfect products using AI-powered recommendations";
pub const FOOTER: &str = "Powered by AI recommendations | Built with Rust";

pub const EXAMPLE_QUERIES: [&str; 5] = [
    "I want a phone under $500",
    "Show me premium headphones",
    "I need a laptop for work",
    "Looking for running shoes",
    "Kitchen appliances under $400",
];

const MAX_SPECIFICATIONS: usize = 3;
const RULE: &str = "────────────────────────────────────────────────────────────";

/// Groups products by category. Categories keep the order they first appear in,
/// products keep their order within a category.
pub fn group_by_category(products: &[Product]) -> Vec<(&str, Vec<&Product>)> {
    let mut positions: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<(&str, Vec<&Product>)> = Vec::new();

    for product in products {
        let category = product.category.as_str();
        match positions.get(category) {
            Some(&index) => groups[index].1.push(product),
            None => {
                positions.insert(category, groups.len());
                groups.push((category, vec![product]));
            }
        }
    }

    groups
}

/// US-dollar formatting with thousands separators, e.g. `$1,299.99`.
pub fn format_price(price: f64) -> String {
    let total_cents = (price.abs() * 100.0).round() as u64;
    let dollars = (total_cents / 100).to_string();
    let cents = total_cents % 100;

    let mut grouped = String::with_capacity(dollars.len() + dollars.len() / 3);
    for (i, digit) in dollars.chars().enumerate() {
        if i > 0 && (dollars.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if price < 0.0 && total_cents > 0 { "-" } else { "" };
    format!("{}${}.{:02}", sign, grouped, cents)
}

pub fn star_rating(rating: f64) -> String {
    if !rating.is_finite() || rating <= 0.0 {
        return "☆".repeat(5);
    }

    let full = rating.floor() as usize;
    let half = rating.fract() != 0.0;
    let empty = 5usize.saturating_sub(rating.ceil() as usize);

    let mut stars = "★".repeat(full);
    if half {
        stars.push('½');
    }
    stars.push_str(&"☆".repeat(empty));
    stars
}

fn spec_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// One product. `reasoning` is the recommendation view's justification text;
/// the relevance badge only shows for a non-zero score.
pub fn product_card(product: &Product, reasoning: Option<&str>, relevance_score: Option<f64>) -> String {
    let mut out = String::new();

    if let Some(score) = relevance_score.filter(|s| *s != 0.0 && !s.is_nan()) {
        let _ = writeln!(out, "  [{}% match]", (score * 100.0).round() as i64);
    }

    let _ = writeln!(out, "  {}  ({})", product.name, product.category);
    if !product.description.is_empty() {
        let _ = writeln!(out, "    {}", product.description);
    }
    let _ = writeln!(
        out,
        "    {} | {} ({}) | {}",
        product.brand,
        star_rating(product.rating),
        product.rating,
        format_price(product.price)
    );
    match product.image_url.as_deref().filter(|url| !url.is_empty()) {
        Some(url) => {
            let _ = writeln!(out, "    Image: {}", url);
        }
        None => {
            let _ = writeln!(out, "    Image: [{}]", product.name);
        }
    }

    if !product.specifications.is_empty() {
        let _ = writeln!(out, "    Specifications:");
        for (key, value) in product.specifications.iter().take(MAX_SPECIFICATIONS) {
            let _ = writeln!(out, "      - {}: {}", key.replace('_', " "), spec_value(value));
        }
    }

    if let Some(reasoning) = reasoning.filter(|r| !r.is_empty()) {
        let _ = writeln!(out, "    🤖 Why this is recommended:");
        let _ = writeln!(out, "      {}", reasoning);
    }

    out
}

/// Catalog view. `None` means the backend sent something that is not a product list.
pub fn product_list(products: Option<&[Product]>, loading: bool) -> String {
    if loading {
        return "Loading products...\n".to_string();
    }

    let Some(products) = products else {
        return "Unable to load products (invalid data format)\n".to_string();
    };

    if products.is_empty() {
        return "No products available\n".to_string();
    }

    let mut out = String::new();
    for (category, items) in group_by_category(products) {
        let _ = writeln!(out, "== {} ==", category);
        for product in items {
            out.push_str(&product_card(product, None, None));
            out.push('\n');
        }
    }
    out
}

pub fn recommendation_display(response: Option<&RecommendationResponse>, search_query: &str) -> String {
    let Some(recs) = response.and_then(|r| r.recommendations.as_ref()) else {
        return "No recommendations available\n".to_string();
    };

    let mut out = String::new();
    let _ = writeln!(out, "🤖 AI Recommendations");
    let _ = writeln!(out, "For: \"{}\"", search_query);
    out.push('\n');

    if let Some(summary) = response
        .and_then(|r| r.summary.as_deref())
        .filter(|s| !s.is_empty())
    {
        let _ = writeln!(out, "🧠 AI Analysis:");
        let _ = writeln!(out, "{}", summary);
        out.push('\n');
    }

    if recs.is_empty() {
        let _ = writeln!(out, "No matching products found for your query.");
        out.push('\n');
    } else {
        for rec in recs {
            out.push_str(&product_card(
                &rec.product,
                Some(rec.reasoning.as_str()),
                rec.relevance_score,
            ));
            out.push('\n');
        }
    }

    let noun = if recs.len() == 1 {
        "recommendation"
    } else {
        "recommendations"
    };
    let _ = writeln!(
        out,
        "Found {} {} based on your search criteria",
        recs.len(),
        noun
    );
    out
}

pub fn search_hints(has_recommendations: bool, loading: bool) -> String {
    if loading {
        return "Searching...\n".to_string();
    }

    let mut out = String::new();
    if has_recommendations {
        let _ = writeln!(out, "Type a new query, or :clear to go back to all products.");
        return out;
    }

    let _ = writeln!(
        out,
        "Describe what you're looking for... (e.g., 'I want a phone under $500')"
    );
    let _ = writeln!(out, "Try these examples:");
    for (i, example) in EXAMPLE_QUERIES.iter().enumerate() {
        let _ = writeln!(out, "  :{}  {}", i + 1, example);
    }
    out
}

pub fn error_banner(message: &str) -> String {
    format!("⚠️  {}  (:dismiss to hide)\n", message)
}

pub fn header() -> String {
    format!("{}\n{}\n{}\n", TITLE, TAGLINE, RULE)
}

pub fn footer() -> String {
    format!("{}\n{}\n", RULE, FOOTER)
}

pub fn categories(categories: &[String]) -> String {
    if categories.is_empty() {
        return "No categories available\n".to_string();
    }
    let mut out = String::new();
    for category in categories {
        let _ = writeln!(out, "- {}", category);
    }
    out
}

fn format_timestamp(raw: &str) -> String {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return ts.format("%Y-%m-%d %H:%M").to_string();
    }
    // SQLite CURRENT_TIMESTAMP style
    if let Ok(ts) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        return ts.format("%Y-%m-%d %H:%M").to_string();
    }
    raw.to_string()
}

pub fn history(entries: &[HistoryEntry]) -> String {
    if entries.is_empty() {
        return "No recommendation history yet\n".to_string();
    }

    let mut out = String::new();
    for entry in entries {
        let when = entry
            .created_at
            .as_deref()
            .map(format_timestamp)
            .unwrap_or_else(|| "-".to_string());
        let _ = write!(out, "{:<16}  \"{}\"", when, entry.query);
        if let Some(category) = entry.category.as_deref().filter(|c| !c.is_empty()) {
            let _ = write!(out, "  [{}]", category);
        }
        out.push('\n');
    }
    out
}

pub fn health(status: &HealthStatus) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Backend status: {}", status.status);
    for (key, value) in &status.details {
        let _ = writeln!(out, "  {}: {}", key, spec_value(value));
    }
    out
}

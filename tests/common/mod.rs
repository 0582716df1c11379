#![allow(dead_code)]

use httpmock::prelude::*;
use serde_json::{json, Value};

pub fn product(id: i64, name: &str, category: &str, price: f64) -> Value {
    json!({
        "id": id,
        "name": name,
        "description": format!("{} for everyday use", name),
        "category": category,
        "brand": "Acme",
        "price": price,
        "rating": 4.5,
        "image_url": null,
        "specifications": "{\"warranty_years\": 2}"
    })
}

pub fn catalog() -> Value {
    json!([
        product(1, "Phone X", "Electronics", 499.0),
        product(2, "Blender Pro", "Kitchen", 89.99),
        product(3, "Laptop Air", "Electronics", 1299.0),
        product(4, "Trail Runner", "Sports", 120.0)
    ])
}

pub fn recommendations() -> Value {
    json!({
        "recommendations": [
            {
                "product": product(1, "Phone X", "Electronics", 499.0),
                "reasoning": "Fits a $500 budget with a strong camera",
                "relevanceScore": 0.91
            },
            {
                "product": product(5, "Phone Lite", "Electronics", 299.0),
                "reasoning": "Cheaper option with good battery life",
                "relevanceScore": 0.74
            }
        ],
        "summary": "Two phones under $500 match your request"
    })
}

pub async fn mock_catalog(server: &MockServer) {
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/products");
            then.status(200).json_body(catalog());
        })
        .await;
}

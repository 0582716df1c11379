use crate::domain::model::{
    HealthStatus, HistoryEntry, Product, ProductId, RecommendationRequest, RecommendationResponse,
};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

pub trait ConfigProvider: Send + Sync {
    fn api_base_url(&self) -> &str;
    fn request_timeout(&self) -> Duration;
}

/// The backend's catalog and recommendation endpoints, one method per route.
#[async_trait]
pub trait CatalogApi: Send + Sync {
    async fn get_all_products(&self) -> Result<Vec<Product>>;
    async fn get_product_by_id(&self, id: &ProductId) -> Result<Product>;
    async fn get_products_by_category(&self, category: &str) -> Result<Vec<Product>>;
    async fn get_categories(&self) -> Result<Vec<String>>;
    async fn search_products(&self, query: &str) -> Result<Vec<Product>>;
    async fn get_recommendations(
        &self,
        request: &RecommendationRequest,
    ) -> Result<RecommendationResponse>;
    async fn get_recommendation_history(&self) -> Result<Vec<HistoryEntry>>;
    async fn check_health(&self) -> Result<HealthStatus>;
}

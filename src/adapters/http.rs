use crate::domain::model::{
    json_type_name, HealthStatus, HistoryEntry, Product, ProductId, RecommendationRequest,
    RecommendationResponse,
};
use crate::domain::ports::{CatalogApi, ConfigProvider};
use crate::utils::error::{ClientError, Operation, Result};
use crate::utils::validation::validate_url;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;
use url::Url;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(30_000);

/// HTTP client for the catalog backend. One attempt per call, no retries.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: Url,
    client: Client,
    timeout: Duration,
}

impl ApiClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let base_url = validate_url("api_base_url", base_url)?;
        if base_url.cannot_be_a_base() {
            return Err(ClientError::Config {
                message: format!("API base URL cannot carry paths: {}", base_url),
            });
        }

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let client = Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()?;

        tracing::info!("[API] Using base URL: {}", base_url);
        Ok(Self {
            base_url,
            client,
            timeout,
        })
    }

    pub fn from_config<C: ConfigProvider>(config: &C) -> Result<Self> {
        Self::new(config.api_base_url(), config.request_timeout())
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ClientError::Config {
                message: format!("API base URL cannot carry paths: {}", self.base_url),
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn classify(&self, error: reqwest::Error) -> ClientError {
        tracing::error!("API response error: {}", error);
        if error.is_timeout() {
            ClientError::Timeout {
                timeout_ms: self.timeout.as_millis() as u64,
            }
        } else if error.is_connect() {
            ClientError::ConnectionRefused
        } else {
            ClientError::Transport(error)
        }
    }

    async fn fetch(
        &self,
        method: Method,
        segments: &[&str],
        query: &[(&str, &str)],
        body: Option<&RecommendationRequest>,
    ) -> Result<Vec<u8>> {
        let url = self.endpoint(segments)?;
        tracing::info!("Making API request: {} /{}", method, segments.join("/"));

        let mut request = self.client.request(method, url);
        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(|e| self.classify(e))?;
        let status = response.status();
        tracing::debug!("API response status: {}", status);

        if !status.is_success() {
            tracing::error!("API response error: status {}", status);
            return Err(ClientError::HttpStatus {
                status: status.as_u16(),
            });
        }

        let bytes = response.bytes().await.map_err(|e| self.classify(e))?;
        Ok(bytes.to_vec())
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        query: &[(&str, &str)],
    ) -> Result<T> {
        let body = self.fetch(Method::GET, segments, query, None).await?;
        Ok(serde_json::from_slice(&body)?)
    }

    async fn post_json<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        body: &RecommendationRequest,
    ) -> Result<T> {
        let body = self.fetch(Method::POST, segments, &[], Some(body)).await?;
        Ok(serde_json::from_slice(&body)?)
    }

    async fn fetch_product_list(&self) -> Result<Vec<Product>> {
        let body = self.fetch(Method::GET, &["products"], &[], None).await?;

        // A proxy answering with an HTML page is the usual culprit, so non-JSON is a string.
        let data = serde_json::from_slice::<Value>(&body)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&body).into_owned()));

        let Value::Array(items) = data else {
            let found = json_type_name(&data);
            tracing::error!("API /products returned non-array: {}", found);
            return Err(ClientError::UnexpectedPayload { found });
        };

        items
            .into_iter()
            .map(|item| serde_json::from_value(item).map_err(ClientError::from))
            .collect()
    }
}

#[async_trait]
impl CatalogApi for ApiClient {
    async fn get_all_products(&self) -> Result<Vec<Product>> {
        self.fetch_product_list().await.map_err(|e| match e {
            ClientError::HttpStatus { status: 404 } => ClientError::EndpointNotFound,
            ClientError::HttpStatus { status } if status >= 500 => ClientError::ServerError,
            other => other.during(Operation::FetchProducts),
        })
    }

    async fn get_product_by_id(&self, id: &ProductId) -> Result<Product> {
        let id = id.to_string();
        self.get_json(&["products", id.as_str()], &[])
            .await
            .map_err(|e| e.during(Operation::FetchProduct))
    }

    async fn get_products_by_category(&self, category: &str) -> Result<Vec<Product>> {
        self.get_json(&["products", "category", category], &[])
            .await
            .map_err(|e| e.during(Operation::FetchProductsByCategory))
    }

    async fn get_categories(&self) -> Result<Vec<String>> {
        self.get_json(&["products", "categories"], &[])
            .await
            .map_err(|e| e.during(Operation::FetchCategories))
    }

    async fn search_products(&self, query: &str) -> Result<Vec<Product>> {
        self.get_json(&["products", "search"], &[("q", query)])
            .await
            .map_err(|e| e.during(Operation::SearchProducts))
    }

    async fn get_recommendations(
        &self,
        request: &RecommendationRequest,
    ) -> Result<RecommendationResponse> {
        self.post_json(&["recommendations"], request)
            .await
            .map_err(|e| e.during(Operation::GetRecommendations))
    }

    async fn get_recommendation_history(&self) -> Result<Vec<HistoryEntry>> {
        self.get_json(&["recommendations", "history"], &[])
            .await
            .map_err(|e| e.during(Operation::FetchRecommendationHistory))
    }

    async fn check_health(&self) -> Result<HealthStatus> {
        self.get_json(&["health"], &[])
            .await
            .map_err(|e| e.during(Operation::HealthCheck))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::PriceRange;
    use httpmock::prelude::*;
    use serde_json::json;

    fn product(id: i64, name: &str, category: &str) -> Value {
        json!({
            "id": id,
            "name": name,
            "description": format!("{} description", name),
            "category": category,
            "brand": "Acme",
            "price": 199.0,
            "rating": 4.0,
            "image_url": null,
            "specifications": {}
        })
    }

    fn client_for(server: &MockServer) -> ApiClient {
        ApiClient::new(&server.url("/api"), DEFAULT_TIMEOUT).unwrap()
    }

    #[tokio::test]
    async fn test_get_all_products_success() {
        let server = MockServer::start_async().await;
        let api_mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/api/products")
                    .header("content-type", "application/json");
                then.status(200).json_body(json!([
                    product(1, "Phone X", "Electronics"),
                    product(2, "Blender", "Kitchen")
                ]));
            })
            .await;

        let products = client_for(&server).get_all_products().await.unwrap();

        api_mock.assert_async().await;
        assert_eq!(products.len(), 2);
        assert_eq!(products[0].name, "Phone X");
        assert_eq!(products[1].category, "Kitchen");
    }

    #[tokio::test]
    async fn test_get_all_products_maps_not_found() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/api/products");
                then.status(404);
            })
            .await;

        let err = client_for(&server).get_all_products().await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "Products API endpoint not found. Check the API base URL ends with /api"
        );
    }

    #[tokio::test]
    async fn test_get_all_products_maps_server_errors() {
        for status in [500, 502, 503] {
            let server = MockServer::start_async().await;
            server
                .mock_async(|when, then| {
                    when.method(GET).path("/api/products");
                    then.status(status);
                })
                .await;

            let err = client_for(&server).get_all_products().await.unwrap_err();
            assert_eq!(err.to_string(), "Backend server error. Please try again later.");
        }
    }

    #[tokio::test]
    async fn test_get_all_products_wraps_other_statuses() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/api/products");
                then.status(403);
            })
            .await;

        let err = client_for(&server).get_all_products().await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "Failed to fetch products: Request failed with status code 403"
        );
    }

    #[tokio::test]
    async fn test_get_all_products_rejects_object_payload() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/api/products");
                then.status(200).json_body(json!({"products": []}));
            })
            .await;

        let err = client_for(&server).get_all_products().await.unwrap_err();
        assert!(err.is_unexpected_payload());
        assert_eq!(
            err.to_string(),
            "Failed to fetch products: API returned object instead of product array. Check backend URL."
        );
    }

    #[tokio::test]
    async fn test_get_all_products_html_page_counts_as_string() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/api/products");
                then.status(200)
                    .header("Content-Type", "text/html")
                    .body("<!doctype html><html><body>app</body></html>");
            })
            .await;

        let err = client_for(&server).get_all_products().await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "Failed to fetch products: API returned string instead of product array. Check backend URL."
        );
    }

    #[tokio::test]
    async fn test_other_operations_prefix_status_errors() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/api/products/99");
                then.status(404);
            })
            .await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/api/products/categories");
                then.status(500);
            })
            .await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/api/health");
                then.status(503);
            })
            .await;

        let client = client_for(&server);

        let err = client.get_product_by_id(&ProductId::Int(99)).await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "Failed to fetch product: Request failed with status code 404"
        );

        let err = client.get_categories().await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "Failed to fetch categories: Request failed with status code 500"
        );

        let err = client.check_health().await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "Health check failed: Request failed with status code 503"
        );
    }

    #[tokio::test]
    async fn test_category_and_search_routes() {
        let server = MockServer::start_async().await;
        let category_mock = server
            .mock_async(|when, then| {
                when.method(GET).path("/api/products/category/Electronics");
                then.status(200)
                    .json_body(json!([product(1, "Phone X", "Electronics")]));
            })
            .await;
        let search_mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/api/products/search")
                    .query_param("q", "running shoes");
                then.status(200).json_body(json!([product(3, "Trail Runner", "Sports")]));
            })
            .await;

        let client = client_for(&server);
        let by_category = client.get_products_by_category("Electronics").await.unwrap();
        let found = client.search_products("running shoes").await.unwrap();

        category_mock.assert_async().await;
        search_mock.assert_async().await;
        assert_eq!(by_category[0].name, "Phone X");
        assert_eq!(found[0].name, "Trail Runner");
    }

    #[tokio::test]
    async fn test_get_recommendations_posts_request_body() {
        let server = MockServer::start_async().await;
        let api_mock = server
            .mock_async(|when, then| {
                when.method(POST).path("/api/recommendations").json_body(json!({
                    "query": "premium headphones",
                    "category": "Audio",
                    "priceRange": {"min": 100.0, "max": 400.0}
                }));
                then.status(200).json_body(json!({
                    "recommendations": [{
                        "product": product(5, "Studio Pro", "Audio"),
                        "reasoning": "Top rated noise cancelling",
                        "relevanceScore": 0.93
                    }],
                    "summary": "One strong match"
                }));
            })
            .await;

        let request = RecommendationRequest::new("premium headphones")
            .with_category(Some("Audio".to_string()))
            .with_price_range(PriceRange::new(Some(100.0), Some(400.0)));
        let response = client_for(&server).get_recommendations(&request).await.unwrap();

        api_mock.assert_async().await;
        let recs = response.recommendations.unwrap();
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].relevance_score, Some(0.93));
        assert_eq!(response.summary.as_deref(), Some("One strong match"));
    }

    #[tokio::test]
    async fn test_get_recommendations_wraps_errors() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/api/recommendations");
                then.status(500);
            })
            .await;

        let err = client_for(&server)
            .get_recommendations(&RecommendationRequest::new("phone"))
            .await
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Failed to get recommendations: Request failed with status code 500"
        );
    }

    #[tokio::test]
    async fn test_history_and_health_decode() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/api/recommendations/history");
                then.status(200).json_body(json!([
                    {"id": 1, "query": "a phone under $500", "created_at": "2024-05-01T10:00:00Z"}
                ]));
            })
            .await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/api/health");
                then.status(200).json_body(json!({"status": "OK", "uptime": 12.5}));
            })
            .await;

        let client = client_for(&server);
        let history = client.get_recommendation_history().await.unwrap();
        let health = client.check_health().await.unwrap();

        assert_eq!(history[0].query, "a phone under $500");
        assert_eq!(history[0].extra.get("id"), Some(&json!(1)));
        assert_eq!(health.status, "OK");
        assert_eq!(health.details.get("uptime"), Some(&json!(12.5)));
    }

    #[tokio::test]
    async fn test_connection_refused_message() {
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let client = ApiClient::new(&format!("http://127.0.0.1:{}/api", port), DEFAULT_TIMEOUT).unwrap();

        let err = client.get_categories().await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "Failed to fetch categories: Unable to connect to server. Please make sure the backend is running."
        );
    }

    #[tokio::test]
    async fn test_timeout_message() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/api/health");
                then.status(200)
                    .delay(Duration::from_secs(2))
                    .json_body(json!({"status": "OK"}));
            })
            .await;

        let client = ApiClient::new(&server.url("/api"), Duration::from_millis(200)).unwrap();
        let err = client.check_health().await.unwrap_err();
        assert_eq!(err.to_string(), "Health check failed: timeout of 200ms exceeded");
    }

    #[test]
    fn test_endpoint_joins_and_encodes_segments() {
        let client = ApiClient::new("http://localhost:3001/api/", DEFAULT_TIMEOUT).unwrap();
        let url = client
            .endpoint(&["products", "category", "Home & Kitchen"])
            .unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:3001/api/products/category/Home%20&%20Kitchen"
        );
    }
}

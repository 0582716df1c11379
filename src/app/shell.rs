use crate::domain::model::{PriceRange, Product, RecommendationRequest, RecommendationResponse};
use crate::domain::ports::CatalogApi;
use crate::ui::render;

pub const LOAD_PRODUCTS_FAILED: &str = "Failed to load products";
pub const RECOMMENDATIONS_FAILED: &str = "Failed to get recommendations. Please try again.";

#[derive(Debug, Clone, PartialEq)]
pub enum Catalog {
    Loaded(Vec<Product>),
    /// The backend answered with something other than a product list.
    Unreadable,
}

impl Catalog {
    pub fn as_slice(&self) -> Option<&[Product]> {
        match self {
            Catalog::Loaded(products) => Some(products.as_slice()),
            Catalog::Unreadable => None,
        }
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Catalog::Loaded(Vec::new())
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShellState {
    pub products: Catalog,
    pub recommendations: Option<RecommendationResponse>,
    pub loading: bool,
    pub error: Option<String>,
    pub search_query: String,
}

/// Which of the two main views is on screen.
#[derive(Debug, PartialEq)]
pub enum View<'a> {
    Catalog {
        products: Option<&'a [Product]>,
        loading: bool,
    },
    Recommendations {
        response: &'a RecommendationResponse,
        search_query: &'a str,
    },
}

/// In-memory client state plus the API it synchronizes with.
pub struct AppShell<A: CatalogApi> {
    api: A,
    state: ShellState,
}

impl<A: CatalogApi> AppShell<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            state: ShellState::default(),
        }
    }

    pub fn state(&self) -> &ShellState {
        &self.state
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub async fn load_products(&mut self) {
        self.state.loading = true;

        match self.api.get_all_products().await {
            Ok(products) => {
                tracing::info!("Loaded {} products", products.len());
                self.state.products = Catalog::Loaded(products);
            }
            Err(e) => {
                tracing::error!("Error loading products: {}", e);
                self.state.error = Some(LOAD_PRODUCTS_FAILED.to_string());
                self.state.products = if e.is_unexpected_payload() {
                    Catalog::Unreadable
                } else {
                    Catalog::default()
                };
            }
        }

        self.state.loading = false;
    }

    pub async fn handle_search(&mut self, query: &str) {
        self.handle_filtered_search(query, None, None).await;
    }

    /// Like `handle_search`, forwarding the optional filters the endpoint accepts.
    pub async fn handle_filtered_search(
        &mut self,
        query: &str,
        category: Option<String>,
        price_range: Option<PriceRange>,
    ) {
        if query.trim().is_empty() {
            self.state.recommendations = None;
            self.state.search_query.clear();
            return;
        }

        self.state.loading = true;
        self.state.error = None;
        self.state.search_query = query.to_string();

        let request = RecommendationRequest::new(query)
            .with_category(category)
            .with_price_range(price_range);

        match self.api.get_recommendations(&request).await {
            Ok(response) => {
                tracing::info!(
                    "Received {} recommendations for \"{}\"",
                    response.recommendations.as_ref().map_or(0, Vec::len),
                    query
                );
                self.state.recommendations = Some(response);
            }
            Err(e) => {
                tracing::error!("Error getting recommendations: {}", e);
                self.state.error = Some(RECOMMENDATIONS_FAILED.to_string());
            }
        }

        self.state.loading = false;
    }

    /// Search-box submit: trims the input and ignores it when nothing is left.
    pub async fn submit(&mut self, input: &str) {
        let query = input.trim();
        if !query.is_empty() {
            self.handle_search(query).await;
        }
    }

    pub fn clear_recommendations(&mut self) {
        self.state.recommendations = None;
        self.state.search_query.clear();
        self.state.error = None;
    }

    pub fn dismiss_error(&mut self) {
        self.state.error = None;
    }

    pub fn view(&self) -> View<'_> {
        match &self.state.recommendations {
            Some(response) => View::Recommendations {
                response,
                search_query: &self.state.search_query,
            },
            None => View::Catalog {
                products: self.state.products.as_slice(),
                loading: self.state.loading,
            },
        }
    }

    pub fn render(&self) -> String {
        let mut page = render::header();
        page.push('\n');
        page.push_str(&render::search_hints(
            self.state.recommendations.is_some(),
            self.state.loading,
        ));

        if let Some(error) = &self.state.error {
            page.push('\n');
            page.push_str(&render::error_banner(error));
        }
        page.push('\n');

        match self.view() {
            View::Recommendations {
                response,
                search_query,
            } => page.push_str(&render::recommendation_display(Some(response), search_query)),
            View::Catalog { products, loading } => {
                page.push_str("All Products\n\n");
                page.push_str(&render::product_list(products, loading));
            }
        }

        page.push('\n');
        page.push_str(&render::footer());
        page
    }
}

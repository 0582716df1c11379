pub mod adapters;
pub mod app;
pub mod config;
pub mod domain;
pub mod ui;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliConfig;

pub use adapters::http::ApiClient;
pub use app::shell::AppShell;
pub use config::Settings;
pub use domain::model::{Product, ProductId, Recommendation, RecommendationResponse};
pub use domain::ports::CatalogApi;
pub use utils::error::{ClientError, Result};

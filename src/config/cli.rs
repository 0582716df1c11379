use crate::config::toml_config::TomlConfig;
use crate::config::{Settings, API_URL_ENV};
use crate::utils::error::Result;
use crate::utils::validation::{validate_price_bounds, Validate};
use clap::{Parser, Subcommand};

#[derive(Debug, Clone, Parser)]
#[command(name = "prodrec")]
#[command(about = "Browse a product catalog and ask for AI-generated recommendations")]
pub struct CliConfig {
    /// Backend base URL; `/api` is appended when missing
    #[arg(long, global = true, env = API_URL_ENV)]
    pub api_url: Option<String>,

    /// Per-request timeout in milliseconds
    #[arg(long, global = true, env = "PRODREC_TIMEOUT_MS")]
    pub timeout_ms: Option<u64>,

    /// Optional TOML configuration file
    #[arg(long, global = true)]
    pub config: Option<String>,

    #[arg(long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Emit logs as JSON")]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Interactive catalog and recommendation shell (default)
    Shell,
    /// List all products grouped by category
    Products,
    /// Show one product
    Product { id: String },
    /// List the products of one category
    Category { name: String },
    /// List the known categories
    Categories,
    /// Keyword search over the catalog
    Search {
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,
    },
    /// Ask for AI recommendations
    Recommend {
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        min_price: Option<f64>,
        #[arg(long)]
        max_price: Option<f64>,
    },
    /// Show past recommendation queries
    History,
    /// Check that the backend is up
    Health,
}

impl CliConfig {
    pub fn load_file(&self) -> Result<Option<TomlConfig>> {
        match &self.config {
            Some(path) => {
                let file = TomlConfig::from_file(path)?;
                file.validate()?;
                Ok(Some(file))
            }
            None => Ok(None),
        }
    }

    pub fn settings(&self, file: Option<&TomlConfig>) -> Settings {
        Settings::resolve(self.api_url.as_deref(), self.timeout_ms, file)
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        if let Some(Command::Recommend {
            min_price,
            max_price,
            ..
        }) = &self.command
        {
            validate_price_bounds(*min_price, *max_price)?;
        }
        Ok(())
    }
}

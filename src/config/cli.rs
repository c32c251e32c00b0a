use crate::config::{OPTIMIZE_URL, REVIEW_URL};
use crate::core::orchestrator::{DEFAULT_BUDGET, DEFAULT_DAYS};
use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{validate_url, Validate};
use clap::Parser;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "travel-agents")]
#[command(about = "Send a travel plan through the review and optimization agents")]
pub struct ClientArgs {
    #[arg(long, default_value = REVIEW_URL)]
    pub review_url: String,

    #[arg(long, default_value = OPTIMIZE_URL)]
    pub optimize_url: String,

    /// Read the plan from a file instead of the built-in Paris itinerary
    #[arg(long)]
    pub plan_file: Option<String>,

    #[arg(long, default_value_t = DEFAULT_BUDGET)]
    pub budget: f64,

    #[arg(long, default_value_t = DEFAULT_DAYS)]
    pub days: u32,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl ConfigProvider for ClientArgs {
    fn review_url(&self) -> &str {
        &self.review_url
    }

    fn optimize_url(&self) -> &str {
        &self.optimize_url
    }
}

impl Validate for ClientArgs {
    fn validate(&self) -> Result<()> {
        validate_url("review_url", &self.review_url)?;
        validate_url("optimize_url", &self.optimize_url)
    }
}

#[derive(Debug, Clone, Parser)]
#[command(about = "Run a travel plan agent over HTTP")]
pub struct ServiceArgs {
    /// Path to TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Override the listen address, e.g. 127.0.0.1:8000
    #[arg(long)]
    pub bind: Option<String>,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub json_logs: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::{ClientArgs, ServiceArgs};

pub use adapters::gateway::ChatCompletionsGateway;
pub use config::{ClientConfig, GatewaySettings, ServiceSettings};
pub use core::orchestrator::{render_report, OrchestratorClient, PipelineReport};
pub use core::service::{OptimizationService, ReviewService};
pub use utils::error::{AgentError, Result};

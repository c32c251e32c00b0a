pub mod normalizer;
pub mod orchestrator;
pub mod prompt;
pub mod service;

pub use crate::domain::model::{
    Completion, OptimizationRequest, OptimizationResult, PlanText, ReviewRequest, ReviewResult,
};
pub use crate::domain::ports::{ChatMessage, ConfigProvider, Gateway};
pub use crate::utils::error::Result;

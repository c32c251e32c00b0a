use crate::core::normalizer::{normalize_optimization, normalize_review};
use crate::core::prompt::{OptimizationPrompt, ReviewPrompt};
use crate::domain::model::{OptimizationRequest, OptimizationResult, ReviewRequest, ReviewResult};
use crate::domain::ports::Gateway;
use crate::utils::error::Result;

pub struct ReviewService<G: Gateway> {
    gateway: G,
    prompt: ReviewPrompt,
}

impl<G: Gateway> ReviewService<G> {
    pub fn new(gateway: G, prompt: ReviewPrompt) -> Self {
        Self { gateway, prompt }
    }

    /// 呼叫一次模型並整理回覆；模型呼叫失敗直接往上傳
    pub async fn review(&self, request: &ReviewRequest) -> Result<ReviewResult> {
        tracing::info!("📝 Reviewing plan ({} chars)", request.plan.len());

        let raw = self.gateway.complete(self.prompt.messages(&request.plan)).await?;
        tracing::debug!("Review completion: {}", raw);

        let result = normalize_review(&raw);
        tracing::info!(
            "✅ Review ready with {} recommendations",
            result.recommendations.len()
        );
        Ok(result)
    }
}

pub struct OptimizationService<G: Gateway> {
    gateway: G,
    prompt: OptimizationPrompt,
}

impl<G: Gateway> OptimizationService<G> {
    pub fn new(gateway: G, prompt: OptimizationPrompt) -> Self {
        Self { gateway, prompt }
    }

    pub async fn optimize(&self, request: &OptimizationRequest) -> Result<OptimizationResult> {
        tracing::info!(
            "🧮 Optimizing plan for budget {} over {} days",
            request.budget,
            request.days
        );

        let messages = self
            .prompt
            .messages(&request.plan, request.budget, request.days);
        let raw = self.gateway.complete(messages).await?;
        tracing::debug!("Optimization completion: {}", raw);

        let result = normalize_optimization(&raw, request.days, request.budget);
        tracing::info!("✅ Optimization ready, estimated cost {}", result.estimated_cost);
        Ok(result)
    }
}

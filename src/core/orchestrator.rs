use crate::domain::model::{OptimizationRequest, OptimizationResult, ReviewRequest, ReviewResult};
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{AgentError, Result};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt::{self, Write};

pub const DEFAULT_PLAN: &str = "
    Trip plan for Paris:
    1. Arrival at Charles de Gaulle airport
    2. Visit the Eiffel Tower
    3. Tour the Louvre
    4. Walk along the Champs-Élysées
    5. Visit Notre-Dame
    6. Seine river cruise
    7. Departure home
    ";

pub const DEFAULT_BUDGET: f64 = 1000.0;
pub const DEFAULT_DAYS: u32 = 3;

#[derive(Debug, Clone, PartialEq)]
pub struct PipelineReport {
    pub review: ReviewResult,
    pub optimization: OptimizationResult,
    pub review_degraded: bool,
    pub optimization_degraded: bool,
}

/// 依序呼叫審查與優化服務
pub struct OrchestratorClient<C: ConfigProvider> {
    config: C,
    client: Client,
}

impl<C: ConfigProvider> OrchestratorClient<C> {
    pub fn new(config: C) -> Self {
        Self {
            config,
            client: Client::new(),
        }
    }

    pub async fn call_review(&self, plan: &str) -> Result<ReviewResult> {
        let url = endpoint(self.config.review_url(), "review");
        let request = ReviewRequest {
            plan: plan.to_string(),
        };
        self.post_json("review", &url, &request).await
    }

    pub async fn call_optimization(
        &self,
        plan: &str,
        budget: f64,
        days: u32,
    ) -> Result<OptimizationResult> {
        let url = endpoint(self.config.optimize_url(), "optimize");
        let request = OptimizationRequest {
            plan: plan.to_string(),
            budget,
            days,
        };
        self.post_json("optimization", &url, &request).await
    }

    /// 先審查再優化；任一步連線失敗就換成替代結果繼續
    pub async fn run(&self, plan: &str, budget: f64, days: u32) -> PipelineReport {
        tracing::info!("🚀 Step 1: plan review");
        let (review, review_degraded) = match self.call_review(plan).await {
            Ok(result) => (result, false),
            Err(e) => {
                tracing::error!("❌ Review call failed: {}", e);
                tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
                (ReviewResult::unavailable(), true)
            }
        };

        tracing::info!("🚀 Step 2: plan optimization");
        let (optimization, optimization_degraded) =
            match self.call_optimization(plan, budget, days).await {
                Ok(result) => (result, false),
                Err(e) => {
                    tracing::error!("❌ Optimization call failed: {}", e);
                    tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
                    (OptimizationResult::unavailable(days), true)
                }
            };

        PipelineReport {
            review,
            optimization,
            review_degraded,
            optimization_degraded,
        }
    }

    async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        service: &str,
        url: &str,
        body: &B,
    ) -> Result<T> {
        tracing::debug!("Making API request to: {}", url);
        let response = self.client.post(url).json(body).send().await?;

        let status = response.status();
        tracing::debug!("API response status: {}", status);

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AgentError::ServiceStatus {
                service: service.to_string(),
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.json().await?)
    }
}

fn endpoint(base: &str, path: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), path)
}

pub fn render_report(report: &PipelineReport) -> String {
    let mut out = String::new();
    // 寫入 String 不會失敗
    let _ = write_report(&mut out, report);
    out
}

fn write_report(out: &mut String, report: &PipelineReport) -> fmt::Result {
    writeln!(out, "=== Step 1: Plan review ===")?;
    writeln!(out, "\nAnalysis:\n{}", report.review.analysis)?;
    writeln!(out, "\nRecommendations:")?;
    for rec in &report.review.recommendations {
        writeln!(out, "- {}", rec)?;
    }

    writeln!(out, "\n=== Step 2: Plan optimization ===")?;
    writeln!(out, "\nOptimized plan:\n{}", report.optimization.optimized_plan)?;
    writeln!(out, "\nEstimated cost: ${}", report.optimization.estimated_cost)?;
    writeln!(out, "\nDaily breakdown:")?;
    for day in &report.optimization.daily_breakdown {
        writeln!(out, "- {}", day)?;
    }
    Ok(())
}

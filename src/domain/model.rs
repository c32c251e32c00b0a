use serde::{Deserialize, Serialize};

pub type PlanText = String;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewRequest {
    pub plan: PlanText,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewResult {
    pub analysis: String,
    pub recommendations: Vec<String>,
}

impl ReviewResult {
    /// 審查服務無法連線時的替代結果
    pub fn unavailable() -> Self {
        Self {
            analysis: "Service unavailable".to_string(),
            recommendations: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizationRequest {
    pub plan: PlanText,
    pub budget: f64,
    pub days: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizationResult {
    pub optimized_plan: String,
    pub estimated_cost: f64,
    pub daily_breakdown: Vec<String>,
}

impl OptimizationResult {
    /// 優化服務無法連線時的替代結果
    pub fn unavailable(days: u32) -> Self {
        Self {
            optimized_plan: "Service unavailable".to_string(),
            estimated_cost: 0.0,
            daily_breakdown: (1..=days)
                .map(|i| format!("Day {}: service unavailable", i))
                .collect(),
        }
    }
}

/// 解析模型輸出的結果：成功帶值，失敗不帶任何內容
#[derive(Debug, Clone, PartialEq)]
pub enum Completion<T> {
    Parsed(T),
    Malformed,
}

impl<T> Completion<T> {
    pub fn is_parsed(&self) -> bool {
        matches!(self, Completion::Parsed(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_optimization_request_rejects_missing_days() {
        let body = serde_json::json!({"plan": "Paris", "budget": 1000.0});
        assert!(serde_json::from_value::<OptimizationRequest>(body).is_err());
    }

    #[test]
    fn test_optimization_request_rejects_string_budget() {
        let body = serde_json::json!({"plan": "Paris", "budget": "a lot", "days": 3});
        assert!(serde_json::from_value::<OptimizationRequest>(body).is_err());
    }

    #[test]
    fn test_optimization_request_rejects_negative_days() {
        let body = serde_json::json!({"plan": "Paris", "budget": 1000.0, "days": -1});
        assert!(serde_json::from_value::<OptimizationRequest>(body).is_err());
    }

    #[test]
    fn test_optimization_request_accepts_zero_days_and_negative_budget() {
        let body = serde_json::json!({"plan": "Paris", "budget": -5.0, "days": 0});
        let request: OptimizationRequest = serde_json::from_value(body).unwrap();
        assert_eq!(request.days, 0);
        assert_eq!(request.budget, -5.0);
    }

    #[test]
    fn test_unavailable_breakdown_matches_days() {
        let result = OptimizationResult::unavailable(2);
        assert_eq!(
            result.daily_breakdown,
            vec!["Day 1: service unavailable", "Day 2: service unavailable"]
        );
    }
}

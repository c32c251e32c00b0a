use crate::domain::ports::ChatMessage;

pub const DEFAULT_REVIEW_SYSTEM_PROMPT: &str = "You are an experienced traveller and travel expert.
Analyse the trip plan and provide:
1. An overall analysis of the plan
2. A list of concrete recommendations for improving it

Write the analysis as one paragraph, then a blank line, then one recommendation per line starting with \"- \".";

pub const DEFAULT_OPTIMIZATION_TEMPLATE: &str = r#"You are an experienced travel agent who optimizes itineraries.
Optimize the following travel plan for a budget of {budget}$ and a duration of {days} days.

Plan:
{plan}

Reply strictly in the following JSON format (all fields are required):
{
    "optimized_plan": "detailed description of the optimized plan",
    "estimated_cost": 1000.0,
    "daily_breakdown": [
        "Day 1: detailed description",
        "Day 2: detailed description",
        "Day 3: detailed description"
    ]
}

Make sure that:
1. estimated_cost is a number (not a string)
2. daily_breakdown contains exactly {days} days
3. every value has the correct format
4. the reply is JSON only, with no additional text
"#;

/// 審查提示：系統訊息加上使用者的計畫
#[derive(Debug, Clone)]
pub struct ReviewPrompt {
    system: String,
}

impl ReviewPrompt {
    pub fn new(system: impl Into<String>) -> Self {
        Self {
            system: system.into(),
        }
    }

    pub fn messages(&self, plan: &str) -> Vec<ChatMessage> {
        vec![ChatMessage::system(&self.system), ChatMessage::user(plan)]
    }
}

impl Default for ReviewPrompt {
    fn default() -> Self {
        Self::new(DEFAULT_REVIEW_SYSTEM_PROMPT)
    }
}

/// 優化提示模板，只做 `{budget}`、`{days}`、`{plan}` 的字串替換
#[derive(Debug, Clone)]
pub struct OptimizationPrompt {
    template: String,
}

impl OptimizationPrompt {
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
        }
    }

    pub fn render(&self, plan: &str, budget: f64, days: u32) -> String {
        // plan 最後替換，避免使用者文字中的佔位符被展開
        self.template
            .replace("{budget}", &budget.to_string())
            .replace("{days}", &days.to_string())
            .replace("{plan}", plan)
    }

    pub fn messages(&self, plan: &str, budget: f64, days: u32) -> Vec<ChatMessage> {
        vec![ChatMessage::user(self.render(plan, budget, days))]
    }
}

impl Default for OptimizationPrompt {
    fn default() -> Self {
        Self::new(DEFAULT_OPTIMIZATION_TEMPLATE)
    }
}

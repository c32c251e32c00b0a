//! 把模型回傳的自由文字整理成固定結構。
//!
//! 審查結果以第一個空行切成「分析」與「建議」兩段；
//! 優化結果從文字中擷取 JSON 物件，任何一步失敗都回到以預算與天數組成的預設結果，
//! 呼叫端永遠拿到合法的 `OptimizationResult`。

use crate::domain::model::{Completion, OptimizationResult, ReviewResult};
use serde_json::{Map, Value};

const SEGMENT_SEPARATOR: &str = "\n\n";

pub const FALLBACK_PLAN: &str = "Plan could not be optimized";

pub const ANALYSIS_UNAVAILABLE: &str = "Analysis unavailable";

const REQUIRED_FIELDS: [&str; 3] = ["optimized_plan", "estimated_cost", "daily_breakdown"];

/// 將審查回覆切成分析與建議
///
/// 找不到空行時整段都當作分析，建議為空清單。
/// 開頭的空白行會先略過；回覆只剩空白時分析改用 `ANALYSIS_UNAVAILABLE`。
pub fn normalize_review(raw: &str) -> ReviewResult {
    let text = skip_blank_lines(raw);

    let (analysis, rest) = match text.split_once(SEGMENT_SEPARATOR) {
        Some((head, tail)) => (head, Some(tail)),
        None => {
            tracing::debug!("Review completion has no blank-line separator, no recommendations");
            (text, None)
        }
    };

    let recommendations = rest
        .map(|segment| {
            segment
                .lines()
                .map(strip_bullet)
                .filter(|line| !line.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    let analysis = if analysis.trim().is_empty() {
        tracing::warn!("Review completion has no analysis text: {:?}", raw);
        ANALYSIS_UNAVAILABLE.to_string()
    } else {
        analysis.to_string()
    };

    ReviewResult {
        analysis,
        recommendations,
    }
}

/// 略過只含空白字元的開頭行，保留第一個有內容那行的縮排
fn skip_blank_lines(raw: &str) -> &str {
    let mut rest = raw;
    while let Some((line, tail)) = rest.split_once('\n') {
        if !line.trim().is_empty() {
            return rest;
        }
        rest = tail;
    }
    if rest.trim().is_empty() {
        ""
    } else {
        rest
    }
}

fn strip_bullet(line: &str) -> &str {
    line.trim().trim_matches(|c| c == '-' || c == ' ')
}

/// 從模型回覆擷取優化結果，不做天數對齊
pub fn parse_optimization(raw: &str) -> Completion<OptimizationResult> {
    let Some(json_str) = extract_json_object(raw) else {
        return malformed("no JSON object found in completion", raw);
    };

    let object = match serde_json::from_str::<Value>(json_str) {
        Ok(Value::Object(object)) => object,
        Ok(other) => return malformed(&format!("expected a JSON object, got {}", other), raw),
        Err(e) => return malformed(&format!("invalid JSON: {}", e), raw),
    };

    if let Some(missing) = REQUIRED_FIELDS.iter().find(|key| !object.contains_key(**key)) {
        return malformed(&format!("missing required field '{}'", missing), raw);
    }

    match build_result(&object) {
        Some(result) => Completion::Parsed(result),
        None => malformed("fields have unexpected types", raw),
    }
}

/// 優化結果的完整正規化流程，對任何輸入都回傳合法結果
pub fn normalize_optimization(raw: &str, days: u32, budget: f64) -> OptimizationResult {
    match parse_optimization(raw) {
        Completion::Parsed(mut result) => {
            fit_daily_breakdown(&mut result.daily_breakdown, days);
            result
        }
        Completion::Malformed => fallback_optimization(days, budget),
    }
}

pub fn fallback_optimization(days: u32, budget: f64) -> OptimizationResult {
    OptimizationResult {
        optimized_plan: FALLBACK_PLAN.to_string(),
        estimated_cost: budget,
        daily_breakdown: (1..=days)
            .map(|i| format!("Day {}: replanning required", i))
            .collect(),
    }
}

/// 截斷或補齊到剛好 `days` 筆，既有項目維持原順序
pub fn fit_daily_breakdown(breakdown: &mut Vec<String>, days: u32) {
    let days = days as usize;
    if breakdown.len() > days {
        breakdown.truncate(days);
    } else {
        let start = breakdown.len() + 1;
        breakdown.extend((start..=days).map(|i| format!("Day {}: planning required", i)));
    }
}

fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end >= start {
        Some(&text[start..=end])
    } else {
        None
    }
}

fn build_result(object: &Map<String, Value>) -> Option<OptimizationResult> {
    let optimized_plan = object.get("optimized_plan")?.as_str()?.to_string();
    let estimated_cost = coerce_cost(object.get("estimated_cost")?)?;
    let daily_breakdown = object
        .get("daily_breakdown")?
        .as_array()?
        .iter()
        .map(|entry| entry.as_str().map(str::to_string))
        .collect::<Option<Vec<_>>>()?;

    Some(OptimizationResult {
        optimized_plan,
        estimated_cost,
        daily_breakdown,
    })
}

// 數字直接取用，字串嘗試轉成浮點數；非有限值視為失敗
fn coerce_cost(value: &Value) -> Option<f64> {
    let cost = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    cost.is_finite().then_some(cost)
}

fn malformed<T>(reason: &str, raw: &str) -> Completion<T> {
    tracing::warn!("⚠️ Error parsing completion: {}", reason);
    tracing::warn!("Raw completion: {}", raw);
    Completion::Malformed
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_replanning_placeholder(entry: &str, day: usize) -> bool {
        entry == format!("Day {}: replanning required", day)
    }

    #[test]
    fn test_review_splits_analysis_and_recommendations() {
        let raw = "Good plan overall.\n\n- Add more rest days\n- Book tickets early";
        let result = normalize_review(raw);

        assert_eq!(result.analysis, "Good plan overall.");
        assert_eq!(
            result.recommendations,
            vec!["Add more rest days", "Book tickets early"]
        );
    }

    #[test]
    fn test_review_without_separator_has_no_recommendations() {
        let result = normalize_review("The plan is fine as it is.");

        assert_eq!(result.analysis, "The plan is fine as it is.");
        assert!(result.recommendations.is_empty());
    }

    #[test]
    fn test_review_drops_blank_lines_and_bare_markers() {
        let raw = "Analysis.\n\n-Visit Montmartre\n\n   \n-\n- Take the RER B from the airport\n";
        let result = normalize_review(raw);

        assert_eq!(
            result.recommendations,
            vec!["Visit Montmartre", "Take the RER B from the airport"]
        );
        assert!(result.recommendations.iter().all(|r| !r.is_empty()));
    }

    #[test]
    fn test_review_keeps_unbulleted_lines_and_crlf() {
        let raw = "Too packed.\n\n1. Spread museums over two days\r\nSkip the taxi\r\n";
        let result = normalize_review(raw);

        assert_eq!(result.analysis, "Too packed.");
        assert_eq!(
            result.recommendations,
            vec!["1. Spread museums over two days", "Skip the taxi"]
        );
    }

    #[test]
    fn test_review_ignores_leading_blank_lines() {
        let result = normalize_review("\n\nSolid itinerary.\n\n- Buy a Navigo pass");

        assert_eq!(result.analysis, "Solid itinerary.");
        assert_eq!(result.recommendations, vec!["Buy a Navigo pass"]);
    }

    #[test]
    fn test_review_empty_completion_uses_placeholder() {
        for raw in ["", "\n\n", "  \r\n\t\n"] {
            let result = normalize_review(raw);

            assert_eq!(result.analysis, ANALYSIS_UNAVAILABLE, "input: {:?}", raw);
            assert!(result.recommendations.is_empty());
        }
    }

    #[test]
    fn test_review_whitespace_lines_before_bullets() {
        let result = normalize_review("   \n\n- Pack light");

        assert_eq!(result.analysis, "- Pack light");
        assert!(result.recommendations.is_empty());
    }

    #[test]
    fn test_review_keeps_indentation_of_first_line() {
        let result = normalize_review(" \n  Solid itinerary.\n\n- Buy a Navigo pass");

        assert_eq!(result.analysis, "  Solid itinerary.");
        assert_eq!(result.recommendations, vec!["Buy a Navigo pass"]);
    }

    #[test]
    fn test_review_analysis_is_never_blank() {
        let inputs = ["", "\n", "\n\n", "   \n\n- x", "\r\n\r\n", "x\n\n- y", "\t\n\n\n"];
        for raw in inputs {
            let result = normalize_review(raw);
            assert!(!result.analysis.trim().is_empty(), "input: {:?}", raw);
        }
    }

    #[test]
    fn test_optimization_pads_short_breakdown_and_coerces_cost() {
        let raw = r#"random preamble {"optimized_plan":"X","estimated_cost":"900","daily_breakdown":["D1","D2"]} trailing"#;
        let result = normalize_optimization(raw, 3, 1000.0);

        assert_eq!(
            result,
            OptimizationResult {
                optimized_plan: "X".to_string(),
                estimated_cost: 900.0,
                daily_breakdown: vec![
                    "D1".to_string(),
                    "D2".to_string(),
                    "Day 3: planning required".to_string()
                ],
            }
        );
    }

    #[test]
    fn test_optimization_without_braces_falls_back() {
        let result = normalize_optimization("I cannot help with that.", 3, 500.0);

        assert_eq!(result.optimized_plan, FALLBACK_PLAN);
        assert_eq!(result.estimated_cost, 500.0);
        assert_eq!(result.daily_breakdown.len(), 3);
        for (i, entry) in result.daily_breakdown.iter().enumerate() {
            assert!(is_replanning_placeholder(entry, i + 1));
        }
    }

    #[test]
    fn test_optimization_truncates_long_breakdown() {
        let raw = r#"{"optimized_plan":"Paris","estimated_cost":750,"daily_breakdown":["A","B","C","D","E"]}"#;
        let result = normalize_optimization(raw, 2, 1000.0);

        assert_eq!(result.daily_breakdown, vec!["A", "B"]);
        assert_eq!(result.estimated_cost, 750.0);
    }

    #[test]
    fn test_optimization_numeric_string_cost() {
        let raw = r#"{"optimized_plan":"P","estimated_cost":"450.5","daily_breakdown":["d"]}"#;
        assert_eq!(normalize_optimization(raw, 1, 10.0).estimated_cost, 450.5);
    }

    #[test]
    fn test_optimization_non_numeric_cost_falls_back() {
        let raw = r#"{"optimized_plan":"P","estimated_cost":"free","daily_breakdown":["d"]}"#;
        let result = normalize_optimization(raw, 1, 10.0);

        assert_eq!(result.optimized_plan, FALLBACK_PLAN);
        assert_eq!(result.estimated_cost, 10.0);
    }

    #[test]
    fn test_optimization_missing_field_falls_back() {
        let raw = r#"{"optimized_plan":"P","estimated_cost":100}"#;
        let result = normalize_optimization(raw, 2, 300.0);

        assert_eq!(result, fallback_optimization(2, 300.0));
    }

    #[test]
    fn test_optimization_brace_order_reversed_falls_back() {
        let result = normalize_optimization("} nothing here {", 1, 42.0);
        assert_eq!(result, fallback_optimization(1, 42.0));
    }

    #[test]
    fn test_optimization_invalid_json_falls_back() {
        let raw = r#"{"optimized_plan": "P", "estimated_cost": 100, "daily_breakdown": ["a",]}"#;
        assert_eq!(normalize_optimization(raw, 2, 80.0), fallback_optimization(2, 80.0));
    }

    #[test]
    fn test_optimization_wrong_field_types_fall_back() {
        let cases = [
            r#"{"optimized_plan":42,"estimated_cost":1,"daily_breakdown":[]}"#,
            r#"{"optimized_plan":"P","estimated_cost":true,"daily_breakdown":[]}"#,
            r#"{"optimized_plan":"P","estimated_cost":1,"daily_breakdown":"Day 1"}"#,
            r#"{"optimized_plan":"P","estimated_cost":1,"daily_breakdown":[1,2]}"#,
            r#"{"optimized_plan":"P","estimated_cost":"NaN","daily_breakdown":[]}"#,
        ];

        for raw in cases {
            assert!(!parse_optimization(raw).is_parsed(), "expected fallback for {}", raw);
            assert_eq!(normalize_optimization(raw, 2, 99.0), fallback_optimization(2, 99.0));
        }
    }

    #[test]
    fn test_optimization_handles_markdown_fenced_json() {
        let raw = "```json\n{\n  \"optimized_plan\": \"Louvre first\",\n  \"estimated_cost\": 820.0,\n  \"daily_breakdown\": [\"Day 1: Louvre\", \"Day 2: Seine\", \"Day 3: Home\"]\n}\n```";
        let result = normalize_optimization(raw, 3, 1000.0);

        assert_eq!(result.optimized_plan, "Louvre first");
        assert_eq!(result.estimated_cost, 820.0);
        assert_eq!(result.daily_breakdown[2], "Day 3: Home");
    }

    #[test]
    fn test_optimization_is_idempotent() {
        let inputs = [
            r#"pre {"optimized_plan":"X","estimated_cost":"900","daily_breakdown":["D1"]} post"#,
            "no json at all",
        ];
        for raw in inputs {
            assert_eq!(
                normalize_optimization(raw, 4, 600.0),
                normalize_optimization(raw, 4, 600.0)
            );
        }
    }

    #[test]
    fn test_zero_days_yields_empty_breakdown() {
        let raw = r#"{"optimized_plan":"P","estimated_cost":1,"daily_breakdown":["a"]}"#;
        assert!(normalize_optimization(raw, 0, 1.0).daily_breakdown.is_empty());
        assert!(fallback_optimization(0, 1.0).daily_breakdown.is_empty());
    }
}

// Prompt constants and structured-output schema for insight generation.

use serde_json::{json, Value};

use crate::llm_client::prompts::{json_schema_format, JSON_ONLY_SYSTEM};

pub const INSIGHTS_SYSTEM_ROLE: &str = "You are a Middle Product Manager. \
    Analyze the reviews. Highlight the top 3 problems. Be concise.";

/// Full system prompt: the product-manager role plus the JSON-only guard.
pub fn insights_system_prompt() -> String {
    format!("{INSIGHTS_SYSTEM_ROLE} {JSON_ONLY_SYSTEM}")
}

/// `response_format` matching `ProductAnalysis`.
pub fn product_analysis_format() -> Value {
    json_schema_format(
        "product_analysis",
        json!({
            "type": "object",
            "properties": {
                "top_issues": {
                    "type": "array",
                    "items": {
                        "type": "object",
                        "properties": {
                            "problem_description": {"type": "string"},
                            "improvement_option": {"type": "string"}
                        },
                        "required": ["problem_description", "improvement_option"],
                        "additionalProperties": false
                    }
                }
            },
            "required": ["top_issues"],
            "additionalProperties": false
        }),
    )
}

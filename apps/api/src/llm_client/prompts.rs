// Shared prompt fragments and response-format helpers.
// Each service that needs LLM calls defines its own prompts.rs alongside it.

use serde_json::{json, Value};

/// System prompt fragment that enforces JSON-only output.
pub const JSON_ONLY_SYSTEM: &str = "You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences.";

/// Wraps a JSON schema in the strict `response_format` envelope the
/// chat-completions API expects for structured outputs.
pub fn json_schema_format(name: &str, schema: Value) -> Value {
    json!({
        "type": "json_schema",
        "json_schema": {
            "name": name,
            "strict": true,
            "schema": schema
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_schema_format_envelope() {
        let format = json_schema_format("thing", json!({"type": "object"}));
        assert_eq!(format["type"], "json_schema");
        assert_eq!(format["json_schema"]["name"], "thing");
        assert_eq!(format["json_schema"]["strict"], true);
    }
}

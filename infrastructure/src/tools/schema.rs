//! JSON Schema tool converter.
//!
//! Default implementation of [`ToolSchemaPort`] that produces provider-neutral
//! JSON Schema for tool declarations.

use triage_application::ports::tool_schema::ToolSchemaPort;
use triage_domain::tool::entities::{ParamType, ToolDefinition, ToolSpec};

/// Default implementation producing provider-neutral JSON Schema.
///
/// Each [`ParamType`] maps to the JSON Schema type of the same name.
/// Enumerations become `enum` on scalars and `items.enum` on arrays.
pub struct JsonSchemaToolConverter;

impl ToolSchemaPort for JsonSchemaToolConverter {
    fn tool_to_schema(&self, tool: &ToolDefinition) -> serde_json::Value {
        let mut properties = serde_json::Map::new();
        let mut required = Vec::new();

        for param in &tool.parameters {
            let mut prop = serde_json::Map::new();
            prop.insert(
                "type".to_string(),
                serde_json::json!(param.param_type.as_str()),
            );
            prop.insert(
                "description".to_string(),
                serde_json::json!(param.description),
            );

            match (param.param_type, &param.allowed_values) {
                (ParamType::Array, Some(values)) => {
                    prop.insert(
                        "items".to_string(),
                        serde_json::json!({ "type": "string", "enum": values }),
                    );
                }
                (ParamType::Array, None) => {
                    prop.insert("items".to_string(), serde_json::json!({ "type": "string" }));
                }
                (_, Some(values)) => {
                    prop.insert("enum".to_string(), serde_json::json!(values));
                }
                (_, None) => {}
            }

            properties.insert(param.name.clone(), serde_json::Value::Object(prop));

            if param.required {
                required.push(serde_json::json!(param.name));
            }
        }

        serde_json::json!({
            "name": tool.name,
            "description": tool.description,
            "input_schema": {
                "type": "object",
                "properties": properties,
                "required": required,
            }
        })
    }

    fn all_tools_schema(&self, spec: &ToolSpec) -> Vec<serde_json::Value> {
        let mut tools: Vec<&ToolDefinition> = spec.all().collect();
        tools.sort_by_key(|t| &t.name);
        tools.into_iter().map(|t| self.tool_to_schema(t)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use triage_domain::tool::entities::{RiskLevel, ToolParameter};
    use triage_domain::triage_tool_spec;

    #[test]
    fn test_tool_to_schema() {
        let converter = JsonSchemaToolConverter;
        let tool = ToolDefinition::new("search_issues", "Search issues", RiskLevel::Low)
            .with_parameter(ToolParameter::new("query", "Search query", true))
            .with_parameter(
                ToolParameter::new("limit", "Max results", false).with_type(ParamType::Integer),
            );

        let schema = converter.tool_to_schema(&tool);

        assert_eq!(schema["name"], "search_issues");
        assert_eq!(schema["description"], "Search issues");
        assert_eq!(schema["input_schema"]["type"], "object");

        let query = &schema["input_schema"]["properties"]["query"];
        assert_eq!(query["type"], "string");
        assert_eq!(query["description"], "Search query");

        let limit = &schema["input_schema"]["properties"]["limit"];
        assert_eq!(limit["type"], "integer");

        let required = schema["input_schema"]["required"].as_array().unwrap();
        assert_eq!(required.len(), 1);
        assert_eq!(required[0], "query");
    }

    #[test]
    fn test_array_enumeration_goes_to_items() {
        let converter = JsonSchemaToolConverter;
        let spec = triage_tool_spec();
        let schema = converter.tool_to_schema(spec.get("create_issue").unwrap());

        let labels = &schema["input_schema"]["properties"]["labels"];
        assert_eq!(labels["type"], "array");
        assert_eq!(labels["items"]["type"], "string");
        assert_eq!(
            labels["items"]["enum"],
            serde_json::json!(["bug", "llm created", "enhancement"])
        );
        assert!(labels.get("enum").is_none());

        let required = schema["input_schema"]["required"].as_array().unwrap();
        assert_eq!(required, &vec![serde_json::json!("title"), serde_json::json!("body")]);
    }

    #[test]
    fn test_scalar_enumeration() {
        let converter = JsonSchemaToolConverter;
        let tool = ToolDefinition::new("set_state", "Set state", RiskLevel::High).with_parameter(
            ToolParameter::new("state", "New state", true).with_allowed_values(["open", "closed"]),
        );

        let schema = converter.tool_to_schema(&tool);
        let state = &schema["input_schema"]["properties"]["state"];
        assert_eq!(state["enum"], serde_json::json!(["open", "closed"]));
    }

    #[test]
    fn test_all_tools_schema_is_sorted() {
        let converter = JsonSchemaToolConverter;
        let tools = converter.all_tools_schema(&triage_tool_spec());
        assert_eq!(tools.len(), 2);
        assert_eq!(tools[0]["name"], "create_issue");
        assert_eq!(tools[1]["name"], "search_issues");

        for tool in &tools {
            assert!(tool["name"].is_string());
            assert!(tool["description"].is_string());
            assert!(tool["input_schema"]["type"].as_str() == Some("object"));
        }
    }
}

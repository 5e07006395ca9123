//! Tool domain traits
//!
//! Contains pure domain logic traits for tool validation.
//! The async ToolExecutorPort is defined in the application layer (ports).

use super::entities::{ParamType, ToolCall, ToolDefinition};

/// Validator for tool calls
///
/// This is a pure domain trait that validates tool calls
/// against their definitions without any I/O operations.
pub trait ToolValidator {
    /// Validate a tool call against its definition
    fn validate(&self, call: &ToolCall, definition: &ToolDefinition) -> Result<(), String>;
}

/// Default implementation of ToolValidator
///
/// Checks presence of required parameters and each declared argument's
/// JSON type. Undeclared arguments are skipped; the session strips them
/// before dispatch. Enumerations are enforced for
/// scalar strings only; array items outside an enumeration are left for
/// the executor to filter.
#[derive(Debug, Clone, Default)]
pub struct DefaultToolValidator;

impl ToolValidator for DefaultToolValidator {
    fn validate(&self, call: &ToolCall, definition: &ToolDefinition) -> Result<(), String> {
        for param in &definition.parameters {
            if param.required && !call.arguments.contains_key(&param.name) {
                return Err(format!(
                    "Missing required parameter '{}' for tool '{}'",
                    param.name, definition.name
                ));
            }
        }

        for (arg_name, value) in &call.arguments {
            let Some(param) = definition.parameter(arg_name) else {
                continue;
            };

            if value.is_null() && !param.required {
                continue;
            }

            if !param.param_type.matches(value) {
                return Err(format!(
                    "Parameter '{}' for tool '{}' must be of type {}",
                    arg_name, definition.name, param.param_type
                ));
            }

            if param.param_type == ParamType::String
                && let Some(s) = value.as_str()
                && !param.allows(s)
            {
                return Err(format!(
                    "Value '{}' is not allowed for parameter '{}' of tool '{}'",
                    s, arg_name, definition.name
                ));
            }
        }

        Ok(())
    }
}

//! Tool domain traits
//!
//! Pure validation logic run before any tool dispatch. Validating against
//! the parameter schema up front turns would-be dispatch faults into typed
//! bad-arguments results.

use super::entities::{ParamKind, ToolCall, ToolDefinition};

/// Validator for tool calls
pub trait ToolValidator {
    /// Validate a tool call against its definition
    fn validate(&self, call: &ToolCall, definition: &ToolDefinition) -> Result<(), String>;
}

/// Default implementation of ToolValidator
///
/// Checks required parameters, rejects unknown parameters, and checks that
/// each argument matches its declared [`ParamKind`].
#[derive(Debug, Clone, Default)]
pub struct DefaultToolValidator;

impl ToolValidator for DefaultToolValidator {
    fn validate(&self, call: &ToolCall, definition: &ToolDefinition) -> Result<(), String> {
        for param in &definition.parameters {
            if param.required && !call.has_arg(&param.name) {
                return Err(format!(
                    "Missing required parameter '{}' for tool '{}'",
                    param.name, definition.name
                ));
            }
        }

        for (arg_name, value) in &call.arguments {
            let Some(param) = definition.parameter(arg_name) else {
                return Err(format!(
                    "Unknown parameter '{}' for tool '{}'",
                    arg_name, definition.name
                ));
            };

            let matches_kind = match param.kind {
                ParamKind::String => !value.is_bool(),
                ParamKind::Bool => value.is_bool(),
            };
            if !matches_kind {
                return Err(format!(
                    "Parameter '{}' of tool '{}' expects a {} value",
                    arg_name,
                    definition.name,
                    param.kind.as_str()
                ));
            }
        }

        Ok(())
    }
}

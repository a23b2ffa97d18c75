//! Tool domain module
//!
//! The tool system is split into:
//! - `entities`: definitions, the static registry ([`entities::ToolSpec`]),
//!   and parsed calls
//! - `value_objects`: immutable results and errors
//! - `traits`: pure validation logic run before any dispatch

pub mod entities;
pub mod traits;
pub mod value_objects;

pub use entities::{ArgValue, ParamKind, ToolCall, ToolDefinition, ToolParameter, ToolSpec};
pub use traits::{DefaultToolValidator, ToolValidator};
pub use value_objects::{ToolError, ToolResult, ToolResultMetadata};

//! Agent domain module
//!
//! - `call_parser`: extracts tool invocations from model response text
//! - `tasks`: the user-visible work-item list

pub mod call_parser;
pub mod tasks;

//! Tool implementations for the assistant
//!
//! Concrete local-effect operations behind the executor port: subprocess
//! execution, file reads/writes/edits, and filesystem search. Each tool is
//! independent and returns a uniform [`devmate_domain::ToolResult`].

pub mod command;
pub mod file;
pub mod search;

mod executor;

pub use executor::LocalToolExecutor;

use devmate_domain::ToolSpec;

/// Create the default tool specification with all available tools.
///
/// Aliases cover the descriptive names models frequently substitute for
/// the canonical protocol names.
pub fn default_tool_spec() -> ToolSpec {
    ToolSpec::new()
        .register(command::bash_definition())
        .register(file::read_definition())
        .register(file::write_definition())
        .register(file::edit_definition())
        .register(search::glob_definition())
        .register(search::grep_definition())
        .register_aliases([
            ("shell", command::BASH),
            ("run_command", command::BASH),
            ("read_file", file::READ),
            ("write_file", file::WRITE),
            ("edit_file", file::EDIT),
            ("find_files", search::GLOB),
            ("glob_search", search::GLOB),
            ("search_content", search::GREP),
            ("grep_search", search::GREP),
        ])
}

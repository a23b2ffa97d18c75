//! File operation tools: read, write, edit

use devmate_domain::{
    ParamKind, ToolCall, ToolDefinition, ToolError, ToolParameter, ToolResult, ToolResultMetadata,
};
use std::fs;
use std::path::Path;
use std::time::Instant;

/// Tool name constants
pub const READ: &str = "read";
pub const WRITE: &str = "write";
pub const EDIT: &str = "edit";

/// Maximum file size to read (10 MB)
const MAX_READ_SIZE: u64 = 10 * 1024 * 1024;

/// Get the tool definition for read
pub fn read_definition() -> ToolDefinition {
    ToolDefinition::new(READ, "Read a file as numbered lines")
        .with_parameter(ToolParameter::new("file_path", "Path to the file to read", true))
        .with_parameter(ToolParameter::new(
            "offset",
            "Line number to start reading from (0-indexed)",
            false,
        ))
        .with_parameter(ToolParameter::new(
            "limit",
            "Maximum number of lines to read",
            false,
        ))
}

/// Get the tool definition for write
pub fn write_definition() -> ToolDefinition {
    ToolDefinition::new(
        WRITE,
        "Write content to a file, creating it (and missing parent directories) or overwriting it",
    )
    .with_parameter(ToolParameter::new("file_path", "Path to the file to write", true))
    .with_parameter(ToolParameter::new("content", "Content to write", true))
}

/// Get the tool definition for edit
pub fn edit_definition() -> ToolDefinition {
    ToolDefinition::new(
        EDIT,
        "Edit a file by replacing exact text. Default mode requires old_string to occur exactly once",
    )
    .with_parameter(ToolParameter::new("file_path", "Path to the file to edit", true))
    .with_parameter(ToolParameter::new("old_string", "Exact text to replace", true))
    .with_parameter(ToolParameter::new("new_string", "Replacement text", true))
    .with_parameter(
        ToolParameter::new("replace_all", "Replace every occurrence", false)
            .with_kind(ParamKind::Bool),
    )
}

/// Execute the read tool.
///
/// Output is `cat -n` style: 1-based line numbers, right-aligned to six
/// columns, tab-separated from the content.
pub fn execute_read(call: &ToolCall) -> ToolResult {
    let path_str = match call.require_str("file_path") {
        Ok(p) => p,
        Err(e) => return ToolResult::failure(READ, ToolError::bad_arguments(e)),
    };
    let offset = match call.get_usize("offset") {
        Ok(o) => o.unwrap_or(0),
        Err(e) => return ToolResult::failure(READ, ToolError::bad_arguments(e)),
    };
    let limit = match call.get_usize("limit") {
        Ok(l) => l,
        Err(e) => return ToolResult::failure(READ, ToolError::bad_arguments(e)),
    };

    let path = Path::new(path_str);
    if !path.exists() {
        return ToolResult::failure(READ, ToolError::not_found(path_str));
    }
    if !path.is_file() {
        return ToolResult::failure(
            READ,
            ToolError::bad_arguments(format!("'{}' is not a file", path_str)),
        );
    }

    match fs::metadata(path) {
        Ok(m) if m.len() > MAX_READ_SIZE => {
            return ToolResult::failure(
                READ,
                ToolError::bad_arguments(format!(
                    "File too large ({} bytes). Maximum size is {} bytes",
                    m.len(),
                    MAX_READ_SIZE
                )),
            );
        }
        Ok(_) => {}
        Err(e) => {
            return ToolResult::failure(
                READ,
                ToolError::io(format!("Failed to stat file: {}", e)),
            );
        }
    }

    let content = match fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            return ToolResult::failure(READ, ToolError::io(format!("Failed to read file: {}", e)))
        }
    };

    let lines: Vec<&str> = content.lines().collect();
    let window: Vec<&str> = match limit {
        Some(l) => lines.iter().skip(offset).take(l).copied().collect(),
        None => lines.iter().skip(offset).copied().collect(),
    };

    let numbered = window
        .iter()
        .enumerate()
        .map(|(i, line)| format!("{:6}\t{}", i + 1 + offset, line))
        .collect::<Vec<_>>()
        .join("\n");

    ToolResult::success(READ, numbered)
}

/// Execute the write tool
pub fn execute_write(call: &ToolCall) -> ToolResult {
    let start = Instant::now();

    let path_str = match call.require_str("file_path") {
        Ok(p) => p,
        Err(e) => return ToolResult::failure(WRITE, ToolError::bad_arguments(e)),
    };
    let content = match call.require_str("content") {
        Ok(c) => c,
        Err(e) => return ToolResult::failure(WRITE, ToolError::bad_arguments(e)),
    };

    let path = Path::new(path_str);
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
        && let Err(e) = fs::create_dir_all(parent)
    {
        return ToolResult::failure(
            WRITE,
            ToolError::io(format!("Failed to create parent directories: {}", e)),
        );
    }

    if let Err(e) = fs::write(path, content) {
        return ToolResult::failure(WRITE, ToolError::io(format!("Failed to write file: {}", e)));
    }

    ToolResult::success(WRITE, format!("Wrote file: {}", path_str)).with_metadata(
        ToolResultMetadata {
            duration_ms: Some(start.elapsed().as_millis() as u64),
            ..Default::default()
        },
    )
}

/// Execute the edit tool.
///
/// Default mode requires `old_string` to occur exactly once; `replace_all`
/// replaces every occurrence.
pub fn execute_edit(call: &ToolCall) -> ToolResult {
    let path_str = match call.require_str("file_path") {
        Ok(p) => p,
        Err(e) => return ToolResult::failure(EDIT, ToolError::bad_arguments(e)),
    };
    let old_string = match call.require_str("old_string") {
        Ok(s) => s,
        Err(e) => return ToolResult::failure(EDIT, ToolError::bad_arguments(e)),
    };
    let new_string = match call.require_str("new_string") {
        Ok(s) => s,
        Err(e) => return ToolResult::failure(EDIT, ToolError::bad_arguments(e)),
    };
    let replace_all = call.get_bool("replace_all").unwrap_or(false);

    if old_string.is_empty() {
        return ToolResult::failure(EDIT, ToolError::bad_arguments("old_string must not be empty"));
    }

    let path = Path::new(path_str);
    if !path.exists() {
        return ToolResult::failure(EDIT, ToolError::not_found(path_str));
    }

    let content = match fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            return ToolResult::failure(EDIT, ToolError::io(format!("Failed to read file: {}", e)))
        }
    };

    let new_content = if replace_all {
        let count = content.matches(old_string).count();
        if count == 0 {
            return ToolResult::failure(
                EDIT,
                ToolError::no_match("old_string not found in the file"),
            );
        }
        content.replace(old_string, new_string)
    } else {
        match content.matches(old_string).count() {
            0 => {
                return ToolResult::failure(
                    EDIT,
                    ToolError::no_match("old_string not found in the file"),
                )
            }
            1 => content.replacen(old_string, new_string, 1),
            n => return ToolResult::failure(EDIT, ToolError::ambiguous_match(n)),
        }
    };

    if let Err(e) = fs::write(path, new_content) {
        return ToolResult::failure(EDIT, ToolError::io(format!("Failed to write file: {}", e)));
    }

    ToolResult::success(EDIT, format!("Edited file: {}", path_str))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;
    use tempfile::{tempdir, NamedTempFile};

    #[test]
    fn test_read_numbers_lines_from_one() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "alpha\nbeta").unwrap();
        let path = temp_file.path().to_str().unwrap();

        let call = ToolCall::new(READ).with_arg("file_path", path);
        let result = execute_read(&call);

        assert!(result.is_success());
        assert!(result.output.contains("1\talpha"));
        assert!(result.output.contains("2\tbeta"));
    }

    #[test]
    fn test_read_not_found() {
        let call = ToolCall::new(READ).with_arg("file_path", "/nonexistent/file.txt");
        let result = execute_read(&call);

        assert!(!result.is_success());
        assert_eq!(result.error().unwrap().code, "NOT_FOUND");
    }

    #[test]
    fn test_read_with_offset_and_limit() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "line1\nline2\nline3\nline4\nline5").unwrap();
        let path = temp_file.path().to_str().unwrap();

        let call = ToolCall::new(READ)
            .with_arg("file_path", path)
            .with_arg("offset", "1")
            .with_arg("limit", "2");
        let result = execute_read(&call);

        assert!(result.is_success());
        assert!(result.output.contains("2\tline2"));
        assert!(result.output.contains("3\tline3"));
        assert!(!result.output.contains("line1"));
        assert!(!result.output.contains("line4"));
    }

    #[test]
    fn test_read_non_numeric_offset_is_bad_arguments() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "content").unwrap();
        let path = temp_file.path().to_str().unwrap();

        let call = ToolCall::new(READ)
            .with_arg("file_path", path)
            .with_arg("offset", "soon");
        let result = execute_read(&call);

        assert!(!result.is_success());
        assert_eq!(result.error().unwrap().code, "BAD_ARGUMENTS");
    }

    #[test]
    fn test_write_creates_parent_directories() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("nested").join("deep").join("test.txt");
        let path_str = path.to_str().unwrap();

        let call = ToolCall::new(WRITE)
            .with_arg("file_path", path_str)
            .with_arg("content", "hello");
        let result = execute_write(&call);

        assert!(result.is_success());
        assert_eq!(fs::read_to_string(&path).unwrap(), "hello");
    }

    #[test]
    fn test_write_overwrites() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("test.txt");
        fs::write(&path, "old").unwrap();

        let call = ToolCall::new(WRITE)
            .with_arg("file_path", path.to_str().unwrap())
            .with_arg("content", "new");
        let result = execute_write(&call);

        assert!(result.is_success());
        assert_eq!(fs::read_to_string(&path).unwrap(), "new");
    }

    #[test]
    fn test_edit_unique_match_replaces_once() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("a.txt");
        fs::write(&path, "Test content").unwrap();

        let call = ToolCall::new(EDIT)
            .with_arg("file_path", path.to_str().unwrap())
            .with_arg("old_string", "Test")
            .with_arg("new_string", "Modified");
        let result = execute_edit(&call);

        assert!(result.is_success());
        assert_eq!(fs::read_to_string(&path).unwrap(), "Modified content");
    }

    #[test]
    fn test_edit_zero_matches_is_no_match() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("a.txt");
        fs::write(&path, "Test content").unwrap();

        let call = ToolCall::new(EDIT)
            .with_arg("file_path", path.to_str().unwrap())
            .with_arg("old_string", "absent")
            .with_arg("new_string", "x");
        let result = execute_edit(&call);

        assert!(!result.is_success());
        assert_eq!(result.error().unwrap().code, "NO_MATCH");
        assert!(result.error().unwrap().message.contains("not found"));
    }

    #[test]
    fn test_edit_multiple_matches_is_ambiguous() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("a.txt");
        fs::write(&path, "x y x").unwrap();

        let call = ToolCall::new(EDIT)
            .with_arg("file_path", path.to_str().unwrap())
            .with_arg("old_string", "x")
            .with_arg("new_string", "z");
        let result = execute_edit(&call);

        assert!(!result.is_success());
        let error = result.error().unwrap();
        assert_eq!(error.code, "AMBIGUOUS_MATCH");
        assert!(error.message.contains("2 times"));
        // File untouched
        assert_eq!(fs::read_to_string(&path).unwrap(), "x y x");
    }

    #[test]
    fn test_edit_replace_all() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("a.txt");
        fs::write(&path, "x y x y x").unwrap();

        let call = ToolCall::new(EDIT)
            .with_arg("file_path", path.to_str().unwrap())
            .with_arg("old_string", "x")
            .with_arg("new_string", "z")
            .with_arg("replace_all", true);
        let result = execute_edit(&call);

        assert!(result.is_success());
        assert_eq!(fs::read_to_string(&path).unwrap(), "z y z y z");
    }

    #[test]
    fn test_edit_missing_file_is_not_found() {
        let call = ToolCall::new(EDIT)
            .with_arg("file_path", "/nonexistent/a.txt")
            .with_arg("old_string", "x")
            .with_arg("new_string", "y");
        let result = execute_edit(&call);

        assert!(!result.is_success());
        assert_eq!(result.error().unwrap().code, "NOT_FOUND");
    }
}

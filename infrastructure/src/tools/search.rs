//! Search tools: glob, grep

use devmate_domain::{
    ParamKind, ToolCall, ToolDefinition, ToolError, ToolParameter, ToolResult, ToolResultMetadata,
};
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Instant, SystemTime};

/// Tool name constants
pub const GLOB: &str = "glob";
pub const GREP: &str = "grep";

/// Maximum number of result entries either search returns
const MAX_RESULTS: usize = 100;

/// Maximum file size grep will scan (5 MB)
const MAX_GREP_FILE_SIZE: u64 = 5 * 1024 * 1024;

/// Directory names excluded from every search: VCS metadata, dependency
/// caches, and build output.
const IGNORED_DIRS: &[&str] = &[
    ".git",
    "__pycache__",
    "node_modules",
    "storage",
    "vendor",
    ".next",
    "dist",
    "build",
    "target",
];

/// Get the tool definition for glob
pub fn glob_definition() -> ToolDefinition {
    ToolDefinition::new(
        GLOB,
        "Find files by glob pattern, newest first (e.g. '**/*.php', 'src/*.rs')",
    )
    .with_parameter(ToolParameter::new("pattern", "Glob pattern to match files", true))
    .with_parameter(ToolParameter::new(
        "path",
        "Base directory to search from (default: current dir)",
        false,
    ))
}

/// Get the tool definition for grep
pub fn grep_definition() -> ToolDefinition {
    ToolDefinition::new(GREP, "Search file contents with a regex")
        .with_parameter(ToolParameter::new("pattern", "Regex pattern to search for", true))
        .with_parameter(ToolParameter::new(
            "path",
            "Directory or file to search in (default: current dir)",
            false,
        ))
        .with_parameter(ToolParameter::new(
            "glob_pattern",
            "Glob filter for files to scan (default: '*')",
            false,
        ))
        .with_parameter(ToolParameter::new(
            "output_mode",
            "files_with_matches (default) or content",
            false,
        ))
        .with_parameter(
            ToolParameter::new("case_insensitive", "Perform case-insensitive search", false)
                .with_kind(ParamKind::Bool),
        )
        .with_parameter(ToolParameter::new(
            "context_lines",
            "Lines of context around each match (content mode)",
            false,
        ))
}

/// True when any path component is an ignored directory
fn is_ignored(path: &Path) -> bool {
    let in_ignored_component = path.components().any(|c| {
        c.as_os_str()
            .to_str()
            .map(|name| IGNORED_DIRS.contains(&name))
            .unwrap_or(false)
    });
    in_ignored_component || path.to_string_lossy().contains("bootstrap/cache")
}

fn modified_time(path: &Path) -> SystemTime {
    fs::metadata(path)
        .and_then(|m| m.modified())
        .unwrap_or(SystemTime::UNIX_EPOCH)
}

/// Execute the glob tool.
///
/// Matches are sorted by modification time, newest first, and capped at
/// 100 entries.
pub fn execute_glob(call: &ToolCall) -> ToolResult {
    let start = Instant::now();

    let pattern = match call.require_str("pattern") {
        Ok(p) => p,
        Err(e) => return ToolResult::failure(GLOB, ToolError::bad_arguments(e)),
    };
    let base_dir = call.get_str("path").unwrap_or(".");

    let full_pattern = if pattern.starts_with('/') || pattern.starts_with("./") {
        pattern.to_string()
    } else {
        format!("{}/{}", base_dir.trim_end_matches('/'), pattern)
    };

    let entries = match glob::glob(&full_pattern) {
        Ok(paths) => paths,
        Err(e) => {
            return ToolResult::failure(
                GLOB,
                ToolError::bad_arguments(format!("Invalid glob pattern: {}", e)),
            )
        }
    };

    let mut matches: Vec<(PathBuf, SystemTime)> = entries
        .flatten()
        .filter(|p| !is_ignored(p))
        .map(|p| {
            let mtime = modified_time(&p);
            (p, mtime)
        })
        .collect();

    matches.sort_by(|a, b| b.1.cmp(&a.1));

    let total = matches.len();
    let listed: Vec<String> = matches
        .into_iter()
        .take(MAX_RESULTS)
        .map(|(p, _)| p.display().to_string())
        .collect();

    let mut output = listed.join("\n");
    if total > MAX_RESULTS {
        output.push_str(&format!("\n... (limited to {} results)", MAX_RESULTS));
    }
    if output.is_empty() {
        output = "No files found matching the pattern".to_string();
    }

    ToolResult::success(GLOB, output).with_metadata(ToolResultMetadata {
        duration_ms: Some(start.elapsed().as_millis() as u64),
        match_count: Some(total.min(MAX_RESULTS)),
        ..Default::default()
    })
}

/// Execute the grep tool.
///
/// Recursively scans files selected by `glob_pattern` under `path`,
/// skipping unreadable files silently. `files_with_matches` lists matching
/// paths; `content` emits `file:line:` entries with optional context.
/// Zero matches is a success carrying an explicit message.
pub fn execute_grep(call: &ToolCall) -> ToolResult {
    let start = Instant::now();

    let pattern_str = match call.require_str("pattern") {
        Ok(p) => p,
        Err(e) => return ToolResult::failure(GREP, ToolError::bad_arguments(e)),
    };
    let path_str = call.get_str("path").unwrap_or(".");
    let glob_pattern = call.get_str("glob_pattern").unwrap_or("*");
    let output_mode = call.get_str("output_mode").unwrap_or("files_with_matches");
    let case_insensitive = call.get_bool("case_insensitive").unwrap_or(false);
    let context_lines = match call.get_usize("context_lines") {
        Ok(n) => n.unwrap_or(0),
        Err(e) => return ToolResult::failure(GREP, ToolError::bad_arguments(e)),
    };

    if output_mode != "files_with_matches" && output_mode != "content" {
        return ToolResult::failure(
            GREP,
            ToolError::bad_arguments(format!(
                "output_mode must be 'files_with_matches' or 'content', got '{}'",
                output_mode
            )),
        );
    }

    let regex_pattern = if case_insensitive {
        format!("(?i){}", pattern_str)
    } else {
        pattern_str.to_string()
    };
    let regex = match Regex::new(&regex_pattern) {
        Ok(r) => r,
        Err(e) => {
            return ToolResult::failure(
                GREP,
                ToolError::bad_arguments(format!("Invalid regex pattern: {}", e)),
            )
        }
    };

    let root = Path::new(path_str);
    let files = if root.is_file() {
        vec![root.to_path_buf()]
    } else {
        collect_files(root, glob_pattern)
    };

    let mut entries = Vec::new();
    let mut total_matches = 0usize;

    'files: for file_path in files {
        if entries.len() >= MAX_RESULTS {
            break;
        }

        if let Ok(metadata) = fs::metadata(&file_path)
            && metadata.len() > MAX_GREP_FILE_SIZE
        {
            continue;
        }

        // Unreadable or non-UTF-8 files are skipped silently
        let Ok(content) = fs::read_to_string(&file_path) else {
            continue;
        };
        let file_display = file_path.display().to_string();

        if output_mode == "files_with_matches" {
            if regex.is_match(&content) {
                total_matches += 1;
                entries.push(file_display);
            }
            continue;
        }

        let lines: Vec<&str> = content.lines().collect();
        for (idx, line) in lines.iter().enumerate() {
            if !regex.is_match(line) {
                continue;
            }
            total_matches += 1;

            if context_lines > 0 {
                let from = idx.saturating_sub(context_lines);
                let to = (idx + context_lines + 1).min(lines.len());
                entries.push(format!(
                    "{}:{}:\n{}",
                    file_display,
                    idx + 1,
                    lines[from..to].join("\n")
                ));
            } else {
                entries.push(format!("{}:{}: {}", file_display, idx + 1, line));
            }

            if entries.len() >= MAX_RESULTS {
                continue 'files;
            }
        }
    }

    let mut output = entries.join("\n");
    if entries.len() >= MAX_RESULTS {
        output.push_str(&format!("\n... (limited to {} entries)", MAX_RESULTS));
    }
    if output.is_empty() {
        output = "No matches found".to_string();
    }

    ToolResult::success(GREP, output).with_metadata(ToolResultMetadata {
        duration_ms: Some(start.elapsed().as_millis() as u64),
        match_count: Some(total_matches),
        ..Default::default()
    })
}

/// Collect candidate files under a directory, recursively, filtered by a
/// glob pattern and the ignore set.
fn collect_files(dir: &Path, glob_pattern: &str) -> Vec<PathBuf> {
    let full_pattern = format!("{}/**/{}", dir.display(), glob_pattern);

    let Ok(paths) = glob::glob(&full_pattern) else {
        return Vec::new();
    };

    paths
        .flatten()
        .filter(|p| p.is_file() && !is_ignored(p))
        .take(10_000)
        .collect()
}

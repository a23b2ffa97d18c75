//! Tool-call extraction from model responses.
//!
//! The assistant requests local operations by writing
//! `TOOL:name(key="value", key2=true)` inline in its prose. This module
//! extracts those invocations as [`ToolCall`] values, in order of
//! appearance, without ever failing: malformed fragments are dropped.
//!
//! The system prompt teaches the protocol with worked examples inside code
//! fences and tables. Those regions are stripped before scanning so the
//! examples never execute.
//!
//! Invocation boundaries are found with a quote-aware depth-balancing scan
//! rather than a regular expression: quoted argument values may contain
//! literal parentheses, commas, and newlines, none of which may terminate
//! the argument list early.

use crate::tool::entities::{ArgValue, ToolCall};

/// Extract all tool invocations from a block of response text.
///
/// Returns calls in order of appearance. Invocations that appear inside
/// fenced code blocks, inline code spans, or markdown tables are ignored.
/// An invocation whose parentheses never balance is discarded silently.
pub fn parse_tool_calls(text: &str) -> Vec<ToolCall> {
    let stripped = strip_code_fences(text);
    let stripped = strip_inline_code(&stripped);
    let stripped = strip_table_regions(&stripped);

    let mut calls = Vec::new();

    for (start, _) in stripped.match_indices("TOOL:") {
        let after_marker = &stripped[start + "TOOL:".len()..];

        let name_len = after_marker
            .chars()
            .take_while(|c| c.is_ascii_alphanumeric() || *c == '_')
            .map(|c| c.len_utf8())
            .sum::<usize>();
        if name_len == 0 {
            continue;
        }
        let name = &after_marker[..name_len];

        let rest = &after_marker[name_len..];
        if !rest.starts_with('(') {
            continue;
        }

        let body = &rest[1..];
        let Some(close) = find_balanced_close(body) else {
            // Never balanced before end-of-text: drop the fragment.
            continue;
        };

        let arguments = parse_arguments(&body[..close]);
        let mut call = ToolCall::new(name);
        call.arguments = arguments;
        calls.push(call);
    }

    calls
}

/// Locate the closing parenthesis of an argument list.
///
/// Depth starts at 1 (the opening parenthesis has been consumed). Quoted
/// spans are tracked so parentheses inside string values never move the
/// depth; backslash escapes a quote character. Returns the byte offset of
/// the balancing `)`, or None if the text ends first.
fn find_balanced_close(body: &str) -> Option<usize> {
    let mut depth = 1usize;
    let mut in_quote: Option<char> = None;
    let mut escaped = false;

    for (i, ch) in body.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match ch {
            '\\' => escaped = true,
            '"' | '\'' => match in_quote {
                Some(q) if q == ch => in_quote = None,
                None => in_quote = Some(ch),
                _ => {}
            },
            '(' if in_quote.is_none() => depth += 1,
            ')' if in_quote.is_none() => {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
    }

    None
}

/// Tokenize a `key=value, key=value` argument list.
///
/// Values are either quoted strings (single or double, with `\"`, `\'` and
/// `\n` escapes) or bare tokens read up to the next unescaped comma. Bare
/// `true`/`false` coerce to booleans; quoted values always stay strings.
/// Malformed pairs are skipped, not errors.
fn parse_arguments(args_str: &str) -> Vec<(String, ArgValue)> {
    let mut arguments = Vec::new();
    let chars: Vec<char> = args_str.chars().collect();
    let mut pos = 0;

    while pos < chars.len() {
        // Skip separators and whitespace between pairs
        while pos < chars.len() && (chars[pos].is_whitespace() || chars[pos] == ',') {
            pos += 1;
        }
        if pos >= chars.len() {
            break;
        }

        // Key: identifier characters
        let key_start = pos;
        while pos < chars.len() && (chars[pos].is_ascii_alphanumeric() || chars[pos] == '_') {
            pos += 1;
        }
        if pos == key_start {
            // Not a key; resynchronize at the next separator
            pos = skip_to_separator(&chars, pos);
            continue;
        }
        let key: String = chars[key_start..pos].iter().collect();

        while pos < chars.len() && chars[pos].is_whitespace() {
            pos += 1;
        }
        if pos >= chars.len() || chars[pos] != '=' {
            pos = skip_to_separator(&chars, pos);
            continue;
        }
        pos += 1;
        while pos < chars.len() && chars[pos].is_whitespace() {
            pos += 1;
        }

        let value = if pos < chars.len() && (chars[pos] == '"' || chars[pos] == '\'') {
            let quote = chars[pos];
            pos += 1;
            match read_quoted(&chars, &mut pos, quote) {
                Some(text) => ArgValue::Str(text),
                // Unterminated quote: the remainder is malformed
                None => break,
            }
        } else {
            let token = read_bare_token(&chars, &mut pos);
            match token.to_ascii_lowercase().as_str() {
                "true" => ArgValue::Bool(true),
                "false" => ArgValue::Bool(false),
                _ => ArgValue::Str(token),
            }
        };

        arguments.push((key, value));
    }

    arguments
}

/// Read a quoted string starting just after the opening quote, decoding
/// `\"`, `\'` and `\n` escapes. Advances `pos` past the closing quote.
/// Returns None if the quote never closes.
fn read_quoted(chars: &[char], pos: &mut usize, quote: char) -> Option<String> {
    let mut out = String::new();

    while *pos < chars.len() {
        let ch = chars[*pos];
        if ch == '\\' && *pos + 1 < chars.len() {
            let next = chars[*pos + 1];
            match next {
                '"' | '\'' => out.push(next),
                'n' => out.push('\n'),
                _ => {
                    out.push('\\');
                    out.push(next);
                }
            }
            *pos += 2;
        } else if ch == quote {
            *pos += 1;
            return Some(out);
        } else {
            out.push(ch);
            *pos += 1;
        }
    }

    None
}

/// Read a bare token up to the next unescaped comma (or end of input).
fn read_bare_token(chars: &[char], pos: &mut usize) -> String {
    let mut out = String::new();

    while *pos < chars.len() {
        let ch = chars[*pos];
        if ch == '\\' && *pos + 1 < chars.len() {
            out.push(chars[*pos + 1]);
            *pos += 2;
        } else if ch == ',' {
            break;
        } else {
            out.push(ch);
            *pos += 1;
        }
    }

    out.trim().to_string()
}

fn skip_to_separator(chars: &[char], mut pos: usize) -> usize {
    while pos < chars.len() && chars[pos] != ',' {
        pos += 1;
    }
    pos
}

/// Remove fenced ``` code blocks. Unpaired trailing fences are left as-is.
fn strip_code_fences(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(open) = rest.find("```") {
        let after_open = &rest[open + 3..];
        match after_open.find("```") {
            Some(close) => {
                out.push_str(&rest[..open]);
                rest = &after_open[close + 3..];
            }
            None => break,
        }
    }
    out.push_str(rest);
    out
}

/// Remove inline `code` spans. Unpaired backticks are left as-is.
fn strip_inline_code(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(open) = rest.find('`') {
        let after_open = &rest[open + 1..];
        match after_open.find('`') {
            Some(close) => {
                out.push_str(&rest[..open]);
                rest = &after_open[close + 1..];
            }
            None => break,
        }
    }
    out.push_str(rest);
    out
}

/// Drop markdown table regions: lines containing a pipe or a heavy rule
/// character, plus hyphen-led separator lines while inside a table.
fn strip_table_regions(text: &str) -> String {
    let mut kept = Vec::new();
    let mut in_table = false;

    for line in text.lines() {
        if line.contains('|')
            || line.contains('━')
            || (in_table && line.trim_start().starts_with('-'))
        {
            in_table = true;
            continue;
        } else if in_table {
            in_table = false;
        }
        kept.push(line);
    }

    kept.join("\n")
}

//! Multi-statement SQL splitter
//!
//! Splits a script on semicolons while respecting string literals,
//! quoted identifiers, and comments. This deliberately knows nothing
//! about SQL grammar beyond quoting and comment syntax.

/// Split a multi-statement SQL string into individual statements.
///
/// A single left-to-right scan tracks four mutually exclusive modes:
/// inside a single-quoted string, inside a double-quoted identifier,
/// inside a line comment, inside a block comment. Doubled quote
/// characters stay inside the literal/identifier. A semicolon is a
/// statement boundary only when no mode is active.
///
/// Emitted statements are trimmed and preserve script order. Segments
/// containing only whitespace and comments emit nothing, and comments
/// preceding a statement's first content character are not part of the
/// emitted statement:
///
/// ```
/// use sqlens_query::split_statements;
///
/// let stmts = split_statements("SELECT 1; -- c ; still c\nSELECT 2;");
/// assert_eq!(stmts, vec!["SELECT 1", "SELECT 2"]);
/// ```
pub fn split_statements(sql: &str) -> Vec<String> {
    let mut statements = Vec::new();
    let mut current = String::new();
    // Set once the current segment has seen a non-comment, non-whitespace
    // character; leading comments and whitespace are dropped until then.
    let mut has_content = false;
    let mut in_single = false;
    let mut in_double = false;
    let mut in_line_comment = false;
    let mut in_block_comment = false;

    let chars: Vec<char> = sql.chars().collect();
    let len = chars.len();
    let mut i = 0;

    while i < len {
        let c = chars[i];
        let next = if i + 1 < len { Some(chars[i + 1]) } else { None };

        if in_line_comment {
            if has_content {
                current.push(c);
            }
            if c == '\n' {
                in_line_comment = false;
            }
            i += 1;
            continue;
        }

        if in_block_comment {
            if c == '*' && next == Some('/') {
                if has_content {
                    current.push_str("*/");
                }
                in_block_comment = false;
                i += 2;
                continue;
            }
            if has_content {
                current.push(c);
            }
            i += 1;
            continue;
        }

        if in_single {
            current.push(c);
            if c == '\'' {
                if next == Some('\'') {
                    current.push('\'');
                    i += 2;
                    continue;
                }
                in_single = false;
            }
            i += 1;
            continue;
        }

        if in_double {
            current.push(c);
            if c == '"' {
                if next == Some('"') {
                    current.push('"');
                    i += 2;
                    continue;
                }
                in_double = false;
            }
            i += 1;
            continue;
        }

        // No mode active
        match c {
            '-' if next == Some('-') => {
                in_line_comment = true;
                if has_content {
                    current.push_str("--");
                }
                i += 2;
            }
            '/' if next == Some('*') => {
                in_block_comment = true;
                if has_content {
                    current.push_str("/*");
                }
                i += 2;
            }
            '\'' => {
                in_single = true;
                has_content = true;
                current.push(c);
                i += 1;
            }
            '"' => {
                in_double = true;
                has_content = true;
                current.push(c);
                i += 1;
            }
            ';' => {
                if has_content {
                    let trimmed = current.trim();
                    if !trimmed.is_empty() {
                        statements.push(trimmed.to_string());
                    }
                }
                current.clear();
                has_content = false;
                i += 1;
            }
            c if c.is_whitespace() => {
                if has_content {
                    current.push(c);
                }
                i += 1;
            }
            _ => {
                has_content = true;
                current.push(c);
                i += 1;
            }
        }
    }

    // Trailing text after the last boundary forms a final statement
    if has_content {
        let trimmed = current.trim();
        if !trimmed.is_empty() {
            statements.push(trimmed.to_string());
        }
    }

    statements
}

//! Lexical index advisor.
//!
//! Suggests candidate indexes from the text of a SELECT statement alone,
//! without a parser or a live connection. The analysis is deliberately
//! shallow: strings and comments are blanked out, table references are
//! collected from FROM/JOIN clauses, and columns are harvested from
//! WHERE conditions, join ON equalities, ORDER BY and GROUP BY lists.
//! Qualified columns resolve through table aliases; bare columns are
//! attributed to the first table in the statement.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

static STRING_LITERAL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"'(?:[^']|'')*'").expect("valid regex"));

static LINE_COMMENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"--[^\n]*").expect("valid regex"));

static BLOCK_COMMENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)/\*.*?\*/").expect("valid regex"));

static TABLE_REF_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(?:from|join)\s+([a-zA-Z_][a-zA-Z0-9_.]*)(?:\s+(?:as\s+)?([a-zA-Z_][a-zA-Z0-9_]*))?",
    )
    .expect("valid regex")
});

static WHERE_CLAUSE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)\bwhere\b(.*?)(?:\bgroup\s+by\b|\border\s+by\b|\bhaving\b|\blimit\b|\bunion\b|$)")
        .expect("valid regex")
});

static CONDITION_COLUMN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)(?:\b([a-zA-Z_][a-zA-Z0-9_]*)\.)?\b([a-zA-Z_][a-zA-Z0-9_]*)\s*(?:=|<>|!=|>=|<=|>|<|\bLIKE\b|\bBETWEEN\b|\bIN\s*\(|\bIS\b)",
    )
    .expect("valid regex")
});

static JOIN_ON_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\bon\s+([a-zA-Z_][a-zA-Z0-9_.]*)\s*=\s*([a-zA-Z_][a-zA-Z0-9_.]*)")
        .expect("valid regex")
});

static ORDER_BY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)\border\s+by\b(.*?)(?:\blimit\b|\boffset\b|\bfetch\b|\bunion\b|$)")
        .expect("valid regex")
});

static GROUP_BY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)\bgroup\s+by\b(.*?)(?:\border\s+by\b|\bhaving\b|\blimit\b|\bunion\b|$)")
        .expect("valid regex")
});

static COLUMN_ITEM_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:([a-zA-Z_][a-zA-Z0-9_]*)\.)?([a-zA-Z_][a-zA-Z0-9_]*)$")
        .expect("valid regex")
});

/// Keywords that must not be mistaken for a table alias or a condition
/// column.
const RESERVED: &[&str] = &[
    "select", "from", "where", "join", "inner", "left", "right", "full", "outer", "cross",
    "natural", "on", "using", "group", "order", "by", "having", "limit", "offset", "union",
    "and", "or", "not", "as", "in", "is", "null", "like", "between", "exists", "case", "when",
    "then", "else", "end", "asc", "desc", "distinct", "values", "set",
];

/// Why a candidate index was proposed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndexReason {
    /// Columns appear in WHERE conditions.
    Filter,
    /// Columns appear in a join's ON equality.
    Join,
    /// Columns appear in ORDER BY.
    Sort,
    /// Columns appear in GROUP BY.
    Group,
}

impl IndexReason {
    pub fn description(&self) -> &'static str {
        match self {
            IndexReason::Filter => "used to filter rows",
            IndexReason::Join => "used as a join key",
            IndexReason::Sort => "used to order results",
            IndexReason::Group => "used to group results",
        }
    }
}

/// A suggested index: a table plus an ordered column list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexCandidate {
    pub table: String,
    pub columns: Vec<String>,
    pub reason: IndexReason,
}

impl IndexCandidate {
    /// Renders the candidate as a CREATE INDEX statement sketch.
    pub fn ddl_sketch(&self) -> String {
        format!(
            "CREATE INDEX idx_{}_{} ON {} ({})",
            self.table,
            self.columns.join("_"),
            self.table,
            self.columns.join(", ")
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct TableRef {
    name: String,
    alias: Option<String>,
}

/// Scans SELECT text for columns worth indexing.
#[derive(Debug, Clone, Copy, Default)]
pub struct IndexAdvisor;

impl IndexAdvisor {
    pub fn new() -> Self {
        Self
    }

    /// Returns candidates in discovery order: filter columns first, then
    /// join keys, then sort and group columns. Duplicate table/column
    /// combinations keep their first reason.
    pub fn advise(&self, sql: &str) -> Vec<IndexCandidate> {
        let masked = mask_literals(sql);
        let tables = collect_tables(&masked);
        if tables.is_empty() {
            return Vec::new();
        }

        let mut candidates = Vec::new();
        collect_filter_candidates(&masked, &tables, &mut candidates);
        collect_join_candidates(&masked, &tables, &mut candidates);
        collect_list_candidates(&ORDER_BY_RE, IndexReason::Sort, &masked, &tables, &mut candidates);
        collect_list_candidates(&GROUP_BY_RE, IndexReason::Group, &masked, &tables, &mut candidates);

        dedupe(candidates)
    }
}

/// Blanks out string literals and comments so their content cannot be
/// mistaken for identifiers. Replacement preserves nothing but absence.
fn mask_literals(sql: &str) -> String {
    let masked = STRING_LITERAL_RE.replace_all(sql, " ");
    let masked = LINE_COMMENT_RE.replace_all(&masked, " ");
    BLOCK_COMMENT_RE.replace_all(&masked, " ").into_owned()
}

fn collect_tables(sql: &str) -> Vec<TableRef> {
    let mut tables = Vec::new();
    for caps in TABLE_REF_RE.captures_iter(sql) {
        let name = match caps.get(1) {
            Some(m) => m.as_str().to_string(),
            None => continue,
        };
        if is_reserved(&name) {
            continue;
        }
        let alias = caps
            .get(2)
            .map(|m| m.as_str().to_string())
            .filter(|a| !is_reserved(a));
        if !tables.iter().any(|t: &TableRef| t.name == name) {
            tables.push(TableRef { name, alias });
        }
    }
    tables
}

fn is_reserved(word: &str) -> bool {
    let lower = word.to_lowercase();
    RESERVED.contains(&lower.as_str())
}

/// Maps an optional qualifier to a table name. A qualifier matches an
/// alias first, then a table name; anything else (and bare columns)
/// falls back to the first table.
fn resolve_table<'a>(qualifier: Option<&str>, tables: &'a [TableRef]) -> Option<&'a str> {
    if let Some(q) = qualifier {
        for table in tables {
            if table
                .alias
                .as_deref()
                .is_some_and(|a| a.eq_ignore_ascii_case(q))
            {
                return Some(&table.name);
            }
        }
        for table in tables {
            if table.name.eq_ignore_ascii_case(q) {
                return Some(&table.name);
            }
        }
    }
    tables.first().map(|t| t.name.as_str())
}

fn collect_filter_candidates(
    sql: &str,
    tables: &[TableRef],
    candidates: &mut Vec<IndexCandidate>,
) {
    let Some(caps) = WHERE_CLAUSE_RE.captures(sql) else {
        return;
    };
    let clause = caps.get(1).map_or("", |m| m.as_str());

    // Group filtered columns per table, keeping encounter order.
    let mut grouped: Vec<(String, Vec<String>)> = Vec::new();
    for caps in CONDITION_COLUMN_RE.captures_iter(clause) {
        let qualifier = caps.get(1).map(|m| m.as_str());
        let column = match caps.get(2) {
            Some(m) => m.as_str(),
            None => continue,
        };
        if is_reserved(column) {
            continue;
        }
        let Some(table) = resolve_table(qualifier, tables) else {
            continue;
        };
        push_grouped(&mut grouped, table, column);
    }

    for (table, columns) in grouped {
        candidates.push(IndexCandidate {
            table,
            columns,
            reason: IndexReason::Filter,
        });
    }
}

fn collect_join_candidates(sql: &str, tables: &[TableRef], candidates: &mut Vec<IndexCandidate>) {
    for caps in JOIN_ON_RE.captures_iter(sql) {
        for side in [1, 2] {
            let Some(expr) = caps.get(side) else {
                continue;
            };
            let (qualifier, column) = split_qualified(expr.as_str());
            if is_reserved(column) {
                continue;
            }
            let Some(table) = resolve_table(qualifier, tables) else {
                continue;
            };
            candidates.push(IndexCandidate {
                table: table.to_string(),
                columns: vec![column.to_string()],
                reason: IndexReason::Join,
            });
        }
    }
}

fn collect_list_candidates(
    clause_re: &Regex,
    reason: IndexReason,
    sql: &str,
    tables: &[TableRef],
    candidates: &mut Vec<IndexCandidate>,
) {
    let Some(caps) = clause_re.captures(sql) else {
        return;
    };
    let clause = caps.get(1).map_or("", |m| m.as_str());

    let mut grouped: Vec<(String, Vec<String>)> = Vec::new();
    for item in clause.split(',') {
        let item = strip_direction(item.trim());
        let Some(caps) = COLUMN_ITEM_RE.captures(item) else {
            continue;
        };
        let qualifier = caps.get(1).map(|m| m.as_str());
        let column = match caps.get(2) {
            Some(m) => m.as_str(),
            None => continue,
        };
        if is_reserved(column) {
            continue;
        }
        let Some(table) = resolve_table(qualifier, tables) else {
            continue;
        };
        push_grouped(&mut grouped, table, column);
    }

    for (table, columns) in grouped {
        candidates.push(IndexCandidate {
            table,
            columns,
            reason,
        });
    }
}

fn push_grouped(grouped: &mut Vec<(String, Vec<String>)>, table: &str, column: &str) {
    if let Some((_, columns)) = grouped.iter_mut().find(|(t, _)| t == table) {
        if !columns.iter().any(|c| c.eq_ignore_ascii_case(column)) {
            columns.push(column.to_string());
        }
    } else {
        grouped.push((table.to_string(), vec![column.to_string()]));
    }
}

fn split_qualified(expr: &str) -> (Option<&str>, &str) {
    match expr.split_once('.') {
        Some((qualifier, column)) => (Some(qualifier), column),
        None => (None, expr),
    }
}

/// Strips trailing sort modifiers from an ORDER BY item.
fn strip_direction(item: &str) -> &str {
    let mut item = item.trim();
    for suffix in ["nulls first", "nulls last", "asc", "desc"] {
        let lower = item.to_ascii_lowercase();
        if let Some(stripped) = lower.strip_suffix(suffix) {
            // Word boundary: "misc" must not lose its "asc".
            if stripped.ends_with(char::is_whitespace) {
                item = item[..stripped.len()].trim_end();
            }
        }
    }
    item
}

fn dedupe(candidates: Vec<IndexCandidate>) -> Vec<IndexCandidate> {
    let mut seen = HashSet::new();
    let mut result = Vec::new();
    for candidate in candidates {
        if candidate.columns.is_empty() {
            continue;
        }
        let key = format!(
            "{}:{}",
            candidate.table.to_lowercase(),
            candidate
                .columns
                .iter()
                .map(|c| c.to_lowercase())
                .collect::<Vec<_>>()
                .join(",")
        );
        if seen.insert(key) {
            result.push(candidate);
        }
    }
    result
}

#[cfg(test)]
mod tests;

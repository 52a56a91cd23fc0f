use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};
use sqlens_core::{QueryResult, Result, Row, SqlensError, Value};

/// Fate of a single row between the two result sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RowStatus {
    Added,
    Removed,
    Changed,
    Identical,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RowDiffEntry {
    pub status: RowStatus,
    /// Canonical text of the key cells this row was matched by. Empty
    /// for positional diffs.
    pub key_values: Vec<String>,
    pub source_row: Option<Row>,
    pub target_row: Option<Row>,
    /// Column ordinals whose cells differ; populated only for
    /// [`RowStatus::Changed`] entries. Keyed diffs never include the
    /// key ordinals here.
    pub changed_columns: BTreeSet<usize>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RowDiffSummary {
    pub entries: Vec<RowDiffEntry>,
}

impl RowDiffSummary {
    pub fn added(&self) -> usize {
        self.count(RowStatus::Added)
    }

    pub fn removed(&self) -> usize {
        self.count(RowStatus::Removed)
    }

    pub fn changed(&self) -> usize {
        self.count(RowStatus::Changed)
    }

    pub fn identical(&self) -> usize {
        self.count(RowStatus::Identical)
    }

    pub fn is_identical(&self) -> bool {
        self.entries
            .iter()
            .all(|e| e.status == RowStatus::Identical)
    }

    fn count(&self, status: RowStatus) -> usize {
        self.entries.iter().filter(|e| e.status == status).count()
    }
}

/// Cell equality over canonical representations: same type family, same
/// rendered text. NULL equals only NULL.
fn cells_equal(a: &Value, b: &Value) -> bool {
    if a.is_null() || b.is_null() {
        return a.is_null() && b.is_null();
    }
    a.type_name() == b.type_name() && a.repr() == b.repr()
}

/// Key ordinals are excluded: two rows matched by key are compared on
/// their non-key cells only.
fn changed_columns(source: &Row, target: &Row, key_columns: &[usize]) -> BTreeSet<usize> {
    let mut changed = BTreeSet::new();
    let shared = source.values.len().min(target.values.len());
    for idx in 0..shared {
        if key_columns.contains(&idx) {
            continue;
        }
        if !cells_equal(&source.values[idx], &target.values[idx]) {
            changed.insert(idx);
        }
    }
    // A length mismatch marks every unpaired ordinal as changed.
    let longest = source.values.len().max(target.values.len());
    for idx in shared..longest {
        if !key_columns.contains(&idx) {
            changed.insert(idx);
        }
    }
    changed
}

fn key_of(row: &Row, key_columns: &[usize]) -> Vec<String> {
    key_columns
        .iter()
        .map(|&idx| {
            row.values
                .get(idx)
                .map(|v| v.repr())
                .unwrap_or_else(|| "NULL".to_string())
        })
        .collect()
}

/// Diffs two row collections by the values of the given key columns.
///
/// Source rows appear first in their original order (removed, changed,
/// or identical), followed by target-only rows in target order.
/// Duplicate keys pair up first-come first-served: each target row is
/// consumed by at most one source row.
pub fn diff_rows_by_key(source: &[Row], target: &[Row], key_columns: &[usize]) -> RowDiffSummary {
    // Unconsumed target row indexes per key, in target order.
    let mut by_key: HashMap<Vec<String>, Vec<usize>> = HashMap::new();
    for (idx, row) in target.iter().enumerate() {
        by_key.entry(key_of(row, key_columns)).or_default().push(idx);
    }

    let mut consumed = vec![false; target.len()];
    let mut entries = Vec::new();

    for row in source {
        let key = key_of(row, key_columns);
        let matched = by_key.get_mut(&key).and_then(|indexes| {
            if indexes.is_empty() {
                None
            } else {
                Some(indexes.remove(0))
            }
        });
        match matched {
            Some(target_idx) => {
                consumed[target_idx] = true;
                let target_row = &target[target_idx];
                let changed = changed_columns(row, target_row, key_columns);
                entries.push(RowDiffEntry {
                    status: if changed.is_empty() {
                        RowStatus::Identical
                    } else {
                        RowStatus::Changed
                    },
                    key_values: key,
                    source_row: Some(row.clone()),
                    target_row: Some(target_row.clone()),
                    changed_columns: changed,
                });
            }
            None => entries.push(RowDiffEntry {
                status: RowStatus::Removed,
                key_values: key,
                source_row: Some(row.clone()),
                target_row: None,
                changed_columns: BTreeSet::new(),
            }),
        }
    }

    for (idx, row) in target.iter().enumerate() {
        if consumed[idx] {
            continue;
        }
        entries.push(RowDiffEntry {
            status: RowStatus::Added,
            key_values: key_of(row, key_columns),
            source_row: None,
            target_row: Some(row.clone()),
            changed_columns: BTreeSet::new(),
        });
    }

    RowDiffSummary { entries }
}

/// Diffs two row collections by position: row N of the source against
/// row N of the target. Extra trailing rows on either side become
/// removed or added entries.
pub fn diff_rows_positional(source: &[Row], target: &[Row]) -> RowDiffSummary {
    let mut entries = Vec::new();
    let shared = source.len().min(target.len());

    for idx in 0..shared {
        let changed = changed_columns(&source[idx], &target[idx], &[]);
        entries.push(RowDiffEntry {
            status: if changed.is_empty() {
                RowStatus::Identical
            } else {
                RowStatus::Changed
            },
            key_values: Vec::new(),
            source_row: Some(source[idx].clone()),
            target_row: Some(target[idx].clone()),
            changed_columns: changed,
        });
    }

    for row in &source[shared..] {
        entries.push(RowDiffEntry {
            status: RowStatus::Removed,
            key_values: Vec::new(),
            source_row: Some(row.clone()),
            target_row: None,
            changed_columns: BTreeSet::new(),
        });
    }

    for row in &target[shared..] {
        entries.push(RowDiffEntry {
            status: RowStatus::Added,
            key_values: Vec::new(),
            source_row: None,
            target_row: Some(row.clone()),
            changed_columns: BTreeSet::new(),
        });
    }

    RowDiffSummary { entries }
}

/// Compares whole query results, resolving key column names against the
/// source result's column metadata.
#[derive(Debug, Clone, Default)]
pub struct ResultComparer {
    key_columns: Vec<String>,
}

impl ResultComparer {
    /// A comparer with no key columns diffs positionally.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_key_columns(columns: Vec<String>) -> Self {
        Self {
            key_columns: columns,
        }
    }

    pub fn compare(&self, source: &QueryResult, target: &QueryResult) -> Result<RowDiffSummary> {
        if source.columns.len() != target.columns.len() {
            return Err(SqlensError::Comparison(format!(
                "column count mismatch: {} vs {}",
                source.columns.len(),
                target.columns.len()
            )));
        }
        if self.key_columns.is_empty() {
            return Ok(diff_rows_positional(&source.rows, &target.rows));
        }

        let mut key_ordinals = Vec::with_capacity(self.key_columns.len());
        for name in &self.key_columns {
            let ordinal = source.column_index(name).ok_or_else(|| {
                SqlensError::Comparison(format!("key column not found: {name}"))
            })?;
            key_ordinals.push(ordinal);
        }
        Ok(diff_rows_by_key(&source.rows, &target.rows, &key_ordinals))
    }
}

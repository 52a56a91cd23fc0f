use serde::{Deserialize, Serialize};
use sqlens_core::{ColumnInfo, ForeignKeyInfo, IndexInfo};
use std::collections::HashSet;

/// How a named descriptor fares between the two sides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiffStatus {
    Added,
    Removed,
    Changed,
    Unchanged,
}

/// One line of a schema diff: a descriptor matched by name across the
/// source and target collections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiffEntry<T> {
    pub name: String,
    pub status: DiffStatus,
    pub source: Option<T>,
    pub target: Option<T>,
    /// Field-level change descriptions, one per tracked field that
    /// differs, each formatted as `field: old → new`.
    pub changes: Vec<String>,
}

impl<T> DiffEntry<T> {
    pub fn is_change(&self) -> bool {
        self.status != DiffStatus::Unchanged
    }
}

/// A schema descriptor that can be diffed field by field.
///
/// Implementations define which fields participate in the comparison;
/// anything not described here (ordinals, comments) is ignored.
pub trait TrackedFields: Clone {
    fn name(&self) -> &str;

    /// Describes every tracked field that differs from `other`, each as
    /// `field: old → new`.
    fn describe_changes(&self, other: &Self) -> Vec<String>;
}

fn change(field: &str, old: impl std::fmt::Display, new: impl std::fmt::Display) -> String {
    format!("{field}: {old} → {new}")
}

fn fmt_opt(value: Option<&str>) -> &str {
    value.unwrap_or("none")
}

impl TrackedFields for ColumnInfo {
    fn name(&self) -> &str {
        &self.name
    }

    fn describe_changes(&self, other: &Self) -> Vec<String> {
        let mut changes = Vec::new();
        if self.data_type != other.data_type {
            changes.push(change("type", &self.data_type, &other.data_type));
        }
        if self.nullable != other.nullable {
            changes.push(change("nullable", self.nullable, other.nullable));
        }
        if self.default_value != other.default_value {
            changes.push(change(
                "default",
                fmt_opt(self.default_value.as_deref()),
                fmt_opt(other.default_value.as_deref()),
            ));
        }
        if self.is_primary_key != other.is_primary_key {
            changes.push(change("primary key", self.is_primary_key, other.is_primary_key));
        }
        changes
    }
}

impl TrackedFields for IndexInfo {
    fn name(&self) -> &str {
        &self.name
    }

    fn describe_changes(&self, other: &Self) -> Vec<String> {
        let mut changes = Vec::new();
        if self.columns != other.columns {
            changes.push(change(
                "columns",
                self.columns.join(", "),
                other.columns.join(", "),
            ));
        }
        if self.is_unique != other.is_unique {
            changes.push(change("unique", self.is_unique, other.is_unique));
        }
        if self.index_type != other.index_type {
            changes.push(change("type", &self.index_type, &other.index_type));
        }
        changes
    }
}

impl TrackedFields for ForeignKeyInfo {
    fn name(&self) -> &str {
        &self.name
    }

    fn describe_changes(&self, other: &Self) -> Vec<String> {
        let mut changes = Vec::new();
        if self.columns != other.columns {
            changes.push(change(
                "columns",
                self.columns.join(", "),
                other.columns.join(", "),
            ));
        }
        if self.referenced_table != other.referenced_table {
            changes.push(change(
                "referenced table",
                &self.referenced_table,
                &other.referenced_table,
            ));
        }
        if self.referenced_columns != other.referenced_columns {
            changes.push(change(
                "referenced columns",
                self.referenced_columns.join(", "),
                other.referenced_columns.join(", "),
            ));
        }
        if self.on_update != other.on_update {
            changes.push(change("on update", self.on_update, other.on_update));
        }
        if self.on_delete != other.on_delete {
            changes.push(change("on delete", self.on_delete, other.on_delete));
        }
        changes
    }
}

/// Diffs two descriptor collections by name.
///
/// A name present only in `source` is reported as [`DiffStatus::Removed`]
/// (the migration from source to target drops it); a name present only
/// in `target` as [`DiffStatus::Added`]. Entries come back grouped as
/// removed, changed, added, then unchanged, each group preserving the
/// order of the collection it came from.
pub fn diff_descriptors<T: TrackedFields>(source: &[T], target: &[T]) -> Vec<DiffEntry<T>> {
    let mut removed = Vec::new();
    let mut changed = Vec::new();
    let mut unchanged = Vec::new();

    for item in source {
        match target.iter().find(|t| t.name() == item.name()) {
            None => removed.push(DiffEntry {
                name: item.name().to_string(),
                status: DiffStatus::Removed,
                source: Some(item.clone()),
                target: None,
                changes: Vec::new(),
            }),
            Some(counterpart) => {
                let changes = item.describe_changes(counterpart);
                let status = if changes.is_empty() {
                    DiffStatus::Unchanged
                } else {
                    DiffStatus::Changed
                };
                let entry = DiffEntry {
                    name: item.name().to_string(),
                    status,
                    source: Some(item.clone()),
                    target: Some(counterpart.clone()),
                    changes,
                };
                if status == DiffStatus::Changed {
                    changed.push(entry);
                } else {
                    unchanged.push(entry);
                }
            }
        }
    }

    let source_names: HashSet<&str> = source.iter().map(|s| s.name()).collect();
    let added = target
        .iter()
        .filter(|t| !source_names.contains(t.name()))
        .map(|t| DiffEntry {
            name: t.name().to_string(),
            status: DiffStatus::Added,
            source: None,
            target: Some(t.clone()),
            changes: Vec::new(),
        });

    removed
        .into_iter()
        .chain(changed)
        .chain(added)
        .chain(unchanged)
        .collect()
}

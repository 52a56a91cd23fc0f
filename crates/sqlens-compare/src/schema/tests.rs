use pretty_assertions::assert_eq;

use sqlens_core::{ColumnInfo, ForeignKeyAction, ForeignKeyInfo, IndexInfo};

use super::*;

fn column(name: &str, data_type: &str) -> ColumnInfo {
    ColumnInfo {
        name: name.to_string(),
        data_type: data_type.to_string(),
        ..ColumnInfo::default()
    }
}

fn index(name: &str, columns: &[&str], unique: bool) -> IndexInfo {
    IndexInfo {
        name: name.to_string(),
        columns: columns.iter().map(|c| c.to_string()).collect(),
        is_unique: unique,
        index_type: "btree".to_string(),
    }
}

#[test]
fn identical_collections_are_unchanged() {
    let cols = vec![column("id", "int"), column("name", "text")];
    let entries = diff_descriptors(&cols, &cols);
    assert_eq!(entries.len(), 2);
    assert!(entries.iter().all(|e| e.status == DiffStatus::Unchanged));
    assert!(entries.iter().all(|e| e.changes.is_empty()));
}

#[test]
fn source_only_is_removed_target_only_is_added() {
    let source = vec![column("legacy", "int")];
    let target = vec![column("shiny", "int")];
    let entries = diff_descriptors(&source, &target);
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].name, "legacy");
    assert_eq!(entries[0].status, DiffStatus::Removed);
    assert!(entries[0].source.is_some());
    assert!(entries[0].target.is_none());
    assert_eq!(entries[1].name, "shiny");
    assert_eq!(entries[1].status, DiffStatus::Added);
    assert!(entries[1].source.is_none());
}

#[test]
fn type_change_is_described_field_by_field() {
    let source = vec![column("id", "int")];
    let target = vec![column("id", "bigint")];
    let entries = diff_descriptors(&source, &target);
    assert_eq!(entries[0].status, DiffStatus::Changed);
    assert_eq!(entries[0].changes, vec!["type: int → bigint"]);
}

#[test]
fn multiple_column_fields_can_change_at_once() {
    let mut source = column("email", "varchar(50)");
    source.nullable = true;
    let mut target = column("email", "varchar(255)");
    target.nullable = false;
    target.default_value = Some("''".to_string());

    let entries = diff_descriptors(&[source], &[target]);
    assert_eq!(
        entries[0].changes,
        vec![
            "type: varchar(50) → varchar(255)",
            "nullable: true → false",
            "default: none → ''",
        ]
    );
}

#[test]
fn untracked_column_fields_do_not_count() {
    let mut source = column("id", "int");
    source.ordinal = 1;
    source.comment = Some("old comment".to_string());
    let mut target = column("id", "int");
    target.ordinal = 5;
    target.comment = None;

    let entries = diff_descriptors(&[source], &[target]);
    assert_eq!(entries[0].status, DiffStatus::Unchanged);
}

#[test]
fn entries_come_back_grouped_removed_changed_added_unchanged() {
    let source = vec![
        column("kept", "int"),
        column("mutated", "int"),
        column("dropped", "int"),
    ];
    let target = vec![
        column("kept", "int"),
        column("mutated", "bigint"),
        column("brand_new", "text"),
    ];
    let entries = diff_descriptors(&source, &target);
    let order: Vec<(&str, DiffStatus)> = entries
        .iter()
        .map(|e| (e.name.as_str(), e.status))
        .collect();
    assert_eq!(
        order,
        vec![
            ("dropped", DiffStatus::Removed),
            ("mutated", DiffStatus::Changed),
            ("brand_new", DiffStatus::Added),
            ("kept", DiffStatus::Unchanged),
        ]
    );
}

#[test]
fn index_changes_track_columns_uniqueness_and_type() {
    let source = vec![index("idx_users_email", &["email"], false)];
    let mut target_idx = index("idx_users_email", &["email", "tenant_id"], true);
    target_idx.index_type = "hash".to_string();
    let entries = diff_descriptors(&source, &[target_idx]);
    assert_eq!(
        entries[0].changes,
        vec![
            "columns: email → email, tenant_id",
            "unique: false → true",
            "type: btree → hash",
        ]
    );
}

#[test]
fn foreign_key_changes_track_references_and_actions() {
    let source = ForeignKeyInfo {
        name: "fk_orders_user".to_string(),
        columns: vec!["user_id".to_string()],
        referenced_table: "users".to_string(),
        referenced_columns: vec!["id".to_string()],
        on_update: ForeignKeyAction::NoAction,
        on_delete: ForeignKeyAction::NoAction,
    };
    let mut target = source.clone();
    target.referenced_table = "accounts".to_string();
    target.on_delete = ForeignKeyAction::Cascade;

    let entries = diff_descriptors(&[source], &[target]);
    assert_eq!(
        entries[0].changes,
        vec![
            "referenced table: users → accounts",
            "on delete: NO ACTION → CASCADE",
        ]
    );
}

#[test]
fn empty_collections_diff_to_nothing() {
    let entries: Vec<DiffEntry<ColumnInfo>> = diff_descriptors(&[], &[]);
    assert!(entries.is_empty());
}

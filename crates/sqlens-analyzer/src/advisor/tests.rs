use pretty_assertions::assert_eq;

use super::*;

fn advise(sql: &str) -> Vec<IndexCandidate> {
    IndexAdvisor::new().advise(sql)
}

#[test]
fn where_columns_become_a_composite_filter_candidate() {
    let candidates = advise("SELECT * FROM users WHERE status = 'active' AND age > 21");
    assert_eq!(candidates.len(), 1);
    assert_eq!(candidates[0].table, "users");
    assert_eq!(candidates[0].columns, vec!["status", "age"]);
    assert_eq!(candidates[0].reason, IndexReason::Filter);
}

#[test]
fn qualified_columns_resolve_through_aliases() {
    let candidates = advise(
        "SELECT * FROM orders o JOIN customers c ON o.customer_id = c.id \
         WHERE c.country = 'DE' AND o.total > 100",
    );
    let filter_tables: Vec<&str> = candidates
        .iter()
        .filter(|c| c.reason == IndexReason::Filter)
        .map(|c| c.table.as_str())
        .collect();
    assert_eq!(filter_tables, vec!["customers", "orders"]);

    let join: Vec<&IndexCandidate> = candidates
        .iter()
        .filter(|c| c.reason == IndexReason::Join)
        .collect();
    assert_eq!(join.len(), 2);
    assert_eq!(join[0].table, "orders");
    assert_eq!(join[0].columns, vec!["customer_id"]);
    assert_eq!(join[1].table, "customers");
    assert_eq!(join[1].columns, vec!["id"]);
}

#[test]
fn as_keyword_aliases_work_too() {
    let candidates = advise("SELECT * FROM users AS u WHERE u.email = 'x'");
    assert_eq!(candidates[0].table, "users");
    assert_eq!(candidates[0].columns, vec!["email"]);
}

#[test]
fn order_by_produces_a_sort_candidate() {
    let candidates = advise("SELECT * FROM events ORDER BY created_at DESC, id ASC");
    assert_eq!(candidates.len(), 1);
    assert_eq!(candidates[0].reason, IndexReason::Sort);
    assert_eq!(candidates[0].columns, vec!["created_at", "id"]);
}

#[test]
fn group_by_produces_a_group_candidate() {
    let candidates = advise("SELECT region, count(*) FROM sales GROUP BY region");
    assert_eq!(candidates.len(), 1);
    assert_eq!(candidates[0].reason, IndexReason::Group);
    assert_eq!(candidates[0].columns, vec!["region"]);
}

#[test]
fn duplicate_table_column_pairs_keep_their_first_reason() {
    // status shows up in WHERE and again in ORDER BY.
    let candidates =
        advise("SELECT * FROM tickets WHERE status = 'open' ORDER BY status");
    assert_eq!(candidates.len(), 1);
    assert_eq!(candidates[0].reason, IndexReason::Filter);
}

#[test]
fn string_literals_and_comments_are_ignored() {
    let candidates = advise(
        "SELECT * FROM logs -- WHERE fake_col = 1\n\
         WHERE level = 'WHERE bogus = 2' /* ORDER BY decoy */",
    );
    assert_eq!(candidates.len(), 1);
    assert_eq!(candidates[0].columns, vec!["level"]);
}

#[test]
fn statements_without_tables_yield_nothing() {
    assert!(advise("SELECT 1").is_empty());
    assert!(advise("").is_empty());
}

#[test]
fn statements_without_interesting_clauses_yield_nothing() {
    assert!(advise("SELECT * FROM users").is_empty());
}

#[test]
fn bare_columns_attribute_to_the_first_table() {
    let candidates = advise("SELECT * FROM orders o JOIN items i ON o.id = i.order_id WHERE qty > 5");
    let filter: Vec<&IndexCandidate> = candidates
        .iter()
        .filter(|c| c.reason == IndexReason::Filter)
        .collect();
    assert_eq!(filter.len(), 1);
    assert_eq!(filter[0].table, "orders");
    assert_eq!(filter[0].columns, vec!["qty"]);
}

#[test]
fn ordinal_and_expression_sort_items_are_skipped() {
    assert!(advise("SELECT * FROM t ORDER BY 1").is_empty());
    assert!(advise("SELECT * FROM t ORDER BY lower(name)").is_empty());
}

#[test]
fn nulls_modifiers_are_stripped() {
    let candidates = advise("SELECT * FROM t ORDER BY created_at DESC NULLS LAST");
    assert_eq!(candidates[0].columns, vec!["created_at"]);
}

#[test]
fn in_and_like_conditions_count_as_filters() {
    let candidates =
        advise("SELECT * FROM users WHERE status IN ('a', 'b') AND name LIKE 'prefix%'");
    assert_eq!(candidates[0].columns, vec!["status", "name"]);
}

#[test]
fn ddl_sketch_reads_like_create_index() {
    let candidate = IndexCandidate {
        table: "users".to_string(),
        columns: vec!["status".to_string(), "age".to_string()],
        reason: IndexReason::Filter,
    };
    assert_eq!(
        candidate.ddl_sketch(),
        "CREATE INDEX idx_users_status_age ON users (status, age)"
    );
}

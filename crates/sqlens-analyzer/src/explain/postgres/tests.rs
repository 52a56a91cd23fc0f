use pretty_assertions::assert_eq;

use super::*;

const ANALYZE_OUTPUT: &str = r#"[
  {
    "Plan": {
      "Node Type": "Hash Join",
      "Join Type": "Inner",
      "Startup Cost": 12.5,
      "Total Cost": 845.0,
      "Plan Rows": 5000,
      "Actual Rows": 4821.0,
      "Actual Startup Time": 1.2,
      "Actual Total Time": 38.7,
      "Actual Loops": 1,
      "Plans": [
        {
          "Node Type": "Seq Scan",
          "Relation Name": "orders",
          "Total Cost": 520.0,
          "Plan Rows": 12000,
          "Actual Rows": 12000.0,
          "Actual Startup Time": 0.1,
          "Actual Total Time": 22.4,
          "Actual Loops": 1,
          "Filter": "(status = 'open')"
        },
        {
          "Node Type": "Hash",
          "Total Cost": 210.0,
          "Plan Rows": 800,
          "Plans": [
            {
              "Node Type": "Index Scan",
              "Relation Name": "customers",
              "Total Cost": 180.0,
              "Plan Rows": 800
            }
          ]
        }
      ]
    }
  }
]"#;

#[test]
fn parses_nested_analyze_output() {
    let plan = parse_plan(ANALYZE_OUTPUT).unwrap();

    assert_eq!(plan.operation, "Hash Join");
    assert_eq!(plan.estimated_cost, 845.0);
    assert_eq!(plan.estimated_rows, 5000.0);
    assert_eq!(plan.actual_rows, Some(4821.0));
    assert_eq!(plan.actual_time_ms, Some(38.7));
    assert_eq!(plan.startup_time_ms, Some(1.2));
    assert_eq!(plan.loops, Some(1.0));
    assert_eq!(plan.children.len(), 2);

    let scan = &plan.children[0];
    assert_eq!(scan.operation, "Seq Scan");
    assert_eq!(scan.relation.as_deref(), Some("orders"));
    assert!(scan.is_full_scan());

    let hash = &plan.children[1];
    assert_eq!(hash.operation, "Hash");
    assert_eq!(hash.children.len(), 1);
    assert_eq!(hash.children[0].relation.as_deref(), Some("customers"));
}

#[test]
fn preserves_unmodeled_scalar_keys_in_extra() {
    let plan = parse_plan(ANALYZE_OUTPUT).unwrap();

    assert_eq!(plan.extra.get("Join Type").map(String::as_str), Some("Inner"));
    let scan = &plan.children[0];
    assert_eq!(
        scan.extra.get("Filter").map(String::as_str),
        Some("(status = 'open')")
    );
}

#[test]
fn accepts_bare_wrapper_object() {
    let plan = parse_plan(r#"{"Plan": {"Node Type": "Result", "Total Cost": 0.01}}"#).unwrap();
    assert_eq!(plan.operation, "Result");
    assert!(plan.is_leaf());
}

#[test]
fn plain_explain_has_no_runtime_figures() {
    let plan = parse_plan(
        r#"[{"Plan": {"Node Type": "Seq Scan", "Relation Name": "t", "Total Cost": 5.0, "Plan Rows": 10}}]"#,
    )
    .unwrap();
    assert_eq!(plan.actual_rows, None);
    assert_eq!(plan.actual_time_ms, None);
    assert_eq!(plan.loops, None);
}

#[test]
fn negative_figures_are_clamped() {
    let plan = parse_plan(
        r#"[{"Plan": {"Node Type": "Result", "Total Cost": -3.0, "Plan Rows": -1}}]"#,
    )
    .unwrap();
    assert_eq!(plan.estimated_cost, 0.0);
    assert_eq!(plan.estimated_rows, 0.0);
}

#[test]
fn rejects_payload_without_plan() {
    assert!(matches!(
        parse_plan(r#"[{"NotAPlan": {}}]"#),
        Err(PostgresPlanError::MissingPlan)
    ));
    assert!(matches!(
        parse_plan("42"),
        Err(PostgresPlanError::MissingPlan)
    ));
}

#[test]
fn rejects_node_without_type() {
    assert!(matches!(
        parse_plan(r#"[{"Plan": {"Relation Name": "t"}}]"#),
        Err(PostgresPlanError::InvalidStructure(_))
    ));
}

#[test]
fn rejects_invalid_json() {
    assert!(matches!(
        parse_plan("not json at all"),
        Err(PostgresPlanError::InvalidJson(_))
    ));
}

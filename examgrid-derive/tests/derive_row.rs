//! Tests for #[derive(Row)].

use examgrid::{Column, Grid, GridConfig, Row, Value};

#[derive(Debug, Clone, Row)]
struct Question {
    id: i64,
    prompt: String,
    #[row(rename = "difficulty")]
    level: u32,
    points: Option<f64>,
    #[row(skip)]
    #[allow(dead_code)]
    choices: Vec<String>,
}

fn question(id: i64, prompt: &str, level: u32) -> Question {
    Question {
        id,
        prompt: prompt.to_string(),
        level,
        points: None,
        choices: vec!["a".to_string(), "b".to_string()],
    }
}

#[test]
fn test_named_fields_are_readable() {
    let q = question(7, "What is 2 + 2?", 1);
    assert_eq!(q.field("id"), Some(Value::Int(7)));
    assert_eq!(q.field("prompt"), Some(Value::from("What is 2 + 2?")));
}

#[test]
fn test_rename_changes_the_key() {
    let q = question(1, "p", 3);
    assert_eq!(q.field("difficulty"), Some(Value::Int(3)));
    assert_eq!(q.field("level"), None);
}

#[test]
fn test_skipped_and_unknown_fields_are_absent() {
    let q = question(1, "p", 3);
    assert_eq!(q.field("choices"), None);
    assert_eq!(q.field("nope"), None);
}

#[test]
fn test_option_none_reads_as_null() {
    let mut q = question(1, "p", 3);
    assert_eq!(q.field("points"), Some(Value::Null));
    q.points = Some(2.5);
    assert_eq!(q.field("points"), Some(Value::Float(2.5)));
}

#[test]
fn test_field_names_lists_readable_fields() {
    assert_eq!(
        Question::field_names(),
        Some(&["id", "prompt", "difficulty", "points"][..])
    );
}

#[test]
fn test_derived_rows_drive_a_grid() {
    let rows = vec![question(1, "b", 2), question(2, "a", 3), question(3, "c", 1)];
    let mut grid = Grid::new(
        vec![
            Column::new("prompt", "Prompt"),
            Column::new("difficulty", "Difficulty"),
        ],
        GridConfig::default(),
    );

    grid.click_header("difficulty");
    grid.click_header("difficulty");
    let derived = grid.derive(&rows, false);
    let ids: Vec<i64> = derived.rows.iter().map(|q| q.id).collect();
    assert_eq!(ids, vec![2, 1, 3]);
}

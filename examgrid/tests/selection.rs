use std::sync::{Arc, Mutex};

use examgrid::{Column, Grid, GridConfig, HeaderCheckbox, Record, RowKey, Selection};

fn users(n: i64) -> Vec<Record> {
    (1..=n)
        .map(|i| Record::new().set("id", i).set("email", format!("user{i}@example.com")))
        .collect()
}

fn selectable(page_size: usize) -> Grid<Record> {
    Grid::new(
        vec![Column::new("email", "Email")],
        GridConfig::default().selectable(true).page_size(page_size),
    )
}

fn keys(ids: &[i64]) -> Vec<RowKey> {
    ids.iter().map(|i| RowKey::Int(*i)).collect()
}

// ============================================================================
// Selection type
// ============================================================================

#[test]
fn test_toggle_reports_new_membership() {
    let mut s = Selection::new();
    let key = RowKey::from(4);
    assert!(s.toggle(&key));
    assert!(s.is_selected(&key));
    assert!(!s.toggle(&key));
    assert!(s.is_empty());
}

#[test]
fn test_bulk_changes_report_whether_anything_changed() {
    let mut s: Selection = keys(&[1]).into();
    assert!(s.select_all(&keys(&[1, 2])));
    assert!(!s.select_all(&keys(&[1, 2])));
    assert!(s.deselect_all(&keys(&[2, 3])));
    assert!(!s.deselect_all(&keys(&[2, 3])));
    assert_eq!(s.selected(), keys(&[1]));

    assert!(s.toggle_page(&keys(&[1, 5])));
    assert_eq!(s.selected(), keys(&[1, 5]));
    assert!(!s.toggle_page(&[]));
}

#[test]
fn test_header_state_over_page_keys() {
    let s: Selection = keys(&[2, 3]).into();
    assert_eq!(s.header_state(&keys(&[1, 2, 3])), HeaderCheckbox::Some);
    assert_eq!(s.header_state(&keys(&[2, 3])), HeaderCheckbox::All);
    assert_eq!(s.header_state(&keys(&[4, 5])), HeaderCheckbox::None);
    assert_eq!(s.header_state(&[]), HeaderCheckbox::None);
}

// ============================================================================
// Tri-state header on a grid
// ============================================================================

#[test]
fn test_header_cycle_on_single_page() {
    let rows = users(3);
    let mut grid = selectable(10);

    grid.toggle_row(&rows[1]);
    grid.toggle_row(&rows[2]);
    assert_eq!(grid.header_checkbox(&rows), HeaderCheckbox::Some);

    assert_eq!(grid.toggle_header(&rows), HeaderCheckbox::All);
    assert_eq!(grid.selected_keys(), keys(&[1, 2, 3]));

    assert_eq!(grid.toggle_header(&rows), HeaderCheckbox::None);
    assert!(grid.selected_keys().is_empty());
}

#[test]
fn test_header_counts_for_k_rows() {
    let rows = users(4);
    let mut grid = selectable(10);
    assert_eq!(grid.derive(&rows, false).header_checkbox, HeaderCheckbox::None);

    for (i, row) in rows.iter().enumerate() {
        grid.toggle_row(row);
        let expected = if i + 1 < rows.len() {
            HeaderCheckbox::Some
        } else {
            HeaderCheckbox::All
        };
        assert_eq!(grid.derive(&rows, false).header_checkbox, expected);
    }
}

#[test]
fn test_header_deselect_keeps_other_pages() {
    let rows = users(15);
    let mut grid = selectable(10);

    // Select row 12 on page 2, then select all of page 1.
    grid.toggle_row(&rows[11]);
    assert_eq!(grid.header_checkbox(&rows), HeaderCheckbox::None);
    grid.toggle_header(&rows);
    assert_eq!(grid.selection().len(), 11);

    // Deselect page 1: only its ten keys go.
    assert_eq!(grid.toggle_header(&rows), HeaderCheckbox::None);
    assert_eq!(grid.selected_keys(), keys(&[12]));
}

#[test]
fn test_header_union_has_no_duplicates() {
    let rows = users(3);
    let mut grid = selectable(10);
    grid.toggle_row(&rows[0]);
    grid.toggle_header(&rows);
    assert_eq!(grid.selected_keys(), keys(&[1, 2, 3]));
}

#[test]
fn test_empty_page_header_is_none() {
    let rows = users(0);
    let mut grid = selectable(10);
    assert_eq!(grid.header_checkbox(&rows), HeaderCheckbox::None);
    assert_eq!(grid.toggle_header(&rows), HeaderCheckbox::None);
    assert!(grid.selection().is_empty());
}

// ============================================================================
// Persistence and identity
// ============================================================================

#[test]
fn test_selection_survives_page_navigation() {
    let rows = users(25);
    let mut grid = selectable(10);

    grid.toggle_row(&rows[2]);
    grid.next_page(&rows);
    assert!(grid.is_selected(&rows[2]));
    assert_eq!(grid.header_checkbox(&rows), HeaderCheckbox::None);

    grid.prev_page(&rows);
    assert!(grid.is_selected(&rows[2]));
    assert_eq!(grid.header_checkbox(&rows), HeaderCheckbox::Some);
}

#[test]
fn test_selection_survives_sorting_and_row_changes() {
    let rows = users(5);
    let mut grid = selectable(2);
    grid.toggle_row(&rows[4]);

    grid.click_header("email");
    grid.click_header("email");
    assert!(grid.is_selected(&rows[4]));

    let fewer = users(2);
    grid.derive(&fewer, false);
    assert_eq!(grid.selected_keys(), keys(&[5]));
}

#[test]
fn test_rows_without_key_cannot_be_selected() {
    let rows = vec![
        Record::new().set("email", "nokey@example.com"),
        Record::new().set("id", 1.5).set("email", "float@example.com"),
        Record::new().set("id", 9).set("email", "ok@example.com"),
    ];
    let mut grid = selectable(10);

    assert!(!grid.toggle_row(&rows[0]));
    assert!(!grid.toggle_row(&rows[1]));
    assert!(grid.toggle_row(&rows[2]));

    // Only keyed rows count towards the header state.
    assert_eq!(grid.header_checkbox(&rows), HeaderCheckbox::All);
}

#[test]
fn test_custom_row_key_field() {
    let rows = vec![
        Record::new().set("user_id", "u-1"),
        Record::new().set("user_id", "u-2"),
    ];
    let mut grid = Grid::new(
        vec![Column::new("user_id", "User")],
        GridConfig::default().selectable(true).row_key("user_id"),
    );
    grid.toggle_row(&rows[1]);
    assert_eq!(grid.selected_keys(), vec![RowKey::from("u-2")]);
}

#[test]
fn test_not_selectable_grid_ignores_toggles() {
    let rows = users(3);
    let mut grid = Grid::new(vec![Column::new("email", "Email")], GridConfig::default());
    assert!(!grid.toggle_row(&rows[0]));
    assert_eq!(grid.toggle_header(&rows), HeaderCheckbox::None);
    assert!(!grid.select_all(&rows));
    assert!(grid.selection().is_empty());
}

#[test]
fn test_select_all_spans_every_page() {
    let rows = users(25);
    let mut grid = selectable(10);
    assert!(grid.select_all(&rows));
    assert!(!grid.select_all(&rows));
    assert_eq!(grid.selection().len(), 25);
    assert!(grid.clear_selection());
    assert!(grid.selection().is_empty());
}

// ============================================================================
// Controlled mode
// ============================================================================

#[test]
fn test_changes_are_forwarded_as_full_selection() {
    let changes = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&changes);
    let rows = users(3);
    let mut grid = selectable(10).on_selection_change(move |keys| sink.lock().unwrap().push(keys));

    grid.toggle_row(&rows[0]);
    grid.toggle_row(&rows[2]);
    grid.toggle_header(&rows);

    assert_eq!(
        *changes.lock().unwrap(),
        vec![keys(&[1]), keys(&[1, 3]), keys(&[1, 2, 3])]
    );
}

#[test]
fn test_external_push_overwrites_internal_copy() {
    let calls = Arc::new(Mutex::new(0));
    let sink = Arc::clone(&calls);
    let rows = users(3);
    let mut grid = selectable(10).on_selection_change(move |_| *sink.lock().unwrap() += 1);

    grid.toggle_row(&rows[0]);
    grid.sync_selection(keys(&[2, 3]));

    assert_eq!(grid.selected_keys(), keys(&[2, 3]));
    assert_eq!(grid.header_checkbox(&rows), HeaderCheckbox::Some);
    assert_eq!(*calls.lock().unwrap(), 1);
}

#[test]
fn test_row_checkbox_does_not_trigger_row_click() {
    let clicks = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&clicks);
    let rows = users(2);
    let mut grid = selectable(10).on_row_click(move |row: &Record| {
        sink.lock().unwrap().push(row.get("id").cloned());
    });

    grid.toggle_row(&rows[0]);
    assert!(clicks.lock().unwrap().is_empty());

    grid.click_row(&rows[1]);
    assert_eq!(clicks.lock().unwrap().len(), 1);
    assert!(!grid.is_selected(&rows[1]));
}

use std::sync::{Arc, Mutex};

use examgrid::{
    Alignment, Column, Direction, Grid, GridConfig, GridStatus, GridView, HeaderCheckbox, Record,
    Row, RowKey, SkeletonView, Value,
};

fn exams() -> Vec<Record> {
    vec![
        Record::new().set("id", 1).set("title", "Algebra").set("questions", 20),
        Record::new().set("id", 2).set("title", "Biology").set("questions", 35),
        Record::new().set("id", 3).set("title", "Chemistry").set("questions", 28),
    ]
}

fn columns() -> Vec<Column<Record>> {
    vec![
        Column::new("title", "Title"),
        Column::new("questions", "Questions").align(Alignment::End),
    ]
}

// ============================================================================
// Status precedence
// ============================================================================

#[test]
fn test_absent_rows_show_empty_state() {
    let mut grid = Grid::new(columns(), GridConfig::default());
    let derived = grid.derive(None::<&[Record]>, false);
    assert_eq!(derived.status, GridStatus::Empty);
    assert!(derived.is_empty());
    assert_eq!(derived.page.total_pages, 1);

    match grid.view(None::<&Vec<Record>>, false) {
        GridView::Empty(empty) => assert_eq!(empty.message, "No data available"),
        other => panic!("expected empty state, got {other:?}"),
    }
}

#[test]
fn test_empty_state_carries_configured_message() {
    let mut grid = Grid::new(
        columns(),
        GridConfig::default()
            .empty_message("No exams yet")
            .empty_icon("📝")
            .empty_action("Create exam"),
    );
    let rows: Vec<Record> = Vec::new();
    match grid.view(&rows, false) {
        GridView::Empty(empty) => {
            assert_eq!(empty.message, "No exams yet");
            assert_eq!(empty.icon.as_deref(), Some("📝"));
            assert_eq!(empty.action.as_deref(), Some("Create exam"));
        }
        other => panic!("expected empty state, got {other:?}"),
    }
}

#[test]
fn test_loading_shows_skeleton_even_with_rows() {
    let rows = exams();
    let mut grid = Grid::new(columns(), GridConfig::default().selectable(true));

    assert_eq!(grid.derive(&rows, true).status, GridStatus::Loading);
    assert_eq!(
        grid.view(&rows, true),
        GridView::Skeleton(SkeletonView { columns: 3, rows: 5 })
    );
}

#[test]
fn test_loading_skeleton_without_selection_column() {
    let mut grid = Grid::new(columns(), GridConfig::default());
    assert_eq!(
        grid.view(None::<&[Record]>, true),
        GridView::Skeleton(SkeletonView { columns: 2, rows: 5 })
    );
}

#[test]
fn test_loading_takes_precedence_over_empty() {
    let mut grid = Grid::new(columns(), GridConfig::default());
    let rows: Vec<Record> = Vec::new();
    assert_eq!(grid.derive(&rows, true).status, GridStatus::Loading);
}

// ============================================================================
// Table view
// ============================================================================

#[test]
fn test_table_view_describes_header_rows_and_footer() {
    let rows = exams();
    let mut grid = Grid::new(columns(), GridConfig::default().selectable(true).page_size(2));
    grid.click_header("questions");
    grid.click_header("questions");
    grid.toggle_row(&rows[1]);

    let GridView::Table(table) = grid.view(&rows, false) else {
        panic!("expected a table");
    };

    assert_eq!(table.header.len(), 2);
    assert_eq!(table.header[0].label, "Title");
    assert_eq!(table.header[0].sort, None);
    assert_eq!(table.header[1].sort, Some(Direction::Desc));
    assert_eq!(table.header[1].align, Alignment::End);

    // Page 1 of the descending order is Biology (35), Chemistry (28).
    assert_eq!(table.rows.len(), 2);
    assert_eq!(table.rows[0].cells, vec!["Biology", "35"]);
    assert_eq!(table.rows[0].key, Some(RowKey::Int(2)));
    assert!(table.rows[0].selected);
    assert!(!table.rows[1].selected);

    assert_eq!(table.header_checkbox, Some(HeaderCheckbox::Some));
    assert_eq!(table.selected_count, 1);

    let footer = table.footer.expect("paginated grid has a footer");
    assert_eq!(footer.total_pages, 2);
    assert_eq!((footer.range_start, footer.range_end), (1, 2));
}

#[test]
fn test_plain_grid_has_no_checkbox_or_footer() {
    let rows = exams();
    let mut grid = Grid::new(columns(), GridConfig::default().paginated(false));
    let GridView::Table(table) = grid.view(&rows, false) else {
        panic!("expected a table");
    };
    assert_eq!(table.header_checkbox, None);
    assert_eq!(table.footer, None);
    assert_eq!(table.rows.len(), 3);
}

#[test]
fn test_sort_indicators_hidden_when_sorting_disabled() {
    let rows = exams();
    let mut grid = Grid::new(columns(), GridConfig::default().sortable(false));
    grid.sync_sort(examgrid::SortState::asc("title"));
    let GridView::Table(table) = grid.view(&rows, false) else {
        panic!("expected a table");
    };
    assert!(table.header.iter().all(|h| h.sort.is_none() && !h.sortable));
}

#[test]
fn test_custom_renderer_and_computed_header() {
    let rows = exams();
    let columns = vec![
        Column::new("title", "Title").render(|v, _| v.display().to_uppercase()),
        Column::new("questions", "")
            .computed_header(|| "Qs".to_string())
            .render(|v, row: &Record| match (v, row.get("id")) {
                (Value::Int(n), Some(Value::Int(id))) => format!("#{id}: {n}"),
                _ => String::new(),
            }),
    ];
    let mut grid = Grid::new(columns, GridConfig::default());
    let GridView::Table(table) = grid.view(&rows, false) else {
        panic!("expected a table");
    };
    assert_eq!(table.header[1].label, "Qs");
    assert_eq!(table.rows[0].cells, vec!["ALGEBRA", "#1: 20"]);
}

#[test]
fn test_missing_cells_render_empty() {
    let rows = vec![Record::new().set("id", 1)];
    let mut grid = Grid::new(columns(), GridConfig::default());
    let GridView::Table(table) = grid.view(&rows, false) else {
        panic!("expected a table");
    };
    assert_eq!(table.rows[0].cells, vec!["", ""]);
}

// ============================================================================
// Row activation
// ============================================================================

#[test]
fn test_row_click_invokes_handler_once_without_state_change() {
    let clicked = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&clicked);
    let rows = exams();
    let mut grid = Grid::new(columns(), GridConfig::default().selectable(true))
        .on_row_click(move |row: &Record| sink.lock().unwrap().push(row.get("title").cloned()));

    let before = (grid.sort().clone(), grid.current_page(), grid.selected_keys());
    grid.click_row(&rows[2]);
    let after = (grid.sort().clone(), grid.current_page(), grid.selected_keys());

    assert_eq!(*clicked.lock().unwrap(), vec![Some(Value::from("Chemistry"))]);
    assert_eq!(before, after);
    assert_eq!(grid.derive(&rows, false).status, GridStatus::Ready);
}

#[test]
fn test_row_click_without_handler_is_harmless() {
    let rows = exams();
    let grid = Grid::new(columns(), GridConfig::default());
    grid.click_row(&rows[0]);
}

// ============================================================================
// Construction
// ============================================================================

#[test]
fn test_blank_row_key_falls_back_to_id() {
    let grid = Grid::<Record>::new(columns(), GridConfig::default().row_key("  "));
    assert_eq!(grid.config().row_key, "id");
}

#[test]
fn test_array_rows_are_accepted() {
    let rows = [Record::new().set("id", 1).set("title", "Only")];
    let mut grid = Grid::new(columns(), GridConfig::default());
    assert_eq!(grid.derive(&rows, false).rows.len(), 1);
}

/// Row counts of every page, walked through the borrowing entry points.
fn page_lengths<R: Row>(grid: &mut Grid<R>, rows: &[R]) -> Vec<usize> {
    let last = grid.last_page(rows);
    grid.first_page(rows);
    let mut lengths = Vec::new();
    loop {
        grid.header_checkbox(rows);
        grid.toggle_header(rows);
        lengths.push(grid.page_keys(rows).len());
        if grid.current_page() == last {
            break;
        }
        grid.next_page(rows);
    }
    grid.prev_page(rows);
    grid.select_all(rows);
    grid.view(rows, false);
    lengths
}

struct Student {
    id: i64,
}

impl Row for Student {
    fn field(&self, key: &str) -> Option<Value> {
        (key == "id").then(|| Value::Int(self.id))
    }
}

#[test]
fn test_generic_callers_can_borrow_rows() {
    let students: Vec<Student> = (1..=7).map(|id| Student { id }).collect();
    let mut grid = Grid::new(
        vec![Column::new("id", "Id")],
        GridConfig::default().selectable(true).page_size(3),
    );
    assert_eq!(page_lengths(&mut grid, &students), vec![3, 3, 1]);
    assert_eq!(grid.selection().len(), 7);

    let mut records = Grid::new(columns(), GridConfig::default().page_size(2));
    assert_eq!(page_lengths(&mut records, &exams()), vec![2, 1]);
}

#[test]
fn test_rows_parsed_from_json() {
    let rows = Record::parse_rows(
        r#"[
            {"id": 1, "title": "Physics", "questions": 12},
            {"id": 2, "title": "History", "questions": 40}
        ]"#,
    )
    .unwrap();
    let mut grid = Grid::new(columns(), GridConfig::default());
    grid.click_header("title");
    let titles: Vec<_> = grid
        .derive(&rows, false)
        .rows
        .iter()
        .map(|r| r.get("title").map(Value::display))
        .collect();
    assert_eq!(
        titles,
        vec![Some("History".to_string()), Some("Physics".to_string())]
    );
}

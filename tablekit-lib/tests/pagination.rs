use tablekit_lib::column::Column;
use tablekit_lib::model::{Record, TableRow, Value};
use tablekit_lib::page::{DEFAULT_SUMMARY_TEMPLATE, PageButton, Pagination};
use tablekit_lib::table::{Table, TableEvent};

fn table(rows: usize, page_size: usize) -> Table<Record> {
    let mut table = Table::new(vec![Column::new("id"), Column::new("name")])
        .unwrap()
        .with_page_size(page_size);
    table
        .set_rows(
            (1..=rows as i64)
                .map(|i| Record::new().set("id", i).set("name", format!("row {i}")))
                .collect(),
        )
        .unwrap();
    table
}

fn page_ids(table: &Table<Record>) -> Vec<i64> {
    table
        .displayed_page_rows()
        .into_iter()
        .map(|row| match row.cell("id") {
            Some(Value::Int(id)) => *id,
            other => panic!("row without integer id: {:?}", other),
        })
        .collect()
}

// ============================================================================
// Windows
// ============================================================================

#[test]
fn test_five_rows_page_size_two() {
    let mut t = table(5, 2);
    let summary = t.pagination_summary();
    assert_eq!(summary.max_page, 3);
    assert_eq!(page_ids(&t), vec![1, 2]);
    assert_eq!(t.pagination_label(), "1 - 2 of 5");

    assert!(t.go_to_page(3));
    assert_eq!(page_ids(&t), vec![5]);
    let summary = t.pagination_summary();
    assert_eq!(summary.min_item, 5);
    assert_eq!(summary.max_item, 5);
    assert_eq!(t.pagination_label(), "5 - 5 of 5");
}

#[test]
fn test_pages_cover_every_row_once() {
    for (rows, size) in [(0, 3), (1, 3), (9, 3), (10, 3), (7, 10), (12, 1)] {
        let mut t = table(rows, size);
        let max_page = t.pagination_summary().max_page;
        let mut seen = Vec::new();
        for page in 1..=max_page {
            t.go_to_page(page);
            seen.extend(page_ids(&t));
        }
        let expected: Vec<i64> = (1..=rows as i64).collect();
        assert_eq!(seen, expected, "{rows} rows, page size {size}");
    }
}

#[test]
fn test_unpaged_shows_everything() {
    let mut t = table(7, 0);
    assert!(!t.is_paged());
    assert_eq!(page_ids(&t).len(), 7);
    assert_eq!(t.pagination_summary().max_page, 1);
    assert!(!t.go_to_page(4));
    assert_eq!(page_ids(&t).len(), 7);
}

#[test]
fn test_empty_view() {
    let t = table(0, 5);
    let summary = t.pagination_summary();
    assert_eq!(summary.max_page, 1);
    assert_eq!(summary.current_page, 1);
    assert!(page_ids(&t).is_empty());
    assert_eq!(t.pagination_label(), "0 - 0 of 0");
}

// ============================================================================
// Navigation
// ============================================================================

#[test]
fn test_buttons_clamp() {
    let mut t = table(5, 2);
    assert_eq!(t.on_page_button(PageButton::Previous), None);
    assert_eq!(
        t.on_page_button(PageButton::Last),
        Some(TableEvent::PageChanged { page: 3 })
    );
    assert_eq!(t.on_page_button(PageButton::Next), None);
    assert_eq!(t.pagination_summary().current_page, 3);
    assert_eq!(
        t.on_page_button(PageButton::Previous),
        Some(TableEvent::PageChanged { page: 2 })
    );
    assert_eq!(
        t.on_page_button(PageButton::First),
        Some(TableEvent::PageChanged { page: 1 })
    );
}

#[test]
fn test_go_to_page_clamps() {
    let mut t = table(5, 2);
    assert!(t.go_to_page(99));
    assert_eq!(t.pagination_summary().current_page, 3);
    assert!(t.go_to_page(0));
    assert_eq!(t.pagination_summary().current_page, 1);
}

#[test]
fn test_filter_change_returns_to_first_page() {
    let mut t = table(5, 2);
    t.go_to_page(3);
    t.on_filter_change("name", "row");
    assert_eq!(t.pagination_summary().current_page, 1);
}

#[test]
fn test_page_size_change_returns_to_first_page() {
    let mut t = table(9, 2);
    t.go_to_page(4);
    t.set_page_size(Some(3));
    let summary = t.pagination_summary();
    assert_eq!(summary.current_page, 1);
    assert_eq!(summary.max_page, 3);
}

#[test]
fn test_sort_keeps_page() {
    let mut t = table(5, 2);
    t.go_to_page(2);
    t.on_header_click("id");
    t.on_header_click("id");
    assert_eq!(t.pagination_summary().current_page, 2);
    assert_eq!(page_ids(&t), vec![3, 2]);
}

#[test]
fn test_custom_label_template() {
    let t = table(5, 2).with_summary_template("Page {page} of {pages} ({total} rows)");
    assert_eq!(t.pagination_label(), "Page 1 of 3 (5 rows)");
}

#[test]
fn test_window_formula() {
    let mut p = Pagination::new(Some(10));
    p.go_to(3, 42);
    let w = p.window(42);
    assert_eq!(w.range, 20..30);
    assert_eq!(w.min_item, 21);
    assert_eq!(w.max_item, 30);
    assert_eq!(w.max_page, 5);
    assert_eq!(w.label(DEFAULT_SUMMARY_TEMPLATE), "21 - 30 of 42");
}

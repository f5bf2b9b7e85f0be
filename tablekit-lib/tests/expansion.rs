use serde_json::json;
use tablekit_lib::column::Column;
use tablekit_lib::expansion::RowId;
use tablekit_lib::model::{Record, Value};
use tablekit_lib::table::{Table, TableEvent};
use tablekit_lib::TableError;

fn rows() -> Vec<Record> {
    serde_json::from_value(json!([
        { "id": 1, "name": "alpha" },
        { "id": 2, "name": "beta" },
        { "id": 3, "name": "gamma" },
    ]))
    .unwrap()
}

fn table() -> Table<Record> {
    let mut table = Table::new(vec![Column::new("id"), Column::new("name")])
        .unwrap()
        .with_identity_key("id");
    table.set_rows(rows()).unwrap();
    table
}

#[test]
fn test_rows_start_collapsed() {
    let t = table();
    for row in t.rows() {
        assert!(!t.is_row_expanded(row));
    }
    assert!(t.expanded_rows().is_empty());
}

#[test]
fn test_toggle_twice_restores_state() {
    let mut t = table();
    let id = RowId::from("2");
    assert!(t.toggle_expanded(&id).unwrap());
    assert!(t.is_expanded(&id));
    assert!(!t.toggle_expanded(&id).unwrap());
    assert!(!t.is_expanded(&id));
}

#[test]
fn test_toggle_is_isolated() {
    let mut t = table();
    t.toggle_expanded(&RowId::from("2")).unwrap();
    assert!(!t.is_expanded(&RowId::from("1")));
    assert!(t.is_expanded(&RowId::from("2")));
    assert!(!t.is_expanded(&RowId::from("3")));
    assert_eq!(t.expanded_rows(), [RowId::from("2")]);
}

#[test]
fn test_row_id_uses_identity_cell() {
    let t = table();
    let ids: Vec<RowId> = t.rows().iter().filter_map(|row| t.row_id(row)).collect();
    assert_eq!(ids, [RowId::from("1"), RowId::from("2"), RowId::from("3")]);
    assert_eq!(RowId::from(&Value::Int(2)), RowId::from("2"));
}

#[test]
fn test_expansion_survives_filter_and_sort() {
    let mut t = table();
    t.on_expander_click(&RowId::from("3")).unwrap();

    t.on_filter_change("name", "beta");
    assert_eq!(t.displayed_len(), 1);
    t.on_filter_change("name", "");
    t.on_header_click("name");
    t.on_header_click("name");

    let first = t.displayed_rows()[0];
    assert_eq!(first.get("id"), Some(&Value::Int(3)));
    assert!(t.is_row_expanded(first));
}

#[test]
fn test_expansion_survives_replacing_rows() {
    let mut t = table();
    t.toggle_expanded(&RowId::from("1")).unwrap();
    t.set_rows(rows()).unwrap();
    assert!(t.is_expanded(&RowId::from("1")));
}

#[test]
fn test_expander_click_event() {
    let mut t = table();
    let id = RowId::from("1");
    let event = t.on_expander_click(&id).unwrap();
    assert_eq!(
        event,
        TableEvent::RowToggled {
            id: id.clone(),
            expanded: true
        }
    );
    assert_eq!(t.drain_events(), vec![event]);
}

#[test]
fn test_collapse_all() {
    let mut t = table();
    t.toggle_expanded(&RowId::from("3")).unwrap();
    t.toggle_expanded(&RowId::from("1")).unwrap();
    assert_eq!(t.collapse_all(), [RowId::from("1"), RowId::from("3")]);
    assert!(t.expanded_rows().is_empty());
}

#[test]
fn test_missing_identity_key() {
    let mut t: Table<Record> = Table::new(vec![Column::new("id")]).unwrap();
    t.set_rows(rows()).unwrap();

    let id = RowId::from("1");
    assert_eq!(t.toggle_expanded(&id), Err(TableError::MissingIdentityKey));
    assert_eq!(t.on_expander_click(&id), Err(TableError::MissingIdentityKey));
    assert!(!t.is_expanded(&id));
    assert!(t.row_id(&t.rows()[0]).is_none());
    assert!(t.drain_events().is_empty());
}

#[test]
fn test_identity_not_in_rows_rejected() {
    let mut t = table();
    let id = RowId::from("999");
    assert_eq!(t.toggle_expanded(&id), Err(TableError::unknown_identity("999")));
    assert_eq!(t.on_expander_click(&id), Err(TableError::unknown_identity("999")));
    assert!(!t.is_expanded(&id));
    assert!(t.expanded_rows().is_empty());
    assert!(t.drain_events().is_empty());
}

#[test]
fn test_rows_without_identity_never_expand() {
    let mut t = table();
    t.push_rows(vec![Record::new().set("name", "orphan"), Record::new().set("id", Value::Null)])
        .unwrap();
    for row in &t.rows()[3..] {
        assert!(t.row_id(row).is_none());
        assert!(!t.is_row_expanded(row));
    }
}

#[test]
fn test_duplicate_identity_rejected() {
    let mut t = table();
    let err = t
        .push_rows(vec![Record::new().set("id", 2).set("name", "again")])
        .unwrap_err();
    assert_eq!(err, TableError::duplicate_identity("id", "2"));
    assert_eq!(t.rows().len(), 3);
}

#[test]
fn test_set_identity_key_validates_existing_rows() {
    let mut t: Table<Record> = Table::new(vec![Column::new("id"), Column::new("group")]).unwrap();
    t.set_rows(vec![
        Record::new().set("id", 1).set("group", "a"),
        Record::new().set("id", 2).set("group", "a"),
    ])
    .unwrap();

    assert!(matches!(
        t.set_identity_key("group"),
        Err(TableError::DuplicateIdentity { .. })
    ));
    assert_eq!(t.identity_key(), None);

    t.set_identity_key("id").unwrap();
    assert_eq!(t.identity_key(), Some("id"));
    assert!(t.toggle_expanded(&RowId::from("2")).unwrap());
}

use csv_object::{CellValue, ColumnType, CsvObject, CsvObjectError, InvalidTyped, LoadOptions};
use std::io::Write;
use tempfile::{Builder, NamedTempFile};

fn csv_file(contents: &str) -> NamedTempFile {
    let mut file = Builder::new().suffix(".csv").tempfile().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn test_short_row_is_padded() {
    let file = csv_file("A,B,C\n1,2\n");
    let object = CsvObject::open(file.path()).unwrap();

    assert_eq!(
        object.row_data(),
        [vec![CellValue::from("1"), CellValue::from("2"), CellValue::from("")]]
    );
    for row in object.row_data() {
        assert_eq!(row.len(), object.headers().len());
    }
}

#[test]
fn test_short_row_typed_falls_back_to_string() {
    let file = csv_file("A,B,C\n1,2\n");
    let options = LoadOptions::new().with_column_types(vec![ColumnType::Int; 3]);
    let object = CsvObject::with_options(file.path(), options).unwrap();

    assert_eq!(
        object.row_data(),
        [vec![CellValue::Int(1), CellValue::Int(2), CellValue::from("")]]
    );
    assert_eq!(
        object.invalid_typed(),
        [InvalidTyped {
            column: 3,
            row: 2,
            value: String::new(),
            column_type: ColumnType::Int,
        }]
    );
}

#[test]
fn test_missing_to_zero_fills_numeric_columns() {
    let file = csv_file("i,f\n,\n7,\n");
    let options = LoadOptions::new()
        .with_column_types(vec![ColumnType::Int, ColumnType::Float])
        .with_missing_to_zero(true);
    let object = CsvObject::with_options(file.path(), options).unwrap();

    assert_eq!(
        object.row_data(),
        [
            vec![CellValue::Int(0), CellValue::Float(0.0)],
            vec![CellValue::Int(7), CellValue::Float(0.0)],
        ]
    );
    assert!(object.invalid_typed().is_empty());
}

#[test]
fn test_bool_columns_parse_spellings() {
    let file = csv_file("flag\nYes\nFALSE\noff\n1\nperhaps\n");
    let options = LoadOptions::new()
        .with_column_types(ColumnType::Bool)
        .with_set_columns(true);
    let object = CsvObject::with_options(file.path(), options).unwrap();

    assert_eq!(
        object.column("flag").unwrap(),
        [
            CellValue::Bool(true),
            CellValue::Bool(false),
            CellValue::Bool(false),
            CellValue::Bool(true),
            CellValue::from("perhaps"),
        ]
    );
    assert_eq!(object.invalid_typed().len(), 1);
    assert_eq!(object.invalid_typed()[0].row, 6);
}

#[test]
fn test_print_warnings_off_keeps_no_records() {
    let file = csv_file("A\nx\ny\n");
    let options = LoadOptions::new()
        .with_column_types(ColumnType::Float)
        .with_print_warnings(false);
    let object = CsvObject::with_options(file.path(), options).unwrap();

    assert_eq!(object.row_data(), [vec![CellValue::from("x")], vec![CellValue::from("y")]]);
    assert!(object.invalid_typed().is_empty());
}

#[test]
fn test_column_type_count_mismatch() {
    let file = csv_file("A,B,C\n1,2,3\n");

    for count in [2, 4] {
        let options = LoadOptions::new().with_column_types(vec![ColumnType::Int; count]);
        match CsvObject::with_options(file.path(), options) {
            Err(CsvObjectError::ColumnTypeCount { found, expected }) => {
                assert_eq!(found, count);
                assert_eq!(expected, 3);
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }
}

#[test]
fn test_column_by_name_matches_position() {
    let file = csv_file("A,B,C\n1,2,3\n4,5,6\n7,8,9\n");
    let object =
        CsvObject::with_options(file.path(), LoadOptions::new().with_set_columns(true)).unwrap();

    let by_name = object.column("B").unwrap();
    assert_eq!(by_name, object.column(1usize).unwrap());
    assert_eq!(
        by_name,
        [CellValue::from("2"), CellValue::from("5"), CellValue::from("8")]
    );
}

#[test]
fn test_overflow_cells_are_dropped_when_typed() {
    let file = csv_file("A,B\n1,2,3\n");
    let options = LoadOptions::new()
        .with_column_types(ColumnType::Int)
        .with_set_columns(true);
    let object = CsvObject::with_options(file.path(), options).unwrap();

    assert_eq!(object.row_data(), [vec![CellValue::Int(1), CellValue::Int(2)]]);
    assert!(object
        .row_data()
        .iter()
        .all(|row| row.len() == object.headers().len()));
    assert_eq!(object.column_data().unwrap().len(), 2);
    assert!(object.invalid_typed().is_empty());
}

#[test]
fn test_overflow_cells_are_kept_when_untyped() {
    let file = csv_file("A,B\n1,2,3\n");
    let object = CsvObject::open(file.path()).unwrap();

    assert_eq!(
        object.row_data(),
        [vec![CellValue::from("1"), CellValue::from("2"), CellValue::from("3")]]
    );
}

#[test]
fn test_missing_file_is_file_access_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = CsvObject::open(dir.path().join("absent.csv"));
    assert!(matches!(result, Err(CsvObjectError::FileAccess { .. })));
}

#[test]
fn test_empty_file_loads_empty() {
    let file = csv_file("");
    let object = CsvObject::open(file.path()).unwrap();
    assert!(object.headers().is_empty());
    assert_eq!(object.row_count(), 0);
}

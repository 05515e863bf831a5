use super::*;
use crate::value::StoreValue;

fn object(cells: Vec<Cell>) -> Column {
    Column::Object(cells)
}

#[test]
fn test_object_frame_basics() {
    let frame = Frame::from_columns([
        ("id", object(vec![Cell::Int(1), Cell::Int(2)])),
        ("tags", object(vec![Cell::List(vec![]), Cell::Absent])),
    ])
    .unwrap();

    assert_eq!(frame.column_names(), &["id".to_string(), "tags".to_string()]);
    assert_eq!(frame.num_columns(), 2);
    assert_eq!(frame.num_rows(), 2);
    assert_eq!(frame.dtypes(), vec![Dtype::Object, Dtype::Object]);
    assert!(frame.column("tags").is_some());
    assert!(frame.column("nope").is_none());
}

#[test]
fn test_to_rows_is_row_major_in_column_order() {
    let frame = Frame::from_columns([
        ("a", object(vec![Cell::Int(1), Cell::Int(2)])),
        ("b", object(vec![Cell::from("x"), Cell::from(StoreValue::Null)])),
    ])
    .unwrap();
    assert_eq!(
        frame.to_rows().unwrap(),
        vec![
            vec![Cell::Int(1), Cell::from("x")],
            vec![Cell::Int(2), Cell::Absent],
        ]
    );
}

#[test]
fn test_duplicate_and_ragged_columns_rejected() {
    let mut frame = Frame::new();
    frame.push_column("a", object(vec![Cell::Int(1)])).unwrap();

    let dup = frame.push_column("a", object(vec![Cell::Int(2)]));
    assert!(matches!(dup, Err(SpanframeError::SchemaMismatch(_))));

    let ragged = frame.push_column("b", object(vec![Cell::Int(1), Cell::Int(2)]));
    assert!(matches!(
        ragged,
        Err(SpanframeError::LengthMismatch { expected: 1, found: 2, .. })
    ));
    assert_eq!(frame.num_columns(), 1);
}

#[test]
fn test_empty_frame() {
    let frame = Frame::new();
    assert_eq!(frame.num_rows(), 0);
    assert!(frame.to_rows().unwrap().is_empty());
}

#[test]
fn test_object_cell_out_of_bounds() {
    let column = object(vec![Cell::Int(1)]);
    assert!(matches!(column.cell(1), Err(SpanframeError::LengthMismatch { .. })));
}

#[cfg(feature = "frame")]
mod arrow_backed {
    use super::*;
    use arrow::array::{
        DictionaryArray, Float32Array, Int64Array, NullArray, StringArray,
        TimestampNanosecondArray,
    };
    use arrow::datatypes::{Field, Int32Type, Schema};

    #[test]
    fn test_from_record_batch_keeps_names_and_types() {
        let schema = Arc::new(Schema::new(vec![
            Field::new("id", DataType::Int64, false),
            Field::new("name", DataType::Utf8, true),
            Field::new("score", DataType::Float32, true),
        ]));
        let batch = RecordBatch::try_new(
            schema,
            vec![
                Arc::new(Int64Array::from(vec![1, 2])),
                Arc::new(StringArray::from(vec![Some("a"), None])),
                Arc::new(Float32Array::from(vec![Some(0.5), None])),
            ],
        )
        .unwrap();

        let frame = Frame::from_record_batch(&batch);
        assert_eq!(frame.column_names(), &["id", "name", "score"]);
        assert_eq!(
            frame.dtypes(),
            vec![Dtype::Int64, Dtype::String, Dtype::Arrow(DataType::Float32)]
        );
        assert_eq!(
            frame.to_rows().unwrap(),
            vec![
                vec![Cell::Int(1), Cell::from("a"), Cell::Float(0.5)],
                vec![Cell::Int(2), Cell::Missing, Cell::Missing],
            ]
        );
    }

    #[test]
    fn test_timestamp_dtype_needs_utc_nanos() {
        let zoned: ArrayRef = Arc::new(TimestampNanosecondArray::from(vec![0]).with_timezone("UTC"));
        assert_eq!(Column::from(zoned).dtype(), Dtype::TimestampUtc);

        let naive: ArrayRef = Arc::new(TimestampNanosecondArray::from(vec![0]));
        assert!(matches!(Column::from(naive).dtype(), Dtype::Arrow(_)));
    }

    #[test]
    fn test_mixed_arrow_and_object_columns() {
        let ids: ArrayRef = Arc::new(Int64Array::from(vec![Some(7), None]));
        let frame = Frame::from_columns([
            ("id", Column::from(ids)),
            ("blob", object(vec![Cell::Bytes(vec![1]), Cell::Absent])),
        ])
        .unwrap();
        assert_eq!(
            frame.to_rows().unwrap(),
            vec![
                vec![Cell::Int(7), Cell::Bytes(vec![1])],
                vec![Cell::Missing, Cell::Absent],
            ]
        );
    }

    #[test]
    fn test_all_null_column_reads_as_missing() {
        let schema = Arc::new(Schema::new(vec![
            Field::new("id", DataType::Int64, false),
            Field::new("note", DataType::Null, true),
        ]));
        let batch = RecordBatch::try_new(
            schema,
            vec![
                Arc::new(Int64Array::from(vec![1])),
                Arc::new(NullArray::new(1)),
            ],
        )
        .unwrap();

        let frame = Frame::from_record_batch(&batch);
        assert_eq!(frame.to_rows().unwrap(), vec![vec![Cell::Int(1), Cell::Missing]]);
    }

    #[test]
    fn test_dictionary_column_unpacks_values() {
        let categories: DictionaryArray<Int32Type> =
            vec![Some("red"), None, Some("blue"), Some("red")].into_iter().collect();
        let column = Column::from(Arc::new(categories) as ArrayRef);
        assert_eq!(
            column.to_cells().unwrap(),
            vec![Cell::from("red"), Cell::Missing, Cell::from("blue"), Cell::from("red")]
        );
    }
}

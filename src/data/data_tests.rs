use super::*;
use std::io::Write;
use tempfile::NamedTempFile;

fn sample() -> DataFrame {
    let columns = vec![
        ("Bogor".to_string(), vec![11_500.0, 27_000.0, 120_000.0]),
        ("Depok".to_string(), vec![11_800.0, 26_500.0, 118_000.0]),
    ];
    let index = vec![
        "Beras".to_string(),
        "Telur Ayam".to_string(),
        "Daging Sapi".to_string(),
    ];
    DataFrame::new(index, columns).expect("valid frame")
}

#[test]
fn test_new_and_shape() {
    let df = sample();
    assert_eq!(df.shape(), (3, 2));
    assert_eq!(df.column_names(), vec!["Bogor", "Depok"]);
    assert!(df.has_labelled_index());
    assert_eq!(df.column("Depok").expect("exists")[1], 26_500.0);
    assert_eq!(df.row(2).expect("in bounds"), vec![120_000.0, 118_000.0]);
}

#[test]
fn test_new_rejects_bad_columns() {
    assert!(DataFrame::with_default_index(vec![]).is_err());

    let ragged = vec![
        ("a".to_string(), vec![1.0, 2.0]),
        ("b".to_string(), vec![1.0]),
    ];
    assert!(DataFrame::with_default_index(ragged).is_err());

    let dup = vec![("a".to_string(), vec![1.0]), ("a".to_string(), vec![2.0])];
    assert!(DataFrame::with_default_index(dup).is_err());

    let unnamed = vec![(String::new(), vec![1.0])];
    assert!(DataFrame::with_default_index(unnamed).is_err());

    let short_index = DataFrame::new(vec!["x".to_string()], vec![("a".to_string(), vec![1.0, 2.0])]);
    assert!(matches!(short_index, Err(PanganError::DimensionMismatch { .. })));
}

#[test]
fn test_default_index_labels() {
    let df = DataFrame::with_default_index(vec![("a".to_string(), vec![1.0, 2.0])]).expect("valid");
    assert_eq!(df.index(), &["row_0".to_string(), "row_1".to_string()]);
    assert!(!df.has_labelled_index());
}

#[test]
fn test_missing_column_and_row() {
    let df = sample();
    assert!(df.column("Jakarta").unwrap_err().is_parameter_error());
    assert!(df.row(3).is_err());
}

#[test]
fn test_to_matrix_is_row_major() {
    let m = sample().to_matrix().expect("columns match the index");
    assert_eq!(m.shape(), (3, 2));
    assert_eq!(m.row(0), &[11_500.0, 11_800.0]);
    assert_eq!(m.get(2, 1), 118_000.0);
}

#[test]
fn test_to_matrix_reports_short_column() {
    let broken = DataFrame {
        index: vec!["Beras".to_string(), "Gula".to_string()],
        columns: vec![
            ("Bogor".to_string(), vec![1.0, 2.0]),
            ("Depok".to_string(), vec![3.0]),
        ],
        n_rows: 2,
        labelled_index: true,
    };
    match broken.to_matrix() {
        Err(PanganError::DimensionMismatch { expected, actual }) => {
            assert!(expected.contains("Depok"));
            assert_eq!(actual, "1");
        }
        other => panic!("expected dimension mismatch, got {other:?}"),
    }
}

#[test]
fn test_load_table_dispatches_on_extension() {
    let dir = tempfile::tempdir().expect("temp dir");

    let csv_path = dir.path().join("harga.CSV");
    std::fs::write(&csv_path, ",Bogor,Depok\nBeras,1,2\n").expect("write csv");
    let df = load_table(&csv_path).expect("csv by extension");
    assert_eq!(df.shape(), (1, 2));

    // Not a workbook, so the Excel reader must reject it.
    let fake = dir.path().join("harga.XLSX");
    std::fs::write(&fake, ",Bogor,Depok\nBeras,1,2\n").expect("write");
    assert!(matches!(load_table(&fake), Err(PanganError::Parse { .. })));
}

#[test]
fn test_transpose_swaps_orientation() {
    let df = sample();
    let t = df.transpose().expect("unique labels");
    assert_eq!(t.shape(), (2, 3));
    assert_eq!(t.index(), &["Bogor".to_string(), "Depok".to_string()]);
    assert_eq!(t.column_names(), vec!["Beras", "Telur Ayam", "Daging Sapi"]);
    assert_eq!(t.row(1).expect("Depok"), vec![11_800.0, 26_500.0, 118_000.0]);

    let back = t.transpose().expect("unique labels");
    assert_eq!(back, df);
}

#[test]
fn test_transpose_rejects_repeated_row_labels() {
    let df = DataFrame::new(
        vec!["Beras".to_string(), "Beras".to_string()],
        vec![("Bogor".to_string(), vec![1.0, 2.0])],
    )
    .expect("row labels may repeat");
    assert!(df.transpose().is_err());
}

#[test]
fn test_from_matrix() {
    let m = Matrix::from_rows(&[[1.0, 2.0], [3.0, 4.0]]).expect("valid");
    let df = DataFrame::from_matrix(
        vec!["r1".to_string(), "r2".to_string()],
        vec!["a".to_string(), "b".to_string()],
        &m,
    )
    .expect("labels match shape");
    assert_eq!(df.column("b").expect("exists"), &[2.0, 4.0]);
    assert_eq!(df.to_matrix().expect("rectangular"), m);

    assert!(DataFrame::from_matrix(vec![], vec!["a".to_string()], &m).is_err());
}

#[test]
fn test_describe() {
    let df = DataFrame::with_default_index(vec![("x".to_string(), vec![4.0, 1.0, 3.0, 2.0])])
        .expect("valid");
    let stats = &df.describe()[0];
    assert_eq!(stats.count, 4);
    assert!((stats.mean - 2.5).abs() < 1e-12);
    assert!((stats.median - 2.5).abs() < 1e-12);
    assert_eq!(stats.min, 1.0);
    assert_eq!(stats.max, 4.0);
    assert!((stats.std - (5.0f64 / 3.0).sqrt()).abs() < 1e-12);
}

#[test]
fn test_load_labelled_csv() {
    let mut file = NamedTempFile::new().expect("temp file");
    writeln!(file, ",Bogor,Depok,Bekasi").expect("write header");
    writeln!(file, "Beras, 11500 ,11800,11600").expect("write row");
    writeln!(file, "Gula Pasir,17000,16800,17250").expect("write row");

    let df = CsvLoader::load(file.path()).expect("load CSV");
    assert_eq!(df.shape(), (2, 3));
    assert_eq!(df.index(), &["Beras".to_string(), "Gula Pasir".to_string()]);
    assert_eq!(df.column("Bogor").expect("exists"), &[11_500.0, 17_000.0]);
}

#[test]
fn test_load_detects_text_first_column_with_header() {
    let csv = "Komoditas,Bogor,Depok\nBeras,1,2\nTelur Ayam,3,4\n";
    let df = CsvLoader::from_reader(csv.as_bytes()).expect("parse");
    assert_eq!(df.column_names(), vec!["Bogor", "Depok"]);
    assert_eq!(df.index()[1], "Telur Ayam");
}

#[test]
fn test_load_all_numeric_uses_default_index() {
    let csv = "Bogor,Depok\n1,2\n3,4\n";
    let df = CsvLoader::from_reader(csv.as_bytes()).expect("parse");
    assert_eq!(df.shape(), (2, 2));
    assert!(!df.has_labelled_index());
    assert_eq!(df.index()[0], "row_0");
}

#[test]
fn test_load_blank_header_gets_placeholder_name() {
    let csv = "Bogor,,Depok\n1,2,3\n";
    let df = CsvLoader::from_reader(csv.as_bytes()).expect("parse");
    assert_eq!(df.column_names(), vec!["Bogor", "Unnamed: 1", "Depok"]);
}

#[test]
fn test_load_non_numeric_cell_names_line() {
    let csv = ",Bogor,Depok\nBeras,1,2\nGula,3,mahal\n";
    match CsvLoader::from_reader(csv.as_bytes()) {
        Err(PanganError::Parse { line, message }) => {
            assert_eq!(line, 3);
            assert!(message.contains("Depok"), "message: {message}");
            assert!(message.contains("mahal"), "message: {message}");
        }
        other => panic!("expected parse error, got {other:?}"),
    }
}

#[test]
fn test_load_missing_cell_is_parse_error() {
    let csv = ",Bogor,Depok\nBeras,1,\n";
    assert!(matches!(
        CsvLoader::from_reader(csv.as_bytes()),
        Err(PanganError::Parse { line: 2, .. })
    ));
}

#[test]
fn test_load_non_finite_cell_is_parse_error() {
    let csv = "a,b\n1,inf\n";
    assert!(matches!(
        CsvLoader::from_reader(csv.as_bytes()),
        Err(PanganError::Parse { .. })
    ));
}

#[test]
fn test_load_ragged_row_is_parse_error() {
    let csv = "a,b\n1,2\n3\n";
    assert!(matches!(
        CsvLoader::from_reader(csv.as_bytes()),
        Err(PanganError::Parse { .. })
    ));
}

#[test]
fn test_load_empty_inputs() {
    assert!(matches!(
        CsvLoader::from_reader("Bogor,Depok\n".as_bytes()),
        Err(PanganError::EmptyInput { .. })
    ));
    assert!(matches!(
        CsvLoader::from_reader("".as_bytes()),
        Err(PanganError::EmptyInput { .. })
    ));
    // Only a label column, nothing numeric.
    assert!(matches!(
        CsvLoader::from_reader(",\nBeras,\n".as_bytes()),
        Err(PanganError::EmptyInput { .. }) | Err(PanganError::Parse { .. })
    ));
}

#[test]
fn test_load_missing_file_is_io_error() {
    let dir = tempfile::tempdir().expect("temp dir");
    assert!(matches!(
        CsvLoader::load(dir.path().join("absent.csv")),
        Err(PanganError::Io(_))
    ));
}

#[test]
fn test_csv_write_then_load_keeps_labels() {
    let df = sample();
    let mut buf = Vec::new();
    df.to_csv(&mut buf).expect("write");
    let text = String::from_utf8(buf).expect("utf8");
    assert!(text.starts_with(",Bogor,Depok\n"), "got: {text}");
    assert!(text.contains("Telur Ayam,27000,26500"));

    let back = CsvLoader::from_reader(text.as_bytes()).expect("parse");
    assert_eq!(back, df);
}

#[test]
fn test_csv_write_without_labels() {
    let df = DataFrame::with_default_index(vec![("a".to_string(), vec![0.5])]).expect("valid");
    let mut buf = Vec::new();
    df.to_csv(&mut buf).expect("write");
    assert_eq!(String::from_utf8(buf).expect("utf8"), "a\n0.5\n");
}

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use super::{InputError, NOTE_COLUMN, load_dataset, normalize_header, sniff_delimiter};
use crate::model::criteria::Criterion;

static DIR_COUNTER: AtomicUsize = AtomicUsize::new(0);

fn make_temp_dir() -> PathBuf {
    let mut dir = std::env::temp_dir();
    let id = DIR_COUNTER.fetch_add(1, Ordering::SeqCst);
    dir.push(format!("saw_rank_input_test_{}_{}", std::process::id(), id));
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn write_file(path: &Path, contents: &str) {
    fs::write(path, contents).unwrap();
}

fn trio() -> Vec<Criterion> {
    [
        "nilai_tes_tertulis",
        "nilai_wawancara",
        "pengalaman_kerja_tahun",
    ]
    .iter()
    .map(|n| Criterion::new(*n))
    .collect()
}

#[test]
fn test_load_comma_csv() {
    let dir = make_temp_dir();
    let path = dir.join("kandidat.csv");
    write_file(
        &path,
        "nama,nilai_tes_tertulis,nilai_wawancara,pengalaman_kerja_tahun\n\
         ani,80,70,2\n\
         budi,90,60,5\n",
    );

    let dataset = load_dataset(&path, &trio(), "nama", None).unwrap();
    assert_eq!(dataset.delimiter, b',');
    assert_eq!(dataset.candidates.len(), 2);
    assert_eq!(dataset.candidates[0].name, "ani");
    assert_eq!(dataset.candidates[0].values, vec![80.0, 70.0, 2.0]);
    assert_eq!(dataset.candidates[1].values, vec![90.0, 60.0, 5.0]);
    assert_eq!(dataset.id_column, "nama");
    assert!(dataset.note_column.is_none());
    assert!(dataset.candidates[0].note.is_none());
}

#[test]
fn test_sniffs_semicolon() {
    let dir = make_temp_dir();
    let path = dir.join("kandidat.csv");
    write_file(
        &path,
        "nama;nilai_tes_tertulis;nilai_wawancara;pengalaman_kerja_tahun\n\
         ani;80;70;2\n",
    );

    let dataset = load_dataset(&path, &trio(), "nama", None).unwrap();
    assert_eq!(dataset.delimiter, b';');
    assert_eq!(dataset.candidates[0].values, vec![80.0, 70.0, 2.0]);
}

#[test]
fn test_sniffs_tab() {
    let dir = make_temp_dir();
    let path = dir.join("kandidat.tsv");
    write_file(
        &path,
        "nama\tnilai_tes_tertulis\tnilai_wawancara\tpengalaman_kerja_tahun\n\
         ani\t80\t70\t2\n",
    );

    let dataset = load_dataset(&path, &trio(), "nama", None).unwrap();
    assert_eq!(dataset.delimiter, b'\t');
    assert_eq!(dataset.candidates.len(), 1);
}

#[test]
fn test_forced_delimiter_wins() {
    let dir = make_temp_dir();
    let path = dir.join("kandidat.csv");
    write_file(
        &path,
        "nama;nilai_tes_tertulis;nilai_wawancara;pengalaman_kerja_tahun\n\
         ani;80;70;2\n",
    );

    let forced = load_dataset(&path, &trio(), "nama", Some(b';')).unwrap();
    assert_eq!(forced.delimiter, b';');

    // Forcing the wrong delimiter leaves one fused header, so the
    // identifier column cannot resolve.
    let err = load_dataset(&path, &trio(), "nama", Some(b',')).unwrap_err();
    assert!(matches!(err, InputError::MissingColumn(_)));
}

#[test]
fn test_bom_and_header_case() {
    let dir = make_temp_dir();
    let path = dir.join("kandidat.csv");
    write_file(
        &path,
        "\u{feff} Nama ,NILAI_TES_TERTULIS,Nilai_Wawancara,pengalaman_kerja_tahun\n\
         ani,80,70,2\n",
    );

    let dataset = load_dataset(&path, &trio(), "nama", None).unwrap();
    assert_eq!(dataset.id_column, "nama");
    assert_eq!(dataset.candidates[0].values, vec![80.0, 70.0, 2.0]);
}

#[test]
fn test_note_column_round_trip() {
    let dir = make_temp_dir();
    let path = dir.join("kandidat.csv");
    write_file(
        &path,
        "nama,nilai_tes_tertulis,nilai_wawancara,pengalaman_kerja_tahun,rekomendasi\n\
         ani,80,70,2,\n\
         budi,90,60,5,direkomendasikan\n",
    );

    let dataset = load_dataset(&path, &trio(), "nama", None).unwrap();
    assert_eq!(dataset.note_column.as_deref(), Some(NOTE_COLUMN));
    assert!(dataset.candidates[0].note.is_none());
    assert_eq!(
        dataset.candidates[1].note.as_deref(),
        Some("direkomendasikan")
    );
}

#[test]
fn test_missing_criterion_column() {
    let dir = make_temp_dir();
    let path = dir.join("kandidat.csv");
    write_file(
        &path,
        "nama,nilai_tes_tertulis,nilai_wawancara\nani,80,70\n",
    );

    let err = load_dataset(&path, &trio(), "nama", None).unwrap_err();
    match err {
        InputError::MissingColumn(msg) => assert!(msg.contains("pengalaman_kerja_tahun")),
        other => panic!("expected MissingColumn, got {other:?}"),
    }
}

#[test]
fn test_missing_id_column() {
    let dir = make_temp_dir();
    let path = dir.join("kandidat.csv");
    write_file(
        &path,
        "nilai_tes_tertulis,nilai_wawancara,pengalaman_kerja_tahun\n80,70,2\n",
    );

    let err = load_dataset(&path, &trio(), "nama", None).unwrap_err();
    match err {
        InputError::MissingColumn(msg) => assert!(msg.contains("nama")),
        other => panic!("expected MissingColumn, got {other:?}"),
    }
}

#[test]
fn test_non_numeric_value_names_line_and_criterion() {
    let dir = make_temp_dir();
    let path = dir.join("kandidat.csv");
    write_file(
        &path,
        "nama,nilai_tes_tertulis,nilai_wawancara,pengalaman_kerja_tahun\n\
         ani,80,70,2\n\
         budi,banyak,60,5\n",
    );

    let err = load_dataset(&path, &trio(), "nama", None).unwrap_err();
    match err {
        InputError::Parse(msg) => {
            assert!(msg.contains("line 3"), "line missing from: {msg}");
            assert!(
                msg.contains("nilai_tes_tertulis"),
                "criterion missing from: {msg}"
            );
            assert!(msg.contains("banyak"), "offending value missing from: {msg}");
        }
        other => panic!("expected Parse, got {other:?}"),
    }
}

#[test]
fn test_empty_file_rejected() {
    let dir = make_temp_dir();
    let path = dir.join("kandidat.csv");
    write_file(&path, "");

    let err = load_dataset(&path, &trio(), "nama", None).unwrap_err();
    assert!(matches!(err, InputError::Parse(_)));
}

#[test]
fn test_header_only_gives_empty_dataset() {
    let dir = make_temp_dir();
    let path = dir.join("kandidat.csv");
    write_file(
        &path,
        "nama,nilai_tes_tertulis,nilai_wawancara,pengalaman_kerja_tahun\n",
    );

    let dataset = load_dataset(&path, &trio(), "nama", None).unwrap();
    assert!(dataset.candidates.is_empty());
}

#[test]
fn test_interior_blank_lines_skipped() {
    let dir = make_temp_dir();
    let path = dir.join("kandidat.csv");
    write_file(
        &path,
        "nama,nilai_tes_tertulis,nilai_wawancara,pengalaman_kerja_tahun\n\
         ani,80,70,2\n\
         \n\
         budi,90,60,5\n\
         \n",
    );

    let dataset = load_dataset(&path, &trio(), "nama", None).unwrap();
    assert_eq!(dataset.candidates.len(), 2);
    assert_eq!(dataset.candidates[0].name, "ani");
    assert_eq!(dataset.candidates[1].name, "budi");
}

#[test]
fn test_blank_identifier_row_skipped() {
    let dir = make_temp_dir();
    let path = dir.join("kandidat.csv");
    write_file(
        &path,
        "nama,nilai_tes_tertulis,nilai_wawancara,pengalaman_kerja_tahun\n\
         ,80,70,2\n\
         budi,90,60,5\n",
    );

    let dataset = load_dataset(&path, &trio(), "nama", None).unwrap();
    assert_eq!(dataset.candidates.len(), 1);
    assert_eq!(dataset.candidates[0].name, "budi");
}

#[test]
fn test_duplicate_identifiers_both_kept() {
    let dir = make_temp_dir();
    let path = dir.join("kandidat.csv");
    write_file(
        &path,
        "nama,nilai_tes_tertulis,nilai_wawancara,pengalaman_kerja_tahun\n\
         ani,80,70,2\n\
         ani,90,60,5\n",
    );

    let dataset = load_dataset(&path, &trio(), "nama", None).unwrap();
    assert_eq!(dataset.candidates.len(), 2);
}

#[test]
fn test_whitespace_in_cells_tolerated() {
    let dir = make_temp_dir();
    let path = dir.join("kandidat.csv");
    write_file(
        &path,
        "nama,nilai_tes_tertulis,nilai_wawancara,pengalaman_kerja_tahun\n\
         ani , 80 , 70 , 2\n",
    );

    let dataset = load_dataset(&path, &trio(), "nama", None).unwrap();
    assert_eq!(dataset.candidates[0].name, "ani");
    assert_eq!(dataset.candidates[0].values, vec![80.0, 70.0, 2.0]);
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = make_temp_dir();
    let err = load_dataset(&dir.join("absent.csv"), &trio(), "nama", None).unwrap_err();
    assert!(matches!(err, InputError::Io(_)));
}

#[test]
fn test_sniff_delimiter_majority_and_tie() {
    assert_eq!(sniff_delimiter("a;b;c\n"), b';');
    assert_eq!(sniff_delimiter("a\tb\tc\n"), b'\t');
    // One of each: the comma wins the tie.
    assert_eq!(sniff_delimiter("a,b;c\td\n"), b',');
    assert_eq!(sniff_delimiter("plain\n"), b',');
}

#[test]
fn test_normalize_header() {
    assert_eq!(normalize_header(" Nama "), "nama");
    assert_eq!(normalize_header("NILAI_TES_TERTULIS"), "nilai_tes_tertulis");
}

#[test]
fn test_load_logs_delimiter_and_resolved_columns() {
    use std::io;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct Capture(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Capture {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }
        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    let dir = make_temp_dir();
    let path = dir.join("kandidat.csv");
    write_file(
        &path,
        "nama,nilai_tes_tertulis,nilai_wawancara,pengalaman_kerja_tahun,rekomendasi\n\
         ani,80,70,2,ok\n",
    );

    let capture = Capture::default();
    let sink = capture.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .with_writer(move || sink.clone())
        .finish();

    tracing::subscriber::with_default(subscriber, || {
        load_dataset(&path, &trio(), "nama", None).unwrap();
    });

    let logs = String::from_utf8(capture.0.lock().unwrap().clone()).unwrap();
    assert!(logs.contains("reading dataset"), "missing from: {logs}");
    assert!(logs.contains("delimiter"), "missing from: {logs}");
    assert!(
        logs.contains("resolved dataset columns"),
        "missing from: {logs}"
    );
    assert!(logs.contains("id_column=0"), "missing from: {logs}");
    assert!(
        logs.contains("criterion_columns=[1, 2, 3]"),
        "missing from: {logs}"
    );
    assert!(logs.contains("note_column=Some(4)"), "missing from: {logs}");
    assert!(logs.contains("dataset loaded"), "missing from: {logs}");
}

mod common;
use common::{lines, monday_clock, temp_stores};
use rust_xlsxwriter::Workbook;
use std::fs;
use std::io::Write;
use std::path::Path;
use worklogger::core::SessionLogger;
use worklogger::core::record::HEADERS;
use worklogger::errors::AppError;
use worklogger::store::xlsx_reader::read_first_sheet;
use worklogger::store::{delimited, tabular};

const HEADER_LINE: &str = "Description;Date;Week;Time Spent;Hours;Minutes;Seconds";

#[test]
fn test_ensure_stores_exist_creates_headers_once() {
    let paths = temp_stores("ensure_stores");
    let logger = SessionLogger::with_clock(paths.clone(), monday_clock());

    let created = logger.ensure_stores_exist().expect("ensure stores");
    assert_eq!(created, vec![paths.tabular.clone(), paths.delimited.clone()]);

    assert_eq!(lines(&paths.delimited), vec!["sep=;", HEADER_LINE]);
    assert!(tabular::read_rows(&paths.tabular).expect("read xlsx").is_empty());

    let created = logger.ensure_stores_exist().expect("ensure stores again");
    assert!(created.is_empty());
    assert_eq!(lines(&paths.delimited).len(), 2);
}

#[test]
fn test_two_sessions_give_one_header_and_two_rows() {
    let paths = temp_stores("two_sessions");
    let logger = SessionLogger::with_clock(paths.clone(), monday_clock());

    logger
        .log_session("Write docs", 5400.9)
        .into_result()
        .expect("first session");
    logger
        .log_session("Fix bug", 362139.0)
        .into_result()
        .expect("second session");

    assert_eq!(
        lines(&paths.delimited),
        vec![
            "sep=;",
            HEADER_LINE,
            "Write docs;2025-03-10;11;1.5;1;30;0",
            "Fix bug;2025-03-10;11;100.66666666666667;100;40;39",
        ]
    );

    let rows = tabular::read_rows(&paths.tabular).expect("read xlsx");
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].description, "Write docs");
    assert_eq!(rows[1].description, "Fix bug");
    assert_eq!((rows[1].hours, rows[1].minutes, rows[1].seconds), (100, 40, 39));

    // both stores hold the same projection
    assert_eq!(rows, delimited::read_rows(&paths.delimited).expect("read csv"));
}

#[test]
fn test_record_is_dated_by_the_logger_clock() {
    let paths = temp_stores("logger_clock_date");
    let clock = monday_clock();
    clock.advance_secs(7.0 * 86400.0);
    let logger = SessionLogger::with_clock(paths.clone(), clock);

    let record = logger
        .log_session("Planning", 60.0)
        .into_result()
        .expect("log session");

    assert_eq!(record.date.to_string(), "2025-03-17");
    assert_eq!(record.iso_week(), 12);

    let rows = tabular::read_rows(&paths.tabular).expect("read xlsx");
    assert_eq!(rows[0].date, record.date);
    assert_eq!(rows[0].week, 12);
}

#[test]
fn test_existing_csv_without_header_gets_no_header() {
    let paths = temp_stores("csv_without_header");
    fs::write(&paths.delimited, "Old entry;2025-03-03;10;0;0;0;5\n").expect("seed csv");

    let logger = SessionLogger::with_clock(paths.clone(), monday_clock());
    logger.log_session("New entry", 90.0).into_result().expect("log");
    logger.log_session("Another", 30.0).into_result().expect("log");

    let content = lines(&paths.delimited);
    assert_eq!(
        content,
        vec![
            "Old entry;2025-03-03;10;0;0;0;5",
            "New entry;2025-03-10;11;0.016666666666666666;0;1;30",
            "Another;2025-03-10;11;0;0;0;30",
        ]
    );
    assert!(!content.iter().any(|l| l == HEADER_LINE || l == "sep=;"));
}

#[test]
fn test_descriptions_with_delimiters_survive_both_stores() {
    let paths = temp_stores("tricky_descriptions");
    let logger = SessionLogger::with_clock(paths.clone(), monday_clock());

    let tricky = [
        "Meeting; budget \"Q3\"",
        "Line one\nline two",
        "<tags> & entities 'quoted'",
        "Caffè ☕ e documentazione",
    ];
    for desc in tricky {
        logger.log_session(desc, 125.0).into_result().expect("log");
    }

    let from_csv: Vec<String> = delimited::read_rows(&paths.delimited)
        .expect("read csv")
        .into_iter()
        .map(|r| r.description)
        .collect();
    let from_xlsx: Vec<String> = tabular::read_rows(&paths.tabular)
        .expect("read xlsx")
        .into_iter()
        .map(|r| r.description)
        .collect();

    assert_eq!(from_csv, tricky);
    assert_eq!(from_xlsx, tricky);
}

#[test]
fn test_empty_description_is_logged_as_empty_text() {
    let paths = temp_stores("empty_description");
    let logger = SessionLogger::with_clock(paths.clone(), monday_clock());

    logger.log_session("", 61.0).into_result().expect("log");

    let xlsx = tabular::read_rows(&paths.tabular).expect("read xlsx");
    let csv = delimited::read_rows(&paths.delimited).expect("read csv");
    assert_eq!(xlsx.len(), 1);
    assert_eq!(xlsx[0].description, "");
    assert_eq!(csv[0].description, "");
    assert_eq!(csv[0].minutes, 1);
}

#[test]
fn test_malformed_workbook_fails_only_the_tabular_store() {
    let paths = temp_stores("malformed_workbook");
    fs::write(&paths.tabular, "definitely not a zip file").expect("seed xlsx");

    let logger = SessionLogger::with_clock(paths.clone(), monday_clock());
    let report = logger.log_session("Still logged in CSV", 10.0);

    assert!(matches!(report.tabular, Err(AppError::MalformedStore { .. })));
    assert!(report.delimited.is_ok());
    assert!(!report.is_complete());

    // the broken workbook is left as it was
    assert_eq!(
        fs::read_to_string(&paths.tabular).expect("read xlsx"),
        "definitely not a zip file"
    );
    assert_eq!(lines(&paths.delimited).len(), 3);

    match report.into_result() {
        Err(AppError::Log(msg)) => {
            assert!(msg.contains("tabular store"));
            assert!(!msg.contains("delimited store"));
        }
        other => panic!("expected a log error, got {other:?}"),
    }
}

#[test]
fn test_workbook_with_foreign_header_is_malformed() {
    let paths = temp_stores("foreign_header");
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.write_string(0, 0, "Name").unwrap();
    sheet.write_string(0, 1, "Amount").unwrap();
    workbook.save(&paths.tabular).unwrap();

    let err = tabular::read_rows(&paths.tabular).unwrap_err();
    assert!(matches!(err, AppError::MalformedStore { .. }));
    assert!(err.to_string().contains("unexpected header"));
}

#[test]
fn test_workbook_with_text_dates_is_extended() {
    // rows written by an older tool: dates as text, time spent in seconds
    let paths = temp_stores("text_dates");
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    for (col, h) in HEADERS.iter().enumerate() {
        sheet.write_string(0, col as u16, *h).unwrap();
    }
    sheet.write_string(1, 0, "Legacy").unwrap();
    sheet.write_string(1, 1, "2024-11-05").unwrap();
    sheet.write_number(1, 2, 45).unwrap();
    sheet.write_number(1, 3, 3725.5).unwrap();
    sheet.write_number(1, 4, 1).unwrap();
    sheet.write_number(1, 5, 2).unwrap();
    sheet.write_number(1, 6, 5).unwrap();
    workbook.save(&paths.tabular).unwrap();

    let logger = SessionLogger::with_clock(paths.clone(), monday_clock());
    logger.log_session("Current", 60.0).into_result().expect("log");

    let rows = tabular::read_rows(&paths.tabular).expect("read xlsx");
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].description, "Legacy");
    assert_eq!(rows[0].date.to_string(), "2024-11-05");
    assert_eq!(rows[0].time_spent, 3725.5);
    assert_eq!(rows[1].description, "Current");
}

/// A bare workbook as spreadsheet scripts save it: inline-string header and
/// a "Time Spent" formula with no cached result.
fn write_formula_workbook(path: &Path, time_spent_cell: &str) {
    let header: String = HEADERS
        .iter()
        .zip('A'..)
        .map(|(h, col)| format!(r#"<c r="{col}1" t="inlineStr"><is><t>{h}</t></is></c>"#))
        .collect();
    let data = [
        r#"<c r="A2" t="inlineStr"><is><t>Scripted</t></is></c>"#,
        r#"<c r="B2"><v>45600</v></c><c r="C2"><v>45</v></c>"#,
        time_spent_cell,
        r#"<c r="E2"><v>2</v></c><c r="F2"><v>15</v></c><c r="G2"><v>7</v></c>"#,
    ]
    .concat();
    let sheet = format!(
        r#"<worksheet><sheetData><row r="1">{}</row><row r="2">{}</row></sheetData></worksheet>"#,
        header, data
    );

    let mut zip = zip::ZipWriter::new(fs::File::create(path).expect("create xlsx"));
    let options = zip::write::SimpleFileOptions::default()
        .compression_method(zip::CompressionMethod::Stored);
    zip.start_file("xl/worksheets/sheet1.xml", options).expect("start sheet");
    zip.write_all(sheet.as_bytes()).expect("write sheet");
    zip.finish().expect("finish zip");
}

#[test]
fn test_workbook_with_uncomputed_formulas_is_extended() {
    for (name, cell) in [
        ("formula_empty_value", r#"<c r="D2"><f>E2+F2/60</f><v></v></c>"#),
        ("formula_no_value", r#"<c r="D2"><f>E2+F2/60</f></c>"#),
    ] {
        let paths = temp_stores(name);
        write_formula_workbook(&paths.tabular, cell);

        let logger = SessionLogger::with_clock(paths.clone(), monday_clock());
        logger.log_session("New", 60.0).into_result().expect("log");

        let rows = tabular::read_rows(&paths.tabular).expect("read xlsx");
        assert_eq!(rows.len(), 2, "{name}");
        assert_eq!(rows[0].description, "Scripted");
        assert_eq!(rows[0].time_spent, 2.25);
        assert_eq!((rows[0].hours, rows[0].minutes, rows[0].seconds), (2, 15, 7));
        assert_eq!(rows[1].description, "New");
    }
}

#[test]
fn test_directory_at_store_path_is_an_io_error() {
    let paths = temp_stores("store_is_dir");
    fs::create_dir_all(&paths.tabular).expect("dir at xlsx path");
    fs::create_dir_all(&paths.delimited).expect("dir at csv path");

    assert!(matches!(read_first_sheet(&paths.tabular), Err(AppError::Io(_))));

    let logger = SessionLogger::with_clock(paths.clone(), monday_clock());
    let report = logger.log_session("Lost", 60.0);
    assert!(matches!(report.tabular, Err(AppError::Io(_))));
    assert!(matches!(report.delimited, Err(AppError::Io(_))));
}

#[test]
fn test_no_temporary_workbook_is_left_behind() {
    let paths = temp_stores("no_tmp_left");
    let logger = SessionLogger::with_clock(paths.clone(), monday_clock());
    logger.log_session("Tidy", 1.0).into_result().expect("log");

    let dir = paths.tabular.parent().unwrap();
    let names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
        .collect();
    assert!(names.iter().all(|n| !n.ends_with(".tmp")), "{names:?}");
}

#[test]
fn test_stores_are_created_in_missing_directories() {
    let mut paths = temp_stores("nested_dirs");
    let base = paths.tabular.parent().unwrap().join("a").join("b");
    paths.tabular = base.join("log.xlsx");
    paths.delimited = base.join("log.csv");

    let logger = SessionLogger::with_clock(paths.clone(), monday_clock());
    logger.log_session("Deep", 5.0).into_result().expect("log");

    assert!(paths.tabular.exists());
    assert!(paths.delimited.exists());
}

// End-to-end classification over generated call-center exports
//
// Each test writes a workbook into a temp directory, runs the full pipeline,
// and reads both result workbooks back.

mod utils;

use std::fs;

use call_repeat::export::{CROSS_GROUP_FILE, SAME_GROUP_FILE};
use call_repeat::{process_workbook, process_workbook_with_config, ClassifierConfig, ErrorKind};
use rust_xlsxwriter::{ExcelDateTime, Format, Workbook};
use tempfile::TempDir;
use utils::{call, headers, read_sheet, write_export, HEADERS};

const EXCLUDED: &str = "线上运营组";

fn run(rows: &[Vec<String>]) -> (TempDir, call_repeat::ClassificationSummary) {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("calls.xlsx");
    write_export(&input, &HEADERS, rows);
    let summary = process_workbook(&input, dir.path()).unwrap();
    (dir, summary)
}

fn same_rows(dir: &TempDir) -> Vec<Vec<String>> {
    read_sheet(&dir.path().join(SAME_GROUP_FILE))
}

fn cross_rows(dir: &TempDir) -> Vec<Vec<String>> {
    read_sheet(&dir.path().join(CROSS_GROUP_FILE))
}

#[test]
fn test_window_excludes_third_call() {
    let rows = vec![
        call("1", "2024-03-01 08:00:00", "13800000000", "A组", "A组", "8001", "张三"),
        call("2", "2024-03-01 09:00:00", "13800000000", "A组", "A组", "8002", "李四"),
        call("3", "2024-03-02 14:00:00", "13800000000", "A组", "A组", "8003", "王五"),
    ];
    let (dir, summary) = run(&rows);

    assert_eq!((summary.same_group, summary.cross_group), (1, 0));
    let same = same_rows(&dir);
    assert_eq!(same, vec![headers(), rows[0].clone(), rows[1].clone()]);
    assert_eq!(cross_rows(&dir), vec![headers()]);
}

#[test]
fn test_dropped_record_lets_neighbors_pair() {
    let rows = vec![
        call("1", "2024-03-01 08:00:00", "13800000000", "A组", "A组", "8001", "张三"),
        call("2", "2024-03-01 08:30:00", "13800000000", "A组", "A组", "8002", ""),
        call("3", "2024-03-01 09:00:00", "13800000000", "B组", "A组", "8003", "王五"),
    ];
    let (dir, summary) = run(&rows);

    assert_eq!((summary.same_group, summary.cross_group), (0, 1));
    assert_eq!(summary.dropped_missing_field, 1);
    let cross = cross_rows(&dir);
    assert_eq!(cross, vec![headers(), rows[0].clone(), rows[2].clone()]);
    assert!(cross.iter().all(|row| row[0] != "2"));
}

#[test]
fn test_all_excluded_gives_empty_headered_outputs() {
    let rows = vec![
        call("1", "2024-03-01 08:00:00", "13800000000", EXCLUDED, "A组", "8001", "张三"),
        call("2", "2024-03-01 09:00:00", "13800000000", EXCLUDED, "A组", "8002", "李四"),
    ];
    let (dir, summary) = run(&rows);

    assert_eq!((summary.same_group, summary.cross_group), (0, 0));
    assert_eq!(summary.dropped_excluded_group, 2);
    assert_eq!(same_rows(&dir), vec![headers()]);
    assert_eq!(cross_rows(&dir), vec![headers()]);
}

#[test]
fn test_cross_and_same_group_classification() {
    let rows = vec![
        // answered A, next inbound B: cross-group
        call("1", "2024-03-01 08:00:00", "13800000001", "A", "A", "8001", "张三"),
        call("2", "2024-03-01 09:00:00", "13800000001", "B", "B", "8002", "李四"),
        // answered A, next inbound A: same-group
        call("3", "2024-03-01 08:00:00", "13800000002", "X", "A", "8001", "张三"),
        call("4", "2024-03-01 09:00:00", "13800000002", "A", "C", "8002", "李四"),
    ];
    let (dir, summary) = run(&rows);

    assert_eq!((summary.same_group, summary.cross_group), (1, 1));
    assert_eq!(
        cross_rows(&dir),
        vec![headers(), rows[0].clone(), rows[1].clone()]
    );
    assert_eq!(
        same_rows(&dir),
        vec![headers(), rows[2].clone(), rows[3].clone()]
    );
}

#[test]
fn test_window_boundary_is_inclusive() {
    let rows = vec![
        call("1", "2024-03-01 08:00:00", "111", "A", "A", "8001", "张三"),
        call("2", "2024-03-02 08:00:00", "111", "A", "A", "8001", "张三"),
        call("3", "2024-03-01 08:00:00", "222", "A", "A", "8001", "张三"),
        call("4", "2024-03-02 08:00:01", "222", "A", "A", "8001", "张三"),
    ];
    let (dir, summary) = run(&rows);

    assert_eq!(summary.total(), 1);
    assert_eq!(
        same_rows(&dir),
        vec![headers(), rows[0].clone(), rows[1].clone()]
    );
}

#[test]
fn test_shared_middle_call_written_twice() {
    let rows = vec![
        call("1", "2024-03-01 08:00:00", "13800000000", "A", "A", "8001", "张三"),
        call("2", "2024-03-01 09:00:00", "13800000000", "A", "A", "8002", "李四"),
        call("3", "2024-03-01 10:00:00", "13800000000", "A", "A", "8003", "王五"),
    ];
    let (dir, summary) = run(&rows);

    assert_eq!(summary.same_group, 2);
    assert_eq!(
        same_rows(&dir),
        vec![
            headers(),
            rows[0].clone(),
            rows[1].clone(),
            rows[1].clone(),
            rows[2].clone(),
        ]
    );
}

#[test]
fn test_output_rows_are_untouched_source_text() {
    let rows = vec![
        call("001", "2024/03/01 08:00:00", "TEL:013800000000", " 售后 组 ", "售后组", "08001", "张 三"),
        call("002", "2024-03-01T09:15:00", "tel：013800000000", "售后组", "售后\u{3000}组", "08002", "李四"),
    ];
    let (dir, summary) = run(&rows);

    // Both callers normalize to the same number and the groups match once
    // whitespace is removed, yet the written rows keep the original text.
    assert_eq!(summary.same_group, 1);
    assert_eq!(
        same_rows(&dir),
        vec![headers(), rows[0].clone(), rows[1].clone()]
    );
}

#[test]
fn test_nan_text_treated_as_missing() {
    let rows = vec![
        call("1", "2024-03-01 08:00:00", "138", "A", "A", "8001", "NaN"),
        call("2", "2024-03-01 09:00:00", "138", "A", "A", "8002", "李四"),
    ];
    let (_dir, summary) = run(&rows);
    assert_eq!(summary.total(), 0);
    assert_eq!(summary.dropped_missing_field, 1);
    assert_eq!(summary.rows_kept, 1);
}

#[test]
fn test_runs_are_byte_identical() {
    let rows = vec![
        call("1", "2024-03-01 08:00:00", "138", "A", "A", "8001", "张三"),
        call("2", "2024-03-01 09:00:00", "138", "B", "A", "8002", "李四"),
        call("3", "2024-03-01 10:00:00", "138", "B", "B", "8003", "王五"),
    ];
    let (dir, _) = run(&rows);
    let input = dir.path().join("calls.xlsx");
    let same_first = fs::read(dir.path().join(SAME_GROUP_FILE)).unwrap();
    let cross_first = fs::read(dir.path().join(CROSS_GROUP_FILE)).unwrap();

    process_workbook(&input, dir.path()).unwrap();

    assert_eq!(fs::read(dir.path().join(SAME_GROUP_FILE)).unwrap(), same_first);
    assert_eq!(fs::read(dir.path().join(CROSS_GROUP_FILE)).unwrap(), cross_first);
}

#[test]
fn test_unparseable_time_aborts_without_output() {
    let rows = vec![
        call("1", "2024-03-01 08:00:00", "138", "A", "A", "8001", "张三"),
        call("2", "三月一日", "138", "A", "A", "8002", "李四"),
    ];
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("calls.xlsx");
    write_export(&input, &HEADERS, &rows);

    let err = process_workbook(&input, dir.path()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::TimeParse);
    assert!(err.to_string().contains("三月一日"));
    assert!(!dir.path().join(SAME_GROUP_FILE).exists());
    assert!(!dir.path().join(CROSS_GROUP_FILE).exists());
}

#[test]
fn test_unparseable_time_on_filtered_row_is_ignored() {
    let rows = vec![
        call("1", "2024-03-01 08:00:00", "138", "A", "A", "8001", "张三"),
        call("2", "garbage", "138", EXCLUDED, "A", "8002", "李四"),
    ];
    let (_dir, summary) = run(&rows);
    assert_eq!(summary.total(), 0);
}

#[test]
fn test_missing_required_column() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("calls.xlsx");
    let rows = vec![vec![
        "1".to_string(),
        "2024-03-01 08:00:00".to_string(),
        "138".to_string(),
    ]];
    write_export(&input, &["序号", "开始时间", "主叫号码"], &rows);

    let err = process_workbook(&input, dir.path()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Schema);
    let msg = err.to_string();
    assert!(msg.contains("坐席姓名"));
    assert!(msg.contains("呼入技能组"));
}

#[test]
fn test_messy_headers_are_cleaned() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("calls.xlsx");
    let messy = [
        "序号",
        "\u{3000}开始时间",
        "主叫号码\u{a0}",
        "呼入\n技能组",
        " 接听技能组\n",
        "坐席分机",
        "坐席姓名",
    ];
    let rows = vec![
        call("1", "2024-03-01 08:00:00", "138", "A", "A", "8001", "张三"),
        call("2", "2024-03-01 09:00:00", "138", "A", "A", "8002", "李四"),
    ];
    write_export(&input, &messy, &rows);

    let summary = process_workbook(&input, dir.path()).unwrap();
    assert_eq!(summary.same_group, 1);
    assert_eq!(same_rows(&dir)[0], headers());
}

#[test]
fn test_numeric_and_date_cells_exported_as_text() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("calls.xlsx");

    let mut workbook = Workbook::new();
    let date_format = Format::new().set_num_format("yyyy-mm-dd hh:mm:ss");
    let sheet = workbook.add_worksheet();
    sheet.write_string(0, 0, "呼叫明细报表").unwrap();
    for (col, name) in HEADERS.iter().enumerate() {
        sheet.write_string(1, col as u16, *name).unwrap();
    }
    for (i, hour) in [8u16, 9].iter().enumerate() {
        let row = i as u32 + 2;
        let start = ExcelDateTime::from_ymd(2024, 3, 1)
            .unwrap()
            .and_hms(*hour, 0, 0)
            .unwrap();
        sheet.write_number(row, 0, (i + 1) as f64).unwrap();
        sheet
            .write_datetime_with_format(row, 1, &start, &date_format)
            .unwrap();
        sheet.write_number(row, 2, 13800000000.0).unwrap();
        sheet.write_string(row, 3, "A").unwrap();
        sheet.write_string(row, 4, "A").unwrap();
        sheet.write_number(row, 5, 8001.0).unwrap();
        sheet.write_string(row, 6, "张三").unwrap();
    }
    workbook.save(&input).unwrap();

    let summary = process_workbook(&input, dir.path()).unwrap();
    assert_eq!(summary.same_group, 1);

    let same = same_rows(&dir);
    assert_eq!(
        same[1],
        call("1", "2024-03-01 08:00:00", "13800000000", "A", "A", "8001", "张三")
    );
    assert_eq!(
        same[2],
        call("2", "2024-03-01 09:00:00", "13800000000", "A", "A", "8001", "张三")
    );
}

#[test]
fn test_time_and_duration_cells_keep_clock_text() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("calls.xlsx");

    let mut workbook = Workbook::new();
    let time_format = Format::new().set_num_format("hh:mm:ss");
    let duration_format = Format::new().set_num_format("[h]:mm:ss");
    let sheet = workbook.add_worksheet();
    sheet.write_string(0, 0, "呼叫明细报表").unwrap();
    for (col, name) in HEADERS.iter().chain(["通话时长", "累计时长"].iter()).enumerate() {
        sheet.write_string(1, col as u16, *name).unwrap();
    }
    for (i, hour) in ["08", "09"].iter().enumerate() {
        let row = i as u32 + 2;
        let cells = call(
            &(i + 1).to_string(),
            &format!("2024-03-01 {}:00:00", hour),
            "13800000000",
            "A",
            "A",
            "8001",
            "张三",
        );
        for (col, value) in cells.iter().enumerate() {
            sheet.write_string(row, col as u16, value).unwrap();
        }
        let talk = ExcelDateTime::from_hms(0, 5, 30 + i as u8).unwrap();
        sheet
            .write_datetime_with_format(row, 7, &talk, &time_format)
            .unwrap();
        let total = ExcelDateTime::from_hms(1, 2, 3).unwrap();
        sheet
            .write_datetime_with_format(row, 8, &total, &duration_format)
            .unwrap();
    }
    workbook.save(&input).unwrap();

    let summary = process_workbook(&input, dir.path()).unwrap();
    assert_eq!(summary.same_group, 1);

    let same = same_rows(&dir);
    assert_eq!(same[0][7..], ["通话时长", "累计时长"]);
    assert_eq!(same[1][7..], ["00:05:30", "01:02:03"]);
    assert_eq!(same[2][7..], ["00:05:31", "01:02:03"]);
}

#[test]
fn test_csv_source() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("calls.csv");
    fs::write(
        &input,
        "呼叫明细报表\n\
         序号,开始时间,主叫号码,呼入技能组,接听技能组,坐席分机,坐席姓名\n\
         1,2024-03-01 08:00:00,013800000000,A,A,8001,张三\n\
         2,2024-03-01 09:00:00,013800000000,B,B,8002,李四\n",
    )
    .unwrap();

    let summary = process_workbook(&input, dir.path()).unwrap();
    assert_eq!((summary.same_group, summary.cross_group), (0, 1));
    let cross = cross_rows(&dir);
    assert_eq!(cross[1][2], "013800000000");
}

#[test]
fn test_alternate_configuration() {
    let rows = vec![
        call("1", "2024-03-01 08:00:00", "138", "A", "A", "8001", "张三"),
        call("2", "2024-03-02 20:00:00", "138", "A", "A", "8002", "李四"),
        call("3", "2024-03-01 08:00:00", "139", "VIP", "A", "8001", "张三"),
        call("4", "2024-03-01 09:00:00", "139", "VIP", "A", "8002", "李四"),
    ];
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("calls.xlsx");
    write_export(&input, &HEADERS, &rows);

    let default = process_workbook(&input, dir.path()).unwrap();
    assert_eq!(default.total(), 1);

    let config = ClassifierConfig {
        exclude_group: "VIP".to_string(),
        window_hours: 48,
        ..ClassifierConfig::default()
    };
    let custom = process_workbook_with_config(&input, dir.path(), &config).unwrap();
    assert_eq!((custom.same_group, custom.cross_group), (1, 0));
    assert_eq!(
        same_rows(&dir),
        vec![headers(), rows[0].clone(), rows[1].clone()]
    );
}

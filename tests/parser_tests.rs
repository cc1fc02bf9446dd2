use pretty_assertions::assert_eq;
use trace_tabulate::parser::{
    explode_payload, extract_payload, parse_file, parse_text, prescan_array_widths, select_lines,
    ArrayWidths, ParseOptions,
};
use trace_tabulate::utils::ParseError;

const GOVERNOR_TRACE: &str = "\
  kworker/1:2-1037  [001]   123.456000: thermal_power_allocator: thermal_zone_id=0 req_power={1200 3400} total_req_power=4600 granted_power={1100 3000} total_granted_power=4100 power_range=5000 max_allocatable_power=6000 current_temperature=55000 delta_temperature=-1000
  kworker/1:2-1037  [001]   123.556000: thermal_temperature: thermal_zone=soc id=0 temp_prev=55000 temp=56000
  kworker/1:2-1037  [001]   123.656000: thermal_power_allocator: thermal_zone_id=0 req_power={1300 3500 800} total_req_power=5600 granted_power={1150 3100 700} total_granted_power=4950 power_range=5000 max_allocatable_power=6000 current_temperature=56000 delta_temperature=-2000
";

#[test]
fn test_single_temperature_line() {
    let table = parse_text(
        "100.0: thermal_temperature: id=0 temp=45000\n",
        "thermal_temperature:",
        ParseOptions::default(),
    )
    .unwrap();

    assert_eq!(table.to_csv_string().unwrap(), "Time,id,temp\n100.0,0,45000\n");
}

#[test]
fn test_explode_with_dataset_width() {
    let widths: ArrayWidths = vec![("load", 4)].into_iter().collect();
    let record = explode_payload("load={1 2}", &widths);

    assert_eq!(record.to_line(), "load0=1 load1=2 load2=0 load3=0");
}

#[test]
fn test_empty_array_has_no_columns() {
    let widths: ArrayWidths = vec![("req_power", 5)].into_iter().collect();
    let record = explode_payload("req_power={} total=0", &widths);

    assert_eq!(record.names().collect::<Vec<_>>(), vec!["total"]);
}

#[test]
fn test_header_length_matches_first_line() {
    let lines = select_lines(GOVERNOR_TRACE, "thermal_power_allocator:");
    let widths = prescan_array_widths(&lines);
    let first = explode_payload(extract_payload(lines[0].text), &widths);

    let table = parse_text(GOVERNOR_TRACE, "thermal_power_allocator:", ParseOptions::default()).unwrap();

    assert_eq!(table.header().len(), 1 + first.len());
}

#[test]
fn test_every_row_padded_to_dataset_width() {
    let table = parse_text(GOVERNOR_TRACE, "thermal_power_allocator:", ParseOptions::default()).unwrap();

    assert_eq!(table.array_columns("req_power").len(), 3);
    assert_eq!(table.array_columns("granted_power").len(), 3);
    for row in table.rows() {
        assert_eq!(row.values().len(), table.columns().len());
    }
    assert_eq!(
        table.column("req_power2").unwrap(),
        vec![Some("0"), Some("800")]
    );
}

#[test]
fn test_negative_scalar_values_kept() {
    let table = parse_text(GOVERNOR_TRACE, "thermal_power_allocator:", ParseOptions::default()).unwrap();
    assert_eq!(
        table.column_f64("delta_temperature").unwrap(),
        vec![Some(-1000.0), Some(-2000.0)]
    );
}

#[test]
fn test_marker_selects_one_event_type() {
    let table = parse_text(GOVERNOR_TRACE, "thermal_temperature:", ParseOptions::default()).unwrap();

    assert_eq!(table.len(), 1);
    assert_eq!(table.header(), vec!["Time", "thermal_zone", "id", "temp_prev", "temp"]);
    assert_eq!(table.times(), vec![123.556]);
}

#[test]
fn test_parse_is_idempotent() {
    let first = parse_text(GOVERNOR_TRACE, "thermal_power_allocator:", ParseOptions::default()).unwrap();
    let second = parse_text(GOVERNOR_TRACE, "thermal_power_allocator:", ParseOptions::default()).unwrap();

    assert_eq!(first, second);
    assert_eq!(first.to_csv_string().unwrap(), second.to_csv_string().unwrap());
}

#[test]
fn test_no_matches_is_empty_table() {
    let table = parse_text(GOVERNOR_TRACE, "sched_switch:", ParseOptions::default()).unwrap();

    assert!(table.is_empty());
    assert_eq!(table.to_csv_string().unwrap(), "Time\n");
}

#[test]
fn test_missing_timestamp_is_error() {
    let result = parse_text(
        "1.0: ev: x=1\nev: x=2\n",
        "ev:",
        ParseOptions::default(),
    );

    assert!(matches!(result, Err(ParseError::MissingTimestamp { line: 2 })));
}

#[test]
fn test_lenient_drift_keeps_short_rows() {
    let table = parse_text(
        "1.0: ev: a=1 b=2\n2.0: ev: a=3\n",
        "ev:",
        ParseOptions::default(),
    )
    .unwrap();

    assert_eq!(table.column("b").unwrap(), vec![Some("2"), None]);
}

#[test]
fn test_empty_array_line_is_shorter_than_header() {
    let trace = "\
1.000000: thermal_power_allocator: req_power={100 200} granted_power={50 60} total=300
2.000000: thermal_power_allocator: req_power={300 400} granted_power={} total=700
";
    let table = parse_text(trace, "thermal_power_allocator:", ParseOptions::default()).unwrap();

    assert_eq!(
        table.header(),
        vec!["Time", "req_power0", "req_power1", "granted_power0", "granted_power1", "total"]
    );
    assert_eq!(table.rows()[0].values().len(), table.columns().len());
    assert!(table.rows()[1].values().len() < table.columns().len());
    assert_eq!(
        table.rows()[1].values().to_vec(),
        vec!["300".to_string(), "400".to_string(), "700".to_string()]
    );
    // later cells shift left, the tail reads as missing
    assert_eq!(table.column("granted_power0").unwrap(), vec![Some("50"), Some("700")]);
    assert_eq!(table.column("total").unwrap(), vec![Some("300"), None]);
}

#[test]
fn test_parse_file_with_invalid_utf8_elsewhere() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("trace.txt");
    let mut dump = b"0.500000: sched_switch: prev_comm=\xff next_pid=7\n".to_vec();
    dump.extend_from_slice(b"1.000000: thermal_temperature: id=0 temp=45000\n");
    std::fs::write(&path, dump).unwrap();

    let table = parse_file(&path, "thermal_temperature:", ParseOptions::default()).unwrap();

    assert_eq!(table.len(), 1);
    assert_eq!(table.times(), vec![1.0]);
}

#[test]
fn test_parse_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("trace.txt");
    std::fs::write(&path, GOVERNOR_TRACE).unwrap();

    let table = parse_file(&path, "thermal_power_allocator:", ParseOptions::default()).unwrap();
    assert_eq!(table.len(), 2);

    let missing = parse_file(dir.path().join("nope.txt"), "x:", ParseOptions::default());
    assert!(matches!(missing, Err(ParseError::Io(_))));
}

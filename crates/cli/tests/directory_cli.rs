use assert_cmd::Command;
use predicates::prelude::*;
use pretty_assertions::assert_eq;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

const SHEET: &str = r#"[
  {"거래처명": "나래식품", "주소": "서울 강남구 테헤란로 1", "부서명": "영업\n물류", "담당자": "김담당", "연락처": "010-1111-2222", "즐겨찾기": ""},
  {"거래처명": "Apple Mart", "주소": "부산 해운대구 우동 2", "취급품목": "과일, 채소"},
  {"거래처명": "", "주소": "", "부서명": "", "담당자": "", "연락처": ""},
  {"거래처명": "가나다", "주소": "서울 종로구 3", "즐겨찾기": "O", "마지막 방문일": "2024-03-20"},
  {"거래처명": "다온유통", "주소": "인천 남동구 4"}
]"#;

#[allow(deprecated)]
fn client_directory(workdir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("client-directory").expect("binary");
    cmd.current_dir(workdir)
        .env_remove("CLIENT_DIRECTORY_CONFIG")
        .env_remove("RUST_LOG");
    cmd
}

fn run_json(workdir: &Path, args: &[&str]) -> (bool, Value) {
    let output = client_directory(workdir)
        .args(args)
        .arg("--json")
        .output()
        .expect("command run");
    let body: Value = serde_json::from_slice(&output.stdout).expect("valid json");
    (output.status.success(), body)
}

fn setup_sheet() -> tempfile::TempDir {
    let temp = tempdir().unwrap();
    fs::write(temp.path().join("sheet.json"), SHEET).unwrap();
    temp
}

fn names(body: &Value) -> Vec<String> {
    body["data"]["entries"]
        .as_array()
        .expect("entries array")
        .iter()
        .map(|entry| entry["name"].as_str().unwrap_or_default().to_string())
        .collect()
}

#[test]
fn list_puts_favorites_first_then_sorts_by_name() {
    let temp = setup_sheet();
    let (ok, body) = run_json(
        temp.path(),
        &["list", "--table", "sheet.json", "--favorite", "다온유통"],
    );
    assert!(ok, "{body}");
    assert_eq!(body["status"], "ok");
    assert_eq!(names(&body), vec!["가나다", "다온유통", "Apple Mart", "나래식품"]);

    let entries = body["data"]["entries"].as_array().unwrap();
    assert_eq!(entries[0]["is_favorite"], true);
    assert_eq!(entries[0]["classification"], "ㄱ");
    assert_eq!(entries[2]["classification"], "A");
    assert_eq!(entries[2]["tags"], serde_json::json!(["과일", "채소"]));
    assert_eq!(body["meta"]["total_records"], 4);
    assert_eq!(body["meta"]["returned"], 4);
}

#[test]
fn departments_are_zipped_with_placeholder() {
    let temp = setup_sheet();
    let (ok, body) = run_json(temp.path(), &["list", "--table", "sheet.json", "-q", "나래"]);
    assert!(ok, "{body}");
    let departments = &body["data"]["entries"][0]["departments"];
    assert_eq!(departments.as_array().unwrap().len(), 2);
    assert_eq!(departments[0]["contact"], "김담당");
    assert_eq!(departments[1]["label"], "물류");
    assert_eq!(departments[1]["contact"], "-");
    assert_eq!(departments[1]["phone"], "-");
}

#[test]
fn bucket_and_region_filters_narrow_the_list() {
    let temp = setup_sheet();
    let (_, latin) = run_json(temp.path(), &["list", "--table", "sheet.json", "--bucket", "A-Z"]);
    assert_eq!(names(&latin), vec!["Apple Mart"]);

    let (_, seoul) = run_json(temp.path(), &["list", "--table", "sheet.json", "--region", "서울"]);
    assert_eq!(names(&seoul), vec!["가나다", "나래식품"]);

    let (_, favorites) = run_json(
        temp.path(),
        &["list", "--table", "sheet.json", "--favorites-only"],
    );
    assert_eq!(names(&favorites), vec!["가나다"]);
}

#[test]
fn counts_report_every_bucket() {
    let temp = setup_sheet();
    let (ok, body) = run_json(temp.path(), &["list", "--table", "sheet.json", "--counts"]);
    assert!(ok, "{body}");
    let counts = body["data"]["bucket_counts"].as_array().unwrap();
    assert_eq!(counts.len(), 16);
    assert_eq!(counts[0]["label"], "전체");
    assert_eq!(counts[0]["count"], 4);
    assert_eq!(counts[15]["label"], "A-Z");
    assert_eq!(counts[15]["count"], 1);
}

#[test]
fn regions_are_sentinel_then_sorted_unique() {
    let temp = setup_sheet();
    let (ok, body) = run_json(temp.path(), &["regions", "--table", "sheet.json"]);
    assert!(ok, "{body}");
    assert_eq!(
        body["data"]["regions"],
        serde_json::json!(["전체", "부산", "서울", "인천"])
    );
}

#[test]
fn buckets_lists_sixteen_labels() {
    let temp = tempdir().unwrap();
    let (ok, body) = run_json(temp.path(), &["buckets"]);
    assert!(ok, "{body}");
    let buckets = body["data"]["buckets"].as_array().unwrap();
    assert_eq!(buckets.len(), 16);
    assert_eq!(buckets[1], "ㄱ");
    assert_eq!(buckets[14], "ㅎ");
}

#[test]
fn classify_prints_labels() {
    let temp = tempdir().unwrap();
    client_directory(temp.path())
        .args(["classify", "가나다", "apple", "123"])
        .assert()
        .success()
        .stdout(predicate::str::contains("가나다\tㄱ"))
        .stdout(predicate::str::contains("apple\tA"))
        .stdout(predicate::str::contains("123\t1"));
}

#[test]
fn text_output_renders_cards_and_empty_message() {
    let temp = setup_sheet();
    client_directory(temp.path())
        .args(["list", "--table", "sheet.json", "--today", "2024-03-31"])
        .assert()
        .success()
        .stdout(predicate::str::contains("★ 가나다  [ㄱ]  🟢 최근 방문"))
        .stdout(predicate::str::contains("#과일 #채소"));

    client_directory(temp.path())
        .args(["list", "--table", "sheet.json", "-q", "없는거래처"])
        .assert()
        .success()
        .stdout(predicate::str::contains("검색 결과가 없습니다."));
}

#[test]
fn missing_table_is_reported_as_json_error() {
    let temp = tempdir().unwrap();
    let (ok, body) = run_json(temp.path(), &["list", "--table", "missing.json"]);
    assert!(!ok);
    assert_eq!(body["status"], "error");
    assert_eq!(body["error"]["code"], "table_unreadable");
    assert!(body["error"]["message"]
        .as_str()
        .unwrap()
        .contains("missing.json"));

    let (ok, body) = run_json(temp.path(), &["regions"]);
    assert!(!ok);
    assert_eq!(body["error"]["code"], "table_unreadable");
}

#[test]
fn sheet_without_name_column_is_a_schema_mismatch() {
    let temp = tempdir().unwrap();
    fs::write(
        temp.path().join("sheet.json"),
        r#"[{"업체": "가나다", "주소": "서울"}]"#,
    )
    .unwrap();
    let (ok, body) = run_json(temp.path(), &["list", "--table", "sheet.json"]);
    assert!(!ok);
    assert_eq!(body["error"]["code"], "schema_mismatch");
    assert_eq!(body["hints"][0]["type"], "action");
}

#[test]
fn config_file_supplies_table_and_hides_filters() {
    let temp = setup_sheet();
    fs::write(
        temp.path().join("client-directory.toml"),
        r#"
table = "sheet.json"
filters = ["search"]

[aliases]
name = ["업체"]
"#,
    )
    .unwrap();

    let (ok, body) = run_json(temp.path(), &["list", "-q", "가나"]);
    assert!(ok, "{body}");
    assert_eq!(names(&body), vec!["가나다"]);
    assert_eq!(body["meta"]["config_path"], "client-directory.toml");

    let (ok, body) = run_json(temp.path(), &["list", "--region", "서울"]);
    assert!(!ok);
    assert_eq!(body["error"]["code"], "filter_disabled");
}

#[test]
fn invalid_config_is_rejected() {
    let temp = tempdir().unwrap();
    fs::write(temp.path().join("bad.toml"), "columns = 0\n").unwrap();
    let (ok, body) = run_json(temp.path(), &["--config", "bad.toml", "buckets"]);
    assert!(!ok);
    assert_eq!(body["error"]["code"], "invalid_config");
}

#[test]
fn only_listed_region_and_bucket_labels_are_accepted() {
    let temp = tempdir().unwrap();
    fs::write(
        temp.path().join("sheet.json"),
        r#"[
  {"거래처명": "까치상회", "주소": "경기도 수원시"},
  {"거래처명": "Apple", "주소": "경기도 성남시"}
]"#,
    )
    .unwrap();

    let (_, regions) = run_json(temp.path(), &["regions", "--table", "sheet.json"]);
    assert_eq!(regions["data"]["regions"], serde_json::json!(["전체", "경기도"]));

    let (ok, body) = run_json(temp.path(), &["list", "--table", "sheet.json", "--region", "경기"]);
    assert!(!ok);
    assert_eq!(body["error"]["code"], "invalid_filter");
    assert!(body["error"]["message"].as_str().unwrap().contains("경기도"));

    let (ok, body) = run_json(temp.path(), &["list", "--table", "sheet.json", "--region", "경기도"]);
    assert!(ok, "{body}");
    assert_eq!(body["meta"]["returned"], 2);

    for label in ["ㄲ", "A"] {
        let (ok, body) = run_json(temp.path(), &["list", "--table", "sheet.json", "--bucket", label]);
        assert!(!ok, "{label} was accepted");
        assert_eq!(body["error"]["code"], "invalid_filter");
    }

    let (ok, body) = run_json(temp.path(), &["list", "--table", "sheet.json", "--bucket", "A-Z"]);
    assert!(ok, "{body}");
    assert_eq!(names(&body), vec!["Apple"]);
}

#[test]
fn missing_config_file_is_invalid_config() {
    let temp = tempdir().unwrap();
    let (ok, body) = run_json(temp.path(), &["--config", "nope.toml", "buckets"]);
    assert!(!ok);
    assert_eq!(body["error"]["code"], "invalid_config");
    assert!(body["error"]["message"].as_str().unwrap().contains("nope.toml"));
}

use std::fs;
use std::path::PathBuf;
use std::process::Command;
use std::time::{SystemTime, UNIX_EPOCH};

fn bin() -> &'static str {
    env!("CARGO_BIN_EXE_mappower")
}

fn heroes_path() -> String {
    concat!(env!("CARGO_MANIFEST_DIR"), "/data/heroes.json").to_string()
}

fn unique_temp_path(name: &str, ext: &str) -> PathBuf {
    let stamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock should be after unix epoch")
        .as_nanos();
    std::env::temp_dir().join(format!("mappower-{name}-{stamp}.{ext}"))
}

const SHEET_CSV: &str = "\
地图,推荐,可选,不推荐
地图名称,推荐英雄,可选英雄,不推荐英雄
国王大道,莱因哈特 安娜,,
,卢西奥,禅雅塔,黑百合
国王大道（夜）,,,安娜
伊利奥斯,黑百合,,莱因哈特
";

fn write_sheet(name: &str) -> PathBuf {
    let path = unique_temp_path(name, "csv");
    fs::write(&path, SHEET_CSV).expect("fixture should be written");
    path
}

#[test]
fn missing_command_prints_usage() {
    let output = Command::new(bin()).output().expect("binary should run");
    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("usage: mappower"));
}

#[test]
fn score_returns_usage_without_path() {
    let output = Command::new(bin())
        .arg("score")
        .output()
        .expect("score should run");
    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("usage: mappower score"));
}

#[test]
fn score_emits_json_per_map() {
    let sheet = write_sheet("json");
    let output = Command::new(bin())
        .args(["score", sheet.to_string_lossy().as_ref()])
        .args(["--heroes", &heroes_path(), "--format", "json"])
        .output()
        .expect("score should run");

    assert_eq!(output.status.code(), Some(0));
    let payload: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("score should emit json");
    let maps = payload.as_array().expect("array of maps");
    assert_eq!(maps.len(), 2);
    assert_eq!(maps[0]["map"], "国王大道");
    assert_eq!(maps[0]["rows"], 3);
    assert_eq!(maps[0]["scores"]["reinhardt"], 10);
    assert_eq!(maps[0]["scores"]["ana"], 0);
    assert_eq!(maps[0]["scores"]["zenyatta"], 1);
    assert_eq!(maps[0]["scores"]["widowmaker"], -10);
    assert_eq!(maps[1]["map"], "伊利奥斯");
    assert_eq!(maps[1]["scores"]["widowmaker"], 10);
    assert_eq!(maps[1]["scores"].as_object().map(|o| o.len()), Some(43));

    let _ = fs::remove_file(sheet);
}

#[test]
fn score_writes_maps_document_to_output() {
    let sheet = write_sheet("maps");
    let out = unique_temp_path("maps-out", "json");
    let output = Command::new(bin())
        .args(["score", sheet.to_string_lossy().as_ref()])
        .args(["--heroes", &heroes_path(), "--format", "maps"])
        .args(["--output", out.to_string_lossy().as_ref()])
        .output()
        .expect("score should run");

    assert_eq!(output.status.code(), Some(0));
    let raw = fs::read_to_string(&out).expect("report should be written");
    let payload: serde_json::Value = serde_json::from_str(&raw).expect("maps json");
    assert_eq!(payload["maps"][1]["suitableHeroes"]["reinhardt"], -10);
    assert_eq!(payload["maps"][1]["id"], "伊利奥斯");

    let _ = fs::remove_file(sheet);
    let _ = fs::remove_file(out);
}

#[test]
fn score_rejects_unknown_format() {
    let sheet = write_sheet("badformat");
    let output = Command::new(bin())
        .args(["score", sheet.to_string_lossy().as_ref(), "--format", "xml"])
        .output()
        .expect("score should run");
    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("unknown report format"));
    let _ = fs::remove_file(sheet);
}

#[test]
fn score_fails_when_template_hero_missing_from_catalog() {
    let sheet = write_sheet("unknown-hero");
    let catalog = unique_temp_path("catalog", "json");
    fs::write(&catalog, r#"{"heroes":[{"id":"ana","name":"安娜"}]}"#)
        .expect("fixture should be written");

    let output = Command::new(bin())
        .args(["score", sheet.to_string_lossy().as_ref()])
        .args(["--heroes", catalog.to_string_lossy().as_ref()])
        .output()
        .expect("score should run");

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty(), "no partial report");
    assert!(String::from_utf8_lossy(&output.stderr).contains("no hero with id 'dva'"));

    let _ = fs::remove_file(sheet);
    let _ = fs::remove_file(catalog);
}

#[test]
fn heroes_lists_template_with_custom_file() {
    let template = unique_temp_path("template", "json");
    fs::write(&template, r#"{"mercy": 0, "ana": 0}"#).expect("fixture should be written");

    let output = Command::new(bin())
        .args(["heroes", "--heroes", &heroes_path()])
        .args(["--template", template.to_string_lossy().as_ref()])
        .output()
        .expect("heroes should run");

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<_> = stdout.lines().collect();
    assert_eq!(lines, vec!["id\tname\trole", "mercy\t天使\tsupport", "ana\t安娜\tsupport"]);

    let _ = fs::remove_file(template);
}

#[test]
fn inspect_reports_missing_workbook() {
    let output = Command::new(bin())
        .args(["inspect", "no/such/file.xlsx"])
        .output()
        .expect("inspect should run");
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("inspect failed"));
}

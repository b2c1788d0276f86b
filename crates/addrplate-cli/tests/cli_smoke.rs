use assert_cmd::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

fn repo_root() -> PathBuf {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    manifest_dir
        .parent()
        .and_then(|p| p.parent())
        .expect("expected crates/<name> layout")
        .to_path_buf()
}

fn glyphs() -> PathBuf {
    let path = repo_root().join("fixtures").join("glyphs.json");
    assert!(path.exists(), "fixture missing: {}", path.display());
    path
}

fn addrplate() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo_bin!("addrplate"));
    cmd.current_dir(repo_root()).env_remove("ADDRPLATE_GLYPHS");
    cmd
}

#[test]
fn cli_renders_name_plate_svg() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let out = tmp.path().join("name.svg");

    addrplate()
        .args(["--glyphs", glyphs().to_string_lossy().as_ref()])
        .args([
            "name",
            "--street-type",
            "вулиця",
            "--street-name",
            "Шевченка",
            "--street-translit",
            "Shevchenka",
            "--out",
            out.to_string_lossy().as_ref(),
        ])
        .assert()
        .success();

    let svg = fs::read_to_string(&out).expect("read svg");
    assert!(svg.starts_with("<svg"));
    assert_eq!(svg.matches("<svg").count(), 1);
    assert!(svg.contains(r##"fill="#101640""##));
    assert!(svg.contains("<path"));
}

#[test]
fn cli_renders_number_plate_pdf() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let out = tmp.path().join("number.pdf");

    addrplate()
        .args(["--glyphs", glyphs().to_string_lossy().as_ref()])
        .args(["--format", "pdf", "--out", out.to_string_lossy().as_ref()])
        .args(["number", "--house-num", "12/3", "--left-num", "10", "--right-num", "14"])
        .assert()
        .success();

    let bytes = fs::read(&out).expect("read pdf");
    assert!(bytes.starts_with(b"%PDF-"), "output is not a PDF");
}

#[test]
fn cli_renders_vertical_plate_png() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let out = tmp.path().join("vertical.png");

    addrplate()
        .args(["--glyphs", glyphs().to_string_lossy().as_ref()])
        .args(["--format", "png", "--scale", "0.5"])
        .args(["--out", out.to_string_lossy().as_ref()])
        .args([
            "vertical",
            "--street-type",
            "провулок",
            "--street-name",
            "Тараса Шевченка",
            "--street-translit",
            "Tarasa Shevchenka",
            "--house-num",
            "7А",
        ])
        .assert()
        .success();

    let bytes = fs::read(&out).expect("read png");
    assert!(
        bytes.starts_with(b"\x89PNG\r\n\x1a\n"),
        "output is not a PNG"
    );
}

#[test]
fn cli_prints_layout_json() {
    let output = addrplate()
        .args(["--glyphs", glyphs().to_string_lossy().as_ref()])
        .args(["layout", "number", "--house-num", "145"])
        .output()
        .expect("run addrplate");
    assert!(output.status.success());

    let layout: serde_json::Value = serde_json::from_slice(&output.stdout).expect("layout json");
    assert_eq!(layout["kind"], "number");
    assert_eq!(layout["size"], "compact");
    assert!(layout["width"].as_f64().is_some_and(|w| w > 0.0));

    let elements = layout["elements"].as_array().expect("elements");
    assert!(!elements.is_empty());
    assert!(elements.iter().all(|e| e["type"] == "text"));
}

#[test]
fn cli_accepts_underscore_flags_and_env_glyphs() {
    let output = addrplate()
        .env("ADDRPLATE_GLYPHS", glyphs())
        .args(["number", "--house_num", "9", "--left_num", "7", "--right_num", ""])
        .output()
        .expect("run addrplate");
    assert!(output.status.success());

    let svg = String::from_utf8(output.stdout).expect("utf-8 svg");
    assert!(svg.starts_with("<svg"));
    assert!(svg.contains("<line"));
}

#[test]
fn cli_rejects_missing_field_before_loading_glyphs() {
    let output = addrplate()
        .args(["--glyphs", "does/not/exist.json"])
        .args(["vertical", "--street-type", "вулиця", "--house-num", "1"])
        .output()
        .expect("run addrplate");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("street_name"), "stderr: {stderr}");
}

#[test]
fn cli_rejects_invalid_house_number() {
    addrplate()
        .args(["--glyphs", glyphs().to_string_lossy().as_ref()])
        .args(["number", "--house-num", "12//3"])
        .assert()
        .code(1);
}

#[test]
fn cli_usage_errors_exit_with_2() {
    addrplate().assert().code(2);
    addrplate().args(["poster"]).assert().code(2);
    addrplate()
        .args(["number", "--house-num"])
        .assert()
        .code(2);
    addrplate()
        .args(["--format", "gif", "number", "--house-num", "1"])
        .assert()
        .code(2);
}

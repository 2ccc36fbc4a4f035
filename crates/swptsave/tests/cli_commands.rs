#![cfg(all(unix, feature = "cli"))]

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use swptsave::game::SaveFile;
use swptsave::types::{ArrayValue, Vector2};
use swptsave::{Property, SaveGame, Value, ValueKind};

fn unique_temp_dir(tag: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "swptsave-cli-{tag}-{}-{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .expect("time should be after epoch")
            .as_nanos()
    ));
    std::fs::create_dir_all(&dir).expect("temp dir should be creatable");
    dir
}

fn swptsave(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_swptsave"))
        .args(["--log-level", "error"])
        .args(args)
        .output()
        .expect("swptsave should run")
}

fn path_arg(path: &Path) -> &str {
    path.to_str().expect("temp path should be UTF-8")
}

fn write_player(dir: &Path) -> PathBuf {
    let mut scores = ArrayValue::new(ValueKind::Int32).expect("int array");
    for score in [10, 20, 30] {
        scores.push_item(Value::Int32(score)).expect("int item");
    }

    let mut file = SaveFile::new(dir.join("Player.txt"));
    file.add_property(Property::new("name", Value::String("Aurelia".into())));
    file.add_property(Property::new("alive", Value::Bool(true)));
    file.add_property(Property::new("spawn", Value::Vector2(Vector2::new(1.0, 2.0))));
    file.add_property(Property::new("scores", Value::Array(scores)));
    file.add_property(Property::new("name", Value::String("Second".into())));
    file.save().expect("save should succeed");
    file.path().to_path_buf()
}

#[test]
fn types_lists_every_kind() {
    let output = swptsave(&["--format", "json", "types"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("\"id\":\"0xE2A80856\""));
    assert!(stdout.contains("\"id\":\"0x00000053\""));
    assert!(stdout.contains("\"display_name\":\"Color\""));
}

#[test]
fn types_rejects_colliding_candidate() {
    let output = swptsave(&["types", "--candidate", "System.Single"]);
    assert_eq!(output.status.code(), Some(60));

    let output = swptsave(&["--format", "json", "types", "--candidate", "System.Double"]);
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("\"available\":true"));
}

#[test]
fn hash_prints_known_ids() {
    let output = swptsave(&["--format", "raw", "hash", "UnityEngine.Vector3", "System.String"]);
    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "0xEC66DC46\n0xFDE9F1EE\n"
    );
}

#[test]
fn hash_names_known_kinds() {
    let output = swptsave(&["--format", "json", "hash", "System.Int32", "System.Double"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains(concat!(
        r#""name":"System.Int32","hash":"0xE2A80856","#,
        r#""value":3802662998,"kind":"Integer""#
    )));
    assert!(stdout.contains("\"name\":\"System.Double\""));
    assert!(stdout.contains("\"kind\":null"));
}

#[test]
fn info_skips_foreign_files() {
    let dir = unique_temp_dir("info");
    write_player(&dir);
    std::fs::write(dir.join("readme.md"), "hello").expect("write readme");

    let output = swptsave(&["--format", "json", "info", path_arg(&dir)]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("\"name\":\"Player\""));
    assert!(stdout.contains("\"properties\":5"));
    assert!(!stdout.contains("readme"));

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn info_without_save_files_returns_2() {
    let dir = unique_temp_dir("info-empty");
    let output = swptsave(&["info", path_arg(&dir)]);
    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("no save files"));

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn dump_filters_by_name() {
    let dir = unique_temp_dir("dump");
    let path = write_player(&dir);

    let output = swptsave(&["--format", "raw", "dump", path_arg(&path), "--name", "name"]);
    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "name=Aurelia\nname=Second\n"
    );

    let output = swptsave(&["--format", "json", "dump", path_arg(&path)]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("\"type\":\"Integer Array\""));
    assert!(stdout.contains("\"value\":[10,20,30]"));
    assert!(stdout.contains("\"value\":{\"x\":1.0,\"y\":2.0}"));

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn dump_garbage_returns_60() {
    let dir = unique_temp_dir("dump-garbage");
    let path = dir.join("garbage.bin");
    std::fs::write(&path, [0x7E, 0x01, b'a', 0xFF, 0xFF, 0xFF, 0xFF]).expect("write garbage");

    let output = swptsave(&["dump", path_arg(&path)]);
    assert_eq!(output.status.code(), Some(60));

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn check_reports_round_trip() {
    let dir = unique_temp_dir("check");
    let path = write_player(&dir);

    let output = swptsave(&["--format", "json", "check", path_arg(&path)]);
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("\"ok\":true"));

    std::fs::write(dir.join("junk.dat"), [0x00, 0x01]).expect("write junk");
    let output = swptsave(&["--format", "json", "check", path_arg(&dir)]);
    assert_eq!(output.status.code(), Some(60));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("\"ok\":false"));
    assert!(stdout.contains("\"status\":\"error\""));

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn check_missing_path_returns_2() {
    let dir = unique_temp_dir("check-missing");
    let output = swptsave(&["check", path_arg(&dir.join("nope"))]);
    assert_eq!(output.status.code(), Some(2));

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn save_as_copies_the_game() {
    let root = unique_temp_dir("save-as");
    let source = root.join("Slot1");
    std::fs::create_dir(&source).expect("create source");
    let original = write_player(&source);
    let dest = root.join("nested").join("Slot2");

    let output = swptsave(&["--format", "json", "save-as", path_arg(&source), path_arg(&dest)]);
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("\"name\":\"Slot2\""));

    let copy = SaveGame::load(&dest).expect("copy should load");
    assert_eq!(copy.files().len(), 1);
    assert_eq!(
        std::fs::read(dest.join("Player.txt")).expect("read copy"),
        std::fs::read(&original).expect("read original")
    );

    let _ = std::fs::remove_dir_all(&root);
}

#[test]
fn version_prints_package_version() {
    let output = swptsave(&["version"]);
    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        format!("swptsave {}\n", env!("CARGO_PKG_VERSION"))
    );
}

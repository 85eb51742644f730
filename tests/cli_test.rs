use predicates::prelude::*;
use std::fs;
use std::process::Command;

fn cmd(name: &str) -> assert_cmd::Command {
    let exe = match name {
        "prices" => env!("CARGO_BIN_EXE_mealkit-prices"),
        "run" => env!("CARGO_BIN_EXE_mealkit-run"),
        _ => env!("CARGO_BIN_EXE_mealkit-sample"),
    };
    assert_cmd::Command::from(Command::new(exe))
}

const TABLE: &str = "\"食品番号\",\"食品名\",\"廃棄率\",\"価格\"\n\
\"01001\",\"アマランサス 玄穀\",\"0\",\"500\"\n\
\"x\",\"y\"\n\
\n\
\"01002\", \" あわ 精白粒 \",\"0\",\"320\"\n";

#[test]
fn prices_basic() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("foods.json");
    let output = dir.path().join("prices.json");
    fs::write(&input, TABLE).unwrap();

    cmd("prices")
        .arg(&output)
        .arg("--input")
        .arg(&input)
        .assert()
        .success();

    let text = fs::read_to_string(&output).unwrap();
    assert!(text.contains("        [\"アマランサス 玄穀\", \"500\"],\n"), "Got: {text}");
    let v: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(
        v,
        serde_json::json!({"foods": [
            ["食品名", "価格"],
            ["アマランサス 玄穀", "500"],
            ["あわ 精白粒", "320"]
        ]})
    );
}

#[test]
fn prices_default_input() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("foods.json"), TABLE).unwrap();

    cmd("prices")
        .current_dir(dir.path())
        .arg("prices.json")
        .assert()
        .success();

    assert!(dir.path().join("prices.json").exists());
}

#[test]
fn prices_missing_output() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("foods.json"), TABLE).unwrap();

    cmd("prices")
        .current_dir(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing argument"));

    let files = fs::read_dir(dir.path()).unwrap().count();
    assert_eq!(files, 1);
}

#[test]
fn prices_missing_output_quiet() {
    let dir = tempfile::tempdir().unwrap();

    cmd("prices")
        .current_dir(dir.path())
        .arg("-q")
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing argument"));

    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn run_missing_program() {
    cmd("run")
        .args(["--program", "mealkit-surely-not-installed", "a.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot run mealkit-surely-not-installed"));
}

#[test]
fn run_auto_needs_one_document() {
    cmd("run")
        .args(["--auto", "a.json", "b.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("automatic selection takes one document"));
}

#[cfg(unix)]
#[test]
fn run_prints_tool_output() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("a"), "echo \"selected from $1\"\n").unwrap();

    cmd("run")
        .arg("--program")
        .arg("sh")
        .arg("--dir")
        .arg(dir.path())
        .args(["--auto", "plan.json"])
        .assert()
        .success()
        .stdout("selected from plan.json\n");
}

#[cfg(unix)]
#[test]
fn run_reports_exit_status() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("c"), "echo broken >&2\nexit 4\n").unwrap();

    cmd("run")
        .arg("--program")
        .arg("sh")
        .arg("--dir")
        .arg(dir.path())
        .arg("plan.json")
        .assert()
        .failure()
        .stderr(predicate::str::contains("exited with status 4: broken"));
}

#[test]
fn sample_writes_documents() {
    let dir = tempfile::tempdir().unwrap();

    cmd("sample").arg(dir.path()).assert().success();

    assert!(dir.path().join("test.json").exists());
    assert!(dir.path().join("test_2.json").exists());
}

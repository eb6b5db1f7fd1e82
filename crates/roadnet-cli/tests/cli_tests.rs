//! Integration tests for the command stream interface.
//!
//! These tests use `assert_cmd` to verify CLI behavior including:
//! - description output on stdout and `ERROR n` lines on stderr
//! - transactional road removal seen through descriptions
//! - `--input` files and `--format json`

use std::fs;

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

fn cli() -> Command {
    let mut cmd = cargo_bin_cmd!("roadnet-cli");
    cmd.env("RUST_LOG", "off");
    cmd
}

const ABC: &str = "\
addRoad;A;B;10;2000
addRoad;B;C;10;2010
newRoute;1;A;C
getRouteDescription;1
repairRoad;A;B;2015
newRoute;2;A;C
getRouteDescription;2
";

#[test]
fn routes_are_described_on_stdout() {
    cli()
        .write_stdin(ABC)
        .assert()
        .success()
        .stdout("1;A;10;2000;B;10;2010;C\n2;A;10;2015;B;10;2010;C\n")
        .stderr("");
}

#[test]
fn rejected_lines_report_their_number() {
    let input = "\
# comment line
addRoad;A;B;10;2000
addRoad;A;B;10;2000
repairRoad;A;B;1999
newRoute;1;A;B
extendRoute;1;B
getRouteDescription;7
frobnicate;1
";
    cli()
        .write_stdin(input)
        .assert()
        .success()
        .stdout("\n")
        .stderr("ERROR 3\nERROR 4\nERROR 6\nERROR 8\n");
}

#[test]
fn failed_removal_keeps_routes_intact() {
    let input = "\
addRoad;A;B;1;2000
addRoad;B;C;1;2001
addRoad;A;E;2;2002
addRoad;E;B;2;2003
newRoute;1;A;C
2;E;2;2002;A;1;2000;B
removeRoad;A;B
getRouteDescription;1
getRouteDescription;2
removeRoute;2
removeRoad;A;B
getRouteDescription;1
";
    cli()
        .write_stdin(input)
        .assert()
        .success()
        .stdout(
            "1;A;1;2000;B;1;2001;C\n\
             2;E;2;2002;A;1;2000;B\n\
             1;A;2;2002;E;2;2003;B;1;2001;C\n",
        )
        .stderr("ERROR 7\n");
}

#[test]
fn missing_final_newline_is_an_error() {
    cli()
        .write_stdin("addRoad;A;B;1;1\ngetRouteDescription;1")
        .assert()
        .success()
        .stdout("")
        .stderr("ERROR 2\n");
}

#[test]
fn commands_can_be_read_from_a_file() {
    let dir = tempdir().expect("create temp dir");
    let path = dir.path().join("commands.txt");
    fs::write(&path, ABC).expect("write command file");

    cli()
        .arg("--input")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("2;A;10;2015;B;10;2010;C"));
}

#[test]
fn missing_input_file_fails() {
    let dir = tempdir().expect("create temp dir");
    cli()
        .arg("--input")
        .arg(dir.path().join("absent.txt"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to open command file"));
}

#[test]
fn json_format_emits_one_object_per_description() {
    let output = cli()
        .args(["--format", "json"])
        .write_stdin("addRoad;A;B;3;1990\nnewRoute;4;B;A\ngetRouteDescription;4\ngetRouteDescription;5\n")
        .output()
        .expect("run cli");
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).expect("utf-8");
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 2);

    let route: serde_json::Value = serde_json::from_str(lines[0]).expect("json object");
    assert_eq!(route["id"], 4);
    assert_eq!(route["origin"], "B");
    assert_eq!(route["legs"][0]["city"], "A");
    assert_eq!(route["legs"][0]["length"], 3);
    assert_eq!(lines[1], "null");
}

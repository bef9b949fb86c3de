#![cfg(feature = "cli")]

use std::io::Write;

use assert_cmd::Command;
use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains as str_contains;
use tempfile::NamedTempFile;

#[allow(deprecated)]
fn run_cli(script: &str) -> assert_cmd::assert::Assert {
    let mut cmd = Command::cargo_bin("cli").expect("cli binary");
    cmd.write_stdin(script.to_string()).assert()
}

fn data_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn cli_loads_files_and_answers_queries() {
    let buildings = data_file("A,Alpha,0,0\nB,Beta,3,4\nC,Gamma,10,10\n");
    let schedules = data_file("Sam,9am,A\nSam,10am,B\nLee,9am,C\n");
    let script = format!(
        "load buildings {}\nload schedules {}\nname gam\nfriend sam\nquit\n",
        buildings.path().display(),
        schedules.path().display()
    );

    run_cli(&script)
        .success()
        .stdout(str_contains("Loaded 3 buildings."))
        .stdout(str_contains("Loaded 3 schedules."))
        .stdout(str_contains("Gamma"))
        .stdout(str_contains("10am"));
}

#[test]
fn cli_reports_invalid_coordinates() {
    run_cli("near abc 1\nfriends 1\nquit\n")
        .success()
        .stdout(str_contains("Invalid coordinates"));
}

#[test]
fn cli_reports_missing_files_and_empty_results() {
    run_cli("load buildings /definitely/not/here.csv\nname x\nfriends 0 0\nquit\n")
        .success()
        .stdout(str_contains("Error loading buildings"))
        .stdout(str_contains("No buildings found.").and(str_contains("No classes found.")));
}

#[test]
fn cli_table_aligns_non_ascii_names() {
    let buildings = data_file("Ü,Über Hall,1,2\nAB,Plain,3,4\n");
    let script = format!("load buildings {}\nname\nquit\n", buildings.path().display());

    run_cli(&script)
        .success()
        .stdout(str_contains("| Ü          | Über Hall | 1 | 2 |"))
        .stdout(str_contains("| AB         | Plain     | 3 | 4 |"));
}

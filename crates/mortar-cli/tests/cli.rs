use std::io::Write;

use assert_cmd::Command;
use predicates::prelude::*;

fn mortar() -> Command {
    Command::cargo_bin("mortar").unwrap()
}

#[test]
fn list_shows_reference_points() {
    mortar()
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("b2").and(predicate::str::contains("(477, 64)")))
        .stdout(predicate::str::contains("d3").and(predicate::str::contains("(580, 316)")));
}

#[test]
fn solve_prints_report() {
    mortar()
        .args(["solve", "--launch", "b2", "--x", "580", "--y", "316"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Azimuth      22° (N)"))
        .stdout(predicate::str::contains("Elevation    74°"))
        .stdout(predicate::str::contains("Distance     272 units"))
        .stdout(predicate::str::contains("Flight time  2.3 sec"));
}

#[test]
fn solve_defaults_to_first_launch_point() {
    mortar()
        .args(["solve", "--x", "477", "--y", "64"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Launch point B2 (b2)"))
        .stdout(predicate::str::contains("Elevation    85°"));
}

#[test]
fn solve_json_output() {
    let out = mortar()
        .args(["solve", "--launch", "b3", "--x", "0", "--y", "573", "--json"])
        .output()
        .unwrap();
    assert!(out.status.success());

    let v: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(v["solution"]["azimuth_deg"], 307);
    assert_eq!(v["solution"]["elevation_deg"], 50);
    assert_eq!(v["solution"]["distance"], 838.0);
    assert_eq!(v["solution"]["time_of_flight_s"], 4.7);
    assert_eq!(v["compass"], "NW");
    assert_eq!(v["launch_point"]["id"], "b3");
}

#[test]
fn negative_coordinates_are_accepted() {
    mortar()
        .args(["solve", "--launch", "b2", "--x", "-523", "--y", "64"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Azimuth      270° (W)"))
        .stdout(predicate::str::contains("Distance     1000 units"));
}

#[test]
fn unknown_launch_point_fails() {
    mortar()
        .args(["solve", "--launch", "nonexistent", "--x", "0", "--y", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("launch point `nonexistent` not found"));
}

#[test]
fn config_file_overrides_registry() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{ "launch_points": [ {{ "id": "k5", "name": "K5", "x": 100, "y": 100 }} ] }}"#
    )
    .unwrap();

    mortar()
        .arg("--config")
        .arg(file.path())
        .args(["solve", "--x", "100", "--y", "200"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Launch point K5 (k5)"))
        .stdout(predicate::str::contains("Azimuth      0° (N)"));

    mortar()
        .arg("--config")
        .arg(file.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("b2").not());
}

#[test]
fn bad_config_file_fails() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, r#"{{ "max_range_factor": 0 }}"#).unwrap();

    mortar()
        .arg("--config")
        .arg(file.path())
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("max range factor"));
}

#[test]
fn config_prints_json() {
    let out = mortar().arg("config").output().unwrap();
    assert!(out.status.success());
    let v: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(v["map"]["width"], 1187.0);
    assert_eq!(v["launch_points"].as_array().map(Vec::len), Some(3));
}

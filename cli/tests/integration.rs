//! End-to-end integration tests for the unjoin CLI

use assert_cmd::cargo;
use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

fn unjoin_cli() -> Command {
    Command::new(cargo::cargo_bin!("unjoin"))
}

const MAPPING: &str = r#"
autoRemoveLinkKey = true

[[tables]]
alias = "user"

[[tables]]
alias = "role"
parent = "user"
foreignKey = "user_id"
kind = "many-to-many"
rename = "roles"

[[tables]]
alias = "address"
parent = "user"
foreignKey = "user_id"
kind = "many-to-one"
remove = ["street2"]
"#;

const ROWS: &str = r#"[
  {"user-id": 1, "user-name": "Leng", "role-id": 2, "role-user_id": 1, "role-name": "Admin",
   "address-id": 128, "address-user_id": 1, "address-street1": "Some block", "address-street2": "x"},
  {"user-id": 1, "user-name": "Leng", "role-id": 2, "role-user_id": 1, "role-name": "Admin",
   "address-id": 129, "address-user_id": 1, "address-street1": "Company Block", "address-street2": null},
  {"user-id": 2, "user-name": "Superman", "role-id": null, "role-user_id": null, "role-name": null,
   "address-id": null, "address-user_id": null, "address-street1": null, "address-street2": null}
]"#;

/// Temp dir holding `unjoin.toml` and `rows.json`
fn workspace(mapping: &str) -> TempDir {
    let temp = TempDir::new().unwrap();
    std::fs::write(temp.path().join("unjoin.toml"), mapping).unwrap();
    std::fs::write(temp.path().join("rows.json"), ROWS).unwrap();
    temp
}

fn stdout_json(cmd: &mut Command) -> serde_json::Value {
    parse_stdout(cmd.output().unwrap())
}

fn parse_stdout(output: std::process::Output) -> serde_json::Value {
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).unwrap()
}

fn map_in(dir: &Path) -> Command {
    let mut cmd = unjoin_cli();
    cmd.current_dir(dir).env_remove("RUST_LOG").arg("map");
    cmd
}

/// `unjoin map -` fed from stdin
fn map_stdin(dir: &Path, rows: &str) -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("unjoin");
    cmd.current_dir(dir)
        .env_remove("RUST_LOG")
        .args(["map", "-"])
        .write_stdin(rows.to_string());
    cmd
}

mod map {
    use super::*;
    use serde_json::json;

    #[test]
    fn nests_rows_from_a_file() {
        let temp = workspace(MAPPING);
        let json = stdout_json(map_in(temp.path()).arg("rows.json"));
        assert_eq!(
            json,
            json!([
                {
                    "id": 1,
                    "name": "Leng",
                    "roles": [{ "id": 2, "name": "Admin" }],
                    "address": [
                        { "id": 128, "street1": "Some block" },
                        { "id": 129, "street1": "Company Block" }
                    ]
                },
                { "id": 2, "name": "Superman", "roles": [], "address": [] }
            ])
        );
    }

    #[test]
    fn reads_rows_from_stdin() {
        let temp = workspace(MAPPING);
        let json = parse_stdout(map_stdin(temp.path(), ROWS).output().unwrap());
        assert_eq!(json.as_array().map(Vec::len), Some(2));
        assert_eq!(json[1]["name"], "Superman");
    }

    #[test]
    fn raw_lists_distinct_records_per_table() {
        let temp = workspace(MAPPING);
        let json = stdout_json(map_in(temp.path()).args(["rows.json", "--raw"]));
        assert_eq!(json["user"].as_array().map(Vec::len), Some(2));
        assert_eq!(json["address"].as_array().map(Vec::len), Some(2));
        assert!(json["address"][0].get("street2").is_none());
        assert!(json.get("roles").is_some());
    }

    #[test]
    fn pretty_output_is_indented() {
        let temp = workspace(MAPPING);
        map_in(temp.path())
            .args(["rows.json", "--pretty"])
            .assert()
            .success()
            .stdout(predicate::str::contains("\n  {\n    \"id\": 1"));
    }

    #[test]
    fn writes_to_out_file() {
        let temp = workspace(MAPPING);
        map_in(temp.path())
            .args(["rows.json", "--out", "users.json"])
            .assert()
            .success()
            .stdout(predicate::str::is_empty());

        let written = std::fs::read_to_string(temp.path().join("users.json")).unwrap();
        let json: serde_json::Value = serde_json::from_str(&written).unwrap();
        assert_eq!(json[0]["address"][1]["id"], 129);
    }

    #[test]
    fn delimiter_override() {
        let temp = workspace("[[tables]]\nalias = \"user\"\n");
        std::fs::write(
            temp.path().join("dotted.json"),
            r#"[{"user.id": 7, "user.name": "Ada"}, {"user.id": 7, "user.name": "Ada"}]"#,
        )
        .unwrap();
        let json = stdout_json(map_in(temp.path()).args(["dotted.json", "--delimiter", "."]));
        assert_eq!(json, json!([{ "id": 7, "name": "Ada" }]));
    }

    #[test]
    fn explicit_config_path() {
        let temp = workspace(MAPPING);
        std::fs::rename(
            temp.path().join("unjoin.toml"),
            temp.path().join("mapping.toml"),
        )
        .unwrap();
        let json = stdout_json(map_in(temp.path()).args(["rows.json", "-c", "mapping.toml"]));
        assert_eq!(json[0]["roles"][0]["name"], "Admin");
    }

    #[test]
    fn empty_rows_map_to_empty_array() {
        let temp = workspace(MAPPING);
        let json = parse_stdout(map_stdin(temp.path(), "[]").output().unwrap());
        assert_eq!(json, json!([]));
    }

    #[test]
    fn rejects_rows_that_are_not_an_array() {
        let temp = workspace(MAPPING);
        map_stdin(temp.path(), r#"{"user-id": 1}"#)
            .assert()
            .failure()
            .stderr(predicate::str::contains("expected a JSON array"));
    }

    #[test]
    fn rejects_nested_cells() {
        let temp = workspace(MAPPING);
        map_stdin(temp.path(), r#"[{"user-id": 1}, {"user-id": {"nested": true}}]"#)
            .assert()
            .failure()
            .stderr(predicate::str::contains("row 1"));
    }

    #[test]
    fn missing_row_file() {
        let temp = workspace(MAPPING);
        map_in(temp.path())
            .arg("nope.json")
            .assert()
            .failure()
            .stderr(predicate::str::contains("nope.json"));
    }

    #[test]
    fn verbose_logs_go_to_stderr() {
        let temp = workspace(MAPPING);
        let output = map_in(temp.path())
            .args(["rows.json", "-vv"])
            .output()
            .unwrap();
        assert!(output.status.success());
        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(stderr.contains("mapped rows"), "{stderr}");
        let _: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    }
}

mod check {
    use super::*;

    #[test]
    fn prints_processing_order() {
        let temp = workspace(MAPPING);
        unjoin_cli()
            .current_dir(temp.path())
            .arg("check")
            .assert()
            .success()
            .stdout(
                predicate::str::contains("Root")
                    .and(predicate::str::contains("1. user"))
                    .and(predicate::str::contains("role -> user (many-to-many, as roles)"))
                    .and(predicate::str::contains("Mapping is valid")),
            );
    }

    #[test]
    fn children_are_listed_before_parents() {
        let mapping = r#"
            [[tables]]
            alias = "user"

            [[tables]]
            alias = "customer"
            parent = "user"
            foreignKey = "user_id"
            kind = "one-to-one"

            [[tables]]
            alias = "refund"
            parent = "customer"
            foreignKey = "customer_id"
            kind = "many-to-one"
        "#;
        let temp = workspace(mapping);
        unjoin_cli()
            .current_dir(temp.path())
            .arg("check")
            .assert()
            .success()
            .stdout(
                predicate::str::contains("2. refund")
                    .and(predicate::str::contains("3. customer")),
            );
    }

    #[test]
    fn unknown_parent_fails() {
        let mapping = r#"
            [[tables]]
            alias = "user"

            [[tables]]
            alias = "role"
            parent = "account"
            foreignKey = "user_id"
            kind = "many-to-many"
        "#;
        let temp = workspace(mapping);
        unjoin_cli()
            .current_dir(temp.path())
            .arg("check")
            .assert()
            .failure()
            .stderr(predicate::str::contains("account"));
    }

    #[test]
    fn cycle_fails() {
        let mapping = r#"
            [[tables]]
            alias = "user"

            [[tables]]
            alias = "a"
            parent = "b"
            foreignKey = "b_id"
            kind = "one-to-one"

            [[tables]]
            alias = "b"
            parent = "a"
            foreignKey = "a_id"
            kind = "one-to-one"
        "#;
        let temp = workspace(mapping);
        unjoin_cli()
            .current_dir(temp.path())
            .arg("check")
            .assert()
            .failure()
            .stderr(predicate::str::contains("Error:"));
    }

    #[test]
    fn invalid_toml_fails() {
        let temp = workspace("[[tables]\nalias = ");
        unjoin_cli()
            .current_dir(temp.path())
            .arg("check")
            .assert()
            .failure()
            .stderr(predicate::str::contains("failed to parse"));
    }

    #[test]
    fn missing_config_fails() {
        let temp = TempDir::new().unwrap();
        unjoin_cli()
            .current_dir(temp.path())
            .arg("check")
            .assert()
            .failure()
            .stderr(predicate::str::contains("config not found"));
    }
}

mod init {
    use super::*;

    #[test]
    fn creates_a_valid_config() {
        let temp = TempDir::new().unwrap();
        unjoin_cli()
            .current_dir(temp.path())
            .arg("init")
            .assert()
            .success()
            .stdout(predicate::str::contains("Created unjoin.toml"));

        assert!(temp.path().join("unjoin.toml").exists());
        unjoin_cli()
            .current_dir(temp.path())
            .arg("check")
            .assert()
            .success();
    }

    #[test]
    fn refuses_to_overwrite() {
        let temp = workspace(MAPPING);
        unjoin_cli()
            .current_dir(temp.path())
            .arg("init")
            .assert()
            .failure()
            .stderr(predicate::str::contains("already exists"));
        let kept = std::fs::read_to_string(temp.path().join("unjoin.toml")).unwrap();
        assert_eq!(kept, MAPPING);
    }
}

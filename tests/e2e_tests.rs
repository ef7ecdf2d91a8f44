//! End-to-end tests for the conda-envgen CLI
//!
//! These tests verify:
//! - The YAML and JSON documents written in offline mode
//! - Exit codes and diagnostics for bad input
//!
//! Every run uses --offline so no network access is needed.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

fn create_test_project() -> (TempDir, PathBuf) {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");
    let path = temp_dir.path().join("pyproject.toml");
    let pyproject = r#"[project]
name = "sample"
requires-python = ">=3.8"
dependencies = [
    "requests>=2.28.0",
    "numpy",
]

[project.optional-dependencies]
test = ["pytest>=7.0.0"]
gpu = ["cupy"]
"#;
    fs::write(&path, pyproject).unwrap();
    (temp_dir, path)
}

fn conda_envgen() -> Command {
    Command::cargo_bin("conda-envgen").expect("binary should be built")
}

mod offline_output {
    use super::*;

    #[test]
    fn test_yaml_document() {
        let (_dir, path) = create_test_project();

        let output = conda_envgen()
            .arg(&path)
            .arg("--offline")
            .output()
            .unwrap();
        assert!(output.status.success());

        let stdout = String::from_utf8(output.stdout).unwrap();
        let expected = "\
name: sample
channels:
- conda-forge
dependencies:
- python>=3.8
- pip
- pip:
  - flit
  - cupy
  - numpy
  - pytest>=7.0.0
  - requests>=2.28.0
";
        assert_eq!(stdout, expected);
    }

    #[test]
    fn test_production_scope() {
        let (_dir, path) = create_test_project();

        conda_envgen()
            .arg(&path)
            .args(["--offline", "--deps", "production"])
            .assert()
            .success()
            .stdout(predicate::str::contains("requests>=2.28.0"))
            .stdout(predicate::str::contains("pytest").not())
            .stdout(predicate::str::contains("cupy").not());
    }

    #[test]
    fn test_extras_selection() {
        let (_dir, path) = create_test_project();

        conda_envgen()
            .arg(&path)
            .args(["--offline", "--deps", "extras", "--extras", "gpu"])
            .assert()
            .success()
            .stdout(predicate::str::contains("cupy"))
            .stdout(predicate::str::contains("pytest").not());
    }

    #[test]
    fn test_json_output() {
        let (_dir, path) = create_test_project();

        let output = conda_envgen()
            .arg(&path)
            .args(["--offline", "--json"])
            .output()
            .unwrap();
        assert!(output.status.success());

        let json: serde_json::Value =
            serde_json::from_slice(&output.stdout).expect("Output should be valid JSON");
        assert_eq!(json["name"], "sample");
        assert_eq!(json["channels"][0], "conda-forge");
        assert_eq!(json["dependencies"][0], "python>=3.8");
        assert_eq!(json["dependencies"][2]["pip"][0], "flit");
    }

    #[test]
    fn test_output_file() {
        let (dir, path) = create_test_project();
        let target = dir.path().join("environment.yml");

        conda_envgen()
            .arg(&path)
            .arg("--offline")
            .arg("-o")
            .arg(&target)
            .assert()
            .success()
            .stdout(predicate::str::is_empty());

        let written = fs::read_to_string(&target).unwrap();
        assert!(written.starts_with("name: sample\n"));
    }

    #[test]
    fn test_custom_channel_and_build_tool() {
        let (_dir, path) = create_test_project();

        conda_envgen()
            .arg(&path)
            .args([
                "--offline",
                "--channel",
                "bioconda",
                "--build-tool",
                "hatch",
            ])
            .assert()
            .success()
            .stdout(predicate::str::contains("- bioconda"))
            .stdout(predicate::str::contains("  - hatch"));
    }
}

mod exit_codes {
    use super::*;

    #[test]
    fn test_missing_file() {
        conda_envgen()
            .args(["/nonexistent/pyproject.toml", "--offline"])
            .assert()
            .failure()
            .stdout(predicate::str::is_empty())
            .stderr(predicate::str::contains("metadata file not found"));
    }

    #[test]
    fn test_malformed_metadata() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("pyproject.toml");
        fs::write(&path, "[build-system]\nrequires = [\"flit_core\"]\n").unwrap();

        conda_envgen()
            .arg(&path)
            .arg("--offline")
            .assert()
            .failure()
            .stdout(predicate::str::is_empty())
            .stderr(predicate::str::contains("malformed metadata"));
    }

    #[test]
    fn test_no_partial_output_file_on_failure() {
        let (dir, good) = create_test_project();
        let target = dir.path().join("environment.yml");

        conda_envgen()
            .arg(&good)
            .arg(dir.path().join("missing.toml"))
            .arg("--offline")
            .arg("-o")
            .arg(&target)
            .assert()
            .failure();

        assert!(!target.exists());
    }

    #[test]
    fn test_unknown_flag() {
        let (_dir, path) = create_test_project();

        conda_envgen()
            .arg(&path)
            .arg("--no-such-flag")
            .assert()
            .failure();
    }

    #[test]
    fn test_no_paths() {
        conda_envgen().assert().failure();
    }

    #[test]
    fn test_invalid_concurrency() {
        let (_dir, path) = create_test_project();

        conda_envgen()
            .arg(&path)
            .args(["--offline", "--concurrency", "0"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("invalid concurrency"));
    }
}

/// End-to-end tests for config file loading and CLI option merging.
///
/// These tests exercise the full flow from config file on disk through CLI invocation
/// to the files written, using `assert_cmd` and `tempfile` for isolated test environments.
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

// ============================================================================
// Helper Functions
// ============================================================================

/// Repository with nothing to build, so no external tool is started.
fn docs_only_repo() -> TempDir {
    let repo = TempDir::new().unwrap();
    fs::write(repo.path().join("README.md"), "# docs\n").unwrap();
    repo
}

fn write_config(path: &Path, content: &str) {
    fs::write(path, content).unwrap();
}

// ============================================================================
// Auto-discovery
// ============================================================================

mod auto_discovery {
    use super::*;

    #[test]
    fn test_discovered_config_sets_output_dir() {
        let cwd = TempDir::new().unwrap();
        let repo = docs_only_repo();
        write_config(
            &cwd.path().join("sbom-orchestrator.config.yml"),
            "output_dir: build/sbom\n",
        );

        cargo_bin_cmd!("sbom-orchestrator")
            .current_dir(cwd.path())
            .args(["tree", repo.path().to_str().unwrap()])
            .assert()
            .success();

        assert!(cwd.path().join("build/sbom/report.txt").exists());
        assert!(!cwd.path().join("output").exists());
    }

    #[test]
    fn test_discovered_config_limits_ecosystems() {
        let cwd = TempDir::new().unwrap();
        let repo = docs_only_repo();
        write_config(
            &cwd.path().join("sbom-orchestrator.config.yml"),
            "ecosystems:\n  - maven\n",
        );

        cargo_bin_cmd!("sbom-orchestrator")
            .current_dir(cwd.path())
            .args(["tree", repo.path().to_str().unwrap()])
            .assert()
            .success();

        let report = fs::read_to_string(cwd.path().join("output/report.txt")).unwrap();
        assert!(report.contains("Section 5.2: Maven Projects"));
        assert!(!report.contains("Section 5.1: Go Modules"));
    }

    #[test]
    fn test_no_config_file_runs_normally() {
        let cwd = TempDir::new().unwrap();
        let repo = docs_only_repo();

        cargo_bin_cmd!("sbom-orchestrator")
            .current_dir(cwd.path())
            .args(["tree", repo.path().to_str().unwrap()])
            .assert()
            .success();

        let report = fs::read_to_string(cwd.path().join("output/report.txt")).unwrap();
        for title in ["Go Modules", "Maven Projects", "Gradle Projects", "Python Projects", "Node.js Projects"] {
            assert!(report.contains(title), "missing {}", title);
        }
    }
}

// ============================================================================
// Explicit --config and merging
// ============================================================================

mod explicit_config {
    use super::*;

    #[test]
    fn test_cli_output_dir_wins_over_config() {
        let cwd = TempDir::new().unwrap();
        let repo = docs_only_repo();
        let config = cwd.path().join("custom.yml");
        write_config(&config, "output_dir: from-config\n");

        cargo_bin_cmd!("sbom-orchestrator")
            .current_dir(cwd.path())
            .args([
                "--config",
                config.to_str().unwrap(),
                "tree",
                repo.path().to_str().unwrap(),
                "-o",
                "from-cli",
            ])
            .assert()
            .success();

        assert!(cwd.path().join("from-cli/report.txt").exists());
        assert!(!cwd.path().join("from-config").exists());
    }

    #[test]
    fn test_report_file_from_config() {
        let cwd = TempDir::new().unwrap();
        let repo = docs_only_repo();
        let config = cwd.path().join("custom.yml");
        write_config(&config, "report_file: reports/trees.txt\n");

        cargo_bin_cmd!("sbom-orchestrator")
            .current_dir(cwd.path())
            .args(["-c", config.to_str().unwrap(), "tree", repo.path().to_str().unwrap()])
            .assert()
            .success();

        assert!(cwd.path().join("reports/trees.txt").exists());
    }

    #[test]
    fn test_missing_config_file_is_an_error() {
        let cwd = TempDir::new().unwrap();
        let repo = docs_only_repo();

        cargo_bin_cmd!("sbom-orchestrator")
            .current_dir(cwd.path())
            .args(["--config", "missing.yml", "tree", repo.path().to_str().unwrap()])
            .assert()
            .code(3)
            .stderr(predicate::str::contains("Failed to read config file"));
    }
}

// ============================================================================
// Validation
// ============================================================================

mod validation {
    use super::*;

    #[test]
    fn test_invalid_yaml_is_rejected() {
        let cwd = TempDir::new().unwrap();
        let repo = docs_only_repo();
        write_config(
            &cwd.path().join("sbom-orchestrator.config.yml"),
            "ecosystems: [[[broken",
        );

        cargo_bin_cmd!("sbom-orchestrator")
            .current_dir(cwd.path())
            .args(["tree", repo.path().to_str().unwrap()])
            .assert()
            .code(3)
            .stderr(predicate::str::contains("Failed to parse config file"));
    }

    #[test]
    fn test_zero_batch_size_is_rejected() {
        let cwd = TempDir::new().unwrap();
        let repo = docs_only_repo();
        write_config(
            &cwd.path().join("sbom-orchestrator.config.yml"),
            "gradle_batch_size: 0\n",
        );

        cargo_bin_cmd!("sbom-orchestrator")
            .current_dir(cwd.path())
            .args(["tree", repo.path().to_str().unwrap()])
            .assert()
            .code(3)
            .stderr(predicate::str::contains("gradle_batch_size must be greater than 0"));
    }

    #[test]
    fn test_unknown_field_is_warned_about() {
        let cwd = TempDir::new().unwrap();
        let repo = docs_only_repo();
        write_config(
            &cwd.path().join("sbom-orchestrator.config.yml"),
            "skip_sbom: true\nformat: markdown\n",
        );

        cargo_bin_cmd!("sbom-orchestrator")
            .current_dir(cwd.path())
            .args(["tree", repo.path().to_str().unwrap()])
            .assert()
            .success()
            .stderr(predicate::str::contains(
                "Unknown config field 'format' will be ignored",
            ));
    }
}

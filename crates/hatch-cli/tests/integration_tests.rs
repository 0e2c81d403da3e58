//! Integration tests for hatch-cli.

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn builtin_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("builtin")
}

/// `hatch` running in `cwd` with the shipped built-in library and a private
/// home so user config never leaks in.
fn hatch(cwd: &Path, home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("hatch").unwrap();
    cmd.current_dir(cwd)
        .env("HATCH_BUILTIN_ROOT", builtin_root())
        .env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join("config"))
        .env("XDG_DATA_HOME", home.join("data"))
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG");
    cmd
}

fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

#[test]
fn test_version_flag() {
    let home = TempDir::new().unwrap();
    hatch(home.path(), home.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn generate_without_namespace_lists_generators() {
    let (project, home) = (TempDir::new().unwrap(), TempDir::new().unwrap());

    hatch(project.path(), home.path())
        .arg("generate")
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "Usage: hatch generate GENERATOR [args] [options]",
        ))
        .stdout(predicate::str::contains("Please choose a generator below."))
        .stdout(predicate::str::contains("Hatch:\n  model\n  resource\n"))
        .stdout(predicate::str::contains("  app\n").not());
}

#[test]
fn generate_copies_templates_into_project() {
    let (project, home) = (TempDir::new().unwrap(), TempDir::new().unwrap());

    hatch(project.path(), home.path())
        .args(["generate", "model", "User"])
        .assert()
        .success()
        .stdout(predicate::str::contains("hatch:model finished"));

    assert!(project.path().join("models/schema.toml").is_file());
}

#[test]
fn shipped_library_is_found_without_an_override() {
    let (project, home) = (TempDir::new().unwrap(), TempDir::new().unwrap());

    hatch(project.path(), home.path())
        .env_remove("HATCH_BUILTIN_ROOT")
        .args(["generate", "model", "User"])
        .assert()
        .success();

    assert!(project.path().join("models/schema.toml").is_file());
}

#[test]
fn hidden_generator_still_runs_by_name() {
    let (project, home) = (TempDir::new().unwrap(), TempDir::new().unwrap());

    hatch(project.path(), home.path())
        .args(["generate", "app", "Shop"])
        .assert()
        .success()
        .stdout(predicate::str::contains("hatch:app finished"));

    assert!(project.path().join("Hatchfile.toml").is_file());
    assert!(project.path().join("README.md").is_file());
}

#[test]
fn missing_required_argument_prints_generator_help() {
    let (project, home) = (TempDir::new().unwrap(), TempDir::new().unwrap());

    hatch(project.path(), home.path())
        .args(["g", "model"])
        .assert()
        .success()
        .stdout(predicate::str::contains("hatch generate model NAME [options]"))
        .stdout(predicate::str::contains("Model name (required)"));

    assert!(!project.path().join("models").exists());
}

#[test]
fn hooks_run_after_the_generator() {
    let (project, home) = (TempDir::new().unwrap(), TempDir::new().unwrap());

    hatch(project.path(), home.path())
        .args(["generate", "resource", "Post"])
        .assert()
        .success();

    assert!(project.path().join("routes/resources.toml").is_file());
    assert!(project.path().join("models/schema.toml").is_file());
}

#[test]
fn pretend_writes_nothing() {
    let (project, home) = (TempDir::new().unwrap(), TempDir::new().unwrap());

    hatch(project.path(), home.path())
        .args(["generate", "model", "User", "--pretend"])
        .assert()
        .success();

    assert!(!project.path().join("models").exists());
}

#[test]
fn existing_files_survive_without_force() {
    let (project, home) = (TempDir::new().unwrap(), TempDir::new().unwrap());
    write(project.path(), "models/schema.toml", "mine");

    hatch(project.path(), home.path())
        .args(["generate", "model", "User"])
        .assert()
        .success();
    assert_eq!(
        fs::read_to_string(project.path().join("models/schema.toml")).unwrap(),
        "mine"
    );

    hatch(project.path(), home.path())
        .args(["generate", "model", "User", "--force"])
        .assert()
        .success();
    assert_ne!(
        fs::read_to_string(project.path().join("models/schema.toml")).unwrap(),
        "mine"
    );
}

#[test]
fn project_root_is_found_from_a_subdirectory() {
    let (project, home) = (TempDir::new().unwrap(), TempDir::new().unwrap());
    write(project.path(), "Hatchfile.toml", "[project]\nlayout = \"default\"\n");
    let nested = project.path().join("src/deep");
    fs::create_dir_all(&nested).unwrap();

    hatch(&nested, home.path())
        .args(["generate", "model", "User"])
        .assert()
        .success();

    assert!(project.path().join("models/schema.toml").is_file());
    assert!(!nested.join("models").exists());
}

#[test]
fn project_generators_override_builtin_ones() {
    let (project, home) = (TempDir::new().unwrap(), TempDir::new().unwrap());
    write(
        project.path(),
        "lib/generators/hatch/model/index.toml",
        "[generator]\ndescription = \"Project-specific model\"\n",
    );

    hatch(project.path(), home.path())
        .args(["generate", "model", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Project-specific model"));
}

#[test]
fn namespaced_project_generator_is_listed_in_its_own_group() {
    let (project, home) = (TempDir::new().unwrap(), TempDir::new().unwrap());
    write(
        project.path(),
        "lib/hatch/generators/scaffold/view/index.toml",
        "[generator]\ndescription = \"A view\"\n",
    );

    hatch(project.path(), home.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Hatch:\n  model\n  resource\n\nScaffold:\n  scaffold:view\n"));
}

#[test]
fn list_all_includes_hidden_generators() {
    let (project, home) = (TempDir::new().unwrap(), TempDir::new().unwrap());

    hatch(project.path(), home.path())
        .args(["list", "--all", "--format", "list"])
        .assert()
        .success()
        .stdout("hatch:app\nhatch:model\nhatch:resource\n");
}

#[test]
fn configured_hidden_namespaces_are_left_out() {
    let (project, home) = (TempDir::new().unwrap(), TempDir::new().unwrap());

    hatch(project.path(), home.path())
        .env("HATCH__LOOKUP__HIDDEN", "hatch:resource")
        .args(["ls", "--format", "list"])
        .assert()
        .success()
        .stdout("hatch:model\n");
}

#[test]
fn list_json_is_parseable() {
    let (project, home) = (TempDir::new().unwrap(), TempDir::new().unwrap());

    let output = hatch(project.path(), home.path())
        .args(["list", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let entries: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let namespaces: Vec<_> = entries
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["namespace"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(namespaces, ["hatch:model", "hatch:resource"]);
    assert_eq!(entries[0]["root"], "builtin");
}

#[test]
fn config_get_reads_defaults_and_environment() {
    let home = TempDir::new().unwrap();

    hatch(home.path(), home.path())
        .args(["config", "get", "lookup.project_marker"])
        .assert()
        .success()
        .stdout("Hatchfile.toml\n");

    hatch(home.path(), home.path())
        .env("HATCH__LOOKUP__PROJECT_MARKER", "Build.toml")
        .args(["config", "get", "lookup.project_marker"])
        .assert()
        .success()
        .stdout("Build.toml\n");
}

#[test]
fn init_local_writes_loadable_config() {
    let (project, home) = (TempDir::new().unwrap(), TempDir::new().unwrap());

    hatch(project.path(), home.path())
        .args(["init", "--local"])
        .assert()
        .success();

    let written = fs::read_to_string(project.path().join(".hatch.toml")).unwrap();
    assert!(written.contains("project_marker = \"Hatchfile.toml\""));

    hatch(project.path(), home.path())
        .args(["config", "get", "output.no_color"])
        .assert()
        .success()
        .stdout("false\n");
}

#[test]
fn completions_name_the_binary() {
    let home = TempDir::new().unwrap();

    hatch(home.path(), home.path())
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("hatch"));
}

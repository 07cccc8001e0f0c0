//! Integration tests for the check, testconf, and externs commands, and for
//! configuration discovery across both config homes.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn gantry_cmd() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("gantry"))
}

#[test]
fn check_reports_a_valid_combined_project() {
    let dir = TempDir::new().unwrap();
    fs::create_dir_all(dir.path().join("target")).unwrap();
    fs::write(dir.path().join("target/main.js"), "// bundle\n").unwrap();
    fs::write(
        dir.path().join("gantry.toml"),
        "[site]\nmain_file = \"target/main.js\"\n",
    )
    .unwrap();

    gantry_cmd()
        .current_dir(&dir)
        .arg("check")
        .assert()
        .success()
        .stderr(predicate::str::contains("is valid"))
        .stderr(predicate::str::contains("combined bundle"))
        .stderr(predicate::str::contains("All checks passed!"));
}

#[test]
fn check_warns_when_nothing_compiled() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("gantry.toml"),
        "[site]\nmain_file = \"target/main.js\"\n",
    )
    .unwrap();

    gantry_cmd()
        .current_dir(&dir)
        .arg("check")
        .assert()
        .success()
        .stderr(predicate::str::contains("no compiled bundle found yet"));
}

#[test]
fn check_rejects_escaping_routes() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("gantry.toml"),
        "[site]\nmain_file = \"target/main.js\"\npages = [\"../escape.html\"]\n",
    )
    .unwrap();

    gantry_cmd()
        .current_dir(&dir)
        .arg("check")
        .assert()
        .failure()
        .stderr(predicate::str::contains("site.pages"));
}

#[test]
fn package_json_is_a_config_home() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("package.json"),
        r#"{"name": "docs", "gantry": {"site": {"main_file": "target/main.js"}}}"#,
    )
    .unwrap();

    gantry_cmd()
        .current_dir(&dir)
        .arg("check")
        .assert()
        .success()
        .stderr(predicate::str::contains("package.json is valid"));
}

#[test]
fn config_flag_rebases_paths_onto_the_config_directory() {
    let dir = TempDir::new().unwrap();
    fs::create_dir_all(dir.path().join("docs/target")).unwrap();
    fs::write(dir.path().join("docs/target/main.js"), "// bundle\n").unwrap();
    fs::write(
        dir.path().join("docs/gantry.toml"),
        "[site]\nmain_file = \"target/main.js\"\n",
    )
    .unwrap();

    gantry_cmd()
        .current_dir(&dir)
        .args(["gen", "--config", "docs/gantry.toml"])
        .assert()
        .success();

    // The site lands next to the config file, not the working directory.
    assert!(dir.path().join("docs/public/index.html").exists());
    assert!(!dir.path().join("public").exists());
}

#[test]
fn testconf_writes_each_environment() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("gantry.toml"),
        "[site]\nmain_file = \"target/main.js\"\n\n\
         [testenv.bundle]\ndir = \"test-environments/bundle\"\nfiles = [\"js/main.js\"]\n\n\
         [testenv.node-env]\ndir = \"test-environments/node-env\"\n",
    )
    .unwrap();

    gantry_cmd()
        .current_dir(&dir)
        .arg("testconf")
        .assert()
        .success();

    let conf = fs::read_to_string(
        dir.path()
            .join("test-environments/bundle/karma.conf.js"),
    )
    .unwrap();
    assert!(conf.contains("config.set({"));
    assert!(conf.contains("'js/main.js'"));
    assert!(dir
        .path()
        .join("test-environments/node-env/karma.conf.js")
        .exists());
}

#[test]
fn testconf_writes_a_single_named_environment() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("gantry.toml"),
        "[site]\nmain_file = \"target/main.js\"\n\n\
         [testenv.bundle]\ndir = \"envs/bundle\"\n\n\
         [testenv.npm]\ndir = \"envs/npm\"\n",
    )
    .unwrap();

    gantry_cmd()
        .current_dir(&dir)
        .args(["testconf", "bundle"])
        .assert()
        .success();

    assert!(dir.path().join("envs/bundle/karma.conf.js").exists());
    assert!(!dir.path().join("envs/npm/karma.conf.js").exists());
}

#[test]
fn testconf_rejects_an_unknown_environment() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("gantry.toml"),
        "[site]\nmain_file = \"target/main.js\"\n\n[testenv.bundle]\ndir = \"envs/bundle\"\n",
    )
    .unwrap();

    gantry_cmd()
        .current_dir(&dir)
        .args(["testconf", "browser"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Test environment 'browser' not found"));
}

#[test]
fn externs_emits_wrapper_and_externs_files() {
    let dir = TempDir::new().unwrap();
    fs::create_dir_all(dir.path().join("vendor")).unwrap();
    fs::write(
        dir.path().join("vendor/react.js"),
        "/** @jsx */\nvar React = {};\n\
         React.render = function (props) { return {onClick: props.onClick}; };\n",
    )
    .unwrap();
    fs::write(
        dir.path().join("gantry.toml"),
        "[site]\nmain_file = \"target/main.js\"\n\n\
         [externs]\n\
         namespace = \"site.react\"\n\
         global_name = \"React\"\n\
         source = \"vendor/react.js\"\n\
         wrapper_out = \"src/generated/react.cljs\"\n\
         externs_out = \"externs/react.ext.js\"\n",
    )
    .unwrap();

    gantry_cmd()
        .current_dir(&dir)
        .arg("externs")
        .assert()
        .success()
        .stderr(predicate::str::contains("Wrote wrapper"))
        .stderr(predicate::str::contains("Wrote externs"));

    let wrapper = fs::read_to_string(dir.path().join("src/generated/react.cljs")).unwrap();
    assert!(wrapper.starts_with("(ns site.react)"));
    assert!(wrapper.contains("var React = {};"));
    // The annotation was stripped from the embedded source.
    assert!(wrapper.contains("/** jsx */"));
    assert!(wrapper.contains("X.onClick = true;"));

    let externs = fs::read_to_string(dir.path().join("externs/react.ext.js")).unwrap();
    assert!(externs.contains(" * @externs"));
    assert!(externs.contains("var onClick;\n"));
    assert!(externs.contains("var render;\n"));
    assert!(externs.contains("var componentDidMount;\n"));
}

#[test]
fn externs_requires_the_config_section() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("gantry.toml"),
        "[site]\nmain_file = \"target/main.js\"\n",
    )
    .unwrap();

    gantry_cmd()
        .current_dir(&dir)
        .arg("externs")
        .assert()
        .failure()
        .stderr(predicate::str::contains("No [externs] section"));
}

#[test]
fn externs_wrapper_only_skips_the_externs_file() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("react.js"), "var React = {};\n").unwrap();
    fs::write(
        dir.path().join("gantry.toml"),
        "[site]\nmain_file = \"target/main.js\"\n\n\
         [externs]\n\
         namespace = \"site.react\"\n\
         global_name = \"React\"\n\
         source = \"react.js\"\n\
         wrapper_out = \"react.cljs\"\n",
    )
    .unwrap();

    gantry_cmd()
        .current_dir(&dir)
        .args(["externs", "--emit", "wrapper"])
        .assert()
        .success();

    assert!(dir.path().join("react.cljs").exists());

    // Asking for the unconfigured artifact by name is an error.
    gantry_cmd()
        .current_dir(&dir)
        .args(["externs", "--emit", "externs"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("externs.externs_out"));
}

#[test]
fn verbose_and_quiet_conflict() {
    let dir = TempDir::new().unwrap();

    gantry_cmd()
        .current_dir(&dir)
        .args(["check", "--verbose", "--quiet"])
        .assert()
        .failure();
}

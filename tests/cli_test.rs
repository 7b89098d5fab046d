use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

fn liveconf(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_liveconf"))
        .args(args)
        .current_dir(dir)
        .env_remove("LIVECONF_SETTINGS")
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to run liveconf")
}

#[test]
fn test_init_command() {
    let temp_dir = TempDir::new().unwrap();
    let temp_path = temp_dir.path();

    let output = liveconf(temp_path, &["init"]);
    assert!(output.status.success());

    let settings = std::fs::read_to_string(temp_path.join("liveconf.toml")).unwrap();
    assert!(settings.contains("[watch]"));
    assert!(settings.contains("cooldown_ms = 100"));

    for sample in ["background.json", "circle.json", "print.json"] {
        assert!(temp_path.join("config").join(sample).exists(), "{sample}");
    }

    // A second init without --force refuses to overwrite
    let output = liveconf(temp_path, &["init"]);
    assert!(!output.status.success());

    let output = liveconf(temp_path, &["init", "--force"]);
    assert!(output.status.success());
}

#[test]
fn test_init_writes_selected_settings_file() {
    let temp_dir = TempDir::new().unwrap();
    let temp_path = temp_dir.path();

    let output = liveconf(temp_path, &["--settings", "other.toml", "init"]);
    assert!(output.status.success());

    assert!(temp_path.join("other.toml").exists());
    assert!(!temp_path.join("liveconf.toml").exists());
}

#[test]
fn test_config_command_layers_file_and_env() {
    let temp_dir = TempDir::new().unwrap();
    let temp_path = temp_dir.path();

    std::fs::write(
        temp_path.join("liveconf.toml"),
        "[watch]\ndirectory = \"scenes\"\n",
    )
    .unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_liveconf"))
        .arg("config")
        .current_dir(temp_path)
        .env_remove("LIVECONF_SETTINGS")
        .env("LIVECONF_WATCH__COOLDOWN_MS", "250")
        .output()
        .expect("Failed to run config command");
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("directory = \"scenes\""));
    assert!(stdout.contains("cooldown_ms = 250"));
}

#[test]
fn test_check_command() {
    let temp_dir = TempDir::new().unwrap();
    let temp_path = temp_dir.path();
    assert!(liveconf(temp_path, &["init"]).status.success());

    let output = liveconf(temp_path, &["--no-color", "check", "config/circle.json"]);
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(parsed["dataType"], "circleObject");
    assert_eq!(parsed["radius"], 100.0);

    std::fs::write(temp_path.join("broken.json"), r#"{ "dataType": "circleObject" }"#).unwrap();
    let output = liveconf(temp_path, &["--no-color", "check", "broken.json"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("center"));
}

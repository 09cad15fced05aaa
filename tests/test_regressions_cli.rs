use std::fs;
use std::io::Write;
use std::path::Path;
use std::process::{Command, Stdio};

use tempfile::tempdir;

fn bin() -> &'static str {
    env!("CARGO_BIN_EXE_rule-console")
}

fn write_file(path: &Path, content: &str) {
    fs::write(path, content).expect("failed to write test file");
}

fn console() -> Command {
    let mut command = Command::new(bin());
    command.env_remove("RULE_CONSOLE_CONFIG").env_remove("RUST_LOG");
    command.args(["--color", "never"]);
    command
}

#[test]
fn test_commands_run_in_order() {
    let output = console()
        .args([
            "-c",
            "rules add pets '(OR cat dog)'",
            "-c",
            "rules view pets",
        ])
        .output()
        .expect("command should run");

    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Rule successfully added as 'pets'"), "{stdout}");
    assert!(stdout.contains("\tfilter: cat OR dog\n"), "{stdout}");
}

#[test]
fn test_script_failure_reports_line_and_stops() {
    let dir = tempdir().expect("temp dir");
    let script = dir.path().join("setup.txt");
    write_file(
        &script,
        "# rules for the demo\n\nrules add a cat\nrules nope\nrules add b dog\n",
    );

    let output = console()
        .args(["-f", script.to_str().expect("utf8 path"), "-c", "rules list"])
        .output()
        .expect("command should run");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("line 4: sorry, I don't recognize 'nope' as a command"),
        "{stderr}"
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(!stdout.contains("'b'"), "{stdout}");
}

#[test]
fn test_continue_on_error_runs_everything() {
    let output = console()
        .args([
            "--continue-on-error",
            "-c",
            "rules delete ghost",
            "-c",
            "rules add a cat",
        ])
        .output()
        .expect("command should run");

    assert!(!output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("added as 'a'"), "{stdout}");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Rule 'ghost' doesn't exist"), "{stderr}");
    assert!(stderr.contains("1 scripted command(s) failed"), "{stderr}");
}

#[test]
fn test_seed_is_synced_at_startup() {
    let dir = tempdir().expect("temp dir");
    let seed = dir.path().join("seed.json");
    write_file(
        &seed,
        r#"[{"id": "3", "value": "rust OR go", "tag": "lang"}]"#,
    );

    let output = console()
        .args([
            "--seed",
            seed.to_str().expect("utf8 path"),
            "-c",
            "rules view Rule0",
        ])
        .output()
        .expect("command should run");

    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("Pulled: Rule0\n"), "{stdout}");
    assert!(stdout.contains("\tfilter: rust OR go\n"), "{stdout}");
}

#[test]
fn test_config_cap_limits_rules() {
    let dir = tempdir().expect("temp dir");
    let config = dir.path().join("console.toml");
    write_file(&config, "rule_cap = 1\n");

    let output = console()
        .args([
            "--config",
            config.to_str().expect("utf8 path"),
            "-c",
            "rules add a cat",
            "-c",
            "rules add b dog",
        ])
        .output()
        .expect("command should run");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("line 2: rules add:"), "{stderr}");
}

#[test]
fn test_zero_rule_cap_allows_more_than_default() {
    let dir = tempdir().expect("temp dir");
    let config = dir.path().join("console.toml");
    write_file(&config, "rule_cap = 0\n");

    let mut args = vec![
        "--config".to_string(),
        config.to_str().expect("utf8 path").to_string(),
    ];
    for i in 0..30 {
        args.push("-c".to_string());
        args.push(format!("rules add r{i} term{i}"));
    }
    let output = console().args(&args).output().expect("command should run");

    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("'r29'"), "{stdout}");
}

#[test]
fn test_interactive_session_until_quit() {
    let mut child = console()
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("command should start");

    child
        .stdin
        .take()
        .expect("stdin")
        .write_all(b"bogus\nrules add a cat\nquit\n")
        .expect("write stdin");

    let output = child.wait_with_output().expect("command should finish");
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with(">>>>>>>> "), "{stdout}");
    assert!(stdout.contains("added as 'a'"), "{stdout}");
    assert!(stdout.ends_with("Bye\n"), "{stdout}");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("error: sorry, I don't recognize 'bogus'"), "{stderr}");
}

#[test]
fn test_missing_config_file_fails() {
    let output = console()
        .args(["--config", "/nonexistent/console.toml", "-c", "rules list"])
        .output()
        .expect("command should run");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Failed to read config file"), "{stderr}");
}

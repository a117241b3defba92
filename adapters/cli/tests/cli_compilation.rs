use std::process::Command;

#[test]
fn cli_compiles_without_warnings() {
    let status = Command::new(env!("CARGO"))
        .current_dir(env!("CARGO_MANIFEST_DIR"))
        .args(["check", "--quiet", "--bin", "grid-sketch"])
        .status()
        .expect("failed to invoke cargo check for grid-sketch CLI binary");

    assert!(status.success(), "cargo check --bin grid-sketch should succeed");
}

#[test]
fn headless_run_prints_the_first_sketch() {
    let output = Command::new(env!("CARGO_BIN_EXE_grid-sketch"))
        .args(["--headless", "--mode", "chaser", "--seed", "3"])
        .output()
        .expect("failed to run grid-sketch");

    assert!(output.status.success(), "headless run should succeed");
    let stdout = String::from_utf8(output.stdout).expect("utf-8 output");
    assert!(stdout.starts_with("Chaser\n"), "{stdout}");
    assert_eq!(stdout.matches('@').count(), 1);
    assert_eq!(stdout.matches('C').count(), 2, "caption and chaser glyph");
}

#[test]
fn invalid_config_is_reported() {
    let output = Command::new(env!("CARGO_BIN_EXE_grid-sketch"))
        .args(["--headless", "--config", "/nonexistent/sketch.toml"])
        .output()
        .expect("failed to run grid-sketch");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("failed to read sketch config"), "{stderr}");
}

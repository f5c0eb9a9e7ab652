use std::process::Command;

#[test]
fn missing_host_prints_usage_error_and_fails() {
    let home = tempfile::TempDir::new().unwrap();
    let output = Command::new(env!("CARGO_BIN_EXE_isg-api"))
        .env("HOME", home.path())
        .env("XDG_CONFIG_HOME", home.path())
        .env_remove("ISG_DEVICE__HOST")
        .output()
        .expect("run isg-api");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_eq!(
        stderr.trim_end(),
        "ERROR: Please provide ISG IP as first command-line argument"
    );
}

//! Process exit behaviour of the command-line binary.

use std::process::Command;

fn taxii_client(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_taxii-client"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("binary should start")
}

#[test]
fn test_lone_username_exits_nonzero_with_message_on_stdout() {
    let output = taxii_client(&["discovery", "--username", "u", "--no-system-proxy"]);

    assert_eq!(output.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("'username' and 'password' are required to appear together"),
        "stdout was: {stdout}"
    );
}

#[test]
fn test_unsupported_proxy_exits_before_any_request() {
    let output = taxii_client(&["discovery", "--proxy", "ftp://127.0.0.1:1", "--no-system-proxy"]);

    assert_eq!(output.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("unsupported proxy scheme 'ftp'"), "stdout was: {stdout}");
    assert!(!stdout.contains("Request:"));
}

use husk_util::process::ExternalCommand;

#[test]
fn test_output_captures_stdout() {
    let output = ExternalCommand::new("echo").arg("hello").output().unwrap();
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "hello");
}

#[test]
fn test_run_returns_trimmed_stdout() {
    let out = ExternalCommand::new("echo").args(["one", "two"]).run().unwrap();
    assert_eq!(out, "one two");
}

#[cfg(unix)]
#[test]
fn test_run_reports_stderr_on_failure() {
    let err = ExternalCommand::new("sh")
        .args(["-c", "echo nope >&2; exit 3"])
        .run()
        .unwrap_err();
    let text = err.to_string();
    assert!(text.contains("nope"), "got: {text}");
    assert!(text.contains("sh -c"), "got: {text}");
}

#[cfg(unix)]
#[test]
fn test_in_dir() {
    let tmp = tempfile::TempDir::new().unwrap();
    std::fs::write(tmp.path().join("marker"), "ok").unwrap();
    let out = ExternalCommand::new("ls").in_dir(tmp.path()).run().unwrap();
    assert_eq!(out, "marker");
}

#[test]
fn test_command_line() {
    let cmd = ExternalCommand::new("git").args(["rev-parse", "--verify", "HEAD"]);
    assert_eq!(cmd.command_line(), "git rev-parse --verify HEAD");
}

#[test]
fn test_missing_program() {
    assert!(ExternalCommand::new("husk-no-such-program").run().is_err());
}

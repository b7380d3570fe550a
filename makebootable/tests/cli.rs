use std::io::Write;
use std::process::{Command, Output};

fn makebootable(args: &[&std::ffi::OsStr]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_makebootable"))
        .args(args)
        .output()
        .expect("Failed to run makebootable")
}

#[test]
fn test_missing_argument_prints_usage() {
    let output = makebootable(&[]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout.contains("Usage: "), "stdout was {stdout:?}");
    assert!(stdout.contains("<partition>"));
    assert!(stdout.contains("/dev/hdaX"));
}

#[test]
fn test_nonexistent_partition() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("hdaX");

    let output = makebootable(&[missing.as_os_str()]);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr.contains("Failed to open partition"), "stderr was {stderr:?}");
    assert!(stderr.contains(&*missing.to_string_lossy()));
    assert!(output.stdout.is_empty());
    assert!(!missing.exists());
}

#[cfg(target_os = "linux")]
#[test]
fn test_regular_file_has_no_geometry() {
    let mut image = tempfile::NamedTempFile::new().unwrap();
    let sector = [0x5Au8; 512];
    image.write_all(&sector).unwrap();
    image.flush().unwrap();

    let output = makebootable(&[image.path().as_os_str()]);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr.contains("Failed to get device geometry"), "stderr was {stderr:?}");
    assert!(output.stdout.is_empty());
    assert_eq!(std::fs::read(image.path()).unwrap(), sector);
}

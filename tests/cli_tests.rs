use std::fs;
use std::process::Command;

fn impl_tradeoffs() -> Command {
    Command::new(env!("CARGO_BIN_EXE_impl-tradeoffs"))
}

#[test]
fn renders_svg_to_the_given_path() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("impl-tradeoffs.svg");

    let output = impl_tradeoffs().arg(&path).output().expect("run binary");

    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let svg = fs::read_to_string(&path).expect("svg written");
    assert!(svg.contains("Performance tradeoffs for WebAssembly implementations"));
}

#[test]
fn missing_argument_is_a_usage_error_with_no_output() {
    let dir = tempfile::tempdir().expect("temp dir");

    let output = impl_tradeoffs()
        .current_dir(dir.path())
        .output()
        .expect("run binary");

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("missing output path"));
    assert!(stderr.contains("usage: impl-tradeoffs <OUTPUT>"));
    assert_eq!(fs::read_dir(dir.path()).expect("list dir").count(), 0);
}

#[test]
fn trailing_arguments_do_not_stop_the_render() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("chart.svg");

    let output = impl_tradeoffs()
        .arg(&path)
        .arg("extra")
        .output()
        .expect("run binary");

    assert_eq!(output.status.code(), Some(0));
    assert!(path.exists());
}

#[test]
fn unwritable_destination_exits_non_zero() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("missing").join("chart.svg");

    let output = impl_tradeoffs().arg(&path).output().expect("run binary");

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("failed to write"));
    assert!(!path.exists());
}

#[test]
fn unsupported_extension_reports_the_format() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("chart.tiff");

    let output = impl_tradeoffs().arg(&path).output().expect("run binary");

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("unsupported output format `tiff`"));
}

#[test]
fn help_prints_usage_and_succeeds() {
    let output = impl_tradeoffs().arg("--help").output().expect("run binary");

    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).starts_with("usage: impl-tradeoffs"));
}

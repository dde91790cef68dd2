use std::fs;
use std::process::Command;

use tempfile::tempdir;

fn binary() -> Command {
    Command::new(env!("CARGO_BIN_EXE_candle-features"))
}

#[test]
fn cli_transforms_dataset_in_place_directory() {
    let temp_dir = tempdir().expect("temp dir");
    let input = temp_dir.path().join("gbpusd_m15.csv");
    fs::write(
        &input,
        "Open,High,Low,Close\n1,5,1,3\n3,6,2,2\n2,4,1,5\n",
    )
    .expect("write sample");

    let output = binary()
        .arg(&input)
        .env("RUST_LOG", "info")
        .output()
        .expect("failed to spawn candle-features");
    assert!(output.status.success(), "exited with {:?}", output.status);

    let transformed = temp_dir.path().join("gbpusd_m15_transformed.csv");
    let text = fs::read_to_string(&transformed).expect("transformed CSV");
    assert!(text.starts_with(
        "Open,High,Low,Close,CandleType,HigherHigh,LowerLow,ExcessHigh,ExcessLow,Pivot,PivotType"
    ));
}

#[test]
fn rerun_on_output_reports_skips_on_stdout() {
    let temp_dir = tempdir().expect("temp dir");
    let input = temp_dir.path().join("prices.csv");
    fs::write(&input, "Open,High,Low,Close\n1,5,1,3\n3,6,2,2\n").expect("write sample");

    let first = binary().arg(&input).output().expect("first run");
    assert!(first.status.success());

    let second = binary()
        .arg(temp_dir.path().join("prices_transformed.csv"))
        .env("RUST_LOG", "info")
        .output()
        .expect("second run");
    assert!(second.status.success());
    let stdout = String::from_utf8_lossy(&second.stdout);
    assert!(
        stdout.contains("already exist in dataset"),
        "expected skip notice, got: {stdout}"
    );
}

#[test]
fn missing_dataset_exits_non_zero() {
    let temp_dir = tempdir().expect("temp dir");
    let output = binary()
        .arg(temp_dir.path().join("nope.csv"))
        .output()
        .expect("failed to spawn candle-features");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("nope.csv"), "stderr: {stderr}");
}

#[test]
fn missing_price_column_exits_non_zero() {
    let temp_dir = tempdir().expect("temp dir");
    let input = temp_dir.path().join("no_low.csv");
    fs::write(&input, "Open,High,Close\n1,5,3\n").expect("write sample");

    let output = binary().arg(&input).output().expect("spawn");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("\"Low\""), "stderr: {stderr}");
    assert!(!temp_dir.path().join("no_low_transformed.csv").exists());
}

#[test]
fn dataset_argument_is_required() {
    let output = binary().output().expect("spawn");
    assert!(!output.status.success());
}

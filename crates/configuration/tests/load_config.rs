use configuration::{OutputFormat, load_config_from};
use std::io::Write;

fn write_config(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".toml")
        .tempfile()
        .expect("temp file");
    file.write_all(contents.as_bytes()).expect("write config");
    file
}

#[test]
fn partial_file_keeps_defaults_for_missing_keys() {
    let file = write_config(
        r#"
[data]
path = "bookings.csv"

[report]
format = "json"
"#,
    );

    let config = load_config_from(file.path()).unwrap();
    assert_eq!(config.data.path.to_str(), Some("bookings.csv"));
    assert_eq!(config.data.preview_rows, 5);
    assert_eq!(config.report.format, OutputFormat::Json);
    assert_eq!(config.report.histogram_bins, 20);
    assert_eq!(config.elasticity.curve_samples, 100);
}

#[test]
fn invalid_values_fail_validation() {
    let file = write_config(
        r#"
[report]
histogram_bins = 0
"#,
    );

    let err = load_config_from(file.path()).unwrap_err();
    assert!(err.to_string().contains("histogram_bins"));
}

#[test]
fn missing_explicit_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    assert!(load_config_from(&dir.path().join("absent.toml")).is_err());
}

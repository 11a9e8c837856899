use crate::config::{ConfigError, ReplayConfig};
use crate::replay::DisplayMode;
use pretty_assertions::assert_eq;
use std::io::Write;
use std::time::Duration;

#[test]
fn empty_file_yields_defaults() {
    let cfg: ReplayConfig = "".parse().unwrap();
    assert_eq!(cfg, ReplayConfig::default());
    assert_eq!(cfg.lines_per_second, 10.0);
    assert_eq!(cfg.read_chunk_bytes, 1024 * 1024);
    assert_eq!(cfg.history_capacity, 1 << 20);
    assert_eq!(cfg.display, DisplayMode::Stats);
}

#[test]
fn keys_override_defaults() {
    let cfg: ReplayConfig = r#"
        lines_per_second = 2500.0
        display = "widget"
        read_chunk_bytes = 4096
        stats_window_ms = 2000
        flush_interval_ms = 250
    "#
    .parse()
    .unwrap();

    assert_eq!(cfg.lines_per_second, 2500.0);
    assert_eq!(cfg.display, DisplayMode::Widget);
    assert_eq!(cfg.read_chunk_bytes, 4096);
    assert_eq!(cfg.flush_interval(), Duration::from_millis(250));
    assert_eq!(cfg.display_timing().stats_window, Duration::from_secs(2));
    assert_eq!(cfg.display_timing().widget_tick, Duration::from_millis(30));
}

#[test]
fn non_positive_rate_is_accepted_for_later_clamping() {
    let cfg: ReplayConfig = "lines_per_second = -5.0".parse().unwrap();
    assert_eq!(cfg.lines_per_second, -5.0);
}

#[test]
fn zero_sizes_are_rejected() {
    let err = "history_capacity = 0".parse::<ReplayConfig>().unwrap_err();
    assert!(
        matches!(
            err,
            ConfigError::Invalid {
                field: "history_capacity",
                ..
            }
        ),
        "{err}"
    );

    let err = "stats_tick_ms = 0".parse::<ReplayConfig>().unwrap_err();
    assert!(matches!(err, ConfigError::Invalid { field: "stats_tick_ms", .. }));
}

#[test]
fn unknown_keys_are_parse_errors() {
    let err = "lines_per_minute = 3".parse::<ReplayConfig>().unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }), "{err}");
}

#[test]
fn loads_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "lines_per_second = 42.0").unwrap();

    let cfg = ReplayConfig::from_file(file.path()).unwrap();
    assert_eq!(cfg.lines_per_second, 42.0);
}

#[test]
fn missing_file_reports_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nope.toml");

    let err = ReplayConfig::from_file(&path).unwrap_err();
    assert!(matches!(err, ConfigError::ReadFile { .. }));
    assert!(err.to_string().contains("nope.toml"));
}

use bps_kernel::config::{ConfigError, load_config_with_prefix};
use bps_kernel::domain::config::ApiConfig;
use std::fs;
use std::path::PathBuf;
use tempfile::tempdir;

const UNUSED_PREFIX: &str = "BPS_KERNEL_TEST_UNUSED";

#[test]
fn loads_toml_without_extension() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    fs::write(
        dir.path().join("server.toml"),
        r#"
[server]
port = 8081

[data]
declarations = "/srv/bps/declarations.json"

[quote]
minimum_total = 75.5
"#,
    )?;

    let cfg: ApiConfig = load_config_with_prefix(Some(dir.path().join("server")), UNUSED_PREFIX)?;

    assert_eq!(cfg.server.port, 8081);
    assert_eq!(cfg.data.declarations, PathBuf::from("/srv/bps/declarations.json"));
    assert_eq!(cfg.data.simulation, Some(PathBuf::from("data/simulation.json")));
    assert!((cfg.quote.minimum_total - 75.5).abs() < f64::EPSILON);
    Ok(())
}

#[test]
fn missing_file_is_reported_with_context() {
    let dir = tempdir().expect("tempdir");
    let err = load_config_with_prefix::<ApiConfig>(Some(dir.path().join("absent")), UNUSED_PREFIX)
        .expect_err("file does not exist");

    assert!(matches!(err, ConfigError::Config { context: Some(_), .. }));
    assert!(err.to_string().contains("Failed to build config"));
}

#[test]
fn mistyped_values_fail_deserialization() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let file = dir.path().join("broken.toml");
    fs::write(&file, "[server]\nport = \"not-a-port\"\n")?;

    let err = load_config_with_prefix::<ApiConfig>(Some(&file), UNUSED_PREFIX)
        .expect_err("port must be numeric");
    assert!(err.to_string().contains("Failed to deserialize config"));
    Ok(())
}

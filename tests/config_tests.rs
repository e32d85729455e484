//! Configuration loading from files

use pago::prelude::*;
use std::io::Write;
use tempfile::NamedTempFile;

fn write_config(yaml: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp file");
    file.write_all(yaml.as_bytes()).expect("write config");
    file
}

#[test]
fn test_load_full_config_file() {
    let file = write_config(
        r#"
bind: "0.0.0.0:8080"
origin: "https://pagos.example.mx"
qr:
  size: 320
  quiet_zone: false
theme:
  garage_stylesheet: "/static/garage.css"
"#,
    );

    let config = AppConfig::from_yaml_file(file.path().to_str().unwrap()).unwrap();
    assert_eq!(config.bind, "0.0.0.0:8080");
    assert_eq!(config.origin, "https://pagos.example.mx");
    assert_eq!(config.qr.size, 320);
    assert!(!config.qr.quiet_zone);
    assert_eq!(config.theme.garage_stylesheet, "/static/garage.css");
}

#[test]
fn test_shipped_sample_config_is_valid() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/config/pago.yaml");
    let config = AppConfig::from_yaml_file(path).unwrap();
    assert_eq!(config.qr.size, 200);
}

#[test]
fn test_empty_file_uses_defaults() {
    let file = write_config("{}\n");
    let config = AppConfig::from_yaml_file(file.path().to_str().unwrap()).unwrap();
    assert_eq!(config, AppConfig::default());
}

#[test]
fn test_parse_error_names_the_file() {
    let file = write_config("qr: [1, 2\n");
    let path = file.path().to_str().unwrap().to_string();

    let err = AppConfig::from_yaml_file(&path).unwrap_err();
    let config_err = err.downcast_ref::<ConfigError>().expect("config error");
    assert!(matches!(config_err, ConfigError::ParseError { file: Some(f), .. } if *f == path));
    assert!(err.to_string().contains(&path));
}

#[test]
fn test_invalid_value_is_reported_by_key() {
    let file = write_config("origin: \"mailto:pagos@example.mx\"\n");

    let err = AppConfig::from_yaml_file(file.path().to_str().unwrap()).unwrap_err();
    match err.downcast_ref::<ConfigError>() {
        Some(ConfigError::InvalidValue { key, .. }) => assert_eq!(key, "origin"),
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn test_missing_file_is_an_error() {
    assert!(AppConfig::from_yaml_file("/definitely/not/here.yaml").is_err());
}

#[test]
fn test_config_drives_generated_links() {
    let file = write_config("origin: \"https://cobros.example.mx/\"\nqr:\n  size: 300\n");
    let config = AppConfig::from_yaml_file(file.path().to_str().unwrap()).unwrap();

    let link = encode_link(&PaymentForm::example().into_record(), &config.origin);
    assert!(link.url.starts_with("https://cobros.example.mx/qr?q="));

    let qr = QrImage::new(&link.url, &config.qr).unwrap();
    let png = image::load_from_memory(&qr.png().unwrap()).unwrap();
    assert!(png.width() >= 300);
}

use gcodethumb_render::{Category, Color};
use gcodethumb_settings::{SettingsError, ThumbnailConfig};
use tempfile::TempDir;

fn custom_config() -> ThumbnailConfig {
    let mut config = ThumbnailConfig {
        width: 320,
        height: 240,
        ..ThumbnailConfig::default()
    };
    config.colors = config
        .colors
        .with(Category::G0, Color::rgba(0, 0, 255, 128));
    config
}

#[test]
fn test_toml_roundtrip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("thumb.toml");
    let config = custom_config();
    config.save_to_file(&path).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.contains("G0 = \"#0000ff80\""));
    assert_eq!(ThumbnailConfig::load_from_file(&path).unwrap(), config);
}

#[test]
fn test_json_roundtrip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("thumb.json");
    let config = custom_config();
    config.save_to_file(&path).unwrap();
    assert_eq!(ThumbnailConfig::load_from_file(&path).unwrap(), config);
}

#[test]
fn test_load_or_default_missing_file() {
    let dir = TempDir::new().unwrap();
    let config = ThumbnailConfig::load_or_default(&dir.path().join("absent.toml")).unwrap();
    assert_eq!(config, ThumbnailConfig::default());
}

#[test]
fn test_load_rejects_invalid_values() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bad.toml");
    std::fs::write(&path, "width = 0\n").unwrap();
    assert!(matches!(
        ThumbnailConfig::load_from_file(&path),
        Err(SettingsError::InvalidSetting { .. })
    ));

    std::fs::write(&path, "[colors]\nG1 = \"not-a-color\"\n").unwrap();
    assert!(matches!(
        ThumbnailConfig::load_from_file(&path),
        Err(SettingsError::TomlError(_))
    ));
}

#[test]
fn test_save_rejects_unknown_extension() {
    let dir = TempDir::new().unwrap();
    let err = ThumbnailConfig::default()
        .save_to_file(&dir.path().join("thumb.ini"))
        .unwrap_err();
    assert!(matches!(err, SettingsError::UnsupportedFormat(_)));
}

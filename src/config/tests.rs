use super::*;
use crate::app_dirs::ConfigBaseGuard;
use std::path::PathBuf;
use tempfile::tempdir;

#[test]
fn defaults_match_original_file_names() {
    let cfg = AppConfig::default();
    assert_eq!(cfg.paths.file_ledger, PathBuf::from("image_quality_ratings.csv"));
    assert_eq!(cfg.paths.generated_ledger, PathBuf::from("image_ratings.csv"));
    assert_eq!(cfg.paths.manifest, PathBuf::from("generated_images.csv"));
    assert_eq!(cfg.paths.output_dir, PathBuf::from("generated_images"));
    assert_eq!(cfg.generation.model_id, "stabilityai/sdxl-turbo");
    assert_eq!(cfg.generation.device, "cpu");
    assert_eq!(cfg.generation.prompts.len(), 3);
    assert_eq!(cfg.display.max_image_side, 400);
}

#[test]
fn missing_file_loads_defaults() {
    let dir = tempdir().unwrap();
    let cfg = load_from(&dir.path().join("config.toml")).unwrap();
    assert_eq!(cfg, AppConfig::default());
}

#[test]
fn saves_and_reloads_toml() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nested").join("config.toml");
    let mut cfg = AppConfig::default();
    cfg.paths.generated_ledger = PathBuf::from("/data/ratings.csv");
    cfg.generation.prompts = vec!["a red fox".into()];
    save_to_path(&cfg, &path).unwrap();
    assert_eq!(load_from(&path).unwrap(), cfg);
}

#[test]
fn partial_file_fills_in_defaults() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        "[generation]\ndevice = \"cuda\"\n\n[display]\nmax_image_side = 2\n",
    )
    .unwrap();
    let cfg = load_from(&path).unwrap();
    assert_eq!(cfg.generation.device, "cuda");
    assert_eq!(cfg.generation.model_id, "stabilityai/sdxl-turbo");
    assert_eq!(cfg.paths, PathSettings::default());
    assert_eq!(cfg.display.max_image_side, 16);
}

#[test]
fn malformed_file_is_an_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[paths\nfile_ledger = 3").unwrap();
    assert!(matches!(
        load_from(&path),
        Err(ConfigError::ParseToml { .. })
    ));
}

#[test]
fn default_location_lives_under_app_dir() {
    let dir = tempdir().unwrap();
    let _guard = ConfigBaseGuard::set(dir.path().to_path_buf());
    let path = config_path().unwrap();
    assert_eq!(
        path,
        dir.path()
            .join(crate::app_dirs::APP_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    );
    let mut cfg = AppConfig::default();
    cfg.display.window_width = 640.0;
    save(&cfg).unwrap();
    assert_eq!(load_or_default().unwrap(), cfg);
}

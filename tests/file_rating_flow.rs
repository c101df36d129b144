mod support;

use imgrate::config::{self, AppConfig};
use imgrate::egui_app::controller::RatingController;
use imgrate::rating::ledger::{self, FILE_COLUMNS};
use imgrate::rating::SessionMode;
use support::{images::write_test_png, imgrate_env::ImgrateEnvGuard};

#[test]
fn cyclic_rating_appends_one_row_per_save() {
    let temp = tempfile::tempdir().expect("create tempdir");
    let a = temp.path().join("a.png");
    let b = temp.path().join("b.png");
    write_test_png(&a, 10, 10);
    write_test_png(&b, 10, 20);
    let mut config = AppConfig::default();
    config.paths.file_ledger = temp.path().join("image_quality_ratings.csv");
    let mut controller = RatingController::new(SessionMode::Files, &config);
    controller.load_files(vec![a.clone(), b.clone()]);

    controller.ui.quality_input = " 8 ".into();
    controller.save();
    controller.next();
    controller.save();
    // Files mode never gates advancing, and wraps back to the first image.
    controller.ui.quality_input = "not a number".into();
    controller.next();
    assert_eq!(controller.session().current().unwrap().image_path, a);
    assert!(controller.take_notice().is_none());

    let rows = ledger::read_rows(&config.paths.file_ledger).unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].image_path, a.to_string_lossy());
    assert_eq!(rows[1].image_path, b.to_string_lossy());
    assert!(rows.iter().all(|row| row.quality == "8" && row.prompt.is_none()));

    let text = std::fs::read_to_string(&config.paths.file_ledger).unwrap();
    assert_eq!(text.lines().next().unwrap(), FILE_COLUMNS.join(","));
    assert_eq!(text.lines().count(), 3);
}

#[test]
fn config_round_trips_through_config_home() {
    let temp = tempfile::tempdir().expect("create tempdir");
    let _guard = ImgrateEnvGuard::set_config_home(temp.path().to_path_buf());
    let mut cfg = config::load_or_default().expect("defaults");
    assert_eq!(cfg, AppConfig::default());

    cfg.generation.prompts = vec!["a red fox".into()];
    cfg.display.max_image_side = 320;
    config::save(&cfg).expect("save config");
    assert!(config::config_path().unwrap().starts_with(temp.path()));

    let loaded = config::load_or_default().expect("reload");
    assert_eq!(loaded, cfg);
}

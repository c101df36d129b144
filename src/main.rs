//! Generate the configured prompt batch, then rate the results.
#![cfg_attr(
    all(not(debug_assertions), target_os = "windows"),
    windows_subsystem = "windows"
)]
use imgrate::config;
use imgrate::egui_app::launch;
use imgrate::generation::{Generator, HttpDiffusionBackend};
use imgrate::logging;
use imgrate::rating::SessionMode;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    if let Err(err) = logging::init() {
        eprintln!("Logging disabled: {err}");
    }

    let mut skip_generation = false;
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--skip-generation" => skip_generation = true,
            "--help" | "-h" => {
                print_help();
                return Ok(());
            }
            other => tracing::warn!("Ignoring unknown argument {other}"),
        }
    }

    let config = config::load_or_default()?;
    if skip_generation && config.paths.manifest.exists() {
        tracing::info!(
            "Reusing existing manifest {}",
            config.paths.manifest.display()
        );
    } else {
        let settings = &config.generation;
        let backend =
            HttpDiffusionBackend::new(&settings.endpoint, &settings.model_id, &settings.device);
        tracing::info!(
            "Generating {} images with {} on {}",
            settings.prompts.len(),
            settings.model_id,
            settings.device
        );
        Generator::new(backend, &config.paths.output_dir, &config.paths.manifest)
            .generate(settings.prompts.as_slice())?;
    }

    launch::run(SessionMode::Generated, config)?;
    Ok(())
}

fn print_help() {
    println!("Usage: imgrate [--skip-generation]");
}

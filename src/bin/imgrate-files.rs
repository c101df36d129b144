//! Rate arbitrary image files picked from disk.
use imgrate::config;
use imgrate::egui_app::launch;
use imgrate::logging;
use imgrate::rating::SessionMode;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    if let Err(err) = logging::init() {
        eprintln!("Logging disabled: {err}");
    }
    let config = config::load_or_default()?;
    tracing::info!(
        "Ratings will be appended to {}",
        config.paths.file_ledger.display()
    );
    launch::run(SessionMode::Files, config)?;
    Ok(())
}

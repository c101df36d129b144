//! Manual image quality rating with CSV ledgers.
//!
//! The `rating` and `generation` modules are headless and carry all of the
//! behavior; `egui_app` only renders their state and forwards button presses.
/// Per-user application directories.
pub mod app_dirs;
/// TOML configuration.
pub mod config;
/// Image decoding and fit-to-box scaling for display.
pub mod display;
/// egui front end.
pub mod egui_app;
/// Batch text-to-image generation and manifests.
pub mod generation;
mod http_client;
/// Tracing subscriber setup.
pub mod logging;
/// Navigation, validation, ledger and session commands.
pub mod rating;

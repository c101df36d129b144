//! egui front end for the rating windows.
pub mod controller;
pub mod launch;
pub mod state;
pub mod ui;

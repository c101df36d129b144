use std::path::PathBuf;

pub(super) const MIN_IMAGE_SIDE: u32 = 16;
pub(super) const MAX_IMAGE_SIDE: u32 = 4096;

pub(super) fn clamp_image_side(value: u32) -> u32 {
    value.clamp(MIN_IMAGE_SIDE, MAX_IMAGE_SIDE)
}

pub(super) fn default_file_ledger() -> PathBuf {
    PathBuf::from("image_quality_ratings.csv")
}

pub(super) fn default_generated_ledger() -> PathBuf {
    PathBuf::from("image_ratings.csv")
}

pub(super) fn default_manifest() -> PathBuf {
    PathBuf::from("generated_images.csv")
}

pub(super) fn default_output_dir() -> PathBuf {
    PathBuf::from("generated_images")
}

pub(super) fn default_model_id() -> String {
    "stabilityai/sdxl-turbo".into()
}

pub(super) fn default_device() -> String {
    "cpu".into()
}

pub(super) fn default_endpoint() -> String {
    "http://127.0.0.1:7860/generate".into()
}

pub(super) fn default_prompts() -> Vec<String> {
    vec![
        "A gothic cathedral illuminated by moonlight.".into(),
        "A crystal-clear river running through a tropical jungle.".into(),
        "A futuristic city with glowing skyscrapers surrounded by greenery.".into(),
    ]
}

pub(super) fn default_max_image_side() -> u32 {
    400
}

pub(super) fn default_window_side() -> f32 {
    500.0
}

use std::path::PathBuf;

use imgrate::config;
use imgrate::generation::{Generator, HttpDiffusionBackend};
use imgrate::logging;

fn main() {
    if let Err(err) = logging::init() {
        eprintln!("Logging disabled: {err}");
    }
    let mut cfg = match config::load_or_default() {
        Ok(cfg) => cfg,
        Err(err) => {
            eprintln!("Failed to load config: {err}");
            std::process::exit(1);
        }
    };
    let mut prompts = Vec::new();
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--prompt" => {
                if let Some(value) = args.next() {
                    prompts.push(value);
                }
            }
            "--output-dir" => {
                if let Some(value) = args.next() {
                    cfg.paths.output_dir = PathBuf::from(value);
                }
            }
            "--manifest" => {
                if let Some(value) = args.next() {
                    cfg.paths.manifest = PathBuf::from(value);
                }
            }
            "--endpoint" => {
                if let Some(value) = args.next() {
                    cfg.generation.endpoint = value;
                }
            }
            "--help" | "-h" => {
                print_help();
                return;
            }
            _ => {}
        }
    }
    if prompts.is_empty() {
        prompts = cfg.generation.prompts.clone();
    }

    let backend = HttpDiffusionBackend::new(
        &cfg.generation.endpoint,
        &cfg.generation.model_id,
        &cfg.generation.device,
    );
    let mut generator = Generator::new(backend, &cfg.paths.output_dir, &cfg.paths.manifest);
    match generator.generate(prompts.as_slice()) {
        Ok(entries) => {
            println!(
                "Generated {} images; manifest at {}",
                entries.len(),
                cfg.paths.manifest.display()
            );
        }
        Err(err) => {
            eprintln!("Generation failed: {err}");
            std::process::exit(1);
        }
    }
}

fn print_help() {
    println!(
        "Usage: imgrate-generate [--prompt <text>]... [--output-dir <path>] [--manifest <path>] [--endpoint <url>]"
    );
}

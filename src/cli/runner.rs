use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use thumbkit::api::{
    delete_with_thumbnails, process_directory_to_path, regenerate_thumbnails, save_with_thumbnails,
};
use thumbkit::ThumbnailConfig;

use super::args::CliArgs;
use super::errors::AppError;

enum Mode {
    Single(PathBuf),
    Batch(PathBuf),
    Delete(String),
    Regenerate(String),
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// File config first, then flags on top.
fn build_config(args: &CliArgs) -> Result<ThumbnailConfig, AppError> {
    let mut config = match &args.config {
        Some(path) => ThumbnailConfig::from_json_file(path)?,
        None => ThumbnailConfig::default(),
    };
    if !args.sizes.is_empty() {
        config.sizes = args.sizes.clone();
    }
    if let Some(quality) = args.quality {
        config.options.quality = quality;
    }
    if let Some(filter) = args.filter {
        config.options.filter = filter;
    }
    if args.no_upscale {
        config.options.upscale = false;
    }
    if let Some(base_url) = &args.base_url {
        config.base_url = base_url.clone();
    }
    config.validate()?;
    Ok(config)
}

fn select_mode(args: &CliArgs) -> Result<Mode, AppError> {
    let mut modes = Vec::new();
    if let Some(input) = &args.input {
        modes.push(("--input", Mode::Single(input.clone())));
    }
    if let Some(dir) = &args.input_dir {
        modes.push(("--input-dir", Mode::Batch(dir.clone())));
    }
    if let Some(name) = &args.delete {
        modes.push(("--delete", Mode::Delete(name.clone())));
    }
    if let Some(name) = &args.regenerate {
        modes.push(("--regenerate", Mode::Regenerate(name.clone())));
    }

    if modes.len() > 1 {
        return Err(AppError::ConflictingArguments {
            first: modes[0].0.to_string(),
            second: modes[1].0.to_string(),
        });
    }
    modes
        .pop()
        .map(|(_, mode)| mode)
        .ok_or(AppError::MissingArgument {
            arg: "--input, --input-dir, --delete or --regenerate".to_string(),
        })
}

fn print_json<T: Serialize>(value: &T) -> Result<(), AppError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn run_single(input: &Path, output_dir: &Path, config: &ThumbnailConfig, json: bool) -> Result<(), AppError> {
    if config.sizes.is_empty() {
        return Err(AppError::NoSizes);
    }
    let saved = save_with_thumbnails(input, output_dir, config)?;
    info!("Successfully processed: {:?} -> {}", input, saved.original);
    if json {
        print_json(&saved)?;
    } else {
        println!("{}", saved.original);
        for thumb in &saved.thumbnails {
            println!("{}", thumb);
        }
    }
    Ok(())
}

pub fn run(args: CliArgs) -> Result<(), AppError> {
    if args.log {
        init_logging();
    }

    let config = build_config(&args)?;
    let mode = select_mode(&args)?;
    let output_dir = args.output_dir.clone().ok_or(AppError::MissingArgument {
        arg: "--output-dir".to_string(),
    })?;

    match mode {
        Mode::Single(input) => run_single(&input, &output_dir, &config, args.json)?,
        Mode::Batch(input_dir) => {
            if config.sizes.is_empty() {
                return Err(AppError::NoSizes);
            }
            info!("Starting batch processing from directory: {:?}", input_dir);
            info!("Output directory: {:?}", output_dir);

            let report =
                process_directory_to_path(&input_dir, &output_dir, &config, args.continue_on_error)?;

            info!("Batch processing complete!");
            info!("Processed: {}", report.processed);
            info!("Skipped: {}", report.skipped);
            info!("Errors: {}", report.errors);
            if args.json {
                print_json(&report)?;
            }
            if report.errors > 0 {
                return Err(AppError::BatchFailed {
                    errors: report.errors,
                });
            }
        }
        Mode::Delete(name) => {
            delete_with_thumbnails(&name, &output_dir, &config)?;
            if args.json {
                print_json(&serde_json::json!({ "deleted": name }))?;
            }
        }
        Mode::Regenerate(name) => {
            let written = regenerate_thumbnails(&name, &output_dir, &config)?;
            if args.json {
                print_json(&written)?;
            } else {
                for thumb in &written {
                    println!("{}", thumb);
                }
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use thumbkit::{ResizeFilter, TargetSize};

    fn parse(argv: &[&str]) -> CliArgs {
        CliArgs::try_parse_from(std::iter::once("thumbkit").chain(argv.iter().copied())).unwrap()
    }

    #[test]
    fn flags_override_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("thumbs.json");
        std::fs::write(
            &path,
            r#"{
                "sizes": ["125x125", "300x200"],
                "options": { "quality": 40, "filter": "bilinear", "upscale": true },
                "base_url": "/static/"
            }"#,
        )
        .unwrap();
        let path = path.to_str().unwrap();

        let from_file = build_config(&parse(&["--config", path])).unwrap();
        assert_eq!(from_file.options.quality, 40);
        assert_eq!(from_file.base_url, "/static/");

        let args = parse(&[
            "--config", path, "--size", "64x48", "--quality", "90", "--no-upscale",
        ]);
        let config = build_config(&args).unwrap();
        assert_eq!(config.sizes, vec![TargetSize::new(64, 48).unwrap()]);
        assert_eq!(config.options.quality, 90);
        assert!(!config.options.upscale);
        assert_eq!(config.options.filter, ResizeFilter::Bilinear);
        assert_eq!(config.base_url, "/static/");
    }

    #[test]
    fn out_of_range_quality_is_rejected_by_the_parser() {
        let argv = ["thumbkit", "--input", "a.png", "--quality", "0"];
        assert!(CliArgs::try_parse_from(argv).is_err());
    }

    #[test]
    fn two_modes_conflict() {
        let args = parse(&["--input", "a.png", "--delete", "a.png"]);
        let err = select_mode(&args).err().unwrap();
        assert!(matches!(
            err,
            AppError::ConflictingArguments { ref first, ref second }
                if first == "--input" && second == "--delete"
        ));
    }

    #[test]
    fn a_mode_is_required() {
        let args = parse(&["--output-dir", "out"]);
        assert!(matches!(select_mode(&args), Err(AppError::MissingArgument { .. })));
    }

    #[test]
    fn single_mode_carries_the_input() {
        let args = parse(&["-i", "photos/cat.jpg", "-o", "media"]);
        let Ok(Mode::Single(input)) = select_mode(&args) else {
            panic!("expected single-file mode");
        };
        assert_eq!(input, PathBuf::from("photos/cat.jpg"));
    }
}

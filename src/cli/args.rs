use clap::Parser;
use std::path::PathBuf;

use thumbkit::{ResizeFilter, TargetSize};

#[derive(Parser)]
#[command(name = "thumbkit", version, about = "Crop-to-fit thumbnail generator")]
pub struct CliArgs {
    /// Input image (single file mode)
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Input directory containing images (batch mode)
    #[arg(long)]
    pub input_dir: Option<PathBuf>,

    /// Storage directory the original and its thumbnails are saved into
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Thumbnail size as WIDTHxHEIGHT; repeat for several sizes.
    /// Overrides the sizes from --config.
    #[arg(short, long = "size", value_parser = parse_size)]
    pub sizes: Vec<TargetSize>,

    /// JSON config file (sizes, options, base_url)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// JPEG quality (1-100)
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=100))]
    pub quality: Option<u8>,

    /// Resampling filter
    #[arg(long, value_enum)]
    pub filter: Option<ResizeFilter>,

    /// Never enlarge sources smaller than the thumbnail size
    #[arg(long, default_value_t = false)]
    pub no_upscale: bool,

    /// URL prefix for stored files
    #[arg(long)]
    pub base_url: Option<String>,

    /// Delete the stored original NAME and its thumbnails from --output-dir
    #[arg(long, value_name = "NAME")]
    pub delete: Option<String>,

    /// Rebuild the thumbnails of the stored original NAME in --output-dir
    #[arg(long, value_name = "NAME")]
    pub regenerate: Option<String>,

    /// Batch mode: continue with other files when one fails
    #[arg(long, default_value_t = false)]
    pub continue_on_error: bool,

    /// Print the result as JSON on stdout
    #[arg(long, default_value_t = false)]
    pub json: bool,

    /// Enable logging
    #[arg(long, default_value_t = false)]
    pub log: bool,
}

fn parse_size(s: &str) -> Result<TargetSize, String> {
    s.parse::<TargetSize>().map_err(|e| e.to_string())
}

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use ditherator::{DitherAlgorithm, PatternPreset, SourceSettings, SvgOptions};
use image::imageops::FilterType;

/// Command line interface definition.
#[derive(Parser, Debug)]
#[command(author, version, about, propagate_version = true)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOptions,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args, Debug)]
pub struct GlobalOptions {
    /// Increase log verbosity (-v debug, -vv trace); RUST_LOG takes precedence
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Dither an image and export the mask as SVG
    Svg(SvgCommand),
    /// Dither an image and export a two-color PNG preview
    Preview(PreviewCommand),
    /// Inspect horizontal-line pattern tables
    #[command(subcommand)]
    Pattern(PatternCommand),
    /// List the available dithering algorithms
    Algorithms,
}

/// Resampling filters for image resizing.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum ResampleFilter {
    Nearest,
    Triangle,
    CatmullRom,
    Gaussian,
    Lanczos3,
}

impl From<ResampleFilter> for FilterType {
    /// Convert ResampleFilter to image::imageops::FilterType.
    fn from(value: ResampleFilter) -> Self {
        match value {
            ResampleFilter::Nearest => FilterType::Nearest,
            ResampleFilter::Triangle => FilterType::Triangle,
            ResampleFilter::CatmullRom => FilterType::CatmullRom,
            ResampleFilter::Gaussian => FilterType::Gaussian,
            ResampleFilter::Lanczos3 => FilterType::Lanczos3,
        }
    }
}

/// Dithering algorithms selectable on the command line.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum AlgorithmArg {
    FloydSteinberg,
    Atkinson,
    Stucki,
    Ordered,
    HorizontalLine,
}

impl From<AlgorithmArg> for DitherAlgorithm {
    fn from(value: AlgorithmArg) -> Self {
        match value {
            AlgorithmArg::FloydSteinberg => DitherAlgorithm::FloydSteinberg,
            AlgorithmArg::Atkinson => DitherAlgorithm::Atkinson,
            AlgorithmArg::Stucki => DitherAlgorithm::Stucki,
            AlgorithmArg::Ordered => DitherAlgorithm::Ordered,
            AlgorithmArg::HorizontalLine => DitherAlgorithm::HorizontalLine,
        }
    }
}

/// Built-in horizontal-line tables.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum PresetArg {
    Lines4,
    Lines8,
}

impl From<PresetArg> for PatternPreset {
    fn from(value: PresetArg) -> Self {
        match value {
            PresetArg::Lines4 => PatternPreset::Lines4,
            PresetArg::Lines8 => PatternPreset::Lines8,
        }
    }
}

#[derive(Args, Debug)]
pub struct SvgCommand {
    /// Input image path
    pub input: PathBuf,
    /// Output SVG path (defaults to `<name>-dithered.svg`)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
    #[command(flatten)]
    pub dither: DitherArgs,
    #[command(flatten)]
    pub colors: ColorArgs,
}

#[derive(Args, Debug)]
pub struct PreviewCommand {
    /// Input image path
    pub input: PathBuf,
    /// Output PNG path (defaults to `<name>-preview.png`)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
    #[command(flatten)]
    pub dither: DitherArgs,
    #[command(flatten)]
    pub colors: ColorArgs,
}

#[derive(Subcommand, Debug)]
pub enum PatternCommand {
    /// Print a built-in table as JSON
    Show {
        #[arg(long, value_enum, default_value_t = PresetArg::Lines4)]
        preset: PresetArg,
    },
    /// Validate a JSON table file and print it
    Check {
        /// Path to a JSON array of N rows of N integers (N = 4 or 8)
        file: PathBuf,
    },
}

#[derive(Args, Debug)]
pub struct DitherArgs {
    /// Dithering algorithm
    #[arg(short, long, value_enum, default_value_t = AlgorithmArg::Ordered)]
    pub algorithm: AlgorithmArg,
    /// Brightness cutoff (1-255)
    #[arg(short, long, default_value_t = 200, value_parser = clap::value_parser!(u8).range(1..=255))]
    pub threshold: u8,
    /// Source pixels per dithered pixel; also the SVG and preview cell size (1-20)
    #[arg(short, long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..=20))]
    pub scale: u32,
    /// Largest side of the working image
    #[arg(long = "max-dimension", default_value_t = 800)]
    pub max_dimension: u32,
    /// Filter used when shrinking the input
    #[arg(long = "resample-filter", value_enum, default_value_t = ResampleFilter::Triangle)]
    pub resample_filter: ResampleFilter,
    /// JSON pattern table for horizontal-line dithering
    #[arg(long, env = "DITHERATOR_PATTERN", conflicts_with = "preset")]
    pub pattern: Option<PathBuf>,
    /// Built-in pattern table for horizontal-line dithering
    #[arg(long, value_enum)]
    pub preset: Option<PresetArg>,
}

impl From<&DitherArgs> for SourceSettings {
    fn from(args: &DitherArgs) -> Self {
        SourceSettings::default()
            .with_scale(args.scale as f32)
            .with_max_dimension(args.max_dimension)
            .with_resize_filter(args.resample_filter.into())
    }
}

#[derive(Args, Debug)]
pub struct ColorArgs {
    /// Foreground color (hex)
    #[arg(long, default_value = "#ffffff")]
    pub foreground: String,
    /// Background color (hex)
    #[arg(long, default_value = "#000000")]
    pub background: String,
}

impl ColorArgs {
    pub fn svg_options(&self, pixel_size: u32) -> SvgOptions {
        SvgOptions::new(self.foreground.clone(), self.background.clone())
            .with_pixel_size(pixel_size as f32)
    }
}
